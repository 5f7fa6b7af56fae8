//! Redis backend tests that need no running server, plus a live
//! round-trip ignored by default. Run the live test with:
//! `MUNINN_TEST_REDIS_URL=redis://localhost:6379 cargo test --test redis_backend_test -- --ignored`

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use muninn::{CacheBackend, Muninn, MuninnError, RedisBackend};

#[test]
fn unparseable_address_is_configuration_error() {
    let result = RedisBackend::new("definitely not a url");
    assert!(matches!(result, Err(MuninnError::Configuration(_))));
}

#[tokio::test]
async fn unreachable_server_reports_backend_unavailable() {
    // Construction only parses the address; the connection attempt happens
    // on first use and fails there.
    let backend = RedisBackend::new("redis://127.0.0.1:1").unwrap();

    let result = backend.get("k").await;
    assert!(matches!(result, Err(MuninnError::BackendUnavailable(_))));

    // The failed attempt is not cached as a connection; the next call
    // attempts (and fails) again rather than reusing a broken handle.
    let result = backend.set("k", "v", Some(Duration::from_secs(60))).await;
    assert!(matches!(result, Err(MuninnError::BackendUnavailable(_))));
}

#[tokio::test]
async fn gateway_propagates_remote_failure_without_fetching() {
    // No call-time fallback to local caching: the remote failure is the
    // caller's to handle.
    let gateway = Muninn::builder()
        .remote_backend("redis://127.0.0.1:1")
        .build()
        .unwrap();

    let calls = Arc::new(AtomicU32::new(0));
    let result: muninn::Result<serde_json::Value> = gateway
        .get_or_fetch("k", None, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
                Ok(serde_json::json!({}))
            }
        })
        .await;

    assert!(matches!(result, Err(MuninnError::BackendUnavailable(_))));
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
#[ignore]
async fn live_round_trip_with_ttl() {
    let url = std::env::var("MUNINN_TEST_REDIS_URL")
        .expect("MUNINN_TEST_REDIS_URL must be set for live tests");
    let backend = RedisBackend::new(&url).unwrap();

    backend
        .set("muninn:test:k", "v1", Some(Duration::from_secs(2)))
        .await
        .unwrap();
    assert_eq!(
        backend.get("muninn:test:k").await.unwrap(),
        Some("v1".to_owned())
    );

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(backend.get("muninn:test:k").await.unwrap(), None);
}
