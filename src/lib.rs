//! Muninn - resilient cache-aside fetch gateway
//!
//! This crate turns a logical "fetch this remote resource" request into a
//! cached, retried operation: the gateway checks a cache backend first, and
//! on a miss runs the caller's fetch closure under a retry-with-backoff
//! regime before memoizing the result with a TTL. Repeated requests within
//! the freshness window never touch the upstream.
//!
//! The cache backend is pluggable: a shared Redis instance when a remote
//! address is configured, an in-process TTL map otherwise. Selection happens
//! once, at build time.
//!
//! # Example
//!
//! ```rust,no_run
//! use muninn::{HttpTransport, Muninn};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let gateway = Muninn::builder()
//!         .remote_backend("redis://redis:6379")
//!         .default_ttl(Duration::from_secs(300))
//!         .max_retries(2)
//!         .build()?;
//!
//!     let transport = HttpTransport::new();
//!     let summary: serde_json::Value = gateway
//!         .get_or_fetch("coin:summary:bitcoin", None, || {
//!             let transport = transport.clone();
//!             async move {
//!                 transport
//!                     .get_json(
//!                         "https://api.example.com/coins/bitcoin",
//!                         &[("market_data", "true")],
//!                     )
//!                     .await
//!             }
//!         })
//!         .await?;
//!
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod backoff;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod gateway;
pub mod telemetry;
pub mod transport;

// Re-export main types at crate root
pub use backend::{CacheBackend, MemoryBackend, RedisBackend};
pub use backoff::BackoffPolicy;
pub use config::GatewayConfig;
pub use error::{MuninnError, Result, TransportError};
pub use fetcher::Fetcher;
pub use gateway::{FetchGateway, Muninn, MuninnBuilder};
pub use transport::HttpTransport;
