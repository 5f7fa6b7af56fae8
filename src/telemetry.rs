//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `status` — outcome of a fetch sequence: "ok" or "exhausted"

/// Total cache hits observed by the gateway.
pub const CACHE_HITS_TOTAL: &str = "muninn_cache_hits_total";

/// Total cache misses observed by the gateway.
pub const CACHE_MISSES_TOTAL: &str = "muninn_cache_misses_total";

/// Total retry attempts (not counting the initial call of each sequence).
pub const RETRIES_TOTAL: &str = "muninn_retries_total";

/// Total completed fetch sequences.
///
/// Labels: `status` ("ok" | "exhausted").
pub const FETCHES_TOTAL: &str = "muninn_fetches_total";
