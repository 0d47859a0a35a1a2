//! Optional on-disk memoization of fetched sheet data.
//!
//! Builds fetch fresh data by default. When a TTL is configured, the
//! mapped events and professionals are stored as JSON and reused until
//! they are older than the TTL.

pub mod manager;

pub use manager::{CacheManager, CachedData};
