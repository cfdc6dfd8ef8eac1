//! Host-based tenant routing primitives
//!
//! Parsing of Host header values and caching of which tenant a host maps to. The request
//! pipeline that uses them lives in `gate`.

mod cache;
mod host;

pub use cache::{CachedLookup, TenantCache};
pub use host::{normalize_host, parse_host, HostMatch, HostToken};
