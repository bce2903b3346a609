//! Smart caching layer for catalog resources.
//!
//! This module provides a storefront-agnostic caching mechanism that:
//! - Revalidates each resource with a conditional request (ETag / If-None-Match)
//! - Persists the last known-good payload and its fingerprint per resource name
//! - Falls back to the stored payload when the source can't be reached
//! - Returns an empty list, never an error, when nothing was ever stored

mod layer;
mod source;
mod storage;
mod traits;

pub use layer::CacheLayer;
pub use source::{
  Connectivity, Forced, ResourceSource, SourceResponse, TcpProbe, PROBE_TIMEOUT,
};
pub use storage::SqliteStorage;
pub use traits::{CacheResult, CacheSource, Cacheable};
