//! Core traits and types for the caching system.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::FetchError;

/// Trait for records that can be fetched and cached as a list resource.
///
/// A resource is a JSON array of records served as one document
/// (e.g. `collections.json`).
pub trait Cacheable: Clone + Send + Sync + Serialize + DeserializeOwned {
  /// Stable identifier of the record within its resource
  fn record_id(&self) -> &str;

  /// Record type name, used in log lines (e.g., "product")
  fn record_type() -> &'static str;
}

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// When the served copy was stored (if from cache)
  pub cached_at: Option<DateTime<Utc>>,
  /// Why fresh data could not be obtained, if it could not
  pub error: Option<FetchError>,
}

impl<T> CacheResult<T> {
  /// Fresh data decoded from a full network response.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      cached_at: None,
      error: None,
    }
  }

  /// Source confirmed the stored copy is current.
  pub fn not_modified(data: T, cached_at: DateTime<Utc>) -> Self {
    Self {
      data,
      source: CacheSource::NotModified,
      cached_at: Some(cached_at),
      error: None,
    }
  }

  /// Stored copy still within its max age; the network was not consulted.
  pub fn from_cache(data: T, cached_at: DateTime<Utc>) -> Self {
    Self {
      data,
      source: CacheSource::CacheFresh,
      cached_at: Some(cached_at),
      error: None,
    }
  }

  /// Last known-good copy served because the fetch failed.
  pub fn fallback(data: T, cached_at: DateTime<Utc>, error: FetchError) -> Self {
    Self {
      data,
      source: CacheSource::Fallback,
      cached_at: Some(cached_at),
      error: Some(error),
    }
  }

  /// Offline or failed, with nothing cached.
  pub fn empty(error: FetchError) -> Self
  where
    T: Default,
  {
    Self {
      data: T::default(),
      source: CacheSource::Empty,
      cached_at: None,
      error: Some(error),
    }
  }

  /// Whether the data was served without a successful round-trip
  pub fn is_degraded(&self) -> bool {
    matches!(self.source, CacheSource::Fallback | CacheSource::Empty)
  }
}

/// Indicates where returned data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from network
  Network,
  /// Revalidated: source answered 304 for our fingerprint
  NotModified,
  /// Data from cache, younger than the configured max age
  CacheFresh,
  /// Fetch failed, serving the stored copy
  Fallback,
  /// Fetch failed and nothing was stored
  Empty,
}
