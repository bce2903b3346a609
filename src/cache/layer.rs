//! Cache layer that orchestrates conditional fetching with local fallback.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::source::{Connectivity, ResourceSource, SourceResponse};
use super::storage::{payload_digest, CacheStorage, CachedEntry};
use super::traits::{CacheResult, Cacheable};
use crate::error::FetchError;

/// Smart cache over a resource source.
///
/// Every call revalidates against the source with the stored fingerprint,
/// so unchanged resources cost a 304 and no body. When the source can't be
/// reached the last known-good payload is served, and when nothing was ever
/// stored the caller gets an empty list plus the reason.
pub struct CacheLayer<S: CacheStorage> {
  storage: Arc<S>,
  source: Arc<dyn ResourceSource>,
  connectivity: Arc<dyn Connectivity>,
  /// When set, entries younger than this are served without revalidating
  max_age: Option<Duration>,
}

impl<S: CacheStorage> CacheLayer<S> {
  /// Create a new cache layer with the given storage backend.
  pub fn new(
    storage: S,
    source: Arc<dyn ResourceSource>,
    connectivity: Arc<dyn Connectivity>,
  ) -> Self {
    Self {
      storage: Arc::new(storage),
      source,
      connectivity,
      max_age: None,
    }
  }

  /// Serve cached entries younger than `max_age` without a network round-trip.
  pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
    self.max_age = max_age;
    self
  }

  /// Check if a stored entry is still within the max age.
  fn is_fresh(&self, entry: &CachedEntry) -> bool {
    self
      .max_age
      .is_some_and(|max_age| Utc::now() - entry.cached_at <= max_age)
  }

  /// Fetch a list resource by name.
  ///
  /// 1. Read the stored entry (if its payload still decodes)
  /// 2. Within max age, return it as is
  /// 3. No entry and offline: empty result with a connectivity error
  /// 4. Conditional request with the stored fingerprint
  /// 5. 304: stored payload; 200: decode, store, return fresh. With a max
  ///    age set, a revalidated entry gets its timestamp refreshed
  /// 6. Anything else: stored payload, or empty
  ///
  /// Never fails; errors are reported through `CacheResult::error`.
  pub async fn fetch_resource<T: Cacheable>(&self, name: &str) -> CacheResult<Vec<T>> {
    let cached = self.read_entry::<T>(name);

    if let Some((entry, records)) = &cached {
      if self.is_fresh(entry) {
        debug!(resource = name, "Cache hit within max age");
        return CacheResult::from_cache(records.clone(), entry.cached_at);
      }
    }

    if cached.is_none() && !self.connectivity.is_online().await {
      warn!(resource = name, "Offline with no cached copy");
      return CacheResult::empty(FetchError::Connectivity);
    }

    let fingerprint = cached
      .as_ref()
      .and_then(|(entry, _)| entry.fingerprint.as_deref());

    match self.source.fetch(name, fingerprint).await {
      Ok(SourceResponse::NotModified) => match cached {
        Some((entry, records)) => {
          info!(resource = name, "No changes detected, using local copy");
          self.mark_revalidated(name);
          CacheResult::not_modified(records, entry.cached_at)
        }
        // We never send a fingerprint without an entry, so this is a source bug
        None => Self::fall_back(name, None, FetchError::Status(304)),
      },
      Ok(SourceResponse::Full { body, fingerprint }) => {
        match serde_json::from_slice::<Vec<T>>(&body) {
          Ok(records) => {
            self.write_entry(name, cached.as_ref().map(|(e, _)| e), &body, fingerprint);
            info!(
              resource = name,
              count = records.len(),
              record_type = T::record_type(),
              "New version loaded and cached"
            );
            CacheResult::from_network(records)
          }
          Err(e) => Self::fall_back(name, cached, e.into()),
        }
      }
      Err(e) => Self::fall_back(name, cached, e),
    }
  }

  /// Read and decode the stored entry. Unreadable or undecodable entries are
  /// treated as absent.
  fn read_entry<T: Cacheable>(&self, name: &str) -> Option<(CachedEntry, Vec<T>)> {
    let entry = match self.storage.get_entry(name) {
      Ok(entry) => entry?,
      Err(e) => {
        warn!(resource = name, error = %e, "Failed to read cache entry");
        return None;
      }
    };

    match serde_json::from_slice::<Vec<T>>(&entry.payload) {
      Ok(records) => Some((entry, records)),
      Err(e) => {
        warn!(resource = name, error = %e, "Stored payload no longer decodes, ignoring it");
        None
      }
    }
  }

  /// Persist a freshly decoded payload, skipping identical rewrites.
  fn write_entry(
    &self,
    name: &str,
    previous: Option<&CachedEntry>,
    body: &[u8],
    fingerprint: Option<String>,
  ) {
    if let Some(prev) = previous {
      if prev.digest == payload_digest(body) && prev.fingerprint == fingerprint {
        debug!(resource = name, "Payload unchanged, skipping write");
        self.mark_revalidated(name);
        return;
      }
    }

    if let Err(e) = self.storage.store_entry(name, body, fingerprint.as_deref()) {
      // Fresh data is still returned; the next call will simply refetch
      warn!(resource = name, error = %e, "Failed to store cache entry");
    }
  }

  /// Restart the max-age window for an entry the source just confirmed.
  /// Without a max age the timestamp is unused, so nothing is written.
  fn mark_revalidated(&self, name: &str) {
    if self.max_age.is_none() {
      return;
    }
    if let Err(e) = self.storage.touch_entry(name) {
      warn!(resource = name, error = %e, "Failed to refresh cache timestamp");
    }
  }

  fn fall_back<T>(
    name: &str,
    cached: Option<(CachedEntry, Vec<T>)>,
    error: FetchError,
  ) -> CacheResult<Vec<T>> {
    match cached {
      Some((entry, records)) => {
        warn!(resource = name, error = %error, "Fetch failed, serving cached copy");
        CacheResult::fallback(records, entry.cached_at, error)
      }
      None => {
        warn!(resource = name, error = %error, "Fetch failed with no cached copy");
        CacheResult::empty(error)
      }
    }
  }
}

impl<S: CacheStorage> Clone for CacheLayer<S> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      source: Arc::clone(&self.source),
      connectivity: Arc::clone(&self.connectivity),
      max_age: self.max_age,
    }
  }
}
