//! Cache storage trait and SQLite implementation.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::Database;

/// The durable record for one resource.
#[derive(Debug, Clone)]
pub struct CachedEntry {
  /// Raw JSON payload as last successfully decoded
  pub payload: Vec<u8>,
  /// ETag the source attached to that payload
  pub fingerprint: Option<String>,
  /// SHA-256 of `payload`, hex encoded
  pub digest: String,
  /// When the entry was written
  pub cached_at: DateTime<Utc>,
}

/// Trait for cache storage backends.
pub trait CacheStorage: Send + Sync {
  /// Get the stored entry for a resource name.
  fn get_entry(&self, name: &str) -> Result<Option<CachedEntry>>;

  /// Replace the entry for a resource name. Payload and fingerprint are
  /// written together; a missing fingerprint clears the stored one.
  fn store_entry(&self, name: &str, payload: &[u8], fingerprint: Option<&str>) -> Result<()>;

  /// Mark an entry as revalidated now, leaving payload and fingerprint as is.
  fn touch_entry(&self, name: &str) -> Result<()>;
}

/// Hex SHA-256 of a payload.
pub fn payload_digest(payload: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(payload);
  hex::encode(hasher.finalize())
}

/// SQLite-based cache storage implementation.
#[derive(Clone)]
pub struct SqliteStorage {
  db: Arc<Database>,
}

impl SqliteStorage {
  pub fn new(db: Arc<Database>) -> Self {
    Self { db }
  }
}

impl CacheStorage for SqliteStorage {
  fn get_entry(&self, name: &str) -> Result<Option<CachedEntry>> {
    let conn = self.db.conn()?;

    let row: Option<(Vec<u8>, Option<String>, String, String)> = conn
      .query_row(
        "SELECT payload, fingerprint, digest, cached_at FROM resource_cache WHERE name = ?",
        params![name],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read cache entry {}: {}", name, e))?;

    match row {
      Some((payload, fingerprint, digest, cached_at_str)) => Ok(Some(CachedEntry {
        payload,
        fingerprint,
        digest,
        cached_at: parse_datetime(&cached_at_str)?,
      })),
      None => Ok(None),
    }
  }

  fn store_entry(&self, name: &str, payload: &[u8], fingerprint: Option<&str>) -> Result<()> {
    let conn = self.db.conn()?;
    let digest = payload_digest(payload);

    // Single statement, so payload and fingerprint never diverge
    conn
      .execute(
        "INSERT OR REPLACE INTO resource_cache (name, payload, fingerprint, digest, cached_at)
         VALUES (?, ?, ?, ?, datetime('now'))",
        params![name, payload, fingerprint, digest],
      )
      .map_err(|e| eyre!("Failed to store cache entry {}: {}", name, e))?;

    Ok(())
  }

  fn touch_entry(&self, name: &str) -> Result<()> {
    let conn = self.db.conn()?;

    conn
      .execute(
        "UPDATE resource_cache SET cached_at = datetime('now') WHERE name = ?",
        params![name],
      )
      .map_err(|e| eyre!("Failed to touch cache entry {}: {}", name, e))?;

    Ok(())
  }
}

/// Parse a datetime string from SQLite format.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
  // SQLite stores as "YYYY-MM-DD HH:MM:SS"
  chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|dt| dt.and_utc())
    .map_err(|e| eyre!("Failed to parse datetime '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn storage() -> SqliteStorage {
    SqliteStorage::new(Arc::new(Database::open_in_memory().unwrap()))
  }

  #[test]
  fn test_missing_entry() {
    assert!(storage().get_entry("collections.json").unwrap().is_none());
  }

  #[test]
  fn test_store_and_read_entry() {
    let storage = storage();
    storage
      .store_entry("collections.json", br#"[{"id":"A"}]"#, Some("\"v1\""))
      .unwrap();

    let entry = storage.get_entry("collections.json").unwrap().unwrap();
    assert_eq!(entry.payload, br#"[{"id":"A"}]"#.to_vec());
    assert_eq!(entry.fingerprint.as_deref(), Some("\"v1\""));
    assert_eq!(entry.digest, payload_digest(br#"[{"id":"A"}]"#));
  }

  #[test]
  fn test_store_without_fingerprint_clears_old_one() {
    let storage = storage();
    storage.store_entry("products.json", b"[]", Some("v1")).unwrap();
    storage.store_entry("products.json", b"[1]", None).unwrap();

    let entry = storage.get_entry("products.json").unwrap().unwrap();
    assert_eq!(entry.payload, b"[1]".to_vec());
    assert!(entry.fingerprint.is_none());
  }

  #[test]
  fn test_entries_keyed_by_name() {
    let storage = storage();
    storage.store_entry("a.json", b"[1]", None).unwrap();
    storage.store_entry("b.json", b"[2]", None).unwrap();

    assert_eq!(storage.get_entry("a.json").unwrap().unwrap().payload, b"[1]");
    assert_eq!(storage.get_entry("b.json").unwrap().unwrap().payload, b"[2]");
  }

  #[test]
  fn test_touch_refreshes_timestamp_only() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let storage = SqliteStorage::new(db.clone());
    storage.store_entry("products.json", b"[1]", Some("v1")).unwrap();
    db.conn()
      .unwrap()
      .execute(
        "UPDATE resource_cache SET cached_at = datetime('now', '-2 hours')",
        [],
      )
      .unwrap();

    storage.touch_entry("products.json").unwrap();

    let entry = storage.get_entry("products.json").unwrap().unwrap();
    assert!(Utc::now() - entry.cached_at < chrono::Duration::minutes(1));
    assert_eq!(entry.payload, b"[1]".to_vec());
    assert_eq!(entry.fingerprint.as_deref(), Some("v1"));
  }

  #[test]
  fn test_touch_missing_entry_is_noop() {
    let storage = storage();
    storage.touch_entry("nothing.json").unwrap();
    assert!(storage.get_entry("nothing.json").unwrap().is_none());
  }

  #[test]
  fn test_entry_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");

    {
      let storage = SqliteStorage::new(Arc::new(Database::open(&path).unwrap()));
      storage.store_entry("testimonials.json", b"[]", Some("t1")).unwrap();
    }

    let storage = SqliteStorage::new(Arc::new(Database::open(&path).unwrap()));
    let entry = storage.get_entry("testimonials.json").unwrap().unwrap();
    assert_eq!(entry.fingerprint.as_deref(), Some("t1"));
  }

  #[test]
  fn test_payload_digest_is_stable() {
    assert_eq!(payload_digest(b"[]"), payload_digest(b"[]"));
    assert_ne!(payload_digest(b"[]"), payload_digest(b"[1]"));
    assert_eq!(payload_digest(b"").len(), 64);
  }
}
