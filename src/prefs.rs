//! Persisted user preferences.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;

use crate::db::Database;
use crate::store::types::Lang;

const PREFERRED_LANG: &str = "preferred_lang";

/// Key-value preferences stored next to the cache
#[derive(Clone)]
pub struct Preferences {
  db: Arc<Database>,
}

impl Preferences {
  pub fn new(db: Arc<Database>) -> Self {
    Self { db }
  }

  /// Last language the user switched to, if any
  pub fn language(&self) -> Result<Option<Lang>> {
    Ok(self.get(PREFERRED_LANG)?.and_then(|v| Lang::from_code(&v)))
  }

  pub fn set_language(&self, lang: Lang) -> Result<()> {
    self.set(PREFERRED_LANG, lang.code())
  }

  fn get(&self, key: &str) -> Result<Option<String>> {
    self
      .db
      .conn()?
      .query_row(
        "SELECT value FROM preferences WHERE key = ?",
        params![key],
        |row| row.get(0),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read preference {}: {}", key, e))
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self
      .db
      .conn()?
      .execute(
        "INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)",
        params![key, value],
      )
      .map_err(|e| eyre!("Failed to store preference {}: {}", key, e))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_language_unset_by_default() {
    let prefs = Preferences::new(Arc::new(Database::open_in_memory().unwrap()));
    assert_eq!(prefs.language().unwrap(), None);
  }

  #[test]
  fn test_language_roundtrip_and_overwrite() {
    let prefs = Preferences::new(Arc::new(Database::open_in_memory().unwrap()));
    prefs.set_language(Lang::Te).unwrap();
    assert_eq!(prefs.language().unwrap(), Some(Lang::Te));

    prefs.set_language(Lang::En).unwrap();
    assert_eq!(prefs.language().unwrap(), Some(Lang::En));
  }

  #[test]
  fn test_unknown_stored_value_is_ignored() {
    let prefs = Preferences::new(Arc::new(Database::open_in_memory().unwrap()));
    prefs.set(PREFERRED_LANG, "fr").unwrap();
    assert_eq!(prefs.language().unwrap(), None);
  }
}
