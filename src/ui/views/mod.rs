mod catalog;
mod home;
mod product;

pub use catalog::CatalogView;
pub use home::HomeView;
pub use product::ProductView;

use crate::cache::{CacheResult, CacheSource};
use crate::catalog::{label, Label};
use crate::store::types::Lang;

/// Header warning when a view is showing its last saved copy
fn saved_copy_notice<T>(result: &CacheResult<Vec<T>>, lang: Lang) -> Option<&'static str> {
  (result.source == CacheSource::Fallback).then(|| label(Label::ShowingSavedCopy, lang))
}

/// Message for an empty list that came back empty because a fetch failed
fn empty_message<T>(result: &CacheResult<Vec<T>>, lang: Lang) -> Option<&'static str> {
  if !result.data.is_empty() || !result.is_degraded() {
    return None;
  }
  result.error.as_ref().map(|e| e.user_message(lang))
}
