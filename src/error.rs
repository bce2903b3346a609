//! Failure taxonomy for catalog resource fetches.

use crate::store::types::Lang;

/// Why a resource fetch did not produce fresh data.
///
/// None of these are fatal: the cache layer turns every variant into either
/// the last known-good payload or an empty list plus a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  /// No network and nothing cached for the resource
  #[error("offline and no cached copy available")]
  Connectivity,

  #[error("network error: {0}")]
  Network(String),

  /// Response body was not a valid record list
  #[error("decode error: {0}")]
  Decode(String),

  /// Neither 200 nor a usable 304
  #[error("unexpected status {0}")]
  Status(u16),
}

impl FetchError {
  /// Generic message shown to the shopper. Technical detail stays in the logs.
  pub fn user_message(&self, lang: Lang) -> &'static str {
    match (self, lang) {
      (FetchError::Connectivity, Lang::En) => "You appear to be offline. Press 'r' to try again.",
      (FetchError::Connectivity, Lang::Te) => {
        "మీరు ఆఫ్‌లైన్‌లో ఉన్నట్లున్నారు. మళ్ళీ ప్రయత్నించడానికి 'r' నొక్కండి."
      }
      (_, Lang::En) => "Could not load the latest catalog. Press 'r' to try again.",
      (_, Lang::Te) => "తాజా కేటలాగ్ లోడ్ కాలేదు. మళ్ళీ ప్రయత్నించడానికి 'r' నొక్కండి.",
    }
  }
}

impl From<reqwest::Error> for FetchError {
  fn from(e: reqwest::Error) -> Self {
    FetchError::Network(e.to_string())
  }
}

impl From<serde_json::Error> for FetchError {
  fn from(e: serde_json::Error) -> Self {
    FetchError::Decode(e.to_string())
  }
}
