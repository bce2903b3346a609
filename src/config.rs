use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::types::Lang;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub store: StoreConfig,
  pub data: DataConfig,
  /// Language used until the user toggles it
  #[serde(default)]
  pub default_lang: Lang,
  #[serde(default)]
  pub contact: ContactConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

/// Branding shown in the header
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  pub name_en: String,
  pub name_te: String,
  pub established_year: Option<u16>,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      name_en: "Pabba Jewellers".to_string(),
      name_te: "పబ్బా జ్యువెలర్స్".to_string(),
      established_year: None,
    }
  }
}

/// Where the catalog documents live
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
  /// Base URL of the static host, e.g. https://example.com/data/
  pub base_url: String,
  #[serde(default = "default_collections")]
  pub collections: String,
  #[serde(default = "default_products")]
  pub products: String,
  #[serde(default = "default_testimonials")]
  pub testimonials: String,
  /// Per-request timeout
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_collections() -> String {
  "collections.json".to_string()
}

fn default_products() -> String {
  "products.json".to_string()
}

fn default_testimonials() -> String {
  "testimonials.json".to_string()
}

fn default_timeout_secs() -> u64 {
  15
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactConfig {
  /// Number in international format without '+', used for enquiry links
  pub whatsapp_number: Option<String>,
  pub email: Option<String>,
  pub instagram_url: Option<String>,
}

impl ContactConfig {
  /// One-line contact strip, None when nothing is configured
  pub fn summary(&self) -> Option<String> {
    let parts: Vec<String> = [
      self.whatsapp_number.as_ref().map(|n| format!("WhatsApp +{}", n.trim_start_matches('+'))),
      self.email.clone(),
      self.instagram_url.clone(),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join("  |  "))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
  /// Override for the cache database location
  pub path: Option<PathBuf>,
  /// Serve cached data younger than this without revalidating
  pub max_age_secs: Option<u64>,
  /// Treat the data host as unreachable when nothing is saved yet
  #[serde(default)]
  pub offline: bool,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./swarna.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/swarna/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => {
        return Err(eyre!(
          "No configuration file found. Create one at ~/.config/swarna/config.yaml\n\
                 See config.example.yaml for the format."
        ))
      }
    };

    if let Some(url) = Self::data_url_override() {
      config.data.base_url = url;
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("swarna.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("swarna").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub(crate) fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Data URL from the SWARNA_DATA_URL environment variable, if set.
  fn data_url_override() -> Option<String> {
    std::env::var("SWARNA_DATA_URL")
      .ok()
      .filter(|v| !v.trim().is_empty())
  }

  pub fn store_name(&self, lang: Lang) -> &str {
    lang.pick(&self.store.name_en, &self.store.name_te)
  }

  /// Store name for the header, with the founding year when known
  pub fn header_title(&self, lang: Lang) -> String {
    match self.store.established_year {
      Some(year) => format!("{} · Est. {}", self.store_name(lang), year),
      None => self.store_name(lang).to_string(),
    }
  }
}
