mod app;
mod cache;
mod catalog;
mod commands;
mod config;
mod db;
mod error;
mod event;
mod logging;
mod prefs;
mod query;
mod store;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::Database;
use crate::prefs::Preferences;
use crate::store::cached_client::StoreClient;
use crate::store::types::Lang;

#[derive(Parser, Debug)]
#[command(name = "swarna")]
#[command(about = "Bilingual jewellery catalog for the terminal, usable offline")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/swarna/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Display language: en or te
  #[arg(short, long, value_parser = parse_lang)]
  lang: Option<Lang>,

  /// Treat the data host as unreachable when nothing is saved yet. Saved
  /// copies are still revalidated, and served if that fails
  #[arg(long)]
  offline: bool,

  /// Open straight into a collection (gallery id)
  #[arg(long)]
  category: Option<String>,
}

fn parse_lang(s: &str) -> Result<Lang, String> {
  Lang::from_code(s).ok_or_else(|| format!("unknown language '{}', expected en or te", s))
}

/// Command-line flags win over the config file
fn apply_args(config: &mut config::Config, args: &Args) {
  if args.offline {
    config.cache.offline = true;
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let _log_guard = logging::init()?;

  let mut config = config::Config::load(args.config.as_deref())?;
  apply_args(&mut config, &args);

  let db = match &config.cache.path {
    Some(path) => Database::open(path)?,
    None => Database::open_default()?,
  };
  let db = Arc::new(db);

  let prefs = Preferences::new(db.clone());
  let stored = prefs.language().unwrap_or_else(|e| {
    warn!(error = %e, "could not read saved language");
    None
  });
  let lang = app::resolve_language(args.lang, stored, config.default_lang);

  let client = StoreClient::new(&config, db)
    .map_err(|e| eyre!("Failed to set up catalog client: {}", e))?;

  info!(
    base_url = %config.data.base_url,
    offline = config.cache.offline,
    lang = lang.code(),
    "starting"
  );

  let mut app = app::App::new(config, client, prefs, lang, args.category);
  app.run().await?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_offline_flag_overrides_config() {
    let mut config = config::Config::parse("data:\n  base_url: https://example.com/\n").unwrap();
    let args = Args::try_parse_from(["swarna", "--offline", "--lang", "te"]).unwrap();

    apply_args(&mut config, &args);

    assert!(config.cache.offline);
    assert_eq!(args.lang, Some(Lang::Te));
  }

  #[test]
  fn test_config_offline_kept_without_flag() {
    let mut config = config::Config::parse(
      "data:\n  base_url: https://example.com/\ncache:\n  offline: true\n",
    )
    .unwrap();
    let args = Args::try_parse_from(["swarna"]).unwrap();

    apply_args(&mut config, &args);

    assert!(config.cache.offline);
  }

  #[test]
  fn test_unknown_language_rejected() {
    assert!(Args::try_parse_from(["swarna", "--lang", "fr"]).is_err());
  }
}
