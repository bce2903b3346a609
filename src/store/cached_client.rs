//! Catalog client that wraps the HTTP source with transparent smart caching.

use color_eyre::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{
  CacheLayer, CacheResult, Connectivity, Forced, SqliteStorage, TcpProbe, PROBE_TIMEOUT,
};
use crate::config::{Config, DataConfig};
use crate::db::Database;

use super::client::HttpSource;
use super::types::{Collection, Product, Testimonial};

/// Collections and products loaded together for the catalog page
#[derive(Debug, Clone)]
pub struct CatalogData {
  pub collections: CacheResult<Vec<Collection>>,
  pub products: CacheResult<Vec<Product>>,
}

/// Storefront client with transparent caching support.
///
/// Every method always returns data (possibly empty); degraded results carry
/// the reason in `CacheResult::error`.
#[derive(Clone)]
pub struct StoreClient {
  cache: CacheLayer<SqliteStorage>,
  data: DataConfig,
}

impl StoreClient {
  /// Create a new cached client over the configured data host.
  pub fn new(config: &Config, db: Arc<Database>) -> Result<Self> {
    let timeout = Duration::from_secs(config.data.timeout_secs);
    let source = HttpSource::new(&config.data.base_url, timeout)?;

    let connectivity: Arc<dyn Connectivity> = if config.cache.offline {
      Arc::new(Forced(false))
    } else {
      match TcpProbe::for_url(source.base_url()) {
        Some(probe) => Arc::new(probe.with_timeout(timeout.min(PROBE_TIMEOUT))),
        None => Arc::new(Forced(true)),
      }
    };

    let cache = CacheLayer::new(SqliteStorage::new(db), Arc::new(source), connectivity)
      .with_max_age(
        config
          .cache
          .max_age_secs
          .and_then(|secs| chrono::Duration::try_seconds(secs as i64)),
      );

    Ok(Self {
      cache,
      data: config.data.clone(),
    })
  }

  pub async fn collections(&self) -> CacheResult<Vec<Collection>> {
    self.cache.fetch_resource(&self.data.collections).await
  }

  pub async fn products(&self) -> CacheResult<Vec<Product>> {
    self.cache.fetch_resource(&self.data.products).await
  }

  pub async fn testimonials(&self) -> CacheResult<Vec<Testimonial>> {
    self.cache.fetch_resource(&self.data.testimonials).await
  }

  /// Fetch collections and products concurrently.
  pub async fn catalog(&self) -> CatalogData {
    let (collections, products) = tokio::join!(self.collections(), self.products());
    CatalogData {
      collections,
      products,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::CacheSource;
  use crate::config::{CacheConfig, ContactConfig, StoreConfig};
  use crate::error::FetchError;
  use crate::store::types::Lang;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn config(base_url: &str, offline: bool) -> Config {
    Config {
      store: StoreConfig::default(),
      data: DataConfig {
        base_url: base_url.to_string(),
        collections: "collections.json".to_string(),
        products: "products.json".to_string(),
        testimonials: "testimonials.json".to_string(),
        timeout_secs: 5,
      },
      default_lang: Lang::En,
      contact: ContactConfig::default(),
      cache: CacheConfig {
        offline,
        ..CacheConfig::default()
      },
    }
  }

  #[tokio::test]
  async fn test_collections_revalidate_with_etag() {
    let server = MockServer::start().await;

    // Mounted first, so it matches only when the fingerprint is sent
    Mock::given(method("GET"))
      .and(path("/collections.json"))
      .and(header("If-None-Match", "\"v1\""))
      .respond_with(ResponseTemplate::new(304))
      .expect(1)
      .mount(&server)
      .await;

    Mock::given(method("GET"))
      .and(path("/collections.json"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("ETag", "\"v1\"")
          .set_body_string(
            r#"[{"gallery_id":"A","name_en":"Rings","name_te":"ఉంగరాలు"},
                {"gallery_id":"B","name_en":"Chains","name_te":"గొలుసులు"}]"#,
          ),
      )
      .expect(1)
      .mount(&server)
      .await;

    let db = Arc::new(Database::open_in_memory().unwrap());
    let client = StoreClient::new(&config(&server.uri(), false), db).unwrap();

    let first = client.collections().await;
    assert_eq!(first.source, CacheSource::Network);
    assert_eq!(first.data.len(), 2);

    let second = client.collections().await;
    assert_eq!(second.source, CacheSource::NotModified);
    assert_eq!(second.data, first.data);
  }

  #[tokio::test]
  async fn test_offline_cold_start_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
      .expect(0)
      .mount(&server)
      .await;

    let db = Arc::new(Database::open_in_memory().unwrap());
    let client = StoreClient::new(&config(&server.uri(), true), db).unwrap();

    let result = client.products().await;
    assert!(result.data.is_empty());
    assert_eq!(result.error, Some(FetchError::Connectivity));
  }

  #[tokio::test]
  async fn test_catalog_survives_server_going_away() {
    let server = MockServer::builder().start().await;
    Mock::given(method("GET"))
      .and(path("/products.json"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_string(r#"[{"id":"P1","category_id":"A","title_en":"Ring"}]"#),
      )
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/collections.json"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let db = Arc::new(Database::open_in_memory().unwrap());
    let client = StoreClient::new(&config(&server.uri(), false), db).unwrap();

    let catalog = client.catalog().await;
    assert_eq!(catalog.products.data.len(), 1);
    assert_eq!(catalog.collections.error, Some(FetchError::Status(500)));

    drop(server);

    let again = client.products().await;
    assert_eq!(again.source, CacheSource::Fallback);
    assert_eq!(again.data[0].id, "P1");
  }

  #[tokio::test]
  async fn test_offline_mode_still_revalidates_saved_copy() {
    let server = MockServer::builder().start().await;
    Mock::given(method("GET"))
      .and(path("/testimonials.json"))
      .and(header("If-None-Match", "\"t1\""))
      .respond_with(ResponseTemplate::new(304))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/testimonials.json"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("ETag", "\"t1\"")
          .set_body_string(r#"[{"name":"Lakshmi","text":"Lovely","rating":5}]"#),
      )
      .expect(1)
      .mount(&server)
      .await;

    let db = Arc::new(Database::open_in_memory().unwrap());
    let online = StoreClient::new(&config(&server.uri(), false), db.clone()).unwrap();
    assert_eq!(online.testimonials().await.source, CacheSource::Network);

    let offline = StoreClient::new(&config(&server.uri(), true), db).unwrap();
    let result = offline.testimonials().await;
    assert_eq!(result.source, CacheSource::NotModified);
    assert_eq!(result.data[0].name, "Lakshmi");

    drop(server);

    let result = offline.testimonials().await;
    assert_eq!(result.source, CacheSource::Fallback);
    assert_eq!(result.data.len(), 1);
  }
}
