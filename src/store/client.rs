use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

use crate::cache::{ResourceSource, SourceResponse};
use crate::error::FetchError;

/// Static file host serving the catalog JSON documents
#[derive(Clone)]
pub struct HttpSource {
  client: Client,
  base_url: Url,
}

impl HttpSource {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      base_url: parse_base_url(base_url)?,
    })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Resolve a resource name against the base URL
  fn resource_url(&self, name: &str) -> Result<Url, FetchError> {
    self
      .base_url
      .join(name)
      .map_err(|e| FetchError::Network(format!("invalid resource name {}: {}", name, e)))
  }
}

/// Parse the base URL, making sure relative joins land inside it
fn parse_base_url(base_url: &str) -> Result<Url> {
  let mut url =
    Url::parse(base_url).map_err(|e| eyre!("Invalid data base_url {}: {}", base_url, e))?;
  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());
    url.set_path(&path);
  }
  Ok(url)
}

fn header_to_string(response: &Response, name: &str) -> Option<String> {
  response
    .headers()
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(|s| s.to_string())
}

#[async_trait]
impl ResourceSource for HttpSource {
  async fn fetch(
    &self,
    name: &str,
    fingerprint: Option<&str>,
  ) -> Result<SourceResponse, FetchError> {
    let url = self.resource_url(name)?;

    let mut request = self.client.get(url);
    if let Some(etag) = fingerprint {
      request = request.header(IF_NONE_MATCH, etag);
    }

    let response = request.send().await?;

    match response.status() {
      StatusCode::NOT_MODIFIED => Ok(SourceResponse::NotModified),
      StatusCode::OK => {
        let fingerprint = header_to_string(&response, ETAG.as_str());
        let body = response.bytes().await?;
        Ok(SourceResponse::Full {
          body: body.to_vec(),
          fingerprint,
        })
      }
      status => Err(FetchError::Status(status.as_u16())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn source(server: &MockServer) -> HttpSource {
    HttpSource::new(&format!("{}/data", server.uri()), Duration::from_secs(5)).unwrap()
  }

  #[test]
  fn test_base_url_gets_trailing_slash() {
    let url = parse_base_url("https://shop.example.com/data").unwrap();
    assert_eq!(
      url.join("products.json").unwrap().as_str(),
      "https://shop.example.com/data/products.json"
    );
  }

  #[test]
  fn test_invalid_base_url() {
    assert!(parse_base_url("not a url").is_err());
  }

  #[tokio::test]
  async fn test_full_response_carries_etag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/data/collections.json"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("ETag", "\"v1\"")
          .set_body_string(r#"[{"id":"A"}]"#),
      )
      .mount(&server)
      .await;

    let response = source(&server).fetch("collections.json", None).await.unwrap();

    assert_eq!(
      response,
      SourceResponse::Full {
        body: br#"[{"id":"A"}]"#.to_vec(),
        fingerprint: Some("\"v1\"".to_string()),
      }
    );
  }

  #[tokio::test]
  async fn test_fingerprint_sent_as_if_none_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/data/collections.json"))
      .and(header("If-None-Match", "\"v1\""))
      .respond_with(ResponseTemplate::new(304))
      .mount(&server)
      .await;

    let response = source(&server)
      .fetch("collections.json", Some("\"v1\""))
      .await
      .unwrap();

    assert_eq!(response, SourceResponse::NotModified);
  }

  #[tokio::test]
  async fn test_missing_etag_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/data/products.json"))
      .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
      .mount(&server)
      .await;

    let response = source(&server).fetch("products.json", None).await.unwrap();

    assert_eq!(
      response,
      SourceResponse::Full {
        body: b"[]".to_vec(),
        fingerprint: None,
      }
    );
  }

  #[tokio::test]
  async fn test_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/data/products.json"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&server)
      .await;

    let err = source(&server)
      .fetch("products.json", None)
      .await
      .unwrap_err();

    assert_eq!(err, FetchError::Status(404));
  }

  #[tokio::test]
  async fn test_unreachable_host_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpSource::new(&format!("http://{}/data", addr), Duration::from_secs(2)).unwrap();
    let err = source.fetch("products.json", None).await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
  }
}
