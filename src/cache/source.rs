//! Seams between the cache layer and the outside world.

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::error::FetchError;

/// Outcome of a conditional request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceResponse {
  /// Source's fingerprint matches the one we sent; no body.
  NotModified,
  /// Full body, with the source's current fingerprint if it sent one.
  Full {
    body: Vec<u8>,
    fingerprint: Option<String>,
  },
}

/// Where resources are fetched from.
#[async_trait]
pub trait ResourceSource: Send + Sync {
  /// Fetch `name`, asking the source to skip the body when its current
  /// fingerprint equals `fingerprint`.
  ///
  /// Statuses other than 200 and 304 are reported as `FetchError::Status`.
  async fn fetch(&self, name: &str, fingerprint: Option<&str>)
    -> Result<SourceResponse, FetchError>;
}

/// Runtime-reported network availability.
#[async_trait]
pub trait Connectivity: Send + Sync {
  async fn is_online(&self) -> bool;
}

/// Connectivity fixed by configuration (`--offline`).
#[derive(Debug, Clone, Copy)]
pub struct Forced(pub bool);

#[async_trait]
impl Connectivity for Forced {
  async fn is_online(&self) -> bool {
    self.0
  }
}

/// Longest a reachability probe may take before the host counts as offline.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Probes reachability by opening a TCP connection to the data host.
#[derive(Debug, Clone)]
pub struct TcpProbe {
  addr: String,
  timeout: Duration,
}

impl TcpProbe {
  pub fn new(addr: impl Into<String>) -> Self {
    Self {
      addr: addr.into(),
      timeout: PROBE_TIMEOUT,
    }
  }

  /// Build a probe for the host and port of a URL.
  pub fn for_url(url: &url::Url) -> Option<Self> {
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(Self::new(format!("{}:{}", host, port)))
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

#[async_trait]
impl Connectivity for TcpProbe {
  async fn is_online(&self) -> bool {
    matches!(
      tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await,
      Ok(Ok(_))
    )
  }
}
