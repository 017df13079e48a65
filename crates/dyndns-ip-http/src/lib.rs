// # HTTP IP Resolver
//
// This crate provides the public IP lookup for dyndns.
//
// ## Architecture
//
// Sends one unauthenticated GET to an IP echo service that answers with a
// JSON body of the form `{"ip": "203.0.113.7"}` (ipify with `format=json`)
// and returns the address text.
//
// - ❌ NO retry logic: a failed lookup is fatal for the run
// - ❌ NO caching: every call performs a fresh request
// - ✅ Request timeout configurable through `ClientConfig::ip_timeout_secs`

use dyndns_core::config::ClientConfig;
use dyndns_core::traits::{IpResolver, ResolvedIp};
use dyndns_core::{Error, Result};

use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

/// Body returned by the IP echo service
#[derive(Debug, Deserialize)]
struct IpEcho {
    ip: String,
}

/// IP resolver backed by a JSON echo endpoint
#[derive(Debug, Clone)]
pub struct HttpIpResolver {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpResolver {
    /// Create a new HTTP IP resolver
    ///
    /// # Parameters
    ///
    /// - `url`: Echo endpoint (e.g., "https://api.ipify.org?format=json")
    /// - `timeout`: Whole-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create a resolver from the client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.ip_lookup_url.clone(),
            Duration::from_secs(config.ip_timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve(&self) -> Result<ResolvedIp> {
        tracing::debug!("Looking up public IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("IP lookup request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read IP lookup response: {}", e)))?;

        parse_ip_body(&body).map_err(|e| {
            if status.is_success() {
                e
            } else {
                Error::decode(format!("IP lookup answered HTTP {}: {}", status.as_u16(), e))
            }
        })
    }
}

/// Extract and validate the `ip` field of an echo response body
fn parse_ip_body(body: &str) -> Result<ResolvedIp> {
    let echo: IpEcho = serde_json::from_str(body)?;
    let ip = echo.ip.trim();

    ip.parse::<IpAddr>()
        .map_err(|_| Error::decode(format!("Invalid IP address: {}", ip)))?;

    Ok(ResolvedIp::new(ip))
}
