// # Netlify DNS Zone Client
//
// This crate provides the Netlify DNS implementation of `ZoneClient`.
//
// ## Implementation Status
//
// - ✅ One HTTP request per operation
// - ✅ Bearer token on every request, never logged
// - ✅ HTTP timeout configurable (default 30 seconds)
// - ✅ Listing maps non-2xx statuses to `Error::RemoteFailure`
// - ✅ Create/delete return the raw response for the caller to judge
// - ❌ NO retry logic
// - ❌ NO caching
//
// ## API Reference
//
// - Netlify API v1: https://open-api.netlify.com/
// - List Zones: GET `/dns_zones/`
// - List Records: GET `/dns_zones/:zone_id/dns_records`
// - Create Record: POST `/dns_zones/:zone_id/dns_records`
// - Delete Record: DELETE `/dns_zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use dyndns_core::config::ClientConfig;
use dyndns_core::traits::{NewRecord, ProviderResponse, Record, Zone, ZoneClient};
use dyndns_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Netlify DNS zone client
///
/// Holds no credentials: the bearer token is passed to every operation.
#[derive(Debug, Clone)]
pub struct NetlifyClient {
    /// API base URL without trailing slash
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl NetlifyClient {
    /// Create a new Netlify client
    ///
    /// # Parameters
    ///
    /// - `api_base`: API base URL (e.g., "https://api.netlify.com/api/v1")
    /// - `timeout`: Per-request timeout
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let api_base = api_base.into().trim_end_matches('/').to_string();

        Ok(Self { api_base, client })
    }

    /// Create a client from the client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.api_base.clone(),
            Duration::from_secs(config.api_timeout_secs),
        )
    }

    fn zones_url(&self) -> String {
        format!("{}/dns_zones/", self.api_base)
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/dns_zones/{}/dns_records", self.api_base, zone_id)
    }

    fn record_url(&self, zone_id: &str, record_id: &str) -> String {
        format!("{}/dns_zones/{}/dns_records/{}", self.api_base, zone_id, record_id)
    }

    /// Send a request and return its status and body
    ///
    /// Only transport failures are errors here; any HTTP status is returned.
    async fn send(&self, request: reqwest::RequestBuilder, token: &str) -> Result<ProviderResponse> {
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        Ok(ProviderResponse::new(status, body))
    }

    /// GET a collection and decode it
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<T>)`: The decoded list, in provider order
    /// - `Err(Error::RemoteFailure)`: The API answered with a non-2xx status
    /// - `Err(Error::Decode)`: The body is not a JSON array of `T`
    async fn get_list<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<Vec<T>> {
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(url), token).await?;
        if !response.is_success() {
            tracing::debug!("GET {} answered HTTP {}", url, response.status);
            return Err(Error::remote_failure(response.status, response.body));
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

#[async_trait]
impl ZoneClient for NetlifyClient {
    async fn list_zones(&self, token: &str) -> Result<Vec<Zone>> {
        self.get_list(&self.zones_url(), token).await
    }

    async fn list_records(&self, token: &str, zone_id: &str) -> Result<Vec<Record>> {
        self.get_list(&self.records_url(zone_id), token).await
    }

    async fn create_record(
        &self,
        token: &str,
        zone_id: &str,
        record: &NewRecord,
    ) -> Result<ProviderResponse> {
        let url = self.records_url(zone_id);
        tracing::debug!("POST {} ({} {})", url, record.record_type, record.hostname);

        self.send(self.client.post(&url).json(record), token).await
    }

    async fn delete_record(
        &self,
        token: &str,
        zone_id: &str,
        record_id: &str,
    ) -> Result<ProviderResponse> {
        let url = self.record_url(zone_id, record_id);
        tracing::debug!("DELETE {}", url);

        self.send(self.client.delete(&url), token).await
    }

    fn provider_name(&self) -> &'static str {
        "netlify"
    }
}
