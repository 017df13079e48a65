// # Zone Client Trait
//
// Defines the interface for the zone/record operations of a DNS provider.
//
// ## Implementations
//
// - Netlify DNS: `dyndns-provider-netlify` crate
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::ZoneClient;
//
// async fn show(client: &dyn ZoneClient, token: &str) -> dyndns_core::Result<()> {
//     for zone in client.list_zones(token).await? {
//         println!("{}:{}", zone.name, zone.id);
//     }
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// A DNS zone owned by the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-specific zone ID
    pub id: String,
    /// Zone name (e.g. "example.com")
    pub name: String,
}

/// One DNS resource record inside a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-specific record ID
    pub id: String,
    /// Fully qualified host name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostname: String,
    /// Record type ("A", "CNAME", "TXT", ...)
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub record_type: String,
    /// Record value (address, target, text)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

// Provider listings carry `null` for fields some record kinds leave unset
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Whether this is an "A" record for `hostname`
    ///
    /// Host names compare case-insensitively, the type must be exactly "A".
    pub fn is_a_record_for(&self, hostname: &str) -> bool {
        self.record_type == "A" && self.hostname.to_lowercase() == hostname.to_lowercase()
    }
}

/// Body of a record creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Host name for the record
    pub hostname: String,
    /// Record value
    pub value: String,
}

impl NewRecord {
    /// Create an "A" record body
    pub fn a(hostname: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            record_type: "A".to_string(),
            hostname: hostname.into(),
            value: value.into(),
        }
    }
}

/// Raw response of a mutating provider call
///
/// The client layer does not judge it; callers check [`is_success`](Self::is_success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ProviderResponse {
    /// Create a response from status and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for DNS provider zone clients
///
/// Every operation is a single outbound request authorized with the given
/// bearer token. Implementations hold no state between calls apart from an
/// optional connection pool, and never retry.
#[async_trait]
pub trait ZoneClient: Send + Sync {
    /// List the zones of the account
    ///
    /// A non-success status is returned as `Error::RemoteFailure`.
    async fn list_zones(&self, token: &str) -> Result<Vec<Zone>, crate::Error>;

    /// List the records of a zone, in provider order
    ///
    /// A non-success status is returned as `Error::RemoteFailure`.
    async fn list_records(&self, token: &str, zone_id: &str)
    -> Result<Vec<Record>, crate::Error>;

    /// Create a record, returning the raw response whatever its status
    async fn create_record(
        &self,
        token: &str,
        zone_id: &str,
        record: &NewRecord,
    ) -> Result<ProviderResponse, crate::Error>;

    /// Delete a record by ID, returning the raw response whatever its status
    async fn delete_record(
        &self,
        token: &str,
        zone_id: &str,
        record_id: &str,
    ) -> Result<ProviderResponse, crate::Error>;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}
