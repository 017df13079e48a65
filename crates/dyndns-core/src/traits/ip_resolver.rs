// # IP Resolver Trait
//
// Defines the interface for looking up the caller's public IP address.
//
// ## Implementations
//
// - ipify JSON endpoint: `dyndns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::IpResolver;
//
// async fn print_ip(resolver: &dyn IpResolver) -> dyndns_core::Result<()> {
//     let ip = resolver.resolve().await?;
//     println!("{}", ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;

/// The caller's public IP as reported by the lookup service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIp {
    /// Textual address, IPv4 dotted-quad or IPv6
    pub value: String,
}

impl ResolvedIp {
    /// Create a resolved IP from its textual form
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl fmt::Display for ResolvedIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Trait for public IP lookup implementations
///
/// Implementations perform exactly one unauthenticated request per call.
/// They must not retry or cache; a failed lookup is returned to the caller,
/// which treats it as fatal for the run.
#[async_trait]
pub trait IpResolver: Send + Sync {
    /// Look up the current public IP
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedIp)`: The current public IP
    /// - `Err(Error::Network)`: The request could not be completed
    /// - `Err(Error::Decode)`: The body did not contain a valid IP field
    async fn resolve(&self) -> Result<ResolvedIp, crate::Error>;
}
