//! Core traits for the dyndns system
//!
//! This module defines the abstract interfaces that the HTTP crates implement.
//!
//! - [`IpResolver`]: Look up the caller's public IP
//! - [`ZoneClient`]: List zones and records, create and delete records

pub mod ip_resolver;
pub mod zone_client;

pub use ip_resolver::{IpResolver, ResolvedIp};
pub use zone_client::{NewRecord, ProviderResponse, Record, Zone, ZoneClient};
