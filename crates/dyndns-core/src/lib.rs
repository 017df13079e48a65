// # dyndns-core
//
// Core library for the dyndns record updater.
//
// ## Architecture Overview
//
// This library holds everything that is not HTTP plumbing:
// - **IpResolver**: Trait for looking up the caller's public IP
// - **ZoneClient**: Trait for the four zone/record operations of a DNS provider
// - **Reconciler**: Replaces the "A" record of a hostname with the current IP
// - **Dispatcher**: Runs one command-line action and prints its output
// - **InvocationParams**: The parsed `action key=value...` command line
//
// ## Design Principles
//
// 1. **Separation of Concerns**: HTTP implementations live in their own crates
// 2. **Single-Shot**: Nothing is kept between invocations, no background tasks
// 3. **Library-First**: The binary is a thin layer over this crate
// 4. **Delete-then-Create**: Records are never edited in place

pub mod traits;
pub mod reconciler;
pub mod dispatch;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpResolver, ZoneClient};
pub use reconciler::{Reconciler, ReconcileReport};
pub use dispatch::Dispatcher;
pub use config::{Action, ClientConfig, InvocationParams};
pub use error::{Error, Result};
