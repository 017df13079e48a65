//! Test doubles and common utilities for contract tests
//!
//! The doubles record every call in order so tests can assert on the exact
//! request sequence a command produces.

#![allow(dead_code)]

use dyndns_core::error::{Error, Result};
use dyndns_core::traits::{
    IpResolver, NewRecord, ProviderResponse, Record, ResolvedIp, Zone, ZoneClient,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One observed provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListZones { token: String },
    ListRecords { token: String, zone_id: String },
    Create { zone_id: String, record: NewRecord },
    Delete { zone_id: String, record_id: String },
}

/// An IP resolver that returns a fixed answer and counts calls
pub struct FixedIpResolver {
    answer: std::result::Result<String, String>,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpResolver {
    pub fn new(ip: &str) -> Self {
        Self {
            answer: Ok(ip.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A resolver whose lookup always fails with a network error
    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new FixedIpResolver that shares its counter with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            answer: other.answer.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpResolver for FixedIpResolver {
    async fn resolve(&self) -> Result<ResolvedIp> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(ip) => Ok(ResolvedIp::new(ip.clone())),
            Err(message) => Err(Error::network(message.clone())),
        }
    }
}

/// An in-memory zone that applies creates and deletes and logs every call
pub struct InMemoryZoneClient {
    zones: Vec<Zone>,
    records: Arc<Mutex<Vec<Record>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Arc<AtomicUsize>,
    /// Record IDs whose delete answers HTTP 500 and leaves the record in place
    failing_deletes: Arc<Mutex<HashSet<String>>>,
    /// Record IDs whose delete fails in transport
    disconnected_deletes: Arc<Mutex<HashSet<String>>>,
    /// Listing answers HTTP 503
    listing_fails: Arc<AtomicBool>,
    /// Creating fails in transport
    create_disconnects: Arc<AtomicBool>,
}

impl InMemoryZoneClient {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            zones: Vec::new(),
            records: Arc::new(Mutex::new(records)),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(1000)),
            failing_deletes: Arc::new(Mutex::new(HashSet::new())),
            disconnected_deletes: Arc::new(Mutex::new(HashSet::new())),
            listing_fails: Arc::new(AtomicBool::new(false)),
            create_disconnects: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_zones(mut self, zones: Vec<Zone>) -> Self {
        self.zones = zones;
        self
    }

    /// Make deleting `record_id` fail with HTTP 500
    pub fn fail_delete_of(self, record_id: &str) -> Self {
        self.failing_deletes
            .lock()
            .unwrap()
            .insert(record_id.to_string());
        self
    }

    /// Make deleting `record_id` fail with a network error
    pub fn disconnect_delete_of(self, record_id: &str) -> Self {
        self.disconnected_deletes
            .lock()
            .unwrap()
            .insert(record_id.to_string());
        self
    }

    /// Make record listing answer HTTP 503
    pub fn fail_listing(self) -> Self {
        self.listing_fails.store(true, Ordering::SeqCst);
        self
    }

    /// Make record creation fail with a network error
    pub fn disconnect_create(self) -> Self {
        self.create_disconnects.store(true, Ordering::SeqCst);
        self
    }

    /// Create a new InMemoryZoneClient that shares all state with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            zones: other.zones.clone(),
            records: Arc::clone(&other.records),
            calls: Arc::clone(&other.calls),
            next_id: Arc::clone(&other.next_id),
            failing_deletes: Arc::clone(&other.failing_deletes),
            disconnected_deletes: Arc::clone(&other.disconnected_deletes),
            listing_fails: Arc::clone(&other.listing_fails),
            create_disconnects: Arc::clone(&other.create_disconnects),
        }
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Current contents of the zone
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    /// "A" records currently held for `hostname` (case-insensitive)
    pub fn a_records_for(&self, hostname: &str) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|r| r.is_a_record_for(hostname))
            .collect()
    }
}

#[async_trait::async_trait]
impl ZoneClient for InMemoryZoneClient {
    async fn list_zones(&self, token: &str) -> Result<Vec<Zone>> {
        self.calls.lock().unwrap().push(Call::ListZones {
            token: token.to_string(),
        });
        Ok(self.zones.clone())
    }

    async fn list_records(&self, token: &str, zone_id: &str) -> Result<Vec<Record>> {
        self.calls.lock().unwrap().push(Call::ListRecords {
            token: token.to_string(),
            zone_id: zone_id.to_string(),
        });
        if self.listing_fails.load(Ordering::SeqCst) {
            return Err(Error::remote_failure(503, "service unavailable"));
        }
        Ok(self.records())
    }

    async fn create_record(
        &self,
        _token: &str,
        zone_id: &str,
        record: &NewRecord,
    ) -> Result<ProviderResponse> {
        self.calls.lock().unwrap().push(Call::Create {
            zone_id: zone_id.to_string(),
            record: record.clone(),
        });

        if self.create_disconnects.load(Ordering::SeqCst) {
            return Err(Error::network("connection reset"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let created = Record {
            id: id.clone(),
            hostname: record.hostname.clone(),
            record_type: record.record_type.clone(),
            value: record.value.clone(),
        };
        self.records.lock().unwrap().push(created);

        Ok(ProviderResponse::new(
            201,
            format!(r#"{{"id":"{}","value":"{}"}}"#, id, record.value),
        ))
    }

    async fn delete_record(
        &self,
        _token: &str,
        zone_id: &str,
        record_id: &str,
    ) -> Result<ProviderResponse> {
        self.calls.lock().unwrap().push(Call::Delete {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
        });

        if self.disconnected_deletes.lock().unwrap().contains(record_id) {
            return Err(Error::network("connection reset"));
        }
        if self.failing_deletes.lock().unwrap().contains(record_id) {
            return Ok(ProviderResponse::new(500, "internal error"));
        }

        self.records.lock().unwrap().retain(|r| r.id != record_id);
        Ok(ProviderResponse::new(204, ""))
    }

    fn provider_name(&self) -> &'static str {
        "in-memory"
    }
}

/// Helper to build a record
pub fn record(id: &str, record_type: &str, hostname: &str, value: &str) -> Record {
    Record {
        id: id.to_string(),
        hostname: hostname.to_string(),
        record_type: record_type.to_string(),
        value: value.to_string(),
    }
}

/// Helper to build update parameters
pub fn update_params(hostname: &str) -> dyndns_core::InvocationParams {
    dyndns_core::InvocationParams::new(dyndns_core::Action::Update)
        .with_token("test-token")
        .with_zone("zone-1")
        .with_hostname(hostname)
}
