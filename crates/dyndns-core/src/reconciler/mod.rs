//! Record reconciliation
//!
//! The Reconciler keeps the "A" record of one hostname pointed at the
//! caller's current public IP.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ IpResolver  │────▶│ list_records │────▶│ delete_record│────▶│ create_record│
//! │ (resolve)   │     │ (zone)       │     │ (each match) │     │ (A, new IP)  │
//! └─────────────┘     └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! 1. Check preconditions (hostname, token, zone) before any request
//! 2. Resolve the public IP; failure is fatal
//! 3. List the zone's records; failure is fatal
//! 4. Delete every "A" record of the hostname, one at a time; failures are
//!    reported and skipped
//! 5. Create the replacement "A" record, even if some deletes failed
//!
//! Deleting every match before creating the replacement means a zone that
//! somehow holds duplicate "A" records for the hostname ends up with exactly
//! one after a run.

use crate::config::InvocationParams;
use crate::error::Result;
use crate::traits::{IpResolver, NewRecord, ProviderResponse, Record, ResolvedIp, ZoneClient};
use tracing::{debug, info, warn};

/// A delete that did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelete {
    /// The record that is still in the zone
    pub record: Record,
    /// Why the delete failed (status and body, or the transport error)
    pub reason: String,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The IP the new record points at
    pub ip: ResolvedIp,
    /// Records that were deleted, in deletion order
    pub deleted: Vec<Record>,
    /// Records whose delete failed, in attempt order
    pub failed_deletes: Vec<FailedDelete>,
    /// Raw response of the create request, successful or not
    pub created: ProviderResponse,
}

/// Replaces the "A" record of a hostname with the current public IP
///
/// The reconciler borrows its collaborators; it owns no state and can be
/// dropped after a single run.
pub struct Reconciler<'a> {
    /// IP resolver for the current public IP
    ip_resolver: &'a dyn IpResolver,

    /// Zone client for record operations
    zone_client: &'a dyn ZoneClient,
}

impl<'a> Reconciler<'a> {
    /// Create a new reconciler
    pub fn new(ip_resolver: &'a dyn IpResolver, zone_client: &'a dyn ZoneClient) -> Self {
        Self {
            ip_resolver,
            zone_client,
        }
    }

    /// Run one reconciliation for `params.hostname` in `params.zone_id`
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileReport)`: The create request was sent
    /// - `Err(Error::Precondition)`: Hostname, token or zone missing; nothing was sent
    /// - `Err(Error)`: IP lookup, record listing or the create request failed
    pub async fn reconcile(&self, params: &InvocationParams) -> Result<ReconcileReport> {
        self.reconcile_with(params, |_| Ok(())).await
    }

    /// Like [`reconcile`](Self::reconcile), calling `on_resolved` with the
    /// public IP as soon as it is known
    ///
    /// An error from `on_resolved` stops the run before the zone is listed.
    pub async fn reconcile_with<F>(
        &self,
        params: &InvocationParams,
        mut on_resolved: F,
    ) -> Result<ReconcileReport>
    where
        F: FnMut(&ResolvedIp) -> Result<()>,
    {
        let hostname = params
            .hostname()
            .ok_or_else(|| crate::Error::precondition("cannot update without hostname"))?;
        let token = params.require_token()?;
        let zone_id = params.require_zone()?;

        let ip = self.ip_resolver.resolve().await?;
        info!("Reconciling {} -> {} via {}", hostname, ip, self.zone_client.provider_name());
        on_resolved(&ip)?;

        let records = self.zone_client.list_records(token, zone_id).await?;
        debug!("Zone {} holds {} record(s)", zone_id, records.len());

        let mut deleted = Vec::new();
        let mut failed_deletes = Vec::new();

        for record in records.into_iter().filter(|r| r.is_a_record_for(hostname)) {
            match self.zone_client.delete_record(token, zone_id, &record.id).await {
                Ok(response) if response.is_success() => {
                    info!("Deleted old record {} ({})", record.id, record.value);
                    deleted.push(record);
                }
                Ok(response) => {
                    let reason = format!("HTTP {}: {}", response.status, response.body);
                    warn!("Unable to delete old record {}: {}", record.id, reason);
                    failed_deletes.push(FailedDelete { record, reason });
                }
                Err(e) => {
                    warn!("Unable to delete old record {}: {}", record.id, e);
                    failed_deletes.push(FailedDelete {
                        record,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let new_record = NewRecord::a(hostname, ip.value.clone());
        let created = self
            .zone_client
            .create_record(token, zone_id, &new_record)
            .await?;

        if created.is_success() {
            info!("Created A record {} -> {}", hostname, ip);
        } else {
            warn!("Create request for {} answered HTTP {}", hostname, created.status);
        }

        Ok(ReconcileReport {
            ip,
            deleted,
            failed_deletes,
            created,
        })
    }
}
