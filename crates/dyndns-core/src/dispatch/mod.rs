//! Command dispatch
//!
//! Runs exactly one [`Action`] per invocation and writes its output, one
//! line per item:
//!
//! | Action        | Output                                   |
//! |---------------|------------------------------------------|
//! | `list`        | `name:id` per zone                       |
//! | `listRecords` | `id:type:hostname:value` per record      |
//! | `ip`          | the public IP                            |
//! | `update`      | the IP, failed deletes, the create body  |

use crate::config::{Action, InvocationParams};
use crate::error::Result;
use crate::reconciler::{ReconcileReport, Reconciler};
use crate::traits::{IpResolver, Record, Zone, ZoneClient};
use std::io::Write;
use tracing::debug;

/// Runs command-line actions against injected collaborators
pub struct Dispatcher {
    /// IP resolver for `ip` and `update`
    ip_resolver: Box<dyn IpResolver>,

    /// Zone client for `list`, `listRecords` and `update`
    zone_client: Box<dyn ZoneClient>,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(ip_resolver: Box<dyn IpResolver>, zone_client: Box<dyn ZoneClient>) -> Self {
        Self {
            ip_resolver,
            zone_client,
        }
    }

    /// Run the action of `params`, writing its output to `out`
    ///
    /// Nothing is written for an action that fails before producing output.
    pub async fn run(&self, params: &InvocationParams, out: &mut dyn Write) -> Result<()> {
        debug!("Dispatching {:?}", params);

        match params.action {
            Action::List => {
                let token = params.require_token()?;
                let zones = self.zone_client.list_zones(token).await?;
                for zone in &zones {
                    writeln!(out, "{}", format_zone(zone))?;
                }
            }
            Action::ListRecords => {
                let token = params.require_token()?;
                let zone_id = params.require_zone()?;
                let records = self.zone_client.list_records(token, zone_id).await?;
                for record in &records {
                    writeln!(out, "{}", format_record(record))?;
                }
            }
            Action::Ip => {
                let ip = self.ip_resolver.resolve().await?;
                writeln!(out, "{}", ip)?;
            }
            Action::Update => {
                let reconciler =
                    Reconciler::new(self.ip_resolver.as_ref(), self.zone_client.as_ref());
                // The IP goes out before the zone is touched
                let report = reconciler
                    .reconcile_with(params, |ip| {
                        writeln!(out, "{}", ip)?;
                        Ok(())
                    })
                    .await?;
                write_report(&report, out)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// Format a zone as `name:id`
pub fn format_zone(zone: &Zone) -> String {
    format!("{}:{}", zone.name, zone.id)
}

/// Format a record as `id:type:hostname:value`
pub fn format_record(record: &Record) -> String {
    format!(
        "{}:{}:{}:{}",
        record.id, record.record_type, record.hostname, record.value
    )
}

/// Write the delete failures and the create body of an update
fn write_report(report: &ReconcileReport, out: &mut dyn Write) -> std::io::Result<()> {
    for failed in &report.failed_deletes {
        writeln!(
            out,
            "unable to delete old record: {}, {}, {}",
            failed.record.id, failed.record.hostname, failed.record.value
        )?;
    }
    writeln!(out, "{}", report.created.body)
}
