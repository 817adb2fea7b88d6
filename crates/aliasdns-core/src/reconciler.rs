//! Alias record reconciliation
//!
//! Submits a single alias A record change per call. Upserts are idempotent on
//! the provider side. Deleting a record that is already gone is reported by
//! Route 53 as an `InvalidChangeBatch` error; that case is treated as success.

use std::sync::Arc;
use tracing::info;

use crate::error::{Error, Result, ServiceError};
use crate::traits::{AliasChange, ChangeAction, ZoneRecordService};

/// Error code Route 53 uses for rejected change batches
const INVALID_CHANGE_BATCH: &str = "InvalidChangeBatch";

/// Whether `err` means the record to delete does not exist
///
/// Route 53 has no dedicated error code for this; the condition can only be
/// recognized by the message of an `InvalidChangeBatch` error. All provider
/// wording checks live here.
pub fn is_record_not_found(err: &ServiceError) -> bool {
    if err
        .code
        .as_deref()
        .is_some_and(|code| code != INVALID_CHANGE_BATCH)
    {
        return false;
    }
    err.message.contains("not found")
}

/// Applies alias A record changes to a hosted zone
pub struct AliasReconciler {
    records: Arc<dyn ZoneRecordService>,
}

impl AliasReconciler {
    pub fn new(records: Arc<dyn ZoneRecordService>) -> Self {
        Self { records }
    }

    /// Create, update or delete an alias for `domain` in `zone_id` pointing at
    /// `target` in `target_zone_id`
    ///
    /// Exactly one change batch is submitted; nothing is retried.
    pub async fn apply(
        &self,
        action: ChangeAction,
        domain: &str,
        zone_id: &str,
        target: &str,
        target_zone_id: &str,
    ) -> Result<()> {
        let change = AliasChange {
            action,
            zone_id: zone_id.to_string(),
            domain: domain.to_string(),
            target: target.to_string(),
            target_zone_id: target_zone_id.to_string(),
            evaluate_target_health: false,
        };

        match self
            .records
            .submit_change_batch(zone_id, std::slice::from_ref(&change))
            .await
        {
            Ok(receipt) => {
                info!(
                    zone_id,
                    domain,
                    target,
                    change_id = receipt.id.as_deref().unwrap_or_default(),
                    status = receipt.status.as_deref().unwrap_or_default(),
                    "updated DNS record"
                );
                Ok(())
            }
            Err(err) if action == ChangeAction::Delete && is_record_not_found(&err) => {
                info!(zone_id, domain, target, "record not found");
                Ok(())
            }
            Err(source) => Err(Error::RecordApply {
                zone_id: zone_id.to_string(),
                source,
            }),
        }
    }
}
