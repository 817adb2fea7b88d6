// # Zone Record Service Trait
//
// Submits change batches against a hosted zone.
//
// A batch is applied atomically by the provider: either every change in it is
// committed or none is. The engine always submits single-change batches.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ServiceError;

/// Change action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create or overwrite
    Upsert,
    /// Remove
    Delete,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::Upsert => f.write_str("UPSERT"),
            ChangeAction::Delete => f.write_str("DELETE"),
        }
    }
}

/// An alias A record change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasChange {
    /// What to do with the record
    pub action: ChangeAction,
    /// Hosted zone holding the record
    pub zone_id: String,
    /// Record name
    pub domain: String,
    /// DNS name the alias resolves to
    pub target: String,
    /// Hosted zone of the alias target
    pub target_zone_id: String,
    /// Whether the provider evaluates target health. Always false.
    pub evaluate_target_health: bool,
}

impl AliasChange {
    /// Record type submitted for every alias change
    pub const RECORD_TYPE: &'static str = "A";
}

/// Provider acknowledgement of a change batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReceipt {
    /// Provider change id
    pub id: Option<String>,
    /// Provider change status (e.g., "PENDING")
    pub status: Option<String>,
}

/// Record change submission
#[async_trait]
pub trait ZoneRecordService: Send + Sync {
    /// Submit `changes` as one batch against `zone_id`
    ///
    /// Implementations make exactly one API call and never retry.
    async fn submit_change_batch(
        &self,
        zone_id: &str,
        changes: &[AliasChange],
    ) -> Result<ChangeReceipt, ServiceError>;
}
