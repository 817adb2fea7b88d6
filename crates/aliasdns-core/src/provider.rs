//! Alias DNS provider
//!
//! [`AliasDnsProvider`] is the only entry point of the engine. It owns the
//! collaborators and the resolver caches and runs every reconciliation as:
//!
//! ```text
//! validate record ─▶ resolve source zone ─▶ resolve load balancer zone ─▶ apply alias
//! ```
//!
//! Each stage short-circuits on failure, and its error is wrapped with the
//! stage name. Nothing is rolled back because nothing is written before the
//! final single-change batch.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::ResolverCaches;
use crate::error::{Error, Result};
use crate::reconciler::AliasReconciler;
use crate::record::DnsRecord;
use crate::resolver::{LoadBalancerZoneLocator, ZoneResolver};
use crate::traits::{
    ChangeAction, DnsProvider, LoadBalancerInventory, ZoneDirectory, ZoneRecordService,
};
use crate::zone::ZoneSpec;

/// External services the provider talks to
#[derive(Clone)]
pub struct Collaborators {
    /// Tag search over hosted zones
    pub zone_directory: Arc<dyn ZoneDirectory>,
    /// Record change submission
    pub record_service: Arc<dyn ZoneRecordService>,
    /// Generation 1 load balancers, searched first
    pub classic_load_balancers: Arc<dyn LoadBalancerInventory>,
    /// Generation 2 load balancers
    pub load_balancers: Arc<dyn LoadBalancerInventory>,
}

/// DNS provider realizing CNAME records as Route 53 alias A records
///
/// Only CNAME records whose first target is the DNS name of a load balancer
/// are supported. Additional targets are ignored.
///
/// # Thread Safety
///
/// All cache access goes through one mutex. A resolver keeps it locked while
/// searching an inventory, so concurrent calls never run duplicate searches
/// for the same key, at the cost of serializing all cache population.
pub struct AliasDnsProvider {
    zones: ZoneResolver,
    load_balancers: LoadBalancerZoneLocator,
    aliases: AliasReconciler,
    caches: Mutex<ResolverCaches>,
}

impl AliasDnsProvider {
    /// Create a provider with empty caches
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            zone_directory,
            record_service,
            classic_load_balancers,
            load_balancers,
        } = collaborators;

        Self {
            zones: ZoneResolver::new(zone_directory),
            load_balancers: LoadBalancerZoneLocator::new(classic_load_balancers, load_balancers),
            aliases: AliasReconciler::new(record_service),
            caches: Mutex::new(ResolverCaches::new()),
        }
    }

    /// Number of (zones, load balancers) currently cached
    pub async fn cached_entries(&self) -> (usize, usize) {
        let caches = self.caches.lock().await;
        (caches.zones.len(), caches.load_balancer_zones.len())
    }

    /// Perform `action` on `record`
    ///
    /// The record's first target must be the DNS name of a load balancer; its
    /// hosted zone is discovered automatically.
    async fn change(&self, record: &DnsRecord, zone: &ZoneSpec, action: ChangeAction) -> Result<()> {
        let (domain, target) = record.alias_parts()?;
        if record.targets.len() > 1 {
            debug!(
                "Record {} has {} targets; only {} is used",
                domain,
                record.targets.len(),
                target
            );
        }

        let zone_id = self
            .zones
            .resolve(zone, &self.caches)
            .await
            .map_err(|e| Error::ZoneResolution(Box::new(e)))?;

        let target_zone_id = self
            .load_balancers
            .resolve(target, &self.caches)
            .await
            .map_err(|e| Error::LoadBalancerResolution {
                target: target.to_string(),
                source: Box::new(e),
            })?;

        self.aliases
            .apply(action, domain, &zone_id, target, &target_zone_id)
            .await
            .map_err(|e| Error::RecordApplication {
                zone_id: zone_id.clone(),
                source: Box::new(e),
            })?;

        match action {
            ChangeAction::Upsert => info!(record = %record, zone = %zone, "upserted DNS record"),
            ChangeAction::Delete => info!(record = %record, zone = %zone, "deleted DNS record"),
        }
        Ok(())
    }
}

#[async_trait]
impl DnsProvider for AliasDnsProvider {
    async fn ensure(&self, record: &DnsRecord, zone: &ZoneSpec) -> Result<()> {
        self.change(record, zone, ChangeAction::Upsert).await
    }

    async fn delete(&self, record: &DnsRecord, zone: &ZoneSpec) -> Result<()> {
        self.change(record, zone, ChangeAction::Delete).await
    }

    fn provider_name(&self) -> &'static str {
        "route53-alias"
    }
}
