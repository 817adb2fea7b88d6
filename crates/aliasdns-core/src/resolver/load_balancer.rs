//! Load balancer hosted zone discovery
//!
//! An alias record pointing at a load balancer must name the load balancer's
//! canonical hosted zone. Neither load balancer API can look a load balancer
//! up by DNS name, so the locator lists each inventory page by page and scans
//! for an exact, case-sensitive DNS name match. Classic load balancers are
//! searched first; application and network load balancers only when the
//! classic inventory has no match.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::cache::ResolverCaches;
use crate::error::{Error, Result};
use crate::pagination::Pages;
use crate::traits::LoadBalancerInventory;

/// Maps load balancer DNS names to their canonical hosted zone ids
pub struct LoadBalancerZoneLocator {
    /// Inventories in search order
    inventories: [Arc<dyn LoadBalancerInventory>; 2],
}

impl LoadBalancerZoneLocator {
    /// Create a locator searching `classic` before `current`
    pub fn new(
        classic: Arc<dyn LoadBalancerInventory>,
        current: Arc<dyn LoadBalancerInventory>,
    ) -> Self {
        Self {
            inventories: [classic, current],
        }
    }

    /// Resolve the canonical hosted zone of the load balancer named `dns_name`
    ///
    /// # Errors
    ///
    /// - [`Error::InventoryQuery`] if listing either generation fails
    /// - [`Error::LoadBalancerNotFound`] if neither generation has `dns_name`
    pub async fn resolve(&self, dns_name: &str, caches: &Mutex<ResolverCaches>) -> Result<String> {
        let mut caches = caches.lock().await;
        if let Some(zone_id) = caches.load_balancer_zones.get(dns_name) {
            debug!("Using cached hosted zone {} for load balancer {}", zone_id, dns_name);
            return Ok(zone_id.to_string());
        }

        let mut found = None;
        for inventory in &self.inventories {
            found = search(inventory.as_ref(), dns_name).await?;
            if found.is_some() {
                break;
            }
        }
        let zone_id = found.ok_or_else(|| Error::LoadBalancerNotFound(dns_name.to_string()))?;

        debug!(dns_name, zone = %zone_id, "associating load balancer with hosted zone");
        caches
            .load_balancer_zones
            .insert(dns_name.to_string(), zone_id.clone());

        Ok(zone_id)
    }
}

/// Scan one inventory for `dns_name`, stopping at the first matching page
async fn search(inventory: &dyn LoadBalancerInventory, dns_name: &str) -> Result<Option<String>> {
    let generation = inventory.generation();
    let mut pages = Pages::new(move |token| inventory.list_load_balancers(token));

    pages
        .find_map(|lb| {
            trace!(
                name = %lb.name,
                dns_name = %lb.dns_name,
                hosted_zone_id = %lb.canonical_hosted_zone_id,
                "found {}",
                generation
            );
            (lb.dns_name == dns_name).then_some(lb.canonical_hosted_zone_id)
        })
        .await
        .map_err(|source| Error::InventoryQuery {
            inventory: generation.as_str(),
            source,
        })
}
