// # Load Balancer Inventory Trait
//
// Lists the load balancers of one API generation, one page at a time.
//
// Neither generation supports a server-side lookup by DNS name, so the
// locator scans every page client-side until it finds a match.

use async_trait::async_trait;
use std::fmt;

use crate::error::ServiceError;
use crate::pagination::Page;

/// Load balancer API generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadBalancerGeneration {
    /// Generation 1 (classic load balancers)
    Classic,
    /// Generation 2 (application and network load balancers)
    Current,
}

impl LoadBalancerGeneration {
    /// Inventory name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadBalancerGeneration::Classic => "classic load balancers",
            LoadBalancerGeneration::Current => "network load balancers",
        }
    }
}

impl fmt::Display for LoadBalancerGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A load balancer as reported by an inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancerEntry {
    /// Load balancer name
    pub name: String,
    /// Public DNS name
    pub dns_name: String,
    /// Hosted zone id required to alias the DNS name
    pub canonical_hosted_zone_id: String,
}

impl LoadBalancerEntry {
    pub fn new(
        name: impl Into<String>,
        dns_name: impl Into<String>,
        canonical_hosted_zone_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dns_name: dns_name.into(),
            canonical_hosted_zone_id: canonical_hosted_zone_id.into(),
        }
    }
}

/// Paginated listing of load balancers
#[async_trait]
pub trait LoadBalancerInventory: Send + Sync {
    /// Which API generation this inventory covers
    fn generation(&self) -> LoadBalancerGeneration;

    /// Fetch one page of load balancers
    ///
    /// `page_token` is `None` for the first page.
    async fn list_load_balancers(
        &self,
        page_token: Option<String>,
    ) -> Result<Page<LoadBalancerEntry>, ServiceError>;
}
