//! Load balancer inventories for both Elastic Load Balancing APIs
//!
//! `DescribeLoadBalancers` of the classic API lists generation 1 load
//! balancers; the v2 API lists application and network load balancers. Both
//! page with a marker. Entries without a DNS name or canonical hosted zone are
//! skipped since they can never be alias targets.

use aliasdns_core::ServiceError;
use aliasdns_core::pagination::Page;
use aliasdns_core::traits::{LoadBalancerEntry, LoadBalancerGeneration, LoadBalancerInventory};
use async_trait::async_trait;
use aws_sdk_elasticloadbalancing::types::LoadBalancerDescription;
use aws_sdk_elasticloadbalancingv2::types::LoadBalancer;

use crate::error::service_error;

const SERVICE: &str = "elasticloadbalancing";

fn entry(
    name: Option<&str>,
    dns_name: Option<&str>,
    hosted_zone_id: Option<&str>,
) -> Option<LoadBalancerEntry> {
    Some(LoadBalancerEntry::new(
        name.unwrap_or_default(),
        dns_name?,
        hosted_zone_id.filter(|id| !id.is_empty())?,
    ))
}

fn classic_entry(lb: &LoadBalancerDescription) -> Option<LoadBalancerEntry> {
    entry(
        lb.load_balancer_name(),
        lb.dns_name(),
        lb.canonical_hosted_zone_name_id(),
    )
}

fn current_entry(lb: &LoadBalancer) -> Option<LoadBalancerEntry> {
    entry(lb.load_balancer_name(), lb.dns_name(), lb.canonical_hosted_zone_id())
}

/// Generation 1 inventory
#[derive(Debug, Clone)]
pub struct ClassicLoadBalancers {
    client: aws_sdk_elasticloadbalancing::Client,
}

impl ClassicLoadBalancers {
    pub fn new(client: aws_sdk_elasticloadbalancing::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoadBalancerInventory for ClassicLoadBalancers {
    fn generation(&self) -> LoadBalancerGeneration {
        LoadBalancerGeneration::Classic
    }

    async fn list_load_balancers(
        &self,
        page_token: Option<String>,
    ) -> Result<Page<LoadBalancerEntry>, ServiceError> {
        let output = self
            .client
            .describe_load_balancers()
            .set_marker(page_token)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        Ok(Page {
            items: output
                .load_balancer_descriptions()
                .iter()
                .filter_map(classic_entry)
                .collect(),
            next_token: output.next_marker().map(str::to_string),
        })
    }
}

/// Generation 2 inventory (application and network load balancers)
#[derive(Debug, Clone)]
pub struct NetworkLoadBalancers {
    client: aws_sdk_elasticloadbalancingv2::Client,
}

impl NetworkLoadBalancers {
    pub fn new(client: aws_sdk_elasticloadbalancingv2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoadBalancerInventory for NetworkLoadBalancers {
    fn generation(&self) -> LoadBalancerGeneration {
        LoadBalancerGeneration::Current
    }

    async fn list_load_balancers(
        &self,
        page_token: Option<String>,
    ) -> Result<Page<LoadBalancerEntry>, ServiceError> {
        let output = self
            .client
            .describe_load_balancers()
            .set_marker(page_token)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        Ok(Page {
            items: output
                .load_balancers()
                .iter()
                .filter_map(current_entry)
                .collect(),
            next_token: output.next_marker().map(str::to_string),
        })
    }
}
