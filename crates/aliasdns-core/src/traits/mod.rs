//! Core traits for alias record reconciliation
//!
//! This module defines the abstract interfaces the engine consumes and exposes.
//!
//! - [`ZoneDirectory`]: Search hosted zones by tag
//! - [`LoadBalancerInventory`]: List load balancers of one API generation
//! - [`ZoneRecordService`]: Submit record change batches
//! - [`DnsProvider`]: Ensure/delete desired records (implemented by the engine)

pub mod dns_provider;
pub mod load_balancer;
pub mod record_service;
pub mod zone_directory;

pub use dns_provider::DnsProvider;
pub use load_balancer::{LoadBalancerEntry, LoadBalancerGeneration, LoadBalancerInventory};
pub use record_service::{AliasChange, ChangeAction, ChangeReceipt, ZoneRecordService};
pub use zone_directory::{HOSTED_ZONE_RESOURCE_TYPE, ZoneDirectory};
