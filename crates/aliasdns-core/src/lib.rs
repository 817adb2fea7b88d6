// # aliasdns-core
//
// Core library for reconciling DNS records as Route 53 alias records.
//
// ## Architecture Overview
//
// A CNAME record whose target is a load balancer DNS name cannot live at a
// zone apex, so it is realized as an alias A record instead. Building that
// alias needs two lookups the caller does not provide:
//
// - **ZoneResolver**: maps a zone id or a set of zone tags to a hosted zone id
// - **LoadBalancerZoneLocator**: maps a load balancer DNS name to the
//   canonical hosted zone of the load balancer
// - **AliasReconciler**: submits the UPSERT or DELETE change
// - **AliasDnsProvider**: the facade running validate → resolve → apply
//
// The AWS APIs sit behind the traits in [`traits`]. `aliasdns-provider-aws`
// implements them with the AWS SDK; the tests in this crate use in-memory
// doubles.
//
// ## Design Principles
//
// 1. **Library-First**: the engine knows nothing about SDK clients
// 2. **Lazy Pagination**: listings stop at the first matching page
// 3. **Cached Lookups**: resolved zones live for the provider's lifetime

pub mod arn;
pub mod cache;
pub mod config;
pub mod error;
pub mod pagination;
pub mod provider;
pub mod reconciler;
pub mod record;
pub mod resolver;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use config::{AwsService, ProviderConfig, ServiceEndpoint, ServiceSettings};
pub use error::{Error, Result, ServiceError};
pub use pagination::{Page, Pages};
pub use provider::{AliasDnsProvider, Collaborators};
pub use reconciler::{AliasReconciler, is_record_not_found};
pub use record::{DnsRecord, RecordType};
pub use resolver::{LoadBalancerZoneLocator, ZoneResolver};
pub use traits::{DnsProvider, LoadBalancerInventory, ZoneDirectory, ZoneRecordService};
pub use zone::{TagSet, ZoneSpec};
