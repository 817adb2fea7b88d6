// # DNS Provider Trait
//
// The entry points callers use to reconcile a desired record.
//
// ## Usage
//
// ```rust,ignore
// use aliasdns_core::{DnsProvider, DnsRecord, ZoneSpec};
//
// async fn reconcile(provider: &dyn DnsProvider) -> aliasdns_core::Result<()> {
//     let record = DnsRecord::cname("apps.example.com", "lb-1.us-east-1.elb.amazonaws.com");
//     let zone = ZoneSpec::with_tags([("kubernetes.io/cluster", "demo")]);
//
//     provider.ensure(&record, &zone).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::DnsRecord;
use crate::zone::ZoneSpec;

/// Trait for DNS provider implementations
///
/// Implementations must be thread-safe; the surrounding controller may call
/// `ensure`/`delete` concurrently from several tasks.
///
/// Providers make no retry decisions. A failed call returns an error and the
/// caller decides whether and when to try again.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create or update `record` in the zone named by `zone`
    ///
    /// # Idempotency
    ///
    /// Calling this repeatedly with the same input leaves the zone in the same
    /// state as calling it once.
    async fn ensure(&self, record: &DnsRecord, zone: &ZoneSpec) -> Result<(), crate::Error>;

    /// Remove `record` from the zone named by `zone`
    ///
    /// Deleting a record that does not exist succeeds.
    async fn delete(&self, record: &DnsRecord, zone: &ZoneSpec) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
