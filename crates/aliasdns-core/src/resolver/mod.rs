//! Discovery of the hosted zones an alias record needs
//!
//! - [`ZoneResolver`]: the zone the record lives in
//! - [`LoadBalancerZoneLocator`]: the canonical zone of the load balancer it points at
//!
//! Both take the provider's cache mutex by reference and hold it for the whole
//! check-search-populate sequence.

pub mod load_balancer;
pub mod zone;

pub use load_balancer::LoadBalancerZoneLocator;
pub use zone::ZoneResolver;
