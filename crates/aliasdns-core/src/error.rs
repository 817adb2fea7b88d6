//! Error types for alias record reconciliation
//!
//! Every failure surfaced by [`AliasDnsProvider`](crate::AliasDnsProvider) is an [`Error`].
//! Failures inside a reconciliation are wrapped with the stage that produced them
//! (zone resolution, load balancer resolution, record application) while the
//! original cause stays reachable through [`Error::root_cause`] and the
//! `source()` chain.

use thiserror::Error;

/// Result type alias for aliasdns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for aliasdns
#[derive(Error, Debug)]
pub enum Error {
    /// The record type is not the supported alias-CNAME kind
    #[error("unsupported record type {0}")]
    UnsupportedRecordType(String),

    /// The record has no domain name
    #[error("domain is required")]
    MissingDomain,

    /// The record has no usable first target
    #[error("target is required")]
    MissingTarget,

    /// The zone specification carries neither an id nor any tag
    #[error("invalid zone spec: {0}")]
    InvalidZoneSpec(String),

    /// A resource identifier returned by the tagging inventory could not be parsed
    #[error("failed to parse hosted zone resource {arn:?}: {reason}")]
    ResourceParse {
        /// The raw resource identifier
        arn: String,
        /// Why parsing failed
        reason: String,
    },

    /// Listing one of the inventories failed
    #[error("failed to query {inventory}: {source}")]
    InventoryQuery {
        /// Human-readable inventory name
        inventory: &'static str,
        /// Underlying collaborator error
        #[source]
        source: ServiceError,
    },

    /// No hosted zone carries the requested tags
    #[error("no matching hosted zone found for tags {tags}")]
    ZoneNotFound {
        /// Rendered tag set that was searched for
        tags: String,
    },

    /// No load balancer of either generation has the requested DNS name
    #[error("couldn't find hosted zone ID of load balancer {0}")]
    LoadBalancerNotFound(String),

    /// The change batch was rejected by the record service
    #[error("couldn't update DNS record in zone {zone_id}: {source}")]
    RecordApply {
        /// Zone the batch was submitted to
        zone_id: String,
        /// Underlying collaborator error
        #[source]
        source: ServiceError,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Zone resolution failed
    #[error("failed to find hosted zone for record: {0}")]
    ZoneResolution(#[source] Box<Error>),

    /// Load balancer zone resolution failed
    #[error("failed to get hosted zone for load balancer target {target:?}: {source}")]
    LoadBalancerResolution {
        /// The load balancer DNS name
        target: String,
        /// The failure
        #[source]
        source: Box<Error>,
    },

    /// Applying the alias change failed
    #[error("failed to update alias in zone {zone_id}: {source}")]
    RecordApplication {
        /// The source zone id
        zone_id: String,
        /// The failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a resource parse error
    pub fn resource_parse(arn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResourceParse {
            arn: arn.into(),
            reason: reason.into(),
        }
    }

    /// Unwrap stage context and return the error that actually caused the failure
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::ZoneResolution(source)
            | Error::LoadBalancerResolution { source, .. }
            | Error::RecordApplication { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error stems from invalid caller input rather than the provider
    pub fn is_validation(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::UnsupportedRecordType(_)
                | Error::MissingDomain
                | Error::MissingTarget
                | Error::InvalidZoneSpec(_)
        )
    }
}

/// A failure reported by one of the external collaborators
///
/// Adapters fill `code` from the provider's structured error model when one is
/// available, so callers can avoid depending on message wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service}: {message}")]
pub struct ServiceError {
    /// Service that produced the error (e.g., "route53")
    pub service: &'static str,
    /// Provider error code, if any
    pub code: Option<String>,
    /// Provider error message
    pub message: String,
}

impl ServiceError {
    /// Create an error without a provider code
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            code: None,
            message: message.into(),
        }
    }

    /// Attach a provider error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
