//! Configuration types for the AWS provider
//!
//! This module defines the provider configuration and the rules that pick a
//! region and endpoint for each AWS service client. The rules are pure
//! functions so they can be tested without credentials or network access;
//! `aliasdns-provider-aws` applies them when building SDK clients.
//!
//! Route 53 is not a regionalized service, and the tagging API only returns
//! hosted zones when called in `us-east-1` (or `cn-northwest-1` in the China
//! partition). Load balancers are looked up in the configured region.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

const US_EAST_1: &str = "us-east-1";
const CN_NORTH_1: &str = "cn-north-1";
const CN_NORTHWEST_1: &str = "cn-northwest-1";

/// Route 53 endpoint for all regions outside China
pub const ROUTE53_NON_REGIONALIZED_ENDPOINT: &str = "https://route53.amazonaws.com";
/// The only regionalized Route 53 endpoint accepted outside China
pub const ROUTE53_US_EAST_ENDPOINT: &str = "https://route53.us-east-1.amazonaws.com";
/// Route 53 endpoint for the China regions
pub const ROUTE53_CHINA_ENDPOINT: &str = "https://route53.amazonaws.com.cn";
/// Tagging endpoint without a region
pub const TAGGING_NON_REGIONALIZED_ENDPOINT: &str = "https://tagging.amazonaws.com";
/// Tagging endpoint for us-east-1
pub const TAGGING_US_EAST_ENDPOINT: &str = "https://tagging.us-east-1.amazonaws.com";

/// AWS services the provider talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwsService {
    /// Route 53 record changes
    Route53,
    /// Elastic Load Balancing (both generations)
    Elb,
    /// Resource Groups Tagging
    Tagging,
}

impl AwsService {
    /// AWS service name as used in endpoint hosts and configuration
    pub fn name(&self) -> &'static str {
        match self {
            AwsService::Route53 => "route53",
            AwsService::Elb => "elasticloadbalancing",
            AwsService::Tagging => "tagging",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        [AwsService::Route53, AwsService::Elb, AwsService::Tagging]
            .into_iter()
            .find(|service| service.name() == name)
    }
}

impl fmt::Display for AwsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Custom URL overriding the default endpoint of one AWS service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// AWS service name (`route53`, `elasticloadbalancing` or `tagging`)
    pub name: String,
    /// Fully qualified URL replacing the generated endpoint
    pub url: String,
}

impl ServiceEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Provider configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Static access key id; the default credential chain is used when unset
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret access key
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Region load balancers are created in
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint overrides
    #[serde(default)]
    pub service_endpoints: Vec<ServiceEndpoint>,
}

// Custom Debug implementation that hides the secret
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<REDACTED>"),
            )
            .field("region", &self.region)
            .field("service_endpoints", &self.service_endpoints)
            .finish()
    }
}

/// Region and endpoint for one service client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Signing region
    pub region: String,
    /// Endpoint override, if any
    pub endpoint_url: Option<String>,
}

impl ServiceSettings {
    fn region(region: &str) -> Self {
        Self {
            region: region.to_string(),
            endpoint_url: None,
        }
    }
}

impl ProviderConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) if id.is_empty() || secret.is_empty() => {
                return Err(Error::config("static credentials cannot be empty"));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::config(
                    "access key id and secret access key must be set together",
                ));
            }
            _ => {}
        }

        for endpoint in &self.service_endpoints {
            if AwsService::from_name(&endpoint.name).is_none() {
                debug!(service = %endpoint.name, "ignoring endpoint of unused service");
                continue;
            }
            validate_service_endpoint(&endpoint.url)?;
        }

        Ok(())
    }

    /// Static credentials, if both parts are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }

    /// Pick the region: the shared AWS configuration wins over this config
    pub fn select_region(&self, shared_region: Option<&str>) -> Result<String> {
        if let Some(region) = shared_region.filter(|r| !r.is_empty()) {
            info!(region, "using region from shared config");
            return Ok(region.to_string());
        }
        match self.region.as_deref().filter(|r| !r.is_empty()) {
            Some(region) => {
                info!(region, "using region from provider config");
                Ok(region.to_string())
            }
            None => Err(Error::config("region is required")),
        }
    }

    /// Region and endpoint for `service` when load balancers live in `region`
    pub fn service_settings(&self, region: &str, service: AwsService) -> Result<ServiceSettings> {
        if region == CN_NORTH_1 || region == CN_NORTHWEST_1 {
            return Ok(match service {
                AwsService::Tagging => ServiceSettings::region(CN_NORTHWEST_1),
                AwsService::Route53 => ServiceSettings {
                    region: CN_NORTHWEST_1.to_string(),
                    endpoint_url: Some(ROUTE53_CHINA_ENDPOINT.to_string()),
                },
                AwsService::Elb => ServiceSettings::region(region),
            });
        }

        let mut settings = match service {
            AwsService::Route53 | AwsService::Tagging => ServiceSettings::region(US_EAST_1),
            AwsService::Elb => ServiceSettings::region(region),
        };

        if !self.service_endpoints.is_empty() {
            let known = self
                .service_endpoints
                .iter()
                .any(|ep| AwsService::from_name(&ep.name).is_some());
            if !known {
                return Err(Error::config(format!(
                    "{}, {} and {} services must be configured when using custom endpoints",
                    AwsService::Elb,
                    AwsService::Route53,
                    AwsService::Tagging
                )));
            }

            if let Some(endpoint) = self
                .service_endpoints
                .iter()
                .find(|ep| ep.name == service.name())
            {
                validate_service_endpoint(&endpoint.url).map_err(|e| {
                    Error::config(format!(
                        "failed to validate service endpoint {}: {}",
                        service, e
                    ))
                })?;
                info!(url = %endpoint.url, "using {} custom endpoint", service);
                settings.endpoint_url = Some(endpoint.url.clone());
            }
        }

        Ok(settings)
    }
}

/// Validate a custom endpoint URL
///
/// The URL must be absolute with a host. Route 53 and tagging endpoints must
/// be either the non-regionalized or the us-east-1 endpoint, since hosted
/// zones are only visible there.
pub fn validate_service_endpoint(uri: &str) -> Result<()> {
    let parsed = Url::parse(uri)
        .map_err(|e| Error::config(format!("invalid endpoint url {}: {}", uri, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::config(format!("endpoint url {} has no host", uri)))?;

    let pinned = [
        (
            AwsService::Route53,
            [ROUTE53_NON_REGIONALIZED_ENDPOINT, ROUTE53_US_EAST_ENDPOINT],
        ),
        (
            AwsService::Tagging,
            [TAGGING_NON_REGIONALIZED_ENDPOINT, TAGGING_US_EAST_ENDPOINT],
        ),
    ];
    for (service, allowed) in pinned {
        if host.contains(service.name()) && !allowed.contains(&uri) {
            return Err(Error::config(format!(
                "invalid endpoint url {} for service {}; only {} and {} are supported",
                uri, service, allowed[0], allowed[1]
            )));
        }
    }

    Ok(())
}
