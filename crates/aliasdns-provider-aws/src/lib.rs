// # AWS Provider
//
// This crate wires the aliasdns engine to AWS through the AWS SDK for Rust:
//
// - `TaggingZoneDirectory`: hosted zone search with `tag:GetResources`
// - `ClassicLoadBalancers` / `NetworkLoadBalancers`: `DescribeLoadBalancers`
//   of both Elastic Load Balancing APIs
// - `Route53RecordService`: `route53:ChangeResourceRecordSets`
//
// `AwsProviderBuilder` loads the shared AWS configuration, picks a region and
// endpoint for each client, and assembles an `AliasDnsProvider`.
//
// ## Constraints
//
// - One API call per trait method; the SDK's own retry policy applies
// - No caching here; the engine owns the caches
// - Secret keys never appear in logs
//
// ## API Reference
//
// - Route 53: https://docs.aws.amazon.com/Route53/latest/APIReference/
// - Tagging: https://docs.aws.amazon.com/resourcegroupstagging/latest/APIReference/
// - ELB: https://docs.aws.amazon.com/elasticloadbalancing/latest/APIReference/

mod error;

pub mod elb;
pub mod route53;
pub mod tagging;

pub use elb::{ClassicLoadBalancers, NetworkLoadBalancers};
pub use route53::Route53RecordService;
pub use tagging::TaggingZoneDirectory;

use aliasdns_core::{
    AliasDnsProvider, AwsService, Collaborators, Error, ProviderConfig, Result, ServiceSettings,
};
use aws_config::{AppName, BehaviorVersion, SdkConfig};
use aws_sdk_route53::config::Credentials;
use std::sync::Arc;
use tracing::info;

/// Build a service client from the shared configuration and per-service settings
macro_rules! service_client {
    ($sdk:ident, $shared:expr, $settings:expr) => {{
        let settings: ServiceSettings = $settings;
        let mut builder = $sdk::config::Builder::from($shared)
            .region($sdk::config::Region::new(settings.region));
        if let Some(url) = settings.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        $sdk::Client::from_conf(builder.build())
    }};
}

/// Application name appended to the SDK user agent
fn app_name() -> Result<AppName> {
    AppName::new(format!("aliasdns-{}", env!("CARGO_PKG_VERSION")))
        .map_err(|e| Error::config(format!("invalid application name: {}", e)))
}

/// Builds an [`AliasDnsProvider`] talking to AWS
///
/// # Security
///
/// Static credentials are handed to the SDK and never logged. Without them
/// the SDK's default credential chain is used.
#[derive(Debug, Clone)]
pub struct AwsProviderBuilder {
    config: ProviderConfig,
}

impl AwsProviderBuilder {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Load the shared AWS configuration and create the collaborators
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is invalid, no
    /// region can be determined, or a custom endpoint is rejected.
    pub async fn collaborators(&self) -> Result<Collaborators> {
        self.config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).app_name(app_name()?);
        if let Some((access_key_id, secret_access_key)) = self.config.static_credentials() {
            info!("using static credentials");
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "aliasdns",
            ));
        }
        let shared = loader.load().await;

        let region = self
            .config
            .select_region(shared.region().map(|r| r.as_ref()))?;
        self.clients(&shared, &region)
    }

    fn clients(&self, shared: &SdkConfig, region: &str) -> Result<Collaborators> {
        let tagging = service_client!(
            aws_sdk_resourcegroupstagging,
            shared,
            self.config.service_settings(region, AwsService::Tagging)?
        );
        let route53 = service_client!(
            aws_sdk_route53,
            shared,
            self.config.service_settings(region, AwsService::Route53)?
        );
        let elb_settings = self.config.service_settings(region, AwsService::Elb)?;
        let classic = service_client!(aws_sdk_elasticloadbalancing, shared, elb_settings.clone());
        let current = service_client!(aws_sdk_elasticloadbalancingv2, shared, elb_settings);

        Ok(Collaborators {
            zone_directory: Arc::new(TaggingZoneDirectory::new(tagging)),
            record_service: Arc::new(Route53RecordService::new(route53)),
            classic_load_balancers: Arc::new(ClassicLoadBalancers::new(classic)),
            load_balancers: Arc::new(NetworkLoadBalancers::new(current)),
        })
    }

    /// Build the provider
    pub async fn build(self) -> Result<AliasDnsProvider> {
        let collaborators = self.collaborators().await?;
        info!("AWS alias DNS provider ready");
        Ok(AliasDnsProvider::new(collaborators))
    }
}
