// # aliasdns - alias record reconciler
//
// Thin integration layer: reads configuration from the environment, builds the
// AWS provider and runs a single ensure or delete. All DNS logic lives in
// aliasdns-core.
//
// ## Configuration
//
// ### Action
// - `ALIASDNS_ACTION`: `ensure` (default) or `delete`
//
// ### Record
// - `ALIASDNS_RECORD_NAME`: Fully qualified record name
// - `ALIASDNS_RECORD_TYPE`: Record type (default CNAME)
// - `ALIASDNS_TARGETS`: Comma-separated targets; the first must be a load balancer DNS name
//
// ### Zone
// - `ALIASDNS_ZONE_ID`: Hosted zone id
// - `ALIASDNS_ZONE_TAGS`: Comma-separated `key=value` tags identifying the zone
//
// ### AWS
// - `ALIASDNS_REGION`: Region of the load balancer (the shared AWS config wins)
// - `ALIASDNS_ACCESS_KEY_ID` / `ALIASDNS_SECRET_ACCESS_KEY`: Static credentials (optional)
// - `ALIASDNS_SERVICE_ENDPOINTS`: JSON array of `{"name": ..., "url": ...}` overrides
//
// ### Logging
// - `ALIASDNS_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export ALIASDNS_RECORD_NAME=apps.demo.example.com
// export ALIASDNS_TARGETS=lb-123.us-east-1.elb.amazonaws.com
// export ALIASDNS_ZONE_TAGS=kubernetes.io/cluster=demo
// export ALIASDNS_REGION=us-east-1
//
// aliasdns
// ```

use aliasdns_core::traits::DnsProvider;
use aliasdns_core::{DnsRecord, ProviderConfig, RecordType, ServiceEndpoint, TagSet, ZoneSpec};
use aliasdns_provider_aws::AwsProviderBuilder;
use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes
///
/// - 0: Record reconciled
/// - 1: Configuration or startup error
/// - 2: Reconciliation failed
#[derive(Debug, Clone, Copy)]
enum AliasDnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<AliasDnsExitCode> for ExitCode {
    fn from(code: AliasDnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Ensure,
    Delete,
}

/// Application configuration
#[derive(Debug)]
struct Config {
    action: Action,
    record: DnsRecord,
    zone: ZoneSpec,
    provider: ProviderConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let action = match var("ALIASDNS_ACTION").as_deref().map(str::trim) {
            None | Some("ensure") => Action::Ensure,
            Some("delete") => Action::Delete,
            Some(other) => anyhow::bail!(
                "ALIASDNS_ACTION '{}' is not supported. Supported actions: ensure, delete",
                other
            ),
        };

        let record_type = match var("ALIASDNS_RECORD_TYPE") {
            Some(value) => value.trim().parse::<RecordType>()?,
            None => RecordType::Cname,
        };

        let service_endpoints = match var("ALIASDNS_SERVICE_ENDPOINTS") {
            Some(json) => serde_json::from_str::<Vec<ServiceEndpoint>>(&json)
                .context("ALIASDNS_SERVICE_ENDPOINTS must be a JSON array of {name, url}")?,
            None => Vec::new(),
        };

        Ok(Self {
            action,
            record: DnsRecord {
                record_type,
                dns_name: var("ALIASDNS_RECORD_NAME").unwrap_or_default(),
                targets: var("ALIASDNS_TARGETS")
                    .unwrap_or_default()
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            zone: ZoneSpec {
                id: var("ALIASDNS_ZONE_ID"),
                tags: parse_tags(&var("ALIASDNS_ZONE_TAGS").unwrap_or_default())?,
            },
            provider: ProviderConfig {
                access_key_id: var("ALIASDNS_ACCESS_KEY_ID"),
                secret_access_key: var("ALIASDNS_SECRET_ACCESS_KEY"),
                region: var("ALIASDNS_REGION"),
                service_endpoints,
            },
            log_level: var("ALIASDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Record shape is checked by the provider itself; this only catches
    /// settings that would otherwise fail after connecting to AWS.
    fn validate(&self) -> Result<()> {
        if self.record.dns_name.is_empty() {
            anyhow::bail!(
                "ALIASDNS_RECORD_NAME is required. \
                Set it via: export ALIASDNS_RECORD_NAME=apps.example.com"
            );
        }

        if self.record.targets.is_empty() {
            anyhow::bail!(
                "ALIASDNS_TARGETS must contain the load balancer DNS name. \
                Set it via: export ALIASDNS_TARGETS=my-lb-123.us-east-1.elb.amazonaws.com"
            );
        }

        if self.zone.explicit_id().is_none() && self.zone.tags.is_empty() {
            anyhow::bail!("Either ALIASDNS_ZONE_ID or ALIASDNS_ZONE_TAGS is required");
        }

        self.provider.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ALIASDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

/// Parse `key=value,key=value`
fn parse_tags(raw: &str) -> Result<TagSet> {
    let mut tags = TagSet::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Zone tag '{}' must have the form key=value", pair))?;
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("Zone tag '{}' has an empty key", pair);
        }
        tags.insert(key.to_string(), value.trim().to_string());
    }
    Ok(tags)
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return AliasDnsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return AliasDnsExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return AliasDnsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return AliasDnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(config)).into()
}

async fn run(config: Config) -> AliasDnsExitCode {
    let provider = match AwsProviderBuilder::new(config.provider).build().await {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to initialize provider: {}", e);
            return AliasDnsExitCode::ConfigError;
        }
    };

    info!(
        provider = provider.provider_name(),
        record = %config.record,
        zone = %config.zone,
        "Reconciling record"
    );

    let result = match config.action {
        Action::Ensure => provider.ensure(&config.record, &config.zone).await,
        Action::Delete => provider.delete(&config.record, &config.zone).await,
    };

    match result {
        Ok(()) => AliasDnsExitCode::Success,
        Err(e) if e.is_validation() => {
            error!("Invalid record: {}", e);
            AliasDnsExitCode::ConfigError
        }
        Err(e) => {
            error!("Reconciliation failed: {}", e);
            AliasDnsExitCode::RuntimeError
        }
    }
}
