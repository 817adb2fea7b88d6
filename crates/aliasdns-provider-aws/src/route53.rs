//! Alias record changes through `ChangeResourceRecordSets`

use aliasdns_core::ServiceError;
use aliasdns_core::traits::{AliasChange, ChangeAction, ChangeReceipt, ZoneRecordService};
use async_trait::async_trait;
use aws_sdk_route53::Client;
use aws_sdk_route53::error::BuildError;
use aws_sdk_route53::types::{
    AliasTarget, Change, ChangeAction as Route53Action, ChangeBatch, ChangeInfo,
    ResourceRecordSet, RrType,
};

use crate::error::service_error;

const SERVICE: &str = "route53";

/// [`ZoneRecordService`] backed by Route 53
#[derive(Debug, Clone)]
pub struct Route53RecordService {
    client: Client,
}

impl Route53RecordService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn route53_action(action: ChangeAction) -> Route53Action {
    match action {
        ChangeAction::Upsert => Route53Action::Upsert,
        ChangeAction::Delete => Route53Action::Delete,
    }
}

/// The alias record set described by `change`
fn alias_record_set(change: &AliasChange) -> Result<ResourceRecordSet, BuildError> {
    let target = AliasTarget::builder()
        .hosted_zone_id(&change.target_zone_id)
        .dns_name(&change.target)
        .evaluate_target_health(change.evaluate_target_health)
        .build()?;

    ResourceRecordSet::builder()
        .name(&change.domain)
        .r#type(RrType::from(AliasChange::RECORD_TYPE))
        .alias_target(target)
        .build()
}

fn change_batch(changes: &[AliasChange]) -> Result<ChangeBatch, BuildError> {
    let changes = changes
        .iter()
        .map(|change| {
            Change::builder()
                .action(route53_action(change.action))
                .resource_record_set(alias_record_set(change)?)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    ChangeBatch::builder().set_changes(Some(changes)).build()
}

fn receipt(info: Option<&ChangeInfo>) -> ChangeReceipt {
    match info {
        Some(info) => ChangeReceipt {
            id: Some(info.id().to_string()),
            status: Some(info.status().as_str().to_string()),
        },
        None => ChangeReceipt::default(),
    }
}

#[async_trait]
impl ZoneRecordService for Route53RecordService {
    async fn submit_change_batch(
        &self,
        zone_id: &str,
        changes: &[AliasChange],
    ) -> Result<ChangeReceipt, ServiceError> {
        let batch = change_batch(changes).map_err(|e| {
            ServiceError::new(SERVICE, format!("failed to build change batch: {}", e))
        })?;

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        Ok(receipt(output.change_info()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert() -> AliasChange {
        AliasChange {
            action: ChangeAction::Upsert,
            zone_id: "Z1".to_string(),
            domain: "apps.demo.example.com".to_string(),
            target: "lb-123.example.com".to_string(),
            target_zone_id: "ZLB1".to_string(),
            evaluate_target_health: false,
        }
    }

    #[test]
    fn alias_record_set_shape() {
        let set = alias_record_set(&upsert()).unwrap();

        assert_eq!(set.name(), "apps.demo.example.com");
        assert_eq!(set.r#type(), &RrType::A);

        let target = set.alias_target().unwrap();
        assert_eq!(target.hosted_zone_id(), "ZLB1");
        assert_eq!(target.dns_name(), "lb-123.example.com");
        assert!(!target.evaluate_target_health());
    }

    #[test]
    fn actions_map_one_to_one() {
        assert_eq!(route53_action(ChangeAction::Upsert), Route53Action::Upsert);
        assert_eq!(route53_action(ChangeAction::Delete), Route53Action::Delete);
    }

    #[test]
    fn batch_keeps_change_order() {
        let mut delete = upsert();
        delete.action = ChangeAction::Delete;

        let batch = change_batch(&[upsert(), delete]).unwrap();

        let actions: Vec<&Route53Action> = batch.changes().iter().map(|c| c.action()).collect();
        assert_eq!(actions, vec![&Route53Action::Upsert, &Route53Action::Delete]);
    }

    #[test]
    fn missing_change_info_yields_empty_receipt() {
        assert_eq!(receipt(None), ChangeReceipt::default());
    }
}
