//! Amazon Resource Name parsing
//!
//! The tagging inventory identifies hosted zones by ARN, e.g.
//! `arn:aws:route53:::hostedzone/Z3URY6TWQ91KVV`. Only the pieces needed to
//! extract the zone id are modeled here.

use crate::error::{Error, Result};

/// A parsed ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account_id: &'a str,
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Parse `arn:partition:service:region:account-id:resource`
    ///
    /// The resource part may itself contain `:`.
    pub fn parse(arn: &'a str) -> Result<Self> {
        let mut sections = arn.splitn(6, ':');
        if sections.next() != Some("arn") {
            return Err(Error::resource_parse(arn, "arn: invalid prefix"));
        }
        let (Some(partition), Some(service), Some(region), Some(account_id), Some(resource)) = (
            sections.next(),
            sections.next(),
            sections.next(),
            sections.next(),
            sections.next(),
        ) else {
            return Err(Error::resource_parse(arn, "arn: not enough sections"));
        };

        Ok(Self {
            partition,
            service,
            region,
            account_id,
            resource,
        })
    }
}

/// Extract the hosted zone id from a hosted zone ARN
pub fn hosted_zone_id(arn: &str) -> Result<String> {
    let parsed = Arn::parse(arn)?;
    match parsed.resource.split('/').collect::<Vec<_>>().as_slice() {
        ["hostedzone", id] if !id.is_empty() => Ok(id.to_string()),
        _ => Err(Error::resource_parse(
            arn,
            format!("unexpected resource {:?}", parsed.resource),
        )),
    }
}
