//! Hosted zone search through the Resource Groups Tagging API

use aliasdns_core::pagination::Page;
use aliasdns_core::traits::ZoneDirectory;
use aliasdns_core::{ServiceError, TagSet};
use async_trait::async_trait;
use aws_sdk_resourcegroupstagging::Client;
use aws_sdk_resourcegroupstagging::types::TagFilter;

use crate::error::service_error;

const SERVICE: &str = "tagging";

/// [`ZoneDirectory`] backed by `GetResources`
#[derive(Debug, Clone)]
pub struct TaggingZoneDirectory {
    client: Client,
}

impl TaggingZoneDirectory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// One filter per tag; the API requires all of them to match
fn tag_filters(tags: &TagSet) -> Vec<TagFilter> {
    tags.iter()
        .map(|(key, value)| TagFilter::builder().key(key).values(value).build())
        .collect()
}

#[async_trait]
impl ZoneDirectory for TaggingZoneDirectory {
    async fn list_resources_by_tags(
        &self,
        resource_type: &str,
        tags: &TagSet,
        page_token: Option<String>,
    ) -> Result<Page<String>, ServiceError> {
        let output = self
            .client
            .get_resources()
            .resource_type_filters(resource_type)
            .set_tag_filters(Some(tag_filters(tags)))
            .set_pagination_token(page_token)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        let items = output
            .resource_tag_mapping_list()
            .iter()
            .filter_map(|mapping| mapping.resource_arn())
            .map(str::to_string)
            .collect();

        Ok(Page {
            items,
            next_token: output.pagination_token().map(str::to_string),
        })
    }
}
