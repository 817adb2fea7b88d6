// # Zone Directory Trait
//
// Searches a resource inventory for hosted zones carrying a set of tags.
//
// ## Implementations
//
// - AWS Resource Groups Tagging API: `aliasdns-provider-aws` crate
// - Test doubles: `tests/common`
//
// ## Pagination
//
// Even with tag filters applied, the tagging API paginates as though no filter
// were applied: a matching resource can sit behind one or more empty pages.
// Implementations return exactly one page per call and must not skip ahead.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::pagination::Page;
use crate::zone::TagSet;

/// Resource type filter selecting Route 53 hosted zones
pub const HOSTED_ZONE_RESOURCE_TYPE: &str = "route53:hostedzone";

/// Tag-based search over managed zones
#[async_trait]
pub trait ZoneDirectory: Send + Sync {
    /// Fetch one page of resource ARNs of `resource_type` carrying every tag in `tags`
    ///
    /// # Parameters
    ///
    /// - `resource_type`: Resource type filter (e.g., [`HOSTED_ZONE_RESOURCE_TYPE`])
    /// - `tags`: Tag filters, ANDed
    /// - `page_token`: `None` for the first page, then the previous page's token
    async fn list_resources_by_tags(
        &self,
        resource_type: &str,
        tags: &TagSet,
        page_token: Option<String>,
    ) -> Result<Page<String>, ServiceError>;
}
