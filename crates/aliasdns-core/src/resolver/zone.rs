//! Hosted zone resolution
//!
//! A [`ZoneSpec`] with an explicit id resolves to that id without touching the
//! cache or the network. Otherwise the tag cache is consulted, and on a miss
//! the tagging inventory is searched for hosted zones carrying every tag.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::arn;
use crate::cache::ResolverCaches;
use crate::error::{Error, Result};
use crate::pagination::Pages;
use crate::traits::{HOSTED_ZONE_RESOURCE_TYPE, ZoneDirectory};
use crate::zone::{TagSet, ZoneSpec, render_tags};

/// Inventory name used in errors
const TAGGING_INVENTORY: &str = "tagged resources";

/// Maps zone specifications to hosted zone ids
pub struct ZoneResolver {
    directory: Arc<dyn ZoneDirectory>,
}

impl ZoneResolver {
    /// Create a resolver searching `directory`
    pub fn new(directory: Arc<dyn ZoneDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve `spec` to a hosted zone id
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidZoneSpec`] if `spec` has neither an id nor tags
    /// - [`Error::InventoryQuery`] if a page of the tagging inventory fails
    /// - [`Error::ResourceParse`] if the first candidate's ARN is malformed
    /// - [`Error::ZoneNotFound`] if no hosted zone carries the tags
    pub async fn resolve(&self, spec: &ZoneSpec, caches: &Mutex<ResolverCaches>) -> Result<String> {
        if let Some(id) = spec.explicit_id() {
            return Ok(id.to_string());
        }
        if spec.tags.is_empty() {
            return Err(Error::InvalidZoneSpec(
                "zone must specify an id or at least one tag".to_string(),
            ));
        }

        let mut caches = caches.lock().await;
        if let Some(id) = caches.zones.find(&spec.tags) {
            debug!("Using cached hosted zone {} for tags {}", id, render_tags(&spec.tags));
            return Ok(id.to_string());
        }

        let id = self.search(&spec.tags).await?;
        caches.zones.insert(id.clone(), spec.tags.clone());
        info!(zone_id = %id, tags = %render_tags(&spec.tags), "found hosted zone using tags");

        Ok(id)
    }

    /// Search the tagging inventory; the first candidate wins
    async fn search(&self, tags: &TagSet) -> Result<String> {
        let directory = self.directory.as_ref();
        let mut pages = Pages::new(move |token| {
            directory.list_resources_by_tags(HOSTED_ZONE_RESOURCE_TYPE, tags, token)
        });

        let candidate = pages
            .find_map(|resource_arn| Some(arn::hosted_zone_id(&resource_arn)))
            .await
            .map_err(|source| Error::InventoryQuery {
                inventory: TAGGING_INVENTORY,
                source,
            })?;

        match candidate {
            Some(id) => id,
            None => Err(Error::ZoneNotFound {
                tags: render_tags(tags),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::pagination::Page;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedDirectory {
        pages: Vec<Page<String>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ZoneDirectory for FixedDirectory {
        async fn list_resources_by_tags(
            &self,
            resource_type: &str,
            _tags: &TagSet,
            page_token: Option<String>,
        ) -> std::result::Result<Page<String>, ServiceError> {
            assert_eq!(resource_type, HOSTED_ZONE_RESOURCE_TYPE);
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index = page_token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
            Ok(self.pages[index].clone())
        }
    }

    fn resolver(pages: Vec<Page<String>>) -> (ZoneResolver, Arc<FixedDirectory>) {
        let directory = Arc::new(FixedDirectory {
            pages,
            calls: AtomicUsize::new(0),
        });
        (ZoneResolver::new(directory.clone()), directory)
    }

    #[tokio::test]
    async fn explicit_id_skips_directory() {
        let (resolver, directory) = resolver(vec![]);
        let caches = Mutex::new(ResolverCaches::new());

        let id = resolver
            .resolve(&ZoneSpec::with_id("ZEXPLICIT"), &caches)
            .await
            .unwrap();

        assert_eq!(id, "ZEXPLICIT");
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
        assert!(caches.lock().await.zones.is_empty());
    }

    #[tokio::test]
    async fn empty_spec_is_invalid() {
        let (resolver, directory) = resolver(vec![]);
        let caches = Mutex::new(ResolverCaches::new());

        let err = resolver.resolve(&ZoneSpec::default(), &caches).await.unwrap_err();

        assert!(matches!(err, Error::InvalidZoneSpec(_)));
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn first_candidate_wins_and_is_cached() {
        let (resolver, directory) = resolver(vec![
            Page::with_next(vec![], "1"),
            Page::with_next(
                vec![
                    "arn:aws:route53:::hostedzone/ZFIRST".to_string(),
                    "arn:aws:route53:::hostedzone/ZSECOND".to_string(),
                ],
                "2",
            ),
            Page::last(vec!["arn:aws:route53:::hostedzone/ZTHIRD".to_string()]),
        ]);
        let caches = Mutex::new(ResolverCaches::new());
        let spec = ZoneSpec::with_tags([("owner", "me")]);

        assert_eq!(resolver.resolve(&spec, &caches).await.unwrap(), "ZFIRST");
        assert_eq!(directory.calls.load(Ordering::SeqCst), 2);

        assert_eq!(resolver.resolve(&spec, &caches).await.unwrap(), "ZFIRST");
        assert_eq!(directory.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn malformed_first_candidate_fails() {
        let (resolver, _directory) = resolver(vec![Page::last(vec![
            "arn:aws:route53:::healthcheck/abc".to_string(),
            "arn:aws:route53:::hostedzone/ZOK".to_string(),
        ])]);
        let caches = Mutex::new(ResolverCaches::new());

        let err = resolver
            .resolve(&ZoneSpec::with_tags([("owner", "me")]), &caches)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ResourceParse { .. }));
        assert!(caches.lock().await.zones.is_empty());
    }

    #[tokio::test]
    async fn no_candidates_is_not_found() {
        let (resolver, directory) = resolver(vec![
            Page::with_next(vec![], "1"),
            Page::last(vec![]),
        ]);
        let caches = Mutex::new(ResolverCaches::new());

        let err = resolver
            .resolve(&ZoneSpec::with_tags([("owner", "me")]), &caches)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ZoneNotFound { ref tags } if tags == "{owner=me}"));
        assert_eq!(directory.calls.load(Ordering::SeqCst), 2);
    }
}
