//! Test doubles and common utilities for contract tests
//!
//! The doubles model the AWS collaborators closely enough to exercise the
//! engine end to end: paginated listings, tag filtering, and Route 53's
//! rejection of deletes for records that do not exist.

#![allow(dead_code)]

use aliasdns_core::error::ServiceError;
use aliasdns_core::pagination::Page;
use aliasdns_core::traits::{
    AliasChange, ChangeAction, ChangeReceipt, LoadBalancerEntry, LoadBalancerGeneration,
    LoadBalancerInventory, ZoneDirectory, ZoneRecordService,
};
use aliasdns_core::{AliasDnsProvider, Collaborators, TagSet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Split `items` into the page starting at `token`
fn paginate<T: Clone>(items: &[T], page_size: usize, token: Option<String>) -> Page<T> {
    let start = token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
    let end = (start + page_size).min(items.len());
    let page = items[start..end].to_vec();
    if end < items.len() {
        Page::with_next(page, end.to_string())
    } else {
        Page::last(page)
    }
}

/// Build a tag set from literal pairs
pub fn tags(pairs: &[(&str, &str)]) -> TagSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// ARN of a hosted zone
pub fn zone_arn(id: &str) -> String {
    format!("arn:aws:route53:::hostedzone/{}", id)
}

/// A tagging inventory over a fixed set of tagged resources
pub struct StubZoneDirectory {
    resources: Vec<(String, TagSet)>,
    page_size: usize,
    delay: Option<Duration>,
    failure: Mutex<Option<ServiceError>>,
    /// Call counter for list_resources_by_tags()
    call_count: AtomicUsize,
    /// Tag sets requested, one entry per call
    queries: Mutex<Vec<TagSet>>,
}

impl StubZoneDirectory {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            page_size: 100,
            delay: None,
            failure: Mutex::new(None),
            call_count: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Add a resource with the given ARN and tags
    pub fn with_resource(mut self, arn: impl Into<String>, tags: TagSet) -> Self {
        self.resources.push((arn.into(), tags));
        self
    }

    /// Add a hosted zone with the given id and tags
    pub fn with_zone(self, id: &str, tags: TagSet) -> Self {
        self.with_resource(zone_arn(id), tags)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every call with `err` until cleared
    pub fn fail_with(&self, err: Option<ServiceError>) {
        *self.failure.lock().unwrap() = err;
    }

    /// Get the number of times list_resources_by_tags() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the tag sets that were queried
    pub fn queries(&self) -> Vec<TagSet> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ZoneDirectory for StubZoneDirectory {
    async fn list_resources_by_tags(
        &self,
        resource_type: &str,
        tags: &TagSet,
        page_token: Option<String>,
    ) -> Result<Page<String>, ServiceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(tags.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }

        let service = resource_type.split(':').next().unwrap_or_default();
        let matching: Vec<String> = self
            .resources
            .iter()
            .filter(|(arn, _)| arn.split(':').nth(2) == Some(service))
            .filter(|(_, resource_tags)| {
                tags.iter()
                    .all(|(k, v)| resource_tags.get(k).is_some_and(|rv| rv == v))
            })
            .map(|(arn, _)| arn.clone())
            .collect();

        Ok(paginate(&matching, self.page_size, page_token))
    }
}

/// A load balancer inventory over a fixed list of load balancers
pub struct StubLoadBalancerInventory {
    generation: LoadBalancerGeneration,
    entries: Vec<LoadBalancerEntry>,
    page_size: usize,
    delay: Option<Duration>,
    failure: Mutex<Option<ServiceError>>,
    /// Call counter for list_load_balancers()
    call_count: AtomicUsize,
}

impl StubLoadBalancerInventory {
    pub fn new(generation: LoadBalancerGeneration) -> Self {
        Self {
            generation,
            entries: Vec::new(),
            page_size: 100,
            delay: None,
            failure: Mutex::new(None),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn classic() -> Self {
        Self::new(LoadBalancerGeneration::Classic)
    }

    pub fn current() -> Self {
        Self::new(LoadBalancerGeneration::Current)
    }

    /// Add a load balancer named after its DNS name
    pub fn with_load_balancer(mut self, dns_name: &str, hosted_zone_id: &str) -> Self {
        let name = dns_name.split('.').next().unwrap_or(dns_name).to_string();
        self.entries
            .push(LoadBalancerEntry::new(name, dns_name, hosted_zone_id));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every call with `err` until cleared
    pub fn fail_with(&self, err: Option<ServiceError>) {
        *self.failure.lock().unwrap() = err;
    }

    /// Get the number of times list_load_balancers() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LoadBalancerInventory for StubLoadBalancerInventory {
    fn generation(&self) -> LoadBalancerGeneration {
        self.generation
    }

    async fn list_load_balancers(
        &self,
        page_token: Option<String>,
    ) -> Result<Page<LoadBalancerEntry>, ServiceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(paginate(&self.entries, self.page_size, page_token))
    }
}

/// Alias record as stored by [`RecordingRecordService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAlias {
    pub target: String,
    pub target_zone_id: String,
    pub evaluate_target_health: bool,
}

/// An in-memory Route 53 that records every submitted batch
pub struct RecordingRecordService {
    /// (zone id, record name) -> alias
    records: Mutex<HashMap<(String, String), StoredAlias>>,
    /// Every batch submitted, in order
    batches: Mutex<Vec<(String, Vec<AliasChange>)>>,
    failure: Mutex<Option<ServiceError>>,
}

impl RecordingRecordService {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            batches: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Fail every call with `err` until cleared
    pub fn fail_with(&self, err: Option<ServiceError>) {
        *self.failure.lock().unwrap() = err;
    }

    /// Get the number of batches submitted
    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    /// Get every submitted batch
    pub fn batches(&self) -> Vec<(String, Vec<AliasChange>)> {
        self.batches.lock().unwrap().clone()
    }

    /// Get the alias stored for `name` in `zone_id`
    pub fn record(&self, zone_id: &str, name: &str) -> Option<StoredAlias> {
        self.records
            .lock()
            .unwrap()
            .get(&(zone_id.to_string(), name.to_string()))
            .cloned()
    }

    /// Get the number of stored records
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ZoneRecordService for RecordingRecordService {
    async fn submit_change_batch(
        &self,
        zone_id: &str,
        changes: &[AliasChange],
    ) -> Result<ChangeReceipt, ServiceError> {
        let batch_number = {
            let mut batches = self.batches.lock().unwrap();
            batches.push((zone_id.to_string(), changes.to_vec()));
            batches.len()
        };
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }

        let mut records = self.records.lock().unwrap();
        let mut staged = records.clone();
        for change in changes {
            let key = (zone_id.to_string(), change.domain.clone());
            match change.action {
                ChangeAction::Upsert => {
                    staged.insert(
                        key,
                        StoredAlias {
                            target: change.target.clone(),
                            target_zone_id: change.target_zone_id.clone(),
                            evaluate_target_health: change.evaluate_target_health,
                        },
                    );
                }
                ChangeAction::Delete => {
                    if staged.remove(&key).is_none() {
                        return Err(ServiceError::new(
                            "route53",
                            format!(
                                "[Tried to delete resource record set [name='{}.', type='A'] but it was not found]",
                                change.domain
                            ),
                        )
                        .with_code("InvalidChangeBatch"));
                    }
                }
            }
        }
        *records = staged;

        Ok(ChangeReceipt {
            id: Some(format!("/change/C{}", batch_number)),
            status: Some("PENDING".to_string()),
        })
    }
}

/// All doubles wired into one provider
pub struct Harness {
    pub directory: Arc<StubZoneDirectory>,
    pub records: Arc<RecordingRecordService>,
    pub classic: Arc<StubLoadBalancerInventory>,
    pub current: Arc<StubLoadBalancerInventory>,
}

impl Harness {
    pub fn new(
        directory: StubZoneDirectory,
        classic: StubLoadBalancerInventory,
        current: StubLoadBalancerInventory,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            records: Arc::new(RecordingRecordService::new()),
            classic: Arc::new(classic),
            current: Arc::new(current),
        }
    }

    /// Build a provider with fresh caches over the shared doubles
    pub fn provider(&self) -> AliasDnsProvider {
        AliasDnsProvider::new(Collaborators {
            zone_directory: self.directory.clone(),
            record_service: self.records.clone(),
            classic_load_balancers: self.classic.clone(),
            load_balancers: self.current.clone(),
        })
    }

    /// Total calls to both load balancer inventories
    pub fn load_balancer_calls(&self) -> usize {
        self.classic.call_count() + self.current.call_count()
    }
}

/// The common setup: zone Z1 tagged owner=me, classic load balancer
/// lb-1.example.com in ZLB1
pub fn standard_harness() -> Harness {
    Harness::new(
        StubZoneDirectory::new().with_zone("Z1", tags(&[("owner", "me")])),
        StubLoadBalancerInventory::classic().with_load_balancer("lb-1.example.com", "ZLB1"),
        StubLoadBalancerInventory::current(),
    )
}
