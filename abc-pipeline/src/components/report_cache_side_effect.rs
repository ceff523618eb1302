use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use abc_core::ClassifiedRecord;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::ReportQuery;

/// Shared in-memory view cache, keyed by dataset fingerprint plus the
/// query's filters. Nothing is ever persisted.
pub type SharedViewCache = Arc<Mutex<HashMap<String, Vec<ClassifiedRecord>>>>;

/// Records the selected view under its fingerprint+query key.
///
/// Two executions only share a key when they saw the same input bytes, the
/// same thresholds, and asked for the same view, so a hit can be served
/// without touching the classifier.
pub struct ReportCacheSideEffect {
    fingerprint: u64,
    cache: SharedViewCache,
}

impl ReportCacheSideEffect {
    pub fn new(fingerprint: u64) -> Self {
        Self::with_cache(fingerprint, SharedViewCache::default())
    }

    pub fn with_cache(fingerprint: u64, cache: SharedViewCache) -> Self {
        Self { fingerprint, cache }
    }

    fn cache_key(&self, query: &ReportQuery) -> String {
        format!(
            "{:016x}|category={}|class={}",
            self.fingerprint,
            query.category.as_deref().unwrap_or("*"),
            query
                .class
                .map(|c| c.to_string())
                .unwrap_or_else(|| "*".to_string()),
        )
    }
}

#[async_trait]
impl SideEffect<ReportQuery, ClassifiedRecord> for ReportCacheSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<ReportQuery, ClassifiedRecord>>,
    ) -> Result<(), String> {
        let key = self.cache_key(&input.query);
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| {
            log::warn!("view cache lock was poisoned, recovering");
            poisoned.into_inner()
        });
        cache.insert(key.clone(), input.selected_rows.clone());

        log::info!(
            "query_id={} cached view {} with {} rows",
            input.query.query_id,
            key,
            input.selected_rows.len()
        );
        Ok(())
    }
}
