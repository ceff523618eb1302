//! The staged view orchestrator.
//!
//! A pipeline is a fixed wiring of sources, filters, one selector, and side
//! effects; [`ViewPipeline::execute`] runs the stages in order and returns
//! everything a report needs. Stage failures never abort the view: a failed
//! source contributes nothing, a failed filter passes its rows through, and
//! failed side effects are collected on the result for the caller to surface.

use async_trait::async_trait;
use std::sync::Arc;

use crate::filter::{Filter, FilterResult};
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a stable id so log lines correlate across stages.
pub trait HasQueryId {
    fn query_id(&self) -> &str;
}

/// Everything one pipeline execution produced.
pub struct PipelineResult<Q, R> {
    pub query: Arc<Q>,
    /// Rows emitted by the sources, before any filtering.
    pub retrieved_rows: Vec<R>,
    /// Rows excluded by filters, in filter order.
    pub removed_rows: Vec<R>,
    /// The final ordered view.
    pub selected_rows: Vec<R>,
    /// One entry per failed side effect, as `"name: error"`.
    pub side_effect_failures: Vec<String>,
}

/// A concrete pipeline exposes its stages; `execute` does the rest.
#[async_trait]
pub trait ViewPipeline<Q, R>: Send + Sync
where
    Q: HasQueryId + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    fn sources(&self) -> &[Box<dyn Source<Q, R>>];

    fn filters(&self) -> &[Box<dyn Filter<Q, R>>];

    fn selector(&self) -> &dyn Selector<Q, R>;

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, R>>>>;

    /// Run sources, filters, selector, and side effects in order.
    async fn execute(&self, query: Q) -> PipelineResult<Q, R> {
        let query = Arc::new(query);

        let mut retrieved: Vec<R> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            match source.fetch(&query).await {
                Ok(mut rows) => retrieved.append(&mut rows),
                Err(e) => {
                    log::error!(
                        "query_id={} source {} failed: {}",
                        query.query_id(),
                        source.name(),
                        e
                    );
                }
            }
        }
        log::info!(
            "query_id={} retrieved {} rows",
            query.query_id(),
            retrieved.len()
        );

        let mut kept = retrieved.clone();
        let mut removed: Vec<R> = Vec::new();
        for filter in self.filters() {
            if !filter.enable(&query) {
                continue;
            }
            // The clone keeps the rows recoverable when a filter fails.
            match filter.filter(&query, kept.clone()).await {
                Ok(FilterResult {
                    kept: passed,
                    removed: excluded,
                }) => {
                    kept = passed;
                    removed.extend(excluded);
                }
                Err(e) => {
                    log::error!(
                        "query_id={} filter {} failed, rows pass through: {}",
                        query.query_id(),
                        filter.name(),
                        e
                    );
                }
            }
        }

        let selector = self.selector();
        let selected = if selector.enable(&query) {
            selector.select(&query, kept)
        } else {
            kept
        };
        log::info!(
            "query_id={} selected {} of {} rows",
            query.query_id(),
            selected.len(),
            retrieved.len()
        );

        let input = Arc::new(SideEffectInput {
            query: Arc::clone(&query),
            selected_rows: selected.clone(),
        });
        let mut side_effect_failures = Vec::new();
        let side_effects = self.side_effects();
        for side_effect in side_effects.iter() {
            if !side_effect.enable(Arc::clone(&query)) {
                continue;
            }
            if let Err(e) = side_effect.run(Arc::clone(&input)).await {
                log::error!(
                    "query_id={} side effect {} failed: {}",
                    query.query_id(),
                    side_effect.name(),
                    e
                );
                side_effect_failures.push(format!("{}: {}", side_effect.name(), e));
            }
        }

        PipelineResult {
            query,
            retrieved_rows: retrieved,
            removed_rows: removed,
            selected_rows: selected,
            side_effect_failures,
        }
    }
}
