use async_trait::async_trait;

use crate::util;

/// Result of a filter operation, partitioning rows into kept and removed.
pub struct FilterResult<R> {
    pub kept: Vec<R>,
    pub removed: Vec<R>,
}

/// Filters run sequentially and partition rows into kept and removed sets.
///
/// Removed rows are retained in the pipeline result rather than discarded,
/// so a report can still say how many rows a filter excluded.
#[async_trait]
pub trait Filter<Q, R>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Decide if this filter should run for the given query. Filters for
    /// optional query fields stay disabled when the field is absent.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Partition rows into those that continue to the next stage and those
    /// excluded from the view.
    async fn filter(&self, query: &Q, rows: Vec<R>) -> Result<FilterResult<R>, String>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
