use async_trait::async_trait;

use abc_core::ClassifiedRecord;

use crate::filter::{Filter, FilterResult};
use crate::types::ReportQuery;

/// Keeps rows whose description matches the query's category.
///
/// Disabled when the query carries no category, so an unfiltered view never
/// pays for the pass. Rows with a null description match nothing.
pub struct CategoryFilter;

#[async_trait]
impl Filter<ReportQuery, ClassifiedRecord> for CategoryFilter {
    fn enable(&self, query: &ReportQuery) -> bool {
        query.category.is_some()
    }

    async fn filter(
        &self,
        query: &ReportQuery,
        rows: Vec<ClassifiedRecord>,
    ) -> Result<FilterResult<ClassifiedRecord>, String> {
        let Some(category) = query.category.as_deref() else {
            return Ok(FilterResult {
                kept: rows,
                removed: Vec::new(),
            });
        };
        let (kept, removed): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .partition(|r| r.description.as_deref() == Some(category));

        Ok(FilterResult { kept, removed })
    }
}
