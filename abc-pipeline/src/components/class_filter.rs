use async_trait::async_trait;

use abc_core::ClassifiedRecord;

use crate::filter::{Filter, FilterResult};
use crate::types::ReportQuery;

/// Keeps rows assigned to the query's class.
///
/// Disabled when the query carries no class. Unclassified rows (no item id
/// matched an aggregate) never match any class, so they drop out of every
/// class-filtered view.
pub struct ClassFilter;

#[async_trait]
impl Filter<ReportQuery, ClassifiedRecord> for ClassFilter {
    fn enable(&self, query: &ReportQuery) -> bool {
        query.class.is_some()
    }

    async fn filter(
        &self,
        query: &ReportQuery,
        rows: Vec<ClassifiedRecord>,
    ) -> Result<FilterResult<ClassifiedRecord>, String> {
        let Some(class) = query.class else {
            return Ok(FilterResult {
                kept: rows,
                removed: Vec::new(),
            });
        };
        let (kept, removed): (Vec<_>, Vec<_>) =
            rows.into_iter().partition(|r| r.class == Some(class));

        Ok(FilterResult { kept, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abc_core::AbcClass;

    fn row(class: Option<AbcClass>) -> ClassifiedRecord {
        ClassifiedRecord {
            item_id: None,
            description: None,
            qty: 1.0,
            value: Some(10.0),
            row: 2,
            class,
        }
    }

    fn query(class: Option<AbcClass>) -> ReportQuery {
        ReportQuery {
            query_id: "test".into(),
            category: None,
            class,
        }
    }

    #[tokio::test]
    async fn keeps_only_the_requested_class() {
        let rows = vec![
            row(Some(AbcClass::A)),
            row(Some(AbcClass::B)),
            row(Some(AbcClass::A)),
            row(None),
        ];
        let FilterResult { kept, removed } = ClassFilter
            .filter(&query(Some(AbcClass::A)), rows)
            .await
            .unwrap();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.class == Some(AbcClass::A)));
        assert_eq!(removed.len(), 2);
    }

    #[tokio::test]
    async fn unclassified_rows_match_no_class() {
        let rows = vec![row(None)];
        for class in [AbcClass::A, AbcClass::B, AbcClass::C] {
            let FilterResult { kept, .. } = ClassFilter
                .filter(&query(Some(class)), rows.clone())
                .await
                .unwrap();
            assert!(kept.is_empty());
        }
    }

    #[test]
    fn disabled_without_a_class() {
        assert!(!ClassFilter.enable(&query(None)));
        assert!(ClassFilter.enable(&query(Some(AbcClass::C))));
    }
}
