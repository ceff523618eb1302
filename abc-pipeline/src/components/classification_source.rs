use async_trait::async_trait;
use std::sync::Arc;

use abc_core::{Classification, ClassifiedRecord};

use crate::source::Source;
use crate::types::ReportQuery;

/// Emits the classified rows of a shared classification result.
///
/// The classification is computed once per dataset; every view query reads
/// the same `Arc` instead of re-running the classifier, so interactive
/// refiltering stays cheap no matter how often the query changes.
pub struct ClassificationSource {
    classification: Arc<Classification>,
}

impl ClassificationSource {
    pub fn new(classification: Arc<Classification>) -> Self {
        Self { classification }
    }
}

#[async_trait]
impl Source<ReportQuery, ClassifiedRecord> for ClassificationSource {
    fn enable(&self, _query: &ReportQuery) -> bool {
        !self.classification.classified.is_empty()
    }

    async fn fetch(&self, _query: &ReportQuery) -> Result<Vec<ClassifiedRecord>, String> {
        Ok(self.classification.classified.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abc_core::{classify, AbcThresholds, Cell, RawTable};

    fn sample_classification() -> Arc<Classification> {
        let table = RawTable::from_columns(vec![
            ("item_id", vec![Cell::Number(1.0), Cell::Number(2.0)]),
            ("value", vec![Cell::Number(800.0), Cell::Number(200.0)]),
            ("qty", vec![Cell::Number(8.0), Cell::Number(2.0)]),
            (
                "description",
                vec![Cell::Text("Widgets".into()), Cell::Text("Gadgets".into())],
            ),
        ])
        .unwrap();
        Arc::new(classify(&table, AbcThresholds::default()).unwrap())
    }

    #[tokio::test]
    async fn source_emits_every_classified_row() {
        let source = ClassificationSource::new(sample_classification());
        let query = ReportQuery::unfiltered("test-001");
        let rows = source.fetch(&query).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn repeated_fetches_agree() {
        let source = ClassificationSource::new(sample_classification());
        let query = ReportQuery::unfiltered("test-002");
        let first = source.fetch(&query).await.unwrap();
        let second = source.fetch(&query).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn source_disabled_for_empty_classification() {
        let empty = Arc::new(Classification {
            aggregates: Vec::new(),
            classified: Vec::new(),
            total_value: 0.0,
            dropped_missing_qty: 0,
            fingerprint: 0,
        });
        let source = ClassificationSource::new(empty);
        assert!(!source.enable(&ReportQuery::unfiltered("test-003")));
    }
}
