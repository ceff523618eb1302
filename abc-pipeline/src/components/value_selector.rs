use abc_core::ClassifiedRecord;

use crate::selector::Selector;
use crate::types::ReportQuery;

/// Orders rows by sales value descending, optionally keeping only the top N.
///
/// Rows with a null value score negative infinity and sink to the bottom,
/// below every priced row.
#[derive(Default)]
pub struct ValueSelector {
    pub top: Option<usize>,
}

impl Selector<ReportQuery, ClassifiedRecord> for ValueSelector {
    fn score(&self, row: &ClassifiedRecord) -> f64 {
        row.value.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        self.top
    }
}
