use abc_core::AbcClass;

use crate::view_pipeline::HasQueryId;

/// One requested view over a classification result.
///
/// `category` matches against row descriptions and `class` against assigned
/// classes; `None` means "all", and the corresponding filter stays disabled.
#[derive(Clone, Debug)]
pub struct ReportQuery {
    pub query_id: String,
    pub category: Option<String>,
    pub class: Option<AbcClass>,
}

impl ReportQuery {
    /// A query with no filters: the full classified view.
    pub fn unfiltered(query_id: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
            category: None,
            class: None,
        }
    }
}

impl HasQueryId for ReportQuery {
    fn query_id(&self) -> &str {
        &self.query_id
    }
}
