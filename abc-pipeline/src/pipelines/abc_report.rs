use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use abc_core::{Classification, ClassifiedRecord};

use crate::components::category_filter::CategoryFilter;
use crate::components::class_filter::ClassFilter;
use crate::components::classification_source::ClassificationSource;
use crate::components::csv_export_side_effect::CsvExportSideEffect;
use crate::components::report_cache_side_effect::{ReportCacheSideEffect, SharedViewCache};
use crate::components::value_selector::ValueSelector;
use crate::filter::Filter;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::ReportQuery;
use crate::view_pipeline::ViewPipeline;

/// The standard report pipeline over one classification result.
///
/// Pipeline flow:
/// 1. ClassificationSource emits every classified row
/// 2. CategoryFilter narrows to the requested category (when one is set)
/// 3. ClassFilter narrows to the requested class (when one is set)
/// 4. ValueSelector orders by value descending, optionally top-N
/// 5. CsvExportSideEffect writes the view to disk (when a path is set)
/// 6. ReportCacheSideEffect records the view under its fingerprint+query key
pub struct AbcReportPipeline {
    sources: Vec<Box<dyn Source<ReportQuery, ClassifiedRecord>>>,
    filters: Vec<Box<dyn Filter<ReportQuery, ClassifiedRecord>>>,
    selector: ValueSelector,
    side_effects: Arc<Vec<Box<dyn SideEffect<ReportQuery, ClassifiedRecord>>>>,
}

impl AbcReportPipeline {
    /// The full view: no truncation, no export.
    pub fn with_classification(classification: Arc<Classification>) -> Self {
        Self::with_options(classification, None, None)
    }

    /// A view with an optional row cap and an optional CSV export target.
    pub fn with_options(
        classification: Arc<Classification>,
        top: Option<usize>,
        export: Option<PathBuf>,
    ) -> Self {
        Self::with_cache(classification, top, export, SharedViewCache::default())
    }

    /// Like [`Self::with_options`] but sharing an externally owned cache,
    /// so several pipelines over the same dataset can pool their views.
    pub fn with_cache(
        classification: Arc<Classification>,
        top: Option<usize>,
        export: Option<PathBuf>,
        cache: SharedViewCache,
    ) -> Self {
        let fingerprint = classification.fingerprint;

        let sources: Vec<Box<dyn Source<ReportQuery, ClassifiedRecord>>> =
            vec![Box::new(ClassificationSource::new(classification))];

        let filters: Vec<Box<dyn Filter<ReportQuery, ClassifiedRecord>>> =
            vec![Box::new(CategoryFilter), Box::new(ClassFilter)];

        let selector = ValueSelector { top };

        let mut side_effects: Vec<Box<dyn SideEffect<ReportQuery, ClassifiedRecord>>> = Vec::new();
        if let Some(path) = export {
            side_effects.push(Box::new(CsvExportSideEffect::new(path)));
        }
        side_effects.push(Box::new(ReportCacheSideEffect::with_cache(
            fingerprint,
            cache,
        )));

        Self {
            sources,
            filters,
            selector,
            side_effects: Arc::new(side_effects),
        }
    }
}

#[async_trait]
impl ViewPipeline<ReportQuery, ClassifiedRecord> for AbcReportPipeline {
    fn sources(&self) -> &[Box<dyn Source<ReportQuery, ClassifiedRecord>>] {
        &self.sources
    }

    fn filters(&self) -> &[Box<dyn Filter<ReportQuery, ClassifiedRecord>>] {
        &self.filters
    }

    fn selector(&self) -> &dyn Selector<ReportQuery, ClassifiedRecord> {
        &self.selector
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<ReportQuery, ClassifiedRecord>>>> {
        Arc::clone(&self.side_effects)
    }
}
