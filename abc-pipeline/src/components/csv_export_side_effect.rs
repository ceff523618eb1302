use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use abc_core::{Cell, ClassifiedRecord};

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::ReportQuery;

/// Writes the selected rows to a CSV file in the classified-table schema:
/// `item_id, description, qty, value, class`.
///
/// Null cells export as empty fields; an unclassified row exports the
/// literal `UNCLASSIFIED` in the class column. Number formatting matches
/// `Cell::display`, so an exported file re-ingests to identical cells.
pub struct CsvExportSideEffect {
    path: PathBuf,
}

impl CsvExportSideEffect {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn number(n: f64) -> String {
    Cell::Number(n).display().unwrap_or_default()
}

#[async_trait]
impl SideEffect<ReportQuery, ClassifiedRecord> for CsvExportSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<ReportQuery, ClassifiedRecord>>,
    ) -> Result<(), String> {
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| format!("failed to create '{}': {}", self.path.display(), e))?;

        writer
            .write_record(["item_id", "description", "qty", "value", "class"])
            .map_err(|e| format!("failed to write '{}': {}", self.path.display(), e))?;

        for row in &input.selected_rows {
            writer
                .write_record([
                    row.item_id
                        .as_ref()
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                    row.description.clone().unwrap_or_default(),
                    number(row.qty),
                    row.value.map(number).unwrap_or_default(),
                    row.class_label().to_string(),
                ])
                .map_err(|e| format!("failed to write '{}': {}", self.path.display(), e))?;
        }

        writer
            .flush()
            .map_err(|e| format!("failed to flush '{}': {}", self.path.display(), e))?;

        log::info!(
            "query_id={} exported {} rows to {}",
            input.query.query_id,
            input.selected_rows.len(),
            self.path.display()
        );
        Ok(())
    }
}
