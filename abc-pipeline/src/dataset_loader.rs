//! CSV sales data loader.
//!
//! Parses a sales CSV into the dynamically typed `RawTable` the classifier
//! accepts. No schema knowledge lives here: headers are taken as-is (synonym
//! renaming happens inside the classifier) and every field goes through
//! `Cell::parse`, so empty fields and the usual null spellings arrive as
//! nulls, numerics as numbers, and the rest as text.

use std::io::Read;

use abc_core::{Cell, RawTable};

/// Load a sales table from a CSV reader. The first row is the header;
/// duplicate header names and ragged rows are rejected with line context.
pub fn load_sales<R: Read>(reader: R) -> Result<RawTable, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = csv_reader
        .headers()
        .map_err(|e| format!("CSV header error: {}", e))?
        .iter()
        .map(String::from)
        .collect();
    if header.is_empty() {
        return Err("CSV has no header row".to_string());
    }

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result
            .map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    RawTable::from_rows(header, rows).map_err(|e| e.to_string())
}

/// Load a sales table from a CSV file path.
pub fn load_sales_file(path: &str) -> Result<RawTable, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_sales(file)
}
