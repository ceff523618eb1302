//! ABC classification core.
//!
//! Turns a loosely typed sales table into a Pareto-style value segmentation:
//! per-item value totals, a cumulative-contribution curve, and an A/B/C class
//! per item, with the class joined back onto every source row.
//!
//! The whole computation is one pure, synchronous pass:
//!
//! 1. [`normalize`] — rename the vendor sales-value column, validate the
//!    required schema, drop rows with a missing quantity, coerce cells to
//!    typed records.
//! 2. [`aggregate`] — group by item, sum value, sort descending, annotate
//!    cumulative sums and percentages, assign classes from the thresholds.
//! 3. [`classify_all`] — left-join the class back onto every record.
//!
//! [`classify`] composes the three and is the only call most users need.
//! There is no I/O here: loading and exporting tables is the caller's job.

pub mod classify;
pub mod error;
pub mod fingerprint;
pub mod schema;
pub mod table;
pub mod thresholds;
pub mod types;

pub use classify::{aggregate, classify, classify_all};
pub use error::{AbcError, AbcResult};
pub use fingerprint::fingerprint;
pub use schema::{normalize, REQUIRED_COLUMNS, VALUE_SYNONYMS};
pub use table::{Cell, Column, RawTable};
pub use thresholds::AbcThresholds;
pub use types::{
    AbcClass, Classification, ClassifiedRecord, ItemAggregate, ItemId, SalesRecord, UNCLASSIFIED,
};
