//! The ABC computation: aggregate per item, rank by value, cut into classes.
//!
//! Three layers, each usable on its own:
//!
//!   * [`aggregate`] builds the descending Pareto table from normalized rows.
//!   * [`classify_all`] joins aggregate classes back onto every row.
//!   * [`classify`] runs the whole pipeline from a raw table and packages
//!     the result as a [`Classification`].
//!
//! Ordering is deterministic: groups keep first-encounter order, the value
//! sort is stable, so equal-value items rank in the order their first row
//! appeared in the input. Same bytes in, same report out.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{AbcError, AbcResult};
use crate::fingerprint::fingerprint;
use crate::schema::normalize;
use crate::table::RawTable;
use crate::thresholds::AbcThresholds;
use crate::types::{Classification, ClassifiedRecord, ItemAggregate, ItemId, SalesRecord};

/// Build the per-item aggregate table: group by item id, sum value, sort
/// descending, accumulate, classify against `thresholds`.
///
/// Rows without an item id are skipped (they cannot be grouped); rows with a
/// null value still create their group and contribute zero to its sum. Fails
/// with [`AbcError::DegenerateDataset`] when the grand total is exactly zero,
/// since cumulative percentages are undefined there.
pub fn aggregate(
    records: &[SalesRecord],
    thresholds: AbcThresholds,
) -> AbcResult<Vec<ItemAggregate>> {
    // First-encounter grouping. A HashMap alone would scramble the order
    // ties fall back on, so the groups live in a Vec and the map only
    // remembers positions.
    let mut groups: Vec<(ItemId, f64)> = Vec::new();
    let mut index: HashMap<ItemId, usize> = HashMap::new();

    for record in records {
        let Some(id) = &record.item_id else {
            continue;
        };
        let slot = *index.entry(id.clone()).or_insert_with(|| {
            groups.push((id.clone(), 0.0));
            groups.len() - 1
        });
        if let Some(v) = record.value {
            groups[slot].1 += v;
        }
    }

    let total: f64 = groups.iter().map(|(_, v)| v).sum();
    if total == 0.0 {
        return Err(AbcError::DegenerateDataset {
            items: groups.len(),
        });
    }

    // Stable sort: equal values keep first-encounter order. Values are
    // finite by construction, so the fallback never actually fires.
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut aggregates = Vec::with_capacity(groups.len());
    let mut cumsum = 0.0;
    for (item_id, value) in groups {
        cumsum += value;
        let cumperc = 100.0 * cumsum / total;
        aggregates.push(ItemAggregate {
            item_id,
            value,
            cumsum,
            cumperc,
            class: thresholds.class_for(cumperc),
        });
    }

    Ok(aggregates)
}

/// Join each aggregate's class back onto the normalized rows, preserving
/// input order. Rows whose item id matched no aggregate (null ids, chiefly)
/// come back with `class: None`.
pub fn classify_all(records: &[SalesRecord], aggregates: &[ItemAggregate]) -> Vec<ClassifiedRecord> {
    let classes: HashMap<&ItemId, _> = aggregates
        .iter()
        .map(|a| (&a.item_id, a.class))
        .collect();

    records
        .iter()
        .map(|r| ClassifiedRecord {
            item_id: r.item_id.clone(),
            description: r.description.clone(),
            qty: r.qty,
            value: r.value,
            row: r.row,
            class: r.item_id.as_ref().and_then(|id| classes.get(id).copied()),
        })
        .collect()
}

/// Run the full pipeline on a raw table: normalize, aggregate, classify,
/// and fingerprint the inputs for downstream caching.
pub fn classify(table: &RawTable, thresholds: AbcThresholds) -> AbcResult<Classification> {
    let records = normalize(table)?;
    let dropped_missing_qty = table.row_count() - records.len();

    let aggregates = aggregate(&records, thresholds)?;
    let total_value = aggregates.iter().map(|a| a.value).sum();
    let classified = classify_all(&records, &aggregates);

    Ok(Classification {
        aggregates,
        classified,
        total_value,
        dropped_missing_qty,
        fingerprint: fingerprint(table, thresholds),
    })
}
