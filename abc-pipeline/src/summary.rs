//! Rollups a report derives from classification output.

use std::cmp::Ordering;
use std::collections::HashMap;

use abc_core::{AbcClass, ClassifiedRecord, ItemAggregate, ItemId};
use serde::Serialize;

/// Per-class rollup of the aggregate table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassBreakdown {
    pub class: AbcClass,
    pub items: usize,
    pub value: f64,
    /// Percent of total aggregate value held by this class.
    pub share: f64,
}

/// Roll the aggregate table up into one row per class, A through C.
/// Classes with no items appear with zero counts so reports stay rectangular.
pub fn class_breakdown(aggregates: &[ItemAggregate]) -> Vec<ClassBreakdown> {
    let total: f64 = aggregates.iter().map(|a| a.value).sum();
    [AbcClass::A, AbcClass::B, AbcClass::C]
        .into_iter()
        .map(|class| {
            let (items, value) = aggregates
                .iter()
                .filter(|a| a.class == class)
                .fold((0, 0.0), |(n, v), a| (n + 1, v + a.value));
            let share = if total == 0.0 { 0.0 } else { 100.0 * value / total };
            ClassBreakdown {
                class,
                items,
                value,
                share,
            }
        })
        .collect()
}

/// One bar of the value-by-item chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemValue {
    pub item_id: ItemId,
    pub value: f64,
}

/// Per-item value totals over a (possibly filtered) set of classified rows,
/// descending by value. Rows without an item id are left out, null values
/// sum as zero, and ties keep first-encounter order.
pub fn value_by_item(rows: &[ClassifiedRecord]) -> Vec<ItemValue> {
    let mut groups: Vec<(ItemId, f64)> = Vec::new();
    let mut index: HashMap<ItemId, usize> = HashMap::new();
    for row in rows {
        let Some(id) = &row.item_id else {
            continue;
        };
        let slot = *index.entry(id.clone()).or_insert_with(|| {
            groups.push((id.clone(), 0.0));
            groups.len() - 1
        });
        if let Some(v) = row.value {
            groups[slot].1 += v;
        }
    }
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    groups
        .into_iter()
        .map(|(item_id, value)| ItemValue { item_id, value })
        .collect()
}

/// Sorted distinct descriptions across the rows: the category choices a
/// report can offer for filtering.
pub fn categories(rows: &[ClassifiedRecord]) -> Vec<String> {
    let mut cats: Vec<String> = rows.iter().filter_map(|r| r.description.clone()).collect();
    cats.sort();
    cats.dedup();
    cats
}
