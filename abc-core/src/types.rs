use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::table::Cell;

/// Rendered form of a classified record whose item never made it into the
/// aggregate table — in practice, rows with a null `item_id`.
pub const UNCLASSIFIED: &str = "UNCLASSIFIED";

// ---------------------------------------------------------------------------
// Identifiers and classes
// ---------------------------------------------------------------------------

/// An item identifier. Source data carries these as integers or strings;
/// both sides of the aggregate join use the same parsed form, so equality
/// is exact and `1` never silently matches `"1"` vs `1.0` inconsistencies.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl ItemId {
    /// Read an identifier from a raw cell. Integral numbers become `Int`,
    /// everything else non-null becomes `Text`. Null stays `None` and is
    /// handled by the caller (such rows are never aggregated).
    pub fn from_cell(cell: &Cell) -> Option<ItemId> {
        match cell {
            Cell::Null => None,
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 9.2e18 => {
                Some(ItemId::Int(*n as i64))
            }
            Cell::Number(n) => Some(ItemId::Text(format!("{}", n))),
            Cell::Text(s) => Some(ItemId::Text(s.clone())),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The three Pareto tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbcClass::A => write!(f, "A"),
            AbcClass::B => write!(f, "B"),
            AbcClass::C => write!(f, "C"),
        }
    }
}

impl FromStr for AbcClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(AbcClass::A),
            "B" | "b" => Ok(AbcClass::B),
            "C" | "c" => Ok(AbcClass::C),
            other => Err(format!("expected A, B or C, got '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One normalized sales row.
///
/// `qty` is definite because rows with a missing quantity are dropped during
/// normalization. `item_id`, `description` and `value` stay optional: nulls
/// in those columns pass through untouched — the quantity filter is the only
/// row filter the pipeline applies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SalesRecord {
    pub item_id: Option<ItemId>,
    pub description: Option<String>,
    pub qty: f64,
    pub value: Option<f64>,
    /// 1-based source line (header is line 1, first data row is line 2).
    pub row: usize,
}

/// One row of the aggregate (Pareto) table: a unique item with its value
/// total, cumulative sum and percentage over the descending-value order,
/// and its assigned class.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemAggregate {
    pub item_id: ItemId,
    pub value: f64,
    pub cumsum: f64,
    pub cumperc: f64,
    pub class: AbcClass,
}

/// A sales record with its item's class joined on. `class` is `None` only
/// for records whose `item_id` had no aggregate — in practice, rows with a
/// null identifier, since aggregation is derived from the same records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    pub item_id: Option<ItemId>,
    pub description: Option<String>,
    pub qty: f64,
    pub value: Option<f64>,
    pub row: usize,
    pub class: Option<AbcClass>,
}

impl ClassifiedRecord {
    /// The class as a column value, spelling out the sentinel for rows
    /// that never matched an aggregate.
    pub fn class_label(&self) -> &'static str {
        match self.class {
            Some(AbcClass::A) => "A",
            Some(AbcClass::B) => "B",
            Some(AbcClass::C) => "C",
            None => UNCLASSIFIED,
        }
    }
}

/// The owned result of one classify call. Everything is recomputed from
/// scratch per input table; the caller may filter, render and export these
/// freely without touching the classifier again.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    /// One row per unique item, descending by value.
    pub aggregates: Vec<ItemAggregate>,
    /// Every normalized input row with its class joined on, input order.
    pub classified: Vec<ClassifiedRecord>,
    /// Grand total of aggregate value (never zero — that is an error).
    pub total_value: f64,
    /// Rows discarded because their quantity cell was null.
    pub dropped_missing_qty: usize,
    /// FNV-1a hash of the input table and thresholds; identifies this
    /// computation for view caching.
    pub fingerprint: u64,
}
