//! Deterministic fingerprinting of classification inputs.
//!
//! A [`Classification`](crate::types::Classification) carries a `u64`
//! fingerprint of the exact table and thresholds it was computed from, so
//! downstream caches can tell "same report" from "same-looking report"
//! without holding the data. FNV-1a over a canonical byte walk of the
//! table; the same bytes always hash the same on every platform.

use crate::table::{Cell, RawTable};
use crate::thresholds::AbcThresholds;

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// Incremental FNV-1a, fed field by field so framing bytes can keep
/// `("ab", "c")` and `("a", "bc")` from colliding.
struct Fnv1a {
    hash: u64,
}

impl Fnv1a {
    fn new() -> Self {
        Self { hash: FNV_OFFSET }
    }

    fn write(&mut self, data: &[u8]) {
        for &byte in data {
            self.hash ^= byte as u64;
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_str(&mut self, s: &str) {
        self.write(&(s.len() as u64).to_be_bytes());
        self.write(s.as_bytes());
    }

    fn write_cell(&mut self, cell: &Cell) {
        match cell {
            Cell::Null => self.write(&[0]),
            Cell::Number(n) => {
                self.write(&[1]);
                self.write(&n.to_bits().to_be_bytes());
            }
            Cell::Text(s) => {
                self.write(&[2]);
                self.write_str(s);
            }
        }
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

/// Hash a table and the thresholds it will be classified under.
///
/// Covers column names, column order, every cell (kind and payload), and
/// both threshold values. Any change to any of those changes the result.
pub fn fingerprint(table: &RawTable, thresholds: AbcThresholds) -> u64 {
    let mut hasher = Fnv1a::new();
    for column in table.columns() {
        hasher.write_str(column.name());
        for cell in column.cells() {
            hasher.write_cell(cell);
        }
    }
    hasher.write(&thresholds.a.to_bits().to_be_bytes());
    hasher.write(&thresholds.b.to_bits().to_be_bytes());
    hasher.finish()
}
