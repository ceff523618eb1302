//! Classification thresholds.
//!
//! The threshold pair is the only tunable in the whole algorithm. Class C is
//! implied as the remainder and never compared against directly — changing
//! `a` or `b` here is the entire configuration surface of the classifier.

use serde::Serialize;

use crate::types::AbcClass;

/// Default class A cutoff: items within the first 80% of cumulative value.
pub const DEFAULT_A_THRESHOLD: f64 = 80.0;
/// Default class B band: the next 15% of cumulative value after class A.
pub const DEFAULT_B_THRESHOLD: f64 = 15.0;

/// Cumulative-percentage cutoffs for ABC classing.
///
/// An item whose cumulative percentage is at or below `a` is class A; at or
/// below `a + b` is class B; everything past that is class C. Boundaries are
/// inclusive of the lower class, so `cumperc == a` is still A.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AbcThresholds {
    pub a: f64,
    pub b: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self {
            a: DEFAULT_A_THRESHOLD,
            b: DEFAULT_B_THRESHOLD,
        }
    }
}

impl AbcThresholds {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// The class B upper cutoff (`a + b`).
    pub fn b_cutoff(&self) -> f64 {
        self.a + self.b
    }

    /// Assign a class from a cumulative percentage.
    pub fn class_for(&self, cumperc: f64) -> AbcClass {
        if cumperc <= self.a {
            AbcClass::A
        } else if cumperc <= self.b_cutoff() {
            AbcClass::B
        } else {
            AbcClass::C
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_of_the_lower_class() {
        let t = AbcThresholds::default();
        assert_eq!(t.class_for(80.0), AbcClass::A);
        assert_eq!(t.class_for(80.0001), AbcClass::B);
        assert_eq!(t.class_for(95.0), AbcClass::B);
        assert_eq!(t.class_for(95.0001), AbcClass::C);
    }

    #[test]
    fn extremes_land_in_the_outer_classes() {
        let t = AbcThresholds::default();
        assert_eq!(t.class_for(0.0), AbcClass::A);
        assert_eq!(t.class_for(100.0), AbcClass::C);
    }

    #[test]
    fn custom_pair_moves_the_cutoffs() {
        let t = AbcThresholds::new(50.0, 30.0);
        assert_eq!(t.class_for(50.0), AbcClass::A);
        assert_eq!(t.class_for(79.9), AbcClass::B);
        assert_eq!(t.class_for(80.1), AbcClass::C);
        assert_eq!(t.b_cutoff(), 80.0);
    }
}
