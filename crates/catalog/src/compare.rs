//! Value comparison.
//!
//! Comparing a present value against an absent one is not always well defined:
//! table-structured values cannot be compared against nothing. Rather than
//! faulting, comparators report [`Comparison::Incomparable`] and let the caller
//! decide how to recover.

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Incomparable,
}

impl Comparison {
    pub fn is_equal(self) -> bool {
        self == Comparison::Equal
    }
}

pub trait ValueComparator: Send + Sync {
    /// Compare a present value against another (possibly absent) value.
    fn compare(&self, left: &Value, right: Option<&Value>) -> Comparison;
}

/// Equal when locale, channel and data all match. Attribute codes are not
/// compared, so key values of two different attributes can be matched.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardValueComparator;

impl ValueComparator for StandardValueComparator {
    fn compare(&self, left: &Value, right: Option<&Value>) -> Comparison {
        match right {
            None if left.data().is_table() => Comparison::Incomparable,
            None => Comparison::NotEqual,
            Some(right)
                if left.locale() == right.locale()
                    && left.channel() == right.channel()
                    && left.data() == right.data() =>
            {
                Comparison::Equal
            }
            Some(_) => Comparison::NotEqual,
        }
    }
}
