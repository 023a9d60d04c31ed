//! Sort-order and keyword checks over text read from the page.

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::errors::{PageError, Result};
use crate::types::SortDirection;

/// Date format of sortable date columns, e.g. `Jan 05 2021`
pub const DATE_FORMAT: &str = "%b %d %Y";

/// Same layout with the month spelled out, e.g. `January 05 2021`
pub const LONG_DATE_FORMAT: &str = "%B %d %Y";

/// Whether `values` already is in `direction` order under `compare`.
///
/// A stably sorted copy (reversed for descending) must equal the input element
/// for element, so duplicates are fine but their order matters.
pub fn is_sorted_by<T, F>(values: &[T], direction: SortDirection, compare: F) -> bool
where
    T: Clone + PartialEq,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted = values.to_vec();
    sorted.sort_by(compare);
    if direction == SortDirection::Descending {
        sorted.reverse();
    }
    sorted == values
}

/// [`is_sorted_by`] using the natural order of `T`
pub fn is_sorted<T: Ord + Clone>(values: &[T], direction: SortDirection) -> bool {
    is_sorted_by(values, direction, T::cmp)
}

/// Parse a price-like cell such as `$1,000.50`; `NaN` and infinities are rejected
pub fn parse_number(text: &str) -> Result<f64> {
    let cleaned = text.replace(['$', ','], "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| PageError::Conversion {
            input: text.to_string(),
            target: "number",
        })
}

/// Parse a date cell in [`DATE_FORMAT`] or [`LONG_DATE_FORMAT`].
///
/// Periods are dropped first so `Jan. 05 2021` works.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let cleaned = text.replace('.', "");
    let cleaned = cleaned.trim();
    NaiveDate::parse_from_str(cleaned, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(cleaned, LONG_DATE_FORMAT))
        .map_err(|_| PageError::Conversion {
            input: text.to_string(),
            target: "date",
        })
}

/// Every text equals `keyword`; true for an empty list
pub fn all_equal<S: AsRef<str>>(texts: &[S], keyword: &str) -> bool {
    texts.iter().all(|text| text.as_ref() == keyword)
}

/// Every text contains `keyword`; true for an empty list
pub fn all_contain<S: AsRef<str>>(texts: &[S], keyword: &str) -> bool {
    texts.iter().all(|text| text.as_ref().contains(keyword))
}

/// Every text equals one of `expected`; true for an empty list
pub fn all_in<S: AsRef<str>>(texts: &[S], expected: &[&str]) -> bool {
    texts
        .iter()
        .all(|text| expected.iter().any(|candidate| text.as_ref() == *candidate))
}

#[cfg(test)]
#[path = "ordering_test.rs"]
mod ordering_test;
