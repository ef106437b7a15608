use chrono::{Datelike, NaiveDate};

/// Whole years elapsed between `birth` and `reference`.
///
/// Future birth dates are not clamped and yield negative ages.
pub fn derive_age(birth: NaiveDate, reference: NaiveDate) -> i64 {
    let mut years = i64::from(reference.year()) - i64::from(birth.year());
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
