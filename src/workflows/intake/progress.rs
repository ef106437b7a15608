use super::record::IntakeRecord;
use super::validation::REQUIRED_FIELDS;

/// Share of required fields currently filled, as a whole percentage (0-100).
pub fn compute_progress(record: &IntakeRecord) -> u8 {
    let filled = REQUIRED_FIELDS
        .iter()
        .filter(|field| record.is_present(**field))
        .count();
    ((filled * 100) / REQUIRED_FIELDS.len()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::domain::FieldValue;

    fn record_with(count: usize) -> IntakeRecord {
        REQUIRED_FIELDS
            .into_iter()
            .take(count)
            .map(|field| (field, FieldValue::text("x")))
            .collect()
    }

    #[test]
    fn scales_with_filled_required_fields() {
        assert_eq!(compute_progress(&record_with(0)), 0);
        assert_eq!(compute_progress(&record_with(4)), 40);
        assert_eq!(compute_progress(&record_with(10)), 100);
    }

    #[test]
    fn optional_fields_do_not_count() {
        let record: IntakeRecord = [(
            crate::workflows::intake::domain::IntakeField::InfantFullName,
            FieldValue::text("Baby Reyes"),
        )]
        .into_iter()
        .collect();
        assert_eq!(compute_progress(&record), 0);
    }
}
