use chrono::NaiveDate;
use tracing::warn;

use super::dates::{editable_date, parse_date_input};
use super::domain::{
    FieldValue, Identity, IntakeField, LevelOfCare, Office, TransactionType,
};
use super::record::{FieldStore, IntakeRecord};
use super::rules::DependencyRuleEngine;

const DEFAULT_STATE: &str = "CA";

/// Fresh draft with office, transaction and level-of-care defaults already cascaded.
pub fn initial_draft(identity: Option<&Identity>, today: NaiveDate) -> IntakeRecord {
    let mut store = FieldStore::default();
    let engine = DependencyRuleEngine::new();
    let today_text = editable_date(today);

    let your_name = identity
        .map(|identity| FieldValue::text(identity.display_name.trim()))
        .unwrap_or_else(FieldValue::blank);
    store.set(IntakeField::YourName, your_name);
    store.set(IntakeField::DateSubmitted, FieldValue::text(&today_text));
    store.set(IntakeField::TransactionDate, FieldValue::text(today_text));
    store.set(IntakeField::ResourceParentsState, FieldValue::text(DEFAULT_STATE));
    store.set(IntakeField::CountyWorkerState, FieldValue::text(DEFAULT_STATE));

    let defaults = [
        (IntakeField::Office, Office::SantaMaria.label()),
        (
            IntakeField::TypeOfTransaction,
            TransactionType::ShelterPlacement.label(),
        ),
        (IntakeField::LevelOfCare, LevelOfCare::Level1.label()),
    ];
    for (trigger, value) in defaults {
        engine.apply(&mut store, trigger, FieldValue::text(value), today);
    }

    store.snapshot()
}

/// Reformat a persisted record for the edit form.
///
/// Date instants become `YYYY-MM-DD`; anything unreadable is cleared rather than failing the
/// load. Derived fields are kept exactly as stored.
pub fn editable_copy(persisted: &IntakeRecord) -> IntakeRecord {
    let mut record = persisted.clone();

    for field in IntakeField::DATES {
        let value = match persisted.get(field) {
            FieldValue::Empty => continue,
            FieldValue::Text(raw) if raw.trim().is_empty() => continue,
            FieldValue::Text(raw) => match parse_date_input(raw) {
                Ok(date) => FieldValue::Text(editable_date(date)),
                Err(err) => {
                    warn!(%field, error = %err, "clearing unreadable date on load");
                    FieldValue::blank()
                }
            },
            other => {
                warn!(%field, value = ?other, "clearing non-text date on load");
                FieldValue::blank()
            }
        };
        record.insert(field, value);
    }

    record
}
