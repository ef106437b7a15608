use chrono::{NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use placement_intake::workflows::intake::dates::{format_timestamp, parse_date_input};
use placement_intake::workflows::intake::{
    FieldValue, IntakeField, IntakeRecord, IntakeRecordApi, LevelOfCare, Office,
    PersistenceError, RecordId,
};
use std::collections::HashMap;
use std::iter;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the record backend. Assigns ids and the creation stamp the
/// way the hosted store does.
#[derive(Default)]
pub(crate) struct InMemoryIntakeRecords {
    records: Mutex<HashMap<RecordId, IntakeRecord>>,
    sequence: AtomicU64,
}

impl IntakeRecordApi for InMemoryIntakeRecords {
    fn create(&self, record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record_id = RecordId(format!("rec-{id:06}"));
        let created_at = FieldValue::Text(format_timestamp(Utc::now()));
        let stamped: IntakeRecord = record
            .iter()
            .filter(|(field, _)| *field != IntakeField::CreatedAt)
            .map(|(field, value)| (field, value.clone()))
            .chain(iter::once((IntakeField::CreatedAt, created_at)))
            .collect();

        let mut guard = self.records.lock().map_err(|_| poisoned())?;
        guard.insert(record_id.clone(), stamped);
        Ok(record_id)
    }

    fn update(&self, id: &RecordId, record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        let mut guard = self.records.lock().map_err(|_| poisoned())?;
        match guard.get_mut(id) {
            Some(existing) => {
                *existing = record;
                Ok(id.clone())
            }
            None => Err(PersistenceError::NotFound(id.clone())),
        }
    }

    fn get(&self, id: &RecordId) -> Result<IntakeRecord, PersistenceError> {
        let guard = self.records.lock().map_err(|_| poisoned())?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Failed {
        message: Some("record store lock poisoned".to_string()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_date_input(raw).map_err(|err| format!("{err} (expected YYYY-MM-DD)"))
}

pub(crate) fn parse_office(raw: &str) -> Result<Office, String> {
    Office::from_label(raw).ok_or_else(|| {
        let known: Vec<_> = Office::ordered().iter().map(|office| office.label()).collect();
        format!("unknown office '{raw}' (expected one of: {})", known.join(", "))
    })
}

pub(crate) fn parse_level_of_care(raw: &str) -> Result<LevelOfCare, String> {
    LevelOfCare::from_label(raw).ok_or_else(|| {
        let known: Vec<_> = LevelOfCare::ordered()
            .iter()
            .map(|level| level.label())
            .collect();
        format!("unknown level of care '{raw}' (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_sequential_ids_and_creation_stamp() {
        let records = InMemoryIntakeRecords::default();
        let first = records
            .create(IntakeRecord::default())
            .expect("create succeeds");
        let second = records
            .create(IntakeRecord::default())
            .expect("create succeeds");

        assert_eq!(first, RecordId("rec-000001".to_string()));
        assert_eq!(second, RecordId("rec-000002".to_string()));
        let stored = records.get(&first).expect("record stored");
        assert!(stored.text(IntakeField::CreatedAt).ends_with('Z'));
    }

    #[test]
    fn update_requires_existing_record() {
        let records = InMemoryIntakeRecords::default();
        let err = records
            .update(&RecordId("rec-000404".to_string()), IntakeRecord::default())
            .expect_err("unknown record");
        assert!(matches!(err, PersistenceError::NotFound(_)));
    }

    #[test]
    fn cli_parsers_accept_display_labels() {
        assert_eq!(parse_office(" Riverside "), Ok(Office::Riverside));
        assert_eq!(parse_level_of_care("Level 4"), Ok(LevelOfCare::Level4));
        assert!(parse_office("Fresno").is_err());
        assert!(parse_date("14/06/2024").is_err());
    }
}
