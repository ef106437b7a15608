use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::config::IntakeSettings;
use crate::workflows::intake::api::{IntakeRecordApi, PersistenceError};
use crate::workflows::intake::domain::{FieldValue, Identity, IntakeField, RecordId};
use crate::workflows::intake::record::IntakeRecord;
use crate::workflows::intake::session::IntakeSession;
use crate::workflows::intake::wizard::WizardStep;
use crate::workflows::intake::{intake_router, IntakeService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).expect("valid date")
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 14, 18, 5, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn identity() -> Identity {
    Identity {
        user_id: "staff-17".to_string(),
        display_name: "Dana Ortiz".to_string(),
    }
}

pub(super) fn settings() -> IntakeSettings {
    IntakeSettings {
        autosave_delay: Duration::from_millis(800),
        validating_delay: Duration::from_millis(300),
    }
}

/// Fields a fresh draft still needs before it can be submitted.
pub(super) fn client_details() -> Vec<(IntakeField, FieldValue)> {
    vec![
        (IntakeField::CaseNumber, FieldValue::text("SB-2024-0412")),
        (IntakeField::Name, FieldValue::text("Jordan Reyes")),
        (IntakeField::DateOfBirth, FieldValue::text("2010-06-15")),
        (IntakeField::Gender, FieldValue::text("Male")),
        (
            IntakeField::ReasonForPlacement,
            FieldValue::text("Emergency shelter after family crisis"),
        ),
        (IntakeField::CountyWorkerName, FieldValue::text("Alex Kim")),
    ]
}

pub(super) fn fill(session: &mut IntakeSession, fields: Vec<(IntakeField, FieldValue)>, now: Instant) {
    for (field, value) in fields {
        session
            .input(field, value, today(), now)
            .expect("field accepts input");
    }
}

/// Drive the wizard to the review step, returning the instant it settled at.
pub(super) fn walk_to_review(session: &mut IntakeSession, api: &MemoryApi, start: Instant) -> Instant {
    let mut now = start;
    while session.step() != Some(WizardStep::Review) {
        session
            .next(api, Some(&identity()), now, submitted_at())
            .expect("step advances");
        now += settings().validating_delay;
        session.poll(now);
    }
    now
}

#[derive(Default)]
pub(super) struct MemoryApi {
    records: Mutex<HashMap<RecordId, IntakeRecord>>,
    writes: Mutex<Vec<RecordId>>,
}

impl MemoryApi {
    pub(super) fn seeded(id: &str, record: IntakeRecord) -> Self {
        let api = Self::default();
        api.records
            .lock()
            .expect("records mutex poisoned")
            .insert(RecordId(id.to_string()), record);
        api
    }

    pub(super) fn stored(&self, id: &RecordId) -> Option<IntakeRecord> {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .get(id)
            .cloned()
    }

    pub(super) fn writes(&self) -> Vec<RecordId> {
        self.writes.lock().expect("writes mutex poisoned").clone()
    }
}

impl IntakeRecordApi for MemoryApi {
    fn create(&self, record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        let mut records = self.records.lock().expect("records mutex poisoned");
        let id = RecordId(format!("rec-{:06}", records.len() + 1));
        records.insert(id.clone(), record);
        self.writes
            .lock()
            .expect("writes mutex poisoned")
            .push(id.clone());
        Ok(id)
    }

    fn update(&self, id: &RecordId, record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        let mut records = self.records.lock().expect("records mutex poisoned");
        if !records.contains_key(id) {
            return Err(PersistenceError::NotFound(id.clone()));
        }
        records.insert(id.clone(), record);
        self.writes
            .lock()
            .expect("writes mutex poisoned")
            .push(id.clone());
        Ok(id.clone())
    }

    fn get(&self, id: &RecordId) -> Result<IntakeRecord, PersistenceError> {
        self.stored(id)
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }
}

pub(super) struct OfflineApi;

impl IntakeRecordApi for OfflineApi {
    fn create(&self, _record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        Err(PersistenceError::Failed {
            message: Some("persistence backend offline".to_string()),
        })
    }

    fn update(&self, _id: &RecordId, _record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        Err(PersistenceError::Failed { message: None })
    }

    fn get(&self, id: &RecordId) -> Result<IntakeRecord, PersistenceError> {
        Err(PersistenceError::NotFound(id.clone()))
    }
}

pub(super) fn router_with(api: MemoryApi) -> (axum::Router, Arc<IntakeService<MemoryApi>>) {
    let service = Arc::new(IntakeService::new(
        Arc::new(api),
        IntakeSettings {
            autosave_delay: Duration::ZERO,
            validating_delay: Duration::ZERO,
        },
    ));
    (intake_router(service.clone()), service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
