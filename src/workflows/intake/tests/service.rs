use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::common::*;
use crate::config::IntakeSettings;
use crate::workflows::intake::api::{IntakeRecordApi, PersistenceError};
use crate::workflows::intake::domain::{FieldValue, IntakeField, RecordId};
use crate::workflows::intake::record::IntakeRecord;
use crate::workflows::intake::service::IntakeService;

/// Store whose `create` parks until the test releases it.
struct GatedApi {
    inner: MemoryApi,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl IntakeRecordApi for GatedApi {
    fn create(&self, record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        self.entered
            .lock()
            .expect("entered mutex poisoned")
            .send(())
            .expect("test still listening");
        self.release
            .lock()
            .expect("release mutex poisoned")
            .recv()
            .expect("test releases the write");
        self.inner.create(record)
    }

    fn update(&self, id: &RecordId, record: IntakeRecord) -> Result<RecordId, PersistenceError> {
        self.inner.update(id, record)
    }

    fn get(&self, id: &RecordId) -> Result<IntakeRecord, PersistenceError> {
        self.inner.get(id)
    }
}

fn instant_settings() -> IntakeSettings {
    IntakeSettings {
        autosave_delay: Duration::ZERO,
        validating_delay: Duration::ZERO,
    }
}

#[test]
fn slow_submission_does_not_block_other_sessions() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let api = GatedApi {
        inner: MemoryApi::default(),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    };
    let service = Arc::new(IntakeService::new(Arc::new(api), instant_settings()));

    let submitting = service.open_draft(Some(&identity())).session_id;
    let other = service.open_draft(Some(&identity())).session_id;
    for (field, value) in client_details() {
        service
            .update_field(&submitting, field, value)
            .expect("field accepted");
    }
    for _ in 0..2 {
        service
            .next(&submitting, Some(&identity()))
            .expect("step advances");
    }

    let worker = {
        let service = Arc::clone(&service);
        let session_id = submitting.clone();
        thread::spawn(move || {
            service
                .next(&session_id, Some(&identity()))
                .map(|view| view.record_id)
        })
    };

    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("submission reaches the store");

    let view = service
        .update_field(&other, IntakeField::Name, FieldValue::text("Riley Chen"))
        .expect("other session stays responsive");
    assert_eq!(view.record.text(IntakeField::Name), "Riley Chen");
    assert_eq!(service.open_sessions(), 2);

    release_tx.send(()).expect("worker waiting");
    let record_id = worker
        .join()
        .expect("worker thread completes")
        .expect("submission succeeds");

    assert_eq!(record_id, Some(RecordId("rec-000001".to_string())));
    assert_eq!(service.open_sessions(), 1);
    assert!(service.view(&submitting).is_err_and(|err| err.is_not_found()));
}
