use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::IntakeSettings;

use super::api::{IntakeRecordApi, PersistenceError};
use super::domain::{FieldValue, Identity, IntakeField, RecordId};
use super::record::IntakeRecord;
use super::session::{Advance, IntakeError, IntakeSession};
use super::submission::SubmissionMode;
use super::validation::SectionBadge;
use super::wizard::{WizardPhase, WizardStep};

/// Identifier of an open wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("intake-{id:06}"))
}

/// State a form renderer needs after every interaction.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub mode: SubmissionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<WizardStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_label: Option<&'static str>,
    pub phase: &'static str,
    pub progress: u8,
    pub missing_fields: Vec<SectionBadge>,
    pub autosave: &'static str,
    pub record: IntakeRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
}

impl SessionView {
    fn of(session_id: &SessionId, session: &IntakeSession) -> Self {
        let step = session.step();
        Self {
            session_id: session_id.clone(),
            mode: session.mode().clone(),
            step,
            step_label: step.map(WizardStep::label),
            phase: session.phase().label(),
            progress: session.progress(),
            missing_fields: session.missing_fields().badges(),
            autosave: session.autosave_status().label(),
            record: session.snapshot(),
            record_id: None,
        }
    }
}

type SessionHandle = Arc<Mutex<IntakeSession>>;

/// Hosts intake sessions for HTTP clients and forwards finished records to the persistence API.
///
/// The registry lock is only held to look sessions up. Each session has its own lock, so a
/// slow persistence call blocks the submitting session and nothing else.
pub struct IntakeService<A> {
    api: Arc<A>,
    settings: IntakeSettings,
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl<A> IntakeService<A>
where
    A: IntakeRecordApi + 'static,
{
    pub fn new(api: Arc<A>, settings: IntakeSettings) -> Self {
        Self {
            api,
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn open_draft(&self, identity: Option<&Identity>) -> SessionView {
        let today = Local::now().date_naive();
        let session = IntakeSession::create(identity, &self.settings, today);
        self.register(session)
    }

    pub fn open_existing(&self, record_id: RecordId) -> Result<SessionView, IntakeServiceError> {
        let session = IntakeSession::load(self.api.as_ref(), record_id, &self.settings)?;
        Ok(self.register(session))
    }

    pub fn view(&self, session_id: &SessionId) -> Result<SessionView, IntakeServiceError> {
        self.with_session(session_id, |session| {
            session.poll(Instant::now());
            Ok(())
        })
    }

    pub fn update_field(
        &self,
        session_id: &SessionId,
        field: IntakeField,
        value: FieldValue,
    ) -> Result<SessionView, IntakeServiceError> {
        self.with_session(session_id, |session| {
            let now = Instant::now();
            session.poll(now);
            session.input(field, value, Local::now().date_naive(), now)?;
            Ok(())
        })
    }

    pub fn next(
        &self,
        session_id: &SessionId,
        identity: Option<&Identity>,
    ) -> Result<SessionView, IntakeServiceError> {
        let handle = self.session(session_id)?;
        let (advance, mut view) = {
            let mut session = lock_session(&handle);
            let advance =
                session.next(self.api.as_ref(), identity, Instant::now(), Utc::now())?;
            (advance, SessionView::of(session_id, &*session))
        };

        if let Advance::Submitted { record_id } = advance {
            self.sessions().remove(session_id);
            info!(%session_id, %record_id, "intake session completed");
            view.record_id = Some(record_id);
        }
        Ok(view)
    }

    pub fn back(&self, session_id: &SessionId) -> Result<SessionView, IntakeServiceError> {
        let handle = self.session(session_id)?;
        let (phase, view) = {
            let mut session = lock_session(&handle);
            let phase = session.back(Instant::now())?;
            (phase, SessionView::of(session_id, &*session))
        };

        if phase == WizardPhase::Cancelled {
            self.sessions().remove(session_id);
            info!(%session_id, "intake session cancelled");
        }
        Ok(view)
    }

    pub fn go_to(
        &self,
        session_id: &SessionId,
        step: WizardStep,
    ) -> Result<SessionView, IntakeServiceError> {
        self.with_session(session_id, |session| {
            session.go_to(step, Instant::now())?;
            Ok(())
        })
    }

    pub fn record(&self, record_id: &RecordId) -> Result<IntakeRecord, IntakeServiceError> {
        self.api
            .get(record_id)
            .map_err(|err| IntakeServiceError::Intake(IntakeError::Load(err)))
    }

    pub fn open_sessions(&self) -> usize {
        self.sessions().len()
    }

    fn register(&self, session: IntakeSession) -> SessionView {
        let session_id = next_session_id();
        let view = SessionView::of(&session_id, &session);
        info!(%session_id, progress = view.progress, "intake session opened");
        self.sessions().insert(session_id, Arc::new(Mutex::new(session)));
        view
    }

    fn with_session<F>(&self, session_id: &SessionId, apply: F) -> Result<SessionView, IntakeServiceError>
    where
        F: FnOnce(&mut IntakeSession) -> Result<(), IntakeError>,
    {
        let handle = self.session(session_id)?;
        let mut session = lock_session(&handle);
        apply(&mut *session)?;
        Ok(SessionView::of(session_id, &*session))
    }

    fn session(&self, session_id: &SessionId) -> Result<SessionHandle, IntakeServiceError> {
        self.sessions()
            .get(session_id)
            .cloned()
            .ok_or_else(|| IntakeServiceError::SessionNotFound(session_id.clone()))
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, SessionHandle>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn lock_session(handle: &Mutex<IntakeSession>) -> MutexGuard<'_, IntakeSession> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error("intake session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    Intake(#[from] IntakeError),
}

impl IntakeServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IntakeServiceError::SessionNotFound(_)
                | IntakeServiceError::Intake(IntakeError::Load(PersistenceError::NotFound(_)))
        )
    }
}
