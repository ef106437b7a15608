use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::IntakeSettings;

use super::api::{IntakeRecordApi, PersistenceError};
use super::autosave::{AutosaveIndicator, AutosaveStatus};
use super::domain::{FieldValue, Identity, IntakeField, RecordId};
use super::drafts::{editable_copy, initial_draft};
use super::progress::compute_progress;
use super::record::{FieldPatch, FieldStore, IntakeRecord};
use super::rules::DependencyRuleEngine;
use super::submission::{AuthenticationError, SubmissionAdapter, SubmissionMode};
use super::validation::{MissingFields, StepValidator, ValidationError};
use super::wizard::{NextAction, WizardController, WizardError, WizardPhase, WizardStep};

/// Errors surfaced to the form while driving an intake session.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error("submission failed: {0}")]
    Submission(#[source] PersistenceError),
    #[error("could not load intake record: {0}")]
    Load(#[source] PersistenceError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("field `{0}` is not editable")]
    ReadOnlyField(IntakeField),
}

/// Result of a `next` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moving { target: WizardStep },
    Submitted { record_id: RecordId },
}

/// One staff member's pass through the intake wizard, for a new or an existing record.
#[derive(Debug)]
pub struct IntakeSession {
    store: FieldStore,
    engine: DependencyRuleEngine,
    validator: StepValidator,
    adapter: SubmissionAdapter,
    wizard: WizardController,
    autosave: AutosaveIndicator,
    mode: SubmissionMode,
    progress: u8,
}

impl IntakeSession {
    pub fn create(identity: Option<&Identity>, settings: &IntakeSettings, today: NaiveDate) -> Self {
        Self::with_record(initial_draft(identity, today), SubmissionMode::Create, settings)
    }

    pub fn edit(record_id: RecordId, persisted: &IntakeRecord, settings: &IntakeSettings) -> Self {
        Self::with_record(
            editable_copy(persisted),
            SubmissionMode::Edit { record_id },
            settings,
        )
    }

    pub fn load<A>(api: &A, record_id: RecordId, settings: &IntakeSettings) -> Result<Self, IntakeError>
    where
        A: IntakeRecordApi + ?Sized,
    {
        let persisted = api.get(&record_id).map_err(IntakeError::Load)?;
        info!(%record_id, "loaded intake record for editing");
        Ok(Self::edit(record_id, &persisted, settings))
    }

    fn with_record(record: IntakeRecord, mode: SubmissionMode, settings: &IntakeSettings) -> Self {
        let progress = compute_progress(&record);
        Self {
            store: FieldStore::new(record),
            engine: DependencyRuleEngine::new(),
            validator: StepValidator::new(),
            adapter: SubmissionAdapter::new(),
            wizard: WizardController::new(settings.validating_delay),
            autosave: AutosaveIndicator::new(settings.autosave_delay),
            mode,
            progress,
        }
    }

    pub fn mode(&self) -> &SubmissionMode {
        &self.mode
    }

    pub fn record(&self) -> &IntakeRecord {
        self.store.record()
    }

    pub fn snapshot(&self) -> IntakeRecord {
        self.store.snapshot()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn missing_fields(&self) -> MissingFields {
        self.validator.check(self.store.record())
    }

    pub fn phase(&self) -> WizardPhase {
        self.wizard.phase()
    }

    pub fn step(&self) -> Option<WizardStep> {
        self.wizard.step()
    }

    pub fn is_closed(&self) -> bool {
        self.wizard.is_closed()
    }

    pub fn autosave_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    /// Advance timers: settles a pending step change and the autosave indicator.
    pub fn poll(&mut self, now: Instant) -> WizardPhase {
        self.autosave.poll(now);
        self.wizard.poll(now)
    }

    /// Apply one user edit and its cascade, returning every field that was written.
    pub fn input(
        &mut self,
        field: IntakeField,
        value: FieldValue,
        today: NaiveDate,
        now: Instant,
    ) -> Result<FieldPatch, IntakeError> {
        if !field.is_editable() {
            return Err(IntakeError::ReadOnlyField(field));
        }
        if !self.wizard.accepts_input() {
            let err = if self.wizard.is_closed() {
                WizardError::Closed
            } else {
                WizardError::Busy
            };
            return Err(err.into());
        }

        let patch = self.engine.apply(&mut self.store, field, value, today);
        self.progress = compute_progress(self.store.record());
        self.autosave.record_edit(now);
        Ok(patch)
    }

    pub fn next<A>(
        &mut self,
        api: &A,
        identity: Option<&Identity>,
        now: Instant,
        at: DateTime<Utc>,
    ) -> Result<Advance, IntakeError>
    where
        A: IntakeRecordApi + ?Sized,
    {
        match self.wizard.next(now)? {
            NextAction::Advancing { target } => Ok(Advance::Moving { target }),
            NextAction::Submit => self
                .submit(api, identity, now, at)
                .map(|record_id| Advance::Submitted { record_id }),
        }
    }

    pub fn back(&mut self, now: Instant) -> Result<WizardPhase, IntakeError> {
        Ok(self.wizard.back(now)?)
    }

    pub fn go_to(&mut self, step: WizardStep, now: Instant) -> Result<WizardStep, IntakeError> {
        Ok(self.wizard.go_to(step, now)?)
    }

    /// Validate, normalize and hand the record to the persistence API.
    ///
    /// The draft is left untouched on every failure so the user can retry.
    fn submit<A>(
        &mut self,
        api: &A,
        identity: Option<&Identity>,
        now: Instant,
        at: DateTime<Utc>,
    ) -> Result<RecordId, IntakeError>
    where
        A: IntakeRecordApi + ?Sized,
    {
        let snapshot = self.store.snapshot();
        if let Err(err) = self.validator.ensure_complete(&snapshot) {
            warn!(missing = err.missing.len(), "submission blocked by missing fields");
            return Err(err.into());
        }

        let payload = self.adapter.normalize(&snapshot, &self.mode, identity, at)?;
        self.wizard.begin_submission(now)?;

        let outcome = match &self.mode {
            SubmissionMode::Create => api.create(payload),
            SubmissionMode::Edit { record_id } => api.update(record_id, payload),
        };

        match outcome {
            Ok(record_id) => {
                self.wizard.finish_submission(true);
                info!(%record_id, mode = ?self.mode, "intake record submitted");
                Ok(record_id)
            }
            Err(err) => {
                self.wizard.finish_submission(false);
                warn!(error = %err, "intake submission failed");
                Err(IntakeError::Submission(err))
            }
        }
    }
}
