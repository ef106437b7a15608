//! Intake record workflow engine: field cascades, required-field validation, completion
//! progress, and the three-step wizard that coordinates them for create and edit flows.

pub mod age;
pub mod api;
pub mod autosave;
pub mod dates;
pub mod domain;
pub mod drafts;
pub mod progress;
pub mod record;
pub mod router;
pub mod rules;
pub mod schema;
pub mod service;
pub mod session;
pub mod submission;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use age::derive_age;
pub use api::{IntakeRecordApi, PersistenceError};
pub use autosave::{AutosaveIndicator, AutosaveStatus};
pub use dates::FieldParseError;
pub use domain::{
    ClientStatus, DocumentCategory, FieldValue, Gender, Identity, IntakeField, LevelOfCare,
    Office, RecordId, TransactionType, STATUS_IN_PROGRESS,
};
pub use drafts::{editable_copy, initial_draft};
pub use progress::compute_progress;
pub use record::{FieldPatch, FieldStore, IntakeRecord};
pub use router::intake_router;
pub use rules::DependencyRuleEngine;
pub use schema::{intake_schema, FieldKind, FieldSchema, Section};
pub use service::{IntakeService, IntakeServiceError, SessionId, SessionView};
pub use session::{Advance, IntakeError, IntakeSession};
pub use submission::{AuthenticationError, SubmissionAdapter, SubmissionMode};
pub use validation::{MissingFields, SectionBadge, StepValidator, ValidationError, REQUIRED_FIELDS};
pub use wizard::{NextAction, WizardController, WizardError, WizardPhase, WizardStep};
