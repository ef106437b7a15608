use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::dates::{format_timestamp, instant_from_date, parse_date_input};
use super::domain::{
    ClientStatus, FieldValue, Identity, IntakeField, RecordId, STATUS_IN_PROGRESS,
};
use super::record::IntakeRecord;

/// Whether the session creates a new record or updates a loaded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionMode {
    Create,
    Edit { record_id: RecordId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("acting user identity is unavailable; sign in again before submitting")]
pub struct AuthenticationError;

/// Shapes a draft snapshot into the persistence API's record layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionAdapter;

impl SubmissionAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(
        &self,
        draft: &IntakeRecord,
        mode: &SubmissionMode,
        identity: Option<&Identity>,
        now: DateTime<Utc>,
    ) -> Result<IntakeRecord, AuthenticationError> {
        let identity = identity
            .filter(|identity| !identity.user_id.trim().is_empty())
            .ok_or(AuthenticationError)?;

        let mut record = draft.clone();

        for field in IntakeField::DATES {
            let Some(raw) = draft.get(field).as_text() else {
                continue;
            };
            if raw.trim().is_empty() {
                continue;
            }
            match parse_date_input(raw) {
                Ok(date) => record.insert(field, FieldValue::Text(instant_from_date(date))),
                Err(err) => warn!(%field, error = %err, "date left as entered"),
            }
        }

        if let FieldValue::Text(raw) = draft.get(IntakeField::ClientStatus) {
            if let Ok(code) = raw.trim().parse::<i64>() {
                if ClientStatus::from_code(code).is_none() {
                    warn!(code, "client status is not a recognised code");
                }
                record.insert(IntakeField::ClientStatus, FieldValue::Number(code));
            }
        }

        match mode {
            SubmissionMode::Create => {
                record.insert(IntakeField::CreatedBy, FieldValue::text(&identity.user_id));
                record.insert(IntakeField::Status, FieldValue::text(STATUS_IN_PROGRESS));
            }
            SubmissionMode::Edit { .. } => {
                record.insert(IntakeField::UpdatedBy, FieldValue::text(&identity.user_id));
                record.insert(IntakeField::UpdatedAt, FieldValue::Text(format_timestamp(now)));
            }
        }

        Ok(record)
    }
}
