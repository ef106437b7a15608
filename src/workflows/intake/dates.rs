use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

const EDITABLE_FORMAT: &str = "%Y-%m-%d";

/// Raised when externally supplied text cannot be read as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse '{raw}' as a date (expected YYYY-MM-DD or an RFC 3339 timestamp)")]
pub struct FieldParseError {
    pub raw: String,
}

/// Accepts both the editable `YYYY-MM-DD` form and the persisted instant form.
pub fn parse_date_input(raw: &str) -> Result<NaiveDate, FieldParseError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, EDITABLE_FORMAT) {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.with_timezone(&Utc).date_naive())
        .map_err(|_| FieldParseError {
            raw: raw.to_string(),
        })
}

pub fn editable_date(date: NaiveDate) -> String {
    date.format(EDITABLE_FORMAT).to_string()
}

/// Midnight UTC of `date` as an ISO-8601 instant with millisecond precision.
pub fn instant_from_date(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
