use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FieldValue, IntakeField};

/// Assignments written to the store in one step.
pub type FieldPatch = BTreeMap<IntakeField, FieldValue>;

static EMPTY: FieldValue = FieldValue::Empty;

/// Snapshot of every populated intake field, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntakeRecord {
    fields: BTreeMap<IntakeField, FieldValue>,
}

impl IntakeRecord {
    pub fn get(&self, field: IntakeField) -> &FieldValue {
        self.fields.get(&field).unwrap_or(&EMPTY)
    }

    /// Text content of `field`, or `""` when unset or not textual.
    pub fn text(&self, field: IntakeField) -> &str {
        self.get(field).as_text().unwrap_or("")
    }

    pub fn is_present(&self, field: IntakeField) -> bool {
        self.get(field).is_present()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntakeField, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    pub(crate) fn insert(&mut self, field: IntakeField, value: FieldValue) {
        self.fields.insert(field, value);
    }
}

impl FromIterator<(IntakeField, FieldValue)> for IntakeRecord {
    fn from_iter<T: IntoIterator<Item = (IntakeField, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Mutable draft owned by one wizard session. Plain value container: no validation and no
/// cascades happen here.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    record: IntakeRecord,
}

impl FieldStore {
    pub fn new(record: IntakeRecord) -> Self {
        Self { record }
    }

    pub fn get(&self, field: IntakeField) -> &FieldValue {
        self.record.get(field)
    }

    pub fn set(&mut self, field: IntakeField, value: FieldValue) {
        self.record.insert(field, value);
    }

    pub fn merge(&mut self, patch: FieldPatch) {
        self.record.fields.extend(patch);
    }

    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    pub fn snapshot(&self) -> IntakeRecord {
        self.record.clone()
    }
}
