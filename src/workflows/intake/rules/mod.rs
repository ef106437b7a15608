mod tables;

pub use tables::{document_category, office_contact, payment_rates, OfficeContact, PaymentRates};

use chrono::NaiveDate;
use tracing::debug;

use super::age::derive_age;
use super::dates::parse_date_input;
use super::domain::{FieldValue, IntakeField, LevelOfCare, Office, TransactionType};
use super::record::{FieldPatch, FieldStore};

/// Fields whose change fans out into derived assignments.
pub const TRIGGERS: [IntakeField; 5] = [
    IntakeField::Office,
    IntakeField::LevelOfCare,
    IntakeField::DateOfBirth,
    IntakeField::InfantDateOfBirth,
    IntakeField::TypeOfTransaction,
];

/// Stateless cascade rules mapping a trigger value to the fields it prescribes.
///
/// Rules are one level deep: derived assignments are merged without being re-examined as
/// triggers, and each rule reads only the trigger value (plus `today` for ages).
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyRuleEngine;

impl DependencyRuleEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn is_trigger(field: IntakeField) -> bool {
        TRIGGERS.contains(&field)
    }

    /// Derived assignments for `trigger` taking `value`. Empty for non-trigger fields.
    pub fn derive(&self, trigger: IntakeField, value: &FieldValue, today: NaiveDate) -> FieldPatch {
        let mut patch = FieldPatch::new();
        let raw = value.as_text().unwrap_or("");

        match trigger {
            IntakeField::Office => {
                let contact = Office::from_label(raw).map(office_contact);
                let pick = |select: fn(&OfficeContact) -> &'static str| {
                    contact
                        .as_ref()
                        .map(|contact| FieldValue::text(select(contact)))
                        .unwrap_or_else(FieldValue::blank)
                };
                patch.insert(IntakeField::OfficeNumber, pick(|c| c.office_number));
                patch.insert(IntakeField::PhoneNumber, pick(|c| c.phone_number));
                patch.insert(IntakeField::NameOfCounty, pick(|c| c.county));
                patch.insert(IntakeField::CountyWorkerAddress, pick(|c| c.county_address));
                patch.insert(IntakeField::CountyWorkerCity, pick(|c| c.county_city));
                patch.insert(IntakeField::CountyWorkerZip, pick(|c| c.county_zip));
            }
            IntakeField::LevelOfCare => {
                let (resource_parents, county) = match LevelOfCare::from_label(raw) {
                    Some(level) => {
                        let rates = payment_rates(level);
                        (
                            FieldValue::text(rates.resource_parents),
                            FieldValue::text(rates.county),
                        )
                    }
                    None => (FieldValue::blank(), FieldValue::blank()),
                };
                patch.insert(IntakeField::ResourceParentsPayment, resource_parents);
                patch.insert(IntakeField::CountyWillPay, county);
            }
            IntakeField::DateOfBirth => {
                patch.insert(IntakeField::Age, age_value(raw, today));
            }
            IntakeField::InfantDateOfBirth => {
                patch.insert(IntakeField::InfantAge, age_value(raw, today));
            }
            IntakeField::TypeOfTransaction => {
                let category = document_category(TransactionType::from_label(raw));
                patch.insert(
                    IntakeField::Categories,
                    FieldValue::List(vec![category.label().to_string()]),
                );
            }
            _ => {}
        }

        patch
    }

    /// Write `value` to `trigger` together with its derived fields as one merge.
    ///
    /// Returns the full patch that was applied.
    pub fn apply(
        &self,
        store: &mut FieldStore,
        trigger: IntakeField,
        value: FieldValue,
        today: NaiveDate,
    ) -> FieldPatch {
        let mut patch = self.derive(trigger, &value, today);
        if !patch.is_empty() {
            debug!(%trigger, derived = patch.len(), "cascading derived fields");
        }
        patch.insert(trigger, value);
        store.merge(patch.clone());
        patch
    }
}

fn age_value(raw: &str, today: NaiveDate) -> FieldValue {
    if raw.trim().is_empty() {
        return FieldValue::blank();
    }

    match parse_date_input(raw) {
        Ok(birth) => FieldValue::Number(derive_age(birth, today)),
        Err(err) => {
            debug!(error = %err, "birth date not derivable, clearing age");
            FieldValue::blank()
        }
    }
}

#[cfg(test)]
mod tests;
