use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::domain::IntakeField;
use super::record::IntakeRecord;
use super::schema::Section;
use super::wizard::WizardStep;

/// Fields whose presence gates submission, in the order they are reported.
pub const REQUIRED_FIELDS: [IntakeField; 10] = [
    IntakeField::YourName,
    IntakeField::TransactionDate,
    IntakeField::TypeOfTransaction,
    IntakeField::CaseNumber,
    IntakeField::Name,
    IntakeField::DateOfBirth,
    IntakeField::Gender,
    IntakeField::ReasonForPlacement,
    IntakeField::LevelOfCare,
    IntakeField::CountyWorkerName,
];

/// Required fields absent from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingFields {
    fields: Vec<IntakeField>,
}

impl MissingFields {
    pub fn fields(&self) -> &[IntakeField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn by_section(&self) -> BTreeMap<Section, Vec<IntakeField>> {
        let mut grouped: BTreeMap<Section, Vec<IntakeField>> = BTreeMap::new();
        for field in &self.fields {
            grouped.entry(field.section()).or_default().push(*field);
        }
        grouped
    }

    /// Section badges for the review screen, one per section still missing data.
    pub fn badges(&self) -> Vec<SectionBadge> {
        self.by_section()
            .into_iter()
            .map(|(section, fields)| SectionBadge {
                section,
                section_label: section.label(),
                step: section.step(),
                labels: fields.iter().map(|field| field.label()).collect(),
                fields,
            })
            .collect()
    }

    /// Earliest wizard step the user must revisit.
    pub fn first_step(&self) -> Option<WizardStep> {
        self.fields
            .iter()
            .filter_map(|field| field.section().step())
            .min()
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .by_section()
            .into_iter()
            .map(|(section, fields)| {
                let labels: Vec<&str> = fields.iter().map(|field| field.label()).collect();
                format!("{}: {}", section.label(), labels.join(", "))
            })
            .collect();
        f.write_str(&groups.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBadge {
    pub section: Section,
    pub section_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<WizardStep>,
    pub fields: Vec<IntakeField>,
    pub labels: Vec<&'static str>,
}

/// Submission attempted while required fields are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required fields missing ({missing})")]
pub struct ValidationError {
    pub missing: MissingFields,
}

/// Stateless presence checks over record snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepValidator;

impl StepValidator {
    pub fn new() -> Self {
        Self
    }

    /// Required fields rendered by `step`.
    pub fn required_for_step(step: WizardStep) -> Vec<IntakeField> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| field.section().step() == Some(step))
            .collect()
    }

    /// Required fields grouped by the section that owns them.
    pub fn sections() -> BTreeMap<Section, Vec<IntakeField>> {
        let mut grouped: BTreeMap<Section, Vec<IntakeField>> = BTreeMap::new();
        for field in REQUIRED_FIELDS {
            grouped.entry(field.section()).or_default().push(field);
        }
        grouped
    }

    pub fn check(&self, record: &IntakeRecord) -> MissingFields {
        MissingFields {
            fields: REQUIRED_FIELDS
                .into_iter()
                .filter(|field| !record.is_present(*field))
                .collect(),
        }
    }

    pub fn ensure_complete(&self, record: &IntakeRecord) -> Result<(), ValidationError> {
        let missing = self.check(record);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
