use serde::Serialize;

use super::domain::{self, ClientStatus, Gender, IntakeField, LevelOfCare, TransactionType};
use super::wizard::WizardStep;

const OFFICE_CHOICES: [&str; 4] = [
    domain::Office::SantaMaria.label(),
    domain::Office::Bakersfield.label(),
    domain::Office::Riverside.label(),
    domain::Office::SanBernardino.label(),
];

const TRANSACTION_CHOICES: [&str; 5] = [
    TransactionType::Intake.label(),
    TransactionType::InHouseMove.label(),
    TransactionType::Termination.label(),
    TransactionType::ShelterPlacement.label(),
    TransactionType::LocChange.label(),
];

const LEVEL_CHOICES: [&str; 5] = [
    LevelOfCare::Level1.label(),
    LevelOfCare::Level2.label(),
    LevelOfCare::Level3.label(),
    LevelOfCare::Level4.label(),
    LevelOfCare::Level5.label(),
];

const GENDER_CHOICES: [&str; 2] = [Gender::Male.label(), Gender::Female.label()];

const CLIENT_STATUS_CHOICES: [&str; 3] = [
    ClientStatus::Dependent300.label(),
    ClientStatus::StatusOffender601.label(),
    ClientStatus::DelinquentWard602.label(),
];

/// Options offered for a `Choice` field. Empty for every other kind.
fn choices(field: IntakeField) -> &'static [&'static str] {
    match field {
        IntakeField::Office => &OFFICE_CHOICES,
        IntakeField::TypeOfTransaction => &TRANSACTION_CHOICES,
        IntakeField::LevelOfCare => &LEVEL_CHOICES,
        IntakeField::Gender | IntakeField::InfantGender => &GENDER_CHOICES,
        IntakeField::ClientStatus => &CLIENT_STATUS_CHOICES,
        _ => &[],
    }
}

/// Logical form section a field is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Office,
    Representative,
    Client,
    Infant,
    ResourceFamily,
    CountyWorker,
    Documents,
    Audit,
}

impl Section {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Representative => "Representative",
            Self::Client => "Client",
            Self::Infant => "Infant",
            Self::ResourceFamily => "Resource Family",
            Self::CountyWorker => "County Worker",
            Self::Documents => "Documents",
            Self::Audit => "Audit",
        }
    }

    /// Wizard step that renders this section; audit data is never shown for editing.
    pub const fn step(self) -> Option<WizardStep> {
        match self {
            Self::Office | Self::Representative | Self::Client | Self::Infant => {
                Some(WizardStep::Capture)
            }
            Self::ResourceFamily | Self::CountyWorker | Self::Documents => {
                Some(WizardStep::Placement)
            }
            Self::Audit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    Choice,
    Number,
    List,
}

/// Rendering and mutation metadata for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub field: IntakeField,
    pub section: Section,
    pub label: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<IntakeField>,
    pub editable: bool,
    pub choices: &'static [&'static str],
}

impl IntakeField {
    pub fn schema(self) -> FieldSchema {
        use FieldKind::*;
        use IntakeField as F;
        use Section::*;

        let (section, label, kind, derived_from) = match self {
            F::YourName => (Office, "Your Name", Text, None),
            F::Office => (Office, "Office", Choice, None),
            F::DateSubmitted => (Office, "Date Submitted", Date, None),
            F::TransactionDate => (Office, "Transaction Date", Date, None),
            F::TypeOfTransaction => (Office, "Type of Transaction", Choice, None),
            F::PathwayRepresentative => (Representative, "Pathway Representative", Text, None),
            F::PositionJobTitle => (Representative, "Position/Job Title", Text, None),
            F::IntakeRepresentative => (Representative, "Intake Representative", Text, None),
            F::OfficeNumber => (Representative, "Office Number", Text, Some(F::Office)),
            F::PhoneNumber => (Representative, "Phone Number", Text, Some(F::Office)),
            F::CaseNumber => (Client, "Case Number", Text, None),
            F::Name => (Client, "Name", Text, None),
            F::Age => (Client, "Age", Number, Some(F::DateOfBirth)),
            F::DateOfBirth => (Client, "Date of Birth", Date, None),
            F::Ethnicity => (Client, "Ethnicity", Text, None),
            F::Gender => (Client, "Gender", Choice, None),
            F::ClientStatus => (Client, "Client Status", Choice, None),
            F::PriorPlacement => (Client, "Prior Placement", Text, None),
            F::ReasonForPlacement => (Client, "Reason for Placement", Text, None),
            F::LevelOfCare => (Client, "Level of Care", Choice, None),
            F::InfantFullName => (Infant, "Infant Full Name", Text, None),
            F::InfantDateOfBirth => (Infant, "Infant Date of Birth", Date, None),
            F::InfantAge => (Infant, "Infant Age", Number, Some(F::InfantDateOfBirth)),
            F::InfantIntakeDate => (Infant, "Infant Intake Date", Date, None),
            F::InfantGender => (Infant, "Infant Gender", Choice, None),
            F::InfantEthnicity => (Infant, "Infant Ethnicity", Text, None),
            F::NameOfResourceParents => (ResourceFamily, "Name of Resource Parents", Text, None),
            F::ResourceParentsPayment => (
                ResourceFamily,
                "Resource Parents Payment",
                Text,
                Some(F::LevelOfCare),
            ),
            F::ResourceParentsTelephone => (ResourceFamily, "Telephone", Text, None),
            F::ResourceParentsAddress => (ResourceFamily, "Address", Text, None),
            F::ResourceParentsCity => (ResourceFamily, "City", Text, None),
            F::ResourceParentsState => (ResourceFamily, "State", Text, None),
            F::ResourceParentsZip => (ResourceFamily, "Zip", Text, None),
            F::CountyWorkerName => (CountyWorker, "County Worker Name", Text, None),
            F::CountyWorkerTitle => (CountyWorker, "County Worker Title", Text, None),
            F::NameOfCounty => (CountyWorker, "Name of County", Text, Some(F::Office)),
            F::NameOfDepartment => (CountyWorker, "Name of Department", Text, None),
            F::CountyWillPay => (CountyWorker, "County Will Pay", Text, Some(F::LevelOfCare)),
            F::CountyWorkerTelephone => (CountyWorker, "Telephone", Text, None),
            F::CountyWorkerAddress => (CountyWorker, "Address", Text, Some(F::Office)),
            F::CountyWorkerCity => (CountyWorker, "City", Text, Some(F::Office)),
            F::CountyWorkerState => (CountyWorker, "State", Text, None),
            F::CountyWorkerZip => (CountyWorker, "Zip", Text, Some(F::Office)),
            F::Categories => (
                Documents,
                "Document Categories",
                List,
                Some(F::TypeOfTransaction),
            ),
            F::CreatedBy => (Audit, "Created By", Text, None),
            F::CreatedAt => (Audit, "Created At", Date, None),
            F::Status => (Audit, "Status", Text, None),
            F::UpdatedBy => (Audit, "Updated By", Text, None),
            F::UpdatedAt => (Audit, "Updated At", Date, None),
        };

        FieldSchema {
            field: self,
            section,
            label,
            kind,
            derived_from,
            editable: section != Audit,
            choices: choices(self),
        }
    }

    pub fn section(self) -> Section {
        self.schema().section
    }

    pub fn label(self) -> &'static str {
        self.schema().label
    }

    pub fn is_editable(self) -> bool {
        self.schema().editable
    }
}

/// Full schema in record order, as served to form renderers.
pub fn intake_schema() -> Vec<FieldSchema> {
    IntakeField::ALL.iter().map(|field| field.schema()).collect()
}
