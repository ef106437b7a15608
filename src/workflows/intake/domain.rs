use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the persistence API to a stored intake record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acting staff member supplied by the session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
}

/// Every field carried by an intake record, keyed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntakeField {
    YourName,
    Office,
    DateSubmitted,
    TransactionDate,
    TypeOfTransaction,
    PathwayRepresentative,
    PositionJobTitle,
    IntakeRepresentative,
    OfficeNumber,
    PhoneNumber,
    CaseNumber,
    Name,
    Age,
    DateOfBirth,
    Ethnicity,
    Gender,
    ClientStatus,
    PriorPlacement,
    ReasonForPlacement,
    LevelOfCare,
    InfantFullName,
    InfantDateOfBirth,
    InfantAge,
    InfantIntakeDate,
    InfantGender,
    InfantEthnicity,
    NameOfResourceParents,
    #[serde(rename = "ResourceParentsPayment", alias = "fosterParentsPayment")]
    ResourceParentsPayment,
    ResourceParentsTelephone,
    ResourceParentsAddress,
    ResourceParentsCity,
    ResourceParentsState,
    ResourceParentsZip,
    CountyWorkerName,
    CountyWorkerTitle,
    NameOfCounty,
    NameOfDepartment,
    CountyWillPay,
    CountyWorkerTelephone,
    CountyWorkerAddress,
    CountyWorkerCity,
    CountyWorkerState,
    CountyWorkerZip,
    Categories,
    CreatedBy,
    CreatedAt,
    Status,
    UpdatedBy,
    UpdatedAt,
}

impl IntakeField {
    pub const ALL: [Self; 49] = [
        Self::YourName,
        Self::Office,
        Self::DateSubmitted,
        Self::TransactionDate,
        Self::TypeOfTransaction,
        Self::PathwayRepresentative,
        Self::PositionJobTitle,
        Self::IntakeRepresentative,
        Self::OfficeNumber,
        Self::PhoneNumber,
        Self::CaseNumber,
        Self::Name,
        Self::Age,
        Self::DateOfBirth,
        Self::Ethnicity,
        Self::Gender,
        Self::ClientStatus,
        Self::PriorPlacement,
        Self::ReasonForPlacement,
        Self::LevelOfCare,
        Self::InfantFullName,
        Self::InfantDateOfBirth,
        Self::InfantAge,
        Self::InfantIntakeDate,
        Self::InfantGender,
        Self::InfantEthnicity,
        Self::NameOfResourceParents,
        Self::ResourceParentsPayment,
        Self::ResourceParentsTelephone,
        Self::ResourceParentsAddress,
        Self::ResourceParentsCity,
        Self::ResourceParentsState,
        Self::ResourceParentsZip,
        Self::CountyWorkerName,
        Self::CountyWorkerTitle,
        Self::NameOfCounty,
        Self::NameOfDepartment,
        Self::CountyWillPay,
        Self::CountyWorkerTelephone,
        Self::CountyWorkerAddress,
        Self::CountyWorkerCity,
        Self::CountyWorkerState,
        Self::CountyWorkerZip,
        Self::Categories,
        Self::CreatedBy,
        Self::CreatedAt,
        Self::Status,
        Self::UpdatedBy,
        Self::UpdatedAt,
    ];

    /// Fields holding calendar dates, edited as `YYYY-MM-DD` and persisted as instants.
    pub const DATES: [Self; 5] = [
        Self::DateSubmitted,
        Self::TransactionDate,
        Self::DateOfBirth,
        Self::InfantDateOfBirth,
        Self::InfantIntakeDate,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::YourName => "yourName",
            Self::Office => "office",
            Self::DateSubmitted => "dateSubmitted",
            Self::TransactionDate => "transactionDate",
            Self::TypeOfTransaction => "typeOfTransaction",
            Self::PathwayRepresentative => "pathwayRepresentative",
            Self::PositionJobTitle => "positionJobTitle",
            Self::IntakeRepresentative => "intakeRepresentative",
            Self::OfficeNumber => "officeNumber",
            Self::PhoneNumber => "phoneNumber",
            Self::CaseNumber => "caseNumber",
            Self::Name => "name",
            Self::Age => "age",
            Self::DateOfBirth => "dateOfBirth",
            Self::Ethnicity => "ethnicity",
            Self::Gender => "gender",
            Self::ClientStatus => "clientStatus",
            Self::PriorPlacement => "priorPlacement",
            Self::ReasonForPlacement => "reasonForPlacement",
            Self::LevelOfCare => "levelOfCare",
            Self::InfantFullName => "infantFullName",
            Self::InfantDateOfBirth => "infantDateOfBirth",
            Self::InfantAge => "infantAge",
            Self::InfantIntakeDate => "infantIntakeDate",
            Self::InfantGender => "infantGender",
            Self::InfantEthnicity => "infantEthnicity",
            Self::NameOfResourceParents => "nameOfResourceParents",
            Self::ResourceParentsPayment => "ResourceParentsPayment",
            Self::ResourceParentsTelephone => "resourceParentsTelephone",
            Self::ResourceParentsAddress => "resourceParentsAddress",
            Self::ResourceParentsCity => "resourceParentsCity",
            Self::ResourceParentsState => "resourceParentsState",
            Self::ResourceParentsZip => "resourceParentsZip",
            Self::CountyWorkerName => "countyWorkerName",
            Self::CountyWorkerTitle => "countyWorkerTitle",
            Self::NameOfCounty => "nameOfCounty",
            Self::NameOfDepartment => "nameOfDepartment",
            Self::CountyWillPay => "countyWillPay",
            Self::CountyWorkerTelephone => "countyWorkerTelephone",
            Self::CountyWorkerAddress => "countyWorkerAddress",
            Self::CountyWorkerCity => "countyWorkerCity",
            Self::CountyWorkerState => "countyWorkerState",
            Self::CountyWorkerZip => "countyWorkerZip",
            Self::Categories => "categories",
            Self::CreatedBy => "createdBy",
            Self::CreatedAt => "createdAt",
            Self::Status => "status",
            Self::UpdatedBy => "updatedBy",
            Self::UpdatedAt => "updatedAt",
        }
    }

    pub fn is_date(self) -> bool {
        Self::DATES.contains(&self)
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value held by a single intake field.
///
/// Serialized untagged so the record reads as a flat JSON object: `null`, booleans, integers,
/// strings and string arrays.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Flag(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Empty string, the value derivation rules produce for unmatched triggers.
    pub fn blank() -> Self {
        Self::Text(String::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Presence as the validator sees it. Whitespace-only text and empty lists are absent;
    /// `0` and `false` count as supplied.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Flag(_) | Self::Number(_) => true,
            Self::Text(value) => !value.trim().is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Field offices handling placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Office {
    SantaMaria,
    Bakersfield,
    Riverside,
    SanBernardino,
}

impl Office {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::SantaMaria,
            Self::Bakersfield,
            Self::Riverside,
            Self::SanBernardino,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SantaMaria => "Santa Maria",
            Self::Bakersfield => "Bakersfield",
            Self::Riverside => "Riverside",
            Self::SanBernardino => "San Bernardino",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered().into_iter().find(|office| office.label() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Intake,
    InHouseMove,
    Termination,
    ShelterPlacement,
    LocChange,
}

impl TransactionType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Intake,
            Self::InHouseMove,
            Self::Termination,
            Self::ShelterPlacement,
            Self::LocChange,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::InHouseMove => "In House Move",
            Self::Termination => "Termination",
            Self::ShelterPlacement => "Shelter Placement",
            Self::LocChange => "LOC Change",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered().into_iter().find(|kind| kind.label() == raw)
    }
}

/// Ordinal level of care driving foster-family and county payment amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelOfCare {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
}

impl LevelOfCare {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Level1,
            Self::Level2,
            Self::Level3,
            Self::Level4,
            Self::Level5,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Level1 => "Level 1",
            Self::Level2 => "Level 2",
            Self::Level3 => "Level 3",
            Self::Level4 => "Level 4",
            Self::Level5 => "Level 5",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered().into_iter().find(|level| level.label() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn ordered() -> [Self; 2] {
        [Self::Male, Self::Female]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Welfare and Institutions Code section the client is placed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Dependent300,
    StatusOffender601,
    DelinquentWard602,
}

impl ClientStatus {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::Dependent300,
            Self::StatusOffender601,
            Self::DelinquentWard602,
        ]
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::Dependent300 => 300,
            Self::StatusOffender601 => 601,
            Self::DelinquentWard602 => 602,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            300 => Some(Self::Dependent300),
            601 => Some(Self::StatusOffender601),
            602 => Some(Self::DelinquentWard602),
            _ => None,
        }
    }

    /// Code as entered on the form; persisted records carry it as a number.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dependent300 => "300",
            Self::StatusOffender601 => "601",
            Self::DelinquentWard602 => "602",
        }
    }
}

/// Document template family forwarded to the template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentCategory {
    IntakePaperwork,
    InHouseMove,
    ShelterBedDocuments,
}

impl DocumentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::IntakePaperwork => "Intake Paperwork",
            Self::InHouseMove => "In House Move",
            Self::ShelterBedDocuments => "Shelter Bed Documents",
        }
    }
}

/// Record status stamped on creation.
pub const STATUS_IN_PROGRESS: &str = "In Progress";
