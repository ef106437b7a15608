use super::super::domain::{DocumentCategory, LevelOfCare, Office, TransactionType};

/// Contact block every office pre-fills for the representative and county worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficeContact {
    pub office_number: &'static str,
    pub phone_number: &'static str,
    pub county: &'static str,
    pub county_address: &'static str,
    pub county_city: &'static str,
    pub county_zip: &'static str,
}

pub const fn office_contact(office: Office) -> OfficeContact {
    match office {
        Office::SantaMaria => OfficeContact {
            office_number: "201",
            phone_number: "(805) 555-0201",
            county: "Santa Barbara County",
            county_address: "2125 S Centerpointe Pkwy",
            county_city: "Santa Maria",
            county_zip: "93455",
        },
        Office::Bakersfield => OfficeContact {
            office_number: "202",
            phone_number: "(661) 555-0202",
            county: "Kern County",
            county_address: "100 E California Ave",
            county_city: "Bakersfield",
            county_zip: "93307",
        },
        Office::Riverside => OfficeContact {
            office_number: "203",
            phone_number: "(951) 555-0203",
            county: "Riverside County",
            county_address: "10281 Kidd St",
            county_city: "Riverside",
            county_zip: "92503",
        },
        Office::SanBernardino => OfficeContact {
            office_number: "204",
            phone_number: "(909) 555-0204",
            county: "San Bernardino County",
            county_address: "150 S Lena Rd",
            county_city: "San Bernardino",
            county_zip: "92415",
        },
    }
}

/// Monthly amounts owed to the resource family and billed to the county.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRates {
    pub resource_parents: &'static str,
    pub county: &'static str,
}

pub const fn payment_rates(level: LevelOfCare) -> PaymentRates {
    match level {
        LevelOfCare::Level1 => PaymentRates {
            resource_parents: "$1,206.00",
            county: "$2,500.00",
        },
        LevelOfCare::Level2 => PaymentRates {
            resource_parents: "$1,632.00",
            county: "$3,500.00",
        },
        LevelOfCare::Level3 => PaymentRates {
            resource_parents: "$2,058.00",
            county: "$4,500.00",
        },
        LevelOfCare::Level4 => PaymentRates {
            resource_parents: "$2,484.00",
            county: "$5,500.00",
        },
        LevelOfCare::Level5 => PaymentRates {
            resource_parents: "$2,910.00",
            county: "$6,500.00",
        },
    }
}

/// Unknown or unset transaction types fall back to the intake packet.
pub const fn document_category(transaction: Option<TransactionType>) -> DocumentCategory {
    match transaction {
        Some(TransactionType::InHouseMove) => DocumentCategory::InHouseMove,
        Some(TransactionType::ShelterPlacement) => DocumentCategory::ShelterBedDocuments,
        Some(TransactionType::Intake)
        | Some(TransactionType::LocChange)
        | Some(TransactionType::Termination)
        | None => DocumentCategory::IntakePaperwork,
    }
}
