use chrono::NaiveDate;

use super::*;
use crate::workflows::intake::domain::LevelOfCare;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).expect("valid date")
}

fn text(value: &str) -> FieldValue {
    FieldValue::text(value)
}

#[test]
fn office_rule_writes_exactly_the_contact_tuple() {
    let engine = DependencyRuleEngine::new();

    for office in Office::ordered() {
        let mut store = FieldStore::default();
        store.set(IntakeField::CaseNumber, text("CN-77"));
        let before = store.snapshot();

        engine.apply(&mut store, IntakeField::Office, text(office.label()), today());

        let contact = office_contact(office);
        let record = store.record();
        assert_eq!(record.text(IntakeField::OfficeNumber), contact.office_number);
        assert_eq!(record.text(IntakeField::PhoneNumber), contact.phone_number);
        assert_eq!(record.text(IntakeField::NameOfCounty), contact.county);
        assert_eq!(record.text(IntakeField::CountyWorkerAddress), contact.county_address);
        assert_eq!(record.text(IntakeField::CountyWorkerCity), contact.county_city);
        assert_eq!(record.text(IntakeField::CountyWorkerZip), contact.county_zip);

        let changed: Vec<IntakeField> = IntakeField::ALL
            .into_iter()
            .filter(|field| before.get(*field) != record.get(*field))
            .collect();
        assert_eq!(
            changed,
            vec![
                IntakeField::Office,
                IntakeField::OfficeNumber,
                IntakeField::PhoneNumber,
                IntakeField::NameOfCounty,
                IntakeField::CountyWorkerAddress,
                IntakeField::CountyWorkerCity,
                IntakeField::CountyWorkerZip,
            ],
            "office {} touched unexpected fields",
            office.label()
        );
    }
}

#[test]
fn santa_maria_is_office_201() {
    let patch = DependencyRuleEngine::new().derive(IntakeField::Office, &text("Santa Maria"), today());
    assert_eq!(patch.get(&IntakeField::OfficeNumber), Some(&text("201")));
}

#[test]
fn unknown_office_blanks_derived_fields() {
    let mut store = FieldStore::default();
    let engine = DependencyRuleEngine::new();
    engine.apply(&mut store, IntakeField::Office, text("Riverside"), today());
    engine.apply(&mut store, IntakeField::Office, text("Fresno"), today());

    assert_eq!(store.get(IntakeField::OfficeNumber), &FieldValue::blank());
    assert_eq!(store.get(IntakeField::CountyWorkerZip), &FieldValue::blank());
    assert!(!store.record().is_present(IntakeField::NameOfCounty));
}

#[test]
fn level_of_care_sets_both_payments() {
    let engine = DependencyRuleEngine::new();
    let expected = [
        ("$1,206.00", "$2,500.00"),
        ("$1,632.00", "$3,500.00"),
        ("$2,058.00", "$4,500.00"),
        ("$2,484.00", "$5,500.00"),
        ("$2,910.00", "$6,500.00"),
    ];

    for (level, (resource_parents, county)) in LevelOfCare::ordered().into_iter().zip(expected) {
        let patch = engine.derive(IntakeField::LevelOfCare, &text(level.label()), today());
        assert_eq!(patch.len(), 2);
        assert_eq!(
            patch.get(&IntakeField::ResourceParentsPayment),
            Some(&text(resource_parents))
        );
        assert_eq!(patch.get(&IntakeField::CountyWillPay), Some(&text(county)));
    }
}

#[test]
fn cleared_level_of_care_blanks_payments() {
    let patch = DependencyRuleEngine::new().derive(IntakeField::LevelOfCare, &FieldValue::Empty, today());
    assert_eq!(patch.get(&IntakeField::ResourceParentsPayment), Some(&FieldValue::blank()));
    assert_eq!(patch.get(&IntakeField::CountyWillPay), Some(&FieldValue::blank()));
}

#[test]
fn transaction_type_maps_to_single_category() {
    let engine = DependencyRuleEngine::new();
    let cases = [
        ("Intake", "Intake Paperwork"),
        ("In House Move", "In House Move"),
        ("Shelter Placement", "Shelter Bed Documents"),
        ("LOC Change", "Intake Paperwork"),
        ("Termination", "Intake Paperwork"),
        ("", "Intake Paperwork"),
    ];

    for (transaction, category) in cases {
        let patch = engine.derive(IntakeField::TypeOfTransaction, &text(transaction), today());
        assert_eq!(
            patch.get(&IntakeField::Categories),
            Some(&FieldValue::List(vec![category.to_string()])),
            "transaction {transaction:?}"
        );
    }
}

#[test]
fn birth_dates_derive_ages() {
    let engine = DependencyRuleEngine::new();
    let mut store = FieldStore::default();

    engine.apply(&mut store, IntakeField::DateOfBirth, text("2010-06-15"), today());
    engine.apply(&mut store, IntakeField::InfantDateOfBirth, text("2023-01-02"), today());

    assert_eq!(store.get(IntakeField::Age), &FieldValue::Number(13));
    assert_eq!(store.get(IntakeField::InfantAge), &FieldValue::Number(1));
}

#[test]
fn unparseable_birth_date_clears_age() {
    let engine = DependencyRuleEngine::new();
    let mut store = FieldStore::default();
    engine.apply(&mut store, IntakeField::DateOfBirth, text("2010-06-15"), today());
    engine.apply(&mut store, IntakeField::DateOfBirth, text("June 15th"), today());

    assert_eq!(store.get(IntakeField::Age), &FieldValue::blank());
    assert_eq!(store.record().text(IntakeField::DateOfBirth), "June 15th");
}

#[test]
fn reapplying_the_same_office_changes_nothing() {
    let engine = DependencyRuleEngine::new();
    let mut store = FieldStore::default();

    engine.apply(&mut store, IntakeField::Office, text("Bakersfield"), today());
    let first = store.snapshot();
    engine.apply(&mut store, IntakeField::Office, text("Bakersfield"), today());

    assert_eq!(store.snapshot(), first);
}

#[test]
fn manual_override_survives_until_trigger_changes() {
    let engine = DependencyRuleEngine::new();
    let mut store = FieldStore::default();

    engine.apply(&mut store, IntakeField::LevelOfCare, text("Level 2"), today());
    engine.apply(&mut store, IntakeField::CountyWillPay, text("$3,900.00"), today());
    assert_eq!(store.record().text(IntakeField::CountyWillPay), "$3,900.00");

    engine.apply(&mut store, IntakeField::LevelOfCare, text("Level 4"), today());
    assert_eq!(store.record().text(IntakeField::CountyWillPay), "$5,500.00");
}

#[test]
fn non_trigger_fields_do_not_cascade() {
    let engine = DependencyRuleEngine::new();
    assert!(engine
        .derive(IntakeField::OfficeNumber, &text("201"), today())
        .is_empty());
    assert!(!DependencyRuleEngine::is_trigger(IntakeField::OfficeNumber));
    assert!(DependencyRuleEngine::is_trigger(IntakeField::TypeOfTransaction));
}
