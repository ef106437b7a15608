use crate::infra::{parse_date, parse_level_of_care, parse_office, InMemoryIntakeRecords};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use placement_intake::config::IntakeSettings;
use placement_intake::error::AppError;
use placement_intake::workflows::intake::rules::{document_category, office_contact, payment_rates};
use placement_intake::workflows::intake::{
    Advance, ClientStatus, FieldValue, Gender, Identity, IntakeError, IntakeField, IntakeRecord,
    IntakeRecordApi, IntakeSession, LevelOfCare, MissingFields, Office, RecordId, TransactionType,
    WizardStep,
};
use std::time::Instant;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Office handling the placement (defaults to Santa Maria)
    #[arg(long, value_parser = parse_office)]
    pub(crate) office: Option<Office>,
    /// Level of care applied during the edit pass (defaults to Level 3)
    #[arg(long, value_parser = parse_level_of_care)]
    pub(crate) level_of_care: Option<LevelOfCare>,
    /// Override the intake date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let settings = IntakeSettings::default();
    let records = InMemoryIntakeRecords::default();
    let identity = Identity {
        user_id: "demo-intake".to_string(),
        display_name: "Demo Intake Coordinator".to_string(),
    };

    println!("== New intake ({today})");
    let mut session = IntakeSession::create(Some(&identity), &settings, today);
    let mut now = Instant::now();
    if let Some(office) = args.office {
        session.input(IntakeField::Office, office.label().into(), today, now)?;
    }
    print_status(&session);

    now = walk_to_review(&mut session, &records, &identity, &settings, now)?;
    match session.next(&records, Some(&identity), now, Utc::now()) {
        Err(IntakeError::Validation(err)) => {
            println!("Submission blocked:");
            print_missing(&err.missing);
        }
        Ok(outcome) => println!("Unexpected outcome for an incomplete draft: {outcome:?}"),
        Err(err) => return Err(err.into()),
    }

    let client = [
        (IntakeField::CaseNumber, "DEMO-0001"),
        (IntakeField::Name, "Jordan Reyes"),
        (IntakeField::DateOfBirth, "2011-03-09"),
        (IntakeField::Gender, "Male"),
        (IntakeField::ReasonForPlacement, "Emergency shelter placement"),
        (IntakeField::CountyWorkerName, "Alex Kim"),
    ];
    for (field, value) in client {
        session.input(field, FieldValue::text(value), today, now)?;
    }
    print_status(&session);

    let record_id = submit(&mut session, &records, &identity, &settings, now)?;
    println!("Created {record_id}");

    println!();
    println!("== Edit {record_id}");
    let level = args.level_of_care.unwrap_or(LevelOfCare::Level3);
    let mut session = IntakeSession::load(&records, record_id.clone(), &settings)?;
    let now = Instant::now();
    session.input(IntakeField::LevelOfCare, level.label().into(), today, now)?;
    session.input(
        IntakeField::TypeOfTransaction,
        TransactionType::LocChange.label().into(),
        today,
        now,
    )?;
    print_status(&session);

    let updated = submit(&mut session, &records, &identity, &settings, now)?;
    println!("Updated {updated}");

    let stored = records_snapshot(&records, &updated)?;
    print_record(&stored);
    Ok(())
}

pub(crate) fn print_tables() {
    println!("Offices");
    for office in Office::ordered() {
        let contact = office_contact(office);
        println!(
            "  {:<15} #{}  {}  {}, {}, {} {}",
            office.label(),
            contact.office_number,
            contact.phone_number,
            contact.county,
            contact.county_address,
            contact.county_city,
            contact.county_zip,
        );
    }

    println!("Levels of care");
    for level in LevelOfCare::ordered() {
        let rates = payment_rates(level);
        println!(
            "  {:<8} resource parents {:>10}  county {:>10}",
            level.label(),
            rates.resource_parents,
            rates.county
        );
    }

    println!("Document categories");
    for transaction in TransactionType::ordered() {
        println!(
            "  {:<18} {}",
            transaction.label(),
            document_category(Some(transaction)).label()
        );
    }
    println!("  {:<18} {}", "(none)", document_category(None).label());

    let genders: Vec<_> = Gender::ordered().iter().map(|gender| gender.label()).collect();
    println!("Genders: {}", genders.join(", "));

    let statuses: Vec<_> = ClientStatus::ordered()
        .iter()
        .map(|status| status.code().to_string())
        .collect();
    println!("Client status codes: {}", statuses.join(", "));
}

fn walk_to_review(
    session: &mut IntakeSession,
    records: &InMemoryIntakeRecords,
    identity: &Identity,
    settings: &IntakeSettings,
    mut now: Instant,
) -> Result<Instant, AppError> {
    while session.step() != Some(WizardStep::Review) {
        if let Advance::Moving { target } = session.next(records, Some(identity), now, Utc::now())? {
            now += settings.validating_delay;
            session.poll(now);
            println!("  -> {}", target.label());
        }
    }
    Ok(now)
}

/// Keep pressing "next" until the record is handed to the store.
fn submit(
    session: &mut IntakeSession,
    records: &InMemoryIntakeRecords,
    identity: &Identity,
    settings: &IntakeSettings,
    mut now: Instant,
) -> Result<RecordId, AppError> {
    loop {
        match session.next(records, Some(identity), now, Utc::now())? {
            Advance::Submitted { record_id } => return Ok(record_id),
            Advance::Moving { target } => {
                now += settings.validating_delay;
                session.poll(now);
                println!("  -> {}", target.label());
            }
        }
    }
}

fn records_snapshot(
    records: &InMemoryIntakeRecords,
    record_id: &RecordId,
) -> Result<IntakeRecord, AppError> {
    records
        .get(record_id)
        .map_err(|err| IntakeError::Load(err).into())
}

fn print_status(session: &IntakeSession) {
    println!(
        "Progress {}% | office {} #{} | payment {} | categories {}",
        session.progress(),
        session.record().text(IntakeField::Office),
        session.record().text(IntakeField::OfficeNumber),
        session.record().text(IntakeField::ResourceParentsPayment),
        match session.record().get(IntakeField::Categories) {
            FieldValue::List(items) => items.join(", "),
            other => other.as_text().unwrap_or("-").to_string(),
        }
    );
    let missing = session.missing_fields();
    if !missing.is_empty() {
        print_missing(&missing);
    }
}

fn print_missing(missing: &MissingFields) {
    for badge in missing.badges() {
        println!(
            "  [{}] {}",
            badge.section_label,
            badge.labels.join(", ")
        );
    }
}

fn print_record(record: &IntakeRecord) {
    for (field, value) in record.iter() {
        let rendered = match value {
            FieldValue::Empty => continue,
            FieldValue::Flag(flag) => flag.to_string(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
        };
        println!("  {:<24} {}", field.key(), rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_end_to_end() {
        let args = DemoArgs {
            office: Some(Office::Bakersfield),
            level_of_care: Some(LevelOfCare::Level4),
            today: NaiveDate::from_ymd_opt(2024, 6, 14),
        };
        run_demo(args).expect("demo completes");
    }
}
