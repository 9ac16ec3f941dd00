// Per-step validation
// Pure functions over a snapshot; every failure of a step is collected, nothing short-circuits.

use crate::i18n::{self, ErrorKey, Key, Language};
use crate::models::snapshot::{FieldName, FormSnapshot};
use crate::reference::options::YES;
use crate::utils::validation::{has_min_chars, is_valid_email, parse_iso_date};
use crate::wizard::step::Step;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTarget {
    Field(FieldName),
    /// The attachment area of the vaccination step.
    Attachments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub target: ErrorTarget,
    pub key: ErrorKey,
    /// Destination row, for errors on a specific trip leg.
    pub row: Option<usize>,
}

impl FieldError {
    pub fn message(&self, lang: Language) -> String {
        i18n::t(lang, Key::Error(self.key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, key: ErrorKey) -> bool {
        self.errors.iter().any(|e| e.key == key)
    }

    pub fn for_target(&self, target: ErrorTarget) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.target == target)
    }

    pub fn for_field(&self, field: FieldName) -> impl Iterator<Item = &FieldError> {
        self.for_target(ErrorTarget::Field(field))
    }

    fn field(&mut self, field: FieldName, key: ErrorKey) {
        self.errors.push(FieldError {
            target: ErrorTarget::Field(field),
            key,
            row: None,
        });
    }

    fn row(&mut self, row: usize, key: ErrorKey) {
        self.errors.push(FieldError {
            target: ErrorTarget::Field(FieldName::Destinations),
            key,
            row: Some(row),
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub today: NaiveDate,
    pub attachment_count: usize,
}

pub fn validate_step(step: Step, snapshot: &FormSnapshot, ctx: &ValidationContext) -> ValidationReport {
    let mut report = ValidationReport::default();
    match step {
        Step::Identity => validate_identity(snapshot, ctx, &mut report),
        Step::Travel => validate_travel(snapshot, &mut report),
        Step::Health => validate_health(snapshot, &mut report),
        Step::Vaccination => {
            if !snapshot.flag(FieldName::NoVaccinationCard) && ctx.attachment_count == 0 {
                report.errors.push(FieldError {
                    target: ErrorTarget::Attachments,
                    key: ErrorKey::VaccinationRequired,
                    row: None,
                });
            }
        }
        Step::Referral => {}
        Step::Summary => {
            if !snapshot.flag(FieldName::Consent) {
                report.field(FieldName::Consent, ErrorKey::ConsentRequired);
            }
        }
    }
    report
}

/// First failing step, in order, with its report.
pub fn first_invalid_step(
    snapshot: &FormSnapshot,
    ctx: &ValidationContext,
) -> Option<(Step, ValidationReport)> {
    Step::ALL.iter().find_map(|s| {
        let report = validate_step(*s, snapshot, ctx);
        (!report.is_valid()).then_some((*s, report))
    })
}

/// A choice field holds one of its group's codes.
fn answered(snapshot: &FormSnapshot, field: FieldName) -> bool {
    let value = snapshot.text(field);
    match field.option_group() {
        Some(group) => group.canonical(value).is_some(),
        None => !value.trim().is_empty(),
    }
}

fn require_answer(snapshot: &FormSnapshot, field: FieldName, report: &mut ValidationReport) {
    if !answered(snapshot, field) {
        report.field(field, ErrorKey::Required);
    }
}

/// Yes/no question whose "yes" requires a free-text detail.
fn require_answer_with_detail(
    snapshot: &FormSnapshot,
    question: FieldName,
    detail: FieldName,
    report: &mut ValidationReport,
) {
    if !answered(snapshot, question) {
        report.field(question, ErrorKey::Required);
    } else if snapshot.text(question) == YES && snapshot.text(detail).trim().is_empty() {
        report.field(detail, ErrorKey::DetailsRequired);
    }
}

fn require_selection(snapshot: &FormSnapshot, field: FieldName, report: &mut ValidationReport) {
    if snapshot.multi(field).is_empty() {
        report.field(field, ErrorKey::SelectAtLeastOne);
    }
}

fn validate_identity(snapshot: &FormSnapshot, ctx: &ValidationContext, report: &mut ValidationReport) {
    let name = snapshot.text(FieldName::FullName);
    if name.trim().is_empty() {
        report.field(FieldName::FullName, ErrorKey::Required);
    } else if !has_min_chars(name, 2) {
        report.field(FieldName::FullName, ErrorKey::NameTooShort);
    }

    let birthdate = snapshot.text(FieldName::Birthdate);
    if birthdate.trim().is_empty() {
        report.field(FieldName::Birthdate, ErrorKey::Required);
    } else {
        match parse_iso_date(birthdate) {
            None => report.field(FieldName::Birthdate, ErrorKey::InvalidDate),
            Some(d) if d > ctx.today => report.field(FieldName::Birthdate, ErrorKey::BirthdateInFuture),
            Some(_) => {}
        }
    }

    let email = snapshot.text(FieldName::Email);
    if email.trim().is_empty() {
        report.field(FieldName::Email, ErrorKey::Required);
    } else if !is_valid_email(email) {
        report.field(FieldName::Email, ErrorKey::InvalidEmail);
    }

    require_answer(snapshot, FieldName::Gender, report);
}

fn validate_travel(snapshot: &FormSnapshot, report: &mut ValidationReport) {
    let mut complete_rows = 0usize;
    for (i, row) in snapshot.destinations().iter().enumerate() {
        // Partially filled rows are ignored.
        if !row.is_complete() {
            continue;
        }
        complete_rows += 1;
        match (parse_iso_date(&row.departure), parse_iso_date(&row.return_date)) {
            (Some(dep), Some(ret)) => {
                if dep > ret {
                    report.row(i, ErrorKey::DepartureAfterReturn);
                }
            }
            _ => report.row(i, ErrorKey::InvalidDate),
        }
    }
    if complete_rows == 0 {
        report.field(FieldName::Destinations, ErrorKey::DestinationRequired);
    }

    require_selection(snapshot, FieldName::TravelReasons, report);
    require_selection(snapshot, FieldName::Accommodation, report);
    require_selection(snapshot, FieldName::Activities, report);
    require_answer(snapshot, FieldName::RuralStay, report);
}

fn validate_health(snapshot: &FormSnapshot, report: &mut ValidationReport) {
    match snapshot.number(FieldName::Weight) {
        None => report.field(FieldName::Weight, ErrorKey::Required),
        Some(w) if w <= 0.0 => report.field(FieldName::Weight, ErrorKey::WeightPositive),
        Some(_) => {}
    }

    require_answer_with_detail(snapshot, FieldName::Allergy, FieldName::AllergyDetails, report);
    require_answer(snapshot, FieldName::DengueHistory, report);
    require_answer(snapshot, FieldName::ChickenpoxDisease, report);
    require_answer(snapshot, FieldName::ChickenpoxVaccine, report);
    require_answer_with_detail(
        snapshot,
        FieldName::VaccinationAdverseEvent,
        FieldName::VaccinationAdverseEventDetails,
        report,
    );
    require_selection(snapshot, FieldName::Comorbidities, report);
    require_answer_with_detail(snapshot, FieldName::Medication, FieldName::MedicationList, report);
}
