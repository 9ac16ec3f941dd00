// Form snapshot model
// Typed field names + values; serializes to the flat `form_data` JSON object the form API stores.

use crate::reference::options::OptionGroup;
use crate::utils::validation::parse_decimal;
use crate::wizard::step::Step;
use log::debug;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    // Identity
    FullName,
    Birthdate,
    Email,
    Phone,
    Gender,
    Street,
    PostalCode,
    City,
    // Travel
    Destinations,
    TravelReasons,
    TravelReasonsOther,
    Accommodation,
    Activities,
    ActivitiesOther,
    RuralStay,
    TravelComments,
    // Health
    Weight,
    ReproductiveGate,
    Pregnant,
    Breastfeeding,
    Allergy,
    AllergyDetails,
    DengueHistory,
    ChickenpoxDisease,
    ChickenpoxVaccine,
    VaccinationAdverseEvent,
    VaccinationAdverseEventDetails,
    Comorbidities,
    Chemotherapy,
    ComorbiditiesOther,
    Medication,
    MedicationList,
    // Vaccination
    NoVaccinationCard,
    PreviousVaccines,
    VaccinationComments,
    // Referral
    ReferringDoctor,
    ReferringDoctorEmail,
    ReferralSource,
    Remarks,
    // Summary
    Consent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Number,
    Choice,
    Flag,
    Multi,
    Destinations,
}

struct FieldSpec {
    wire: &'static str,
    kind: FieldKind,
    step: Step,
    group: Option<OptionGroup>,
}

const fn spec(
    wire: &'static str,
    kind: FieldKind,
    step: Step,
    group: Option<OptionGroup>,
) -> FieldSpec {
    FieldSpec {
        wire,
        kind,
        step,
        group,
    }
}

impl FieldName {
    /// Every field, in display order.
    pub const ALL: &'static [FieldName] = &[
        FieldName::FullName,
        FieldName::Birthdate,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Gender,
        FieldName::Street,
        FieldName::PostalCode,
        FieldName::City,
        FieldName::Destinations,
        FieldName::TravelReasons,
        FieldName::TravelReasonsOther,
        FieldName::Accommodation,
        FieldName::Activities,
        FieldName::ActivitiesOther,
        FieldName::RuralStay,
        FieldName::TravelComments,
        FieldName::Weight,
        FieldName::ReproductiveGate,
        FieldName::Pregnant,
        FieldName::Breastfeeding,
        FieldName::Allergy,
        FieldName::AllergyDetails,
        FieldName::DengueHistory,
        FieldName::ChickenpoxDisease,
        FieldName::ChickenpoxVaccine,
        FieldName::VaccinationAdverseEvent,
        FieldName::VaccinationAdverseEventDetails,
        FieldName::Comorbidities,
        FieldName::Chemotherapy,
        FieldName::ComorbiditiesOther,
        FieldName::Medication,
        FieldName::MedicationList,
        FieldName::NoVaccinationCard,
        FieldName::PreviousVaccines,
        FieldName::VaccinationComments,
        FieldName::ReferringDoctor,
        FieldName::ReferringDoctorEmail,
        FieldName::ReferralSource,
        FieldName::Remarks,
        FieldName::Consent,
    ];

    fn spec(self) -> FieldSpec {
        use FieldKind::*;
        use FieldName as F;
        use OptionGroup as G;
        match self {
            F::FullName => spec("full_name", Text, Step::Identity, None),
            F::Birthdate => spec("birthdate", Date, Step::Identity, None),
            F::Email => spec("email", Text, Step::Identity, None),
            F::Phone => spec("phone", Text, Step::Identity, None),
            F::Gender => spec("gender", Choice, Step::Identity, Some(G::Gender)),
            F::Street => spec("street", Text, Step::Identity, None),
            F::PostalCode => spec("postal_code", Text, Step::Identity, None),
            F::City => spec("city", Text, Step::Identity, None),
            F::Destinations => spec("destinations", Destinations, Step::Travel, None),
            F::TravelReasons => spec("travel_reasons", Multi, Step::Travel, Some(G::TravelReasons)),
            F::TravelReasonsOther => spec("travel_reasons_other", Text, Step::Travel, None),
            F::Accommodation => spec("accommodation", Multi, Step::Travel, Some(G::Accommodation)),
            F::Activities => spec("activities", Multi, Step::Travel, Some(G::Activities)),
            F::ActivitiesOther => spec("activities_other", Text, Step::Travel, None),
            F::RuralStay => spec("rural_stay", Choice, Step::Travel, Some(G::YesNo)),
            F::TravelComments => spec("travel_comments", LongText, Step::Travel, None),
            F::Weight => spec("weight", Number, Step::Health, None),
            F::ReproductiveGate => spec("reproductive_questions", Choice, Step::Health, Some(G::YesNo)),
            F::Pregnant => spec("pregnant", Choice, Step::Health, Some(G::YesNo)),
            F::Breastfeeding => spec("breastfeeding", Choice, Step::Health, Some(G::YesNo)),
            F::Allergy => spec("allergy", Choice, Step::Health, Some(G::YesNo)),
            F::AllergyDetails => spec("allergy_details", LongText, Step::Health, None),
            F::DengueHistory => spec("dengue_history", Choice, Step::Health, Some(G::YesNoUnknown)),
            F::ChickenpoxDisease => spec("chickenpox_disease", Choice, Step::Health, Some(G::YesNoUnknown)),
            F::ChickenpoxVaccine => spec("chickenpox_vaccine", Choice, Step::Health, Some(G::YesNoUnknown)),
            F::VaccinationAdverseEvent => spec("vaccination_adverse_event", Choice, Step::Health, Some(G::YesNo)),
            F::VaccinationAdverseEventDetails => spec("vaccination_adverse_event_details", LongText, Step::Health, None),
            F::Comorbidities => spec("comorbidities", Multi, Step::Health, Some(G::Comorbidities)),
            F::Chemotherapy => spec("chemotherapy", Choice, Step::Health, Some(G::YesNo)),
            F::ComorbiditiesOther => spec("comorbidities_other", Text, Step::Health, None),
            F::Medication => spec("medication", Choice, Step::Health, Some(G::YesNo)),
            F::MedicationList => spec("medication_list", LongText, Step::Health, None),
            F::NoVaccinationCard => spec("no_vaccination_card", Flag, Step::Vaccination, None),
            F::PreviousVaccines => spec("previous_vaccines", Multi, Step::Vaccination, Some(G::PreviousVaccines)),
            F::VaccinationComments => spec("vaccination_comments", LongText, Step::Vaccination, None),
            F::ReferringDoctor => spec("referring_doctor", Text, Step::Referral, None),
            F::ReferringDoctorEmail => spec("referring_doctor_email", Text, Step::Referral, None),
            F::ReferralSource => spec("referral_source", Choice, Step::Referral, Some(G::ReferralSource)),
            F::Remarks => spec("remarks", LongText, Step::Referral, None),
            F::Consent => spec("consent", Flag, Step::Summary, None),
        }
    }

    /// Key used in the `form_data` JSON object.
    pub fn wire_name(self) -> &'static str {
        self.spec().wire
    }

    pub fn from_wire(name: &str) -> Option<FieldName> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|f| f.wire_name() == name)
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn step(self) -> Step {
        self.spec().step
    }

    pub fn option_group(self) -> Option<OptionGroup> {
        self.spec().group
    }

    /// Fields of one step, in display order.
    pub fn fields_for(step: Step) -> impl Iterator<Item = FieldName> {
        FieldName::ALL
            .iter()
            .copied()
            .filter(move |f| f.step() == step)
    }
}

/// One planned trip leg. Dates are ISO `YYYY-MM-DD` strings as entered (may be empty while editing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub departure: String,
    #[serde(default, rename = "return")]
    pub return_date: String,
}

impl Destination {
    pub fn new(
        country: impl Into<String>,
        departure: impl Into<String>,
        return_date: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            departure: departure.into(),
            return_date: return_date.into(),
        }
    }

    /// Country, departure and return are all filled in.
    pub fn is_complete(&self) -> bool {
        !self.country.trim().is_empty()
            && !self.departure.trim().is_empty()
            && !self.return_date.trim().is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.country.trim().is_empty()
            && self.departure.trim().is_empty()
            && self.return_date.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Multi(Vec<String>),
    Destinations(Vec<Destination>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Flag(b) => !*b,
            FieldValue::Multi(v) => v.is_empty(),
            FieldValue::Destinations(v) => v.is_empty(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => Value::from(*n),
            FieldValue::Flag(b) => Value::Bool(*b),
            FieldValue::Multi(v) => Value::from(v.clone()),
            FieldValue::Destinations(v) => serde_json::to_value(v).unwrap_or(Value::Array(vec![])),
        }
    }
}

/// Sort codes into option-definition order, dropping duplicates and unknown codes.
pub fn normalize_multi<S: AsRef<str>>(group: OptionGroup, codes: &[S]) -> Vec<String> {
    let mut known: Vec<(usize, &'static str)> = codes
        .iter()
        .filter_map(|c| {
            let code = c.as_ref().trim();
            match group.position(code) {
                Some(pos) => Some((pos, group.codes()[pos])),
                None => {
                    debug!(
                        "[PHASE: snapshot] [STEP: normalize] Dropping unknown option '{}' for group {}",
                        code,
                        group.id()
                    );
                    None
                }
            }
        })
        .collect();
    known.sort_by_key(|(pos, _)| *pos);
    known.dedup_by_key(|(pos, _)| *pos);
    known.into_iter().map(|(_, c)| c.to_string()).collect()
}

/// Current set of form answers, keyed by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    values: BTreeMap<FieldName, FieldValue>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn set(&mut self, field: FieldName, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn remove(&mut self, field: FieldName) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(FieldValue::is_empty)
    }

    /// Text value (empty when missing or not textual).
    pub fn text(&self, field: FieldName) -> &str {
        match self.values.get(&field) {
            Some(FieldValue::Text(s)) => s.as_str(),
            _ => "",
        }
    }

    pub fn number(&self, field: FieldName) -> Option<f64> {
        match self.values.get(&field) {
            Some(FieldValue::Number(n)) => Some(*n),
            Some(FieldValue::Text(s)) => parse_decimal(s),
            _ => None,
        }
    }

    pub fn flag(&self, field: FieldName) -> bool {
        matches!(self.values.get(&field), Some(FieldValue::Flag(true)))
    }

    pub fn multi(&self, field: FieldName) -> &[String] {
        match self.values.get(&field) {
            Some(FieldValue::Multi(v)) => v.as_slice(),
            _ => &[],
        }
    }

    pub fn contains_option(&self, field: FieldName, code: &str) -> bool {
        match self.values.get(&field) {
            Some(FieldValue::Multi(v)) => v.iter().any(|c| c == code),
            Some(FieldValue::Text(s)) => s == code,
            _ => false,
        }
    }

    /// A field holds a non-empty answer.
    pub fn has_value(&self, field: FieldName) -> bool {
        self.values
            .get(&field)
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    pub fn destinations(&self) -> &[Destination] {
        match self.values.get(&FieldName::Destinations) {
            Some(FieldValue::Destinations(v)) => v.as_slice(),
            _ => &[],
        }
    }

    pub fn destinations_mut(&mut self) -> &mut Vec<Destination> {
        let entry = self
            .values
            .entry(FieldName::Destinations)
            .or_insert_with(|| FieldValue::Destinations(Vec::new()));
        if !matches!(entry, FieldValue::Destinations(_)) {
            *entry = FieldValue::Destinations(Vec::new());
        }
        match entry {
            FieldValue::Destinations(v) => v,
            _ => unreachable!("destinations entry normalized above"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Flat JSON object keyed by wire names.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.wire_name().to_string(), v.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Lenient load: unknown keys are ignored, values are coerced by field kind, values that
    /// cannot be coerced are dropped.
    pub fn from_json(value: &Value) -> FormSnapshot {
        let mut snapshot = FormSnapshot::new();
        let Some(obj) = value.as_object() else {
            debug!("[PHASE: snapshot] [STEP: load] form_data is not an object; ignoring");
            return snapshot;
        };

        for (key, raw) in obj {
            let Some(field) = FieldName::from_wire(key) else {
                debug!(
                    "[PHASE: snapshot] [STEP: load] Ignoring unknown field '{}'",
                    key
                );
                continue;
            };
            match coerce(field, raw) {
                Some(v) => snapshot.set(field, v),
                None => debug!(
                    "[PHASE: snapshot] [STEP: load] Dropping uncoercible value for '{}'",
                    key
                ),
            }
        }
        snapshot
    }
}

fn coerce(field: FieldName, raw: &Value) -> Option<FieldValue> {
    match field.kind() {
        FieldKind::Text | FieldKind::LongText | FieldKind::Date | FieldKind::Choice => match raw {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            _ => None,
        },
        FieldKind::Number => match raw {
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => parse_decimal(s).map(FieldValue::Number),
            _ => None,
        },
        FieldKind::Flag => match raw {
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            Value::Number(n) => Some(FieldValue::Flag(n.as_i64() == Some(1))),
            Value::String(s) => {
                let s = s.trim().to_ascii_lowercase();
                Some(FieldValue::Flag(matches!(
                    s.as_str(),
                    "on" | "true" | "1" | "yes"
                )))
            }
            _ => None,
        },
        FieldKind::Multi => {
            let group = field.option_group()?;
            let codes: Vec<String> = match raw {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
                _ => return None,
            };
            Some(FieldValue::Multi(normalize_multi(group, &codes)))
        }
        FieldKind::Destinations => {
            let parsed;
            let items = match raw {
                Value::Array(items) => items,
                // Some stored drafts carry the rows JSON-encoded in a string.
                Value::String(s) => {
                    parsed = serde_json::from_str::<Value>(s).ok()?;
                    parsed.as_array()?
                }
                _ => return None,
            };
            let rows = items
                .iter()
                .filter_map(|v| serde_json::from_value::<Destination>(v.clone()).ok())
                .collect();
            Some(FieldValue::Destinations(rows))
        }
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k.wire_name(), &v.to_json())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(FormSnapshot::from_json(&value))
    }
}
