// Conditional field visibility
// Derived from the snapshot alone, so a restored draft shows exactly the questions its answers imply.

use crate::models::snapshot::{normalize_multi, FieldKind, FieldName, FieldValue, FormSnapshot};
use crate::reference::options::{self, YES};
use crate::wizard::step::Step;
use log::debug;

const FEMALE: &str = "female";
const OTHER: &str = "other";

pub fn is_visible(field: FieldName, snapshot: &FormSnapshot) -> bool {
    let gender = snapshot.text(FieldName::Gender);
    match field {
        FieldName::ReproductiveGate => gender == OTHER,
        FieldName::Pregnant | FieldName::Breastfeeding => match gender {
            FEMALE => true,
            OTHER => snapshot.text(FieldName::ReproductiveGate) == YES,
            _ => false,
        },
        _ => match options::trigger_of(field) {
            Some(dep) => {
                is_visible(dep.trigger, snapshot) && snapshot.contains_option(dep.trigger, dep.code)
            }
            None => true,
        },
    }
}

/// Visible fields of a step, in display order.
pub fn visible_fields(step: Step, snapshot: &FormSnapshot) -> Vec<FieldName> {
    FieldName::fields_for(step)
        .filter(|f| is_visible(*f, snapshot))
        .collect()
}

/// Drop answers of fields that are no longer shown. Returns the cleared fields.
pub fn prune_hidden(snapshot: &mut FormSnapshot) -> Vec<FieldName> {
    let hidden: Vec<FieldName> = snapshot
        .iter()
        .map(|(f, _)| f)
        .filter(|f| !is_visible(*f, snapshot))
        .collect();
    for f in &hidden {
        snapshot.remove(*f);
        debug!(
            "[PHASE: visibility] [STEP: prune] Cleared hidden field {}",
            f.wire_name()
        );
    }
    hidden
}

/// Toggle one option of a multi-select field.
///
/// Checking the group's `none` option clears its siblings; checking anything else
/// unchecks `none`. Dependents of options that end up unchecked are cleared.
/// Returns false for non multi-select fields and unknown codes.
pub fn toggle_option(snapshot: &mut FormSnapshot, field: FieldName, code: &str) -> bool {
    if field.kind() != FieldKind::Multi {
        return false;
    }
    let Some(group) = field.option_group() else {
        return false;
    };
    let Some(code) = group.canonical(code) else {
        return false;
    };

    let mut selected: Vec<String> = snapshot.multi(field).to_vec();
    if selected.iter().any(|c| c == code) {
        selected.retain(|c| c != code);
    } else if Some(code) == group.exclusive_code() {
        selected = vec![code.to_string()];
    } else {
        if let Some(none) = group.exclusive_code() {
            selected.retain(|c| c != none);
        }
        selected.push(code.to_string());
    }

    let normalized = normalize_multi(group, &selected);
    if normalized.is_empty() {
        snapshot.remove(field);
    } else {
        snapshot.set(field, FieldValue::Multi(normalized));
    }
    prune_hidden(snapshot);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::options::NONE_CODE;

    fn with_gender(g: &str) -> FormSnapshot {
        let mut s = FormSnapshot::new();
        s.set(FieldName::Gender, FieldValue::Text(g.to_string()));
        s
    }

    #[test]
    fn male_hides_reproductive_questions() {
        let s = with_gender("male");
        assert!(!is_visible(FieldName::Pregnant, &s));
        assert!(!is_visible(FieldName::Breastfeeding, &s));
        assert!(!is_visible(FieldName::ReproductiveGate, &s));
    }

    #[test]
    fn female_shows_questions_directly() {
        let s = with_gender("female");
        assert!(is_visible(FieldName::Pregnant, &s));
        assert!(is_visible(FieldName::Breastfeeding, &s));
        assert!(!is_visible(FieldName::ReproductiveGate, &s));
    }

    #[test]
    fn other_shows_questions_behind_gate() {
        let mut s = with_gender("other");
        assert!(is_visible(FieldName::ReproductiveGate, &s));
        assert!(!is_visible(FieldName::Pregnant, &s));

        s.set(FieldName::ReproductiveGate, FieldValue::Text("yes".into()));
        assert!(is_visible(FieldName::Pregnant, &s));
        assert!(is_visible(FieldName::Breastfeeding, &s));

        s.set(FieldName::ReproductiveGate, FieldValue::Text("no".into()));
        assert!(!is_visible(FieldName::Pregnant, &s));
    }

    #[test]
    fn no_gender_hides_everything_reproductive() {
        let s = FormSnapshot::new();
        let health = visible_fields(Step::Health, &s);
        assert!(!health.contains(&FieldName::Pregnant));
        assert!(!health.contains(&FieldName::ReproductiveGate));
        assert!(health.contains(&FieldName::Weight));
        assert!(!health.contains(&FieldName::AllergyDetails));
    }

    #[test]
    fn yes_answers_reveal_detail_fields() {
        let mut s = FormSnapshot::new();
        s.set(FieldName::Allergy, FieldValue::Text("yes".into()));
        s.set(FieldName::Medication, FieldValue::Text("no".into()));
        assert!(is_visible(FieldName::AllergyDetails, &s));
        assert!(!is_visible(FieldName::MedicationList, &s));
    }

    #[test]
    fn implying_option_unchecks_none_and_reveals_dependent() {
        let mut s = FormSnapshot::new();
        assert!(toggle_option(&mut s, FieldName::Comorbidities, NONE_CODE));
        assert_eq!(s.multi(FieldName::Comorbidities), &["none".to_string()]);

        assert!(toggle_option(&mut s, FieldName::Comorbidities, "cancer"));
        assert_eq!(s.multi(FieldName::Comorbidities), &["cancer".to_string()]);
        assert!(is_visible(FieldName::Chemotherapy, &s));
    }

    #[test]
    fn none_clears_siblings_and_their_details() {
        let mut s = FormSnapshot::new();
        toggle_option(&mut s, FieldName::Comorbidities, "cancer");
        toggle_option(&mut s, FieldName::Comorbidities, "other");
        s.set(FieldName::Chemotherapy, FieldValue::Text("yes".into()));
        s.set(FieldName::ComorbiditiesOther, FieldValue::Text("Asthma".into()));

        toggle_option(&mut s, FieldName::Comorbidities, NONE_CODE);

        assert_eq!(s.multi(FieldName::Comorbidities), &["none".to_string()]);
        assert!(!s.has_value(FieldName::Chemotherapy));
        assert!(!s.has_value(FieldName::ComorbiditiesOther));
        assert!(!is_visible(FieldName::Chemotherapy, &s));
    }

    #[test]
    fn unchecking_trigger_clears_dependent() {
        let mut s = FormSnapshot::new();
        toggle_option(&mut s, FieldName::TravelReasons, "tourism");
        toggle_option(&mut s, FieldName::TravelReasons, "other");
        s.set(FieldName::TravelReasonsOther, FieldValue::Text("Wedding".into()));

        toggle_option(&mut s, FieldName::TravelReasons, "other");
        assert_eq!(s.multi(FieldName::TravelReasons), &["tourism".to_string()]);
        assert!(!s.has_value(FieldName::TravelReasonsOther));
    }

    #[test]
    fn selection_stays_in_definition_order() {
        let mut s = FormSnapshot::new();
        toggle_option(&mut s, FieldName::Activities, "diving");
        toggle_option(&mut s, FieldName::Activities, "hiking");
        assert_eq!(
            s.multi(FieldName::Activities),
            &["hiking".to_string(), "diving".to_string()]
        );
        toggle_option(&mut s, FieldName::Activities, "hiking");
        toggle_option(&mut s, FieldName::Activities, "diving");
        assert!(!s.has_value(FieldName::Activities));
    }

    #[test]
    fn toggle_rejects_unknown_codes_and_non_multi_fields() {
        let mut s = FormSnapshot::new();
        assert!(!toggle_option(&mut s, FieldName::Activities, "skydiving"));
        assert!(!toggle_option(&mut s, FieldName::Gender, "male"));
        assert!(s.is_empty());
    }

    #[test]
    fn prune_clears_answers_hidden_by_gender_change() {
        let mut s = with_gender("female");
        s.set(FieldName::Pregnant, FieldValue::Text("no".into()));
        s.set(FieldName::Gender, FieldValue::Text("male".into()));
        let cleared = prune_hidden(&mut s);
        assert_eq!(cleared, vec![FieldName::Pregnant]);
    }
}
