// Option groups for choice and multi-select fields
// Codes are the stable values sent to the form API; labels live in the i18n catalogs
// under `options.<group>.<code>`.

use crate::models::snapshot::FieldName;
use crate::reference::vaccines;

/// Code of the exclusive "none of the above" option in multi-select groups.
pub const NONE_CODE: &str = "none";

pub const YES: &str = "yes";
pub const NO: &str = "no";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionGroup {
    Gender,
    YesNo,
    YesNoUnknown,
    TravelReasons,
    Accommodation,
    Activities,
    Comorbidities,
    PreviousVaccines,
    ReferralSource,
}

impl OptionGroup {
    pub fn id(self) -> &'static str {
        match self {
            OptionGroup::Gender => "gender",
            OptionGroup::YesNo => "yes_no",
            OptionGroup::YesNoUnknown => "yes_no_unknown",
            OptionGroup::TravelReasons => "travel_reasons",
            OptionGroup::Accommodation => "accommodation",
            OptionGroup::Activities => "activities",
            OptionGroup::Comorbidities => "comorbidities",
            OptionGroup::PreviousVaccines => "previous_vaccines",
            OptionGroup::ReferralSource => "referral_source",
        }
    }

    pub fn codes(self) -> &'static [&'static str] {
        match self {
            OptionGroup::Gender => &["male", "female", "other"],
            OptionGroup::YesNo => &[YES, NO],
            OptionGroup::YesNoUnknown => &[YES, NO, "unknown"],
            OptionGroup::TravelReasons => &[
                "tourism",
                "business",
                "visiting_relatives",
                "humanitarian",
                "studies",
                "other",
            ],
            OptionGroup::Accommodation => &[
                "hotel",
                "hostel",
                "camping",
                "local_family",
                "rental",
                "other",
            ],
            OptionGroup::Activities => &[
                NONE_CODE,
                "hiking",
                "high_altitude",
                "diving",
                "water_sports",
                "animal_contact",
                "caving",
                "healthcare_work",
                "other",
            ],
            OptionGroup::Comorbidities => &[
                NONE_CODE,
                "diabetes",
                "heart_disease",
                "lung_disease",
                "kidney_disease",
                "liver_disease",
                "hiv",
                "cancer",
                "autoimmune",
                "immunosuppression",
                "asplenia",
                "other",
            ],
            OptionGroup::PreviousVaccines => vaccines::VACCINE_CODES,
            OptionGroup::ReferralSource => &["doctor", "website", "friend", "employer", "other"],
        }
    }

    /// The "none of the above" code, for groups that have one.
    pub fn exclusive_code(self) -> Option<&'static str> {
        self.codes().iter().copied().find(|c| *c == NONE_CODE)
    }

    /// Canonical `'static` code for a user/server supplied value.
    pub fn canonical(self, code: &str) -> Option<&'static str> {
        self.codes().iter().copied().find(|c| *c == code)
    }

    pub fn position(self, code: &str) -> Option<usize> {
        self.codes().iter().position(|c| *c == code)
    }
}

/// A question that only shows up when `trigger` holds `code`.
#[derive(Debug, Clone, Copy)]
pub struct DependentQuestion {
    pub trigger: FieldName,
    pub code: &'static str,
    pub dependent: FieldName,
}

pub const DEPENDENT_QUESTIONS: &[DependentQuestion] = &[
    DependentQuestion {
        trigger: FieldName::TravelReasons,
        code: "other",
        dependent: FieldName::TravelReasonsOther,
    },
    DependentQuestion {
        trigger: FieldName::Activities,
        code: "other",
        dependent: FieldName::ActivitiesOther,
    },
    DependentQuestion {
        trigger: FieldName::Comorbidities,
        code: "cancer",
        dependent: FieldName::Chemotherapy,
    },
    DependentQuestion {
        trigger: FieldName::Comorbidities,
        code: "other",
        dependent: FieldName::ComorbiditiesOther,
    },
    DependentQuestion {
        trigger: FieldName::Allergy,
        code: YES,
        dependent: FieldName::AllergyDetails,
    },
    DependentQuestion {
        trigger: FieldName::VaccinationAdverseEvent,
        code: YES,
        dependent: FieldName::VaccinationAdverseEventDetails,
    },
    DependentQuestion {
        trigger: FieldName::Medication,
        code: YES,
        dependent: FieldName::MedicationList,
    },
];

pub fn dependents_of(trigger: FieldName) -> impl Iterator<Item = &'static DependentQuestion> {
    DEPENDENT_QUESTIONS
        .iter()
        .filter(move |d| d.trigger == trigger)
}

pub fn trigger_of(dependent: FieldName) -> Option<&'static DependentQuestion> {
    DEPENDENT_QUESTIONS.iter().find(|d| d.dependent == dependent)
}
