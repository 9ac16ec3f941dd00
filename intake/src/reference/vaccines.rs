// Vaccine schedules
// Primary series as day offsets from the first dose, plus booster policy.

use crate::i18n::{self, Key, Language, UiKey};
use crate::reference::options::OptionGroup;

pub const VACCINE_CODES: &[&str] = &[
    "yellow_fever",
    "hepatitis_a",
    "hepatitis_b",
    "typhoid",
    "rabies",
    "japanese_encephalitis",
    "tick_borne_encephalitis",
    "meningococcal_acwy",
    "cholera",
    "dengue",
    "dtpa",
    "polio",
    "mmr",
    "varicella",
    "influenza",
    "covid19",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaccineSchedule {
    pub code: &'static str,
    /// Day offset of each dose of the primary series (first dose = 0).
    pub dose_days: &'static [u32],
    pub booster_years: Option<u32>,
    pub lifelong: bool,
}

pub const SCHEDULES: &[VaccineSchedule] = &[
    VaccineSchedule {
        code: "yellow_fever",
        dose_days: &[0],
        booster_years: None,
        lifelong: true,
    },
    VaccineSchedule {
        code: "hepatitis_a",
        dose_days: &[0, 180],
        booster_years: None,
        lifelong: true,
    },
    VaccineSchedule {
        code: "hepatitis_b",
        dose_days: &[0, 30, 180],
        booster_years: None,
        lifelong: true,
    },
    VaccineSchedule {
        code: "typhoid",
        dose_days: &[0],
        booster_years: Some(3),
        lifelong: false,
    },
    VaccineSchedule {
        code: "rabies",
        dose_days: &[0, 7],
        booster_years: None,
        lifelong: false,
    },
    VaccineSchedule {
        code: "japanese_encephalitis",
        dose_days: &[0, 28],
        booster_years: Some(2),
        lifelong: false,
    },
    VaccineSchedule {
        code: "tick_borne_encephalitis",
        dose_days: &[0, 30, 270],
        booster_years: Some(10),
        lifelong: false,
    },
    VaccineSchedule {
        code: "meningococcal_acwy",
        dose_days: &[0],
        booster_years: Some(5),
        lifelong: false,
    },
    VaccineSchedule {
        code: "cholera",
        dose_days: &[0, 7],
        booster_years: Some(2),
        lifelong: false,
    },
    VaccineSchedule {
        code: "dengue",
        dose_days: &[0, 90],
        booster_years: None,
        lifelong: false,
    },
    VaccineSchedule {
        code: "dtpa",
        dose_days: &[0],
        booster_years: Some(10),
        lifelong: false,
    },
    VaccineSchedule {
        code: "polio",
        dose_days: &[0],
        booster_years: Some(10),
        lifelong: false,
    },
    VaccineSchedule {
        code: "mmr",
        dose_days: &[0, 30],
        booster_years: None,
        lifelong: true,
    },
    VaccineSchedule {
        code: "varicella",
        dose_days: &[0, 30],
        booster_years: None,
        lifelong: true,
    },
    VaccineSchedule {
        code: "influenza",
        dose_days: &[0],
        booster_years: Some(1),
        lifelong: false,
    },
    VaccineSchedule {
        code: "covid19",
        dose_days: &[0],
        booster_years: Some(1),
        lifelong: false,
    },
];

pub fn schedule(code: &str) -> Option<&'static VaccineSchedule> {
    SCHEDULES.iter().find(|s| s.code == code)
}

impl VaccineSchedule {
    pub fn dose_count(&self) -> usize {
        self.dose_days.len()
    }

    /// Localized vaccine name.
    pub fn name(&self, lang: Language) -> String {
        i18n::t(lang, Key::Option(OptionGroup::PreviousVaccines, self.code))
    }

    /// Localized one-line description, e.g. "3 doses (days 0, 30, 180), lifelong protection".
    pub fn describe(&self, lang: Language) -> String {
        let days = self
            .dose_days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = i18n::t_args(
            lang,
            Key::Ui(UiKey::ScheduleDoses),
            &[("count", self.dose_count().to_string()), ("days", days)],
        );

        if let Some(years) = self.booster_years {
            out.push_str(", ");
            out.push_str(&i18n::t_args(
                lang,
                Key::Ui(UiKey::ScheduleBooster),
                &[("years", years.to_string())],
            ));
        } else if self.lifelong {
            out.push_str(", ");
            out.push_str(&i18n::t(lang, Key::Ui(UiKey::ScheduleLifelong)));
        }
        out
    }
}
