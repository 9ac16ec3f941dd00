//! Localization service.
//!
//! Keys are typed (`Key`) and map onto dotted paths (`errors.invalid_email`,
//! `fields.full_name`, `options.comorbidities.cancer`). Lookup order:
//! requested language, then the default language (French), then the dotted path itself.
//! A path that resolves nowhere is logged once per process.

mod de;
mod en;
mod fr;
mod it;

use crate::models::snapshot::FieldName;
use crate::reference::options::OptionGroup;
use crate::wizard::step::Step;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Fr,
    En,
    De,
    It,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Fr, Language::En, Language::De, Language::It];
    pub const DEFAULT: Language = Language::Fr;

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::De => "de",
            Language::It => "it",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "English",
            Language::De => "Deutsch",
            Language::It => "Italiano",
        }
    }

    /// Parse `fr`, `de-CH`, `it_IT`, ... (case-insensitive).
    pub fn parse(value: &str) -> Option<Language> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        Language::ALL.iter().copied().find(|l| l.code() == lang)
    }

    /// Next language in the selector cycle.
    pub fn next(self) -> Language {
        let idx = Language::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Language::ALL[(idx + 1) % Language::ALL.len()]
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Language::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported language '{}'", raw)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    AppTitle,
    Back,
    Next,
    Submit,
    Cancel,
    Close,
    StepOf,
    DraftSaved,
    Submitting,
    SubmittedTitle,
    SubmittedBody,
    SubmitFailed,
    AccessDenied,
    ValidationFailed,
    Yes,
    No,
    AddDestination,
    RemoveDestination,
    Country,
    Departure,
    Return,
    SearchCountry,
    NoResults,
    AttachHint,
    AttachedFiles,
    NoFiles,
    SummaryEmpty,
    ConsentText,
    Language,
    Help,
    ConfirmCancelTitle,
    ConfirmCancelBody,
    ScheduleDoses,
    ScheduleBooster,
    ScheduleLifelong,
}

impl UiKey {
    pub fn as_str(self) -> &'static str {
        match self {
            UiKey::AppTitle => "app_title",
            UiKey::Back => "back",
            UiKey::Next => "next",
            UiKey::Submit => "submit",
            UiKey::Cancel => "cancel",
            UiKey::Close => "close",
            UiKey::StepOf => "step_of",
            UiKey::DraftSaved => "draft_saved",
            UiKey::Submitting => "submitting",
            UiKey::SubmittedTitle => "submitted_title",
            UiKey::SubmittedBody => "submitted_body",
            UiKey::SubmitFailed => "submit_failed",
            UiKey::AccessDenied => "access_denied",
            UiKey::ValidationFailed => "validation_failed",
            UiKey::Yes => "yes",
            UiKey::No => "no",
            UiKey::AddDestination => "add_destination",
            UiKey::RemoveDestination => "remove_destination",
            UiKey::Country => "country",
            UiKey::Departure => "departure",
            UiKey::Return => "return",
            UiKey::SearchCountry => "search_country",
            UiKey::NoResults => "no_results",
            UiKey::AttachHint => "attach_hint",
            UiKey::AttachedFiles => "attached_files",
            UiKey::NoFiles => "no_files",
            UiKey::SummaryEmpty => "summary_empty",
            UiKey::ConsentText => "consent_text",
            UiKey::Language => "language",
            UiKey::Help => "help",
            UiKey::ConfirmCancelTitle => "confirm_cancel_title",
            UiKey::ConfirmCancelBody => "confirm_cancel_body",
            UiKey::ScheduleDoses => "schedule_doses",
            UiKey::ScheduleBooster => "schedule_booster",
            UiKey::ScheduleLifelong => "schedule_lifelong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    Required,
    NameTooShort,
    InvalidDate,
    BirthdateInFuture,
    InvalidEmail,
    DestinationRequired,
    DepartureAfterReturn,
    SelectAtLeastOne,
    WeightPositive,
    DetailsRequired,
    VaccinationRequired,
    ConsentRequired,
    TooManyFiles,
    FileTooLarge,
    FileTypeNotAllowed,
    FileUnreadable,
    MissingToken,
}

impl ErrorKey {
    pub const ALL: [ErrorKey; 17] = [
        ErrorKey::Required,
        ErrorKey::NameTooShort,
        ErrorKey::InvalidDate,
        ErrorKey::BirthdateInFuture,
        ErrorKey::InvalidEmail,
        ErrorKey::DestinationRequired,
        ErrorKey::DepartureAfterReturn,
        ErrorKey::SelectAtLeastOne,
        ErrorKey::WeightPositive,
        ErrorKey::DetailsRequired,
        ErrorKey::VaccinationRequired,
        ErrorKey::ConsentRequired,
        ErrorKey::TooManyFiles,
        ErrorKey::FileTooLarge,
        ErrorKey::FileTypeNotAllowed,
        ErrorKey::FileUnreadable,
        ErrorKey::MissingToken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKey::Required => "required",
            ErrorKey::NameTooShort => "name_too_short",
            ErrorKey::InvalidDate => "invalid_date",
            ErrorKey::BirthdateInFuture => "birthdate_in_future",
            ErrorKey::InvalidEmail => "invalid_email",
            ErrorKey::DestinationRequired => "destination_required",
            ErrorKey::DepartureAfterReturn => "departure_after_return",
            ErrorKey::SelectAtLeastOne => "select_at_least_one",
            ErrorKey::WeightPositive => "weight_positive",
            ErrorKey::DetailsRequired => "details_required",
            ErrorKey::VaccinationRequired => "vaccination_required",
            ErrorKey::ConsentRequired => "consent_required",
            ErrorKey::TooManyFiles => "too_many_files",
            ErrorKey::FileTooLarge => "file_too_large",
            ErrorKey::FileTypeNotAllowed => "file_type_not_allowed",
            ErrorKey::FileUnreadable => "file_unreadable",
            ErrorKey::MissingToken => "missing_token",
        }
    }
}

/// Typed translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Ui(UiKey),
    Step(Step),
    Field(FieldName),
    Option(OptionGroup, &'static str),
    Error(ErrorKey),
}

impl Key {
    /// Dotted catalog path.
    pub fn path(&self) -> String {
        match self {
            Key::Ui(k) => format!("ui.{}", k.as_str()),
            Key::Step(s) => format!("steps.{}", s.as_id()),
            Key::Field(f) => format!("fields.{}", f.wire_name()),
            Key::Option(g, code) => format!("options.{}.{}", g.id(), code),
            Key::Error(e) => format!("errors.{}", e.as_str()),
        }
    }
}

type Catalog = HashMap<&'static str, &'static str>;

static CATALOGS: OnceLock<HashMap<Language, Catalog>> = OnceLock::new();
static MISSING_LOGGED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

fn catalogs() -> &'static HashMap<Language, Catalog> {
    CATALOGS.get_or_init(|| {
        let mut all = HashMap::new();
        all.insert(Language::Fr, fr::ENTRIES.iter().copied().collect());
        all.insert(Language::En, en::ENTRIES.iter().copied().collect());
        all.insert(Language::De, de::ENTRIES.iter().copied().collect());
        all.insert(Language::It, it::ENTRIES.iter().copied().collect());
        all
    })
}

fn catalog_get(lang: Language, path: &str) -> Option<&'static str> {
    catalogs().get(&lang).and_then(|c| c.get(path)).copied()
}

/// Record a missing path; true the first time a given path is seen.
fn note_missing(path: &str) -> bool {
    let set = MISSING_LOGGED.get_or_init(|| Mutex::new(HashSet::new()));
    match set.lock() {
        Ok(mut guard) => guard.insert(path.to_string()),
        Err(_) => false,
    }
}

/// The requested language has its own entry for `path` (no fallback).
pub fn has_translation(lang: Language, path: &str) -> bool {
    catalog_get(lang, path).is_some()
}

/// Resolve a dotted path: language table, default language table, then the path itself.
pub fn lookup_path(lang: Language, path: &str) -> String {
    if let Some(s) = catalog_get(lang, path) {
        return s.to_string();
    }
    if let Some(s) = catalog_get(Language::DEFAULT, path) {
        return s.to_string();
    }
    if note_missing(path) {
        warn!(
            "[PHASE: i18n] [STEP: lookup] Missing translation for '{}' (lang={})",
            path,
            lang.code()
        );
    }
    path.to_string()
}

pub fn t(lang: Language, key: Key) -> String {
    lookup_path(lang, &key.path())
}

/// Translate and substitute `{name}` placeholders.
pub fn t_args(lang: Language, key: Key, args: &[(&str, String)]) -> String {
    let mut out = t(lang, key);
    for (name, value) in args {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

/// Localized label of an option code; unknown codes are shown raw.
pub fn option_label(lang: Language, group: OptionGroup, code: &str) -> String {
    match group.canonical(code) {
        Some(c) => t(lang, Key::Option(group, c)),
        None => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_static_paths() -> Vec<String> {
        let mut paths = Vec::new();
        for s in Step::ALL {
            paths.push(Key::Step(s).path());
        }
        for f in FieldName::ALL {
            paths.push(Key::Field(*f).path());
            if let Some(g) = f.option_group() {
                for code in g.codes().iter().copied() {
                    paths.push(Key::Option(g, code).path());
                }
            }
        }
        for e in ErrorKey::ALL {
            paths.push(Key::Error(e).path());
        }
        paths
    }

    #[test]
    fn default_and_english_catalogs_are_complete() {
        for path in all_static_paths() {
            assert!(has_translation(Language::Fr, &path), "fr missing {}", path);
            assert!(has_translation(Language::En, &path), "en missing {}", path);
        }
    }

    #[test]
    fn language_parse_accepts_region_tags() {
        assert_eq!(Language::parse("de-CH"), Some(Language::De));
        assert_eq!(Language::parse("IT_it"), Some(Language::It));
        assert_eq!(Language::parse(" en "), Some(Language::En));
        assert!(Language::parse("es").is_none());
        assert!(Language::parse("").is_none());
    }

    #[test]
    fn language_serde_uses_codes() {
        let v = serde_json::to_value(Language::De).expect("serialize");
        assert_eq!(v, "de");
        let back: Language = serde_json::from_value(serde_json::json!("fr-CH")).expect("parse");
        assert_eq!(back, Language::Fr);
        assert!(serde_json::from_value::<Language>(serde_json::json!("xx")).is_err());
    }

    #[test]
    fn missing_language_entry_falls_back_to_default() {
        let path = Key::Field(FieldName::VaccinationAdverseEventDetails).path();
        assert!(!has_translation(Language::It, &path));
        assert_eq!(
            lookup_path(Language::It, &path),
            lookup_path(Language::Fr, &path)
        );
    }

    #[test]
    fn unknown_path_echoes_key_and_logs_once() {
        let path = "ui.this_key_does_not_exist";
        assert_eq!(lookup_path(Language::En, path), path);
        assert!(!note_missing(path), "second sighting must not log again");
    }

    #[test]
    fn placeholders_are_substituted() {
        let s = t_args(
            Language::En,
            Key::Ui(UiKey::StepOf),
            &[("current", "2".into()), ("total", "6".into())],
        );
        assert_eq!(s, "Step 2 of 6");
    }

    #[test]
    fn option_label_falls_back_to_raw_code() {
        assert_eq!(
            option_label(Language::En, OptionGroup::Gender, "female"),
            "Female"
        );
        assert_eq!(
            option_label(Language::En, OptionGroup::Gender, "robot"),
            "robot"
        );
    }

    #[test]
    fn language_cycle_visits_all() {
        let mut l = Language::Fr;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(l);
            l = l.next();
        }
        assert_eq!(l, Language::Fr);
        assert_eq!(seen.len(), 4);
    }
}
