// Summary page content
// Rebuilt from the live snapshot whenever the summary step is entered or the language changes.

use crate::i18n::{self, Key, Language, UiKey};
use crate::models::snapshot::{FieldKind, FieldName, FieldValue, FormSnapshot};
use crate::reference::countries;
use crate::reference::options::OptionGroup;
use crate::reference::vaccines;
use crate::utils::validation::parse_iso_date;
use crate::wizard::attachments::AttachmentList;
use crate::wizard::step::Step;
use crate::wizard::visibility;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub step: Step,
    pub title: String,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub sections: Vec<SummarySection>,
}

impl Summary {
    pub fn section(&self, step: Step) -> Option<&SummarySection> {
        self.sections.iter().find(|s| s.step == step)
    }
}

/// `2025-01-10` -> `10.01.2025`; anything unparseable is shown as entered.
pub fn display_date(raw: &str) -> String {
    parse_iso_date(raw)
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

pub fn display_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn display_option(lang: Language, group: OptionGroup, code: &str) -> String {
    if group == OptionGroup::PreviousVaccines {
        if let Some(s) = vaccines::schedule(code) {
            return format!("{} ({})", s.name(lang), s.describe(lang));
        }
    }
    i18n::option_label(lang, group, code)
}

fn display_value(field: FieldName, value: &FieldValue, lang: Language) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let shown = match (field.kind(), value) {
        (FieldKind::Date, FieldValue::Text(s)) => display_date(s),
        (FieldKind::Choice, FieldValue::Text(code)) => match field.option_group() {
            Some(group) => i18n::option_label(lang, group, code),
            None => code.clone(),
        },
        (FieldKind::Multi, FieldValue::Multi(codes)) => {
            let group = field.option_group()?;
            let sep = if group == OptionGroup::PreviousVaccines { "; " } else { ", " };
            codes
                .iter()
                .map(|c| display_option(lang, group, c))
                .collect::<Vec<_>>()
                .join(sep)
        }
        (FieldKind::Destinations, FieldValue::Destinations(rows)) => {
            let parts: Vec<String> = rows
                .iter()
                .filter(|d| !d.is_blank())
                .map(|d| {
                    format!(
                        "{} ({} → {})",
                        countries::display_name(&d.country, lang),
                        display_date(&d.departure),
                        display_date(&d.return_date)
                    )
                })
                .collect();
            if parts.is_empty() {
                return None;
            }
            parts.join("; ")
        }
        (_, FieldValue::Flag(true)) => i18n::t(lang, Key::Ui(UiKey::Yes)),
        (_, FieldValue::Number(n)) => display_number(*n),
        (_, FieldValue::Text(s)) => s.trim().to_string(),
        _ => return None,
    };
    Some(shown)
}

/// Sections for steps 1 to 5 with the visible, answered fields of each.
pub fn build_summary(
    snapshot: &FormSnapshot,
    attachments: &AttachmentList,
    lang: Language,
) -> Summary {
    let sections = Step::ALL
        .iter()
        .copied()
        .filter(|s| *s != Step::Summary)
        .map(|step| {
            let mut rows: Vec<SummaryRow> = visibility::visible_fields(step, snapshot)
                .into_iter()
                .filter_map(|field| {
                    let value = snapshot.get(field)?;
                    display_value(field, value, lang).map(|v| SummaryRow {
                        label: i18n::t(lang, Key::Field(field)),
                        value: v,
                    })
                })
                .collect();

            if step == Step::Vaccination && !attachments.is_empty() {
                let names: Vec<&str> = attachments.entries().iter().map(|f| f.name.as_str()).collect();
                rows.insert(
                    0,
                    SummaryRow {
                        label: i18n::t(lang, Key::Ui(UiKey::AttachedFiles)),
                        value: names.join(", "),
                    },
                );
            }

            SummarySection {
                step,
                title: i18n::t(lang, Key::Step(step)),
                rows,
            }
        })
        .collect();

    Summary { sections }
}
