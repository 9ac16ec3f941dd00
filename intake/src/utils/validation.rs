// Input validation utilities
// Field-level checks shared by the step validators and the terminal UI.

use chrono::NaiveDate;
use log::error;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
            Ok(re) => Some(re),
            Err(e) => {
                error!(
                    "[PHASE: validation] [STEP: init] Internal error compiling email regex: {}",
                    e
                );
                None
            }
        })
        .as_ref()
}

/// Shallow email shape check: `local@domain.tld`, no whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    let e = email.trim();
    if e.is_empty() || e.matches('@').count() != 1 {
        return false;
    }
    email_regex().map(|re| re.is_match(e)).unwrap_or(false)
}

/// Parse an ISO `YYYY-MM-DD` date as produced by date inputs.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(v, "%Y-%m-%d").ok()
}

/// Parse a decimal number, accepting a comma as decimal separator ("72,5").
pub fn parse_decimal(value: &str) -> Option<f64> {
    let v = value.trim().replace(',', ".");
    if v.is_empty() {
        return None;
    }
    v.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// True when the trimmed value has at least `min` characters.
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}
