// Logging utilities
// Structured logging with JSON and human-readable formats

use log::Level;
use serde_json::json;
use std::collections::HashMap;

/// Mask sensitive data in logs
pub fn mask_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let visible = 4;
    let start: String = chars[..visible].iter().collect();
    let end: String = chars[chars.len() - visible..].iter().collect();

    format!("{}...{}", start, end)
}

/// Mask an access token (invite / resume link token) for log output.
pub fn mask_token(token: &str) -> String {
    let t = token.trim();
    if t.is_empty() {
        return String::new();
    }
    mask_sensitive(t)
}

/// Mask an email address, keeping the first character of the local part and the domain.
///
/// `jean.dupont@example.ch` -> `j***@example.ch`
pub fn mask_email(email: &str) -> String {
    let e = email.trim();
    if e.is_empty() {
        return String::new();
    }

    let Some((local, domain)) = e.split_once('@') else {
        return "***".to_string();
    };

    let first = local.chars().next().map(|c| c.to_string()).unwrap_or_default();
    if domain.is_empty() {
        return format!("{}***", first);
    }
    format!("{}***@{}", first, domain)
}

/// Mask the `token` / `edit` query parameters of an entry URL.
pub fn mask_entry_url(raw: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return "***".to_string();
    };

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" || k == "edit" {
                mask_token(&v)
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    if pairs.is_empty() {
        return parsed.to_string();
    }

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

/// Remove the first `[TAG: value]` marker from `message`, returning its value.
fn take_tag(message: &mut String, tag: &str) -> Option<String> {
    let open = format!("[{}:", tag);
    let start = message.find(&open)?;
    let len = message[start..].find(']')?;
    let value = message[start + open.len()..start + len].trim().to_string();
    let rest = format!("{} {}", &message[..start], &message[start + len + 1..]);
    *message = rest.trim().to_string();
    Some(value)
}

/// Split `[PHASE: x] [STEP: y] text` into its phase, step and remaining text.
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let mut cleaned = message.to_string();
    let phase = take_tag(&mut cleaned, "PHASE");
    let step = take_tag(&mut cleaned, "STEP");
    (phase, step, cleaned)
}

/// Format log entry as JSON for structured logging
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
    details: Option<&HashMap<String, serde_json::Value>>,
) -> String {
    let mut log_entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });

    if let Some(phase) = phase {
        log_entry["phase"] = json!(phase);
    }

    if let Some(step) = step {
        log_entry["step"] = json!(step);
    }

    if let Some(details) = details {
        log_entry["details"] = json!(details);
    }

    serde_json::to_string(&log_entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut log_line = format!("[{}] [{}]", timestamp, level.as_str());

    if let Some(phase) = phase {
        log_line.push_str(&format!(" [PHASE: {}]", phase));
    }

    if let Some(step) = step {
        log_line.push_str(&format!(" [STEP: {}]", step));
    }

    log_line.push_str(&format!(" [{}] {}", target, message));
    log_line
}
