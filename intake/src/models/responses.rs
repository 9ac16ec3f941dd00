// Form API response models

use crate::i18n::Language;
use crate::models::snapshot::FormSnapshot;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =========================
// Generic envelope `{success, error?, message?, ...payload}`
// =========================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Server-provided failure text, preferring `error` over `message`.
    pub fn failure_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Acknowledgement without payload (`save-draft`, `submit-form`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {}

// =========================
// verify-token
// =========================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    #[serde(default)]
    pub email: Option<String>,
}

// =========================
// get-draft
// =========================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftResponse {
    #[serde(default)]
    pub form_data: Option<Value>,
    #[serde(default, deserialize_with = "lenient_step")]
    pub step_reached: Option<u8>,
    #[serde(default)]
    pub language: Option<String>,
}

impl DraftResponse {
    /// Stored form data; some backends keep it JSON-encoded in a string column.
    pub fn snapshot(&self) -> FormSnapshot {
        match &self.form_data {
            Some(Value::String(raw)) => serde_json::from_str::<Value>(raw)
                .map(|v| FormSnapshot::from_json(&v))
                .unwrap_or_default(),
            Some(v) => FormSnapshot::from_json(v),
            None => FormSnapshot::new(),
        }
    }

    pub fn language(&self) -> Option<Language> {
        self.language.as_deref().and_then(Language::parse)
    }
}

/// Accepts `3`, `"3"` or null.
fn lenient_step<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u8>().ok(),
        _ => None,
    })
}

// =========================
// upload-files
// =========================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub file_ids: Vec<Value>,
}

impl UploadResponse {
    /// Ids as strings (servers return either numbers or strings).
    pub fn ids(&self) -> Vec<String> {
        self.file_ids
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::FieldName;
    use serde_json::json;

    #[test]
    fn envelope_flattens_payload() {
        let body = json!({"success": true, "email": "a@b.com"});
        let parsed: ApiResponse<VerifyTokenResponse> =
            serde_json::from_value(body).expect("parse");
        assert!(parsed.success);
        assert_eq!(parsed.data.email.as_deref(), Some("a@b.com"));
        assert!(parsed.failure_message().is_none());
    }

    #[test]
    fn failure_message_prefers_error_field() {
        let body = json!({"success": false, "error": "Invalid token", "message": "other"});
        let parsed: ApiResponse<Ack> = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.failure_message(), Some("Invalid token"));
    }

    #[test]
    fn draft_response_accepts_string_step_and_encoded_form_data() {
        let body = json!({
            "success": true,
            "form_data": "{\"full_name\":\"Jean Dupont\"}",
            "step_reached": "3",
            "language": "en"
        });
        let parsed: ApiResponse<DraftResponse> = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.data.step_reached, Some(3));
        assert_eq!(parsed.data.language(), Some(Language::En));
        assert_eq!(parsed.data.snapshot().text(FieldName::FullName), "Jean Dupont");
    }

    #[test]
    fn upload_ids_accept_numbers_and_strings() {
        let body = json!({"success": true, "file_ids": [12, "f-13", null]});
        let parsed: ApiResponse<UploadResponse> = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.data.ids(), vec!["12".to_string(), "f-13".to_string()]);
    }
}
