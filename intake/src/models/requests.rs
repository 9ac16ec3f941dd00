// Form API request models
// Field names match the JSON the form endpoints read (snake_case).

use crate::i18n::Language;
use crate::models::snapshot::FormSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

/// Server-persisted draft: created/overwritten by autosave, read back on resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub token: String,
    pub step_reached: u8,
    pub form_data: FormSnapshot,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitFormRequest<'a> {
    pub token: &'a str,
    pub form_data: &'a Value,
}
