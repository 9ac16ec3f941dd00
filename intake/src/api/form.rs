// Form API client (sensitive-data endpoints under `https://<form-host>/api`)
//
// Every endpoint answers with a `{success, ...}` envelope. A non-2xx status and
// `success: false` both become an `ApiError` carrying the server's message.
// No retries: callers decide what a failure means (autosave ignores it, submit shows it).

use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use crate::models::requests::{DraftRecord, SubmitFormRequest, VerifyTokenRequest};
use crate::models::responses::{Ack, ApiResponse, DraftResponse, UploadResponse, VerifyTokenResponse};
use crate::utils::logging::mask_token;
use crate::wizard::attachments::UploadedFile;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Form API seam.
/// Production code uses `HttpFormApi`; tests use recording stubs.
#[async_trait]
pub trait FormApi: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<VerifyTokenResponse, ApiError>;

    async fn save_draft(&self, draft: &DraftRecord) -> Result<(), ApiError>;

    async fn get_draft(&self, token: &str) -> Result<DraftResponse, ApiError>;

    /// Returns the server-side file ids, in upload order.
    async fn upload_files(&self, token: &str, files: &[UploadedFile])
        -> Result<Vec<String>, ApiError>;

    async fn submit_form(&self, token: &str, form_data: &Value) -> Result<(), ApiError>;
}

pub struct HttpFormApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpFormApi {
    pub fn new(
        base_url: &str,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        parse_envelope(status, &body)
    }
}

/// Validate a raw response and extract its payload.
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value: Option<Value> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let message = value
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        return Err(ApiError::Http { status, message });
    }

    let value = value.ok_or_else(|| ApiError::Decode("response body is not JSON".to_string()))?;
    let envelope: ApiResponse<T> =
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.success {
        let message = envelope
            .failure_message()
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string();
        return Err(ApiError::Rejected(message));
    }

    Ok(envelope.data)
}

fn server_message(value: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl FormApi for HttpFormApi {
    async fn verify_token(&self, token: &str) -> Result<VerifyTokenResponse, ApiError> {
        info!(
            "[PHASE: api] [STEP: verify_token] Verifying access token {}",
            mask_token(token)
        );
        let body = VerifyTokenRequest {
            token: token.to_string(),
        };
        let resp = self
            .authorize(self.client.post(self.endpoint("verify-token")))
            .json(&body)
            .send()
            .await?;
        Self::read_envelope(resp).await
    }

    async fn save_draft(&self, draft: &DraftRecord) -> Result<(), ApiError> {
        debug!(
            "[PHASE: api] [STEP: save_draft] Saving draft token={} step_reached={}",
            mask_token(&draft.token),
            draft.step_reached
        );
        let resp = self
            .authorize(self.client.post(self.endpoint("save-draft")))
            .json(draft)
            .send()
            .await?;
        let _: Ack = Self::read_envelope(resp).await?;
        Ok(())
    }

    async fn get_draft(&self, token: &str) -> Result<DraftResponse, ApiError> {
        info!(
            "[PHASE: api] [STEP: get_draft] Loading draft for {}",
            mask_token(token)
        );
        let resp = self
            .authorize(self.client.get(self.endpoint("get-draft")))
            .query(&[("token", token)])
            .send()
            .await?;
        Self::read_envelope(resp).await
    }

    async fn upload_files(
        &self,
        token: &str,
        files: &[UploadedFile],
    ) -> Result<Vec<String>, ApiError> {
        info!(
            "[PHASE: api] [STEP: upload_files] Uploading {} file(s) for {}",
            files.len(),
            mask_token(token)
        );

        let mut form = Form::new().text("token", token.to_string());
        for file in files {
            let bytes = file.read_content().await?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(&file.media_type)?;
            form = form.part("files[]", part);
        }

        let resp = self
            .authorize(self.client.post(self.endpoint("upload-files")))
            .multipart(form)
            .send()
            .await?;
        let parsed: UploadResponse = Self::read_envelope(resp).await?;
        let ids = parsed.ids();
        if ids.len() != files.len() {
            warn!(
                "[PHASE: api] [STEP: upload_files] Server returned {} id(s) for {} file(s)",
                ids.len(),
                files.len()
            );
        }
        Ok(ids)
    }

    async fn submit_form(&self, token: &str, form_data: &Value) -> Result<(), ApiError> {
        info!(
            "[PHASE: api] [STEP: submit_form] Submitting form for {}",
            mask_token(token)
        );
        let body = SubmitFormRequest { token, form_data };
        let resp = self
            .authorize(self.client.post(self.endpoint("submit-form")))
            .json(&body)
            .send()
            .await?;
        let _: Ack = Self::read_envelope(resp).await?;
        Ok(())
    }
}
