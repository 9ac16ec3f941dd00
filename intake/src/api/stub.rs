// Recording form API stub for deterministic controller / UI tests.

use crate::api::form::FormApi;
use crate::error::ApiError;
use crate::models::requests::DraftRecord;
use crate::models::responses::{DraftResponse, VerifyTokenResponse};
use crate::wizard::attachments::UploadedFile;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

pub struct StubFormApi {
    pub verify: Result<Option<String>, String>,
    pub draft: Result<DraftResponse, String>,
    pub save_fails: bool,
    pub upload: Result<Vec<String>, String>,
    pub submit: Result<(), String>,

    pub verify_calls: AtomicU32,
    pub draft_calls: AtomicU32,
    pub save_calls: AtomicU32,
    pub upload_calls: AtomicU32,
    pub submit_calls: AtomicU32,

    pub saved: Mutex<Vec<DraftRecord>>,
    pub uploaded: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<(String, Value)>>,
}

impl StubFormApi {
    /// Every call succeeds with empty payloads.
    pub fn new() -> Self {
        Self {
            verify: Ok(None),
            draft: Ok(DraftResponse::default()),
            save_fails: false,
            upload: Ok(Vec::new()),
            submit: Ok(()),
            verify_calls: AtomicU32::new(0),
            draft_calls: AtomicU32::new(0),
            save_calls: AtomicU32::new(0),
            upload_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
            saved: Mutex::new(Vec::new()),
            uploaded: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FormApi for StubFormApi {
    async fn verify_token(&self, _token: &str) -> Result<VerifyTokenResponse, ApiError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match &self.verify {
            Ok(email) => Ok(VerifyTokenResponse {
                email: email.clone(),
            }),
            Err(m) => Err(ApiError::Rejected(m.clone())),
        }
    }

    async fn save_draft(&self, draft: &DraftRecord) -> Result<(), ApiError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.save_fails {
            return Err(ApiError::Http {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        self.saved.lock().expect("saved lock").push(draft.clone());
        Ok(())
    }

    async fn get_draft(&self, _token: &str) -> Result<DraftResponse, ApiError> {
        self.draft_calls.fetch_add(1, Ordering::SeqCst);
        match &self.draft {
            Ok(d) => Ok(d.clone()),
            Err(m) => Err(ApiError::Rejected(m.clone())),
        }
    }

    async fn upload_files(
        &self,
        _token: &str,
        files: &[UploadedFile],
    ) -> Result<Vec<String>, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        match &self.upload {
            Ok(ids) => {
                let mut uploaded = self.uploaded.lock().expect("uploaded lock");
                uploaded.extend(files.iter().map(|f| f.name.clone()));
                Ok(ids.clone())
            }
            Err(m) => Err(ApiError::Rejected(m.clone())),
        }
    }

    async fn submit_form(&self, token: &str, form_data: &Value) -> Result<(), ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match &self.submit {
            Ok(()) => {
                self.submitted
                    .lock()
                    .expect("submitted lock")
                    .push((token.to_string(), form_data.clone()));
                Ok(())
            }
            Err(m) => Err(ApiError::Rejected(m.clone())),
        }
    }
}
