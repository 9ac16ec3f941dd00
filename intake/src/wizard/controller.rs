// Wizard controller
//
// Owns one form session: current step, snapshot, attachments, access token, language,
// draft state and the last validation report. All mutation goes through `&mut self`,
// so saves are sequential and a later save always re-sends the latest snapshot.

use crate::api::form::FormApi;
use crate::error::ApiError;
use crate::i18n::Language;
use crate::models::preferences::PreferenceStore;
use crate::models::requests::DraftRecord;
use crate::models::responses::DraftResponse;
use crate::models::snapshot::{Destination, FieldKind, FieldName, FieldValue, FormSnapshot};
use crate::utils::logging::{mask_email, mask_token};
use crate::utils::validation::parse_decimal;
use crate::wizard::attachments::{AttachmentError, AttachmentLimits, AttachmentList, UploadedFile};
use crate::wizard::draft::{DraftState, DEFAULT_AUTOSAVE_INTERVAL};
use crate::wizard::entry::{EntryParams, EntryToken};
use crate::wizard::step::Step;
use crate::wizard::summary::{build_summary, Summary};
use crate::wizard::validation::{
    first_invalid_step, validate_step, FieldError, ValidationContext, ValidationReport,
};
use crate::wizard::visibility;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Key under which uploaded file ids are embedded into the submitted form data.
pub const FILE_IDS_KEY: &str = "vaccination_file_ids";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub autosave_interval: Duration,
    /// Deny access when the entry URL carries neither `token` nor `edit`.
    pub require_token: bool,
    pub access_denied_redirect: Option<String>,
    pub limits: AttachmentLimits,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            require_token: true,
            access_denied_redirect: None,
            limits: AttachmentLimits::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStart {
    /// Invite verified; email pre-filled when the server returned one.
    Fresh { email: Option<String> },
    Resumed { step: Step },
    /// No token and none required: drafts are not saved.
    Anonymous,
    Denied { redirect: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Moved(Step),
    Invalid(ValidationReport),
    /// Navigation is disabled after submission.
    Locked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    /// Validation failed; the controller moved to `step`.
    Invalid { step: Step, report: ValidationReport },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission is only possible from the summary step")]
    NotReady,
    #[error("no access token for this session")]
    MissingToken,
    #[error("file upload failed: {0}")]
    Upload(#[source] ApiError),
    #[error("form submission failed: {0}")]
    Submit(#[source] ApiError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Upload(e) | SubmitError::Submit(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationPart {
    Country,
    Departure,
    Return,
}

pub struct WizardController {
    api: Arc<dyn FormApi>,
    options: ControllerOptions,
    session_id: Uuid,
    step: Step,
    snapshot: FormSnapshot,
    attachments: AttachmentList,
    token: Option<String>,
    language: Language,
    errors: ValidationReport,
    draft: DraftState,
    summary: Option<Summary>,
    submitting: bool,
    completed: bool,
    preferences: Option<PreferenceStore>,
    today: Option<NaiveDate>,
}

impl WizardController {
    pub fn new(api: Arc<dyn FormApi>, options: ControllerOptions) -> Self {
        let mut snapshot = FormSnapshot::new();
        snapshot.destinations_mut().push(Destination::default());
        let session_id = Uuid::new_v4();
        debug!(
            "[PHASE: wizard] [STEP: init] New form session {}",
            session_id
        );
        Self {
            api,
            session_id,
            step: Step::FIRST,
            snapshot,
            attachments: AttachmentList::new(options.limits),
            token: None,
            language: Language::DEFAULT,
            errors: ValidationReport::default(),
            draft: DraftState::new(options.autosave_interval, Instant::now()),
            summary: None,
            submitting: false,
            completed: false,
            preferences: None,
            today: None,
            options,
        }
    }

    pub fn with_preferences(mut self, store: PreferenceStore) -> Self {
        self.preferences = Some(store);
        self
    }

    /// Start in `lang` without persisting it.
    pub fn with_language(mut self, lang: Language) -> Self {
        self.language = lang;
        self
    }

    /// Fix "today" for birthdate checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn attachments(&self) -> &AttachmentList {
        &self.attachments
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn errors_for(&self, field: FieldName) -> Vec<&FieldError> {
        self.errors.for_field(field).collect()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_modified(&self) -> bool {
        self.draft.is_modified()
    }

    pub fn show_save_ack(&self, now: Instant) -> bool {
        self.draft.show_ack(now)
    }

    pub fn is_visible(&self, field: FieldName) -> bool {
        visibility::is_visible(field, &self.snapshot)
    }

    pub fn visible_fields(&self) -> Vec<FieldName> {
        visibility::visible_fields(self.step, &self.snapshot)
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn validation_context(&self) -> ValidationContext {
        ValidationContext {
            today: self.today(),
            attachment_count: self.attachments.len(),
        }
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Validate the current step; on success save the draft (best-effort) and move forward.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        if self.completed {
            return AdvanceOutcome::Locked;
        }

        let report = validate_step(self.step, &self.snapshot, &self.validation_context());
        if !report.is_valid() {
            info!(
                "[PHASE: navigation] [STEP: advance] Step {} invalid ({} error(s))",
                self.step.number(),
                report.errors.len()
            );
            self.errors = report.clone();
            return AdvanceOutcome::Invalid(report);
        }
        self.errors = ValidationReport::default();

        let target = self.step.next();
        if self.draft.is_modified() && self.token.is_some() {
            if let Err(e) = self.save_draft_for(target, Instant::now()).await {
                warn!(
                    "[PHASE: draft] [STEP: save] Draft save before step {} failed (ignored): {}",
                    target.number(),
                    e
                );
            }
        }

        self.enter(target);
        AdvanceOutcome::Moved(self.step)
    }

    /// Step back without validating.
    pub fn retreat(&mut self) -> Step {
        if !self.completed {
            self.enter(self.step.prev());
        }
        self.step
    }

    /// Jump straight to a step (draft resume). Out-of-range numbers are ignored.
    pub fn jump_to(&mut self, step: u8) -> bool {
        if self.completed {
            return false;
        }
        match Step::from_number(step) {
            Some(s) => {
                self.enter(s);
                true
            }
            None => {
                debug!(
                    "[PHASE: navigation] [STEP: jump] Ignoring out-of-range step {}",
                    step
                );
                false
            }
        }
    }

    fn enter(&mut self, step: Step) {
        if step != self.step {
            debug!(
                "[PHASE: navigation] [STEP: enter] {} -> {}",
                self.step.as_id(),
                step.as_id()
            );
        }
        self.step = step;
        if step == Step::Summary {
            self.regenerate_summary();
        }
    }

    pub fn regenerate_summary(&mut self) {
        self.summary = Some(build_summary(
            &self.snapshot,
            &self.attachments,
            self.language,
        ));
    }

    // ---------------------------------------------------------------------
    // Field edits
    // ---------------------------------------------------------------------

    fn touched(&mut self) {
        self.draft.mark_modified();
    }

    /// Set a free-text, date or number field. Blank input clears the field.
    pub fn set_text(&mut self, field: FieldName, value: &str) {
        if value.trim().is_empty() {
            self.clear_field(field);
            return;
        }
        let stored = match field.kind() {
            FieldKind::Number => match parse_decimal(value) {
                Some(n) => FieldValue::Number(n),
                None => {
                    debug!(
                        "[PHASE: wizard] [STEP: set_text] {} is not a number, field cleared",
                        field.wire_name()
                    );
                    self.clear_field(field);
                    return;
                }
            },
            FieldKind::Text | FieldKind::LongText | FieldKind::Date => {
                FieldValue::Text(value.to_string())
            }
            _ => {
                debug!(
                    "[PHASE: wizard] [STEP: set_text] {} is not a text field",
                    field.wire_name()
                );
                return;
            }
        };
        self.snapshot.set(field, stored);
        self.touched();
    }

    pub fn set_number(&mut self, field: FieldName, value: f64) {
        if field.kind() != FieldKind::Number || !value.is_finite() {
            return;
        }
        self.snapshot.set(field, FieldValue::Number(value));
        self.touched();
    }

    /// Select a single option; answers hidden by the new choice are cleared.
    pub fn set_choice(&mut self, field: FieldName, code: &str) -> bool {
        if field.kind() != FieldKind::Choice {
            return false;
        }
        let Some(code) = field.option_group().and_then(|g| g.canonical(code)) else {
            return false;
        };
        self.snapshot.set(field, FieldValue::Text(code.to_string()));
        visibility::prune_hidden(&mut self.snapshot);
        self.touched();
        true
    }

    pub fn set_flag(&mut self, field: FieldName, on: bool) {
        if field.kind() != FieldKind::Flag {
            return;
        }
        self.snapshot.set(field, FieldValue::Flag(on));
        self.touched();
    }

    pub fn toggle_option(&mut self, field: FieldName, code: &str) -> bool {
        let changed = visibility::toggle_option(&mut self.snapshot, field, code);
        if changed {
            self.touched();
        }
        changed
    }

    pub fn clear_field(&mut self, field: FieldName) {
        if field == FieldName::Destinations {
            return;
        }
        if self.snapshot.remove(field).is_some() {
            visibility::prune_hidden(&mut self.snapshot);
            self.touched();
        }
    }

    // ---------------------------------------------------------------------
    // Destination rows
    // ---------------------------------------------------------------------

    pub fn destinations(&self) -> &[Destination] {
        self.snapshot.destinations()
    }

    /// Append an empty row; returns its index.
    pub fn add_destination(&mut self) -> usize {
        let rows = self.snapshot.destinations_mut();
        rows.push(Destination::default());
        let idx = rows.len() - 1;
        self.touched();
        idx
    }

    /// Remove a row; the form always keeps at least one (possibly empty) row.
    pub fn remove_destination(&mut self, index: usize) -> bool {
        let rows = self.snapshot.destinations_mut();
        if index >= rows.len() {
            return false;
        }
        rows.remove(index);
        if rows.is_empty() {
            rows.push(Destination::default());
        }
        self.touched();
        true
    }

    pub fn set_destination(&mut self, index: usize, part: DestinationPart, value: &str) -> bool {
        let rows = self.snapshot.destinations_mut();
        let Some(row) = rows.get_mut(index) else {
            return false;
        };
        let value = value.trim().to_string();
        match part {
            DestinationPart::Country => row.country = value,
            DestinationPart::Departure => row.departure = value,
            DestinationPart::Return => row.return_date = value,
        }
        self.touched();
        true
    }

    // ---------------------------------------------------------------------
    // Language
    // ---------------------------------------------------------------------

    /// Switch language and persist the choice; a persistence failure is logged only.
    pub fn set_language(&mut self, lang: Language) {
        if lang == self.language {
            return;
        }
        self.language = lang;
        info!(
            "[PHASE: i18n] [STEP: set_language] Language set to {}",
            lang.code()
        );
        if let Some(store) = &self.preferences {
            if let Err(e) = store.save_language(lang) {
                warn!(
                    "[PHASE: preferences] [STEP: save] Could not store language preference: {}",
                    e
                );
            }
        }
        if self.summary.is_some() {
            self.regenerate_summary();
        }
    }

    // ---------------------------------------------------------------------
    // Attachments
    // ---------------------------------------------------------------------

    pub fn attach(&mut self, file: UploadedFile) -> Result<(), AttachmentError> {
        let name = file.name.clone();
        self.attachments.add(file).map_err(|e| {
            warn!(
                "[PHASE: attachments] [STEP: add] Rejected {}: {}",
                name, e
            );
            e
        })
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<UploadedFile> {
        self.attachments.remove(index)
    }

    // ---------------------------------------------------------------------
    // Session start / drafts
    // ---------------------------------------------------------------------

    /// Consume the entry parameters: verify an invite or load a resume draft.
    pub async fn start_session(&mut self, entry: &EntryParams) -> SessionStart {
        match &entry.token {
            Some(EntryToken::Invite(token)) => match self.api.verify_token(token).await {
                Ok(resp) => {
                    self.token = Some(token.clone());
                    let email = resp.email.filter(|e| !e.trim().is_empty());
                    if let Some(e) = &email {
                        self.snapshot.set(FieldName::Email, FieldValue::Text(e.clone()));
                    }
                    info!(
                        "[PHASE: session] [STEP: invite] Invite {} verified (email {})",
                        mask_token(token),
                        email.as_deref().map(mask_email).unwrap_or_default()
                    );
                    SessionStart::Fresh { email }
                }
                Err(e) => {
                    warn!(
                        "[PHASE: session] [STEP: invite] Invite {} rejected: {}",
                        mask_token(token),
                        e
                    );
                    self.deny()
                }
            },
            Some(EntryToken::Resume(token)) => match self.api.get_draft(token).await {
                Ok(draft) => {
                    self.token = Some(token.clone());
                    let step = self.load_draft(&draft);
                    info!(
                        "[PHASE: session] [STEP: resume] Draft {} restored at step {}",
                        mask_token(token),
                        step.number()
                    );
                    SessionStart::Resumed { step }
                }
                Err(e) => {
                    warn!(
                        "[PHASE: session] [STEP: resume] Draft {} could not be loaded: {}",
                        mask_token(token),
                        e
                    );
                    self.deny()
                }
            },
            None if self.options.require_token => {
                warn!("[PHASE: session] [STEP: entry] No access token in entry URL");
                self.deny()
            }
            None => {
                info!("[PHASE: session] [STEP: entry] Anonymous session (drafts disabled)");
                SessionStart::Anonymous
            }
        }
    }

    fn deny(&self) -> SessionStart {
        SessionStart::Denied {
            redirect: self.options.access_denied_redirect.clone(),
        }
    }

    /// Replace the snapshot with a stored draft and enter its step without re-validating.
    fn load_draft(&mut self, draft: &DraftResponse) -> Step {
        let mut snapshot = draft.snapshot();
        if snapshot.destinations().is_empty() {
            snapshot.destinations_mut().push(Destination::default());
        }
        // Answers the draft's own choices hide are not restored; the draft stays clean.
        let dropped = visibility::prune_hidden(&mut snapshot);
        if !dropped.is_empty() {
            info!(
                "[PHASE: session] [STEP: resume] Dropped {} hidden answer(s) from draft",
                dropped.len()
            );
        }
        self.snapshot = snapshot;
        if let Some(lang) = draft.language() {
            self.language = lang;
        }
        self.draft.mark_clean();
        self.errors = ValidationReport::default();

        let step = draft.step_reached.unwrap_or(1);
        if !self.jump_to(step) {
            self.enter(Step::FIRST);
        }
        self.step
    }

    fn draft_record(&self, step_reached: Step) -> Option<DraftRecord> {
        Some(DraftRecord {
            token: self.token.clone()?,
            step_reached: step_reached.number(),
            form_data: self.snapshot.clone(),
            language: self.language,
        })
    }

    async fn save_draft_for(&mut self, step_reached: Step, now: Instant) -> Result<(), ApiError> {
        let Some(record) = self.draft_record(step_reached) else {
            return Ok(());
        };
        self.draft.record_attempt(now);
        self.api.save_draft(&record).await?;
        self.draft.record_success(now);
        debug!(
            "[PHASE: draft] [STEP: save] Draft saved (step_reached={})",
            record.step_reached
        );
        Ok(())
    }

    /// Save now with the current step as `step_reached`.
    pub async fn save_draft(&mut self) -> Result<(), ApiError> {
        self.save_draft_for(self.step, Instant::now()).await
    }

    /// Periodic timer hook. Returns true when a save succeeded.
    pub async fn autosave_tick(&mut self, now: Instant) -> bool {
        if self.completed || self.token.is_none() || !self.draft.autosave_due(now) {
            return false;
        }
        match self.save_draft_for(self.step, now).await {
            Ok(()) => true,
            Err(e) => {
                warn!("[PHASE: draft] [STEP: autosave] Autosave failed (ignored): {}", e);
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Submission
    // ---------------------------------------------------------------------

    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        if self.completed || self.submitting || self.step != Step::Summary {
            return Err(SubmitError::NotReady);
        }

        if let Some((step, report)) = first_invalid_step(&self.snapshot, &self.validation_context()) {
            info!(
                "[PHASE: submit] [STEP: validate] Step {} invalid, returning to it",
                step.number()
            );
            self.enter(step);
            self.errors = report.clone();
            return Ok(SubmitOutcome::Invalid { step, report });
        }
        self.errors = ValidationReport::default();

        let token = match (&self.token, self.options.require_token) {
            (Some(t), _) => t.clone(),
            (None, false) => String::new(),
            (None, true) => return Err(SubmitError::MissingToken),
        };

        self.submitting = true;
        info!(
            "[PHASE: submit] [STEP: start] Submitting session {} ({} attachment(s))",
            self.session_id,
            self.attachments.len()
        );

        let result = self.upload_and_submit(&token).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.completed = true;
                self.draft.mark_clean();
                info!("[PHASE: submit] [STEP: done] Form submitted");
                Ok(SubmitOutcome::Submitted)
            }
            Err(e) => {
                warn!("[PHASE: submit] [STEP: failed] {}", e);
                Err(e)
            }
        }
    }

    async fn upload_and_submit(&self, token: &str) -> Result<(), SubmitError> {
        let mut payload = self.snapshot.to_json();

        if !self.attachments.is_empty() {
            let ids = self
                .api
                .upload_files(token, self.attachments.entries())
                .await
                .map_err(SubmitError::Upload)?;
            if let Value::Object(map) = &mut payload {
                map.insert(FILE_IDS_KEY.to_string(), Value::from(ids));
            }
        }

        self.api
            .submit_form(token, &payload)
            .await
            .map_err(SubmitError::Submit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubFormApi;
    use crate::i18n::ErrorKey;
    use crate::wizard::entry::parse_entry_url;
    use crate::wizard::validation::ErrorTarget;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("date")
    }

    fn controller(stub: StubFormApi) -> (WizardController, Arc<StubFormApi>) {
        let api = Arc::new(stub);
        let c = WizardController::new(api.clone(), ControllerOptions::default()).with_today(today());
        (c, api)
    }

    fn with_token(stub: StubFormApi) -> (WizardController, Arc<StubFormApi>) {
        let (mut c, api) = controller(stub);
        c.token = Some("abc123".to_string());
        (c, api)
    }

    fn fill_identity(c: &mut WizardController) {
        c.set_text(FieldName::FullName, "Jean Dupont");
        c.set_text(FieldName::Birthdate, "1985-04-12");
        c.set_text(FieldName::Email, "jean@example.ch");
        c.set_choice(FieldName::Gender, "female");
    }

    fn fill_travel(c: &mut WizardController) {
        c.set_destination(0, DestinationPart::Country, "TH");
        c.set_destination(0, DestinationPart::Departure, "2025-07-01");
        c.set_destination(0, DestinationPart::Return, "2025-07-20");
        c.toggle_option(FieldName::TravelReasons, "tourism");
        c.toggle_option(FieldName::Accommodation, "hotel");
        c.toggle_option(FieldName::Activities, "hiking");
        c.set_choice(FieldName::RuralStay, "no");
    }

    fn fill_health(c: &mut WizardController) {
        c.set_text(FieldName::Weight, "61,5");
        c.set_choice(FieldName::Allergy, "no");
        c.set_choice(FieldName::DengueHistory, "no");
        c.set_choice(FieldName::ChickenpoxDisease, "yes");
        c.set_choice(FieldName::ChickenpoxVaccine, "unknown");
        c.set_choice(FieldName::VaccinationAdverseEvent, "no");
        c.toggle_option(FieldName::Comorbidities, "none");
        c.set_choice(FieldName::Medication, "no");
    }

    fn fill_all(c: &mut WizardController) {
        fill_identity(c);
        fill_travel(c);
        fill_health(c);
        c.set_flag(FieldName::NoVaccinationCard, true);
        c.set_flag(FieldName::Consent, true);
    }

    // -------------------------------------------------------------------------
    // A) Navigation
    // -------------------------------------------------------------------------

    #[test]
    fn jump_to_accepts_only_one_through_six() {
        let (mut c, _) = controller(StubFormApi::new());
        for n in 1..=6u8 {
            assert!(c.jump_to(n));
            assert_eq!(c.step().number(), n);
        }
        c.jump_to(3);
        assert!(!c.jump_to(0));
        assert_eq!(c.step(), Step::Health);
        assert!(!c.jump_to(7));
        assert_eq!(c.step(), Step::Health);
    }

    #[test]
    fn retreat_clamps_at_first_step_without_validating() {
        let (mut c, _) = controller(StubFormApi::new());
        assert_eq!(c.retreat(), Step::Identity);
        c.jump_to(2);
        assert_eq!(c.retreat(), Step::Identity);
    }

    #[tokio::test]
    async fn advance_blocks_on_invalid_step_and_keeps_errors() {
        let (mut c, api) = with_token(StubFormApi::new());
        c.set_text(FieldName::FullName, "Jean Dupont");

        let outcome = c.advance().await;
        assert!(matches!(outcome, AdvanceOutcome::Invalid(_)));
        assert_eq!(c.step(), Step::Identity);
        assert_eq!(c.errors_for(FieldName::Email)[0].key, ErrorKey::Required);
        assert_eq!(StubFormApi::calls(&api.save_calls), 0, "no save on failure");

        fill_identity(&mut c);
        assert_eq!(c.advance().await, AdvanceOutcome::Moved(Step::Travel));
        assert!(c.errors().is_valid(), "errors cleared on next pass");
    }

    #[tokio::test]
    async fn advance_saves_modified_draft_with_target_step() {
        let (mut c, api) = with_token(StubFormApi::new());
        fill_identity(&mut c);
        c.advance().await;

        let saved = api.saved.lock().expect("lock");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].step_reached, 2);
        assert_eq!(saved[0].token, "abc123");
        assert_eq!(saved[0].form_data.text(FieldName::FullName), "Jean Dupont");
        drop(saved);
        assert!(!c.is_modified());

        // Unchanged snapshot: going back and forth does not save again.
        c.retreat();
        c.advance().await;
        assert_eq!(StubFormApi::calls(&api.save_calls), 1);
    }

    #[tokio::test]
    async fn failed_draft_save_never_blocks_navigation() {
        let mut stub = StubFormApi::new();
        stub.save_fails = true;
        let (mut c, api) = with_token(stub);
        fill_identity(&mut c);

        assert_eq!(c.advance().await, AdvanceOutcome::Moved(Step::Travel));
        assert_eq!(StubFormApi::calls(&api.save_calls), 1);
        assert!(c.is_modified(), "still unsaved");
    }

    #[tokio::test]
    async fn no_draft_save_without_token() {
        let (mut c, api) = controller(StubFormApi::new());
        fill_identity(&mut c);
        c.advance().await;
        assert_eq!(StubFormApi::calls(&api.save_calls), 0);
    }

    #[tokio::test]
    async fn entering_summary_regenerates_it() {
        let (mut c, _) = controller(StubFormApi::new());
        c.set_text(FieldName::Remarks, "Allergic to latex");
        c.jump_to(5);
        assert!(c.summary().is_none());
        assert_eq!(c.advance().await, AdvanceOutcome::Moved(Step::Summary));
        let summary = c.summary().expect("summary");
        let referral = summary.section(Step::Referral).expect("section");
        assert_eq!(referral.rows[0].value, "Allergic to latex");

        c.set_language(Language::En);
        let referral = c.summary().and_then(|s| s.section(Step::Referral)).expect("section");
        assert_eq!(referral.rows[0].label, "Remarks");
    }

    // -------------------------------------------------------------------------
    // B) Session start
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn invite_token_prefills_email_and_is_scrubbed() {
        let mut stub = StubFormApi::new();
        stub.verify = Ok(Some("a@b.com".to_string()));
        let (mut c, api) = controller(stub);

        let entry = parse_entry_url("https://forms.example.org/intake?token=abc123").expect("url");
        assert!(!entry.visible_url.as_deref().unwrap_or("").contains("abc123"));

        let start = c.start_session(&entry).await;
        assert_eq!(
            start,
            SessionStart::Fresh {
                email: Some("a@b.com".to_string())
            }
        );
        assert_eq!(c.snapshot().text(FieldName::Email), "a@b.com");
        assert_eq!(c.token(), Some("abc123"));
        assert_eq!(StubFormApi::calls(&api.verify_calls), 1);
        assert_eq!(c.step(), Step::Identity);
    }

    #[tokio::test]
    async fn resume_token_restores_draft_at_saved_step() {
        let mut stub = StubFormApi::new();
        stub.draft = Ok(DraftResponse {
            form_data: Some(json!({
                "full_name": "Jean Dupont",
                "destinations": [{"country": "CH", "departure": "2025-01-01", "return": "2025-01-10"}]
            })),
            step_reached: Some(3),
            language: Some("en".to_string()),
        });
        let (mut c, api) = controller(stub);

        let entry = parse_entry_url("https://forms.example.org/intake?edit=draft456").expect("url");
        let start = c.start_session(&entry).await;

        assert_eq!(start, SessionStart::Resumed { step: Step::Health });
        assert_eq!(c.step(), Step::Health);
        assert_eq!(c.snapshot().text(FieldName::FullName), "Jean Dupont");
        assert_eq!(
            c.destinations(),
            &[Destination::new("CH", "2025-01-01", "2025-01-10")]
        );
        assert_eq!(
            crate::reference::countries::display_name(&c.destinations()[0].country, c.language()),
            "Switzerland"
        );
        assert_eq!(c.language(), Language::En);
        assert!(!c.is_modified(), "restored draft is clean");
        assert_eq!(StubFormApi::calls(&api.draft_calls), 1);
        assert_eq!(c.token(), Some("draft456"));
    }

    #[tokio::test]
    async fn resume_restores_visibility_from_answers() {
        let mut stub = StubFormApi::new();
        stub.draft = Ok(DraftResponse {
            form_data: Some(json!({
                "gender": "other",
                "reproductive_questions": "yes",
                "comorbidities": ["cancer"],
            })),
            step_reached: Some(9),
            language: None,
        });
        let (mut c, _) = controller(stub);
        let entry = EntryParams {
            token: Some(EntryToken::Resume("draft456".into())),
            visible_url: None,
        };
        assert_eq!(c.start_session(&entry).await, SessionStart::Resumed { step: Step::Identity });
        assert!(c.is_visible(FieldName::Pregnant));
        assert!(c.is_visible(FieldName::Chemotherapy));
        assert_eq!(c.destinations().len(), 1, "one empty row when none saved");
    }

    #[tokio::test]
    async fn resumed_draft_drops_hidden_answers_before_submit() {
        let mut stub = StubFormApi::new();
        stub.draft = Ok(DraftResponse {
            form_data: Some(json!({
                "full_name": "Jean Dupont",
                "birthdate": "1985-04-12",
                "email": "jean@example.ch",
                "gender": "male",
                "destinations": [{"country": "TH", "departure": "2025-07-01", "return": "2025-07-20"}],
                "travel_reasons": ["tourism"],
                "accommodation": ["hotel"],
                "activities": ["none"],
                "rural_stay": "no",
                "weight": 80,
                "pregnant": "yes",
                "allergy": "no",
                "allergy_details": "peanuts",
                "dengue_history": "no",
                "chickenpox_disease": "no",
                "chickenpox_vaccine": "no",
                "vaccination_adverse_event": "no",
                "comorbidities": ["none"],
                "chemotherapy": "yes",
                "medication": "no",
                "no_vaccination_card": true,
                "consent": true,
            })),
            step_reached: Some(6),
            language: None,
        });
        let (mut c, api) = controller(stub);
        let entry = EntryParams {
            token: Some(EntryToken::Resume("draft456".into())),
            visible_url: None,
        };
        assert_eq!(c.start_session(&entry).await, SessionStart::Resumed { step: Step::Summary });
        assert!(!c.snapshot().has_value(FieldName::Pregnant));
        assert!(!c.is_modified(), "pruning a restored draft is not an edit");

        assert_eq!(c.submit().await.expect("submitted"), SubmitOutcome::Submitted);
        let submitted = api.submitted.lock().expect("lock");
        let payload = &submitted[0].1;
        assert!(payload.get("pregnant").is_none());
        assert!(payload.get("allergy_details").is_none());
        assert!(payload.get("chemotherapy").is_none());
        assert_eq!(payload["gender"], "male");
    }

    #[tokio::test]
    async fn failed_resume_or_invite_denies_access() {
        let mut stub = StubFormApi::new();
        stub.draft = Err("Unknown draft".into());
        stub.verify = Err("Expired".into());
        let api = Arc::new(stub);
        let options = ControllerOptions {
            access_denied_redirect: Some("https://clinic.example.org".into()),
            ..ControllerOptions::default()
        };

        let mut c = WizardController::new(api.clone(), options.clone());
        let resume = EntryParams {
            token: Some(EntryToken::Resume("x".into())),
            visible_url: None,
        };
        assert_eq!(
            c.start_session(&resume).await,
            SessionStart::Denied {
                redirect: Some("https://clinic.example.org".into())
            }
        );
        assert!(c.token().is_none());

        let mut c = WizardController::new(api, options);
        let invite = EntryParams {
            token: Some(EntryToken::Invite("y".into())),
            visible_url: None,
        };
        assert!(matches!(c.start_session(&invite).await, SessionStart::Denied { .. }));
    }

    #[tokio::test]
    async fn missing_token_depends_on_require_token() {
        let api = Arc::new(StubFormApi::new());
        let mut strict = WizardController::new(api.clone(), ControllerOptions::default());
        assert!(matches!(
            strict.start_session(&EntryParams::default()).await,
            SessionStart::Denied { redirect: None }
        ));

        let open = ControllerOptions {
            require_token: false,
            ..ControllerOptions::default()
        };
        let mut relaxed = WizardController::new(api, open);
        assert_eq!(
            relaxed.start_session(&EntryParams::default()).await,
            SessionStart::Anonymous
        );
    }

    // -------------------------------------------------------------------------
    // C) Autosave
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn autosave_fires_only_when_due_and_modified() {
        let (mut c, api) = with_token(StubFormApi::new());
        let t0 = Instant::now();
        assert!(!c.autosave_tick(t0 + Duration::from_secs(60)).await, "nothing modified");

        c.set_text(FieldName::Phone, "+41 79 000 00 00");
        assert!(!c.autosave_tick(Instant::now()).await, "interval not elapsed");
        assert!(c.autosave_tick(Instant::now() + Duration::from_secs(31)).await);
        assert!(!c.is_modified());
        assert!(c.show_save_ack(Instant::now()));

        let saved = api.saved.lock().expect("lock");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].step_reached, 1);
        assert_eq!(saved[0].language, Language::Fr);
    }

    #[tokio::test]
    async fn autosave_failure_is_silent_and_retried_later() {
        let mut stub = StubFormApi::new();
        stub.save_fails = true;
        let (mut c, api) = with_token(stub);
        c.set_text(FieldName::Phone, "022 000 00 00");
        let later = Instant::now() + Duration::from_secs(31);
        assert!(!c.autosave_tick(later).await);
        assert!(c.is_modified());
        assert!(!c.autosave_tick(later + Duration::from_secs(1)).await);
        assert_eq!(StubFormApi::calls(&api.save_calls), 1, "waits a full interval");
        assert!(!c.autosave_tick(later + Duration::from_secs(31)).await);
        assert_eq!(StubFormApi::calls(&api.save_calls), 2);
    }

    // -------------------------------------------------------------------------
    // D) Edits
    // -------------------------------------------------------------------------

    #[test]
    fn gender_change_clears_hidden_answers() {
        let (mut c, _) = controller(StubFormApi::new());
        c.set_choice(FieldName::Gender, "female");
        c.set_choice(FieldName::Pregnant, "no");
        c.set_choice(FieldName::Gender, "male");
        assert!(!c.snapshot().has_value(FieldName::Pregnant));
        assert!(!c.set_choice(FieldName::Gender, "robot"));
        assert_eq!(c.snapshot().text(FieldName::Gender), "male");
    }

    #[test]
    fn weight_input_accepts_comma_decimal() {
        let (mut c, _) = controller(StubFormApi::new());
        c.set_text(FieldName::Weight, "61,5");
        assert_eq!(c.snapshot().number(FieldName::Weight), Some(61.5));
        c.set_text(FieldName::Weight, " ");
        assert!(!c.snapshot().has_value(FieldName::Weight));
    }

    #[test]
    fn unparseable_weight_clears_the_field() {
        let (mut c, _) = controller(StubFormApi::new());
        c.set_text(FieldName::Weight, "72");
        c.set_text(FieldName::Weight, "72 kg");
        assert!(!c.snapshot().has_value(FieldName::Weight));

        // What is stored survives a JSON round-trip unchanged.
        c.set_text(FieldName::Weight, "72,5");
        let restored = FormSnapshot::from_json(&c.snapshot().to_json());
        assert_eq!(&restored, c.snapshot());
    }

    #[test]
    fn destination_rows_never_drop_below_one() {
        let (mut c, _) = controller(StubFormApi::new());
        assert_eq!(c.destinations().len(), 1);
        let idx = c.add_destination();
        assert_eq!(idx, 1);
        assert!(c.set_destination(1, DestinationPart::Country, "KE"));
        assert!(c.remove_destination(0));
        assert_eq!(c.destinations()[0].country, "KE");
        assert!(c.remove_destination(0));
        assert_eq!(c.destinations().len(), 1);
        assert!(c.destinations()[0].is_blank());
        assert!(!c.set_destination(5, DestinationPart::Return, "2025-01-01"));
    }

    #[test]
    fn language_change_is_persisted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        let api = Arc::new(StubFormApi::new());
        let mut c = WizardController::new(api, ControllerOptions::default()).with_preferences(store.clone());
        c.set_language(Language::De);
        assert_eq!(store.load_language(), Some(Language::De));
    }

    // -------------------------------------------------------------------------
    // E) Submission
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn submit_requires_summary_step() {
        let (mut c, _) = with_token(StubFormApi::new());
        assert!(matches!(c.submit().await, Err(SubmitError::NotReady)));
    }

    #[tokio::test]
    async fn missing_card_fails_validation_without_upload() {
        let (mut c, api) = with_token(StubFormApi::new());
        fill_all(&mut c);
        c.set_flag(FieldName::NoVaccinationCard, false);
        c.jump_to(6);

        match c.submit().await.expect("validation outcome") {
            SubmitOutcome::Invalid { step, report } => {
                assert_eq!(step, Step::Vaccination);
                assert!(report.has(ErrorKey::VaccinationRequired));
                assert_eq!(report.for_target(ErrorTarget::Attachments).count(), 1);
            }
            other => panic!("expected invalid, got {:?}", other),
        }
        assert_eq!(c.step(), Step::Vaccination);
        assert_eq!(StubFormApi::calls(&api.upload_calls), 0);
        assert_eq!(StubFormApi::calls(&api.submit_calls), 0);

        // The same rule blocks a plain step-4 advance.
        assert!(matches!(c.advance().await, AdvanceOutcome::Invalid(_)));
        assert_eq!(StubFormApi::calls(&api.upload_calls), 0);
    }

    #[tokio::test]
    async fn submit_uploads_files_and_embeds_ids() {
        let mut stub = StubFormApi::new();
        stub.upload = Ok(vec!["f-1".into(), "f-2".into()]);
        let (mut c, api) = with_token(stub);
        fill_all(&mut c);
        c.set_flag(FieldName::NoVaccinationCard, false);
        c.attach(UploadedFile::new("front.jpg", "image/jpeg", vec![1, 2]))
            .expect("attach");
        c.attach(UploadedFile::new("back.jpg", "image/jpeg", vec![3]))
            .expect("attach");
        c.jump_to(6);

        assert_eq!(c.submit().await.expect("submitted"), SubmitOutcome::Submitted);
        assert!(c.is_completed());
        assert!(!c.is_submitting());
        assert_eq!(
            *api.uploaded.lock().expect("lock"),
            vec!["front.jpg".to_string(), "back.jpg".to_string()]
        );

        let submitted = api.submitted.lock().expect("lock");
        let (token, payload) = &submitted[0];
        assert_eq!(token, "abc123");
        assert_eq!(payload[FILE_IDS_KEY], json!(["f-1", "f-2"]));
        assert_eq!(payload["full_name"], "Jean Dupont");
        assert_eq!(payload["weight"], json!(61.5));
        drop(submitted);

        // Terminal state: navigation disabled.
        assert_eq!(c.advance().await, AdvanceOutcome::Locked);
        assert!(!c.jump_to(1));
        assert_eq!(c.retreat(), Step::Summary);
    }

    #[tokio::test]
    async fn no_upload_call_without_attachments() {
        let (mut c, api) = with_token(StubFormApi::new());
        fill_all(&mut c);
        c.jump_to(6);
        assert_eq!(c.submit().await.expect("ok"), SubmitOutcome::Submitted);
        assert_eq!(StubFormApi::calls(&api.upload_calls), 0);
        let submitted = api.submitted.lock().expect("lock");
        assert!(submitted[0].1.get(FILE_IDS_KEY).is_none());
    }

    #[tokio::test]
    async fn submit_failure_allows_retry() {
        let mut stub = StubFormApi::new();
        stub.submit = Err("Database unavailable".into());
        let (mut c, api) = with_token(stub);
        fill_all(&mut c);
        c.jump_to(6);

        let err = c.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Submit(_)));
        assert_eq!(err.user_message(), "Database unavailable");
        assert!(!c.is_submitting());
        assert!(!c.is_completed());
        assert_eq!(c.step(), Step::Summary);

        let _ = c.submit().await;
        assert_eq!(StubFormApi::calls(&api.submit_calls), 2, "user can retry");
    }

    #[tokio::test]
    async fn upload_failure_skips_submit() {
        let mut stub = StubFormApi::new();
        stub.upload = Err("Storage full".into());
        let (mut c, api) = with_token(stub);
        fill_all(&mut c);
        c.attach(UploadedFile::new("card.pdf", "application/pdf", vec![1]))
            .expect("attach");
        c.jump_to(6);

        assert!(matches!(c.submit().await, Err(SubmitError::Upload(_))));
        assert_eq!(StubFormApi::calls(&api.submit_calls), 0);
        assert!(!c.is_submitting());
    }

    #[tokio::test]
    async fn submit_without_token_when_required() {
        let (mut c, _) = controller(StubFormApi::new());
        fill_all(&mut c);
        c.jump_to(6);
        assert!(matches!(c.submit().await, Err(SubmitError::MissingToken)));
    }
}
