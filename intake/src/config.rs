// Application settings
// Built-in defaults, then an optional `intake.toml`, then `INTAKE__SECTION__KEY` environment variables.

use crate::api::public::PublicDataClient;
use crate::error::ApiError;
use crate::i18n::Language;
use crate::wizard::attachments::{AttachmentLimits, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE};
use crate::wizard::controller::ControllerOptions;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "INTAKE";

const DEFAULT_FORM_API_BASE: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: i64 = 30;
const DEFAULT_AUTOSAVE_SECS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormApiSettings {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub bearer_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicDataSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSettings {
    pub autosave_interval_secs: u64,
    pub max_files: usize,
    pub max_file_size_bytes: u64,
    pub require_token: bool,
    #[serde(default)]
    pub access_denied_redirect: Option<String>,
    pub default_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSettings {
    pub form_api: FormApiSettings,
    #[serde(default)]
    pub public_data: PublicDataSettings,
    pub wizard: WizardSettings,
}

impl IntakeSettings {
    /// Load settings. An explicit `path` must exist; without one the default
    /// `intake.toml` location is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("form_api.base_url", DEFAULT_FORM_API_BASE)?
            .set_default("form_api.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("wizard.autosave_interval_secs", DEFAULT_AUTOSAVE_SECS)?
            .set_default("wizard.max_files", DEFAULT_MAX_FILES as i64)?
            .set_default("wizard.max_file_size_bytes", DEFAULT_MAX_FILE_SIZE as i64)?
            .set_default("wizard.require_token", true)?
            .set_default("wizard.default_language", Language::DEFAULT.code())?;

        match path {
            Some(p) => {
                info!(
                    "[PHASE: config] [STEP: load] Loading settings from {:?}",
                    p
                );
                builder = builder.add_source(
                    File::from(p.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                if let Some(p) = crate::utils::path_resolver::resolve_default_config_file() {
                    info!(
                        "[PHASE: config] [STEP: load] Loading settings from {:?}",
                        p
                    );
                    builder = builder.add_source(File::from(p).format(FileFormat::Toml).required(false));
                } else {
                    debug!("[PHASE: config] [STEP: load] No settings file, using defaults");
                }
            }
        }

        let settings: IntakeSettings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        Ok(settings)
    }

    /// Effective settings as TOML (secrets omitted).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render settings")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.form_api.timeout_secs.max(1))
    }

    /// Unknown codes fall back to French.
    pub fn default_language(&self) -> Language {
        Language::parse(&self.wizard.default_language).unwrap_or(Language::DEFAULT)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            autosave_interval: Duration::from_secs(self.wizard.autosave_interval_secs.max(1)),
            require_token: self.wizard.require_token,
            access_denied_redirect: self
                .wizard
                .access_denied_redirect
                .clone()
                .filter(|s| !s.trim().is_empty()),
            limits: AttachmentLimits {
                max_files: self.wizard.max_files,
                max_file_size: self.wizard.max_file_size_bytes,
            },
        }
    }

    /// Public-data client, initialized only when both base URL and key are configured.
    pub fn public_data_client(&self) -> Result<PublicDataClient, ApiError> {
        let mut client = PublicDataClient::new();
        let base = self.public_data.base_url.as_deref().filter(|s| !s.trim().is_empty());
        let key = self.public_data.api_key.as_deref().filter(|s| !s.trim().is_empty());
        if let (Some(base), Some(key)) = (base, key) {
            client.initialize(base, key, self.request_timeout())?;
        }
        Ok(client)
    }
}
