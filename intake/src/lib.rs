// Travel-medicine intake wizard
// Main library entry point

pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod reference;
pub mod tui;
pub mod utils;
pub mod wizard;

use crate::config::IntakeSettings;
use crate::i18n::Language;
use crate::models::preferences::PreferenceStore;
use crate::wizard::entry::{parse_entry_url, EntryParams};
use log::{error, info, warn};
use std::path::PathBuf;

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging(with_stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = utils::path_resolver::resolve_log_folder()?;
    std::fs::create_dir_all(&log_dir)?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    let json_log_file = log_dir.join(format!("intake-{}.log", timestamp));
    let txt_log_file = log_dir.join(format!("intake-{}.txt", timestamp));

    // stdout stays off in TUI mode so the terminal UI is not corrupted
    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}", txt_line));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                        None,
                    );
                    out.finish(format_args!("{}\n", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", txt_line));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    log::info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(())
}

/// Command-line choices, parsed in `main`.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Entry URL carrying `token` or `edit`.
    pub url: Option<String>,
    pub config_path: Option<PathBuf>,
    /// Language code forced on the command line.
    pub lang: Option<String>,
}

fn load_settings(options: &LaunchOptions) -> anyhow::Result<IntakeSettings> {
    IntakeSettings::load(options.config_path.as_deref())
}

fn preference_store() -> Option<PreferenceStore> {
    match utils::path_resolver::resolve_preferences_file() {
        Ok(path) => Some(PreferenceStore::new(path)),
        Err(e) => {
            warn!(
                "[PHASE: initialization] [STEP: preferences] No preference file location: {}",
                e
            );
            None
        }
    }
}

/// `--lang`, then the stored choice, then the configured default.
fn initial_language(
    options: &LaunchOptions,
    preferences: Option<&PreferenceStore>,
    settings: &IntakeSettings,
) -> Language {
    if let Some(code) = options.lang.as_deref() {
        match Language::parse(code) {
            Some(lang) => return lang,
            None => warn!(
                "[PHASE: initialization] [STEP: language] Unsupported language '{}' ignored",
                code
            ),
        }
    }
    preferences
        .and_then(PreferenceStore::load_language)
        .unwrap_or_else(|| settings.default_language())
}

fn entry_params(options: &LaunchOptions) -> EntryParams {
    let Some(raw) = options.url.as_deref() else {
        return EntryParams::default();
    };
    info!(
        "[PHASE: initialization] [STEP: entry_url] Entry URL: {}",
        utils::logging::mask_entry_url(raw)
    );
    match parse_entry_url(raw) {
        Ok(params) => params,
        Err(e) => {
            warn!(
                "[PHASE: initialization] [STEP: entry_url] Entry URL could not be parsed: {}",
                e
            );
            EntryParams::default()
        }
    }
}

/// Interactive terminal wizard.
pub fn run_tui(options: LaunchOptions) {
    // Initialize logging (no stdout to avoid corrupting the TUI)
    if let Err(e) = init_logging(false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Intake wizard starting at {}",
        chrono::Utc::now()
    );

    match utils::path_resolver::resolve_deployment_folder() {
        Ok(folder) => info!(
            "[PHASE: initialization] [STEP: deployment_folder] Deployment folder: {:?}",
            folder
        ),
        Err(e) => warn!(
            "[PHASE: initialization] [STEP: deployment_folder] Deployment folder unknown: {}",
            e
        ),
    }

    let settings = match load_settings(&options) {
        Ok(s) => s,
        Err(e) => {
            error!("[PHASE: config] [STEP: fatal] {:?}", e);
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(2);
        }
    };

    match settings.public_data_client() {
        Ok(client) if client.is_initialized() => {
            info!("[PHASE: initialization] [STEP: public_data] Public data lookups enabled")
        }
        Ok(_) => info!("[PHASE: initialization] [STEP: public_data] Public data lookups not configured"),
        Err(e) => warn!(
            "[PHASE: initialization] [STEP: public_data] Public data client unavailable: {}",
            e
        ),
    }

    let preferences = preference_store();
    let language = initial_language(&options, preferences.as_ref(), &settings);
    let launch = tui::TuiLaunch {
        entry: entry_params(&options),
        language,
        preferences,
        settings,
    };

    if let Err(e) = tui::run(launch) {
        error!("[PHASE: tui] [STEP: fatal] TUI exited with error: {:?}", e);
        eprintln!("Intake wizard error: {}", e);
    }
}

/// Non-interactive TUI smoke mode (for automated checks).
/// Renders a single frame to an in-memory backend and exits.
pub fn run_tui_smoke(options: LaunchOptions, target: Option<String>) {
    // Initialize logging (no stdout to avoid corrupting the terminal)
    if let Err(e) = init_logging(false) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] TUI smoke starting at {}",
        chrono::Utc::now()
    );

    let target = target.as_deref().unwrap_or("identity");
    let result = load_settings(&options).and_then(|settings| tui::smoke(&settings, target));
    if let Err(e) = result {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Intake wizard error: {}", e);
        std::process::exit(1);
    }
}

/// Print the effective settings (defaults, file, environment) as TOML, secrets omitted.
pub fn print_config(options: LaunchOptions) {
    match load_settings(&options).and_then(|s| s.to_toml()) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::entry::EntryToken;

    #[test]
    fn command_line_language_wins() {
        let settings = IntakeSettings::load(None).expect("settings");
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        store.save_language(Language::It).expect("save");

        let forced = LaunchOptions {
            lang: Some("de".into()),
            ..Default::default()
        };
        assert_eq!(initial_language(&forced, Some(&store), &settings), Language::De);

        let unsupported = LaunchOptions {
            lang: Some("es".into()),
            ..Default::default()
        };
        assert_eq!(
            initial_language(&unsupported, Some(&store), &settings),
            Language::It
        );
        assert_eq!(
            initial_language(&LaunchOptions::default(), None, &settings),
            settings.default_language()
        );
    }

    #[test]
    fn entry_url_is_parsed_or_ignored() {
        let options = LaunchOptions {
            url: Some("https://forms.example.org/intake?edit=draft456".into()),
            ..Default::default()
        };
        assert_eq!(
            entry_params(&options).token,
            Some(EntryToken::Resume("draft456".into()))
        );

        let broken = LaunchOptions {
            url: Some("::not a url::".into()),
            ..Default::default()
        };
        assert_eq!(entry_params(&broken), EntryParams::default());
    }
}
