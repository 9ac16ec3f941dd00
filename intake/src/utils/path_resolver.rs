use anyhow::Result;
use std::path::PathBuf;

const LOG_FOLDER_NAME: &str = "Intake_Log";
const APP_DIR_NAME: &str = "travel-intake";

/// Resolve deployment folder (absolute path)
pub fn resolve_deployment_folder() -> Result<PathBuf> {
    // Prefer the folder where the EXE is running from (works in dev and deployed)
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return Ok(dir.to_path_buf());
        }
    }

    // Fallback: current working directory
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    Ok(cwd)
}

/// Resolve log folder (absolute path)
///
/// Order:
/// - `INTAKE_LOG_DIR` when set
/// - an existing `Intake_Log/` in the CWD or one of its parents
/// - `<data_local_dir>/travel-intake/logs`
/// - `<deployment folder>/Intake_Log`
pub fn resolve_log_folder() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("INTAKE_LOG_DIR").filter(|v| !v.is_empty()) {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
        return Ok(dir);
    }

    if let Ok(mut dir) = std::env::current_dir() {
        for _ in 0..12 {
            let candidate = dir.join(LOG_FOLDER_NAME);
            if candidate.is_dir() {
                return Ok(candidate);
            }

            if let Some(parent) = dir.parent() {
                dir = parent.to_path_buf();
            } else {
                break;
            }
        }
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let log_dir = data_dir.join(APP_DIR_NAME).join("logs");
        if std::fs::create_dir_all(&log_dir).is_ok() {
            return Ok(log_dir);
        }
    }

    // Fallback: base off the deployment folder (best-effort).
    let base = resolve_deployment_folder()?;
    let log_dir = base.join(LOG_FOLDER_NAME);
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
    Ok(log_dir)
}

/// Resolve the preferences file (UI language and other per-user state).
pub fn resolve_preferences_file() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("No config or home directory available"))?;
    Ok(base.join(APP_DIR_NAME).join("preferences.json"))
}

/// Default location of the optional settings file (`intake.toml`).
pub fn resolve_default_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("intake.toml");
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME).join("intake.toml"))
        .filter(|p| p.exists())
}
