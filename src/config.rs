//! Runtime settings read from the environment (and `.env`, via `dotenvy`).

use std::path::{Path, PathBuf};

const DEFAULT_LOG_FILE: &str = "logs/sgpa_calc.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Where the JSON log file rolls daily.
    pub log_file_path: PathBuf,
    /// Whether the JSON file log is written at all.
    pub file_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
            file_log: true,
        }
    }
}

impl Settings {
    /// Reads `LOG_FILE_PATH` and `SGPA_CALC_FILE_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log_file_path = lookup("LOG_FILE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file_path);
        let file_log = lookup("SGPA_CALC_FILE_LOG")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(defaults.file_log);

        Self {
            log_file_path,
            file_log,
        }
    }

    pub fn log_dir(&self) -> &Path {
        self.log_file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"))
    }

    pub fn log_file_name(&self) -> &std::ffi::OsStr {
        self.log_file_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("sgpa_calc.log"))
    }
}
