// CustView - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::EngineConfig;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for CustView configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/custview/ or %APPDATA%\CustView\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so a newer config file still loads.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[dataset]` section.
    pub dataset: DatasetSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[dataset]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    /// Logical number of customer records.
    pub total_records: Option<usize>,
    /// Rows per page load.
    pub page_size: Option<usize>,
    /// Records scanned between search progress updates.
    pub scan_chunk: Option<usize>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Search box settle delay in ms.
    pub debounce_ms: Option<u64>,
    /// Remaining scroll distance that loads the next page.
    pub scroll_threshold: Option<f32>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Engine sizes and timings.
    pub engine: EngineConfig,
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Path of `config.toml` inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Read and parse `config.toml`. `Ok(None)` when the file does not exist.
pub fn read_raw_config(path: &Path) -> Result<Option<RawConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(raw))
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults plus a warning; the application still
/// starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);
    let mut warnings: Vec<String> = Vec::new();

    let raw = match read_raw_config(&path) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
            return (AppConfig::default(), warnings);
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();
    let defaults = EngineConfig::default();

    // -- Dataset --
    if let Some(total) = raw.dataset.total_records {
        if (1..=constants::MAX_TOTAL_RECORDS).contains(&total) {
            config.engine.total_records = total;
        } else {
            warnings.push(format!(
                "[dataset] total_records = {total} is out of range (1-{}). Using default ({}).",
                constants::MAX_TOTAL_RECORDS,
                defaults.total_records,
            ));
        }
    }

    if let Some(size) = raw.dataset.page_size {
        if (1..=constants::MAX_PAGE_SIZE).contains(&size) {
            config.engine.page_size = size;
        } else {
            warnings.push(format!(
                "[dataset] page_size = {size} is out of range (1-{}). Using default ({}).",
                constants::MAX_PAGE_SIZE,
                defaults.page_size,
            ));
        }
    }

    if let Some(chunk) = raw.dataset.scan_chunk {
        if (1..=constants::MAX_SCAN_CHUNK).contains(&chunk) {
            config.engine.scan_chunk = chunk;
        } else {
            warnings.push(format!(
                "[dataset] scan_chunk = {chunk} is out of range (1-{}). Using default ({}).",
                constants::MAX_SCAN_CHUNK,
                defaults.scan_chunk,
            ));
        }
    }

    // -- UI --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    if let Some(ms) = raw.ui.debounce_ms {
        if ms <= constants::MAX_DEBOUNCE_DELAY_MS {
            config.engine.debounce_ms = ms;
        } else {
            warnings.push(format!(
                "[ui] debounce_ms = {ms} is out of range (0-{}). Using default ({}).",
                constants::MAX_DEBOUNCE_DELAY_MS,
                defaults.debounce_ms,
            ));
        }
    }

    if let Some(threshold) = raw.ui.scroll_threshold {
        if (0.0..=constants::MAX_SCROLL_THRESHOLD).contains(&threshold) {
            config.engine.scroll_threshold = threshold;
        } else {
            warnings.push(format!(
                "[ui] scroll_threshold = {threshold} is out of range (0-{}). Using default ({}).",
                constants::MAX_SCROLL_THRESHOLD,
                defaults.scroll_threshold,
            ));
        }
    }

    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        std::fs::write(config_path(dir.path()), content).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.dark_mode);
    }

    #[test]
    fn test_valid_values_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[dataset]
total_records = 5000
page_size = 50
scan_chunk = 500

[ui]
theme = "light"
debounce_ms = 100
scroll_threshold = 120.0

[logging]
level = "debug"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.engine.total_records, 5_000);
        assert_eq!(config.engine.page_size, 50);
        assert_eq!(config.engine.scan_chunk, 500);
        assert_eq!(config.engine.debounce_ms, 100);
        assert_eq!(config.engine.scroll_threshold, 120.0);
        assert!(!config.dark_mode);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_default() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "[dataset]\npage_size = 0\nscan_chunk = 0\n[ui]\ntheme = \"purple\"\n",
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.engine.page_size, 30);
        assert_eq!(config.engine.scan_chunk, 10_000);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[dataset\npage_size = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Invalid TOML"));
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[future]\nflag = true\n[dataset]\npage_size = 10\n");
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.engine.page_size, 10);
    }
}
