// CustView - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The engine itself has no fallible paths (the record source is total);
// errors come from configuration loading and export.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all CustView operations.
#[derive(Debug)]
pub enum CustViewError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for CustViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CustViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and engine settings.
#[derive(Debug)]
pub enum ConfigError {
    /// config.toml is not valid TOML or has the wrong shape.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An engine or UI setting is outside its accepted range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// config.toml exists but could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Invalid TOML in '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Setting '{field}' has value {value}; expected {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Cannot read config '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::ValueOutOfRange { .. } => None,
        }
    }
}

impl From<ConfigError> for CustViewError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to exporting the displayed rows.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot write '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV encoding failed for '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON encoding failed for '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for CustViewError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

pub type Result<T> = std::result::Result<T, CustViewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display_names_field() {
        let err = ConfigError::ValueOutOfRange {
            field: "dataset.page_size".to_string(),
            value: "0".to_string(),
            expected: "1-10000".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("dataset.page_size"));
        assert!(msg.contains("1-10000"));
    }

    #[test]
    fn test_top_level_error_preserves_source_chain() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: CustViewError = ExportError::Io {
            path: PathBuf::from("out.csv"),
            source: io,
        }
        .into();
        assert!(err.to_string().starts_with("Export error"));
        let export = err.source().expect("export error should be the source");
        assert!(export.source().is_some(), "io error should be chained");
    }
}
