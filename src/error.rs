//! Load and configuration failures.
//!
//! Per-field findings (structural, naming, required-name ordering) are not
//! errors in this sense: they are collected as messages in
//! [`crate::schema::ValidationResult`] so a single run reports all of them.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // ---- load errors: fatal for one file only ----
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: Schema must be a list of field objects", .path.display())]
    NotAList { path: PathBuf },

    #[error("{}: Schema cannot be empty", .path.display())]
    Empty { path: PathBuf },

    // ---- configuration errors: fatal for the invocation ----
    #[error("Unsupported dialect '{name}'. Available dialects: {}", .available.join(", "))]
    UnsupportedDialect { name: String, available: Vec<&'static str> },

    #[error("Unsupported case style '{name}'. Supported: {}", crate::naming::CaseStyle::ids().join(", "))]
    UnsupportedCase { name: String },

    #[error("Unsupported mode '{name}'. Supported: lint, fix")]
    UnsupportedMode { name: String },

    #[error("Unsupported position '{name}'. Supported: any, beginning, end")]
    UnsupportedPosition { name: String },

    #[error("Invalid settings file {}: {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

impl Error {
    /// Configuration problems abort the whole run; load problems skip one file.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedDialect { .. }
                | Error::UnsupportedCase { .. }
                | Error::UnsupportedMode { .. }
                | Error::UnsupportedPosition { .. }
                | Error::Settings { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_messages_name_the_file() {
        let err = Error::NotAList { path: PathBuf::from("schemas/a.json") };
        assert_eq!(err.to_string(), "schemas/a.json: Schema must be a list of field objects");
        assert!(!err.is_config());
    }

    #[test]
    fn unsupported_case_lists_every_style() {
        let err = Error::UnsupportedCase { name: "screaming".into() };
        assert_eq!(
            err.to_string(),
            "Unsupported case style 'screaming'. Supported: snake, camel, pascal, upper, kebab, train, flat, cobol, title"
        );
        assert!(err.is_config());
    }
}
