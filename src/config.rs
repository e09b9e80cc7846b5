//! Optional JSON settings file. Values here sit under CLI flags and over
//! the built-in defaults.
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub file_type: Option<String>,
    pub path_regex: Option<String>,
    pub dialect: Option<String>,
    pub case: Option<String>,
    pub mode: Option<String>,
    pub required_fields: Option<String>,
    pub position: Option<String>,
    pub fix_policy: Option<String>,
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        from_str_with_path(&source).map_err(|message| Error::Settings {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        format!("at JSON path {path} → {}", err.into_inner())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings() {
        let s: Settings = from_str_with_path(r#"{"case": "camel", "position": "end"}"#).unwrap();
        assert_eq!(s.case.as_deref(), Some("camel"));
        assert_eq!(s.position.as_deref(), Some("end"));
        assert!(s.dialect.is_none());
    }

    #[test]
    fn errors_carry_the_json_path() {
        let err = from_str_with_path::<Settings>(r#"{"mode": 3}"#).unwrap_err();
        assert!(err.starts_with("at JSON path mode → "), "{err}");
        let err = from_str_with_path::<Settings>(r#"{"colour": "red"}"#).unwrap_err();
        assert!(err.contains("unknown field `colour`"), "{err}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Settings::from_path(Path::new("no/such/settings.json")).unwrap_err();
        assert!(err.to_string().starts_with("Error reading no/such/settings.json: "));
    }
}
