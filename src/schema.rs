//! One schema file in, one [`ValidationResult`] out.
//!
//! Flow: resolve the dialect, load the field list, walk every top-level
//! field, run the required-name check once, and in fix mode repair names
//! on a deep copy. Nothing here writes to disk; deciding whether to
//! persist `fixed` is the caller's policy.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::dialect::{self, DialectConfig};
use crate::error::{Error, Result};
use crate::field;
use crate::naming::CaseStyle;
use crate::required::{Position, RequiredFieldSpec};

// -------------------------------- Types ---------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// report only
    #[default]
    Lint,
    /// report, and prepare a corrected copy
    Fix,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Lint => "lint",
            Mode::Fix => "fix",
        })
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lint" => Ok(Mode::Lint),
            "fix" => Ok(Mode::Fix),
            _ => Err(Error::UnsupportedMode { name: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    pub dialect: String,
    pub case: CaseStyle,
    pub mode: Mode,
    pub required: RequiredFieldSpec,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dialect: "bigquery".to_string(),
            case: CaseStyle::Snake,
            mode: Mode::Lint,
            required: RequiredFieldSpec::default(),
        }
    }
}

impl Options {
    pub fn new(dialect: impl Into<String>, case: CaseStyle, mode: Mode) -> Self {
        Self { dialect: dialect.into(), case, mode, ..Self::default() }
    }

    pub fn with_required(mut self, spec: Option<&str>, position: Position) -> Self {
        self.required = RequiredFieldSpec::parse(spec, position);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// non-fixable messages, each prefixed with the file path
    pub errors: Vec<String>,
    /// naming messages fix mode can repair
    pub fixable: Vec<String>,
    /// corrected copy of the field list (fix mode only)
    pub fixed: Option<Vec<Value>>,
}

impl ValidationResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.fixable.is_empty()
    }

    /// The corrected document, if fix mode repaired anything.
    pub fn fixes(&self) -> Option<&[Value]> {
        match &self.fixed {
            Some(fixed) if !self.fixable.is_empty() => Some(fixed),
            _ => None,
        }
    }
}

// -------------------------------- Load ----------------------------------- //

/// Read and parse `path` into its top-level field list.
pub fn load_fields(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fields(&source, path)
}

/// Parse already-read `source`; `path` only labels errors.
pub fn parse_fields(source: &str, path: &Path) -> Result<Vec<Value>> {
    let value = serde_json::from_str::<Value>(source).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(fields) if fields.is_empty() => Err(Error::Empty { path: path.to_path_buf() }),
        Value::Array(fields) => Ok(fields),
        _ => Err(Error::NotAList { path: path.to_path_buf() }),
    }
}

// ------------------------------ Validate --------------------------------- //

pub fn validate_schema(path: &Path, options: &Options) -> Result<ValidationResult> {
    let dialect = dialect::resolve(&options.dialect)?;
    let fields = load_fields(path)?;
    debug!(path = %path.display(), fields = fields.len(), mode = %options.mode, "validating schema");
    Ok(validate_fields(&fields, &path.display().to_string(), dialect, options))
}

/// Validate an already-loaded field list. `label` prefixes every message.
pub fn validate_fields(
    fields: &[Value],
    label: &str,
    dialect: &DialectConfig,
    options: &Options,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut fixed = match options.mode {
        Mode::Fix => Some(fields.to_vec()),
        Mode::Lint => None,
    };

    for (i, entry) in fields.iter().enumerate() {
        let Value::Object(field) = entry else {
            result.errors.push(format!("{label}: Field {i} must be an object"));
            continue;
        };

        let report = field::validate(field, dialect, options.case, "", options.mode);
        result.errors.extend(report.errors.into_iter().map(|e| format!("{label}: {e}")));
        result.fixable.extend(report.fixable.into_iter().map(|e| format!("{label}: {e}")));

        if let Some(Value::Object(copy)) = fixed.as_mut().and_then(|f| f.get_mut(i)) {
            let renamed = field::apply_naming_fixes(copy, dialect, options.case);
            if renamed > 0 {
                debug!(%label, index = i, renamed, "prepared naming fixes");
            }
        }
    }

    result.errors.extend(options.required.check(fields, label));
    result.fixed = fixed;
    result
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bq() -> &'static DialectConfig {
        dialect::get("bigquery").unwrap()
    }

    fn run(fields: Value, options: &Options) -> ValidationResult {
        let fields = fields.as_array().unwrap().clone();
        validate_fields(&fields, "s.json", bq(), options)
    }

    #[test]
    fn non_object_entries_are_skipped_with_one_error() {
        let result = run(
            json!([
                "nope",
                {"name": "id", "type": "STRING", "mode": "NULLABLE", "description": "x"}
            ]),
            &Options::default(),
        );
        assert_eq!(result.errors, ["s.json: Field 0 must be an object"]);
        assert!(result.fixed.is_none());
    }

    #[test]
    fn every_message_carries_the_file_label() {
        let result = run(json!([{"name": "Id", "type": "STRING"}]), &Options::default());
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.iter().all(|e| e.starts_with("s.json: Field Id: ")));
    }

    #[test]
    fn fix_mode_repairs_a_copy_and_leaves_input_alone() {
        let input = json!([
            {"name": "CustomerId", "type": "STRING", "mode": "NULLABLE", "description": "x"},
            {"name": "Amount", "type": "VARCHAR", "mode": "NULLABLE", "description": "y"}
        ]);
        let fields = input.as_array().unwrap().clone();
        let options = Options::new("bigquery", CaseStyle::Snake, Mode::Fix);
        let result = validate_fields(&fields, "s.json", bq(), &options);

        assert_eq!(Value::Array(fields), input);
        assert_eq!(result.fixable.len(), 2);
        assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
        assert_eq!(
            Value::Array(result.fixes().unwrap().to_vec()),
            json!([
                {"name": "customer_id", "type": "STRING", "mode": "NULLABLE", "description": "x"},
                {"name": "amount", "type": "VARCHAR", "mode": "NULLABLE", "description": "y"}
            ])
        );
    }

    #[test]
    fn fix_mode_without_naming_problems_has_nothing_to_persist() {
        let options = Options::new("bigquery", CaseStyle::Snake, Mode::Fix);
        let result = run(json!([{"name": "id", "type": "STRING", "mode": "NULLABLE", "description": "x"}]), &options);
        assert!(result.is_clean());
        assert!(result.fixed.is_some());
        assert!(result.fixes().is_none());
    }

    #[test]
    fn required_names_are_checked_once_over_top_level() {
        let options = Options::default().with_required(Some("insert_date,update_date"), Position::End);
        let result = run(
            json!([
                {"name": "insert_date", "type": "TIMESTAMP", "mode": "REQUIRED", "description": "x"},
                {"name": "update_date", "type": "TIMESTAMP", "mode": "NULLABLE", "description": "x"},
                {"name": "data_field", "type": "STRING", "mode": "REQUIRED", "description": "x"}
            ]),
            &options,
        );
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("s.json: Required field names must be at end"));
    }

    #[test]
    fn load_shape_errors() {
        let p = Path::new("x.json");
        assert!(matches!(parse_fields("{}", p), Err(Error::NotAList { .. })));
        assert!(matches!(parse_fields("[]", p), Err(Error::Empty { .. })));
        let err = parse_fields("[{", p).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in x.json: "));
    }

    #[test]
    fn unknown_dialect_aborts_before_loading() {
        let options = Options::new("hive", CaseStyle::Snake, Mode::Lint);
        let err = validate_schema(Path::new("does/not/exist.json"), &options).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDialect { .. }));
    }

    #[test]
    fn modes_parse() {
        assert_eq!("fix".parse::<Mode>().unwrap(), Mode::Fix);
        assert!("repair".parse::<Mode>().is_err());
    }
}
