//! Field validation against a dialect and a naming convention.
//!
//! A field is a JSON object; composite fields (the dialect's
//! `composite_type`) carry their children under `fields`. The walk is plain
//! structural recursion and never mutates its input. Fix mode works on a
//! separate copy through [`apply_naming_fixes`].
use serde_json::{Map, Value};
use tracing::trace;

use crate::dialect::DialectConfig;
use crate::naming::CaseStyle;
use crate::schema::Mode;

/// Path segment shown for fields without a usable `name`.
pub const UNNAMED: &str = "UNNAMED";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// structural, type, mode and (in lint mode) naming problems
    pub errors: Vec<String>,
    /// naming problems that fix mode can repair
    pub fixable: Vec<String>,
}

impl FieldReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.fixable.is_empty()
    }
}

// ------------------------------- Validate -------------------------------- //

/// Validate `field` and everything nested under it. `parent` is the dotted
/// path of the enclosing field, empty at the top level.
pub fn validate(
    field: &Map<String, Value>,
    dialect: &DialectConfig,
    case: CaseStyle,
    parent: &str,
    mode: Mode,
) -> FieldReport {
    let mut report = FieldReport::default();
    validate_into(field, dialect, case, parent, mode, &mut report);
    report
}

fn validate_into(
    field: &Map<String, Value>,
    dialect: &DialectConfig,
    case: CaseStyle,
    parent: &str,
    mode: Mode,
    report: &mut FieldReport,
) {
    let path = child_path(parent, field.get("name"));
    trace!(%path, "validating field");

    for attr in &dialect.required_attrs {
        match field.get(*attr) {
            None => report
                .errors
                .push(format!("Field {path}: Missing required attribute '{attr}'")),
            Some(value) if is_blank(value) => report
                .errors
                .push(format!("Field {path}: Attribute '{attr}' cannot be empty")),
            Some(_) => {}
        }
    }

    match field.get("name") {
        Some(Value::String(name)) => {
            if let Some(msg) = case.validate(name) {
                let msg = format!("Field {path}: {msg}");
                // a name with nothing to keep cannot be repaired mechanically
                if mode == Mode::Fix && case.fix(name).is_some() {
                    report.fixable.push(msg);
                } else {
                    report.errors.push(msg);
                }
            }
        }
        None | Some(Value::Null) => {}
        Some(_) => report
            .errors
            .push(format!("Field {path}: Attribute 'name' must be a string")),
    }

    if let Some(ty) = field.get("type") {
        if !is_member(&dialect.types, ty) {
            report.errors.push(format!(
                "Field {path}: Invalid type '{}'. Valid types: {}",
                show(ty),
                dialect.sorted_types().join(", ")
            ));
        }
    }

    if let Some(mode_value) = field.get("mode") {
        if !is_member(&dialect.modes, mode_value) {
            report.errors.push(format!(
                "Field {path}: Invalid mode '{}'. Valid modes: {}",
                show(mode_value),
                dialect.sorted_modes().join(", ")
            ));
        }
    }

    if !dialect.is_composite(field.get("type")) {
        return;
    }
    match field.get("fields") {
        None => {}
        Some(Value::Array(children)) => {
            for (i, child) in children.iter().enumerate() {
                match child {
                    Value::Object(child) => validate_into(child, dialect, case, &path, mode, report),
                    _ => report
                        .errors
                        .push(format!("Field {path}: Nested field {i} must be an object")),
                }
            }
        }
        Some(_) => report.errors.push(format!(
            "Field {path}: 'fields' must be a list for {} type",
            dialect.composite_type.unwrap_or("composite")
        )),
    }
}

// --------------------------------- Fix ----------------------------------- //

/// Rename every invalid `name` in `field` and its composite children.
/// Only `name` is ever written. Returns how many names changed.
pub fn apply_naming_fixes(
    field: &mut Map<String, Value>,
    dialect: &DialectConfig,
    case: CaseStyle,
) -> usize {
    let mut changed = 0;
    if let Some(Value::String(name)) = field.get_mut("name") {
        if let Some(fixed) = case.fix(name) {
            trace!(from = %name, to = %fixed, "renaming field");
            *name = fixed;
            changed += 1;
        }
    }
    if dialect.is_composite(field.get("type")) {
        if let Some(Value::Array(children)) = field.get_mut("fields") {
            for child in children.iter_mut() {
                if let Value::Object(child) = child {
                    changed += apply_naming_fixes(child, dialect, case);
                }
            }
        }
    }
    changed
}

// ------------------------------- Helpers --------------------------------- //

pub fn child_path(parent: &str, name: Option<&Value>) -> String {
    let name = name
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNNAMED);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Present but carrying nothing: null, false, 0, "", [] or {}.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(xs) => xs.is_empty(),
        Value::Object(m) => m.is_empty(),
    }
}

fn is_member(set: &indexmap::IndexSet<&'static str>, value: &Value) -> bool {
    value.as_str().is_some_and(|s| set.contains(s))
}

fn show(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ------------------------------- Tests ------------------------------------ //
