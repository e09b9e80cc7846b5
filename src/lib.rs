//! Lint (and optionally fix) schema field lists: dialect types/modes/attributes,
//! field-naming conventions, and placement of required top-level names.
pub mod cli;
pub mod config;
pub mod dialect;
pub mod error;
pub mod field;
pub mod naming;
pub mod report;
pub mod required;
pub mod schema;

pub use error::{Error, Result};
pub use naming::CaseStyle;
pub use required::{Position, RequiredFieldSpec};
pub use schema::{Mode, Options, ValidationResult, validate_schema};
