//! Dialect registry: which types, modes and attributes a schema field may use.
//!
//! Dialects are plain static tables. Adding one means writing a
//! [`DialectTable`] and listing it in `ACTIVE`; tables that are not listed
//! there are drafts and stay invisible to [`get`] and [`is_supported`].
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

// -------------------------------- Tables --------------------------------- //

#[derive(Debug)]
pub struct DialectTable {
    pub name: &'static str,
    pub types: &'static [&'static str],
    pub modes: &'static [&'static str],
    pub required_attrs: &'static [&'static str],
    pub optional_attrs: &'static [&'static str],
    /// Type whose fields nest further fields under `fields`.
    pub composite_type: Option<&'static str>,
}

pub const BIGQUERY: DialectTable = DialectTable {
    name: "bigquery",
    types: &[
        "STRING", "BYTES", "INTEGER", "INT64", "FLOAT", "FLOAT64", "NUMERIC",
        "BIGNUMERIC", "BOOLEAN", "BOOL", "TIMESTAMP", "DATE", "TIME",
        "DATETIME", "GEOGRAPHY", "RECORD", "STRUCT",
    ],
    modes: &["NULLABLE", "REQUIRED", "REPEATED"],
    required_attrs: &["name", "type", "mode", "description"],
    optional_attrs: &["fields"],
    composite_type: Some("RECORD"),
};

pub const POSTGRESQL: DialectTable = DialectTable {
    name: "postgresql",
    types: &[
        "bigint", "bigserial", "bit", "boolean", "box", "bytea", "character",
        "character varying", "cidr", "circle", "date", "double precision",
        "inet", "integer", "interval", "json", "jsonb", "line", "lseg",
        "macaddr", "money", "numeric", "path", "pg_lsn", "point", "polygon",
        "real", "smallint", "smallserial", "serial", "text", "time",
        "timestamp", "tsquery", "tsvector", "txid_snapshot", "uuid", "xml",
    ],
    modes: &["NOT NULL", "NULL"],
    required_attrs: &["name", "type", "description"],
    optional_attrs: &["constraints", "default"],
    composite_type: None,
};

pub const HIVE: DialectTable = DialectTable {
    name: "hive",
    types: &[
        "tinyint", "smallint", "int", "bigint", "boolean", "float", "double",
        "string", "timestamp", "binary", "decimal", "char", "varchar", "date",
        "array", "map", "struct", "uniontype",
    ],
    modes: &["NOT NULL", "NULL"],
    required_attrs: &["name", "type", "description"],
    optional_attrs: &["comment", "partitioned"],
    composite_type: Some("struct"),
};

pub const SQLSERVER: DialectTable = DialectTable {
    name: "sqlserver",
    types: &[
        "bigint", "binary", "bit", "char", "date", "datetime", "datetime2",
        "datetimeoffset", "decimal", "float", "geography", "geometry",
        "hierarchyid", "image", "int", "money", "nchar", "ntext", "numeric",
        "nvarchar", "real", "smalldatetime", "smallint", "smallmoney",
        "sql_variant", "text", "time", "timestamp", "tinyint", "uniqueidentifier",
        "varbinary", "varchar", "xml",
    ],
    modes: &["NOT NULL", "NULL"],
    required_attrs: &["name", "type", "description"],
    optional_attrs: &["constraints", "default", "identity"],
    composite_type: None,
};

/// Dialects served by the registry, in listing order.
const ACTIVE: &[&DialectTable] = &[&BIGQUERY];

/// Described but not yet validated against.
pub const DRAFTS: &[&DialectTable] = &[&POSTGRESQL, &HIVE, &SQLSERVER];

// ------------------------------- Registry -------------------------------- //

#[derive(Debug, Clone)]
pub struct DialectConfig {
    pub name: &'static str,
    pub types: IndexSet<&'static str>,
    pub modes: IndexSet<&'static str>,
    pub required_attrs: IndexSet<&'static str>,
    pub optional_attrs: IndexSet<&'static str>,
    pub composite_type: Option<&'static str>,
}

impl DialectConfig {
    fn from_table(table: &DialectTable) -> Self {
        Self {
            name: table.name,
            types: table.types.iter().copied().collect(),
            modes: table.modes.iter().copied().collect(),
            required_attrs: table.required_attrs.iter().copied().collect(),
            optional_attrs: table.optional_attrs.iter().copied().collect(),
            composite_type: table.composite_type,
        }
    }

    pub fn sorted_types(&self) -> Vec<&'static str> {
        sorted(&self.types)
    }

    pub fn sorted_modes(&self) -> Vec<&'static str> {
        sorted(&self.modes)
    }

    pub fn is_composite(&self, ty: Option<&Value>) -> bool {
        match (self.composite_type, ty.and_then(Value::as_str)) {
            (Some(composite), Some(ty)) => composite == ty,
            _ => false,
        }
    }
}

static REGISTRY: Lazy<IndexMap<&'static str, DialectConfig>> = Lazy::new(|| {
    ACTIVE
        .iter()
        .map(|table| (table.name, DialectConfig::from_table(table)))
        .collect()
});

pub fn get(name: &str) -> Option<&'static DialectConfig> {
    REGISTRY.get(name)
}

/// Like [`get`], but an unknown name is a configuration error.
pub fn resolve(name: &str) -> Result<&'static DialectConfig> {
    get(name).ok_or_else(|| Error::UnsupportedDialect {
        name: name.to_string(),
        available: list_dialects(),
    })
}

pub fn list_dialects() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

pub fn is_supported(name: &str) -> bool {
    REGISTRY.contains_key(name)
}

// --------------------------- Introspection ------------------------------- //

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DialectInfo {
    pub name: &'static str,
    pub types_count: usize,
    pub modes_count: usize,
    pub required_attrs: Vec<&'static str>,
    pub optional_attrs: Vec<&'static str>,
    pub supported_types: Vec<&'static str>,
    pub supported_modes: Vec<&'static str>,
}

pub fn info(name: &str) -> Option<DialectInfo> {
    let config = get(name)?;
    Some(DialectInfo {
        name: config.name,
        types_count: config.types.len(),
        modes_count: config.modes.len(),
        required_attrs: sorted(&config.required_attrs),
        optional_attrs: sorted(&config.optional_attrs),
        supported_types: config.sorted_types(),
        supported_modes: config.sorted_modes(),
    })
}

fn sorted(set: &IndexSet<&'static str>) -> Vec<&'static str> {
    let mut out: Vec<_> = set.iter().copied().collect();
    out.sort_unstable();
    out
}

// ------------------------------- Tests ------------------------------------ //
