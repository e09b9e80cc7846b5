//! Presence, order and placement of caller-required top-level field names.
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// required names keep their relative order; other fields may sit between them
    #[default]
    Any,
    /// required names are exactly the first top-level fields
    Beginning,
    /// required names are exactly the last top-level fields
    End,
}

impl Position {
    pub fn id(self) -> &'static str {
        match self {
            Position::Any => "any",
            Position::Beginning => "beginning",
            Position::End => "end",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Position::Any),
            "beginning" => Ok(Position::Beginning),
            "end" => Ok(Position::End),
            _ => Err(Error::UnsupportedPosition { name: s.to_string() }),
        }
    }
}

/// Ordered required names plus where they must sit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequiredFieldSpec {
    names: Vec<String>,
    position: Position,
}

impl RequiredFieldSpec {
    /// Parse `"a, b ,c"`. Blank entries are dropped and repeats are kept, so
    /// `a,a` requires two `a` fields. An absent or blank spec requires nothing.
    pub fn parse(spec: Option<&str>, position: Position) -> Self {
        let names = spec
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names, position }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// At most one message: presence, then order, then placement.
    pub fn check(&self, fields: &[Value], path: &str) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let top: Vec<Option<&str>> = fields
            .iter()
            .map(|f| f.get("name").and_then(Value::as_str))
            .collect();

        let missing: Vec<&str> = self
            .names()
            .filter(|name| !top.contains(&Some(name)))
            .collect();
        if !missing.is_empty() {
            return vec![format!(
                "{path}: Missing required field names: {}",
                missing.join(", ")
            )];
        }

        let expected = format!("[{}]", self.names().collect::<Vec<_>>().join(", "));

        let found = top
            .iter()
            .flatten()
            .copied()
            .filter(|name| self.names.iter().any(|n| n == name));
        if !found.eq(self.names()) {
            return vec![format!(
                "{path}: Required field names out of order. Expected order: {expected}"
            )];
        }

        let n = self.names.len();
        let wanted = || self.names().map(Some);
        let placed = match self.position {
            Position::Any => true,
            Position::Beginning => top.iter().take(n).copied().eq(wanted()),
            Position::End => top.iter().skip(top.len().saturating_sub(n)).copied().eq(wanted()),
        };
        if !placed {
            return vec![format!(
                "{path}: Required field names must be at {} of schema in order: {expected}",
                self.position
            )];
        }
        Vec::new()
    }
}

pub fn check(fields: &[Value], spec: Option<&str>, position: Position, path: &str) -> Vec<String> {
    RequiredFieldSpec::parse(spec, position).check(fields, path)
}

// ------------------------------- Tests ------------------------------------ //
