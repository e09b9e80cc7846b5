//! Field naming conventions.
//!
//! Nine case styles, each with a structural predicate (an anchored regex)
//! and a converter that re-renders the words found by [`words::split`].
//! Validation never round-trips through the converter: a name the predicate
//! accepts is valid even when conversion would spell it differently
//! (`userID` is valid camelCase although `convert` yields `userId`).
pub mod words;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

// ------------------------------- Styles ---------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    Snake,
    Camel,
    Pascal,
    Upper,
    Kebab,
    Train,
    Flat,
    Cobol,
    Title,
}

/// Sample used by [`examples`] and `schema-lint cases`.
pub const EXAMPLE_NAME: &str = "customer_id";

impl CaseStyle {
    pub const ALL: [CaseStyle; 9] = [
        CaseStyle::Snake,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Upper,
        CaseStyle::Kebab,
        CaseStyle::Train,
        CaseStyle::Flat,
        CaseStyle::Cobol,
        CaseStyle::Title,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CaseStyle::Snake => "snake",
            CaseStyle::Camel => "camel",
            CaseStyle::Pascal => "pascal",
            CaseStyle::Upper => "upper",
            CaseStyle::Kebab => "kebab",
            CaseStyle::Train => "train",
            CaseStyle::Flat => "flat",
            CaseStyle::Cobol => "cobol",
            CaseStyle::Title => "title",
        }
    }

    pub fn ids() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.id()).collect()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CaseStyle::Snake => "snake_case",
            CaseStyle::Camel => "camelCase",
            CaseStyle::Pascal => "PascalCase",
            CaseStyle::Upper => "UPPER_CASE",
            CaseStyle::Kebab => "kebab-case",
            CaseStyle::Train => "Train-Case",
            CaseStyle::Flat => "flatcase",
            CaseStyle::Cobol => "COBOL-CASE",
            CaseStyle::Title => "Title Case",
        }
    }

    /// Empty names pass; emptiness is a required-attribute concern.
    pub fn is_valid(self, name: &str) -> bool {
        name.is_empty() || PATTERNS[self as usize].is_match(name)
    }

    /// Re-render the words of `name` in this style. The result always passes
    /// [`CaseStyle::is_valid`] and converting it again changes nothing.
    pub fn convert(self, name: &str) -> String {
        // Joined words can regroup when read back (`A2` + `C2` → `A2C2`),
        // so render until the spelling settles.
        let mut current = self.render(name);
        for _ in 0..=name.chars().count() {
            let next = self.render(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn render(self, name: &str) -> String {
        let words = words::split(name);
        match self {
            CaseStyle::Snake => join(&words, lower, "_"),
            CaseStyle::Kebab => join(&words, lower, "-"),
            CaseStyle::Flat => join(&words, lower, ""),
            CaseStyle::Upper => join(&words, upper, "_"),
            CaseStyle::Cobol => join(&words, upper, "-"),
            CaseStyle::Train => join(&words, capitalize, "-"),
            CaseStyle::Title => join(&words, capitalize, " "),
            CaseStyle::Pascal => join(&merge_single_chars(&words), capitalize, ""),
            CaseStyle::Camel => {
                let mut words = merge_single_chars(&words)
                    .into_iter()
                    .map(|w| lower(&w))
                    .filter(|w| !w.is_empty());
                let mut out = words.next().unwrap_or_default();
                for w in words {
                    out.push_str(&capitalize(&w));
                }
                out
            }
        }
    }

    /// `None` when `name` follows the style, otherwise a message carrying
    /// both the offending name and the suggested spelling.
    pub fn validate(self, name: &str) -> Option<String> {
        if self.is_valid(name) {
            return None;
        }
        let expected = self.convert(name);
        Some(format!(
            "Field name '{name}' does not follow {}. Expected: {expected}",
            self.display_name()
        ))
    }

    /// The corrected spelling for an invalid name. `None` when the name is
    /// already valid or has no word characters left to keep (`"__"`).
    pub fn fix(self, name: &str) -> Option<String> {
        if self.is_valid(name) {
            return None;
        }
        Some(self.convert(name)).filter(|fixed| !fixed.is_empty() && self.is_valid(fixed))
    }

    pub fn example(self) -> String {
        self.convert(EXAMPLE_NAME)
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CaseStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| Error::UnsupportedCase { name: s.to_string() })
    }
}

// ------------------------------ Front API -------------------------------- //

pub fn validate(name: &str, style: CaseStyle) -> Option<String> {
    style.validate(name)
}

pub fn convert(name: &str, style: CaseStyle) -> String {
    style.convert(name)
}

/// `(style, "<Display>: <converted sample>")` for every style, in declaration order.
pub fn examples() -> Vec<(CaseStyle, String)> {
    CaseStyle::ALL
        .into_iter()
        .map(|style| (style, format!("{}: {}", style.display_name(), style.example())))
        .collect()
}

// ------------------------------ Predicates ------------------------------- //

// Alphanumeric the way `char::is_alphanumeric` sees it, split by case.
const LO: &str = r"[\p{Alphabetic}\p{N}--[\p{Uppercase}\p{Lt}]]";
const UP: &str = r"[\p{Alphabetic}\p{N}--[\p{Lowercase}\p{Lt}]]";
const AN: &str = r"[\p{Alphabetic}\p{N}]";

fn pattern_source(style: CaseStyle) -> String {
    match style {
        CaseStyle::Snake => format!("^{LO}+(?:_{LO}+)*$"),
        CaseStyle::Kebab => format!("^{LO}+(?:-{LO}+)*$"),
        CaseStyle::Flat => format!("^{LO}+$"),
        CaseStyle::Upper => format!("^{UP}+(?:_{UP}+)*$"),
        CaseStyle::Cobol => format!("^{UP}+(?:-{UP}+)*$"),
        CaseStyle::Camel => format!("^{LO}{AN}*$"),
        CaseStyle::Pascal => format!("^{UP}{AN}*$"),
        CaseStyle::Train => format!("^{UP}{LO}*(?:-{UP}{LO}*)*$"),
        CaseStyle::Title => format!("^{UP}{LO}*(?: {UP}{LO}*)*$"),
    }
}

// indexed by `CaseStyle as usize`
static PATTERNS: Lazy<[Regex; 9]> = Lazy::new(|| {
    CaseStyle::ALL.map(|style| {
        Regex::new(&pattern_source(style)).expect("case style patterns are constant")
    })
});

// ------------------------------ Rendering -------------------------------- //

// Case mapping can emit marks that are not word characters (`İ` lowercases
// to `i` + U+0307) or characters of the other case (`ﬀ` uppercases to `FF`).
// Renderers keep only characters of the target class.

fn is_lower_class(c: char) -> bool {
    c.is_alphanumeric() && !c.is_uppercase()
}

fn is_upper_class(c: char) -> bool {
    c.is_alphanumeric() && !c.is_lowercase()
}

fn lower(w: &str) -> String {
    w.chars().flat_map(char::to_lowercase).filter(|&c| is_lower_class(c)).collect()
}

fn upper(w: &str) -> String {
    w.chars().flat_map(char::to_uppercase).filter(|&c| is_upper_class(c)).collect()
}

/// One upper-class head, then lower-class characters: `ﬀ` → `Ff`, `ŉ` → `ʼn`.
fn capitalize(w: &str) -> String {
    let lowered = lower(w);
    let mut chars = lowered.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut mapped = first.to_uppercase();
    match mapped.next().filter(|&c| is_upper_class(c)) {
        Some(head) => {
            let tail: String = mapped.chain(chars).collect();
            let mut out = String::from(head);
            out.push_str(&lower(&tail));
            out
        }
        None => capitalize(chars.as_str()),
    }
}

fn join<W: AsRef<str>>(words: &[W], render: fn(&str) -> String, sep: &str) -> String {
    words
        .iter()
        .map(|w| render(w.as_ref()))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Without separators, `a` + `b` renders as `AB`, which reads back as one
/// acronym. Fold single-character words into the word that follows so
/// conversion stays idempotent.
fn merge_single_chars(words: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len());
    let mut pending = String::new();
    for w in words {
        pending.push_str(w);
        if w.chars().nth(1).is_some() {
            out.push(std::mem::take(&mut pending));
        }
    }
    if !pending.is_empty() {
        out.push(pending);
    }
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn examples_cover_every_style() {
        let got: Vec<String> = examples().into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            got,
            [
                "snake_case: customer_id",
                "camelCase: customerId",
                "PascalCase: CustomerId",
                "UPPER_CASE: CUSTOMER_ID",
                "kebab-case: customer-id",
                "Train-Case: Customer-Id",
                "flatcase: customerid",
                "COBOL-CASE: CUSTOMER-ID",
                "Title Case: Customer Id",
            ]
        );
    }

    #[test]
    fn snake_suggestion_for_mixed_case() {
        let msg = validate("Customer_ID", CaseStyle::Snake).unwrap();
        assert_eq!(msg, "Field name 'Customer_ID' does not follow snake_case. Expected: customer_id");
    }

    #[test]
    fn acronyms_pass_without_round_trip() {
        assert!(CaseStyle::Camel.is_valid("userID"));
        assert_eq!(convert("userID", CaseStyle::Camel), "userId");
        assert!(CaseStyle::Pascal.is_valid("HTTPServer"));
    }

    #[test]
    fn digits_attach_to_preceding_word() {
        assert_eq!(convert("field2Name", CaseStyle::Snake), "field2_name");
        assert_eq!(convert("field2Name", CaseStyle::Cobol), "FIELD2-NAME");
        assert!(CaseStyle::Snake.is_valid("field2_name"));
        assert!(CaseStyle::Snake.is_valid("address_line_2"));
    }

    #[test]
    fn already_uniform_case() {
        assert_eq!(convert("CUSTOMERID", CaseStyle::Snake), "customerid");
        assert_eq!(convert("customerid", CaseStyle::Pascal), "Customerid");
        assert!(validate("customerid", CaseStyle::Flat).is_none());
        assert!(validate("CustomerId", CaseStyle::Flat).is_some());
    }

    #[test]
    fn edge_cases() {
        assert!(validate("", CaseStyle::Snake).is_none());
        assert_eq!(convert("", CaseStyle::Title), "");
        assert!(validate("a", CaseStyle::Snake).is_none());
        assert_eq!(convert("a", CaseStyle::Pascal), "A");
        assert_eq!(convert("a_b", CaseStyle::Pascal), "Ab");
        assert!(validate("customer id", CaseStyle::Snake).is_some());
    }

    #[test]
    fn fix_only_touches_invalid_names() {
        assert_eq!(CaseStyle::Snake.fix("CustomerName"), Some("customer_name".into()));
        assert_eq!(CaseStyle::Snake.fix("customer_name"), None);
        assert_eq!(CaseStyle::Camel.fix("userID"), None);
        assert_eq!(CaseStyle::Snake.fix("__"), None);
    }

    #[test]
    fn style_ids_parse() {
        for style in CaseStyle::ALL {
            assert_eq!(style.id().parse::<CaseStyle>().unwrap(), style);
        }
        assert!("Snake".parse::<CaseStyle>().is_err());
    }

    #[test]
    fn case_mapping_keeps_only_word_characters() {
        assert_eq!(convert("İd", CaseStyle::Snake), "id");
        assert_eq!(convert("userİd", CaseStyle::Snake), "user_id");
        assert_eq!(convert("ﬀ_b", CaseStyle::Train), "Ff-B");
        assert_eq!(convert("ŉa", CaseStyle::Pascal), "ʼna");
        assert_eq!(convert("straße", CaseStyle::Upper), "STRASSE");
        assert_eq!(CaseStyle::Snake.fix("İd"), Some("id".into()));
    }

    #[test]
    fn digits_inside_uppercase_words() {
        assert_eq!(convert("a2a", CaseStyle::Upper), "A2A");
        assert_eq!(convert("1A", CaseStyle::Snake), "1a");
        assert_eq!(convert("a2_c2", CaseStyle::Pascal), "A2c2");
    }

    // Latin-1 letters plus characters whose case mappings expand, change
    // script or drop marks.
    const NAME: &str = "[A-Za-z0-9_ .\\-À-ÿİıŉﬀﬁǅǈΣσςµͅʼⅫⓐⒶᾳ日本٣²]{0,24}";

    proptest! {
        #[test]
        fn converted_names_validate(name in NAME) {
            for style in CaseStyle::ALL {
                let converted = style.convert(&name);
                prop_assert!(style.is_valid(&converted), "{style}: {name:?} -> {converted:?}");
            }
        }

        #[test]
        fn conversion_is_idempotent(name in NAME) {
            for style in CaseStyle::ALL {
                let once = style.convert(&name);
                prop_assert_eq!(style.convert(&once), once.clone(), "{} on {:?}", style, name);
            }
        }
    }
}
