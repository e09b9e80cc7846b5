//! Word segmentation shared by every case converter.
//!
//! A word ends at any non-alphanumeric character (`_`, `-`, space, `.`...),
//! before an uppercase letter that follows a lowercase one, and before the
//! last capital of an acronym run when a lowercase letter comes next
//! (`HTTPServer` → `HTTP`, `Server`). Only cased letters take part in those
//! comparisons: digits and caseless letters stay inside the current word,
//! so a digit never opens or closes a word on its own (`field2Name` →
//! `field2`, `Name`; `1A` and `A2B` are single words).

pub fn split(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut start: Option<usize> = None;
    // last cased letter of the current word
    let mut cased: Option<char> = None;

    while let Some((at, c)) = chars.next() {
        if !c.is_alphanumeric() {
            if let Some(s) = start.take() {
                out.push(&text[s..at]);
            }
            cased = None;
            continue;
        }
        match start {
            None => start = Some(at),
            Some(s) if opens_word(cased, c, chars.peek().map(|&(_, n)| n)) => {
                out.push(&text[s..at]);
                start = Some(at);
            }
            Some(_) => {}
        }
        if c.is_uppercase() || c.is_lowercase() {
            cased = Some(c);
        }
    }
    if let Some(s) = start {
        out.push(&text[s..]);
    }
    out
}

fn opens_word(cased: Option<char>, cur: char, next: Option<char>) -> bool {
    if !cur.is_uppercase() {
        return false;
    }
    match cased {
        None => false,
        // camel hump
        Some(prev) if !prev.is_uppercase() => true,
        // end of an acronym: `HTTPServer`
        Some(_) => next.is_some_and(char::is_lowercase),
    }
}

#[cfg(test)]
mod tests {
    use super::split;

    #[test]
    fn separators() {
        assert_eq!(split("customer_id"), ["customer", "id"]);
        assert_eq!(split("customer-id"), ["customer", "id"]);
        assert_eq!(split("Customer Id"), ["Customer", "Id"]);
        assert_eq!(split("__a..b  "), ["a", "b"]);
    }

    #[test]
    fn case_transitions_and_acronyms() {
        assert_eq!(split("customerId"), ["customer", "Id"]);
        assert_eq!(split("CustomerID"), ["Customer", "ID"]);
        assert_eq!(split("HTTPServer"), ["HTTP", "Server"]);
        assert_eq!(split("Customer_ID"), ["Customer", "ID"]);
    }

    #[test]
    fn digits_stay_with_preceding_word() {
        assert_eq!(split("field2Name"), ["field2", "Name"]);
        assert_eq!(split("HTTP2Server"), ["HTTP2", "Server"]);
        assert_eq!(split("v2beta"), ["v2beta"]);
        assert_eq!(split("FIELD2"), ["FIELD2"]);
        assert_eq!(split("FIELD2NAME"), ["FIELD2NAME"]);
    }

    #[test]
    fn leading_digits_open_no_word() {
        assert_eq!(split("1A"), ["1A"]);
        assert_eq!(split("2ndPlace"), ["2nd", "Place"]);
        assert_eq!(split("3D_model"), ["3D", "model"]);
    }

    #[test]
    fn caseless_letters_stay_in_the_word() {
        assert_eq!(split("日本Name"), ["日本Name"]);
        assert_eq!(split("ŉa"), ["ŉa"]);
        assert_eq!(split("aΣ"), ["a", "Σ"]);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(split("").is_empty());
        assert!(split("_-_").is_empty());
        assert_eq!(split("a"), ["a"]);
        assert_eq!(split("ALLCAPS"), ["ALLCAPS"]);
        assert_eq!(split("lowercase"), ["lowercase"]);
    }
}
