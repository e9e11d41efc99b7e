//! Text helpers shared by the statement builders.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::DbaseError;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("static regex");
    static ref IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z0-9_$]+(\.[A-Za-z0-9_$]+)?$").expect("static regex");
}

/// Collapse every run of whitespace (spaces, tabs, newlines) to a single space.
///
/// ```rust
/// use mysql_middleware::sanitize_whitespace;
///
/// assert_eq!(sanitize_whitespace("a\t\n  b   c"), "a b c");
/// ```
#[must_use]
pub fn sanitize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Reject names that would be interpolated into SQL text but are not plain
/// identifiers (`name` or `schema.name`).
///
/// # Errors
/// Returns `DbaseError::ParameterError` naming the offending identifier.
pub fn check_identifier<'a>(kind: &str, name: &'a str) -> Result<&'a str, DbaseError> {
    if IDENTIFIER.is_match(name) {
        Ok(name)
    } else {
        Err(DbaseError::ParameterError(format!(
            "invalid {kind} name: {name:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(sanitize_whitespace("a\t\n  b   c"), "a b c");
        assert_eq!(
            sanitize_whitespace("id INT NOT NULL,\n\t\tname VARCHAR(20)"),
            "id INT NOT NULL, name VARCHAR(20)"
        );
    }

    #[test]
    fn normalizing_is_idempotent() {
        for input in ["a\t\n  b   c", "  leading", "trailing \n", "", "plain"] {
            let once = sanitize_whitespace(input);
            assert_eq!(sanitize_whitespace(&once), once);
        }
    }

    #[test]
    fn edges_keep_a_single_space() {
        assert_eq!(sanitize_whitespace("\n\n x \t"), " x ");
    }

    #[test]
    fn identifiers() {
        assert!(check_identifier("table", "items").is_ok());
        assert!(check_identifier("table", "shop.items").is_ok());
        assert!(check_identifier("table", "order_lines$2").is_ok());
        assert!(check_identifier("table", "items; DROP TABLE x").is_err());
        assert!(check_identifier("table", "a.b.c").is_err());
        assert!(check_identifier("table", "").is_err());
    }
}
