//! Identifier case conversion.

use crate::error::{Error, Result};

/// Lowercase the first character of `identifier` and keep the rest as is.
///
/// `ShowWithEllipses` becomes `showWithEllipses`. The conversion is
/// idempotent. An empty identifier is rejected with
/// [`Error::MalformedIdentifier`].
///
/// ```
/// use enum_js_codegen::to_camel_case;
///
/// assert_eq!(to_camel_case("Color").unwrap(), "color");
/// assert_eq!(to_camel_case("color").unwrap(), "color");
/// ```
pub fn to_camel_case(identifier: &str) -> Result<String> {
    let mut chars = identifier.chars();
    let first = chars
        .next()
        .ok_or_else(|| Error::MalformedIdentifier(String::new()))?;
    Ok(first.to_lowercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_first_char_only() {
        assert_eq!(to_camel_case("ShowWithEllipses").unwrap(), "showWithEllipses");
        assert_eq!(to_camel_case("HTTPStatus").unwrap(), "hTTPStatus");
        assert_eq!(to_camel_case("A").unwrap(), "a");
    }

    #[test]
    fn test_idempotent() {
        for input in ["Color", "color", "XmlHttp", "_Private", "Ärger", "x1"] {
            let once = to_camel_case(input).unwrap();
            assert_eq!(to_camel_case(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_non_letter_start_is_unchanged() {
        assert_eq!(to_camel_case("_Value").unwrap(), "_Value");
        assert_eq!(to_camel_case("$ref").unwrap(), "$ref");
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        assert!(matches!(to_camel_case(""), Err(Error::MalformedIdentifier(_))));
    }
}
