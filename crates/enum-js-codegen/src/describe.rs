//! Human-readable descriptions for enum members.

use crate::types::RawEnumMember;
use regex::Regex;
use std::sync::LazyLock;

// A capitalized word: one or more capitals followed by lowercase letters.
static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+[a-z]+").expect("valid regex"));

/// Resolve the description of a member.
///
/// An explicit `description` annotation is returned verbatim. Otherwise the
/// description is derived from the member name with [`wordify`].
pub fn describe(member: &RawEnumMember) -> String {
    match member.explicit_description() {
        Some(description) => description.to_string(),
        None => wordify(&member.name),
    }
}

/// Split a member name into words on capitalized-word boundaries.
///
/// Each capitalized word and each run of text between them becomes a
/// fragment; empty fragments are dropped and the rest are joined with single
/// spaces. Acronym runs are not separated: `HTTPStatus` stays one word, and
/// a trailing capital stands alone (`ValueA` becomes `Value A`).
///
/// ```
/// use enum_js_codegen::wordify;
///
/// assert_eq!(wordify("ShowWithEllipses"), "Show With Ellipses");
/// assert_eq!(wordify("lower"), "lower");
/// ```
pub fn wordify(name: &str) -> String {
    let mut fragments = Vec::new();
    let mut last = 0;
    for word in WORD_REGEX.find_iter(name) {
        fragments.push(&name[last..word.start()]);
        fragments.push(word.as_str());
        last = word.end();
    }
    fragments.push(&name[last..]);

    fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
