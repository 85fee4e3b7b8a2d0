// src/extract/names.rs

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Contact boilerplate words, and an `@` sitting between two words.
    static ref BOILERPLATE: Regex =
        Regex::new(r"(?i)\b(?:phone|tel|call|contact|email|@)\b").unwrap();

    // Anything that is not a word character, whitespace or `.-'`.
    static ref STRAY: Regex = Regex::new(r"[^0-9A-Za-z_\s.\-']").unwrap();
}

fn is_name_punct(c: char) -> bool {
    matches!(c, '.' | '-' | '\'')
}

/// Sanitizes an agent-name candidate, returning `None` if nothing usable is left.
///
/// Digits, contact boilerplate ("phone", "email", ...) and stray punctuation are
/// removed; the result must be 2-50 characters of letters, spaces and `.-'`
/// with at least two letters in a row.
pub fn clean_agent_name(raw: &str) -> Option<String> {
    let no_digits: String = raw.trim().chars().filter(|c| !c.is_ascii_digit()).collect();
    let no_boilerplate = BOILERPLATE.replace_all(&no_digits, "");
    let spaced = STRAY.replace_all(&no_boilerplate, " ");

    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let name = collapsed.trim_matches(|c: char| c == ' ' || is_name_punct(c));

    let len = name.chars().count();
    let allowed = name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ' || is_name_punct(c));
    let has_letter_pair = name
        .as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_alphabetic() && w[1].is_ascii_alphabetic());

    if (2..=50).contains(&len) && allowed && has_letter_pair {
        Some(name.to_string())
    } else {
        None
    }
}
