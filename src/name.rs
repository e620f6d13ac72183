//! Display name capitalization.

/// Canonicalizes the capitalization of a display name.
///
/// Words are split on whitespace runs and rejoined with a single space; each
/// hyphenated part of a word is capitalized on its own, so
/// `"jean-pierre DUPONT"` becomes `"Jean-Pierre Dupont"`.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.split('-').map(capitalize).collect::<Vec<_>>().join("-"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
