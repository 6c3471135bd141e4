/// Canonicalizes an identifier for loose comparison.
///
/// The result is lowercase with underscores, hyphens, dots, and whitespace
/// removed, so `is_published`, `isPublished`, and `is-published` all compare
/// equal. Applying `normalize` to its own output is a no-op.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|ch| !is_separator(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `true` if `lhs` and `rhs` are equal once normalized.
pub fn loosely_eq(lhs: &str, rhs: &str) -> bool {
    normalize(lhs) == normalize(rhs)
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '_' | '-' | '.') || ch.is_whitespace()
}
