//! File Type Classifier
//!
//! Maps a filename to the canonical type token used to look up its options.

/// Extension aliases, applied after lowercasing.
const ALIASES: &[(&str, &str)] = &[("jpeg", "jpg")];

// == Canonicalize ==
/// Lowercases a type token and resolves aliases.
pub(crate) fn canonicalize(token: &str) -> String {
    let lower = token.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lower)
}

// == Classify ==
/// Returns the type token for `filename`, or None when it has no `.`.
///
/// The token is whatever follows the last `.`, lowercased, with aliases
/// resolved. `"file."` yields the empty token.
pub fn classify(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| canonicalize(extension))
}
