//! Input checks and text helpers callers may run before issuing a request.
//!
//! The client never calls the `is_valid_*` checks itself; a bad query still
//! goes to the service.

/// Arabic combining marks removed by `strip_diacritics`: tanween, short
/// vowels, shadda, sukun and the superscript alef.
pub const ARABIC_DIACRITICS: [char; 9] = [
    '\u{064B}', '\u{064C}', '\u{064D}', '\u{064E}', '\u{064F}', '\u{0650}', '\u{0651}', '\u{0652}',
    '\u{0670}',
];

/// True if the query is non-empty after trimming whitespace.
pub fn is_valid_query(query: &str) -> bool {
    !query.trim().is_empty()
}

/// True if `ids` is absent or every ID is non-empty after trimming.
pub fn is_valid_lexicon_ids<S: AsRef<str>>(ids: Option<&[S]>) -> bool {
    match ids {
        None => true,
        Some(ids) => ids.iter().all(|id| !id.as_ref().trim().is_empty()),
    }
}

/// True if the key is non-empty after trimming whitespace.
pub fn is_valid_api_key(key: &str) -> bool {
    !key.trim().is_empty()
}

pub fn is_arabic_diacritic(c: char) -> bool {
    ARABIC_DIACRITICS.contains(&c)
}

/// Remove Arabic diacritics, leaving every other character in place.
pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|&c| !is_arabic_diacritic(c)).collect()
}

/// Query parameters shared by every lookup operation: `query`, plus a
/// comma-joined `lexiconIds` when at least one ID is given.
pub fn build_query_params<S: AsRef<str>>(
    query: &str,
    lexicon_ids: Option<&[S]>,
) -> Vec<(String, String)> {
    let mut params = vec![("query".to_string(), query.to_string())];
    if let Some(ids) = lexicon_ids.filter(|ids| !ids.is_empty()) {
        params.push(("lexiconIds".to_string(), join_ids(ids)));
    }
    params
}

pub(crate) fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}
