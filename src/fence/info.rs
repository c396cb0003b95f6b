//! Info-string parsing: `<language>[ <filename>]`.

use crate::artifact::{default_filename, PLAINTEXT};

/// Language and filename resolved from a fence's info string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceInfo {
    pub language: String,
    pub filename: String,
}

/// Parse an info string.
///
/// The first whitespace-separated token is the language; the remaining
/// tokens, joined by single spaces, are the filename.
pub fn parse_info(info: &str) -> FenceInfo {
    let mut tokens = info.split_whitespace();

    let Some(first) = tokens.next() else {
        return FenceInfo {
            language: PLAINTEXT.to_string(),
            filename: default_filename(PLAINTEXT),
        };
    };

    if let Some(info) = disambiguate_language_token(first) {
        return info;
    }

    let language = first.to_lowercase();
    let rest: Vec<&str> = tokens.collect();
    let filename = if rest.is_empty() {
        default_filename(&language)
    } else {
        rest.join(" ")
    };

    FenceInfo { language, filename }
}

/// Treat a language token that looks like a filename (`index.html`) as the
/// filename, taking the language from its last extension.
///
/// Returns `None` when the token contains no `.`. A token ending in `.` has
/// no extension, so the language falls back to `plaintext`.
pub fn disambiguate_language_token(token: &str) -> Option<FenceInfo> {
    let dot = token.rfind('.')?;
    let extension = &token[dot + 1..];
    let language = if extension.is_empty() {
        PLAINTEXT.to_string()
    } else {
        extension.to_lowercase()
    };
    Some(FenceInfo {
        language,
        filename: token.to_string(),
    })
}
