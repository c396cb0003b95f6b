//! # Fence extraction
//!
//! Turns assistant text into an ordered [`ArtifactList`]. Scanning happens in
//! two stages: [`lexer`] finds complete fenced regions, [`info`] resolves each
//! region's language and filename.

pub mod info;
pub mod lexer;

use regex::Regex;
use std::sync::OnceLock;

use crate::artifact::{ArtifactList, CodeArtifact};
use info::parse_info;
use lexer::FenceLexer;

/// Extract every complete fenced code block from `text`, in order.
pub fn extract(text: &str) -> ArtifactList {
    FenceLexer::new(text)
        .map(|fence| {
            let info = parse_info(fence.info);
            log::debug!(
                "Extracted {} block '{}' ({} bytes)",
                info.language,
                info.filename,
                fence.body.len()
            );
            CodeArtifact {
                language: info.language,
                filename: info.filename,
                content: fence.body.trim().to_string(),
            }
        })
        .collect()
}

/// Remove every complete ```...``` pair from `text` and trim the remaining
/// prose.
///
/// Line breaks on both sides of a removed block are merged: the prose
/// before it loses its trailing newlines, the prose after it its leading
/// ones, and at most two (one blank line) are put back in the gap.
pub fn strip_fences(text: &str) -> String {
    static FENCE_PAIR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = FENCE_PAIR_REGEX.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap());

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut after_fence = false;

    for m in re.find_iter(text) {
        push_prose(&mut out, &text[last..m.start()], after_fence);
        last = m.end();
        after_fence = true;
    }
    push_prose(&mut out, &text[last..], after_fence);

    out.trim().to_string()
}

fn push_prose(out: &mut String, piece: &str, after_fence: bool) {
    if !after_fence {
        out.push_str(piece);
        return;
    }

    let body = piece.trim_start_matches('\n');
    let leading = piece.len() - body.len();
    let kept = out.trim_end_matches('\n').len();
    let trailing = out.len() - kept;

    out.truncate(kept);
    for _ in 0..(leading + trailing).min(2) {
        out.push('\n');
    }
    out.push_str(body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_empty_string() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extract_trims_content() {
        let list = extract("```js\n\n  a();  \n\n```");
        assert_eq!(list.as_slice()[0].content, "a();");
    }

    #[test]
    fn test_extract_preserves_order() {
        let list = extract("```css\na{}\n```\ntext\n```html\n<p></p>\n```\n```css b.css\nb{}\n```");
        let names: Vec<_> = list.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["styles.css", "index.html", "b.css"]);
    }

    #[test]
    fn test_strip_without_fences_trims() {
        assert_eq!(strip_fences("  hello\n\n\n\nworld \n"), "hello\n\n\n\nworld");
    }

    #[test]
    fn test_strip_collapses_gap() {
        let text = "Here:\n\n```css\na{}\n```\n\n\nDone";
        assert_eq!(strip_fences(text), "Here:\n\nDone");
    }

    #[test]
    fn test_strip_merges_newlines_on_both_sides() {
        assert_eq!(strip_fences("a\n\n\n\n```x```b"), "a\n\nb");
        assert_eq!(strip_fences("a\n```x```\nb"), "a\n\nb");
        assert_eq!(strip_fences("a```x```\nb"), "a\nb");
    }

    #[test]
    fn test_strip_inline_pair() {
        assert_eq!(strip_fences("run ```ls``` now"), "run  now");
    }

    #[test]
    fn test_strip_only_code() {
        assert_eq!(strip_fences("```html\n<p></p>\n```"), "");
    }

    #[test]
    fn test_strip_keeps_unpaired_marker() {
        assert_eq!(strip_fences("a ```b\nc"), "a ```b\nc");
    }
}
