//! # Preview composition
//!
//! Folds an [`ArtifactList`] into one HTML document for a sandboxed frame.
//! The first `html` artifact is the base; every `css` artifact is inlined
//! into one `<style>` block and every `javascript`/`js` artifact into one
//! `<script>` block. No sanitization is performed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::artifact::{ArtifactList, CodeArtifact};

/// Shown when no HTML artifact has been generated
pub const FALLBACK_DOCUMENT: &str = "<html><body style=\"font-family: sans-serif; display: flex; align-items: center; justify-content: center; height: 100vh; margin: 0; color: #666;\"><h1>No HTML content generated yet</h1></body></html>";

const SHELL_HEAD: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
    <title>Preview</title>
</head>
<body>
    ";

const SHELL_TAIL: &str = "
</body>
</html>";

/// A complete HTML document ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewDocument(String);

impl PreviewDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True when no HTML artifact was available
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_DOCUMENT
    }
}

impl fmt::Display for PreviewDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PreviewDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compose the preview document for `artifacts`.
pub fn compose(artifacts: &ArtifactList) -> PreviewDocument {
    let Some(base) = artifacts.first_html() else {
        return PreviewDocument(FALLBACK_DOCUMENT.to_string());
    };

    let mut html = base.content.clone();

    if let Some(css) = concat_contents(artifacts.stylesheets()) {
        html = inject_style(&html, &format!("<style>{}</style>", css));
    }

    if let Some(js) = concat_contents(artifacts.scripts()) {
        html = inject_script(&html, &format!("<script>{}</script>", js));
    }

    if !html.contains("<html") {
        html = wrap_fragment(&html);
    }

    PreviewDocument(html)
}

fn concat_contents<'a>(artifacts: impl Iterator<Item = &'a CodeArtifact>) -> Option<String> {
    let parts: Vec<&str> = artifacts.map(|a| a.content.as_str()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Place `style_tag` before `</head>`, or in a new head after `<html>`, or
/// in a new head at the start of the document.
pub fn inject_style(html: &str, style_tag: &str) -> String {
    if html.contains("</head>") {
        html.replacen("</head>", &format!("{}</head>", style_tag), 1)
    } else if html.contains("<html>") {
        html.replacen("<html>", &format!("<html><head>{}</head>", style_tag), 1)
    } else {
        format!("<head>{}</head>{}", style_tag, html)
    }
}

/// Place `script_tag` before `</body>`, or at the end of the document.
pub fn inject_script(html: &str, script_tag: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", &format!("{}</body>", script_tag), 1)
    } else {
        format!("{}{}", html, script_tag)
    }
}

/// Wrap a bare fragment in a minimal document shell.
pub fn wrap_fragment(fragment: &str) -> String {
    format!("{}{}{}", SHELL_HEAD, fragment, SHELL_TAIL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(items: &[(&str, &str)]) -> ArtifactList {
        items
            .iter()
            .map(|(lang, content)| {
                CodeArtifact::new(*lang, crate::artifact::default_filename(lang), *content)
            })
            .collect()
    }

    #[test]
    fn test_fallback_without_html() {
        assert!(compose(&ArtifactList::new()).is_fallback());
        assert!(compose(&list(&[("css", "a{}"), ("js", "a();")])).is_fallback());
    }

    #[test]
    fn test_style_before_head_close() {
        let doc = compose(&list(&[
            ("html", "<html><head></head><body></body></html>"),
            ("css", "body{color:red}"),
        ]));
        assert_eq!(
            doc.as_str(),
            "<html><head><style>body{color:red}</style></head><body></body></html>"
        );
    }

    #[test]
    fn test_style_after_html_open() {
        let doc = compose(&list(&[("html", "<html><body>x</body></html>"), ("css", "p{}")]));
        assert_eq!(
            doc.as_str(),
            "<html><head><style>p{}</style></head><body>x</body></html>"
        );
    }

    #[test]
    fn test_html_with_attributes_gets_prepended_head() {
        let doc = compose(&list(&[
            ("html", "<html lang=\"en\"><body>x</body></html>"),
            ("css", "p{}"),
        ]));
        assert_eq!(
            doc.as_str(),
            "<head><style>p{}</style></head><html lang=\"en\"><body>x</body></html>"
        );
    }

    #[test]
    fn test_script_before_body_close() {
        let doc = compose(&list(&[
            ("html", "<html><body></body></html>"),
            ("javascript", "a();"),
            ("js", "b();"),
        ]));
        assert_eq!(
            doc.as_str(),
            "<html><body><script>a();\nb();</script></body></html>"
        );
    }

    #[test]
    fn test_script_appended_without_body() {
        let doc = compose(&list(&[("html", "<html>x</html>"), ("js", "go();")]));
        assert_eq!(doc.as_str(), "<html>x</html><script>go();</script>");
    }

    #[test]
    fn test_fragment_is_wrapped() {
        let doc = compose(&list(&[("html", "<h1>Hi</h1>")]));
        assert!(doc.as_str().starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(doc.as_str().contains("<title>Preview</title>"));
        assert!(doc.as_str().contains("<body>\n    <h1>Hi</h1>\n</body>"));
    }

    #[test]
    fn test_fragment_with_css_and_js() {
        let doc = compose(&list(&[("html", "<p>x</p>"), ("css", "p{}"), ("js", "f();")]));
        assert_eq!(
            doc.as_str(),
            wrap_fragment("<head><style>p{}</style></head><p>x</p><script>f();</script>")
        );
    }

    #[test]
    fn test_only_first_html_is_used() {
        let doc = compose(&list(&[("html", "<html>one</html>"), ("html", "<html>two</html>")]));
        assert_eq!(doc.as_str(), "<html>one</html>");
    }

    #[test]
    fn test_only_first_head_close_is_used() {
        let html = "<html><head></head><body><template><head></head></template></body></html>";
        let injected = inject_style(html, "<style>a{}</style>");
        assert_eq!(injected.matches("<style>").count(), 1);
        assert!(injected.starts_with("<html><head><style>a{}</style></head>"));
    }
}
