use serde::{Deserialize, Serialize};

use crate::preview::PreviewDocument;

/// Capabilities granted to the frame that renders a preview.
///
/// The default allows scripts only, so generated code runs without access
/// to the host page's origin, storage or cookies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxPolicy {
    pub allow_scripts: bool,
    pub allow_forms: bool,
    pub allow_popups: bool,
    pub allow_modals: bool,
    pub allow_top_navigation: bool,
    pub allow_same_origin: bool,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            allow_scripts: true,
            allow_forms: false,
            allow_popups: false,
            allow_modals: false,
            allow_top_navigation: false,
            allow_same_origin: false,
        }
    }
}

impl SandboxPolicy {
    /// No capabilities at all
    pub fn locked() -> Self {
        Self {
            allow_scripts: false,
            ..Self::default()
        }
    }

    /// Value for the iframe `sandbox` attribute; empty means fully locked
    pub fn attribute_value(&self) -> String {
        let flags = [
            (self.allow_scripts, "allow-scripts"),
            (self.allow_forms, "allow-forms"),
            (self.allow_popups, "allow-popups"),
            (self.allow_modals, "allow-modals"),
            (self.allow_top_navigation, "allow-top-navigation"),
            (self.allow_same_origin, "allow-same-origin"),
        ];
        flags
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, token)| *token)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Scripts combined with same-origin let the frame lift its own sandbox
    pub fn is_escapable(&self) -> bool {
        self.allow_scripts && self.allow_same_origin
    }
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render an `<iframe>` that displays `document` through `srcdoc`.
pub fn embed_srcdoc(document: &PreviewDocument, policy: &SandboxPolicy, title: &str) -> String {
    if policy.is_escapable() {
        log::warn!("Sandbox allows scripts with same-origin; the preview can escape its frame");
    }
    format!(
        "<iframe title=\"{}\" sandbox=\"{}\" srcdoc=\"{}\"></iframe>",
        escape_attribute(title),
        policy.attribute_value(),
        escape_attribute(document.as_str())
    )
}
