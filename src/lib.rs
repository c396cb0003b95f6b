//! # sitegen-preview
//!
//! Turns the reply of a website-generating language model into something a
//! user can look at and download.
//!
//! ## Pipeline
//! - [`extract`] scans the reply for ```` ```<language>[ <filename>] ```` fenced
//!   blocks and returns them as an ordered [`ArtifactList`]
//! - [`compose`] folds the artifacts into one HTML document, inlining CSS and
//!   JavaScript into the first HTML artifact
//! - [`strip_fences`] leaves the prose for the chat view
//! - [`bundle::write_zip`] packages the artifacts for download
//!
//! Extraction and composition are pure and never fail; malformed input
//! degrades to `plaintext` artifacts or a fallback document.
//!
//! ## Example
//! ```
//! use sitegen_preview::{compose, extract};
//!
//! let reply = "Sure!\n```html\n<h1>Hi</h1>\n```\n```css\nh1{color:red}\n```";
//! let artifacts = extract(reply);
//! assert_eq!(artifacts.len(), 2);
//!
//! let doc = compose(&artifacts);
//! assert!(doc.as_str().contains("<style>h1{color:red}</style>"));
//! ```

pub mod artifact;
pub mod bundle;
pub mod config;
pub mod error;
pub mod fence;
pub mod preview;
pub mod response;
pub mod sandbox;
pub mod session;

// --- Core types ---
pub use artifact::{default_filename, ArtifactList, CodeArtifact};
pub use error::{SiteGenError, SiteGenResult, UpstreamError};
pub use preview::PreviewDocument;

// --- Supporting types ---
pub use bundle::BundleOptions;
pub use config::Config;
pub use sandbox::SandboxPolicy;
pub use session::{ChatMessage, Role, Session, TurnOutcome};

/// Extract the fenced code blocks of an assistant reply
pub fn extract(text: &str) -> ArtifactList {
    fence::extract(text)
}

/// Remove fenced code blocks from an assistant reply, leaving the prose
pub fn strip_fences(text: &str) -> String {
    fence::strip_fences(text)
}

/// Build the preview document for a set of artifacts
pub fn compose(artifacts: &ArtifactList) -> PreviewDocument {
    preview::compose(artifacts)
}
