use serde::{Deserialize, Serialize};

/// Language assigned to a fence that carries no info string
pub const PLAINTEXT: &str = "plaintext";

/// Default download names for the languages the generator is prompted to emit
const DEFAULT_FILENAMES: &[(&str, &str)] = &[
    ("html", "index.html"),
    ("css", "styles.css"),
    ("javascript", "script.js"),
    ("js", "script.js"),
    ("typescript", "index.ts"),
    ("ts", "index.ts"),
    ("jsx", "App.jsx"),
    ("tsx", "App.tsx"),
    ("json", "config.json"),
];

/// One parsed code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifact {
    /// Lowercase language token (`html`, `css`, `javascript`, ...)
    pub language: String,
    /// Display and download name, never empty
    pub filename: String,
    /// Trimmed text between the fence markers
    pub content: String,
}

impl CodeArtifact {
    pub fn new(
        language: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn is_html(&self) -> bool {
        self.language == "html"
    }

    pub fn is_css(&self) -> bool {
        self.language == "css"
    }

    pub fn is_javascript(&self) -> bool {
        self.language == "javascript" || self.language == "js"
    }
}

/// Synthesize a filename for `language`.
///
/// Languages outside the table get `file.<language>`.
pub fn default_filename(language: &str) -> String {
    let lowered = language.to_lowercase();
    DEFAULT_FILENAMES
        .iter()
        .find(|(lang, _)| *lang == lowered)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("file.{}", language))
}

/// Artifacts in order of appearance in the source text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactList(Vec<CodeArtifact>);

impl ArtifactList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeArtifact> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CodeArtifact] {
        &self.0
    }

    /// First HTML artifact, used as the preview base document
    pub fn first_html(&self) -> Option<&CodeArtifact> {
        self.0.iter().find(|a| a.is_html())
    }

    pub fn stylesheets(&self) -> impl Iterator<Item = &CodeArtifact> {
        self.0.iter().filter(|a| a.is_css())
    }

    pub fn scripts(&self) -> impl Iterator<Item = &CodeArtifact> {
        self.0.iter().filter(|a| a.is_javascript())
    }
}

impl From<Vec<CodeArtifact>> for ArtifactList {
    fn from(artifacts: Vec<CodeArtifact>) -> Self {
        Self(artifacts)
    }
}

impl FromIterator<CodeArtifact> for ArtifactList {
    fn from_iter<I: IntoIterator<Item = CodeArtifact>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ArtifactList {
    type Item = CodeArtifact;
    type IntoIter = std::vec::IntoIter<CodeArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArtifactList {
    type Item = &'a CodeArtifact;
    type IntoIter = std::slice::Iter<'a, CodeArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
