use thiserror::Error;

pub type SiteGenResult<T> = Result<T, SiteGenError>;

/// Failures of the operations around the core pipeline.
///
/// Extraction and composition never fail; these cover configuration,
/// packaging and file handling.
#[derive(Error, Debug)]
pub enum SiteGenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Nothing to bundle: no code artifacts were extracted")]
    EmptyBundle,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl From<serde_yaml::Error> for SiteGenError {
    fn from(err: serde_yaml::Error) -> Self {
        SiteGenError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SiteGenError {
    fn from(err: serde_json::Error) -> Self {
        SiteGenError::Json(err.to_string())
    }
}

impl From<zip::result::ZipError> for SiteGenError {
    fn from(err: zip::result::ZipError) -> Self {
        SiteGenError::Archive(err.to_string())
    }
}

/// Classified failure at the LLM boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Network or HTTP failure reported by the collaborator.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body did not have the expected message structure.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The provider blocked the content.
    #[error("Upstream refusal: {0}")]
    Refusal(String),
}

impl UpstreamError {
    /// Detail text without the classification prefix.
    pub fn detail(&self) -> &str {
        match self {
            UpstreamError::Transport(msg)
            | UpstreamError::MalformedResponse(msg)
            | UpstreamError::Refusal(msg) => msg,
        }
    }

    /// Chat-facing text shown in place of an assistant reply.
    pub fn user_message(&self) -> String {
        format!("Sorry, I encountered an error: {}", self.detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_detail() {
        let err = UpstreamError::Transport("connection reset".to_string());
        assert_eq!(
            err.user_message(),
            "Sorry, I encountered an error: connection reset"
        );
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_upstream_converts_into_site_gen_error() {
        let err: SiteGenError = UpstreamError::Refusal("blocked".to_string()).into();
        assert!(matches!(err, SiteGenError::Upstream(UpstreamError::Refusal(_))));
        assert_eq!(err.to_string(), "Upstream refusal: blocked");
    }
}
