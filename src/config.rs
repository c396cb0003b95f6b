use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bundle::BundleOptions;
use crate::error::{SiteGenError, SiteGenResult};
use crate::sandbox::SandboxPolicy;

/// Settings for the preview and packaging tools.
///
/// Every field is optional in YAML:
/// ```yaml
/// log_level: debug
/// sandbox:
///   allow_forms: true
/// bundle:
///   archive_name: landing.zip
///   root_dir: landing
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `env_logger` filter used when `RUST_LOG` is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub sandbox: SandboxPolicy,
    pub bundle: BundleOptions,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> SiteGenResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SiteGenResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            SiteGenError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }
}
