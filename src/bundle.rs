//! Packaging artifacts into a downloadable zip archive.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::artifact::{default_filename, ArtifactList};
use crate::error::{SiteGenError, SiteGenResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleOptions {
    /// Default output file name used by the CLI
    pub archive_name: String,
    /// Directory every entry is placed under; empty for the archive root
    pub root_dir: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            archive_name: "website.zip".to_string(),
            root_dir: String::new(),
        }
    }
}

/// An archive entry name and the text written to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry<'a> {
    pub name: String,
    pub content: &'a str,
}

/// Resolve archive entries for `artifacts`, one per artifact, in order.
pub fn bundle_entries<'a>(
    artifacts: &'a ArtifactList,
    options: &BundleOptions,
) -> Vec<BundleEntry<'a>> {
    let root = safe_path(&options.root_dir);
    let mut used = HashSet::new();

    artifacts
        .iter()
        .map(|artifact| {
            let mut relative = safe_path(&artifact.filename);
            if relative.is_empty() {
                relative = default_filename(&artifact.language);
            }
            let path = if root.is_empty() {
                relative
            } else {
                format!("{}/{}", root, relative)
            };
            let name = unique_name(&path, &mut used);
            BundleEntry {
                name,
                content: artifact.content.as_str(),
            }
        })
        .collect()
}

/// Write every artifact into a zip archive.
pub fn write_zip<W: Write + Seek>(
    artifacts: &ArtifactList,
    writer: W,
    options: &BundleOptions,
) -> SiteGenResult<W> {
    if artifacts.is_empty() {
        return Err(SiteGenError::EmptyBundle);
    }

    let mut zip = ZipWriter::new(writer);
    let file_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in bundle_entries(artifacts, options) {
        log::debug!("Adding '{}' ({} bytes)", entry.name, entry.content.len());
        zip.start_file(entry.name, file_options)?;
        zip.write_all(entry.content.as_bytes())?;
    }

    Ok(zip.finish()?)
}

/// Write the archive to `path`.
///
/// An empty list is rejected before the file is opened, so an existing
/// archive at `path` is left untouched.
pub fn write_zip_file(
    artifacts: &ArtifactList,
    path: &Path,
    options: &BundleOptions,
) -> SiteGenResult<()> {
    if artifacts.is_empty() {
        return Err(SiteGenError::EmptyBundle);
    }
    let file = File::create(path)?;
    write_zip(artifacts, file, options)?;
    Ok(())
}

/// Normalize a path for use inside the archive: forward slashes, no
/// absolute prefix, no `.`/`..` or empty components.
fn safe_path(raw: &str) -> String {
    raw.replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect::<Vec<_>>()
        .join("/")
}

fn unique_name(path: &str, used: &mut HashSet<String>) -> String {
    if used.insert(path.to_string()) {
        return path.to_string();
    }

    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (stem, ext) = match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => path.split_at(file_start + dot),
        _ => (path, ""),
    };

    let mut n = 2;
    loop {
        let candidate = format!("{}-{}{}", stem, n, ext);
        if used.insert(candidate.clone()) {
            log::warn!("Duplicate archive entry '{}'; writing as '{}'", path, candidate);
            return candidate;
        }
        n += 1;
    }
}
