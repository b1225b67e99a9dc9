//! `package.json` inspection
//!
//! Looks at a single top-level field, `packageManager` (e.g. `"yarn@3.6.0"`),
//! the standardized way for a project to pin its package manager.

use crate::detector::YarnVersion;
use crate::error::{DetectError, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Transient view of the manifest, limited to the one field we care about.
#[derive(Debug, Deserialize)]
struct ManifestView {
    #[serde(rename = "packageManager")]
    package_manager: Option<String>,
}

/// Classify the Yarn generation from the manifest's `packageManager` field.
///
/// A manifest that is missing the field, pins a tool other than Yarn, or is
/// not valid JSON yields no verdict. The parse failure is deliberately
/// swallowed: the install stage parses the manifest in full later and is
/// the one that reports the real error to the user.
pub(crate) fn classify_package_manager(path: &Path) -> Result<Option<YarnVersion>> {
    let content = fs::read_to_string(path).map_err(|source| DetectError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: ManifestView = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("ignoring unparseable {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    let Some(field) = manifest.package_manager else {
        return Ok(None);
    };

    if let Some(version) = classify_field(&field) {
        debug!("packageManager field {:?} pins Yarn {}", field, version);
        return Ok(Some(version));
    }

    Ok(None)
}

/// Classify a `packageManager` value such as `yarn@3.6.0` or `yarn@berry`.
///
/// Only Berry is ever concluded from here: a 1.x pin falls through so the
/// lockfile check still gets a say. The version token is judged by its first
/// character (`2`-`9` means Berry), carried over as-is from the established
/// behavior. Known limitation: a hypothetical `yarn@10.x` starts with `1`
/// and would be misclassified as non-Berry.
fn classify_field(value: &str) -> Option<YarnVersion> {
    let version = value.strip_prefix("yarn@")?;

    if version == "berry" || version == "stable" {
        return Some(YarnVersion::Berry);
    }

    match version.bytes().next() {
        Some(b'2'..=b'9') => Some(YarnVersion::Berry),
        _ => None,
    }
}
