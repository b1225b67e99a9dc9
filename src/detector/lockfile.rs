//! `yarn.lock` format inspection
//!
//! Classic lockfiles are a line-oriented custom format beginning with a fixed
//! comment header; Berry lockfiles are YAML documents opening with metadata
//! or version keys. A bounded prefix is enough to tell them apart without
//! reading a potentially large file in full.

use crate::detector::YarnVersion;
use crate::error::{DetectError, Result};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Sample size; both formats reveal themselves well inside this window.
const SAMPLE_LEN: usize = 512;

const CLASSIC_HEADER: &str = "# yarn lockfile v1";

/// Classify the lockfile generation from its leading bytes.
///
/// An empty or unreadable-after-open lockfile gives no signal rather than an
/// error, as does a YAML-looking prefix that fails to parse. Opening the
/// file at all must succeed, since existence was already confirmed.
pub(crate) fn classify_format(path: &Path) -> Result<Option<YarnVersion>> {
    let mut file = File::open(path).map_err(|source| DetectError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut buffer = [0u8; SAMPLE_LEN];
    let n = match file.read(&mut buffer) {
        Ok(n) => n,
        Err(e) => {
            debug!("treating unreadable {} as no signal: {}", path.display(), e);
            return Ok(None);
        }
    };
    if n == 0 {
        debug!("{} is empty, no format signal", path.display());
        return Ok(None);
    }

    let sample = &buffer[..n];
    let content = String::from_utf8_lossy(sample);

    if content.contains(CLASSIC_HEADER) {
        debug!("lockfile carries the v1 header, Classic format");
        return Ok(Some(YarnVersion::Classic));
    }

    if content.contains("__metadata:") || content.contains("version:") {
        // Confirm it really is YAML before concluding Berry. A truncated
        // prefix can fail to parse; that just means no verdict.
        if serde_yaml::from_slice::<serde_yaml::Value>(sample).is_ok() {
            debug!("lockfile parses as YAML, Berry format");
            return Ok(Some(YarnVersion::Berry));
        }
        debug!("lockfile prefix looks like YAML but does not parse, no verdict");
    }

    Ok(None)
}
