//! # Detector Module
//!
//! Classifies a project's Yarn generation from on-disk evidence, without
//! executing any external process. Three independent checks run in strict
//! precedence order, each of which may short-circuit with a definitive
//! answer:
//!
//! 1. `.yarnrc.yml` marker file (strongest Berry signal)
//! 2. `packageManager` field in `package.json`
//! 3. `yarn.lock` format (Classic header vs. Berry YAML)
//!
//! If none of the checks produce a verdict, the project defaults to Classic.

use crate::error::{DetectError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod lockfile;
pub mod manifest;

/// Berry run-control configuration file; its presence alone is definitive.
pub const YARNRC_FILE: &str = ".yarnrc.yml";
/// Project manifest, inspected only for the top-level `packageManager` field.
pub const MANIFEST_FILE: &str = "package.json";
/// Lockfile whose leading bytes distinguish the two generations.
pub const LOCKFILE_FILE: &str = "yarn.lock";

/// The two major generational lines of Yarn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YarnVersion {
    /// The legacy 1.x line
    Classic,
    /// The 2.x-and-above rewrite
    Berry,
}

impl YarnVersion {
    pub fn as_str(&self) -> &str {
        match self {
            YarnVersion::Classic => "Classic",
            YarnVersion::Berry => "Berry",
        }
    }

    /// Canonical reproducible-install command for this generation. The
    /// `--frozen-lockfile` flag was renamed to `--immutable` in Berry.
    pub fn install_command(&self) -> &str {
        match self {
            YarnVersion::Classic => "yarn install --frozen-lockfile",
            YarnVersion::Berry => "yarn install --immutable",
        }
    }
}

impl std::fmt::Display for YarnVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detects the Yarn generation and configuration of a project directory.
///
/// Construction performs no I/O; every operation re-reads the filesystem, so
/// the result is a pure function of the on-disk state at call time. Only the
/// top level of the project directory is inspected, never subdirectories.
pub struct YarnDetector {
    project_path: PathBuf,
}

impl YarnDetector {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
        }
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Determine which generation of Yarn the project uses.
    ///
    /// Checks are evaluated in precedence order until one yields a verdict;
    /// a check that cannot tell falls through to the next. Projects with no
    /// Berry indicator at all are Classic.
    ///
    /// # Errors
    ///
    /// Fails on existence-check errors other than not-found, and on read
    /// errors for an existing manifest. A malformed `package.json` is not an
    /// error here: the manifest check yields no verdict and the install
    /// stage surfaces the real parse failure later.
    pub fn detect_version(&self) -> Result<YarnVersion> {
        debug!(
            "detecting Yarn generation for project: {}",
            self.project_path.display()
        );

        let checks: [(&str, fn(&Self) -> Result<Option<YarnVersion>>); 3] = [
            ("yarnrc marker", Self::check_yarnrc_marker),
            ("manifest packageManager field", Self::check_manifest_field),
            ("lockfile format", Self::check_lockfile_format),
        ];

        for (name, check) in checks {
            if let Some(version) = check(self)? {
                info!("detected Yarn {} via {}", version, name);
                return Ok(version);
            }
        }

        debug!("no Berry indicators found, defaulting to Classic");
        Ok(YarnVersion::Classic)
    }

    /// Read the `.yarnrc.yml` configuration if it exists.
    ///
    /// A missing file yields an empty mapping, not an error.
    ///
    /// # Errors
    ///
    /// Fails if the existence check fails, the file cannot be read, or the
    /// file exists but is not valid YAML. Unlike the lockfile-sample check,
    /// a YAML parse failure here is fatal: an unreadable run-control file is
    /// a real project misconfiguration, not a mere lack of signal.
    pub fn yarnrc_config(&self) -> Result<serde_yaml::Mapping> {
        let path = self.project_path.join(YARNRC_FILE);

        if !file_exists(&path)? {
            debug!("no {} present, returning empty config", YARNRC_FILE);
            return Ok(serde_yaml::Mapping::new());
        }

        let content = fs::read_to_string(&path).map_err(|source| DetectError::Read {
            path: path.clone(),
            source,
        })?;

        // An empty or all-comments file deserializes as null, which is as
        // good as no settings at all.
        let config: Option<serde_yaml::Mapping> = serde_yaml::from_str(&content)
            .map_err(|source| DetectError::YamlParse { path, source })?;

        Ok(config.unwrap_or_default())
    }

    /// One-line human-readable description of the verdict.
    pub fn detection_summary(&self) -> Result<String> {
        let version = self.detect_version()?;
        Ok(format!(
            "Detected Yarn {} in {} - install with `{}`",
            version,
            self.project_path.display(),
            version.install_command()
        ))
    }

    fn check_yarnrc_marker(&self) -> Result<Option<YarnVersion>> {
        let path = self.project_path.join(YARNRC_FILE);
        if file_exists(&path)? {
            debug!("found {}, project uses Berry", YARNRC_FILE);
            Ok(Some(YarnVersion::Berry))
        } else {
            Ok(None)
        }
    }

    fn check_manifest_field(&self) -> Result<Option<YarnVersion>> {
        let path = self.project_path.join(MANIFEST_FILE);
        if !file_exists(&path)? {
            return Ok(None);
        }
        manifest::classify_package_manager(&path)
    }

    fn check_lockfile_format(&self) -> Result<Option<YarnVersion>> {
        let path = self.project_path.join(LOCKFILE_FILE);
        if !file_exists(&path)? {
            return Ok(None);
        }
        lockfile::classify_format(&path)
    }
}

/// Existence probe that distinguishes "not found" from genuine I/O failures.
/// Detection never guesses in the presence of the latter.
fn file_exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(DetectError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_path_buf();
        (temp_dir, path)
    }

    #[test]
    fn test_yarnrc_marker_wins_over_everything() {
        let (_temp_dir, project_path) = create_test_project();

        // Classic-looking manifest and lockfile, but the marker file is
        // present and takes absolute precedence.
        fs::write(project_path.join(".yarnrc.yml"), "nodeLinker: node-modules\n").unwrap();
        fs::write(
            project_path.join("package.json"),
            r#"{"name": "app", "packageManager": "yarn@1.22.19"}"#,
        )
        .unwrap();
        fs::write(project_path.join("yarn.lock"), "# yarn lockfile v1\n").unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Berry);
    }

    #[test]
    fn test_manifest_berry_version() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(
            project_path.join("package.json"),
            r#"{"name": "app", "packageManager": "yarn@3.6.0"}"#,
        )
        .unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Berry);
    }

    #[test]
    fn test_manifest_classic_version_falls_through_to_default() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(
            project_path.join("package.json"),
            r#"{"name": "app", "packageManager": "yarn@1.22.19"}"#,
        )
        .unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Classic);
    }

    #[test]
    fn test_manifest_berry_and_stable_tags() {
        for tag in ["yarn@berry", "yarn@stable"] {
            let (_temp_dir, project_path) = create_test_project();

            fs::write(
                project_path.join("package.json"),
                format!(r#"{{"name": "app", "packageManager": "{tag}"}}"#),
            )
            .unwrap();

            let detector = YarnDetector::new(project_path);
            assert_eq!(
                detector.detect_version().unwrap(),
                YarnVersion::Berry,
                "{tag} should classify as Berry"
            );
        }
    }

    #[test]
    fn test_malformed_manifest_is_not_fatal() {
        let (_temp_dir, project_path) = create_test_project();

        // Truncated JSON. Detection must degrade to "no signal" and keep
        // going rather than error out.
        fs::write(project_path.join("package.json"), r#"{"name": "app", "pack"#).unwrap();
        fs::write(project_path.join("yarn.lock"), "# yarn lockfile v1\n").unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Classic);
    }

    #[test]
    fn test_classic_lockfile_header() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(
            project_path.join("yarn.lock"),
            "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n# yarn lockfile v1\n",
        )
        .unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Classic);
    }

    #[test]
    fn test_berry_lockfile_metadata() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(
            project_path.join("yarn.lock"),
            "__metadata:\n  version: 6\n  cacheKey: 8\n",
        )
        .unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Berry);
    }

    #[test]
    fn test_empty_project_defaults_to_classic() {
        let (_temp_dir, project_path) = create_test_project();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Classic);
    }

    #[test]
    fn test_empty_lockfile_defaults_to_classic() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(project_path.join("yarn.lock"), b"").unwrap();

        let detector = YarnDetector::new(project_path);
        assert_eq!(detector.detect_version().unwrap(), YarnVersion::Classic);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(
            project_path.join("package.json"),
            r#"{"name": "app", "packageManager": "yarn@4.0.2"}"#,
        )
        .unwrap();

        let detector = YarnDetector::new(project_path);
        let first = detector.detect_version().unwrap();
        let second = detector.detect_version().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, YarnVersion::Berry);
    }

    #[test]
    fn test_yarnrc_config_missing_file() {
        let (_temp_dir, project_path) = create_test_project();

        let detector = YarnDetector::new(project_path);
        let config = detector.yarnrc_config().unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_yarnrc_config_round_trip() {
        let (_temp_dir, project_path) = create_test_project();

        let yaml = "nodeLinker: node-modules\ncacheFolder: ./.yarn/cache\n";
        fs::write(project_path.join(".yarnrc.yml"), yaml).unwrap();

        let detector = YarnDetector::new(project_path);
        let config = detector.yarnrc_config().unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(
            config.get("nodeLinker").and_then(|v| v.as_str()),
            Some("node-modules")
        );
        assert_eq!(
            config.get("cacheFolder").and_then(|v| v.as_str()),
            Some("./.yarn/cache")
        );
    }

    #[test]
    fn test_yarnrc_config_empty_file() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(project_path.join(".yarnrc.yml"), "").unwrap();

        let detector = YarnDetector::new(project_path);
        assert!(detector.yarnrc_config().unwrap().is_empty());
    }

    #[test]
    fn test_yarnrc_config_invalid_yaml_is_fatal() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(project_path.join(".yarnrc.yml"), "nodeLinker: [unclosed\n").unwrap();

        let detector = YarnDetector::new(project_path);
        let err = detector.yarnrc_config().unwrap_err();
        assert!(matches!(err, DetectError::YamlParse { .. }));
        assert!(err.to_string().contains(".yarnrc.yml"));
    }

    #[test]
    fn test_install_commands() {
        assert_eq!(
            YarnVersion::Classic.install_command(),
            "yarn install --frozen-lockfile"
        );
        assert_eq!(
            YarnVersion::Berry.install_command(),
            "yarn install --immutable"
        );
    }

    #[test]
    fn test_detection_summary() {
        let (_temp_dir, project_path) = create_test_project();

        fs::write(project_path.join(".yarnrc.yml"), "{}\n").unwrap();

        let detector = YarnDetector::new(project_path);
        let summary = detector.detection_summary().unwrap();
        assert!(summary.contains("Berry"));
        assert!(summary.contains("--immutable"));
    }
}
