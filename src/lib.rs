//! # yarn-detect
//!
//! A Rust library and command-line tool that determines whether a JavaScript
//! project uses the Classic (1.x) or Berry (2.x+) generation of Yarn, from
//! on-disk evidence alone.
//!
//! ## Detection heuristics
//!
//! Three independent checks run in strict precedence order:
//!
//! - **Marker file**: the presence of `.yarnrc.yml` is definitive for Berry
//! - **Manifest field**: a `packageManager` pin like `"yarn@3.6.0"` in
//!   `package.json`
//! - **Lockfile format**: the first bytes of `yarn.lock` (v1 comment header
//!   vs. Berry's YAML document)
//!
//! Projects with no Berry indicator default to Classic. Nothing is ever
//! installed or executed; the detector only reads files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use yarn_detect::{YarnDetector, YarnVersion};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = YarnDetector::new("./my-project");
//! match detector.detect_version()? {
//!     YarnVersion::Berry => println!("{}", YarnVersion::Berry.install_command()),
//!     YarnVersion::Classic => println!("{}", YarnVersion::Classic.install_command()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod detector;
pub mod error;

// Re-export commonly used types
pub use detector::{YarnDetector, YarnVersion};
pub use error::{DetectError, Result};

/// The current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
