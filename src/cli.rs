use clap::Parser;
use std::path::PathBuf;

/// Command-line interface definition
#[derive(Parser)]
#[command(
    name = "yarn-detect",
    author,
    version,
    about = "Detects whether a project uses Yarn Classic or Yarn Berry",
    long_about = None
)]
pub struct Cli {
    /// Path to the project directory to inspect
    #[arg(value_name = "PROJECT_PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output the verdict in JSON format
    #[arg(long)]
    pub json: bool,

    /// Also print the parsed .yarnrc.yml configuration
    #[arg(short, long)]
    pub config: bool,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
