use clap::Parser;
use colored::Colorize;
use std::process;
use yarn_detect::{YarnDetector, YarnVersion, cli::Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.init_logging();

    let detector = YarnDetector::new(&cli.path);
    let version = detector.detect_version()?;

    if cli.json {
        print_json(&cli, &detector, version)?;
    } else {
        print_human(&cli, &detector, version)?;
    }

    Ok(())
}

fn print_json(
    cli: &Cli,
    detector: &YarnDetector,
    version: YarnVersion,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut output = serde_json::json!({
        "projectPath": cli.path.display().to_string(),
        "yarnVersion": version.as_str(),
        "installCommand": version.install_command(),
    });

    if cli.config {
        let config = detector.yarnrc_config()?;
        output["yarnrc"] = serde_json::to_value(&config)?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_human(
    cli: &Cli,
    detector: &YarnDetector,
    version: YarnVersion,
) -> Result<(), Box<dyn std::error::Error>> {
    let label = match version {
        YarnVersion::Classic => version.as_str().yellow(),
        YarnVersion::Berry => version.as_str().green(),
    };
    println!("{} {}", "Yarn generation:".bold(), label);
    println!("{} {}", "Install command:".bold(), version.install_command());

    if cli.config {
        let config = detector.yarnrc_config()?;
        if config.is_empty() {
            println!("{}", "No .yarnrc.yml configuration found".dimmed());
        } else {
            println!("{}", ".yarnrc.yml configuration:".bold());
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}
