//! dts-bundler CLI
//!
//! Entry point for the `dts-bundle` command-line tool.

use clap::{Parser, Subcommand};
use dts_bundler::{check, merge, BundleConfig};
use std::path::PathBuf;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "dtsbundle.toml";

#[derive(Parser)]
#[command(name = "dts-bundle")]
#[command(about = "Merge ambient declaration fragments into a single bundle", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge fragments into the output bundle
    Merge {
        /// Placeholder document containing @merge-here markers
        #[arg(long)]
        placeholder: Option<PathBuf>,

        /// Directory under which fragment keys are resolved
        #[arg(long)]
        fragments: Option<PathBuf>,

        /// Output path for the merged bundle
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Path to config file (default: dtsbundle.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output the merge report in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Verify that every marker resolves to a fragment file
    Check {
        /// Placeholder document containing @merge-here markers
        #[arg(long)]
        placeholder: Option<PathBuf>,

        /// Directory under which fragment keys are resolved
        #[arg(long)]
        fragments: Option<PathBuf>,

        /// Path to config file (default: dtsbundle.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output the check report in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            placeholder,
            fragments,
            output,
            config,
            json,
        } => {
            run_merge(placeholder, fragments, output, config, json);
        }
        Commands::Check {
            placeholder,
            fragments,
            config,
            json,
        } => {
            run_check(placeholder, fragments, config, json);
        }
    }
}

/// Load config from an explicit path, the default path if present, or defaults
fn load_config(config_path: Option<PathBuf>) -> BundleConfig {
    let (path, required) = match config_path {
        Some(p) => (p, true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if path.exists() {
        match BundleConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    } else if required {
        eprintln!("Config file not found: {}", path.display());
        process::exit(1);
    } else {
        BundleConfig::default()
    }
}

fn run_merge(
    placeholder: Option<PathBuf>,
    fragments: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json_output: bool,
) {
    let config = load_config(config_path);
    let placeholder = placeholder.unwrap_or(config.placeholder);
    let fragments = fragments.unwrap_or(config.fragments);
    let output = output.unwrap_or(config.output);

    let report = match merge(&placeholder, &fragments, &output) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Merge failed: {}", e);
            process::exit(1);
        }
    };

    print_report(json_output, report.to_json(), report.to_human());

    // Missing fragments were already diagnosed on stderr; the merge itself
    // succeeded, so exit clean.
    process::exit(0);
}

fn run_check(
    placeholder: Option<PathBuf>,
    fragments: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json_output: bool,
) {
    let config = load_config(config_path);
    let placeholder = placeholder.unwrap_or(config.placeholder);
    let fragments = fragments.unwrap_or(config.fragments);

    let report = match check(&placeholder, &fragments) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Check failed: {}", e);
            process::exit(1);
        }
    };

    let missing = report.missing_count();
    print_report(json_output, report.to_json(), report.to_human());

    if missing > 0 {
        eprintln!("{} fragment(s) missing under {}", missing, fragments.display());
        process::exit(1);
    }
    process::exit(0);
}

fn print_report(json_output: bool, json: Result<String, serde_json::Error>, human: String) {
    if json_output {
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", human);
    }
}
