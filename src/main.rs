//! `wellness-report` - assemble a validated report bundle from a profile file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wellness_report::adapters::{load_profile, TemplateNarrativeWriter};
use wellness_report::application::{AssembleReportCommand, AssembleReportHandler};
use wellness_report::config::{AppConfig, LoggingConfig};
use wellness_report::domain::foundation::{DomainError, ErrorCode};
use wellness_report::domain::profile::Tier;

/// Assemble a personalized wellness report bundle
#[derive(Parser, Debug)]
#[clap(name = "wellness-report")]
#[clap(about = "Evaluate a scored profile and print the validated content bundle as JSON")]
struct Args {
    /// Profile file (.json, .yaml or .yml)
    #[clap(value_name = "PROFILE")]
    profile: PathBuf,

    /// Purchased tier: free, essential, premium or coaching
    #[clap(value_name = "TIER")]
    tier: Tier,

    /// Purchased add-ons, carried through to the bundle
    #[clap(long = "add-on", value_name = "NAME")]
    add_ons: Vec<String>,

    /// Pretty-print the JSON output
    #[clap(long)]
    pretty: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: Args, config: &AppConfig) -> Result<String, DomainError> {
    let profile = load_profile(&args.profile)?;
    let handler = AssembleReportHandler::new(
        Arc::new(TemplateNarrativeWriter::new()),
        config.report_settings(),
    );
    let report = handler.handle(AssembleReportCommand {
        profile,
        tier: args.tier,
        add_ons: args.add_ons,
    })?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    json.map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.logging);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::from(2);
    }

    match run(args, &config) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = %e.code, error = %e.message, "Report assembly failed");
            ExitCode::FAILURE
        }
    }
}
