//! # registrar CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use registrar_api::telemetry::{self, LogFormat};
use tracing_subscriber::EnvFilter;

/// Registration gateway CLI.
///
/// Registers resources into a records catalogue, removes them, validates
/// requests offline and runs the HTTP service.
#[derive(Parser, Debug)]
#[command(name = "registrar", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service.
    Serve(registrar_cli::serve::ServeArgs),
    /// Register (create or update) one resource.
    Register(registrar_cli::execute::RegisterArgs),
    /// Remove one resource.
    Deregister(registrar_cli::execute::DeregisterArgs),
    /// Validate a request document without contacting anything.
    Validate(registrar_cli::validate::ValidateArgs),
    /// Print process metadata.
    Processes(registrar_cli::processes::ProcessesArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let format = std::env::var("REGISTRAR_LOG_FORMAT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LogFormat::Text);
    let filter = if cli.verbose == 0 {
        telemetry::env_filter(default_level)
    } else {
        EnvFilter::new(default_level)
    };
    telemetry::init(filter, format);

    let result = match &cli.command {
        Commands::Serve(args) => registrar_cli::serve::run_serve(args).await,
        Commands::Register(args) => registrar_cli::execute::run_register(args).await,
        Commands::Deregister(args) => registrar_cli::execute::run_deregister(args).await,
        Commands::Validate(args) => registrar_cli::validate::run_validate(args),
        Commands::Processes(args) => registrar_cli::processes::run_processes(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
