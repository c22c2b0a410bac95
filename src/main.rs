//! Glass Clock - shows the current time and date in the terminal.
//!
//! Setup failures are reported once and the process exits without ever
//! drawing the clock.

use std::process::ExitCode;

use clap::Parser;
use glass_clock::{
    ClockModule,
    cli::{Cli, formatting::format_error},
    clock::SystemClock,
    config::{Config, ConfigFile, GeneralConfig},
    render::{Assets, TerminalSurface},
    scheduler::IntervalTicker,
    tracing_config,
};
use schemars::schema_for;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.schema {
        return print_schema();
    }

    let config = Config::load(cli.config.as_deref()).map(|c| c.with_overrides(cli.overrides()));

    let general = config
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&general) {
        eprintln!("{}", format_error(&format!("could not initialize logging: {e}")));
        return ExitCode::FAILURE;
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Could not parse config");
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        return print_config(&config);
    }

    let mut module =
        match ClockModule::setup(config.clock, &Assets::embedded(), TerminalSurface::stdout()) {
            Ok(module) => module,
            Err(e) => {
                error!(error = %e, "Could not setup module");
                return ExitCode::FAILURE;
            }
        };

    if cli.once {
        module.render_now(&SystemClock);
        module.into_target().finish();
        return ExitCode::SUCCESS;
    }

    let mut scheduler = module.scheduler(SystemClock, IntervalTicker::default());
    scheduler.run_until(shutdown_signal()).await;
    scheduler.into_target().finish();

    info!("Exiting");
    ExitCode::SUCCESS
}

fn init_logging(general: &GeneralConfig) -> Result<(), Box<dyn std::error::Error>> {
    match &general.log_dir {
        Some(dir) => tracing_config::init_with_file(general.log_level, dir),
        None => tracing_config::init(general.log_level),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}

fn print_schema() -> ExitCode {
    match serde_json::to_string_pretty(&schema_for!(ConfigFile)) {
        Ok(schema) => {
            println!("{schema}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn print_config(config: &Config) -> ExitCode {
    match toml::to_string(config) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Could not serialize config");
            ExitCode::FAILURE
        }
    }
}
