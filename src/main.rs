// ASO Control - Exam Lifecycle and Adherence Tracking
// Copyright (c) 2025 ASO Control Contributors
// Licensed under the MIT License

use aso_control::cli::{Cli, Commands};
use aso_control::config::{load_config, LoggingConfig};
use aso_control::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the config when it loads; otherwise console only
    let (config_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (
            None,
            LoggingConfig {
                local_enabled: false,
                ..LoggingConfig::default()
            },
        ),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "ASO Control - Exam Lifecycle and Adherence Tracking"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_str();
    match &cli.command {
        Commands::Init(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(config),
        Commands::Seed(args) => args.execute(config),
        Commands::Refresh(args) => args.execute(config),
        Commands::Indicators(args) => args.execute(config),
        Commands::Monthly(args) => args.execute(config),
        Commands::ByType(args) => args.execute(config),
        Commands::Sheet(args) => args.execute(config),
        Commands::Subjects(args) => args.execute(config),
        Commands::AddSubject(args) => args.execute(config),
        Commands::RemoveSubject(args) => args.execute(config),
        Commands::LogExam(args) => args.execute(config),
        Commands::ScheduleExam(args) => args.execute(config),
        Commands::CompleteExam(args) => args.execute(config),
        Commands::CancelExam(args) => args.execute(config),
        Commands::AnnotateExam(args) => args.execute(config),
        Commands::RemoveExam(args) => args.execute(config),
        Commands::Export(args) => args.execute(config),
        Commands::Import(args) => args.execute(config),
    }
}
