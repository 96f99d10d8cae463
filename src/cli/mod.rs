//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ASO Control using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ASO Control - exam lifecycle and adherence tracking
#[derive(Parser, Debug)]
#[command(name = "aso-control")]
#[command(version, about, long_about = None)]
#[command(author = "ASO Control Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "aso-control.toml", env = "ASO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ASO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Fill the store with generated sample records
    Seed(commands::seed::SeedArgs),

    /// Move completed exams past their expiration to expired
    Refresh(commands::refresh::RefreshArgs),

    /// Show indicator cards and dashboard counters
    Indicators(commands::report::IndicatorsArgs),

    /// Show the twelve monthly adherence buckets of a year
    Monthly(commands::report::MonthlyArgs),

    /// Show ok/expired tallies per exam type
    ByType(commands::report::ByTypeArgs),

    /// Print the ASO control sheet
    Sheet(commands::sheet::SheetArgs),

    /// List subjects, or show one subject with its exams
    Subjects(commands::subjects::SubjectsArgs),

    /// Register a subject
    AddSubject(commands::subjects::AddSubjectArgs),

    /// Remove a subject and all of its exams
    RemoveSubject(commands::subjects::RemoveSubjectArgs),

    /// Log an exam for a subject
    LogExam(commands::exams::LogExamArgs),

    /// Schedule or reschedule an exam
    ScheduleExam(commands::exams::ScheduleExamArgs),

    /// Mark an exam as completed
    CompleteExam(commands::exams::CompleteExamArgs),

    /// Cancel an exam (clinical variant)
    CancelExam(commands::exams::CancelExamArgs),

    /// Set result, notes or doctor on an exam
    AnnotateExam(commands::exams::AnnotateExamArgs),

    /// Remove a single exam
    RemoveExam(commands::exams::RemoveExamArgs),

    /// Write subjects and exams to a JSON document
    Export(commands::exchange::ExportArgs),

    /// Replace stored records from a JSON document
    Import(commands::exchange::ImportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExamStatus, ExamType, Sector};

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["aso-control", "indicators"]);
        assert_eq!(cli.config, "aso-control.toml");
        assert!(cli.log_level.is_none());
        assert!(matches!(cli.command, Commands::Indicators(_)));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "aso-control",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "refresh",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Refresh(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["aso-control", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_log_exam() {
        let cli = Cli::parse_from([
            "aso-control",
            "log-exam",
            "--subject",
            "employee-1",
            "--exam-type",
            "audiometria",
            "--status",
            "scheduled",
            "--date",
            "2024-07-01",
        ]);
        match cli.command {
            Commands::LogExam(args) => {
                assert_eq!(args.subject.as_str(), "employee-1");
                assert_eq!(args.exam_type, ExamType::Audiometria);
                assert_eq!(args.status, ExamStatus::Scheduled);
                assert_eq!(args.date.as_deref(), Some("2024-07-01"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_sheet_filters() {
        let cli = Cli::parse_from(["aso-control", "sheet", "--sector", "ti", "--json"]);
        match cli.command {
            Commands::Sheet(args) => {
                assert_eq!(args.sector, Some(Sector::Ti));
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_exam_type() {
        let result = Cli::try_parse_from([
            "aso-control",
            "log-exam",
            "--subject",
            "employee-1",
            "--exam-type",
            "tomografia",
        ]);
        assert!(result.is_err());
    }
}
