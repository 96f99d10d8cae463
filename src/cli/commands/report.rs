//! Adherence report commands: indicators, monthly and by-type

use super::{open_store, report_failure};
use crate::core::lifecycle::parse_date;
use crate::core::store::{DashboardFilter, SubjectFilter};
use crate::domain::{ExamStatus, ExamType, Gender, Sector};
use chrono::{Datelike, Utc};
use clap::Args;

/// Arguments for the indicators command
#[derive(Args, Debug)]
pub struct IndicatorsArgs {
    /// Only subjects in this sector
    #[arg(long)]
    pub sector: Option<Sector>,

    /// Only subjects with this gender (M or F)
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Only subjects matching this search term
    #[arg(long)]
    pub search: Option<String>,

    /// Only exams of these types (repeatable)
    #[arg(long = "exam-type")]
    pub exam_types: Vec<ExamType>,

    /// Only exams in these statuses (repeatable)
    #[arg(long = "status")]
    pub statuses: Vec<ExamStatus>,

    /// Only exams on or after this date
    #[arg(long)]
    pub from: Option<String>,

    /// Only exams on or before this date
    #[arg(long)]
    pub to: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl IndicatorsArgs {
    fn dashboard_filter(&self) -> crate::domain::Result<DashboardFilter> {
        let mut subjects = SubjectFilter::default();
        if let Some(sector) = self.sector {
            subjects = subjects.with_sector(sector);
        }
        if let Some(gender) = self.gender {
            subjects = subjects.with_gender(gender);
        }
        if let Some(term) = &self.search {
            subjects = subjects.with_search(term.clone());
        }

        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;

        Ok(DashboardFilter::default()
            .with_subjects(subjects)
            .with_exam_types(self.exam_types.iter().copied())
            .with_statuses(self.statuses.iter().copied())
            .with_date_range(from, to))
    }

    /// Execute the indicators command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let filter = match self.dashboard_filter() {
            Ok(f) => f,
            Err(e) => return Ok(report_failure("Invalid filter", &e)),
        };
        let store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let indicators = store.indicators();
        let dashboard = store.dashboard(&filter);
        let expiring = store.expiring_exams(Utc::now()).len();

        if self.json {
            let out = serde_json::json!({
                "indicators": indicators,
                "dashboard": dashboard.stats,
                "byExamType": dashboard.by_exam_type,
                "expiringSoon": expiring,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(0);
        }

        println!("📊 Indicators ({})", store.variant());
        println!();
        println!("  ✅ Ok:        {}", indicators.ok);
        println!("  ❌ Expired:   {}", indicators.expired);
        println!("  📋 Total:     {}", indicators.total);
        println!("  📈 Adherence: {:.1}%", indicators.adherence_percentage);
        println!(
            "  ⚠️  Expiring within {} days: {}",
            store.settings().warning_window_days,
            expiring
        );
        println!();

        let stats = dashboard.stats;
        println!("Dashboard:");
        println!("  Subjects:  {}", stats.total_subjects);
        println!("  Exams:     {}", stats.total_exams);
        println!("  Completed: {}", stats.completed_exams);
        println!("  Pending:   {}", stats.pending_exams);
        println!("  Scheduled: {}", stats.scheduled_exams);
        println!(
            "  Average exams per subject: {:.2}",
            stats.average_exams_per_subject
        );
        println!();
        Ok(0)
    }
}

/// Arguments for the monthly command
#[derive(Args, Debug)]
pub struct MonthlyArgs {
    /// Year to report (default current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl MonthlyArgs {
    /// Execute the monthly command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let year = self.year.unwrap_or_else(|| Utc::now().year());
        let store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let buckets = store.monthly_adherence(year);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&buckets)?);
            return Ok(0);
        }

        println!("📅 Monthly adherence {year}");
        println!();
        println!(
            "{:<12} {:>9} {:>7} {:>10} {:>8} {:>11} {:>7}",
            "Mês", "Subjects", "Exams", "Completed", "Expired", "Adherence", "Goal"
        );
        println!("{}", "-".repeat(70));
        for bucket in &buckets {
            println!(
                "{:<12} {:>9} {:>7} {:>10} {:>8} {:>10.1}% {:>6.0}%",
                bucket.month,
                bucket.total_subjects,
                bucket.total_exams,
                bucket.completed_exams,
                bucket.expired_exams,
                bucket.adherence_percentage,
                bucket.goal_percentage
            );
        }
        println!();
        Ok(0)
    }
}

/// Arguments for the by-type command
#[derive(Args, Debug)]
pub struct ByTypeArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ByTypeArgs {
    /// Execute the by-type command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let by_type = store.adherence_by_type();
        if self.json {
            let named: Vec<_> = by_type
                .iter()
                .map(|(t, a)| serde_json::json!({ "examType": t, "adherence": a }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&named)?);
            return Ok(0);
        }

        println!("🧪 Adherence by exam type");
        println!();
        if by_type.is_empty() {
            println!("No completed or expired exams recorded.");
            return Ok(0);
        }
        println!("{:<25} {:>6} {:>8} {:>11}", "Exam", "Ok", "Expired", "Adherence");
        println!("{}", "-".repeat(53));
        for (exam_type, tally) in &by_type {
            println!(
                "{:<25} {:>6} {:>8} {:>10.1}%",
                exam_type.name(),
                tally.ok,
                tally.expired,
                tally.percentage
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_indicator_flags_build_dashboard_filter() {
        let cli = Cli::parse_from([
            "aso-control",
            "indicators",
            "--sector",
            "MOD",
            "--exam-type",
            "ecg",
            "--exam-type",
            "eeg",
            "--status",
            "completed",
            "--from",
            "2024-01-01",
        ]);
        let Commands::Indicators(args) = cli.command else {
            panic!("expected indicators");
        };

        let filter = args.dashboard_filter().unwrap();
        assert_eq!(filter.subjects.sector, Some(Sector::Mod));
        assert_eq!(filter.exam_types, vec![ExamType::Ecg, ExamType::Eeg]);
        assert_eq!(filter.statuses, vec![ExamStatus::Completed]);
        assert!(filter.from.is_some());
        assert!(filter.to.is_none());
    }

    #[test]
    fn test_indicator_bad_date_is_rejected() {
        let cli = Cli::parse_from(["aso-control", "indicators", "--to", "amanhã"]);
        let Commands::Indicators(args) = cli.command else {
            panic!("expected indicators");
        };
        assert!(args.dashboard_filter().is_err());
    }
}
