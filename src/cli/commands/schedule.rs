//! Schedule command implementation
//!
//! Prints a child's schedule with each entry's status at the evaluation
//! date, followed by any unmatched completions and data-quality findings.

use super::{report_error, ChildArgs, EXIT_OK};
use crate::core::schedule::{EntryView, ScheduleReport};
use crate::domain::ScheduleStatus;
use clap::{Args, ValueEnum};

/// Output format for schedule commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Restrict the listing to one kind of entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnlyFilter {
    Overdue,
    Upcoming,
    /// Entries with an active reminder
    Reminders,
}

impl OnlyFilter {
    fn keeps(self, view: &EntryView) -> bool {
        match self {
            OnlyFilter::Overdue => view.status == ScheduleStatus::Overdue,
            OnlyFilter::Upcoming => view.status == ScheduleStatus::Upcoming,
            OnlyFilter::Reminders => view.notification_due,
        }
    }
}

/// Arguments for the schedule command
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub child: ChildArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only list overdue, upcoming, or reminder entries
    #[arg(long, value_enum)]
    pub only: Option<OnlyFilter>,
}

impl ScheduleArgs {
    /// Execute the schedule command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            child_id = %self.child.child_id,
            birth_date = %self.child.birth_date,
            "Computing schedule"
        );

        let mut report = match self.child.build_report(config_path).await {
            Ok(report) => report,
            Err(e) => return Ok(report_error(&e, "Failed to compute schedule")),
        };

        if let Some(only) = self.only {
            report.entries.retain(|view| only.keeps(view));
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print_table(&report),
        }

        Ok(EXIT_OK)
    }
}

fn print_table(report: &ScheduleReport) {
    println!(
        "📅 Schedule for {} (born {}) as of {}",
        report.child_id, report.birth_date, report.as_of
    );
    println!();
    println!(
        "{:<12} {:<12} {:<28} {:>4}  {:<10} {}",
        "Due", "Vaccine", "Name", "Dose", "Status", "Completed"
    );

    for view in &report.entries {
        let entry = &view.entry;
        let dose = match entry.occurrence_year {
            Some(year) => format!("{}/y{}", entry.dose_number, year),
            None => entry.dose_number.to_string(),
        };
        let completed = entry
            .completed_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        let reminder = if view.notification_due { " 🔔" } else { "" };

        println!(
            "{:<12} {:<12} {:<28} {:>4}  {:<10} {}{}",
            entry.due_date.to_string(),
            entry.vaccine_id.as_str(),
            truncate(&entry.vaccine_name, 28),
            dose,
            view.status.to_string(),
            completed,
            reminder
        );
    }

    println!();
    println!(
        "Total: {}  Completed: {}  Overdue: {}  Upcoming: {}  Scheduled: {}  ({}% complete)",
        report.stats.total,
        report.stats.completed,
        report.stats.overdue,
        report.stats.upcoming,
        report.stats.scheduled,
        report.stats.completion_rate
    );

    for warning in &report.warnings {
        println!("⚠️  {warning}");
    }
    for issue in &report.data_quality {
        println!("⚠️  {issue}");
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut short: String = value.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
