//! Stats command implementation

use super::schedule::OutputFormat;
use super::{report_error, ChildArgs, EXIT_OK};
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub child: ChildArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let report = match self.child.build_report(config_path).await {
            Ok(report) => report,
            Err(e) => return Ok(report_error(&e, "Failed to compute statistics")),
        };

        report.stats.log_summary();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.stats)?),
            OutputFormat::Table => {
                let stats = &report.stats;
                println!("📊 Statistics for {} as of {}", report.child_id, report.as_of);
                println!();
                println!("  Total:      {}", stats.total);
                println!("  Completed:  {}", stats.completed);
                println!("  Overdue:    {}", stats.overdue);
                println!("  Upcoming:   {}", stats.upcoming);
                println!("  Scheduled:  {}", stats.scheduled);
                println!("  Completion: {}%", stats.completion_rate);
                if !report.warnings.is_empty() {
                    println!();
                    println!("⚠️  {} completion(s) matched no schedule entry", report.warnings.len());
                }
            }
        }

        Ok(EXIT_OK)
    }
}
