use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};

use attendance_standing::attendance::{self, AttendancePolicy};
use attendance_standing::models::AttendanceRecord;
use attendance_standing::{report, roster, standing};

#[derive(Parser)]
#[command(name = "attendance-standing")]
#[command(about = "Attendance percentage and standing tracker for school rosters", long_about = None)]
struct Cli {
    #[command(flatten)]
    policy: PolicyArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PolicyArgs {
    /// Minimum attendance percentage for good standing
    #[arg(long, global = true, env = "ATTENDANCE_THRESHOLD", default_value_t = attendance::DEFAULT_THRESHOLD)]
    threshold: f64,
    /// Points below the threshold still classified as a warning
    #[arg(long, global = true, env = "ATTENDANCE_WARNING_BAND", default_value_t = attendance::DEFAULT_WARNING_BAND)]
    warning_band: f64,
    /// Upcoming classes used to project required attendance
    #[arg(long, global = true, env = "ATTENDANCE_FUTURE_CLASSES", default_value_t = attendance::DEFAULT_FUTURE_CLASSES)]
    future_classes: u32,
}

impl PolicyArgs {
    fn policy(&self) -> anyhow::Result<AttendancePolicy> {
        let policy = AttendancePolicy {
            threshold: self.threshold,
            warning_band: self.warning_band,
            future_classes: self.future_classes,
        };
        Ok(policy.validate()?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single attended/total pair
    Check {
        #[arg(long)]
        attended: u32,
        #[arg(long)]
        total: u32,
    },
    /// Rank students from a roster CSV by attendance
    Score {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        course: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print standings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown standing report
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        course: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("attendance_standing=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let policy = cli.policy.policy()?;

    match cli.command {
        Commands::Check { attended, total } => {
            let record = AttendanceRecord::new(attended, total)?;
            let evaluation = policy.evaluate(&record);
            println!("Attendance: {:.2}% ({attended}/{total})", evaluation.percentage);
            println!("Status: {}", evaluation.status);
            println!("{}", evaluation.status.message());
            if evaluation.reachable {
                println!(
                    "Attend {} of the next {} classes to reach {:.0}%.",
                    evaluation.required, policy.future_classes, policy.threshold
                );
            } else {
                println!(
                    "Needs {} more classes; {:.0}% is out of reach within the next {}.",
                    evaluation.required, policy.threshold, policy.future_classes
                );
            }
        }
        Commands::Score {
            csv,
            course,
            limit,
            json,
        } => {
            let students = roster::filter_course(roster::load_csv(&csv)?, course.as_deref());
            let standings = standing::evaluate_roster(&students, &policy);

            if json {
                let top: Vec<_> = standings.iter().take(limit).collect();
                println!("{}", serde_json::to_string_pretty(&top)?);
                return Ok(());
            }

            if standings.is_empty() {
                println!("No students found on this roster.");
                return Ok(());
            }

            println!("Students by attendance (lowest first):");
            for standing in standings.iter().take(limit) {
                let outlook = if standing.evaluation.reachable {
                    format!(
                        "needs {} of next {}",
                        standing.evaluation.required, policy.future_classes
                    )
                } else {
                    format!("needs {} more, unreachable", standing.evaluation.required)
                };
                println!(
                    "- {} ({}, {}) {:.2}% [{}] {}",
                    standing.student.full_name,
                    standing.student.email,
                    standing.student.course,
                    standing.evaluation.percentage,
                    standing.evaluation.status,
                    outlook
                );
            }
        }
        Commands::Report { csv, course, out } => {
            let students = roster::filter_course(roster::load_csv(&csv)?, course.as_deref());
            let standings = standing::evaluate_roster(&students, &policy);
            let report = report::build_report(
                course.as_deref(),
                Local::now().date_naive(),
                &policy,
                &standings,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            tracing::info!(path = %out.display(), students = standings.len(), "report written");
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
