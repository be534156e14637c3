use std::fmt::Write;

use chrono::NaiveDate;

use crate::attendance::{AttendancePolicy, Status};
use crate::models::StudentStanding;
use crate::standing;

pub fn build_report(
    course: Option<&str>,
    generated_on: NaiveDate,
    policy: &AttendancePolicy,
    standings: &[StudentStanding],
) -> String {
    let summaries = standing::summarize_by_status(standings);

    let mut output = String::new();
    let course_label = course.unwrap_or("all courses");

    let _ = writeln!(output, "# Attendance Standing Report");
    let _ = writeln!(
        output,
        "Generated for {} on {} (threshold {:.0}%, projected over {} classes)",
        course_label,
        generated_on.format("%B %-d, %Y"),
        policy.threshold,
        policy.future_classes
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No students on this roster.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} {} (avg {:.2}%)",
                summary.status,
                summary.count,
                if summary.count == 1 { "student" } else { "students" },
                summary.avg_percentage
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students Needing Attention");

    let mut flagged = standing::at_risk(standings).peekable();
    if flagged.peek().is_none() {
        let _ = writeln!(output, "Every student is in good standing.");
    } else {
        for standing in flagged {
            let student = &standing.student;
            let evaluation = &standing.evaluation;
            let _ = write!(
                output,
                "- {} ({}, {}) {:.2}% [{}] ",
                student.full_name,
                student.email,
                student.course,
                evaluation.percentage,
                evaluation.status,
            );
            if evaluation.reachable {
                let _ = writeln!(
                    output,
                    "needs {} of the next {} classes",
                    evaluation.required, policy.future_classes
                );
            } else {
                let _ = writeln!(
                    output,
                    "needs {} more classes (unreachable in the next {})",
                    evaluation.required, policy.future_classes
                );
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Good Standing");

    let mut good: Vec<&StudentStanding> = standings
        .iter()
        .filter(|s| s.evaluation.status == Status::Success)
        .collect();
    good.sort_by(|a, b| a.student.full_name.cmp(&b.student.full_name));

    if good.is_empty() {
        let _ = writeln!(output, "No students currently meet the threshold.");
    } else {
        for standing in good {
            let _ = writeln!(
                output,
                "- {} ({}) {:.2}%",
                standing.student.full_name, standing.student.course, standing.evaluation.percentage
            );
        }
    }

    output
}
