use std::collections::BTreeMap;

use crate::attendance::{AttendancePolicy, Status};
use crate::models::{StatusSummary, StudentAttendance, StudentStanding};

/// Evaluates every student and orders the result by urgency: lowest
/// percentage first, ties by name.
pub fn evaluate_roster(
    students: &[StudentAttendance],
    policy: &AttendancePolicy,
) -> Vec<StudentStanding> {
    let mut standings: Vec<StudentStanding> = students
        .iter()
        .map(|student| {
            let evaluation = policy.evaluate(&student.record);
            tracing::debug!(
                email = %student.email,
                percentage = evaluation.percentage,
                status = %evaluation.status,
                "evaluated student"
            );
            if !evaluation.reachable {
                tracing::warn!(
                    email = %student.email,
                    required = evaluation.required,
                    future_classes = policy.future_classes,
                    "threshold unreachable within the projection window"
                );
            }
            StudentStanding {
                student: student.clone(),
                evaluation,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        a.evaluation
            .percentage
            .partial_cmp(&b.evaluation.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.student.full_name.cmp(&b.student.full_name))
    });
    standings
}

pub fn summarize_by_status(standings: &[StudentStanding]) -> Vec<StatusSummary> {
    let mut map: BTreeMap<Status, (usize, f64)> = BTreeMap::new();

    for standing in standings {
        let entry = map.entry(standing.evaluation.status).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += standing.evaluation.percentage;
    }

    map.into_iter()
        .map(|(status, (count, total_percentage))| StatusSummary {
            status,
            count,
            avg_percentage: total_percentage / count as f64,
        })
        .collect()
}

pub fn at_risk(standings: &[StudentStanding]) -> impl Iterator<Item = &StudentStanding> {
    standings
        .iter()
        .filter(|standing| standing.evaluation.status != Status::Success)
}
