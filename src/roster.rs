use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use uuid::Uuid;

use crate::models::{AttendanceRecord, StudentAttendance};

pub fn load_csv(csv_path: &Path) -> anyhow::Result<Vec<StudentAttendance>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        email: String,
        course: String,
        attended: u32,
        total: u32,
        student_id: Option<Uuid>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open roster {}", csv_path.display()))?;
    let mut students = Vec::new();
    let mut seen_emails = HashSet::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = result.with_context(|| format!("malformed roster row on line {line}"))?;
        let record = AttendanceRecord::new(row.attended, row.total)
            .with_context(|| format!("invalid attendance for {} on line {line}", row.email))?;

        let email = row.email.trim().to_lowercase();
        if !seen_emails.insert(email.clone()) {
            bail!("duplicate student {email} on line {line}");
        }

        students.push(StudentAttendance {
            student_id: row.student_id.unwrap_or_else(Uuid::new_v4),
            full_name: row.full_name.trim().to_string(),
            email,
            course: row.course.trim().to_string(),
            record,
        });
    }

    tracing::info!(
        path = %csv_path.display(),
        students = students.len(),
        "roster loaded"
    );
    Ok(students)
}

pub fn filter_course(students: Vec<StudentAttendance>, course: Option<&str>) -> Vec<StudentAttendance> {
    match course {
        Some(course) => students
            .into_iter()
            .filter(|student| student.course.eq_ignore_ascii_case(course))
            .collect(),
        None => students,
    }
}
