use serde::Serialize;
use uuid::Uuid;

use crate::attendance::{Evaluation, Status};
use crate::error::AttendanceError;

/// Attended and held session counts for one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub attended: u32,
    pub total: u32,
}

impl AttendanceRecord {
    pub fn new(attended: u32, total: u32) -> Result<Self, AttendanceError> {
        if attended > total {
            return Err(AttendanceError::InvalidArgument(format!(
                "attended ({attended}) exceeds total sessions ({total})"
            )));
        }
        Ok(Self { attended, total })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAttendance {
    pub student_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub course: String,
    pub record: AttendanceRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentStanding {
    pub student: StudentAttendance,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub status: Status,
    pub count: usize,
    pub avg_percentage: f64,
}
