//! Attendance percentage, standing classification and roster reporting.

pub mod attendance;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
pub mod standing;
