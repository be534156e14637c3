use serde::Serialize;

use crate::error::AttendanceError;
use crate::models::AttendanceRecord;

/// Minimum attendance percentage considered good standing.
pub const DEFAULT_THRESHOLD: f64 = 75.0;
/// Width of the band below the threshold that still counts as a warning.
pub const DEFAULT_WARNING_BAND: f64 = 10.0;
/// Number of upcoming sessions used when projecting required attendance.
pub const DEFAULT_FUTURE_CLASSES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Danger,
    Warning,
    Success,
}

impl Status {
    /// Single home of the threshold comparison.
    pub fn classify(percentage: f64, threshold: f64, warning_band: f64) -> Self {
        if percentage >= threshold {
            Status::Success
        } else if percentage >= threshold - warning_band {
            Status::Warning
        } else {
            Status::Danger
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Status::Success => "Good standing: attendance meets the requirement.",
            Status::Warning => "Attendance is close to the minimum requirement.",
            Status::Danger => "Attendance is below the required level.",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of sessions attended, rounded to two decimals. Zero when no
/// sessions have been held.
pub fn compute_percentage(attended: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = attended as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Tier for `percentage` using the default warning band.
pub fn classify_status(percentage: f64, threshold: f64) -> Status {
    Status::classify(percentage, threshold, DEFAULT_WARNING_BAND)
}

/// Fixed message for the tier `classify_status` would pick.
pub fn status_message(percentage: f64, threshold: f64) -> &'static str {
    classify_status(percentage, threshold).message()
}

/// Classes still needed over the next `future_classes` sessions to bring
/// overall attendance up to the default threshold.
pub fn required_attendance(attended: u32, total: u32, future_classes: u32) -> u64 {
    required_attendance_for(attended, total, future_classes, DEFAULT_THRESHOLD)
}

pub fn required_attendance_for(
    attended: u32,
    total: u32,
    future_classes: u32,
    threshold: f64,
) -> u64 {
    let target_total = total as u64 + future_classes as u64;
    // Multiply before dividing so whole-number thresholds stay exact.
    let required_attended = (threshold * target_total as f64 / 100.0).ceil() as i64;
    // Widened: total plus future classes can exceed u32::MAX.
    (required_attended - attended as i64).max(0) as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub percentage: f64,
    pub status: Status,
    pub required: u64,
    pub reachable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    pub threshold: f64,
    pub warning_band: f64,
    pub future_classes: u32,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            warning_band: DEFAULT_WARNING_BAND,
            future_classes: DEFAULT_FUTURE_CLASSES,
        }
    }
}

impl AttendancePolicy {
    pub fn validate(self) -> Result<Self, AttendanceError> {
        if !self.threshold.is_finite() || !(0.0..=100.0).contains(&self.threshold) {
            return Err(AttendanceError::InvalidArgument(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        if !self.warning_band.is_finite() || self.warning_band < 0.0 {
            return Err(AttendanceError::InvalidArgument(format!(
                "warning band must be a non-negative number, got {}",
                self.warning_band
            )));
        }
        Ok(self)
    }

    pub fn status_for(&self, percentage: f64) -> Status {
        Status::classify(percentage, self.threshold, self.warning_band)
    }

    pub fn evaluate(&self, record: &AttendanceRecord) -> Evaluation {
        let percentage = compute_percentage(record.attended, record.total);
        let required = required_attendance_for(
            record.attended,
            record.total,
            self.future_classes,
            self.threshold,
        );
        Evaluation {
            percentage,
            status: self.status_for(percentage),
            required,
            reachable: required <= u64::from(self.future_classes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_zero_without_sessions() {
        assert_eq!(compute_percentage(0, 0), 0.0);
        assert_eq!(compute_percentage(5, 0), 0.0);
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(compute_percentage(75, 100), 75.0);
        assert_eq!(compute_percentage(1, 3), 33.33);
        assert_eq!(compute_percentage(2, 3), 66.67);
        assert_eq!(compute_percentage(3, 3), 100.0);
    }

    #[test]
    fn percentage_stays_in_range_and_never_drops() {
        for total in 1..=40u32 {
            let mut previous = 0.0;
            for attended in 0..=total {
                let value = compute_percentage(attended, total);
                assert!((0.0..=100.0).contains(&value), "{attended}/{total} -> {value}");
                assert!(value >= previous, "{attended}/{total} dropped below {previous}");
                previous = value;
            }
        }
    }

    #[test]
    fn status_follows_threshold_tiers() {
        assert_eq!(classify_status(75.0, DEFAULT_THRESHOLD), Status::Success);
        assert_eq!(classify_status(100.0, DEFAULT_THRESHOLD), Status::Success);
        assert_eq!(classify_status(70.0, DEFAULT_THRESHOLD), Status::Warning);
        assert_eq!(classify_status(65.0, DEFAULT_THRESHOLD), Status::Warning);
        assert_eq!(classify_status(64.0, DEFAULT_THRESHOLD), Status::Danger);
        assert_eq!(classify_status(0.0, DEFAULT_THRESHOLD), Status::Danger);
    }

    #[test]
    fn message_matches_classification() {
        for percentage in [0.0, 64.99, 65.0, 74.99, 75.0, 90.0] {
            let status = classify_status(percentage, DEFAULT_THRESHOLD);
            assert_eq!(status_message(percentage, DEFAULT_THRESHOLD), status.message());
        }
        assert_ne!(Status::Success.message(), Status::Warning.message());
        assert_ne!(Status::Warning.message(), Status::Danger.message());
    }

    #[test]
    fn custom_threshold_moves_the_tiers() {
        assert_eq!(classify_status(80.0, 90.0), Status::Warning);
        assert_eq!(classify_status(79.0, 90.0), Status::Danger);
    }

    #[test]
    fn required_attendance_projects_over_future_classes() {
        assert_eq!(required_attendance(50, 100, 10), 33);
        assert_eq!(required_attendance(100, 100, 10), 0);
        assert_eq!(required_attendance(0, 0, 10), 8);
        assert_eq!(required_attendance(0, 0, 0), 0);
    }

    #[test]
    fn required_attendance_is_exact_for_whole_thresholds() {
        assert_eq!(required_attendance_for(0, 0, 10, 70.0), 7);
        assert_eq!(required_attendance_for(0, 90, 10, 60.0), 60);
    }

    #[test]
    fn required_attendance_does_not_wrap_at_u32_max() {
        assert_eq!(required_attendance(0, u32::MAX, u32::MAX), 6_442_450_943);
        assert_eq!(
            required_attendance_for(0, u32::MAX, 10, 100.0),
            u32::MAX as u64 + 10
        );

        let policy = AttendancePolicy {
            threshold: 100.0,
            ..AttendancePolicy::default()
        };
        let record = AttendanceRecord::new(0, u32::MAX).unwrap();
        let evaluation = policy.evaluate(&record);
        assert_eq!(evaluation.required, u32::MAX as u64 + 10);
        assert!(!evaluation.reachable);

        let policy = AttendancePolicy {
            future_classes: u32::MAX,
            ..AttendancePolicy::default()
        };
        assert!(!policy.evaluate(&record).reachable);
    }

    #[test]
    fn narrower_warning_band_shrinks_the_warning_tier() {
        let policy = AttendancePolicy {
            warning_band: 5.0,
            ..AttendancePolicy::default()
        };
        assert_eq!(policy.status_for(69.99), Status::Danger);
        assert_eq!(policy.status_for(70.0), Status::Warning);
        assert_eq!(policy.status_for(74.99), Status::Warning);
        assert_eq!(policy.status_for(75.0), Status::Success);
    }

    #[test]
    fn zero_warning_band_has_no_warning_tier() {
        let policy = AttendancePolicy {
            warning_band: 0.0,
            ..AttendancePolicy::default()
        };
        assert_eq!(policy.status_for(74.99), Status::Danger);
        assert_eq!(policy.status_for(75.0), Status::Success);
        for tenths in 0..=1000 {
            assert_ne!(policy.status_for(tenths as f64 / 10.0), Status::Warning);
        }
    }

    #[test]
    fn policy_evaluation_flags_unreachable_targets() {
        let policy = AttendancePolicy::default();
        let record = AttendanceRecord::new(10, 40).unwrap();
        let evaluation = policy.evaluate(&record);
        assert_eq!(evaluation.percentage, 25.0);
        assert_eq!(evaluation.status, Status::Danger);
        assert_eq!(evaluation.required, 28);
        assert!(!evaluation.reachable);

        let record = AttendanceRecord::new(30, 40).unwrap();
        let evaluation = policy.evaluate(&record);
        assert_eq!(evaluation.status, Status::Success);
        assert_eq!(evaluation.required, 8);
        assert!(evaluation.reachable);
    }

    #[test]
    fn policy_rejects_out_of_range_settings() {
        let bad_threshold = AttendancePolicy {
            threshold: 120.0,
            ..AttendancePolicy::default()
        };
        assert!(matches!(
            bad_threshold.validate(),
            Err(AttendanceError::InvalidArgument(_))
        ));

        let bad_band = AttendancePolicy {
            warning_band: -1.0,
            ..AttendancePolicy::default()
        };
        assert!(bad_band.validate().is_err());

        for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let policy = AttendancePolicy {
                threshold,
                ..AttendancePolicy::default()
            };
            assert!(matches!(
                policy.validate(),
                Err(AttendanceError::InvalidArgument(_))
            ));
        }
        let infinite_band = AttendancePolicy {
            warning_band: f64::INFINITY,
            ..AttendancePolicy::default()
        };
        assert!(infinite_band.validate().is_err());
        assert!(AttendancePolicy::default().validate().is_ok());
    }
}
