//! Attendance records kept by wardens.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Validation errors for attendance values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttendanceValidationError {
    #[error("unknown attendance status: {value}")]
    UnknownStatus { value: String },
}

/// Attendance state for a student on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Stable wire/storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = AttendanceValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(AttendanceValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Append-only attendance record. Multiple records for the same
/// (student, date) pair are permitted; the log keeps whatever the warden
/// entered, newest rows last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceRecord {
    pub student_id: UserId,
    pub warden_id: UserId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
