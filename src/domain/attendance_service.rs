//! Attendance recording performed by wardens.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::attendance::NewAttendanceRecord;
use super::context::RequestContext;
use super::error::Error;
use super::ports::{AttendanceCommand, AttendanceRepository, PersistenceError};
use super::user::Role;

fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("attendance store unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            Error::internal(format!("attendance store error: {message}"))
        }
        PersistenceError::Conflict { message } => Error::conflict(message),
    }
}

/// Attendance service implementing the [`AttendanceCommand`] driving port.
#[derive(Clone)]
pub struct AttendanceService {
    attendance: Arc<dyn AttendanceRepository>,
}

impl AttendanceService {
    /// Create a new service over the attendance log.
    pub fn new(attendance: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendance }
    }
}

#[async_trait]
impl AttendanceCommand for AttendanceService {
    async fn mark_attendance(
        &self,
        ctx: &RequestContext,
        record: NewAttendanceRecord,
    ) -> Result<(), Error> {
        ctx.require_role(Role::Warden)?;

        // The log always attributes the entry to the calling warden,
        // whatever the request body claimed.
        let record = NewAttendanceRecord {
            warden_id: *ctx.user_id(),
            ..record
        };

        self.attendance
            .append(&record)
            .await
            .map_err(map_persistence_error)?;

        info!(
            student_id = %record.student_id,
            warden_id = %record.warden_id,
            date = %record.date,
            status = %record.status,
            "attendance recorded"
        );
        Ok(())
    }
}
