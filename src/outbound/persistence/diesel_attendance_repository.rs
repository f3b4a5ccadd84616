//! PostgreSQL-backed `AttendanceRepository` implementation.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::attendance::NewAttendanceRecord;
use crate::domain::ports::{AttendanceRepository, PersistenceError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewAttendanceRow;
use super::pool::DbPool;
use super::schema::attendance;

/// Diesel-backed implementation of the `AttendanceRepository` port.
///
/// The log is append-only; rows are never updated or deleted, and repeated
/// entries for the same student and date are stored as written.
#[derive(Clone)]
pub struct DieselAttendanceRepository {
    pool: DbPool,
}

impl DieselAttendanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for DieselAttendanceRepository {
    async fn append(&self, record: &NewAttendanceRecord) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAttendanceRow {
            id: uuid::Uuid::new_v4(),
            student_id: *record.student_id.as_uuid(),
            warden_id: *record.warden_id.as_uuid(),
            date: record.date,
            status: record.status.as_str(),
        };

        diesel::insert_into(attendance::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
