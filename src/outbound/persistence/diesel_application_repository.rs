//! PostgreSQL-backed `ApplicationRepository` implementation.
//!
//! Approval is the one multi-table write in the system. It runs as a single
//! transaction and reserves occupancy with a conditional increment, so two
//! principals approving into the last place in a room cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::info;

use crate::domain::allocation::select_room;
use crate::domain::application::{ApplicationId, ApplicationStatus, NewApplication};
use crate::domain::hostel::{Room, RoomId};
use crate::domain::ports::{ApplicationRepository, ApprovalDecision, PersistenceError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_hostel_repository::row_to_room;
use super::models::{ApplicationRow, NewApplicationRow, RoomRow};
use super::pool::DbPool;
use super::schema::{applications, hostels, rooms, users};

/// Diesel-backed implementation of the `ApplicationRepository` port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Load the hostel's rooms in ascending ordinal so the fallback scan fills
/// "R1" before "R2". Rooms of a hostel are inserted in one batch and share
/// a `created_at`, so the ordinal is the only reliable ordering.
async fn hostel_rooms(
    conn: &mut AsyncPgConnection,
    hostel_id: uuid::Uuid,
) -> Result<Vec<Room>, PersistenceError> {
    let rows: Vec<RoomRow> = rooms::table
        .filter(rooms::hostel_id.eq(hostel_id))
        .order((rooms::ordinal.asc(), rooms::id.asc()))
        .select(RoomRow::as_select())
        .load(conn)
        .await?;

    rows.into_iter().map(row_to_room).collect()
}

/// Try to reserve one place in the room. The `occupied < capacity` guard in
/// the update predicate makes the reservation atomic; a zero row count means
/// a concurrent approval took the last place first.
async fn reserve_place(
    conn: &mut AsyncPgConnection,
    room_id: &RoomId,
) -> Result<bool, PersistenceError> {
    let updated = diesel::update(
        rooms::table
            .filter(rooms::id.eq(room_id.as_uuid()))
            .filter(rooms::occupied.lt(rooms::capacity)),
    )
    .set(rooms::occupied.eq(rooms::occupied + 1))
    .execute(conn)
    .await?;

    Ok(updated > 0)
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewApplicationRow {
            id: *application.id.as_uuid(),
            student_id: *application.student_id.as_uuid(),
            hostel_id: *application.hostel_id.as_uuid(),
            room_id: Some(*application.room_id.as_uuid()),
            status: ApplicationStatus::Pending.as_str(),
        };

        diesel::insert_into(applications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn approve(&self, id: &ApplicationId) -> Result<ApprovalDecision, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let application_id = *id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let row: Option<ApplicationRow> = applications::table
                    .filter(applications::id.eq(application_id))
                    .select(ApplicationRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;

                let Some(row) = row else {
                    return Ok(ApprovalDecision::NotFound);
                };
                if row.status == ApplicationStatus::Approved.as_str() {
                    return Ok(ApprovalDecision::AlreadyApproved);
                }

                let candidates = hostel_rooms(conn, row.hostel_id).await?;
                let requested = row.room_id.map(RoomId::from_uuid);
                let mut allocated_room = None;

                if let Some(room_id) = select_room(requested.as_ref(), &candidates)
                    && reserve_place(conn, &room_id).await?
                {
                    diesel::update(users::table.filter(users::id.eq(row.student_id)))
                        .set(users::room_id.eq(room_id.as_uuid()))
                        .execute(conn)
                        .await?;

                    // Raised room capacities can admit more students than
                    // `total_rooms`; the guard keeps the counter at zero
                    // instead of going negative.
                    diesel::update(
                        hostels::table
                            .filter(hostels::id.eq(row.hostel_id))
                            .filter(hostels::available_rooms.gt(0)),
                    )
                    .set(hostels::available_rooms.eq(hostels::available_rooms - 1))
                    .execute(conn)
                    .await?;

                    allocated_room = Some(room_id);
                }

                // The application is approved whether or not a place was
                // found; a full hostel is not an error.
                diesel::update(applications::table.filter(applications::id.eq(application_id)))
                    .set(applications::status.eq(ApplicationStatus::Approved.as_str()))
                    .execute(conn)
                    .await?;

                info!(
                    application_id = %application_id,
                    allocated = allocated_room.is_some(),
                    "application approved"
                );

                Ok(ApprovalDecision::Approved { allocated_room })
            }
            .scope_boxed()
        })
        .await
    }
}
