//! PostgreSQL-backed `HostelRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::hostel::{
    HostelId, NewHostel, NewRoom, NewRoomPhoto, Room, RoomDetailsUpdate, RoomId, RoomNumber,
};
use crate::domain::ports::{HostelRepository, PersistenceError};
use crate::domain::user::{College, UserId};

use super::diesel_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewHostelRow, NewRoomPhotoRow, NewRoomRow, RoomDetailsChangeset, RoomRow};
use super::pool::DbPool;
use super::schema::{hostels, room_photos, rooms};

/// Diesel-backed implementation of the `HostelRepository` port.
#[derive(Clone)]
pub struct DieselHostelRepository {
    pool: DbPool,
}

impl DieselHostelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain room from its row.
pub(crate) fn row_to_room(row: RoomRow) -> Result<Room, PersistenceError> {
    let room_number =
        RoomNumber::new(row.room_number).map_err(|err| corrupt_row("room_number", err))?;

    Room::new(
        RoomId::from_uuid(row.id),
        HostelId::from_uuid(row.hostel_id),
        room_number,
        row.capacity,
        row.occupied,
        row.facilities,
        row.damage,
    )
    .map_err(|err| corrupt_row("occupancy", err))
}

#[async_trait]
impl HostelRepository for DieselHostelRepository {
    async fn create_hostel(
        &self,
        hostel: &NewHostel,
        new_rooms: &[NewRoom],
    ) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let hostel_row = NewHostelRow {
            id: *hostel.id.as_uuid(),
            name: hostel.name.as_str(),
            college: hostel.college.as_ref(),
            warden_id: *hostel.warden_id.as_uuid(),
            total_rooms: hostel.total_rooms,
            available_rooms: hostel.total_rooms,
        };
        let room_rows: Vec<NewRoomRow<'_>> = new_rooms
            .iter()
            .map(|room| NewRoomRow {
                id: *room.id.as_uuid(),
                hostel_id: *room.hostel_id.as_uuid(),
                room_number: room.room_number.as_ref(),
                ordinal: room.ordinal,
                capacity: room.capacity,
                occupied: 0,
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(hostels::table)
                    .values(&hostel_row)
                    .execute(conn)
                    .await?;

                diesel::insert_into(rooms::table)
                    .values(&room_rows)
                    .execute(conn)
                    .await?;

                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_room(&self, id: &RoomId) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RoomRow> = rooms::table
            .filter(rooms::id.eq(id.as_uuid()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_room).transpose()
    }

    async fn update_room_details(
        &self,
        id: &RoomId,
        update: &RoomDetailsUpdate,
    ) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = RoomDetailsChangeset {
            capacity: update.capacity,
            facilities: update.facilities.as_deref(),
            damage: update.damage.as_deref(),
        };

        // Refusing capacity below current occupancy in the same statement
        // keeps the occupancy invariant safe under concurrent approvals.
        let updated = diesel::update(
            rooms::table
                .filter(rooms::id.eq(id.as_uuid()))
                .filter(rooms::occupied.le(update.capacity)),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn find_warden_room(
        &self,
        room_id: &RoomId,
        hostel_id: &HostelId,
        warden_id: &UserId,
        college: &College,
    ) -> Result<Option<Room>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RoomRow> = rooms::table
            .inner_join(hostels::table)
            .filter(rooms::id.eq(room_id.as_uuid()))
            .filter(rooms::hostel_id.eq(hostel_id.as_uuid()))
            .filter(hostels::warden_id.eq(warden_id.as_uuid()))
            .filter(hostels::college.eq(college.as_ref()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_room).transpose()
    }

    async fn record_photo(&self, photo: &NewRoomPhoto) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRoomPhotoRow {
            id: uuid::Uuid::new_v4(),
            hostel_id: *photo.hostel_id.as_uuid(),
            room_id: *photo.room_id.as_uuid(),
            warden_id: *photo.warden_id.as_uuid(),
            filename: photo.filename.as_str(),
        };

        diesel::insert_into(room_photos::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn row(capacity: i32, occupied: i32) -> RoomRow {
        RoomRow {
            id: Uuid::new_v4(),
            hostel_id: Uuid::new_v4(),
            room_number: "R1".to_owned(),
            capacity,
            occupied,
            facilities: Some("desk, fan".to_owned()),
            damage: None,
        }
    }

    #[rstest]
    fn rebuilds_a_domain_room_from_its_row() {
        let room = row_to_room(row(2, 1)).expect("valid row");
        assert_eq!(room.capacity(), 2);
        assert_eq!(room.occupied(), 1);
        assert_eq!(room.facilities(), Some("desk, fan"));
    }

    #[rstest]
    fn refuses_a_row_with_occupancy_above_capacity() {
        let err = row_to_room(row(1, 2)).expect_err("overbooked row refused");
        assert!(matches!(err, PersistenceError::Query { .. }));
    }
}
