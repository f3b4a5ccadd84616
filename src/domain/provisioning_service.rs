//! Hostel and room provisioning performed by wardens.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::context::RequestContext;
use super::error::Error;
use super::hostel::{
    HostelId, NewHostel, NewRoom, NewRoomPhoto, RoomDetailsUpdate, RoomId, room_numbers,
};
use super::ports::{
    CreateHostelRequest, HostelRepository, PersistenceError, ProvisioningCommand,
    RecordRoomPhotoRequest,
};
use super::user::Role;

/// Capacity assigned to generated rooms until the warden edits them.
const DEFAULT_ROOM_CAPACITY: i32 = 1;

/// Upper bound on rooms per hostel; also keeps the generated room set small
/// enough to insert in one statement.
const MAX_ROOMS_PER_HOSTEL: i32 = 1_000;

fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("hostel store unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            Error::internal(format!("hostel store error: {message}"))
        }
        PersistenceError::Conflict { message } => Error::conflict(message),
    }
}

/// Provisioning service implementing the [`ProvisioningCommand`] driving port.
#[derive(Clone)]
pub struct ProvisioningService {
    hostels: Arc<dyn HostelRepository>,
}

impl ProvisioningService {
    /// Create a new service over the hostel store.
    pub fn new(hostels: Arc<dyn HostelRepository>) -> Self {
        Self { hostels }
    }
}

#[async_trait]
impl ProvisioningCommand for ProvisioningService {
    async fn create_hostel(
        &self,
        ctx: &RequestContext,
        request: CreateHostelRequest,
    ) -> Result<HostelId, Error> {
        ctx.require_role(Role::Warden)?;

        if request.name.trim().is_empty() {
            return Err(Error::invalid_request("hostel name must not be empty"));
        }
        let total_rooms = i32::try_from(request.total_rooms)
            .map_err(|_| Error::invalid_request("room count is out of range"))?;
        if total_rooms == 0 {
            return Err(Error::invalid_request(
                "a hostel must have at least one room",
            ));
        }
        if total_rooms > MAX_ROOMS_PER_HOSTEL {
            return Err(Error::invalid_request(format!(
                "a hostel cannot have more than {MAX_ROOMS_PER_HOSTEL} rooms"
            )));
        }

        let hostel = NewHostel {
            id: HostelId::random(),
            name: request.name,
            college: ctx.college().clone(),
            warden_id: *ctx.user_id(),
            total_rooms,
        };
        let rooms: Vec<NewRoom> = room_numbers(request.total_rooms)
            .into_iter()
            .zip(1..)
            .map(|(room_number, ordinal)| NewRoom {
                id: RoomId::random(),
                hostel_id: hostel.id,
                room_number,
                ordinal,
                capacity: DEFAULT_ROOM_CAPACITY,
            })
            .collect();

        self.hostels
            .create_hostel(&hostel, &rooms)
            .await
            .map_err(map_persistence_error)?;

        info!(
            hostel_id = %hostel.id,
            warden_id = %ctx.user_id(),
            total_rooms = request.total_rooms,
            "hostel provisioned"
        );
        Ok(hostel.id)
    }

    async fn update_room(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        update: RoomDetailsUpdate,
    ) -> Result<(), Error> {
        ctx.require_role(Role::Warden)?;

        if update.capacity < 1 {
            return Err(Error::invalid_request("room capacity must be at least 1"));
        }

        let updated = self
            .hostels
            .update_room_details(&room_id, &update)
            .await
            .map_err(map_persistence_error)?;
        if updated {
            return Ok(());
        }

        // The conditional update refuses both missing rooms and capacity
        // reductions below current occupancy; tell those apart here.
        match self
            .hostels
            .find_room(&room_id)
            .await
            .map_err(map_persistence_error)?
        {
            None => Err(Error::not_found(format!("room {room_id} not found"))),
            Some(room) => Err(Error::invalid_request(format!(
                "capacity {} is below current occupancy {}",
                update.capacity,
                room.occupied()
            ))),
        }
    }

    async fn record_room_photo(
        &self,
        ctx: &RequestContext,
        request: RecordRoomPhotoRequest,
    ) -> Result<(), Error> {
        ctx.require_role(Role::Warden)?;

        if request.filename.trim().is_empty() {
            return Err(Error::invalid_request("photo filename must not be empty"));
        }

        self.hostels
            .find_warden_room(
                &request.room_id,
                &request.hostel_id,
                ctx.user_id(),
                ctx.college(),
            )
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| {
                Error::invalid_request("room does not belong to one of your hostels")
            })?;

        self.hostels
            .record_photo(&NewRoomPhoto {
                hostel_id: request.hostel_id,
                room_id: request.room_id,
                warden_id: *ctx.user_id(),
                filename: request.filename,
            })
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "provisioning_service_tests.rs"]
mod tests;
