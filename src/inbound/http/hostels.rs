//! Hostel provisioning API handlers.
//!
//! ```text
//! POST /api/v1/hostels                                  {"name":"North Block","totalRooms":10}
//! PUT  /api/v1/rooms/{room_id}                          {"capacity":2,"facilities":"fan"}
//! POST /api/v1/hostels/{hostel_id}/rooms/{room_id}/photos  {"filename":"r1.jpg"}
//! ```

use actix_web::{HttpResponse, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::hostel::RoomDetailsUpdate;
use crate::domain::ports::{CreateHostelRequest, RecordRoomPhotoRequest};
use crate::domain::{Error, HostelId, RoomId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Hostel creation request body for `POST /api/v1/hostels`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostelBody {
    pub name: String,
    pub total_rooms: u32,
}

/// Identifier of a freshly provisioned hostel.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedHostelResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: HostelId,
}

/// Create a hostel with its generated room inventory.
#[utoipa::path(
    post,
    path = "/api/v1/hostels",
    request_body = CreateHostelBody,
    responses(
        (status = 201, description = "Hostel provisioned", body = CreatedHostelResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["hostels"],
    operation_id = "createHostel"
)]
#[post("/hostels")]
pub async fn create_hostel(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateHostelBody>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let body = payload.into_inner();
    let id = state
        .provisioning
        .create_hostel(
            &ctx,
            CreateHostelRequest {
                name: body.name,
                total_rooms: body.total_rooms,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(CreatedHostelResponse { id }))
}

/// Room edit request body for `PUT /api/v1/rooms/{room_id}`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomBody {
    pub capacity: i32,
    #[serde(default)]
    pub facilities: Option<String>,
    #[serde(default)]
    pub damage: Option<String>,
}

/// Update warden-editable room attributes.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{room_id}",
    params(("room_id" = Uuid, Path, description = "Room to update")),
    request_body = UpdateRoomBody,
    responses(
        (status = 204, description = "Room updated"),
        (status = 400, description = "Capacity below current occupancy", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["hostels"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{room_id}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateRoomBody>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let room_id = RoomId::from_uuid(path.into_inner());
    let body = payload.into_inner();
    state
        .provisioning
        .update_room(
            &ctx,
            room_id,
            RoomDetailsUpdate {
                capacity: body.capacity,
                facilities: body.facilities,
                damage: body.damage,
            },
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Photo metadata body for the room photo endpoint.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomPhotoBody {
    pub filename: String,
}

/// Record uploaded photo metadata for a room in one of the caller's hostels.
#[utoipa::path(
    post,
    path = "/api/v1/hostels/{hostel_id}/rooms/{room_id}/photos",
    params(
        ("hostel_id" = Uuid, Path, description = "Hostel owning the room"),
        ("room_id" = Uuid, Path, description = "Room shown in the photo")
    ),
    request_body = RoomPhotoBody,
    responses(
        (status = 201, description = "Photo metadata recorded"),
        (status = 400, description = "Room is not in one of the caller's hostels", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["hostels"],
    operation_id = "recordRoomPhoto"
)]
#[post("/hostels/{hostel_id}/rooms/{room_id}/photos")]
pub async fn record_room_photo(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<RoomPhotoBody>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let (hostel_id, room_id) = path.into_inner();
    state
        .provisioning
        .record_room_photo(
            &ctx,
            RecordRoomPhotoRequest {
                hostel_id: HostelId::from_uuid(hostel_id),
                room_id: RoomId::from_uuid(room_id),
                filename: payload.into_inner().filename,
            },
        )
        .await?;
    Ok(HttpResponse::Created().finish())
}

#[cfg(test)]
#[path = "hostels_tests.rs"]
mod tests;
