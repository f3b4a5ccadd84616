//! Housing application API handlers.
//!
//! ```text
//! POST /api/v1/applications                   {"roomId":"3fa85f64-..."}
//! POST /api/v1/applications/{id}/approval
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ApplicationId, ApprovalOutcome, Error, RoomId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Application request body for `POST /api/v1/applications`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    #[schema(value_type = String, format = "uuid")]
    pub room_id: RoomId,
}

/// Identifier of a freshly submitted application.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ApplicationId,
}

/// Submit a housing application for a specific room.
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = SubmitApplicationRequest,
    responses(
        (status = 201, description = "Application recorded", body = SubmittedResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "submitApplication"
)]
#[post("/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let id = state
        .allocation
        .submit_application(&ctx, payload.room_id)
        .await?;
    Ok(HttpResponse::Created().json(SubmittedResponse { id }))
}

/// Approve an application, allocating a room when one has spare capacity.
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/approval",
    params(("application_id" = Uuid, Path, description = "Application to approve")),
    responses(
        (status = 200, description = "Approval outcome", body = ApprovalOutcome),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Application not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "approveApplication"
)]
#[post("/applications/{application_id}/approval")]
pub async fn approve_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ApprovalOutcome>> {
    let ctx = session.require_context()?;
    let application_id = ApplicationId::from_uuid(path.into_inner());
    let outcome = state
        .allocation
        .approve_application(&ctx, application_id)
        .await?;
    Ok(web::Json(outcome))
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
