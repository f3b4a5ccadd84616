//! Registration and session API handlers.
//!
//! ```text
//! POST   /api/v1/users                 {"username":"ravi","role":"student","college":"MNR College"}
//! POST   /api/v1/users/{id}/approval
//! DELETE /api/v1/users/{id}
//! POST   /api/v1/session               {"userId":"3fa85f64-..."}
//! DELETE /api/v1/session
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::user::UserValidationError;
use crate::domain::{College, Error, Role, UserId, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/users`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    pub college: String,
}

/// Identifier of a freshly registered account.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
}

fn map_user_validation_error(field: &'static str, err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

impl TryFrom<RegisterRequest> for RegisterUserRequest {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: Username::new(value.username)
                .map_err(|err| map_user_validation_error("username", err))?,
            email: value.email,
            phone: value.phone,
            role: value
                .role
                .parse::<Role>()
                .map_err(|err| map_user_validation_error("role", err))?,
            college: College::new(value.college)
                .map_err(|err| map_user_validation_error("college", err))?,
        })
    }
}

/// Register a new account awaiting approval.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration recorded", body = RegisteredResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username, email, or phone already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegisterUserRequest::try_from(payload.into_inner())?;
    let id = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(RegisteredResponse { id }))
}

/// Approve a pending registration.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/approval",
    params(("user_id" = Uuid, Path, description = "Account awaiting approval")),
    responses(
        (status = 204, description = "Account approved"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "approveUser"
)]
#[post("/users/{user_id}/approval")]
pub async fn approve_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let user_id = UserId::from_uuid(path.into_inner());
    state.registration.approve_user(&ctx, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Reject (delete) a pending registration.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "Account awaiting approval")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 400, description = "Account already approved", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "rejectUser"
)]
#[delete("/users/{user_id}")]
pub async fn reject_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let user_id = UserId::from_uuid(path.into_inner());
    state.registration.reject_user(&ctx, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Login request body for `POST /api/v1/session`.
///
/// Credential verification happens upstream of this service; the request
/// carries only the already-authenticated user id.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
}

/// Identity snapshot echoed back after login.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub college: String,
}

/// Establish a session for an approved account.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session established", body = SessionResponse,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Account is not approved", body = Error),
        (status = 404, description = "Unknown account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createSession",
    security([])
)]
#[post("/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SessionRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let identity = state.identity.establish(payload.user_id).await?;
    session.persist_identity(&identity)?;
    Ok(web::Json(SessionResponse {
        user_id: identity.user_id,
        username: identity.username.to_string(),
        role: identity.role,
        college: identity.college.to_string(),
    }))
}

/// Clear the session.
#[utoipa::path(
    delete,
    path = "/api/v1/session",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "deleteSession",
    security([])
)]
#[delete("/session")]
pub async fn delete_session(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
