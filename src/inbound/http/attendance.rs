//! Attendance API handlers.
//!
//! ```text
//! POST /api/v1/attendance {"studentId":"3fa85f64-...","date":"2026-08-30","status":"present"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceStatus, Error, NewAttendanceRecord, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Attendance entry body for `POST /api/v1/attendance`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceBody {
    #[schema(value_type = String, format = "uuid")]
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Record one attendance entry for a student.
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = MarkAttendanceBody,
    responses(
        (status = 201, description = "Attendance recorded"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["attendance"],
    operation_id = "markAttendance"
)]
#[post("/attendance")]
pub async fn mark_attendance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MarkAttendanceBody>,
) -> ApiResult<HttpResponse> {
    let ctx = session.require_context()?;
    let body = payload.into_inner();
    let record = NewAttendanceRecord {
        student_id: body.student_id,
        // The service stamps the calling warden over this value.
        warden_id: *ctx.user_id(),
        date: body.date,
        status: body.status,
    };
    state.attendance.mark_attendance(&ctx, record).await?;
    Ok(HttpResponse::Created().finish())
}
