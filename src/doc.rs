//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated OpenAPI specification for the REST API.
//! It registers every HTTP endpoint from the inbound layer, the request and
//! response schemas they exchange, and the session cookie security scheme.
//! Swagger UI serves the document in debug builds at `/docs`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::dashboard::{
    AttendanceView, HostelView, PendingApplicationView, PendingRegistrationView,
    PrincipalDashboard, RoomPhotoView, RoomView, StudentDashboard, StudentView, WardenDashboard,
};
use crate::domain::{ApprovalOutcome, AttendanceStatus, Error, ErrorCode, Role};
use crate::inbound::http::applications::{SubmitApplicationRequest, SubmittedResponse};
use crate::inbound::http::attendance::MarkAttendanceBody;
use crate::inbound::http::hostels::{CreateHostelBody, CreatedHostelResponse, RoomPhotoBody, UpdateRoomBody};
use crate::inbound::http::users::{
    RegisterRequest, RegisteredResponse, SessionRequest, SessionResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hostel backend API",
        description = "HTTP interface for registration approval, room allocation, \
                       attendance, and role dashboards.",
        license(name = "ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::approve_user,
        crate::inbound::http::users::reject_user,
        crate::inbound::http::users::create_session,
        crate::inbound::http::users::delete_session,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::approve_application,
        crate::inbound::http::hostels::create_hostel,
        crate::inbound::http::hostels::update_room,
        crate::inbound::http::hostels::record_room_photo,
        crate::inbound::http::attendance::mark_attendance,
        crate::inbound::http::dashboards::principal_dashboard,
        crate::inbound::http::dashboards::student_dashboard,
        crate::inbound::http::dashboards::warden_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        AttendanceStatus,
        ApprovalOutcome,
        RegisterRequest,
        RegisteredResponse,
        SessionRequest,
        SessionResponse,
        SubmitApplicationRequest,
        SubmittedResponse,
        CreateHostelBody,
        CreatedHostelResponse,
        UpdateRoomBody,
        RoomPhotoBody,
        MarkAttendanceBody,
        PendingRegistrationView,
        PendingApplicationView,
        RoomView,
        HostelView,
        StudentView,
        AttendanceView,
        RoomPhotoView,
        PrincipalDashboard,
        StudentDashboard,
        WardenDashboard,
    )),
    tags(
        (name = "users", description = "Registration, approval, and sessions"),
        (name = "applications", description = "Housing applications and allocation"),
        (name = "hostels", description = "Hostel and room provisioning"),
        (name = "attendance", description = "Attendance recording"),
        (name = "dashboards", description = "Per-role dashboard aggregates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
