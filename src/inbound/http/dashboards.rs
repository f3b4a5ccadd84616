//! Role dashboard API handlers.
//!
//! ```text
//! GET /api/v1/dashboards/principal
//! GET /api/v1/dashboards/student
//! GET /api/v1/dashboards/warden
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::dashboard::{PrincipalDashboard, StudentDashboard, WardenDashboard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Serve the principal's registration and application overview.
#[utoipa::path(
    get,
    path = "/api/v1/dashboards/principal",
    responses(
        (status = 200, description = "Principal dashboard", body = PrincipalDashboard),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboards"],
    operation_id = "principalDashboard"
)]
#[get("/dashboards/principal")]
pub async fn principal_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PrincipalDashboard>> {
    let ctx = session.require_context()?;
    Ok(web::Json(state.dashboards.principal_dashboard(&ctx).await?))
}

/// Serve the student's room listing, attendance, and allocation.
#[utoipa::path(
    get,
    path = "/api/v1/dashboards/student",
    responses(
        (status = 200, description = "Student dashboard", body = StudentDashboard),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboards"],
    operation_id = "studentDashboard"
)]
#[get("/dashboards/student")]
pub async fn student_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StudentDashboard>> {
    let ctx = session.require_context()?;
    Ok(web::Json(state.dashboards.student_dashboard(&ctx).await?))
}

/// Serve the warden's hostels, rooms, students, and attendance log.
#[utoipa::path(
    get,
    path = "/api/v1/dashboards/warden",
    responses(
        (status = 200, description = "Warden dashboard", body = WardenDashboard),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboards"],
    operation_id = "wardenDashboard"
)]
#[get("/dashboards/warden")]
pub async fn warden_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<WardenDashboard>> {
    let ctx = session.require_context()?;
    Ok(web::Json(state.dashboards.warden_dashboard(&ctx).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::domain::dashboard::{HostelView, RoomView};
    use crate::domain::ports::{DashboardQuery, IdentityService, SessionIdentity};
    use crate::domain::{
        College, Error, HostelId, RequestContext, Role, RoomId, RoomNumber, UserId, Username,
    };
    use crate::inbound::http::test_utils::{TestStateBuilder, test_session_middleware};
    use crate::inbound::http::users::create_session;

    use super::*;

    /// Identity stub handing out a fixed role per test app.
    struct RoleIdentity(Role);

    #[async_trait]
    impl IdentityService for RoleIdentity {
        async fn establish(&self, user_id: UserId) -> Result<SessionIdentity, Error> {
            Ok(SessionIdentity {
                user_id,
                username: Username::new("someone").expect("fixture username"),
                role: self.0,
                college: College::new("MNR College").expect("fixture college"),
            })
        }
    }

    /// Dashboard stub enforcing the same role gates as the real service.
    struct GatedDashboards;

    #[async_trait]
    impl DashboardQuery for GatedDashboards {
        async fn principal_dashboard(
            &self,
            ctx: &RequestContext,
        ) -> Result<PrincipalDashboard, Error> {
            ctx.require_role(Role::Principal)?;
            Ok(PrincipalDashboard {
                pending_registrations: Vec::new(),
                pending_applications: Vec::new(),
                approved_student_count: 12,
            })
        }

        async fn student_dashboard(&self, ctx: &RequestContext) -> Result<StudentDashboard, Error> {
            ctx.require_role(Role::Student)?;
            let room = RoomView {
                room_id: RoomId::random(),
                hostel_id: HostelId::random(),
                hostel_name: "North Block".to_owned(),
                room_number: RoomNumber::new("R1").expect("valid room number"),
                capacity: 2,
                occupied: 1,
                facilities: None,
                damage: None,
            };
            Ok(StudentDashboard {
                rooms: vec![room.clone()],
                attendance: Vec::new(),
                photos: Vec::new(),
                allocated_room: Some(room),
            })
        }

        async fn warden_dashboard(&self, ctx: &RequestContext) -> Result<WardenDashboard, Error> {
            ctx.require_role(Role::Warden)?;
            Ok(WardenDashboard {
                students: Vec::new(),
                attendance: Vec::new(),
                hostels: vec![HostelView {
                    hostel_id: HostelId::random(),
                    name: "North Block".to_owned(),
                    total_rooms: 10,
                    available_rooms: 7,
                }],
                rooms: Vec::new(),
                photos: Vec::new(),
            })
        }
    }

    fn test_app(
        role: Role,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = TestStateBuilder::default()
            .identity(Arc::new(RoleIdentity(role)))
            .dashboards(Arc::new(GatedDashboards))
            .build();
        App::new()
            .app_data(actix_web::web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                actix_web::web::scope("/api/v1")
                    .service(create_session)
                    .service(principal_dashboard)
                    .service(student_dashboard)
                    .service(warden_dashboard),
            )
    }

    async fn login_cookie<S, B>(app: &S) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
    {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/session")
                .set_json(json!({ "userId": UserId::random() }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn principal_dashboard_serialises_camel_case() {
        let app = actix_test::init_service(test_app(Role::Principal)).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboards/principal")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["approvedStudentCount"], 12);
        assert!(value.get("approved_student_count").is_none());
    }

    #[actix_web::test]
    async fn student_dashboard_includes_the_allocated_room() {
        let app = actix_test::init_service(test_app(Role::Student)).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboards/student")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["allocatedRoom"]["roomNumber"], "R1");
        assert_eq!(value["rooms"][0]["hostelName"], "North Block");
    }

    #[actix_web::test]
    async fn warden_dashboard_is_refused_for_students() {
        let app = actix_test::init_service(test_app(Role::Student)).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboards/warden")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn dashboards_require_a_session() {
        let app = actix_test::init_service(test_app(Role::Warden)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboards/warden")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
