use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::ports::{AllocationCommand, IdentityService, SessionIdentity};
use crate::domain::{College, RequestContext, Role, UserId, Username};
use crate::inbound::http::test_utils::{TestStateBuilder, test_session_middleware};
use crate::inbound::http::users::create_session;

use super::*;

const STUDENT_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Identity stub that logs any user id in as an approved student.
struct StudentIdentity;

#[async_trait]
impl IdentityService for StudentIdentity {
    async fn establish(&self, user_id: UserId) -> Result<SessionIdentity, crate::domain::Error> {
        Ok(SessionIdentity {
            user_id,
            username: Username::new("student-1").expect("fixture username"),
            role: Role::Student,
            college: College::new("MNR College").expect("fixture college"),
        })
    }
}

#[derive(Default)]
struct RecordingAllocation {
    submissions: Mutex<Vec<(RequestContext, RoomId)>>,
    approvals: Mutex<Vec<ApplicationId>>,
    outcome: Option<ApprovalOutcome>,
}

#[async_trait]
impl AllocationCommand for RecordingAllocation {
    async fn submit_application(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
    ) -> Result<ApplicationId, Error> {
        self.submissions
            .lock()
            .expect("submissions lock")
            .push((ctx.clone(), room_id));
        Ok(ApplicationId::random())
    }

    async fn approve_application(
        &self,
        _ctx: &RequestContext,
        application_id: ApplicationId,
    ) -> Result<ApprovalOutcome, Error> {
        self.approvals
            .lock()
            .expect("approvals lock")
            .push(application_id);
        self.outcome
            .ok_or_else(|| Error::not_found(format!("application {application_id} not found")))
    }
}

fn test_app(
    allocation: Arc<RecordingAllocation>,
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
        .identity(Arc::new(StudentIdentity))
        .allocation(allocation)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(create_session)
                .service(submit_application)
                .service(approve_application),
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
            .set_json(json!({ "userId": STUDENT_ID }))
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
async fn submission_requires_a_session() {
    let app = actix_test::init_service(test_app(Arc::new(RecordingAllocation::default()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/applications")
            .set_json(json!({ "roomId": RoomId::random() }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn submission_returns_the_application_id() {
    let allocation = Arc::new(RecordingAllocation::default());
    let app = actix_test::init_service(test_app(allocation.clone())).await;
    let cookie = login_cookie(&app).await;
    let room_id = RoomId::random();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/applications")
            .cookie(cookie)
            .set_json(json!({ "roomId": room_id }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("response JSON");
    assert!(value["id"].is_string());
    let submissions = allocation.submissions.lock().expect("submissions lock");
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0.role(), Role::Student);
    assert_eq!(submissions[0].1, room_id);
}

#[actix_web::test]
async fn approval_serialises_the_allocated_outcome() {
    let room_id = RoomId::random();
    let allocation = Arc::new(RecordingAllocation {
        outcome: Some(ApprovalOutcome::Allocated { room_id }),
        ..RecordingAllocation::default()
    });
    let app = actix_test::init_service(test_app(allocation)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/v1/applications/{}/approval",
                ApplicationId::random()
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("response JSON");
    assert_eq!(value["outcome"], "allocated");
    assert_eq!(value["room_id"], room_id.to_string());
}

#[actix_web::test]
async fn approval_serialises_the_unallocated_outcome() {
    let allocation = Arc::new(RecordingAllocation {
        outcome: Some(ApprovalOutcome::ApprovedUnallocated),
        ..RecordingAllocation::default()
    });
    let app = actix_test::init_service(test_app(allocation)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/v1/applications/{}/approval",
                ApplicationId::random()
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("response JSON");
    assert_eq!(value["outcome"], "approved_unallocated");
}

#[actix_web::test]
async fn approval_maps_missing_applications_to_404() {
    let allocation = Arc::new(RecordingAllocation::default());
    let app = actix_test::init_service(test_app(allocation)).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/v1/applications/{}/approval",
                ApplicationId::random()
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    assert_eq!(value["code"], "not_found");
}
