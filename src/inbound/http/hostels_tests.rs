use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::ports::{IdentityService, ProvisioningCommand, SessionIdentity};
use crate::domain::{College, RequestContext, Role, UserId, Username};
use crate::inbound::http::test_utils::{TestStateBuilder, test_session_middleware};
use crate::inbound::http::users::create_session;

use super::*;

/// Identity stub that logs any user id in as an approved warden.
struct WardenIdentity;

#[async_trait]
impl IdentityService for WardenIdentity {
    async fn establish(&self, user_id: UserId) -> Result<SessionIdentity, Error> {
        Ok(SessionIdentity {
            user_id,
            username: Username::new("warden-1").expect("fixture username"),
            role: Role::Warden,
            college: College::new("MNR College").expect("fixture college"),
        })
    }
}

#[derive(Default)]
struct RecordingProvisioning {
    hostels: Mutex<Vec<(RequestContext, CreateHostelRequest)>>,
    updates: Mutex<Vec<(RoomId, RoomDetailsUpdate)>>,
    photos: Mutex<Vec<RecordRoomPhotoRequest>>,
}

#[async_trait]
impl ProvisioningCommand for RecordingProvisioning {
    async fn create_hostel(
        &self,
        ctx: &RequestContext,
        request: CreateHostelRequest,
    ) -> Result<HostelId, Error> {
        if request.name.trim().is_empty() {
            return Err(Error::invalid_request("hostel name must not be empty"));
        }
        self.hostels
            .lock()
            .expect("hostels lock")
            .push((ctx.clone(), request));
        Ok(HostelId::random())
    }

    async fn update_room(
        &self,
        _ctx: &RequestContext,
        room_id: RoomId,
        update: RoomDetailsUpdate,
    ) -> Result<(), Error> {
        self.updates
            .lock()
            .expect("updates lock")
            .push((room_id, update));
        Ok(())
    }

    async fn record_room_photo(
        &self,
        _ctx: &RequestContext,
        request: RecordRoomPhotoRequest,
    ) -> Result<(), Error> {
        self.photos.lock().expect("photos lock").push(request);
        Ok(())
    }
}

fn test_app(
    provisioning: Arc<RecordingProvisioning>,
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
        .identity(Arc::new(WardenIdentity))
        .provisioning(provisioning)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(create_session)
                .service(create_hostel)
                .service(update_room)
                .service(record_room_photo),
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
async fn create_hostel_passes_the_request_through() {
    let provisioning = Arc::new(RecordingProvisioning::default());
    let app = actix_test::init_service(test_app(provisioning.clone())).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/hostels")
            .cookie(cookie)
            .set_json(json!({ "name": "North Block", "totalRooms": 10 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("response JSON");
    assert!(value["id"].is_string());
    let hostels = provisioning.hostels.lock().expect("hostels lock");
    assert_eq!(hostels.len(), 1);
    assert_eq!(hostels[0].0.role(), Role::Warden);
    assert_eq!(hostels[0].1.name, "North Block");
    assert_eq!(hostels[0].1.total_rooms, 10);
}

#[actix_web::test]
async fn create_hostel_requires_a_session() {
    let app = actix_test::init_service(test_app(Arc::new(RecordingProvisioning::default()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/hostels")
            .set_json(json!({ "name": "North Block", "totalRooms": 10 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_hostel_surfaces_validation_errors() {
    let app = actix_test::init_service(test_app(Arc::new(RecordingProvisioning::default()))).await;
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/hostels")
            .cookie(cookie)
            .set_json(json!({ "name": "   ", "totalRooms": 10 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_room_forwards_all_editable_fields() {
    let provisioning = Arc::new(RecordingProvisioning::default());
    let app = actix_test::init_service(test_app(provisioning.clone())).await;
    let cookie = login_cookie(&app).await;
    let room_id = RoomId::random();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/rooms/{room_id}"))
            .cookie(cookie)
            .set_json(json!({ "capacity": 3, "facilities": "fan, desk" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let updates = provisioning.updates.lock().expect("updates lock");
    assert_eq!(updates[0].0, room_id);
    assert_eq!(updates[0].1.capacity, 3);
    assert_eq!(updates[0].1.facilities.as_deref(), Some("fan, desk"));
    assert_eq!(updates[0].1.damage, None);
}

#[actix_web::test]
async fn photo_metadata_carries_both_path_identifiers() {
    let provisioning = Arc::new(RecordingProvisioning::default());
    let app = actix_test::init_service(test_app(provisioning.clone())).await;
    let cookie = login_cookie(&app).await;
    let hostel_id = HostelId::random();
    let room_id = RoomId::random();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/v1/hostels/{hostel_id}/rooms/{room_id}/photos"
            ))
            .cookie(cookie)
            .set_json(json!({ "filename": "r1-front.jpg" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let photos = provisioning.photos.lock().expect("photos lock");
    assert_eq!(photos[0].hostel_id, hostel_id);
    assert_eq!(photos[0].room_id, room_id);
    assert_eq!(photos[0].filename, "r1-front.jpg");
}
