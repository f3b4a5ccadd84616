//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal only with the
//! domain-level identity context. The session carries the user id, role,
//! and college established at login; handlers rebuild a [`RequestContext`]
//! from those values on every request.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::SessionIdentity;
use crate::domain::{College, Error, RequestContext, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";
pub(crate) const COLLEGE_KEY: &str = "college";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, identity.user_id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, identity.role.as_str()))
            .and_then(|()| self.0.insert(COLLEGE_KEY, identity.college.as_ref()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every identity value from the session.
    pub fn purge(&self) {
        self.0.purge();
    }

    fn read_key(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Rebuild the caller's identity context, if a complete one is stored.
    ///
    /// Tampered or partial values are treated as an absent session rather
    /// than an internal fault.
    pub fn context(&self) -> Result<Option<RequestContext>, Error> {
        let (Some(user_id), Some(role), Some(college)) = (
            self.read_key(USER_ID_KEY)?,
            self.read_key(ROLE_KEY)?,
            self.read_key(COLLEGE_KEY)?,
        ) else {
            return Ok(None);
        };

        let user_id = match user_id.parse::<UserId>() {
            Ok(id) => id,
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                return Ok(None);
            }
        };
        let role = match role.parse::<Role>() {
            Ok(role) => role,
            Err(error) => {
                warn!("invalid role in session cookie: {error}");
                return Ok(None);
            }
        };
        let college = match College::new(college) {
            Ok(college) => college,
            Err(error) => {
                warn!("invalid college in session cookie: {error}");
                return Ok(None);
            }
        };

        Ok(Some(RequestContext::new(user_id, role, college)))
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_context(&self) -> Result<RequestContext, Error> {
        self.context()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::domain::Username;

    use super::*;

    fn identity() -> SessionIdentity {
        SessionIdentity {
            user_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6"
                .parse()
                .expect("fixture id"),
            username: Username::new("warden-1").expect("fixture username"),
            role: Role::Warden,
            college: College::new("MNR College").expect("fixture college"),
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_the_identity_context() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_identity(&identity())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let ctx = session.require_context()?;
                        Ok::<_, Error>(
                            HttpResponse::Ok()
                                .body(format!("{}:{}:{}", ctx.user_id(), ctx.role(), ctx.college())),
                        )
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(
            body,
            "3fa85f64-5717-4562-b3fc-2c963f66afa6:warden:MNR College"
        );
    }

    #[actix_web::test]
    async fn missing_identity_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_context()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_role_is_unauthorised() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "3fa85f64-5717-4562-b3fc-2c963f66afa6")
                            .expect("set user id");
                        session.insert(ROLE_KEY, "superuser").expect("set role");
                        session
                            .insert(COLLEGE_KEY, "MNR College")
                            .expect("set college");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        let _ = session.require_context()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
