//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    AllocationCommand, AttendanceCommand, DashboardQuery, IdentityService, ProvisioningCommand,
    RegistrationCommand,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Builder assembling an [`HttpState`] from individual stubbed ports.
///
/// Each handler test overrides only the port it exercises; the rest default
/// to stubs that fail the test when called.
pub struct TestStateBuilder {
    identity: Arc<dyn IdentityService>,
    registration: Arc<dyn RegistrationCommand>,
    allocation: Arc<dyn AllocationCommand>,
    provisioning: Arc<dyn ProvisioningCommand>,
    attendance: Arc<dyn AttendanceCommand>,
    dashboards: Arc<dyn DashboardQuery>,
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self {
            identity: Arc::new(unreachable_ports::UnreachableIdentity),
            registration: Arc::new(unreachable_ports::UnreachableRegistration),
            allocation: Arc::new(unreachable_ports::UnreachableAllocation),
            provisioning: Arc::new(unreachable_ports::UnreachableProvisioning),
            attendance: Arc::new(unreachable_ports::UnreachableAttendance),
            dashboards: Arc::new(unreachable_ports::UnreachableDashboards),
        }
    }
}

impl TestStateBuilder {
    pub fn identity(mut self, port: Arc<dyn IdentityService>) -> Self {
        self.identity = port;
        self
    }

    pub fn registration(mut self, port: Arc<dyn RegistrationCommand>) -> Self {
        self.registration = port;
        self
    }

    pub fn allocation(mut self, port: Arc<dyn AllocationCommand>) -> Self {
        self.allocation = port;
        self
    }

    pub fn provisioning(mut self, port: Arc<dyn ProvisioningCommand>) -> Self {
        self.provisioning = port;
        self
    }

    pub fn attendance(mut self, port: Arc<dyn AttendanceCommand>) -> Self {
        self.attendance = port;
        self
    }

    pub fn dashboards(mut self, port: Arc<dyn DashboardQuery>) -> Self {
        self.dashboards = port;
        self
    }

    pub fn build(self) -> HttpState {
        HttpState {
            identity: self.identity,
            registration: self.registration,
            allocation: self.allocation,
            provisioning: self.provisioning,
            attendance: self.attendance,
            dashboards: self.dashboards,
        }
    }
}

mod unreachable_ports {
    use async_trait::async_trait;

    use crate::domain::dashboard::{PrincipalDashboard, StudentDashboard, WardenDashboard};
    use crate::domain::hostel::{HostelId, RoomDetailsUpdate, RoomId};
    use crate::domain::ports::{
        AllocationCommand, AttendanceCommand, CreateHostelRequest, DashboardQuery, IdentityService,
        ProvisioningCommand, RecordRoomPhotoRequest, RegisterUserRequest, RegistrationCommand,
        SessionIdentity,
    };
    use crate::domain::{
        ApplicationId, ApprovalOutcome, Error, NewAttendanceRecord, RequestContext, UserId,
    };

    pub struct UnreachableIdentity;

    #[async_trait]
    impl IdentityService for UnreachableIdentity {
        async fn establish(&self, _user_id: UserId) -> Result<SessionIdentity, Error> {
            panic!("identity port not stubbed for this test");
        }
    }

    pub struct UnreachableRegistration;

    #[async_trait]
    impl RegistrationCommand for UnreachableRegistration {
        async fn register(&self, _request: RegisterUserRequest) -> Result<UserId, Error> {
            panic!("registration port not stubbed for this test");
        }

        async fn approve_user(&self, _ctx: &RequestContext, _user_id: UserId) -> Result<(), Error> {
            panic!("registration port not stubbed for this test");
        }

        async fn reject_user(&self, _ctx: &RequestContext, _user_id: UserId) -> Result<(), Error> {
            panic!("registration port not stubbed for this test");
        }
    }

    pub struct UnreachableAllocation;

    #[async_trait]
    impl AllocationCommand for UnreachableAllocation {
        async fn submit_application(
            &self,
            _ctx: &RequestContext,
            _room_id: RoomId,
        ) -> Result<ApplicationId, Error> {
            panic!("allocation port not stubbed for this test");
        }

        async fn approve_application(
            &self,
            _ctx: &RequestContext,
            _application_id: ApplicationId,
        ) -> Result<ApprovalOutcome, Error> {
            panic!("allocation port not stubbed for this test");
        }
    }

    pub struct UnreachableProvisioning;

    #[async_trait]
    impl ProvisioningCommand for UnreachableProvisioning {
        async fn create_hostel(
            &self,
            _ctx: &RequestContext,
            _request: CreateHostelRequest,
        ) -> Result<HostelId, Error> {
            panic!("provisioning port not stubbed for this test");
        }

        async fn update_room(
            &self,
            _ctx: &RequestContext,
            _room_id: RoomId,
            _update: RoomDetailsUpdate,
        ) -> Result<(), Error> {
            panic!("provisioning port not stubbed for this test");
        }

        async fn record_room_photo(
            &self,
            _ctx: &RequestContext,
            _request: RecordRoomPhotoRequest,
        ) -> Result<(), Error> {
            panic!("provisioning port not stubbed for this test");
        }
    }

    pub struct UnreachableAttendance;

    #[async_trait]
    impl AttendanceCommand for UnreachableAttendance {
        async fn mark_attendance(
            &self,
            _ctx: &RequestContext,
            _record: NewAttendanceRecord,
        ) -> Result<(), Error> {
            panic!("attendance port not stubbed for this test");
        }
    }

    pub struct UnreachableDashboards;

    #[async_trait]
    impl DashboardQuery for UnreachableDashboards {
        async fn principal_dashboard(
            &self,
            _ctx: &RequestContext,
        ) -> Result<PrincipalDashboard, Error> {
            panic!("dashboard port not stubbed for this test");
        }

        async fn student_dashboard(
            &self,
            _ctx: &RequestContext,
        ) -> Result<StudentDashboard, Error> {
            panic!("dashboard port not stubbed for this test");
        }

        async fn warden_dashboard(&self, _ctx: &RequestContext) -> Result<WardenDashboard, Error> {
            panic!("dashboard port not stubbed for this test");
        }
    }
}
