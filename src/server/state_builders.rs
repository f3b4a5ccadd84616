//! Wiring of repository-backed domain services into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{IdentityService, RegistrationCommand};
use crate::domain::{
    AllocationService, AttendanceService, DashboardService, ProvisioningService,
    RegistrationService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselAttendanceRepository, DieselDashboardRepository,
    DieselHostelRepository, DieselUserRepository,
};

/// Build the shared HTTP state over database-backed adapters.
///
/// The registration service doubles as the identity service: both ports read
/// the same user store, so one instance serves the two roles.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let hostels = Arc::new(DieselHostelRepository::new(pool.clone()));
    let applications = Arc::new(DieselApplicationRepository::new(pool.clone()));
    let attendance = Arc::new(DieselAttendanceRepository::new(pool.clone()));
    let dashboards = Arc::new(DieselDashboardRepository::new(pool.clone()));

    let registration = Arc::new(RegistrationService::new(users));

    web::Data::new(HttpState {
        identity: registration.clone() as Arc<dyn IdentityService>,
        registration: registration as Arc<dyn RegistrationCommand>,
        allocation: Arc::new(AllocationService::new(applications, hostels.clone())),
        provisioning: Arc::new(ProvisioningService::new(hostels)),
        attendance: Arc::new(AttendanceService::new(attendance)),
        dashboards: Arc::new(DashboardService::new(dashboards)),
    })
}
