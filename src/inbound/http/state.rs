//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AllocationCommand, AttendanceCommand, DashboardQuery, IdentityService, ProvisioningCommand,
    RegistrationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityService>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub allocation: Arc<dyn AllocationCommand>,
    pub provisioning: Arc<dyn ProvisioningCommand>,
    pub attendance: Arc<dyn AttendanceCommand>,
    pub dashboards: Arc<dyn DashboardQuery>,
}
