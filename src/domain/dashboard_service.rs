//! Role-gated dashboard aggregations.

use std::sync::Arc;

use async_trait::async_trait;

use super::context::RequestContext;
use super::dashboard::{PrincipalDashboard, StudentDashboard, WardenDashboard};
use super::error::Error;
use super::ports::{DashboardQuery, DashboardRepository, PersistenceError};
use super::user::Role;

fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("dashboard store unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            Error::internal(format!("dashboard store error: {message}"))
        }
        PersistenceError::Conflict { message } => Error::internal(message),
    }
}

/// Dashboard service implementing the [`DashboardQuery`] driving port.
#[derive(Clone)]
pub struct DashboardService {
    dashboards: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    /// Create a new service over the dashboard reader.
    pub fn new(dashboards: Arc<dyn DashboardRepository>) -> Self {
        Self { dashboards }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn principal_dashboard(
        &self,
        ctx: &RequestContext,
    ) -> Result<PrincipalDashboard, Error> {
        ctx.require_role(Role::Principal)?;
        let college = ctx.college();

        let pending_registrations = self
            .dashboards
            .pending_registrations(college)
            .await
            .map_err(map_persistence_error)?;
        let pending_applications = self
            .dashboards
            .pending_applications(college)
            .await
            .map_err(map_persistence_error)?;
        let approved_student_count = self
            .dashboards
            .approved_student_count(college)
            .await
            .map_err(map_persistence_error)?;

        Ok(PrincipalDashboard {
            pending_registrations,
            pending_applications,
            approved_student_count,
        })
    }

    async fn student_dashboard(&self, ctx: &RequestContext) -> Result<StudentDashboard, Error> {
        ctx.require_role(Role::Student)?;

        let rooms = self
            .dashboards
            .rooms_for_college(ctx.college())
            .await
            .map_err(map_persistence_error)?;
        let attendance = self
            .dashboards
            .attendance_for_student(ctx.user_id())
            .await
            .map_err(map_persistence_error)?;
        let photos = self
            .dashboards
            .photos_for_college(ctx.college())
            .await
            .map_err(map_persistence_error)?;
        let allocated_room = self
            .dashboards
            .allocated_room(ctx.user_id())
            .await
            .map_err(map_persistence_error)?;

        Ok(StudentDashboard {
            rooms,
            attendance,
            photos,
            allocated_room,
        })
    }

    async fn warden_dashboard(&self, ctx: &RequestContext) -> Result<WardenDashboard, Error> {
        ctx.require_role(Role::Warden)?;

        let students = self
            .dashboards
            .approved_students(ctx.college())
            .await
            .map_err(map_persistence_error)?;
        let attendance = self
            .dashboards
            .attendance_for_warden(ctx.user_id())
            .await
            .map_err(map_persistence_error)?;
        let hostels = self
            .dashboards
            .hostels_for_warden(ctx.user_id())
            .await
            .map_err(map_persistence_error)?;
        let rooms = self
            .dashboards
            .rooms_for_warden(ctx.user_id())
            .await
            .map_err(map_persistence_error)?;
        let photos = self
            .dashboards
            .photos_for_warden(ctx.user_id(), ctx.college())
            .await
            .map_err(map_persistence_error)?;

        Ok(WardenDashboard {
            students,
            attendance,
            hostels,
            rooms,
            photos,
        })
    }
}
