//! Room allocation engine: application submission and principal approval.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::application::{ApplicationId, ApprovalOutcome, NewApplication};
use super::context::RequestContext;
use super::error::Error;
use super::hostel::RoomId;
use super::ports::{
    AllocationCommand, ApplicationRepository, ApprovalDecision, HostelRepository, PersistenceError,
};
use super::user::Role;

fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("allocation store unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            Error::internal(format!("allocation store error: {message}"))
        }
        PersistenceError::Conflict { message } => Error::conflict(message),
    }
}

/// Allocation engine implementing the [`AllocationCommand`] driving port.
#[derive(Clone)]
pub struct AllocationService {
    applications: Arc<dyn ApplicationRepository>,
    hostels: Arc<dyn HostelRepository>,
}

impl AllocationService {
    /// Create a new service over the application and hostel stores.
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        hostels: Arc<dyn HostelRepository>,
    ) -> Self {
        Self {
            applications,
            hostels,
        }
    }
}

#[async_trait]
impl AllocationCommand for AllocationService {
    async fn submit_application(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
    ) -> Result<ApplicationId, Error> {
        ctx.require_role(Role::Student)?;

        let room = self
            .hostels
            .find_room(&room_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("room {room_id} not found")))?;

        // Duplicate applications from the same student are permitted; the
        // principal sees and decides each one separately.
        let application = NewApplication {
            id: ApplicationId::random(),
            student_id: *ctx.user_id(),
            hostel_id: *room.hostel_id(),
            room_id,
        };

        self.applications
            .insert(&application)
            .await
            .map_err(map_persistence_error)?;

        info!(
            application_id = %application.id,
            student_id = %application.student_id,
            room_id = %room_id,
            "application submitted"
        );
        Ok(application.id)
    }

    async fn approve_application(
        &self,
        ctx: &RequestContext,
        application_id: ApplicationId,
    ) -> Result<ApprovalOutcome, Error> {
        ctx.require_role(Role::Principal)?;

        let decision = self
            .applications
            .approve(&application_id)
            .await
            .map_err(map_persistence_error)?;

        match decision {
            ApprovalDecision::NotFound => Err(Error::not_found(format!(
                "application {application_id} not found"
            ))),
            ApprovalDecision::AlreadyApproved => Ok(ApprovalOutcome::AlreadyApproved),
            ApprovalDecision::Approved {
                allocated_room: Some(room_id),
            } => {
                info!(%application_id, %room_id, "application approved and room allocated");
                Ok(ApprovalOutcome::Allocated { room_id })
            }
            ApprovalDecision::Approved {
                allocated_room: None,
            } => {
                // Business-policy outcome, not a fault: the request is
                // approved even though every room in the hostel is full.
                info!(%application_id, "application approved without allocation");
                Ok(ApprovalOutcome::ApprovedUnallocated)
            }
        }
    }
}

#[cfg(test)]
#[path = "allocation_service_tests.rs"]
mod tests;
