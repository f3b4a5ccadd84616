//! Housing applications and their approval outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::hostel::{HostelId, RoomId};
use super::user::UserId;

/// Validation errors for application values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    #[error("unknown application status: {value}")]
    UnknownStatus { value: String },
}

/// Stable application identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Application lifecycle state. Approval is terminal; there is no rejection
/// path for housing applications, only for pending user registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
}

impl ApplicationStatus {
    /// Stable wire/storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            other => Err(ApplicationValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// A student's request to occupy a specific room, pending principal decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id: ApplicationId,
    student_id: UserId,
    hostel_id: HostelId,
    room_id: Option<RoomId>,
    status: ApplicationStatus,
}

impl Application {
    pub fn new(
        id: ApplicationId,
        student_id: UserId,
        hostel_id: HostelId,
        room_id: Option<RoomId>,
        status: ApplicationStatus,
    ) -> Self {
        Self {
            id,
            student_id,
            hostel_id,
            room_id,
            status,
        }
    }

    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    pub fn hostel_id(&self) -> &HostelId {
        &self.hostel_id
    }

    /// Room the student asked for, when the application named one.
    pub fn requested_room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }
}

/// New application awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub id: ApplicationId,
    pub student_id: UserId,
    pub hostel_id: HostelId,
    pub room_id: RoomId,
}

/// Outcome of approving an application.
///
/// Approval of the request is distinct from successful allocation: an
/// application is marked approved even when every room in the hostel is
/// full, which surfaces as [`ApprovalOutcome::ApprovedUnallocated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ApprovalOutcome {
    /// A room was reserved and the student bound to it.
    Allocated {
        #[schema(value_type = String, format = "uuid")]
        room_id: RoomId,
    },
    /// The application is approved but no room had spare capacity.
    ApprovedUnallocated,
    /// The application had already been approved; nothing changed.
    AlreadyApproved,
}
