//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to interact with the
//! persistence adapter; driving ports are the use-cases the HTTP layer
//! calls. Each driven trait exposes strongly typed errors so adapters map
//! their failures into predictable variants instead of returning
//! `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::application::{ApplicationId, ApprovalOutcome, NewApplication};
use super::attendance::NewAttendanceRecord;
use super::context::RequestContext;
use super::dashboard::{
    AttendanceView, HostelView, PendingApplicationView, PendingRegistrationView,
    PrincipalDashboard, RoomPhotoView, RoomView, StudentDashboard, StudentView, WardenDashboard,
};
use super::error::Error;
use super::hostel::{HostelId, NewHostel, NewRoom, NewRoomPhoto, Room, RoomDetailsUpdate, RoomId};
use super::user::{College, NewUser, Role, User, UserId, Username};

/// Persistence errors raised by the driven port adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Repository connection could not be established.
    #[error("repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query { message: String },
    /// Unique constraint rejected the write; nothing was persisted.
    #[error("repository conflict: {message}")]
    Conflict { message: String },
}

impl PersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique constraint violations.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Outcome of the transactional approval performed by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    /// No application exists for the id; nothing changed.
    NotFound,
    /// The application was already approved; nothing changed.
    AlreadyApproved,
    /// The application is now approved; `allocated_room` is `None` when no
    /// room in the hostel had spare capacity.
    Approved { allocated_room: Option<RoomId> },
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new unapproved registration. Duplicate unique fields
    /// surface as [`PersistenceError::Conflict`] with no partial write.
    async fn insert(&self, user: &NewUser) -> Result<(), PersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError>;

    /// Flip the approval flag; returns whether a row was updated.
    async fn approve(&self, id: &UserId) -> Result<bool, PersistenceError>;

    /// Delete a registration that is still pending approval; returns
    /// whether a row was deleted. Approved accounts are left untouched.
    async fn delete_pending(&self, id: &UserId) -> Result<bool, PersistenceError>;
}

/// Persistence port for hostel and room inventory.
#[async_trait]
pub trait HostelRepository: Send + Sync {
    /// Create the hostel row and all of its rooms in one transaction;
    /// failure leaves no partial room set behind.
    async fn create_hostel(
        &self,
        hostel: &NewHostel,
        rooms: &[NewRoom],
    ) -> Result<(), PersistenceError>;

    /// Fetch a room by identifier.
    async fn find_room(&self, id: &RoomId) -> Result<Option<Room>, PersistenceError>;

    /// Apply warden edits to a room. The update is conditional on
    /// `occupied <= new capacity` and reports whether a row changed.
    async fn update_room_details(
        &self,
        id: &RoomId,
        update: &RoomDetailsUpdate,
    ) -> Result<bool, PersistenceError>;

    /// Fetch a room only when it sits in the given hostel and that hostel
    /// is owned by the given warden within the given college.
    async fn find_warden_room(
        &self,
        room_id: &RoomId,
        hostel_id: &HostelId,
        warden_id: &UserId,
        college: &College,
    ) -> Result<Option<Room>, PersistenceError>;

    /// Record uploaded photo metadata for a room.
    async fn record_photo(&self, photo: &NewRoomPhoto) -> Result<(), PersistenceError>;
}

/// Persistence port for housing applications, including the transactional
/// approval that performs the allocation.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new pending application.
    async fn insert(&self, application: &NewApplication) -> Result<(), PersistenceError>;

    /// Approve an application and allocate a room inside one transaction.
    ///
    /// The adapter must reserve occupancy with a conditional increment
    /// (`occupied < capacity` checked via the update's affected-row count)
    /// so concurrent approvals can never overbook a room, and must apply
    /// the room, user, hostel, and application updates atomically.
    async fn approve(&self, id: &ApplicationId) -> Result<ApprovalDecision, PersistenceError>;
}

/// Persistence port for the append-only attendance log.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Append one attendance record. No uniqueness is enforced on
    /// (student, date); conflicting rows for the same day are permitted.
    async fn append(&self, record: &NewAttendanceRecord) -> Result<(), PersistenceError>;
}

/// Read-only persistence port backing the role dashboards. Pure reader;
/// imposes no contract on the allocation engine beyond visibility of
/// committed writes.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn pending_registrations(
        &self,
        college: &College,
    ) -> Result<Vec<PendingRegistrationView>, PersistenceError>;

    async fn pending_applications(
        &self,
        college: &College,
    ) -> Result<Vec<PendingApplicationView>, PersistenceError>;

    async fn approved_student_count(&self, college: &College) -> Result<i64, PersistenceError>;

    async fn approved_students(
        &self,
        college: &College,
    ) -> Result<Vec<StudentView>, PersistenceError>;

    async fn rooms_for_college(&self, college: &College) -> Result<Vec<RoomView>, PersistenceError>;

    async fn allocated_room(&self, student_id: &UserId)
    -> Result<Option<RoomView>, PersistenceError>;

    async fn attendance_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<AttendanceView>, PersistenceError>;

    async fn attendance_for_warden(
        &self,
        warden_id: &UserId,
    ) -> Result<Vec<AttendanceView>, PersistenceError>;

    async fn hostels_for_warden(
        &self,
        warden_id: &UserId,
    ) -> Result<Vec<HostelView>, PersistenceError>;

    async fn rooms_for_warden(&self, warden_id: &UserId)
    -> Result<Vec<RoomView>, PersistenceError>;

    async fn photos_for_college(
        &self,
        college: &College,
    ) -> Result<Vec<RoomPhotoView>, PersistenceError>;

    async fn photos_for_warden(
        &self,
        warden_id: &UserId,
        college: &College,
    ) -> Result<Vec<RoomPhotoView>, PersistenceError>;
}

/// New registration request accepted from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub username: Username,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub college: College,
}

/// Driving port for the registration approval workflow.
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Create an unapproved account awaiting principal/admin review.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserId, Error>;

    /// Approve a pending account; admins approve principals, principals
    /// approve the students and wardens of their college.
    async fn approve_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<(), Error>;

    /// Delete a pending account outright. No soft-delete, no audit trail.
    async fn reject_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<(), Error>;
}

/// Driving port for the room allocation engine.
#[async_trait]
pub trait AllocationCommand: Send + Sync {
    /// Record a student's application for a specific room.
    async fn submit_application(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
    ) -> Result<ApplicationId, Error>;

    /// Approve an application, allocating the requested room or falling
    /// back to any room with spare capacity in the same hostel.
    async fn approve_application(
        &self,
        ctx: &RequestContext,
        application_id: ApplicationId,
    ) -> Result<ApprovalOutcome, Error>;
}

/// Hostel creation request accepted from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHostelRequest {
    pub name: String,
    pub total_rooms: u32,
}

/// Photo upload metadata accepted from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRoomPhotoRequest {
    pub hostel_id: HostelId,
    pub room_id: RoomId,
    pub filename: String,
}

/// Driving port for hostel and room provisioning.
#[async_trait]
pub trait ProvisioningCommand: Send + Sync {
    /// Create a hostel with `total_rooms` generated rooms, all-or-nothing.
    async fn create_hostel(
        &self,
        ctx: &RequestContext,
        request: CreateHostelRequest,
    ) -> Result<HostelId, Error>;

    /// Update warden-editable room attributes.
    async fn update_room(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        update: RoomDetailsUpdate,
    ) -> Result<(), Error>;

    /// Record uploaded photo metadata after validating room ownership.
    async fn record_room_photo(
        &self,
        ctx: &RequestContext,
        request: RecordRoomPhotoRequest,
    ) -> Result<(), Error>;
}

/// Driving port for attendance recording.
#[async_trait]
pub trait AttendanceCommand: Send + Sync {
    /// Append one attendance record for a student.
    async fn mark_attendance(
        &self,
        ctx: &RequestContext,
        record: NewAttendanceRecord,
    ) -> Result<(), Error>;
}

/// Driving port for the per-role dashboard aggregations.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn principal_dashboard(&self, ctx: &RequestContext)
    -> Result<PrincipalDashboard, Error>;

    async fn student_dashboard(&self, ctx: &RequestContext) -> Result<StudentDashboard, Error>;

    async fn warden_dashboard(&self, ctx: &RequestContext) -> Result<WardenDashboard, Error>;
}

/// Identity snapshot persisted into the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub username: Username,
    pub role: Role,
    pub college: College,
}

/// Driving port for establishing the trusted identity context. Credential
/// verification happens upstream; this port only loads the approved account
/// the session will speak for.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn establish(&self, user_id: UserId) -> Result<SessionIdentity, Error>;
}
