//! Read-only projections rendered on the role dashboards.
//!
//! These are flat view rows produced by the dashboard repository joins.
//! They serialise directly; no domain invariants beyond what the source
//! tables already guarantee.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::application::ApplicationId;
use super::attendance::AttendanceStatus;
use super::hostel::{HostelId, RoomId, RoomNumber};
use super::user::{College, Role, UserId, Username};

/// A registration awaiting approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistrationView {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub username: Username,
    pub role: Role,
    #[schema(value_type = String)]
    pub college: College,
}

/// A pending housing application joined with student and hostel names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingApplicationView {
    #[schema(value_type = String, format = "uuid")]
    pub application_id: ApplicationId,
    #[schema(value_type = String, format = "uuid")]
    pub student_id: UserId,
    #[schema(value_type = String)]
    pub student_username: Username,
    #[schema(value_type = String, format = "uuid")]
    pub hostel_id: HostelId,
    pub hostel_name: String,
    #[schema(value_type = Option<String>)]
    pub room_number: Option<RoomNumber>,
}

/// Room inventory row with its hostel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    #[schema(value_type = String, format = "uuid")]
    pub room_id: RoomId,
    #[schema(value_type = String, format = "uuid")]
    pub hostel_id: HostelId,
    pub hostel_name: String,
    #[schema(value_type = String)]
    pub room_number: RoomNumber,
    pub capacity: i32,
    pub occupied: i32,
    pub facilities: Option<String>,
    pub damage: Option<String>,
}

/// Hostel summary row for the owning warden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelView {
    #[schema(value_type = String, format = "uuid")]
    pub hostel_id: HostelId,
    pub name: String,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

/// Approved student row used for attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub username: Username,
}

/// One attendance log row, newest first in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    #[schema(value_type = String)]
    pub student_username: Username,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Room photo metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomPhotoView {
    pub filename: String,
    #[schema(value_type = String)]
    pub room_number: RoomNumber,
    pub hostel_name: String,
}

/// Aggregate served to principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalDashboard {
    pub pending_registrations: Vec<PendingRegistrationView>,
    pub pending_applications: Vec<PendingApplicationView>,
    pub approved_student_count: i64,
}

/// Aggregate served to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub rooms: Vec<RoomView>,
    pub attendance: Vec<AttendanceView>,
    pub photos: Vec<RoomPhotoView>,
    pub allocated_room: Option<RoomView>,
}

/// Aggregate served to wardens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardenDashboard {
    pub students: Vec<StudentView>,
    pub attendance: Vec<AttendanceView>,
    pub hostels: Vec<HostelView>,
    pub rooms: Vec<RoomView>,
    pub photos: Vec<RoomPhotoView>,
}
