//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc. Services implement the driving ports the HTTP layer
//! calls; adapters implement the driven ports the services call.

pub mod allocation;
pub mod allocation_service;
pub mod application;
pub mod attendance;
pub mod attendance_service;
pub mod context;
pub mod dashboard;
pub mod dashboard_service;
pub mod error;
pub mod hostel;
pub mod ports;
pub mod provisioning_service;
pub mod registration_service;
pub mod user;

pub use self::allocation_service::AllocationService;
pub use self::application::{Application, ApplicationId, ApplicationStatus, ApprovalOutcome};
pub use self::attendance::{AttendanceStatus, NewAttendanceRecord};
pub use self::attendance_service::AttendanceService;
pub use self::context::RequestContext;
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hostel::{Hostel, HostelId, Room, RoomId, RoomNumber};
pub use self::provisioning_service::ProvisioningService;
pub use self::registration_service::RegistrationService;
pub use self::user::{College, Role, User, UserId, Username};
