//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; business rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak into the domain layer.
//! - **Strongly typed errors**: Diesel and pool failures are mapped into
//!   the ports' [`crate::domain::ports::PersistenceError`] variants.

mod diesel_application_repository;
mod diesel_attendance_repository;
mod diesel_dashboard_repository;
mod diesel_error_mapping;
mod diesel_hostel_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_attendance_repository::DieselAttendanceRepository;
pub use diesel_dashboard_repository::DieselDashboardRepository;
pub use diesel_hostel_repository::DieselHostelRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
