//! HTTP inbound adapter exposing the REST endpoints.

pub mod applications;
pub mod attendance;
pub mod dashboards;
pub mod error;
pub mod health;
pub mod hostels;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
