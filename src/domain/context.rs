//! Request-scoped caller identity.
//!
//! The identity context arrives from the session layer, already
//! authenticated; the domain trusts it entirely and re-checks only
//! capabilities, never credentials. Passing an explicit context object keeps
//! the services free of ambient session state.

use super::error::Error;
use super::user::{College, Role, UserId};

/// Identity of the current caller: who they are, what they may do, and
/// which college scopes their view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    user_id: UserId,
    role: Role,
    college: College,
}

impl RequestContext {
    pub fn new(user_id: UserId, role: Role, college: College) -> Self {
        Self {
            user_id,
            role,
            college,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn college(&self) -> &College {
        &self.college
    }

    /// Capability gate performed once at the service boundary.
    pub fn require_role(&self, required: Role) -> Result<(), Error> {
        if self.role == required {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "this operation requires the {required} role"
            )))
        }
    }
}
