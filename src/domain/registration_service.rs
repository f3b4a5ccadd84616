//! Registration approval workflow: register, approve, reject.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::context::RequestContext;
use super::error::Error;
use super::ports::{
    IdentityService, PersistenceError, RegisterUserRequest, RegistrationCommand, SessionIdentity,
    UserRepository,
};
use super::user::{NewUser, Role, User, UserId};

fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        PersistenceError::Conflict { .. } => {
            Error::conflict("username, email, or phone already registered")
        }
    }
}

/// Registration service implementing the [`RegistrationCommand`] and
/// [`IdentityService`] driving ports.
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
}

impl RegistrationService {
    /// Create a new service over the user store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    /// Principals act only within their own college; admins are global.
    fn check_college_scope(ctx: &RequestContext, target: &User) -> Result<(), Error> {
        if ctx.role() == Role::Principal && target.college() != ctx.college() {
            return Err(Error::forbidden(
                "user belongs to a different college",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn register(&self, request: RegisterUserRequest) -> Result<UserId, Error> {
        let user = NewUser {
            id: UserId::random(),
            username: request.username,
            email: request.email,
            phone: request.phone,
            role: request.role,
            college: request.college,
        };

        self.users
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id, role = %user.role, "registration recorded, awaiting approval");
        Ok(user.id)
    }

    async fn approve_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<(), Error> {
        let target = self.load_user(&user_id).await?;

        if !ctx.role().can_approve(target.role()) {
            return Err(Error::forbidden(format!(
                "a {} may not approve a {} account",
                ctx.role(),
                target.role()
            )));
        }
        Self::check_college_scope(ctx, &target)?;

        // Approving an already-approved account is a harmless no-op.
        self.users
            .approve(&user_id)
            .await
            .map_err(map_persistence_error)?;

        info!(%user_id, approver = %ctx.user_id(), "account approved");
        Ok(())
    }

    async fn reject_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<(), Error> {
        ctx.require_role(Role::Principal)?;

        let target = self.load_user(&user_id).await?;
        if target.is_approved() {
            return Err(Error::invalid_request(
                "only pending registrations can be rejected",
            ));
        }
        Self::check_college_scope(ctx, &target)?;

        let deleted = self
            .users
            .delete_pending(&user_id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(format!("user {user_id} not found")));
        }

        info!(%user_id, rejecter = %ctx.user_id(), "pending registration rejected");
        Ok(())
    }
}

#[async_trait]
impl IdentityService for RegistrationService {
    async fn establish(&self, user_id: UserId) -> Result<SessionIdentity, Error> {
        let user = self.load_user(&user_id).await?;
        if !user.is_approved() {
            return Err(Error::unauthorized("account is waiting for approval"));
        }

        Ok(SessionIdentity {
            user_id: *user.id(),
            username: user.username().clone(),
            role: user.role(),
            college: user.college().clone(),
        })
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
