//! PostgreSQL-backed `UserRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::hostel::RoomId;
use crate::domain::ports::{PersistenceError, UserRepository};
use crate::domain::user::{College, NewUser, Role, User, UserId, Username};

use super::diesel_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain user from its row, refusing values the constructors
/// would never have written.
fn row_to_user(row: UserRow) -> Result<User, PersistenceError> {
    let username = Username::new(row.username).map_err(|err| corrupt_row("username", err))?;
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| corrupt_row("role", err))?;
    let college = College::new(row.college).map_err(|err| corrupt_row("college", err))?;

    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        role,
        college,
        row.approved,
        row.room_id.map(RoomId::from_uuid),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_deref(),
            phone: user.phone.as_deref(),
            role: user.role.as_str(),
            college: user.college.as_ref(),
            approved: false,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn approve(&self, id: &UserId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::approved.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete_pending(&self, id: &UserId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The approved filter keeps this a pending-only delete even when a
        // concurrent approval lands between service check and execution.
        let deleted = diesel::delete(
            users::table
                .filter(users::id.eq(id.as_uuid()))
                .filter(users::approved.eq(false)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
