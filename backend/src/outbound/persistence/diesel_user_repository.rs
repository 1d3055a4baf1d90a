//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Role, User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let invalid = |message: String| {
        warn!(user_id = %id, %message, "stored user row is invalid");
        UserPersistenceError::query(format!("stored user {id} is invalid"))
    };
    let role: Role = row.role.parse().map_err(|e| invalid(format!("{e}")))?;
    User::try_new(
        UserId::from_uuid(row.id),
        role,
        &row.name,
        &row.email,
        row.phone.as_deref(),
    )
    .map_err(|e| invalid(format!("{e}")))
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut statement = users::table
            .select(UserRow::as_select())
            .order((users::name.asc(), users::id.asc()))
            .into_boxed();
        if let Some(role) = role {
            statement = statement.filter(users::role.eq(role.as_str()));
        }
        let rows = statement.load(&mut conn).await.map_err(diesel_error)?;
        rows_to_users(rows)
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = UserProfileChangeset {
            name: user.name(),
            phone: user.phone(),
            updated_at: Utc::now(),
        };
        let affected = diesel::update(users::table.filter(users::id.eq(*user.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected == 1)
    }
}
