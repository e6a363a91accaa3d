//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Email, NewUser, PasswordHash, User, Username};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.password_hash.to_stored())
        .bind(user.created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::UsernameTaken,
                "Username or email already exists",
            ),
            _ => DomainError::database("Failed to insert user", &e),
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::database("Failed to get id", e))?;

        Ok(User::from_new(UserId::from_raw(id), user.clone()))
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::database("Failed to get id", e))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| DomainError::database("Failed to get username", e))?;
    let email: Option<String> = row
        .try_get("email")
        .map_err(|e| DomainError::database("Failed to get email", e))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| DomainError::database("Failed to get password_hash", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::database("Failed to get created_at", e))?;

    let username =
        Username::new(username).map_err(|e| DomainError::database("Invalid stored username", e))?;
    let email =
        Email::optional(email).map_err(|e| DomainError::database("Invalid stored email", e))?;
    let password_hash = PasswordHash::parse(&password_hash)
        .map_err(|e| DomainError::database("Invalid stored password hash", e))?;

    Ok(User::reconstitute(
        UserId::from_raw(id),
        username,
        email,
        password_hash,
        Timestamp::from_datetime(created_at),
    ))
}
