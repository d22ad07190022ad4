//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{Email, User, WalletAddress};
use crate::ports::UserRepository;

use super::{corrupt_row, db_error};

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    wallet_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email).map_err(|e| corrupt_row("email", e))?;
        let wallet_address = row
            .wallet_address
            .map(|w| WalletAddress::new(w).map_err(|e| corrupt_row("wallet_address", e)))
            .transpose()?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email,
            name: row.name,
            wallet_address,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_USER: &str = "SELECT id, email, name, wallet_address, created_at FROM users";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_or_create(&self, candidate: User) -> Result<User, DomainError> {
        // A concurrent registration for the same email loses the insert and
        // reads the winner's row.
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, wallet_address, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(candidate.id.as_uuid())
        .bind(candidate.email.as_str())
        .bind(&candidate.name)
        .bind(candidate.wallet_address.as_ref().map(|w| w.as_str()))
        .bind(candidate.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert user", e))?;

        let row: UserRow = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(candidate.email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load user", e))?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by email", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by id", e))?;

        row.map(User::try_from).transpose()
    }
}
