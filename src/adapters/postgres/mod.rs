//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - savers, keyed by unique email
//! - `PostgresSavingsPlanRepository` - savings plans
//! - `PostgresLedgerRepository` - transactions and atomic settlement

mod ledger_repository;
mod savings_plan_repository;
mod user_repository;

pub use ledger_repository::PostgresLedgerRepository;
pub use savings_plan_repository::PostgresSavingsPlanRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

fn corrupt_row(field: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value in database: {}", field, reason),
    )
}

/// Returns the violated constraint name, if the error is a constraint violation.
fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
