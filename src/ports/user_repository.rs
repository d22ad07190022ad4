//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User};

/// Repository port for savers.
///
/// Email is unique. Implementations must back `find_or_create` with the
/// uniqueness constraint so concurrent registrations for one email converge
/// on a single row.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the stored user for `candidate.email`, inserting `candidate`
    /// if none exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn find_or_create(&self, candidate: User) -> Result<User, DomainError>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
