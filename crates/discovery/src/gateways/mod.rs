//! Favorites and review gateways.
//!
//! All favorite/review mutations go through these two types; the
//! authorization rule (only the author of a review may change it) is
//! enforced here, not in the repositories and not in the embedding
//! application. There is no ambient "current user" - every operation takes
//! the acting [`nearbite_core::UserId`] explicitly.

pub mod favorites;
pub mod reviews;

pub use favorites::FavoritesGateway;
pub use reviews::{AuthorReviews, ReviewsGateway};

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur in the favorites/reviews gateways.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The caller is not allowed to perform this operation on this row.
    #[error("only the author may modify this review")]
    Forbidden,

    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// The store failed underneath.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Translate a foreign-key failure into `NotFound`.
///
/// Creating a review or favorite against a user, restaurant, or item that
/// isn't in the store trips the FK constraint; callers should see that as
/// "no such target", not as a database fault.
fn map_missing_target(e: RepositoryError) -> GatewayError {
    if let RepositoryError::Database(sqlx::Error::Database(ref db_err)) = e
        && db_err.is_foreign_key_violation()
    {
        return GatewayError::NotFound;
    }
    e.into()
}
