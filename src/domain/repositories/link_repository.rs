//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing rotation links.
///
/// The implementation behind this trait is the only authoritative source of
/// link state; the rotation cache is always subordinate and rebuildable from
/// it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link with its destinations (positions assigned `0..N`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds an active link by its public key, destinations included, ordered
    /// by position.
    ///
    /// This is the hot-path fallback behind the rotation cache: inactive links
    /// resolve to `None` exactly like missing ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_key(&self, key: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by id regardless of active state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists all links, newest first, destinations included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Applies a partial update.
    ///
    /// When `update.destination_urls` is `Some`, the destination rows are
    /// replaced wholesale inside one transaction: old rows deleted, new rows
    /// inserted with positions `0..N` and zeroed click counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id`.
    /// Returns [`AppError::Conflict`] if a key rename collides.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError>;

    /// Deletes a link and its destinations. Click rows are kept for analytics.
    ///
    /// Returns `Ok(true)` if the link existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap connectivity probe for the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
