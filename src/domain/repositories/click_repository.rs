//! Repository trait for click tracking and retention.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for click accounting.
///
/// Consumed exclusively by the background click worker and the retention
/// worker; nothing on the redirect hot path awaits these operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, click: NewClick) -> Result<(), AppError>;

    /// Increments the served destination's `click_count` and the owning
    /// link's `total_clicks` in a single conditional statement keyed by
    /// destination id, so concurrent clicks never lose updates.
    ///
    /// A destination that no longer exists (replaced since the redirect was
    /// served) still counts toward the link total, matching the append-only
    /// click record that was already written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_counters(&self, link_id: i64, destination_id: i64)
    -> Result<(), AppError>;

    /// Deletes click records created before `cutoff`, returning the number of
    /// rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;
}
