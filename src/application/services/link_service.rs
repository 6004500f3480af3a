//! Administrative link management service.
//!
//! The collaborator surface around the rotation engine: create, update,
//! rename, and delete links, honoring the invalidation contract — every
//! mutation that can affect rotation purges the cache before acknowledging.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::invalidator::CacheInvalidator;
use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service for managing rotation links.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    invalidator: Arc<CacheInvalidator>,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>, invalidator: Arc<CacheInvalidator>) -> Self {
        Self { links, invalidator }
    }

    /// Creates a new link. No invalidation needed: a fresh key starts cold.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key is already taken.
    pub async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.links.create(new_link).await
    }

    /// Fetches a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get(&self, id: i64) -> Result<Link, AppError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Lists all links, newest first.
    pub async fn list(&self) -> Result<Vec<Link>, AppError> {
        self.links.list().await
    }

    /// Applies a partial update, then purges the cache for every affected key
    /// before returning — the old key always, and the new key on rename (the
    /// renamed key usually starts cold, but a concurrent request may already
    /// have warmed it).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id`, or
    /// [`AppError::Conflict`] on a key collision.
    pub async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        let existing = self.get(id).await?;

        let updated = self.links.update(id, update).await?;

        self.invalidator.purge(&existing.key).await;
        if updated.key != existing.key {
            self.invalidator.purge(&updated.key).await;
        }

        Ok(updated)
    }

    /// Deletes a link and purges its cache entries before returning. Click
    /// rows are kept for analytics and expire via retention.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id`.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let existing = self.get(id).await?;

        // Delete first so a racing resolver cannot repopulate the snapshot
        // from a row that is about to vanish.
        let deleted = self.links.delete(id).await?;
        self.invalidator.purge(&existing.key).await;

        if !deleted {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }
}
