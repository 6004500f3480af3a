//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click records and cumulative counters.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (link_id, destination_id, destination_url,
                                ip_address, user_agent, referer)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(click.link_id)
        .bind(click.destination_id)
        .bind(&click.destination_url)
        .bind(click.ip_address.as_deref())
        .bind(click.user_agent.as_deref())
        .bind(click.referer.as_deref())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn increment_counters(
        &self,
        link_id: i64,
        destination_id: i64,
    ) -> Result<(), AppError> {
        // One statement, conditional on the destination id: concurrent clicks
        // produce independent atomic increments, never read-modify-write.
        // The link total is bumped even if the destination was replaced in
        // the meantime, matching the click row already appended.
        sqlx::query(
            r#"
            WITH bumped AS (
                UPDATE destinations
                SET click_count = click_count + 1
                WHERE id = $2 AND link_id = $1
            )
            UPDATE links
            SET total_clicks = total_clicks + 1
            WHERE id = $1
            "#,
        )
        .bind(link_id)
        .bind(destination_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM clicks WHERE created_at < $1")
            .bind(cutoff)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
