//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::{Destination, Link, LinkUpdate, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for links and their destinations.
///
/// Destinations live in their own table keyed by `link_id` with a dense
/// zero-based `position`. Wholesale replacement on update happens inside one
/// transaction so the resolver never observes a half-replaced set.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    key: String,
    name: String,
    is_active: bool,
    total_clicks: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(sqlx::FromRow)]
struct DestinationRow {
    id: i64,
    link_id: i64,
    url: String,
    position: i32,
    click_count: i64,
}

impl From<DestinationRow> for Destination {
    fn from(r: DestinationRow) -> Self {
        Destination {
            id: r.id,
            link_id: r.link_id,
            url: r.url,
            position: r.position,
            click_count: r.click_count,
        }
    }
}

impl LinkRow {
    fn into_link(self, destinations: Vec<Destination>) -> Link {
        Link {
            id: self.id,
            key: self.key,
            name: self.name,
            is_active: self.is_active,
            total_clicks: self.total_clicks,
            destinations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_destinations(&self, link_id: i64) -> Result<Vec<Destination>, AppError> {
        let rows = sqlx::query_as::<_, DestinationRow>(
            r#"
            SELECT id, link_id, url, position, click_count
            FROM destinations
            WHERE link_id = $1
            ORDER BY position
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Destination::from).collect())
    }

    /// Inserts destination rows with positions `0..N` and zeroed counters.
    async fn insert_destinations(
        tx: &mut Transaction<'_, Postgres>,
        link_id: i64,
        urls: &[String],
    ) -> Result<(), AppError> {
        for (position, url) in urls.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO destinations (link_id, url, position, click_count)
                VALUES ($1, $2, $3, 0)
                "#,
            )
            .bind(link_id)
            .bind(url)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (key, name)
            VALUES ($1, $2)
            RETURNING id, key, name, is_active, total_clicks, created_at, updated_at
            "#,
        )
        .bind(&new_link.key)
        .bind(&new_link.name)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_destinations(&mut tx, row.id, &new_link.destination_urls).await?;

        tx.commit().await?;

        let destinations = self.load_destinations(row.id).await?;
        Ok(row.into_link(destinations))
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, key, name, is_active, total_clicks, created_at, updated_at
            FROM links
            WHERE key = $1 AND is_active = TRUE
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => {
                let destinations = self.load_destinations(row.id).await?;
                Ok(Some(row.into_link(destinations)))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, key, name, is_active, total_clicks, created_at, updated_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => {
                let destinations = self.load_destinations(row.id).await?;
                Ok(Some(row.into_link(destinations)))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, key, name, is_active, total_clicks, created_at, updated_at
            FROM links
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut links = Vec::with_capacity(rows.len());
        for row in rows {
            let destinations = self.load_destinations(row.id).await?;
            links.push(row.into_link(destinations));
        }
        Ok(links)
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET key = COALESCE($2, key),
                name = COALESCE($3, name),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, key, name, is_active, total_clicks, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.key.as_deref())
        .bind(update.name.as_deref())
        .bind(update.is_active)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if let Some(urls) = &update.destination_urls {
            // Wholesale replacement: positions renumbered, click counters reset.
            sqlx::query("DELETE FROM destinations WHERE link_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            Self::insert_destinations(&mut tx, id, urls).await?;
        }

        tx.commit().await?;

        let destinations = self.load_destinations(id).await?;
        Ok(row.into_link(destinations))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        // Destinations cascade via FK; click rows are kept for analytics.
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
