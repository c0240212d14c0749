use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use wayfare_application::SiteRepository;
use wayfare_core::{ActorId, AppError, AppResult, SiteId};
use wayfare_domain::Site;

use crate::is_unique_violation;

/// PostgreSQL-backed site repository.
#[derive(Clone)]
pub struct PostgresSiteRepository {
    pool: PgPool,
}

impl PostgresSiteRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SiteRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    slug: String,
    theme: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SiteRow> for Site {
    type Error = AppError;

    fn try_from(row: SiteRow) -> Result<Self, Self::Error> {
        Site::new(
            SiteId::from_uuid(row.id),
            ActorId::from_uuid(row.owner_id),
            row.name,
            row.slug,
            Some(row.theme),
            row.created_at,
        )
    }
}

fn slug_conflict(site: &Site) -> AppError {
    AppError::Conflict(format!(
        "site slug '{}' is already taken",
        site.slug().as_str()
    ))
}

#[async_trait]
impl SiteRepository for PostgresSiteRepository {
    async fn list_sites_for_actor(&self, actor_id: ActorId) -> AppResult<Vec<Site>> {
        let rows = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT s.id, s.owner_id, s.name, s.slug, s.theme, s.created_at
            FROM sites s
            WHERE s.owner_id = $1
               OR EXISTS (
                    SELECT 1
                    FROM site_memberships m
                    WHERE m.site_id = s.id
                      AND m.actor_id = $1
                      AND m.status = 'active'
               )
            ORDER BY s.created_at DESC, s.id
            "#,
        )
        .bind(actor_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list sites: {error}")))?;

        rows.into_iter().map(Site::try_from).collect()
    }

    async fn find_site(&self, site_id: SiteId) -> AppResult<Option<Site>> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT id, owner_id, name, slug, theme, created_at
            FROM sites
            WHERE id = $1
            "#,
        )
        .bind(site_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find site: {error}")))?;

        row.map(Site::try_from).transpose()
    }

    async fn create_site(&self, site: &Site) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO sites (id, owner_id, name, slug, theme, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(site.id().as_uuid())
        .bind(site.owner_id().as_uuid())
        .bind(site.name().as_str())
        .bind(site.slug().as_str())
        .bind(site.theme())
        .bind(site.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(slug_conflict(site)),
            Err(error) => Err(AppError::Internal(format!(
                "failed to create site: {error}"
            ))),
        }
    }

    async fn update_site(&self, site: &Site) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sites
            SET name = $2, slug = $3, theme = $4
            WHERE id = $1
            "#,
        )
        .bind(site.id().as_uuid())
        .bind(site.name().as_str())
        .bind(site.slug().as_str())
        .bind(site.theme())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound(format!(
                "site '{}' not found",
                site.id()
            ))),
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(slug_conflict(site)),
            Err(error) => Err(AppError::Internal(format!(
                "failed to update site: {error}"
            ))),
        }
    }

    async fn delete_site(&self, site_id: SiteId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sites WHERE id = $1")
            .bind(site_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete site: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("site '{site_id}' not found")));
        }

        Ok(())
    }
}
