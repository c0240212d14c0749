use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_application::ActiveSiteStore;
use wayfare_core::{ActorId, AppError, AppResult, SiteId};

/// PostgreSQL-backed store of each actor's selected site.
#[derive(Clone)]
pub struct PostgresActiveSiteStore {
    pool: PgPool,
}

impl PostgresActiveSiteStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActiveSiteStore for PostgresActiveSiteStore {
    async fn load_active_site(&self, actor_id: ActorId) -> AppResult<Option<SiteId>> {
        let site_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT site_id FROM active_site_selections WHERE actor_id = $1",
        )
        .bind(actor_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load active site: {error}")))?;

        Ok(site_id.map(SiteId::from_uuid))
    }

    async fn save_active_site(&self, actor_id: ActorId, site_id: SiteId) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO active_site_selections (actor_id, site_id, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (actor_id)
            DO UPDATE SET site_id = EXCLUDED.site_id, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(actor_id.as_uuid())
        .bind(site_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save active site: {error}")))?;

        Ok(())
    }

    async fn clear_active_site(&self, actor_id: ActorId) -> AppResult<()> {
        sqlx::query("DELETE FROM active_site_selections WHERE actor_id = $1")
            .bind(actor_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear active site: {error}"))
            })?;

        Ok(())
    }
}
