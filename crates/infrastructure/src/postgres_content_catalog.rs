use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use wayfare_application::ContentCatalog;
use wayfare_core::{AppError, AppResult, SiteId};
use wayfare_domain::{ContentKind, LinkedContent};

/// Reads page and post titles and slugs for menu item derivation.
#[derive(Clone)]
pub struct PostgresContentCatalog {
    pool: PgPool,
}

impl PostgresContentCatalog {
    /// Creates a catalog with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    title: String,
    slug: String,
}

#[async_trait]
impl ContentCatalog for PostgresContentCatalog {
    async fn find_content(
        &self,
        site_id: SiteId,
        kind: ContentKind,
        content_id: Uuid,
    ) -> AppResult<Option<LinkedContent>> {
        let statement = match kind {
            ContentKind::Page => "SELECT title, slug FROM pages WHERE id = $1 AND site_id = $2",
            ContentKind::Post => "SELECT title, slug FROM posts WHERE id = $1 AND site_id = $2",
        };

        let row = sqlx::query_as::<_, ContentRow>(statement)
            .bind(content_id)
            .bind(site_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find content: {error}")))?;

        row.map(|row| LinkedContent::new(kind, row.title, row.slug))
            .transpose()
    }
}
