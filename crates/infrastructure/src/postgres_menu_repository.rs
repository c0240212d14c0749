use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use wayfare_application::MenuRepository;
use wayfare_core::{AppError, AppResult, SiteId};
use wayfare_domain::{Menu, MenuId, MenuItem, MenuLocation};

/// PostgreSQL-backed menu repository storing item trees as JSONB.
#[derive(Clone)]
pub struct PostgresMenuRepository {
    pool: PgPool,
}

impl PostgresMenuRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuRow {
    id: Uuid,
    site_id: Uuid,
    name: String,
    location: String,
    items: Value,
    version: i64,
    updated_at: DateTime<Utc>,
}

impl MenuRow {
    fn into_menu(self) -> AppResult<Menu> {
        let items: Vec<MenuItem> = serde_json::from_value(self.items).map_err(|error| {
            AppError::Internal(format!("menu '{}' has malformed items: {error}", self.id))
        })?;
        let version = u64::try_from(self.version).map_err(|error| {
            AppError::Internal(format!("menu '{}' has invalid version: {error}", self.id))
        })?;

        Menu::new(
            MenuId::from_uuid(self.id),
            SiteId::from_uuid(self.site_id),
            self.name,
            MenuLocation::parse(self.location.as_str())?,
            items,
            version,
            self.updated_at,
        )
    }
}

fn items_value(menu: &Menu) -> AppResult<Value> {
    serde_json::to_value(menu.items()).map_err(|error| {
        AppError::Internal(format!(
            "failed to serialize items of menu '{}': {error}",
            menu.id()
        ))
    })
}

fn version_param(version: u64) -> AppResult<i64> {
    i64::try_from(version)
        .map_err(|error| AppError::Validation(format!("invalid menu version {version}: {error}")))
}

#[async_trait]
impl MenuRepository for PostgresMenuRepository {
    async fn list_menus(&self, site_id: SiteId) -> AppResult<Vec<Menu>> {
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, site_id, name, location, items, version, updated_at
            FROM menus
            WHERE site_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(site_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list menus: {error}")))?;

        rows.into_iter().map(MenuRow::into_menu).collect()
    }

    async fn find_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<Option<Menu>> {
        let row = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, site_id, name, location, items, version, updated_at
            FROM menus
            WHERE id = $1 AND site_id = $2
            "#,
        )
        .bind(menu_id.as_uuid())
        .bind(site_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find menu: {error}")))?;

        row.map(MenuRow::into_menu).transpose()
    }

    async fn create_menu(&self, menu: &Menu) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO menus (id, site_id, name, location, items, version, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(menu.id().as_uuid())
        .bind(menu.site_id().as_uuid())
        .bind(menu.name().as_str())
        .bind(menu.location().as_str())
        .bind(items_value(menu)?)
        .bind(version_param(menu.version())?)
        .bind(menu.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create menu: {error}")))?;

        Ok(())
    }

    async fn save_menu(&self, menu: &Menu, expected_version: Option<u64>) -> AppResult<Menu> {
        let expected_version = expected_version.map(version_param).transpose()?;
        let row = sqlx::query_as::<_, MenuRow>(
            r#"
            UPDATE menus
            SET name = $3,
                location = $4,
                items = $5,
                version = version + 1,
                updated_at = now()
            WHERE id = $1
              AND site_id = $2
              AND ($6::BIGINT IS NULL OR version = $6)
            RETURNING id, site_id, name, location, items, version, updated_at
            "#,
        )
        .bind(menu.id().as_uuid())
        .bind(menu.site_id().as_uuid())
        .bind(menu.name().as_str())
        .bind(menu.location().as_str())
        .bind(items_value(menu)?)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save menu: {error}")))?;

        if let Some(row) = row {
            return row.into_menu();
        }

        let stored_version = sqlx::query_scalar::<_, i64>(
            "SELECT version FROM menus WHERE id = $1 AND site_id = $2",
        )
        .bind(menu.id().as_uuid())
        .bind(menu.site_id().as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read menu version: {error}")))?;

        match stored_version {
            Some(stored_version) => Err(AppError::Conflict(format!(
                "menu '{}' was saved elsewhere (expected version {}, found {stored_version})",
                menu.id(),
                expected_version.unwrap_or_default()
            ))),
            None => Err(AppError::NotFound(format!(
                "menu '{}' not found in site '{}'",
                menu.id(),
                menu.site_id()
            ))),
        }
    }

    async fn delete_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1 AND site_id = $2")
            .bind(menu_id.as_uuid())
            .bind(site_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete menu: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "menu '{menu_id}' not found in site '{site_id}'"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
