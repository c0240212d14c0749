use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use wayfare_application::{
    ActiveSiteStore, AuditRepository, AuthorizationService, ContentCatalog, IdentityProvider,
    MembershipRepository, MenuRepository, MenuService, RoleResolver, SiteRepository, TeamService,
};
use wayfare_core::AppError;
use wayfare_infrastructure::{
    HostedAuthIdentityProvider, InMemoryStore, PostgresActiveSiteStore, PostgresAuditRepository,
    PostgresContentCatalog, PostgresMembershipRepository, PostgresMenuRepository,
    PostgresSiteRepository,
};

use crate::api_config::ApiConfig;
use crate::state::AppState;

/// Storage adapters behind every repository port.
#[derive(Clone)]
pub struct StoragePorts {
    pub sites: Arc<dyn SiteRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub menus: Arc<dyn MenuRepository>,
    pub content: Arc<dyn ContentCatalog>,
    pub selections: Arc<dyn ActiveSiteStore>,
    pub audit: Arc<dyn AuditRepository>,
}

impl StoragePorts {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            sites: Arc::new(PostgresSiteRepository::new(pool.clone())),
            memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
            menus: Arc::new(PostgresMenuRepository::new(pool.clone())),
            content: Arc::new(PostgresContentCatalog::new(pool.clone())),
            selections: Arc::new(PostgresActiveSiteStore::new(pool.clone())),
            audit: Arc::new(PostgresAuditRepository::new(pool.clone())),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            sites: store.clone(),
            memberships: store.clone(),
            menus: store.clone(),
            content: store.clone(),
            selections: store.clone(),
            audit: store,
        }
    }
}

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

pub fn build_identity_provider(config: &ApiConfig) -> Result<Arc<dyn IdentityProvider>, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.auth_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build auth client: {error}")))?;

    Ok(Arc::new(HostedAuthIdentityProvider::new(
        http_client,
        &config.auth_url,
        config.auth_api_key.clone(),
    )))
}

pub fn build_app_state(
    storage: StoragePorts,
    identity_provider: Arc<dyn IdentityProvider>,
) -> AppState {
    let authorization_service =
        AuthorizationService::new(RoleResolver::new(storage.memberships.clone()));

    AppState {
        identity_provider,
        team_service: TeamService::new(
            storage.memberships,
            storage.sites.clone(),
            authorization_service.clone(),
            storage.audit.clone(),
        ),
        menu_service: MenuService::new(
            storage.menus,
            storage.content,
            authorization_service.clone(),
            storage.audit.clone(),
        ),
        site_repository: storage.sites,
        active_site_store: storage.selections,
        audit_repository: storage.audit,
        authorization_service,
    }
}
