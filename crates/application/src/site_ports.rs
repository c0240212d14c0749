use async_trait::async_trait;
use wayfare_core::{ActorId, AppResult, SiteId};
use wayfare_domain::Site;

/// Repository port for sites.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Lists sites the actor owns or holds an active membership in,
    /// newest created first.
    async fn list_sites_for_actor(&self, actor_id: ActorId) -> AppResult<Vec<Site>>;

    /// Finds one site by id.
    async fn find_site(&self, site_id: SiteId) -> AppResult<Option<Site>>;

    /// Inserts a new site. Fails with `Conflict` when the slug is taken.
    async fn create_site(&self, site: &Site) -> AppResult<()>;

    /// Persists name, slug and theme of an existing site.
    async fn update_site(&self, site: &Site) -> AppResult<()>;

    /// Deletes a site together with its memberships and menus.
    async fn delete_site(&self, site_id: SiteId) -> AppResult<()>;
}

/// Durable per-actor storage of the selected site.
#[async_trait]
pub trait ActiveSiteStore: Send + Sync {
    /// Loads the persisted selection.
    async fn load_active_site(&self, actor_id: ActorId) -> AppResult<Option<SiteId>>;

    /// Persists the selection.
    async fn save_active_site(&self, actor_id: ActorId, site_id: SiteId) -> AppResult<()>;

    /// Removes the selection.
    async fn clear_active_site(&self, actor_id: ActorId) -> AppResult<()>;
}
