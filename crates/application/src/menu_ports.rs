use async_trait::async_trait;
use uuid::Uuid;
use wayfare_core::{AppResult, SiteId};
use wayfare_domain::{
    ContentKind, LinkTarget, LinkedContent, Menu, MenuId, MenuItem, MenuLocation,
};

/// Input payload for saving a menu from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveMenuInput {
    /// Menu name.
    pub name: String,
    /// Theme location.
    pub location: MenuLocation,
    /// Full replacement item tree.
    pub items: Vec<MenuItem>,
    /// Version the editor loaded. `None` saves unconditionally.
    pub expected_version: Option<u64>,
}

/// Input payload for deriving a menu item from a page or post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveMenuItemInput {
    /// Kind of content to link.
    pub kind: ContentKind,
    /// Page or post identifier.
    pub content_id: Uuid,
    /// Link target window.
    pub target: LinkTarget,
}

/// Repository port for menus.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Lists menus of a site ordered by name.
    async fn list_menus(&self, site_id: SiteId) -> AppResult<Vec<Menu>>;

    /// Finds one menu of a site.
    async fn find_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<Option<Menu>>;

    /// Inserts a new menu.
    async fn create_menu(&self, menu: &Menu) -> AppResult<()>;

    /// Replaces name, location and items and bumps the stored version.
    ///
    /// With `expected_version` set, fails with `Conflict` when the stored
    /// version differs. Returns the menu as stored.
    async fn save_menu(&self, menu: &Menu, expected_version: Option<u64>) -> AppResult<Menu>;

    /// Deletes a menu of a site. Fails with `NotFound` when no row matches.
    async fn delete_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<()>;
}

/// Read port over the site's pages and posts.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// Finds a page or post of a site.
    async fn find_content(
        &self,
        site_id: SiteId,
        kind: ContentKind,
        content_id: Uuid,
    ) -> AppResult<Option<LinkedContent>>;
}
