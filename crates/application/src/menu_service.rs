use std::sync::Arc;

use tracing::{info, warn};
use wayfare_core::{ActorIdentity, AppError, AppResult};
use wayfare_domain::{
    AuditAction, Capability, Menu, MenuId, MenuItem, MenuItemDraft, MenuItemId, MenuLocation,
    Site,
};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, ContentCatalog, DeriveMenuItemInput,
    MenuRepository, SaveMenuInput,
};

/// Application service for site navigation menus.
#[derive(Clone)]
pub struct MenuService {
    menu_repository: Arc<dyn MenuRepository>,
    content_catalog: Arc<dyn ContentCatalog>,
    authorization_service: AuthorizationService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl MenuService {
    /// Creates a new menu service.
    #[must_use]
    pub fn new(
        menu_repository: Arc<dyn MenuRepository>,
        content_catalog: Arc<dyn ContentCatalog>,
        authorization_service: AuthorizationService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            menu_repository,
            content_catalog,
            authorization_service,
            audit_repository,
        }
    }

    /// Lists menus of a site.
    pub async fn list_menus(&self, actor: &ActorIdentity, site: &Site) -> AppResult<Vec<Menu>> {
        self.authorization_service
            .require_role(actor.actor_id(), site)
            .await?;

        self.menu_repository.list_menus(site.id()).await
    }

    /// Returns one menu of a site.
    pub async fn get_menu(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        menu_id: MenuId,
    ) -> AppResult<Menu> {
        self.authorization_service
            .require_role(actor.actor_id(), site)
            .await?;

        self.find_menu(site, menu_id).await
    }

    /// Creates an empty menu.
    pub async fn create_menu(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        name: &str,
        location: MenuLocation,
    ) -> AppResult<Menu> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageMenus)
            .await?;

        let menu = Menu::create(site.id(), name, location)?;
        self.menu_repository.create_menu(&menu).await?;
        self.append_audit(actor, &menu, AuditAction::MenuCreated, None)
            .await;

        Ok(menu)
    }

    /// Replaces name, location and the whole item tree of a menu.
    pub async fn save_menu(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        menu_id: MenuId,
        input: SaveMenuInput,
    ) -> AppResult<Menu> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageMenus)
            .await?;

        let mut menu = self.find_menu(site, menu_id).await?;
        menu.rename(input.name)?;
        menu.relocate(input.location);
        menu.replace_items(input.items)?;

        let saved = self
            .menu_repository
            .save_menu(&menu, input.expected_version)
            .await?;
        self.append_audit(
            actor,
            &saved,
            AuditAction::MenuSaved,
            Some(format!("version={}", saved.version())),
        )
        .await;
        info!(
            site_id = %site.id(),
            menu_id = %menu_id,
            version = saved.version(),
            "menu saved"
        );

        Ok(saved)
    }

    /// Deletes a menu.
    pub async fn delete_menu(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        menu_id: MenuId,
    ) -> AppResult<()> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageMenus)
            .await?;

        let menu = self.find_menu(site, menu_id).await?;
        self.menu_repository.delete_menu(site.id(), menu_id).await?;
        self.append_audit(actor, &menu, AuditAction::MenuDeleted, None)
            .await;

        Ok(())
    }

    /// Builds a menu item whose label and url come from a page or post.
    pub async fn derive_item(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        input: DeriveMenuItemInput,
    ) -> AppResult<MenuItem> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageMenus)
            .await?;

        let content = self
            .content_catalog
            .find_content(site.id(), input.kind, input.content_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} '{}' not found in site '{}'",
                    input.kind.item_type().as_str(),
                    input.content_id,
                    site.id()
                ))
            })?;

        let mut draft = MenuItemDraft::new(MenuItemId::generate());
        draft.link_content(&content)?;
        draft.set_target(input.target);
        draft.into_item()
    }

    async fn find_menu(&self, site: &Site, menu_id: MenuId) -> AppResult<Menu> {
        self.menu_repository
            .find_menu(site.id(), menu_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "menu '{menu_id}' not found in site '{}'",
                    site.id()
                ))
            })
    }

    async fn append_audit(
        &self,
        actor: &ActorIdentity,
        menu: &Menu,
        action: AuditAction,
        detail: Option<String>,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                site_id: menu.site_id(),
                actor_id: actor.actor_id(),
                action,
                resource_type: "menu".to_owned(),
                resource_id: menu.id().to_string(),
                detail,
            })
            .await;

        if let Err(error) = result {
            warn!(
                site_id = %menu.site_id(),
                action = action.as_str(),
                %error,
                "failed to record audit event"
            );
        }
    }
}
