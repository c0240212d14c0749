use async_trait::async_trait;
use chrono::Utc;
use wayfare_application::MenuRepository;
use wayfare_core::{AppError, AppResult, SiteId};
use wayfare_domain::{Menu, MenuId};

use super::InMemoryStore;

#[async_trait]
impl MenuRepository for InMemoryStore {
    async fn list_menus(&self, site_id: SiteId) -> AppResult<Vec<Menu>> {
        let mut menus: Vec<Menu> = self
            .menus
            .read()
            .await
            .values()
            .filter(|menu| menu.site_id() == site_id)
            .cloned()
            .collect();
        menus.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));

        Ok(menus)
    }

    async fn find_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<Option<Menu>> {
        Ok(self
            .menus
            .read()
            .await
            .get(&menu_id)
            .filter(|menu| menu.site_id() == site_id)
            .cloned())
    }

    async fn create_menu(&self, menu: &Menu) -> AppResult<()> {
        let mut menus = self.menus.write().await;
        if menus.contains_key(&menu.id()) {
            return Err(AppError::Conflict(format!(
                "menu '{}' already exists",
                menu.id()
            )));
        }

        menus.insert(menu.id(), menu.clone());
        Ok(())
    }

    async fn save_menu(&self, menu: &Menu, expected_version: Option<u64>) -> AppResult<Menu> {
        let mut menus = self.menus.write().await;
        let stored = menus
            .get_mut(&menu.id())
            .filter(|stored| stored.site_id() == menu.site_id())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "menu '{}' not found in site '{}'",
                    menu.id(),
                    menu.site_id()
                ))
            })?;

        if let Some(expected_version) = expected_version
            && expected_version != stored.version()
        {
            return Err(AppError::Conflict(format!(
                "menu '{}' was saved elsewhere (expected version {expected_version}, found {})",
                menu.id(),
                stored.version()
            )));
        }

        let saved = Menu::new(
            menu.id(),
            menu.site_id(),
            menu.name().as_str(),
            menu.location(),
            menu.items().to_vec(),
            stored.version(),
            stored.updated_at(),
        )?
        .next_version(Utc::now());
        *stored = saved.clone();

        Ok(saved)
    }

    async fn delete_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<()> {
        let mut menus = self.menus.write().await;
        let in_site = menus
            .get(&menu_id)
            .is_some_and(|menu| menu.site_id() == site_id);
        if !in_site {
            return Err(AppError::NotFound(format!(
                "menu '{menu_id}' not found in site '{site_id}'"
            )));
        }

        menus.remove(&menu_id);
        Ok(())
    }
}
