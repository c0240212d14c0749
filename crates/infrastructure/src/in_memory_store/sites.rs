use async_trait::async_trait;
use wayfare_application::SiteRepository;
use wayfare_core::{ActorId, AppError, AppResult, SiteId};
use wayfare_domain::Site;

use super::InMemoryStore;

#[async_trait]
impl SiteRepository for InMemoryStore {
    async fn list_sites_for_actor(&self, actor_id: ActorId) -> AppResult<Vec<Site>> {
        let member_of: Vec<SiteId> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|membership| membership.is_bound_to(actor_id))
            .map(|membership| membership.site_id())
            .collect();

        let mut sites: Vec<Site> = self
            .sites
            .read()
            .await
            .values()
            .filter(|site| site.is_owned_by(actor_id) || member_of.contains(&site.id()))
            .cloned()
            .collect();
        sites.sort_by(|left, right| right.created_at().cmp(&left.created_at()));

        Ok(sites)
    }

    async fn find_site(&self, site_id: SiteId) -> AppResult<Option<Site>> {
        Ok(self.sites.read().await.get(&site_id).cloned())
    }

    async fn create_site(&self, site: &Site) -> AppResult<()> {
        let mut sites = self.sites.write().await;
        if sites.values().any(|existing| existing.slug() == site.slug()) {
            return Err(AppError::Conflict(format!(
                "site slug '{}' is already taken",
                site.slug().as_str()
            )));
        }

        sites.insert(site.id(), site.clone());
        Ok(())
    }

    async fn update_site(&self, site: &Site) -> AppResult<()> {
        let mut sites = self.sites.write().await;
        if sites
            .values()
            .any(|existing| existing.id() != site.id() && existing.slug() == site.slug())
        {
            return Err(AppError::Conflict(format!(
                "site slug '{}' is already taken",
                site.slug().as_str()
            )));
        }

        let stored = sites
            .get_mut(&site.id())
            .ok_or_else(|| AppError::NotFound(format!("site '{}' not found", site.id())))?;
        *stored = site.clone();
        Ok(())
    }

    async fn delete_site(&self, site_id: SiteId) -> AppResult<()> {
        if self.sites.write().await.remove(&site_id).is_none() {
            return Err(AppError::NotFound(format!("site '{site_id}' not found")));
        }

        self.memberships
            .write()
            .await
            .retain(|_, membership| membership.site_id() != site_id);
        self.menus
            .write()
            .await
            .retain(|_, menu| menu.site_id() != site_id);
        self.content
            .write()
            .await
            .retain(|(stored_site_id, _, _), _| *stored_site_id != site_id);
        self.selections
            .write()
            .await
            .retain(|_, selected| *selected != site_id);

        Ok(())
    }
}
