use async_trait::async_trait;
use wayfare_application::ActiveSiteStore;
use wayfare_core::{ActorId, AppResult, SiteId};

use super::{InMemoryStore, selection_key};

#[async_trait]
impl ActiveSiteStore for InMemoryStore {
    async fn load_active_site(&self, actor_id: ActorId) -> AppResult<Option<SiteId>> {
        Ok(self
            .selections
            .read()
            .await
            .get(&selection_key(actor_id))
            .copied())
    }

    async fn save_active_site(&self, actor_id: ActorId, site_id: SiteId) -> AppResult<()> {
        self.selections
            .write()
            .await
            .insert(selection_key(actor_id), site_id);
        Ok(())
    }

    async fn clear_active_site(&self, actor_id: ActorId) -> AppResult<()> {
        self.selections
            .write()
            .await
            .remove(&selection_key(actor_id));
        Ok(())
    }
}
