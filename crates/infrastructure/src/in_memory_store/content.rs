use async_trait::async_trait;
use uuid::Uuid;
use wayfare_application::ContentCatalog;
use wayfare_core::{AppResult, SiteId};
use wayfare_domain::{ContentKind, LinkedContent};

use super::InMemoryStore;

#[async_trait]
impl ContentCatalog for InMemoryStore {
    async fn find_content(
        &self,
        site_id: SiteId,
        kind: ContentKind,
        content_id: Uuid,
    ) -> AppResult<Option<LinkedContent>> {
        Ok(self
            .content
            .read()
            .await
            .get(&(site_id, kind, content_id))
            .cloned())
    }
}
