use async_trait::async_trait;
use wayfare_application::{AuditEvent, AuditRepository};
use wayfare_core::AppResult;

use super::InMemoryStore;

#[async_trait]
impl AuditRepository for InMemoryStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.audit_events.write().await.push(event);
        Ok(())
    }
}
