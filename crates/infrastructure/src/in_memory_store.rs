use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;
use wayfare_application::AuditEvent;
use wayfare_core::{ActorId, SiteId};
use wayfare_domain::{ContentKind, LinkedContent, Membership, MembershipId, Menu, MenuId, Site};

mod audit;
mod content;
mod memberships;
mod menus;
mod selections;
mod sites;


/// In-memory implementation of every storage port.
///
/// Deleting a site removes its memberships, menus, content and selections.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sites: RwLock<HashMap<SiteId, Site>>,
    memberships: RwLock<HashMap<MembershipId, Membership>>,
    menus: RwLock<HashMap<MenuId, Menu>>,
    selections: RwLock<HashMap<String, SiteId>>,
    content: RwLock<HashMap<(SiteId, ContentKind, Uuid), LinkedContent>>,
    audit_events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page or post for menu item derivation.
    pub async fn insert_content(
        &self,
        site_id: SiteId,
        content_id: Uuid,
        content: LinkedContent,
    ) {
        self.content
            .write()
            .await
            .insert((site_id, content.kind(), content_id), content);
    }

    /// Returns the recorded audit events in append order.
    pub async fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit_events.read().await.clone()
    }
}

fn selection_key(actor_id: ActorId) -> String {
    format!("active_site:{actor_id}")
}
