//! Hand-written port fakes shared by service tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;
use wayfare_core::{ActorId, ActorIdentity, AppError, AppResult, SiteId};
use wayfare_domain::{
    ContentKind, EmailAddress, LinkedContent, Membership, MembershipId, MembershipStatus, Menu,
    MenuId, Site,
};

use crate::{
    ActiveSiteStore, AuditEvent, AuditRepository, ContentCatalog, MembershipRepository,
    MenuRepository, SiteRepository,
};

pub fn site_owned_by(owner: ActorId, slug: &str) -> Site {
    Site::new(SiteId::new(), owner, slug, slug, None, Utc::now())
        .unwrap_or_else(|_| unreachable!())
}

pub fn identity(email: &str) -> ActorIdentity {
    ActorIdentity::new(ActorId::new(), Some(email.to_owned())).with_verified_email()
}

#[derive(Default)]
pub struct FakeMembershipRepository {
    rows: Mutex<Vec<Membership>>,
}

impl FakeMembershipRepository {
    pub async fn seed(&self, membership: Membership) {
        self.rows.lock().await.push(membership);
    }

    pub async fn rows(&self) -> Vec<Membership> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl MembershipRepository for FakeMembershipRepository {
    async fn list_memberships(&self, site_id: SiteId) -> AppResult<Vec<Membership>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.site_id() == site_id)
            .cloned()
            .collect())
    }

    async fn find_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<Option<Membership>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.site_id() == site_id && row.id() == membership_id)
            .cloned())
    }

    async fn find_active_membership(
        &self,
        site_id: SiteId,
        actor_id: ActorId,
    ) -> AppResult<Option<Membership>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.site_id() == site_id && row.is_bound_to(actor_id))
            .cloned())
    }

    async fn list_pending_invites(&self, email: &EmailAddress) -> AppResult<Vec<Membership>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.status() == MembershipStatus::Pending && row.email() == Some(email))
            .cloned()
            .collect())
    }

    async fn create_membership(&self, membership: &Membership) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let duplicate = rows.iter().any(|row| {
            row.site_id() == membership.site_id()
                && ((row.actor_id().is_some() && row.actor_id() == membership.actor_id())
                    || (row.email().is_some() && row.email() == membership.email()))
        });
        if duplicate {
            return Err(AppError::Conflict("duplicate membership".to_owned()));
        }

        rows.push(membership.clone());
        Ok(())
    }

    async fn update_membership(&self, membership: &Membership) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.site_id() == membership.site_id() && row.id() == membership.id())
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))?;
        *row = membership.clone();
        Ok(())
    }

    async fn delete_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|row| !(row.site_id() == site_id && row.id() == membership_id));
        if rows.len() == before {
            return Err(AppError::NotFound("membership not found".to_owned()));
        }
        Ok(())
    }
}

pub struct FailingMembershipRepository;

fn offline<T>() -> AppResult<T> {
    Err(AppError::Internal("storage offline".to_owned()))
}

#[async_trait]
impl MembershipRepository for FailingMembershipRepository {
    async fn list_memberships(&self, _site_id: SiteId) -> AppResult<Vec<Membership>> {
        offline()
    }

    async fn find_membership(
        &self,
        _site_id: SiteId,
        _membership_id: MembershipId,
    ) -> AppResult<Option<Membership>> {
        offline()
    }

    async fn find_active_membership(
        &self,
        _site_id: SiteId,
        _actor_id: ActorId,
    ) -> AppResult<Option<Membership>> {
        offline()
    }

    async fn list_pending_invites(&self, _email: &EmailAddress) -> AppResult<Vec<Membership>> {
        offline()
    }

    async fn create_membership(&self, _membership: &Membership) -> AppResult<()> {
        offline()
    }

    async fn update_membership(&self, _membership: &Membership) -> AppResult<()> {
        offline()
    }

    async fn delete_membership(
        &self,
        _site_id: SiteId,
        _membership_id: MembershipId,
    ) -> AppResult<()> {
        offline()
    }
}

pub struct FakeSiteRepository {
    sites: Mutex<Vec<Site>>,
    memberships: Arc<FakeMembershipRepository>,
}

impl FakeSiteRepository {
    pub fn new(memberships: Arc<FakeMembershipRepository>) -> Self {
        Self {
            sites: Mutex::new(Vec::new()),
            memberships,
        }
    }

    /// Seeds a site created `age_minutes` ago.
    pub async fn seed(&self, owner: ActorId, slug: &str, age_minutes: i64) -> Site {
        let site = Site::new(
            SiteId::new(),
            owner,
            slug,
            slug,
            None,
            Utc::now() - Duration::minutes(age_minutes),
        )
        .unwrap_or_else(|_| unreachable!());
        self.sites.lock().await.push(site.clone());
        site
    }
}

#[async_trait]
impl SiteRepository for FakeSiteRepository {
    async fn list_sites_for_actor(&self, actor_id: ActorId) -> AppResult<Vec<Site>> {
        let member_of: Vec<SiteId> = self
            .memberships
            .rows()
            .await
            .iter()
            .filter(|row| row.is_bound_to(actor_id))
            .map(Membership::site_id)
            .collect();

        let mut sites: Vec<Site> = self
            .sites
            .lock()
            .await
            .iter()
            .filter(|site| site.is_owned_by(actor_id) || member_of.contains(&site.id()))
            .cloned()
            .collect();
        sites.sort_by_key(|site| std::cmp::Reverse(site.created_at()));
        Ok(sites)
    }

    async fn find_site(&self, site_id: SiteId) -> AppResult<Option<Site>> {
        Ok(self
            .sites
            .lock()
            .await
            .iter()
            .find(|site| site.id() == site_id)
            .cloned())
    }

    async fn create_site(&self, site: &Site) -> AppResult<()> {
        let mut sites = self.sites.lock().await;
        if sites.iter().any(|existing| existing.slug() == site.slug()) {
            return Err(AppError::Conflict(format!(
                "slug '{}' is already taken",
                site.slug().as_str()
            )));
        }
        sites.push(site.clone());
        Ok(())
    }

    async fn update_site(&self, site: &Site) -> AppResult<()> {
        let mut sites = self.sites.lock().await;
        let existing = sites
            .iter_mut()
            .find(|existing| existing.id() == site.id())
            .ok_or_else(|| AppError::NotFound("site not found".to_owned()))?;
        *existing = site.clone();
        Ok(())
    }

    async fn delete_site(&self, site_id: SiteId) -> AppResult<()> {
        self.sites.lock().await.retain(|site| site.id() != site_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeActiveSiteStore {
    selections: Mutex<HashMap<ActorId, SiteId>>,
}

impl FakeActiveSiteStore {
    pub async fn selection(&self, actor_id: ActorId) -> Option<SiteId> {
        self.selections.lock().await.get(&actor_id).copied()
    }
}

#[async_trait]
impl ActiveSiteStore for FakeActiveSiteStore {
    async fn load_active_site(&self, actor_id: ActorId) -> AppResult<Option<SiteId>> {
        Ok(self.selection(actor_id).await)
    }

    async fn save_active_site(&self, actor_id: ActorId, site_id: SiteId) -> AppResult<()> {
        self.selections.lock().await.insert(actor_id, site_id);
        Ok(())
    }

    async fn clear_active_site(&self, actor_id: ActorId) -> AppResult<()> {
        self.selections.lock().await.remove(&actor_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAuditRepository {
    events: Mutex<Vec<AuditEvent>>,
}

impl FakeAuditRepository {
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

pub struct FailingAuditRepository;

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Err(AppError::Internal("audit store offline".to_owned()))
    }
}

#[derive(Default)]
pub struct FakeMenuRepository {
    menus: Mutex<Vec<Menu>>,
}

#[async_trait]
impl MenuRepository for FakeMenuRepository {
    async fn list_menus(&self, site_id: SiteId) -> AppResult<Vec<Menu>> {
        Ok(self
            .menus
            .lock()
            .await
            .iter()
            .filter(|menu| menu.site_id() == site_id)
            .cloned()
            .collect())
    }

    async fn find_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<Option<Menu>> {
        Ok(self
            .menus
            .lock()
            .await
            .iter()
            .find(|menu| menu.site_id() == site_id && menu.id() == menu_id)
            .cloned())
    }

    async fn create_menu(&self, menu: &Menu) -> AppResult<()> {
        self.menus.lock().await.push(menu.clone());
        Ok(())
    }

    async fn save_menu(&self, menu: &Menu, expected_version: Option<u64>) -> AppResult<Menu> {
        let mut menus = self.menus.lock().await;
        let stored = menus
            .iter_mut()
            .find(|stored| stored.site_id() == menu.site_id() && stored.id() == menu.id())
            .ok_or_else(|| AppError::NotFound("menu not found".to_owned()))?;

        if let Some(expected) = expected_version
            && expected != stored.version()
        {
            return Err(AppError::Conflict("stale menu version".to_owned()));
        }

        let saved = Menu::new(
            menu.id(),
            menu.site_id(),
            menu.name().as_str(),
            menu.location(),
            menu.items().to_vec(),
            stored.version() + 1,
            Utc::now(),
        )?;
        *stored = saved.clone();
        Ok(saved)
    }

    async fn delete_menu(&self, site_id: SiteId, menu_id: MenuId) -> AppResult<()> {
        let mut menus = self.menus.lock().await;
        let before = menus.len();
        menus.retain(|menu| !(menu.site_id() == site_id && menu.id() == menu_id));
        if menus.len() == before {
            return Err(AppError::NotFound("menu not found".to_owned()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeContentCatalog {
    entries: HashMap<(SiteId, ContentKind, Uuid), LinkedContent>,
}

impl FakeContentCatalog {
    pub fn with(mut self, site_id: SiteId, content_id: Uuid, content: LinkedContent) -> Self {
        self.entries
            .insert((site_id, content.kind(), content_id), content);
        self
    }
}

#[async_trait]
impl ContentCatalog for FakeContentCatalog {
    async fn find_content(
        &self,
        site_id: SiteId,
        kind: ContentKind,
        content_id: Uuid,
    ) -> AppResult<Option<LinkedContent>> {
        Ok(self.entries.get(&(site_id, kind, content_id)).cloned())
    }
}
