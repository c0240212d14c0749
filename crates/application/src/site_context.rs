use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use wayfare_core::{ActorIdentity, AppError, AppResult, SiteId};
use wayfare_domain::{AuditAction, Capability, Site, SitePatch};

use crate::{ActiveSiteStore, AuditEvent, AuditRepository, AuthorizationService, SiteRepository};

#[derive(Debug, Clone)]
struct SiteSession {
    actor: ActorIdentity,
    sites: Vec<Site>,
    active_site_id: Option<SiteId>,
}

impl SiteSession {
    fn active_site(&self) -> Option<&Site> {
        let active_site_id = self.active_site_id?;
        self.sites.iter().find(|site| site.id() == active_site_id)
    }
}

/// Signed-in actor's view of their sites and the active selection.
///
/// Holds no session until [`SiteContext::init`] runs. Clones share the
/// same session.
#[derive(Clone)]
pub struct SiteContext {
    site_repository: Arc<dyn SiteRepository>,
    active_site_store: Arc<dyn ActiveSiteStore>,
    authorization_service: AuthorizationService,
    audit_repository: Arc<dyn AuditRepository>,
    session: Arc<RwLock<Option<SiteSession>>>,
}

impl SiteContext {
    /// Creates a context without a session.
    #[must_use]
    pub fn new(
        site_repository: Arc<dyn SiteRepository>,
        active_site_store: Arc<dyn ActiveSiteStore>,
        authorization_service: AuthorizationService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            site_repository,
            active_site_store,
            authorization_service,
            audit_repository,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Loads the actor's sites and restores the persisted selection.
    ///
    /// Falls back to the newest site when the persisted one is gone.
    pub async fn init(&self, actor: ActorIdentity) -> AppResult<()> {
        let actor_id = actor.actor_id();
        let sites = self.site_repository.list_sites_for_actor(actor_id).await?;
        let persisted = self.active_site_store.load_active_site(actor_id).await?;

        let active_site_id = persisted
            .filter(|site_id| sites.iter().any(|site| site.id() == *site_id))
            .or_else(|| sites.first().map(Site::id));

        *self.session.write().await = Some(SiteSession {
            actor,
            sites,
            active_site_id,
        });
        Ok(())
    }

    /// Drops the in-memory session. The persisted selection is kept.
    pub async fn teardown(&self) {
        *self.session.write().await = None;
    }

    /// Re-initializes the context after sign-in, sign-out or account switch.
    pub async fn on_auth_change(&self, actor: Option<ActorIdentity>) -> AppResult<()> {
        self.teardown().await;
        match actor {
            Some(actor) => self.init(actor).await,
            None => Ok(()),
        }
    }

    /// Returns the signed-in actor.
    pub async fn actor(&self) -> AppResult<ActorIdentity> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.actor.clone())
            .ok_or_else(|| AppError::Unauthorized("no signed-in actor".to_owned()))
    }

    /// Lists sites the actor owns or belongs to, newest first.
    pub async fn list_sites(&self) -> AppResult<Vec<Site>> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.sites.clone())
            .ok_or_else(|| AppError::Unauthorized("no signed-in actor".to_owned()))
    }

    /// Returns the selected site, if any.
    pub async fn active_site(&self) -> Option<Site> {
        self.session
            .read()
            .await
            .as_ref()
            .and_then(SiteSession::active_site)
            .cloned()
    }

    /// Returns one of the actor's sites.
    pub async fn site(&self, site_id: SiteId) -> AppResult<Site> {
        self.list_sites()
            .await?
            .into_iter()
            .find(|site| site.id() == site_id)
            .ok_or_else(|| AppError::NotFound(format!("site '{site_id}' not found")))
    }

    /// Selects one of the actor's sites and persists the choice.
    pub async fn set_active_site(&self, site_id: SiteId) -> AppResult<Site> {
        let actor = self.actor().await?;
        let site = self.site(site_id).await?;

        self.active_site_store
            .save_active_site(actor.actor_id(), site_id)
            .await?;
        self.select(site_id).await;

        Ok(site)
    }

    /// Creates a site owned by the actor and makes it active.
    pub async fn create_site(&self, name: &str, slug: &str) -> AppResult<Site> {
        let actor = self.actor().await?;
        let site = Site::new(
            SiteId::new(),
            actor.actor_id(),
            name,
            slug,
            None,
            Utc::now(),
        )?;

        self.site_repository.create_site(&site).await?;
        info!(site_id = %site.id(), actor_id = %actor.actor_id(), "site created");

        self.refresh(&actor).await?;
        let site = self.set_active_site(site.id()).await?;
        self.append_audit(&actor, &site, AuditAction::SiteCreated, None)
            .await;

        Ok(site)
    }

    /// Applies a settings patch to a site.
    pub async fn update_site(&self, site_id: SiteId, patch: &SitePatch) -> AppResult<Site> {
        let actor = self.actor().await?;
        let site = self.site(site_id).await?;
        self.authorization_service
            .require_capability(actor.actor_id(), &site, Capability::ManageSettings)
            .await?;

        if patch.is_empty() {
            return Ok(site);
        }

        let updated = site.apply_patch(patch)?;
        self.site_repository.update_site(&updated).await?;

        if let Some(session) = self.session.write().await.as_mut()
            && let Some(cached) = session.sites.iter_mut().find(|cached| cached.id() == site_id)
        {
            *cached = updated.clone();
        }

        self.append_audit(
            &actor,
            &updated,
            AuditAction::SiteUpdated,
            Some(format!("slug='{}' theme='{}'", updated.slug().as_str(), updated.theme())),
        )
        .await;

        Ok(updated)
    }

    /// Deletes a site. The newest remaining site becomes active when the
    /// deleted one was selected.
    pub async fn delete_site(&self, site_id: SiteId) -> AppResult<()> {
        let actor = self.actor().await?;
        let site = self.site(site_id).await?;
        self.authorization_service
            .require_capability(actor.actor_id(), &site, Capability::DeleteSite)
            .await?;

        let was_active = self
            .active_site()
            .await
            .is_some_and(|active| active.id() == site_id);

        self.site_repository.delete_site(site_id).await?;
        info!(site_id = %site_id, actor_id = %actor.actor_id(), "site deleted");

        match self.refresh(&actor).await? {
            Some(fallback_id) => {
                self.active_site_store
                    .save_active_site(actor.actor_id(), fallback_id)
                    .await?;
            }
            None if was_active => {
                self.active_site_store
                    .clear_active_site(actor.actor_id())
                    .await?;
            }
            None => {}
        }

        self.append_audit(&actor, &site, AuditAction::SiteDeleted, None)
            .await;

        Ok(())
    }

    /// Reloads the site list. When the selection left the list the newest
    /// site is selected and its id returned.
    async fn refresh(&self, actor: &ActorIdentity) -> AppResult<Option<SiteId>> {
        let sites = self
            .site_repository
            .list_sites_for_actor(actor.actor_id())
            .await
            .inspect_err(|error| {
                warn!(actor_id = %actor.actor_id(), %error, "failed to refresh site list");
            })?;

        let mut guard = self.session.write().await;
        let Some(session) = guard.as_mut() else {
            return Ok(None);
        };

        session.sites = sites;
        if session.active_site().is_none() {
            session.active_site_id = session.sites.first().map(Site::id);
            return Ok(session.active_site_id);
        }

        Ok(None)
    }

    async fn select(&self, site_id: SiteId) {
        if let Some(session) = self.session.write().await.as_mut() {
            session.active_site_id = Some(site_id);
        }
    }

    async fn append_audit(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        action: AuditAction,
        detail: Option<String>,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                site_id: site.id(),
                actor_id: actor.actor_id(),
                action,
                resource_type: "site".to_owned(),
                resource_id: site.id().to_string(),
                detail,
            })
            .await;

        if let Err(error) = result {
            warn!(
                site_id = %site.id(),
                action = action.as_str(),
                %error,
                "failed to record audit event"
            );
        }
    }
}

#[cfg(test)]
mod tests;
