use std::sync::Arc;

use wayfare_application::{
    ActiveSiteStore, AuditRepository, AuthorizationService, IdentityProvider, MenuService,
    SiteContext, SiteRepository, TeamService,
};
use wayfare_core::{ActorIdentity, AppResult, SiteId};
use wayfare_domain::Site;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub site_repository: Arc<dyn SiteRepository>,
    pub active_site_store: Arc<dyn ActiveSiteStore>,
    pub audit_repository: Arc<dyn AuditRepository>,
    pub authorization_service: AuthorizationService,
    pub team_service: TeamService,
    pub menu_service: MenuService,
}

impl AppState {
    /// Builds a site context for one request and loads the actor's sites.
    pub async fn site_context(&self, actor: &ActorIdentity) -> AppResult<SiteContext> {
        let context = SiteContext::new(
            self.site_repository.clone(),
            self.active_site_store.clone(),
            self.authorization_service.clone(),
            self.audit_repository.clone(),
        );
        context.init(actor.clone()).await?;
        Ok(context)
    }

    /// Returns a site the actor can see, or `NotFound`.
    pub async fn visible_site(&self, actor: &ActorIdentity, site_id: SiteId) -> AppResult<Site> {
        self.site_context(actor).await?.site(site_id).await
    }
}
