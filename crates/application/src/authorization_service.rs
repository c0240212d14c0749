use wayfare_core::{ActorId, AppError, AppResult};
use wayfare_domain::{Capability, PermissionSet, Role, Site, has_permission};

use crate::{RoleResolution, RoleResolver};

/// Effective role and capabilities of an actor on one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePermissions {
    /// Resolved role, if any.
    pub role: Option<Role>,
    /// Capabilities granted by the role; all false without a role.
    pub permissions: PermissionSet,
}

/// Application service for site-scoped authorization checks.
#[derive(Clone)]
pub struct AuthorizationService {
    role_resolver: RoleResolver,
}

impl AuthorizationService {
    /// Creates a new authorization service from a role resolver.
    #[must_use]
    pub fn new(role_resolver: RoleResolver) -> Self {
        Self { role_resolver }
    }

    /// Returns the actor's role on the site, if any.
    pub async fn effective_role(&self, actor_id: ActorId, site: &Site) -> Option<Role> {
        self.role_resolver.resolve(actor_id, site).await.role()
    }

    /// Returns whether the actor currently has the capability.
    pub async fn has_capability(
        &self,
        actor_id: ActorId,
        site: &Site,
        capability: Capability,
    ) -> bool {
        self.effective_role(actor_id, site)
            .await
            .is_some_and(|role| has_permission(role, capability))
    }

    /// Ensures the actor holds some role on the site and returns it.
    pub async fn require_role(&self, actor_id: ActorId, site: &Site) -> AppResult<Role> {
        match self.role_resolver.resolve(actor_id, site).await {
            RoleResolution::Granted(role) => Ok(role),
            RoleResolution::NoRole => Err(AppError::Forbidden(format!(
                "actor '{actor_id}' has no role on site '{}'",
                site.id()
            ))),
            RoleResolution::Failed(reason) => Err(AppError::Forbidden(format!(
                "role of actor '{actor_id}' on site '{}' could not be resolved: {reason}",
                site.id()
            ))),
        }
    }

    /// Ensures the actor has the capability on the site and returns the role.
    pub async fn require_capability(
        &self,
        actor_id: ActorId,
        site: &Site,
        capability: Capability,
    ) -> AppResult<Role> {
        let role = self.require_role(actor_id, site).await?;
        if !has_permission(role, capability) {
            return Err(AppError::Forbidden(format!(
                "role '{role}' on site '{}' is missing capability '{capability}'",
                site.id()
            )));
        }

        Ok(role)
    }

    /// Returns the role and full permission set for UI gating.
    pub async fn permissions_for(&self, actor_id: ActorId, site: &Site) -> SitePermissions {
        let role = self.effective_role(actor_id, site).await;
        SitePermissions {
            role,
            permissions: role.map_or_else(PermissionSet::none, |role| role.permissions()),
        }
    }
}
