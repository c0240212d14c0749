use std::sync::Arc;

use tracing::warn;
use wayfare_core::ActorId;
use wayfare_domain::{Role, Site};

use crate::MembershipRepository;

/// Outcome of resolving an actor's role on a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolution {
    /// The actor holds this role.
    Granted(Role),
    /// The actor neither owns the site nor holds an active membership.
    NoRole,
    /// Membership lookup failed; treated as no role.
    Failed(String),
}

impl RoleResolution {
    /// Returns the granted role, denying by default.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Granted(role) => Some(*role),
            Self::NoRole | Self::Failed(_) => None,
        }
    }
}

/// Resolves the effective role of an actor on a site.
#[derive(Clone)]
pub struct RoleResolver {
    membership_repository: Arc<dyn MembershipRepository>,
}

impl RoleResolver {
    /// Creates a resolver over a membership repository.
    #[must_use]
    pub fn new(membership_repository: Arc<dyn MembershipRepository>) -> Self {
        Self {
            membership_repository,
        }
    }

    /// Resolves the role. Ownership wins over any membership row.
    pub async fn resolve(&self, actor_id: ActorId, site: &Site) -> RoleResolution {
        if site.is_owned_by(actor_id) {
            return RoleResolution::Granted(Role::Owner);
        }

        match self
            .membership_repository
            .find_active_membership(site.id(), actor_id)
            .await
        {
            Ok(Some(membership)) => RoleResolution::Granted(membership.role()),
            Ok(None) => RoleResolution::NoRole,
            Err(error) => {
                warn!(
                    site_id = %site.id(),
                    actor_id = %actor_id,
                    %error,
                    "role resolution failed"
                );
                RoleResolution::Failed(error.to_string())
            }
        }
    }
}
