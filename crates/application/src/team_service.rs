use std::sync::Arc;

use tracing::{info, warn};
use wayfare_core::{ActorIdentity, AppError, AppResult};
use wayfare_domain::{AuditAction, Capability, EmailAddress, Membership, MembershipId, Role, Site};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, MembershipRepository, SiteRepository,
};

/// Application service for site team administration.
#[derive(Clone)]
pub struct TeamService {
    membership_repository: Arc<dyn MembershipRepository>,
    site_repository: Arc<dyn SiteRepository>,
    authorization_service: AuthorizationService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TeamService {
    /// Creates a new team service.
    #[must_use]
    pub fn new(
        membership_repository: Arc<dyn MembershipRepository>,
        site_repository: Arc<dyn SiteRepository>,
        authorization_service: AuthorizationService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            membership_repository,
            site_repository,
            authorization_service,
            audit_repository,
        }
    }

    /// Lists members and pending invites of a site, oldest first.
    pub async fn list_members(
        &self,
        actor: &ActorIdentity,
        site: &Site,
    ) -> AppResult<Vec<Membership>> {
        self.authorization_service
            .require_role(actor.actor_id(), site)
            .await?;

        self.membership_repository.list_memberships(site.id()).await
    }

    /// Invites an email address to the site with a role.
    pub async fn add_member(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        email: &str,
        role: Role,
    ) -> AppResult<Membership> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageTeam)
            .await?;
        require_assignable(role)?;

        let email = EmailAddress::new(email)?;
        if actor.email() == Some(email.as_str()) {
            return Err(AppError::Conflict(format!(
                "'{email}' already belongs to site '{}'",
                site.id()
            )));
        }

        let existing = self.membership_repository.list_memberships(site.id()).await?;
        if existing.iter().any(|row| row.email() == Some(&email)) {
            return Err(AppError::Conflict(format!(
                "'{email}' is already invited to or a member of site '{}'",
                site.id()
            )));
        }

        let membership = Membership::invite(site.id(), email, role)?;
        self.membership_repository
            .create_membership(&membership)
            .await?;

        self.append_audit(
            actor,
            site,
            &membership,
            AuditAction::MemberInvited,
            Some(format!("role='{role}'")),
        )
        .await;
        info!(
            site_id = %site.id(),
            membership_id = %membership.id(),
            "member invited"
        );

        Ok(membership)
    }

    /// Changes the role of a row and returns the refreshed member list.
    pub async fn update_member_role(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        membership_id: MembershipId,
        role: Role,
    ) -> AppResult<Vec<Membership>> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageTeam)
            .await?;
        require_assignable(role)?;

        let membership = self.find_modifiable(actor, site, membership_id).await?;
        let updated = membership.with_role(role)?;
        self.membership_repository
            .update_membership(&updated)
            .await?;

        self.append_audit(
            actor,
            site,
            &updated,
            AuditAction::MemberRoleChanged,
            Some(format!("from='{}' to='{role}'", membership.role())),
        )
        .await;

        self.membership_repository.list_memberships(site.id()).await
    }

    /// Removes a row and returns the refreshed member list.
    pub async fn remove_member(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        membership_id: MembershipId,
    ) -> AppResult<Vec<Membership>> {
        self.authorization_service
            .require_capability(actor.actor_id(), site, Capability::ManageTeam)
            .await?;

        let membership = self.find_modifiable(actor, site, membership_id).await?;
        self.membership_repository
            .delete_membership(site.id(), membership_id)
            .await?;

        self.append_audit(actor, site, &membership, AuditAction::MemberRemoved, None)
            .await;
        info!(site_id = %site.id(), membership_id = %membership_id, "member removed");

        self.membership_repository.list_memberships(site.id()).await
    }

    /// Binds every pending invite addressed to the actor's verified email.
    ///
    /// Sites the actor already owns or belongs to are skipped. Returns the
    /// accepted memberships.
    pub async fn accept_pending_invites(
        &self,
        actor: &ActorIdentity,
    ) -> AppResult<Vec<Membership>> {
        let Some(email) = actor.verified_email() else {
            return Ok(Vec::new());
        };
        let email = EmailAddress::new(email)?;
        let actor_id = actor.actor_id();

        let mut accepted = Vec::new();
        for invite in self.membership_repository.list_pending_invites(&email).await? {
            let Some(site) = self.site_repository.find_site(invite.site_id()).await? else {
                continue;
            };

            let already_member = self
                .membership_repository
                .find_active_membership(site.id(), actor_id)
                .await?
                .is_some();
            if site.is_owned_by(actor_id) || already_member {
                warn!(
                    site_id = %site.id(),
                    membership_id = %invite.id(),
                    "skipping invite for actor with existing access"
                );
                continue;
            }

            let membership = invite.accept(actor_id)?;
            self.membership_repository
                .update_membership(&membership)
                .await?;
            self.append_audit(
                actor,
                &site,
                &membership,
                AuditAction::MemberInviteAccepted,
                None,
            )
            .await;

            accepted.push(membership);
        }

        Ok(accepted)
    }

    async fn find_modifiable(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        membership_id: MembershipId,
    ) -> AppResult<Membership> {
        let membership = self
            .membership_repository
            .find_membership(site.id(), membership_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "membership '{membership_id}' not found in site '{}'",
                    site.id()
                ))
            })?;

        if membership.is_bound_to(actor.actor_id()) {
            return Err(AppError::Forbidden(
                "members cannot change their own membership".to_owned(),
            ));
        }

        if membership.is_bound_to(site.owner_id()) {
            return Err(AppError::Forbidden(format!(
                "membership '{membership_id}' belongs to the site owner"
            )));
        }

        Ok(membership)
    }

    async fn append_audit(
        &self,
        actor: &ActorIdentity,
        site: &Site,
        membership: &Membership,
        action: AuditAction,
        detail: Option<String>,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                site_id: site.id(),
                actor_id: actor.actor_id(),
                action,
                resource_type: "membership".to_owned(),
                resource_id: membership.id().to_string(),
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

fn require_assignable(role: Role) -> AppResult<()> {
    if role.is_assignable() {
        return Ok(());
    }

    Err(AppError::Forbidden(format!("role '{role}' cannot be assigned")))
}
