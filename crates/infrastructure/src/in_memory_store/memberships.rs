use async_trait::async_trait;
use wayfare_application::MembershipRepository;
use wayfare_core::{ActorId, AppError, AppResult, SiteId};
use wayfare_domain::{EmailAddress, Membership, MembershipId, MembershipStatus};

use super::InMemoryStore;

fn conflicts(existing: &Membership, candidate: &Membership) -> bool {
    if existing.id() == candidate.id() || existing.site_id() != candidate.site_id() {
        return false;
    }

    let same_actor = existing.actor_id().is_some() && existing.actor_id() == candidate.actor_id();
    let same_email = existing.email().is_some() && existing.email() == candidate.email();
    same_actor || same_email
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn list_memberships(&self, site_id: SiteId) -> AppResult<Vec<Membership>> {
        let mut memberships: Vec<Membership> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|membership| membership.site_id() == site_id)
            .cloned()
            .collect();
        memberships.sort_by_key(Membership::created_at);

        Ok(memberships)
    }

    async fn find_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<Option<Membership>> {
        Ok(self
            .memberships
            .read()
            .await
            .get(&membership_id)
            .filter(|membership| membership.site_id() == site_id)
            .cloned())
    }

    async fn find_active_membership(
        &self,
        site_id: SiteId,
        actor_id: ActorId,
    ) -> AppResult<Option<Membership>> {
        Ok(self
            .memberships
            .read()
            .await
            .values()
            .find(|membership| {
                membership.site_id() == site_id && membership.is_bound_to(actor_id)
            })
            .cloned())
    }

    async fn list_pending_invites(&self, email: &EmailAddress) -> AppResult<Vec<Membership>> {
        let mut invites: Vec<Membership> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|membership| {
                membership.status() == MembershipStatus::Pending
                    && membership.email() == Some(email)
            })
            .cloned()
            .collect();
        invites.sort_by_key(Membership::created_at);

        Ok(invites)
    }

    async fn create_membership(&self, membership: &Membership) -> AppResult<()> {
        let mut memberships = self.memberships.write().await;
        if memberships
            .values()
            .any(|existing| conflicts(existing, membership))
        {
            return Err(AppError::Conflict(format!(
                "site '{}' already has a membership for this actor or email",
                membership.site_id()
            )));
        }

        memberships.insert(membership.id(), membership.clone());
        Ok(())
    }

    async fn update_membership(&self, membership: &Membership) -> AppResult<()> {
        let mut memberships = self.memberships.write().await;
        if memberships
            .values()
            .any(|existing| conflicts(existing, membership))
        {
            return Err(AppError::Conflict(format!(
                "site '{}' already has a membership for this actor or email",
                membership.site_id()
            )));
        }

        let stored = memberships
            .get_mut(&membership.id())
            .filter(|stored| stored.site_id() == membership.site_id())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "membership '{}' not found in site '{}'",
                    membership.id(),
                    membership.site_id()
                ))
            })?;
        *stored = membership.clone();
        Ok(())
    }

    async fn delete_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<()> {
        let mut memberships = self.memberships.write().await;
        let in_site = memberships
            .get(&membership_id)
            .is_some_and(|membership| membership.site_id() == site_id);
        if !in_site {
            return Err(AppError::NotFound(format!(
                "membership '{membership_id}' not found in site '{site_id}'"
            )));
        }

        memberships.remove(&membership_id);
        Ok(())
    }
}
