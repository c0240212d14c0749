use async_trait::async_trait;
use wayfare_core::{ActorId, AppResult, SiteId};
use wayfare_domain::{EmailAddress, Membership, MembershipId};

/// Repository port for site memberships and pending invites.
///
/// Every lookup that takes a membership id is scoped by site id as well.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Lists all rows of a site ordered by creation ascending.
    async fn list_memberships(&self, site_id: SiteId) -> AppResult<Vec<Membership>>;

    /// Finds one row of a site.
    async fn find_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<Option<Membership>>;

    /// Finds the active membership binding the actor to the site.
    async fn find_active_membership(
        &self,
        site_id: SiteId,
        actor_id: ActorId,
    ) -> AppResult<Option<Membership>>;

    /// Lists pending invites addressed to an email across all sites.
    async fn list_pending_invites(&self, email: &EmailAddress) -> AppResult<Vec<Membership>>;

    /// Inserts a row. Fails with `Conflict` on a duplicate actor or email.
    async fn create_membership(&self, membership: &Membership) -> AppResult<()>;

    /// Replaces role and binding of an existing row of the same site.
    async fn update_membership(&self, membership: &Membership) -> AppResult<()>;

    /// Deletes a row of a site. Fails with `NotFound` when no row matches.
    async fn delete_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<()>;
}
