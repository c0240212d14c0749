use std::sync::Arc;

use wayfare_core::{ActorId, ActorIdentity, AppError};
use wayfare_domain::{AuditAction, Membership, Role, SitePatch};

use crate::test_support::{
    FailingAuditRepository, FakeActiveSiteStore, FakeAuditRepository, FakeMembershipRepository,
    FakeSiteRepository, identity,
};
use crate::{AuthorizationService, MembershipRepository, RoleResolver};

use super::SiteContext;

struct Harness {
    context: SiteContext,
    sites: Arc<FakeSiteRepository>,
    memberships: Arc<FakeMembershipRepository>,
    store: Arc<FakeActiveSiteStore>,
    audit: Arc<FakeAuditRepository>,
}

fn harness() -> Harness {
    let memberships = Arc::new(FakeMembershipRepository::default());
    let sites = Arc::new(FakeSiteRepository::new(memberships.clone()));
    let store = Arc::new(FakeActiveSiteStore::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let context = SiteContext::new(
        sites.clone(),
        store.clone(),
        AuthorizationService::new(RoleResolver::new(memberships.clone())),
        audit.clone(),
    );

    Harness {
        context,
        sites,
        memberships,
        store,
        audit,
    }
}

#[tokio::test]
async fn operations_require_a_session() {
    let harness = harness();

    assert!(matches!(
        harness.context.list_sites().await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(harness.context.active_site().await.is_none());
}

#[tokio::test]
async fn init_lists_owned_and_member_sites_newest_first() {
    let harness = harness();
    let actor = identity("ana@atlas.travel");
    let older = harness.sites.seed(actor.actor_id(), "atlas-tours", 30).await;
    let shared = harness.sites.seed(ActorId::new(), "nordic-trails", 10).await;
    harness.sites.seed(ActorId::new(), "unrelated", 5).await;
    harness
        .memberships
        .seed(
            Membership::active(shared.id(), actor.actor_id(), Role::Editor)
                .unwrap_or_else(|_| unreachable!()),
        )
        .await;

    harness
        .context
        .init(actor)
        .await
        .unwrap_or_else(|_| unreachable!());

    let listed: Vec<_> = harness
        .context
        .list_sites()
        .await
        .unwrap_or_default()
        .iter()
        .map(|site| site.id())
        .collect();
    assert_eq!(listed, vec![shared.id(), older.id()]);
    assert_eq!(
        harness.context.active_site().await.map(|site| site.id()),
        Some(shared.id())
    );
}

#[tokio::test]
async fn init_restores_persisted_selection() {
    let harness = harness();
    let actor = identity("ana@atlas.travel");
    let older = harness.sites.seed(actor.actor_id(), "atlas-tours", 30).await;
    harness.sites.seed(actor.actor_id(), "atlas-cruises", 10).await;

    harness
        .context
        .init(actor.clone())
        .await
        .unwrap_or_else(|_| unreachable!());
    harness
        .context
        .set_active_site(older.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    harness
        .context
        .on_auth_change(Some(actor))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        harness.context.active_site().await.map(|site| site.id()),
        Some(older.id())
    );
}

#[tokio::test]
async fn set_active_site_rejects_foreign_site() {
    let harness = harness();
    let foreign = harness.sites.seed(ActorId::new(), "elsewhere", 1).await;
    harness
        .context
        .init(identity("ana@atlas.travel"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = harness.context.set_active_site(foreign.id()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn create_site_makes_creator_owner_and_activates_it() {
    let harness = harness();
    let actor = identity("ana@atlas.travel");
    harness.sites.seed(actor.actor_id(), "existing", 60).await;
    harness
        .context
        .init(actor.clone())
        .await
        .unwrap_or_else(|_| unreachable!());

    let site = harness
        .context
        .create_site("Atlas Tours", "Atlas Tours")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(site.is_owned_by(actor.actor_id()));
    assert_eq!(site.slug().as_str(), "atlas-tours");
    assert!(harness.memberships.rows().await.is_empty());
    assert_eq!(
        harness.context.active_site().await.map(|active| active.id()),
        Some(site.id())
    );
    assert_eq!(harness.store.selection(actor.actor_id()).await, Some(site.id()));
    assert_eq!(harness.context.list_sites().await.unwrap_or_default().len(), 2);
    assert_eq!(
        harness.audit.events().await.first().map(|event| event.action),
        Some(AuditAction::SiteCreated)
    );
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let harness = harness();
    harness.sites.seed(ActorId::new(), "atlas-tours", 5).await;
    harness
        .context
        .init(identity("ana@atlas.travel"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = harness.context.create_site("Atlas", "atlas-tours").await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn update_site_patches_cache_for_admin() {
    let harness = harness();
    let admin = identity("admin@atlas.travel");
    let site = harness.sites.seed(ActorId::new(), "atlas-tours", 5).await;
    harness
        .memberships
        .seed(
            Membership::active(site.id(), admin.actor_id(), Role::Admin)
                .unwrap_or_else(|_| unreachable!()),
        )
        .await;
    harness
        .context
        .init(admin)
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = harness
        .context
        .update_site(
            site.id(),
            &SitePatch {
                theme: Some("coastal".to_owned()),
                ..SitePatch::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(updated.theme(), "coastal");
    assert_eq!(
        harness
            .context
            .active_site()
            .await
            .map(|active| active.theme().to_owned()),
        Some("coastal".to_owned())
    );
}

#[tokio::test]
async fn editor_cannot_update_settings() {
    let harness = harness();
    let editor = identity("editor@atlas.travel");
    let site = harness.sites.seed(ActorId::new(), "atlas-tours", 5).await;
    harness
        .memberships
        .seed(
            Membership::active(site.id(), editor.actor_id(), Role::Editor)
                .unwrap_or_else(|_| unreachable!()),
        )
        .await;
    harness
        .context
        .init(editor)
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = harness
        .context
        .update_site(
            site.id(),
            &SitePatch {
                name: Some("Renamed".to_owned()),
                ..SitePatch::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn deleting_active_site_falls_back_to_newest_remaining() {
    let harness = harness();
    let actor = identity("ana@atlas.travel");
    let oldest = harness.sites.seed(actor.actor_id(), "oldest", 90).await;
    let middle = harness.sites.seed(actor.actor_id(), "middle", 60).await;
    harness
        .context
        .init(actor.clone())
        .await
        .unwrap_or_else(|_| unreachable!());
    harness
        .context
        .set_active_site(oldest.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    harness
        .context
        .delete_site(oldest.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        harness.context.active_site().await.map(|site| site.id()),
        Some(middle.id())
    );
    assert_eq!(harness.store.selection(actor.actor_id()).await, Some(middle.id()));
}

#[tokio::test]
async fn deleting_last_site_clears_selection() {
    let harness = harness();
    let actor = identity("ana@atlas.travel");
    let only = harness.sites.seed(actor.actor_id(), "only", 5).await;
    harness
        .context
        .init(actor.clone())
        .await
        .unwrap_or_else(|_| unreachable!());
    harness
        .context
        .set_active_site(only.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    harness
        .context
        .delete_site(only.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(harness.context.active_site().await.is_none());
    assert_eq!(harness.store.selection(actor.actor_id()).await, None);
}

#[tokio::test]
async fn admin_cannot_delete_site() {
    let harness = harness();
    let admin = identity("admin@atlas.travel");
    let site = harness.sites.seed(ActorId::new(), "atlas-tours", 5).await;
    harness
        .memberships
        .seed(
            Membership::active(site.id(), admin.actor_id(), Role::Admin)
                .unwrap_or_else(|_| unreachable!()),
        )
        .await;
    harness
        .context
        .init(admin)
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = harness.context.delete_site(site.id()).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn sign_out_tears_down_session() {
    let harness = harness();
    let actor: ActorIdentity = identity("ana@atlas.travel");
    harness.sites.seed(actor.actor_id(), "atlas-tours", 5).await;
    harness
        .context
        .init(actor)
        .await
        .unwrap_or_else(|_| unreachable!());

    harness
        .context
        .on_auth_change(None)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(harness.context.active_site().await.is_none());
    assert!(harness.context.actor().await.is_err());
}

#[tokio::test]
async fn created_site_is_active_even_when_audit_store_fails() {
    let memberships = Arc::new(FakeMembershipRepository::default());
    let sites = Arc::new(FakeSiteRepository::new(memberships.clone()));
    let store = Arc::new(FakeActiveSiteStore::default());
    let context = SiteContext::new(
        sites.clone(),
        store.clone(),
        AuthorizationService::new(RoleResolver::new(memberships)),
        Arc::new(FailingAuditRepository),
    );
    let actor = identity("ana@atlas.travel");
    context
        .init(actor.clone())
        .await
        .unwrap_or_else(|_| unreachable!());

    let site = context
        .create_site("Atlas Tours", "atlas-tours")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(context.list_sites().await.unwrap_or_default().len(), 1);
    assert_eq!(
        context.active_site().await.map(|active| active.id()),
        Some(site.id())
    );
    assert_eq!(store.selection(actor.actor_id()).await, Some(site.id()));
}

#[tokio::test]
async fn selection_lost_with_membership_falls_back_to_newest() {
    let harness = harness();
    let actor = identity("ana@atlas.travel");
    let owned = harness.sites.seed(actor.actor_id(), "atlas-tours", 60).await;
    let spare = harness.sites.seed(actor.actor_id(), "spare", 30).await;
    let shared = harness.sites.seed(ActorId::new(), "nordic-trails", 10).await;
    let membership = Membership::active(shared.id(), actor.actor_id(), Role::Editor)
        .unwrap_or_else(|_| unreachable!());
    harness.memberships.seed(membership.clone()).await;
    harness
        .context
        .init(actor.clone())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        harness.context.active_site().await.map(|site| site.id()),
        Some(shared.id())
    );

    harness
        .memberships
        .delete_membership(shared.id(), membership.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    harness
        .context
        .delete_site(spare.id())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        harness.context.active_site().await.map(|site| site.id()),
        Some(owned.id())
    );
    assert_eq!(harness.store.selection(actor.actor_id()).await, Some(owned.id()));
}
