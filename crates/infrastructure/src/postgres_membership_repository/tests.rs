use chrono::Utc;
use wayfare_application::{MembershipRepository, SiteRepository};
use wayfare_core::{ActorId, AppError, SiteId};
use wayfare_domain::{EmailAddress, Membership, MembershipStatus, Role, Site};

use crate::PostgresSiteRepository;
use crate::postgres_test_support::test_pool;

use super::PostgresMembershipRepository;

async fn seeded_site(pool: &sqlx::PgPool) -> Site {
    let site_id = SiteId::new();
    let site = Site::new(
        site_id,
        ActorId::new(),
        "Atlas",
        format!("atlas-{}", site_id.as_uuid().simple()),
        None,
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!());
    let created = PostgresSiteRepository::new(pool.clone())
        .create_site(&site)
        .await;
    assert!(created.is_ok());
    site
}

fn email(site: &Site) -> EmailAddress {
    EmailAddress::new(format!("guide-{}@atlas.travel", site.id().as_uuid().simple()))
        .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn invite_accept_and_resolve_active_membership() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresMembershipRepository::new(pool.clone());
    let site = seeded_site(&pool).await;
    let invite =
        Membership::invite(site.id(), email(&site), Role::Editor).unwrap_or_else(|_| unreachable!());
    assert!(repository.create_membership(&invite).await.is_ok());

    let pending = repository
        .list_pending_invites(&email(&site))
        .await
        .unwrap_or_default();
    assert_eq!(pending.len(), 1);

    let actor = ActorId::new();
    let accepted = invite.accept(actor).unwrap_or_else(|_| unreachable!());
    assert!(repository.update_membership(&accepted).await.is_ok());

    let resolved = repository
        .find_active_membership(site.id(), actor)
        .await
        .unwrap_or_default();
    assert_eq!(resolved.map(|row| row.status()), Some(MembershipStatus::Active));
}

#[tokio::test]
async fn duplicate_email_invite_is_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresMembershipRepository::new(pool.clone());
    let site = seeded_site(&pool).await;
    let first =
        Membership::invite(site.id(), email(&site), Role::Viewer).unwrap_or_else(|_| unreachable!());
    let second =
        Membership::invite(site.id(), email(&site), Role::Admin).unwrap_or_else(|_| unreachable!());

    assert!(repository.create_membership(&first).await.is_ok());
    assert!(matches!(
        repository.create_membership(&second).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn rows_of_other_sites_are_untouched() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresMembershipRepository::new(pool.clone());
    let site = seeded_site(&pool).await;
    let other = seeded_site(&pool).await;
    let membership = Membership::active(other.id(), ActorId::new(), Role::Author)
        .unwrap_or_else(|_| unreachable!());
    assert!(repository.create_membership(&membership).await.is_ok());

    let deleted = repository.delete_membership(site.id(), membership.id()).await;
    let found = repository
        .find_membership(site.id(), membership.id())
        .await
        .unwrap_or_default();

    assert!(matches!(deleted, Err(AppError::NotFound(_))));
    assert!(found.is_none());
    assert_eq!(
        repository
            .list_memberships(other.id())
            .await
            .unwrap_or_default()
            .first()
            .map(Membership::role),
        Some(Role::Author)
    );
}
