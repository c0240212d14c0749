use chrono::Utc;
use wayfare_application::{MenuRepository, SiteRepository};
use wayfare_core::{ActorId, AppError, SiteId};
use wayfare_domain::{LinkTarget, Menu, MenuItem, MenuItemId, MenuItemType, MenuLocation, Site};

use crate::PostgresSiteRepository;
use crate::postgres_test_support::test_pool;

use super::PostgresMenuRepository;

async fn seeded_site(pool: &sqlx::PgPool) -> Site {
    let site_id = SiteId::new();
    let site = Site::new(
        site_id,
        ActorId::new(),
        "Atlas",
        format!("menus-{}", site_id.as_uuid().simple()),
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

fn item(id: &str, label: &str, children: Vec<MenuItem>) -> MenuItem {
    MenuItem::new(
        MenuItemId::new(id).unwrap_or_else(|_| unreachable!()),
        label,
        format!("/{id}"),
        MenuItemType::Custom,
        LinkTarget::NewWindow,
        children,
    )
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn menu_items_roundtrip_through_jsonb() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresMenuRepository::new(pool.clone());
    let site = seeded_site(&pool).await;
    let mut menu =
        Menu::create(site.id(), "Main", MenuLocation::Primary).unwrap_or_else(|_| unreachable!());
    assert!(repository.create_menu(&menu).await.is_ok());

    let tree = vec![item("tours", "Tours", vec![item("alps", "Alps", Vec::new())])];
    assert!(menu.replace_items(tree.clone()).is_ok());
    let saved = repository
        .save_menu(&menu, Some(1))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(saved.version(), 2);
    assert_eq!(saved.items(), tree.as_slice());
}

#[tokio::test]
async fn stale_save_is_conflict_and_unknown_menu_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresMenuRepository::new(pool.clone());
    let site = seeded_site(&pool).await;
    let menu =
        Menu::create(site.id(), "Footer", MenuLocation::Footer).unwrap_or_else(|_| unreachable!());
    assert!(repository.create_menu(&menu).await.is_ok());
    assert!(repository.save_menu(&menu, None).await.is_ok());

    let stale = repository.save_menu(&menu, Some(1)).await;
    let unknown = Menu::create(site.id(), "Ghost", MenuLocation::Mobile)
        .unwrap_or_else(|_| unreachable!());
    let missing = repository.save_menu(&unknown, None).await;

    assert!(matches!(stale, Err(AppError::Conflict(_))));
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
