use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use wayfare_core::{ActorIdentity, SiteId};
use wayfare_domain::{MenuId, MenuLocation};

use crate::dto::{
    CreateMenuRequest, DeriveMenuItemRequest, MenuItemPayload, MenuResponse, SaveMenuRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_menus_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
) -> ApiResult<Json<Vec<MenuResponse>>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let menus = state
        .menu_service
        .list_menus(&actor, &site)
        .await?
        .into_iter()
        .map(MenuResponse::from)
        .collect();

    Ok(Json(menus))
}

pub async fn create_menu_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
    Json(payload): Json<CreateMenuRequest>,
) -> ApiResult<(StatusCode, Json<MenuResponse>)> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let location = MenuLocation::parse(payload.location.as_str())?;
    let menu = state
        .menu_service
        .create_menu(&actor, &site, payload.name.as_str(), location)
        .await?;

    Ok((StatusCode::CREATED, Json(MenuResponse::from(menu))))
}

pub async fn get_menu_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((site_id, menu_id)): Path<(String, String)>,
) -> ApiResult<Json<MenuResponse>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let menu = state
        .menu_service
        .get_menu(&actor, &site, menu_id.parse::<MenuId>()?)
        .await?;

    Ok(Json(MenuResponse::from(menu)))
}

pub async fn save_menu_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((site_id, menu_id)): Path<(String, String)>,
    Json(payload): Json<SaveMenuRequest>,
) -> ApiResult<Json<MenuResponse>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let menu = state
        .menu_service
        .save_menu(
            &actor,
            &site,
            menu_id.parse::<MenuId>()?,
            payload.into_input()?,
        )
        .await?;

    Ok(Json(MenuResponse::from(menu)))
}

pub async fn delete_menu_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((site_id, menu_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    state
        .menu_service
        .delete_menu(&actor, &site, menu_id.parse::<MenuId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn derive_menu_item_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
    Json(payload): Json<DeriveMenuItemRequest>,
) -> ApiResult<Json<MenuItemPayload>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let item = state
        .menu_service
        .derive_item(&actor, &site, payload.into_input()?)
        .await?;

    Ok(Json(MenuItemPayload::from(&item)))
}
