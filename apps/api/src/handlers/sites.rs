use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use wayfare_core::{ActorIdentity, SiteId};
use wayfare_domain::SitePatch;

use crate::dto::{
    CreateSiteRequest, SetActiveSiteRequest, SitePermissionsResponse, SiteResponse,
    UpdateSiteRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_sites_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<SiteResponse>>> {
    let sites = state
        .site_context(&actor)
        .await?
        .list_sites()
        .await?
        .into_iter()
        .map(SiteResponse::from)
        .collect();

    Ok(Json(sites))
}

pub async fn create_site_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreateSiteRequest>,
) -> ApiResult<(StatusCode, Json<SiteResponse>)> {
    let site = state
        .site_context(&actor)
        .await?
        .create_site(payload.name.as_str(), payload.slug.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(SiteResponse::from(site))))
}

pub async fn active_site_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Option<SiteResponse>>> {
    let site = state.site_context(&actor).await?.active_site().await;

    Ok(Json(site.map(SiteResponse::from)))
}

pub async fn set_active_site_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<SetActiveSiteRequest>,
) -> ApiResult<Json<SiteResponse>> {
    let site_id = payload.site_id.parse::<SiteId>()?;
    let site = state
        .site_context(&actor)
        .await?
        .set_active_site(site_id)
        .await?;

    Ok(Json(SiteResponse::from(site)))
}

pub async fn update_site_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
    Json(payload): Json<UpdateSiteRequest>,
) -> ApiResult<Json<SiteResponse>> {
    let site_id = site_id.parse::<SiteId>()?;
    let patch = SitePatch::from(payload);
    let site = state
        .site_context(&actor)
        .await?
        .update_site(site_id, &patch)
        .await?;

    Ok(Json(SiteResponse::from(site)))
}

pub async fn delete_site_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
) -> ApiResult<StatusCode> {
    let site_id = site_id.parse::<SiteId>()?;
    state
        .site_context(&actor)
        .await?
        .delete_site(site_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn site_permissions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
) -> ApiResult<Json<SitePermissionsResponse>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let permissions = state
        .authorization_service
        .permissions_for(actor.actor_id(), &site)
        .await;

    Ok(Json(SitePermissionsResponse::from(permissions)))
}
