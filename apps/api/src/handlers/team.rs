use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use wayfare_core::{ActorIdentity, SiteId};
use wayfare_domain::{MembershipId, Role};

use crate::dto::{AddMemberRequest, MembershipResponse, UpdateMemberRoleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_members_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let members = state.team_service.list_members(&actor, &site).await?;

    Ok(Json(members.into_iter().map(MembershipResponse::from).collect()))
}

pub async fn add_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(site_id): Path<String>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<MembershipResponse>)> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let role = payload.role.parse::<Role>()?;
    let membership = state
        .team_service
        .add_member(&actor, &site, payload.email.as_str(), role)
        .await?;

    Ok((StatusCode::CREATED, Json(MembershipResponse::from(membership))))
}

pub async fn update_member_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((site_id, membership_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMemberRoleRequest>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let membership_id = membership_id.parse::<MembershipId>()?;
    let role = payload.role.parse::<Role>()?;
    let members = state
        .team_service
        .update_member_role(&actor, &site, membership_id, role)
        .await?;

    Ok(Json(members.into_iter().map(MembershipResponse::from).collect()))
}

pub async fn remove_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((site_id, membership_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let site = state
        .visible_site(&actor, site_id.parse::<SiteId>()?)
        .await?;
    let membership_id = membership_id.parse::<MembershipId>()?;
    let members = state
        .team_service
        .remove_member(&actor, &site, membership_id)
        .await?;

    Ok(Json(members.into_iter().map(MembershipResponse::from).collect()))
}
