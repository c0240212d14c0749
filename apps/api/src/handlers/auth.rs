use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use tracing::info;
use wayfare_core::ActorIdentity;

use crate::dto::{ActorIdentityResponse, MembershipResponse};
use crate::error::ApiResult;
use crate::middleware::AccessToken;
use crate::state::AppState;

pub async fn me_handler(
    Extension(actor): Extension<ActorIdentity>,
) -> Json<ActorIdentityResponse> {
    Json(ActorIdentityResponse::from(actor))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Extension(access_token): Extension<AccessToken>,
) -> ApiResult<StatusCode> {
    state
        .identity_provider
        .sign_out(access_token.0.as_str())
        .await?;
    info!(actor_id = %actor.actor_id(), "actor signed out");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn accept_invites_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let accepted = state
        .team_service
        .accept_pending_invites(&actor)
        .await?
        .into_iter()
        .map(MembershipResponse::from)
        .collect();

    Ok(Json(accepted))
}
