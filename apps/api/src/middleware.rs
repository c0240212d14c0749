use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use wayfare_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Bearer token of the current request, kept for sign-out.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let access_token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let identity = state
        .identity_provider
        .current_user(access_token.as_str())
        .await?
        .ok_or_else(|| AppError::Unauthorized("session expired or invalid".to_owned()))?;

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(AccessToken(access_token));
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_owned())
}
