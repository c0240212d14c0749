use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;
use url::Url;
use uuid::Uuid;
use wayfare_application::IdentityProvider;
use wayfare_core::{ActorId, ActorIdentity, AppError, AppResult};

/// Identity provider backed by the hosted auth REST endpoints.
///
/// Calls `GET {base}/auth/v1/user` and `POST {base}/auth/v1/logout` with the
/// access token as bearer and the project key in the `apikey` header.
#[derive(Clone)]
pub struct HostedAuthIdentityProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct HostedUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
}

impl From<HostedUser> for ActorIdentity {
    fn from(user: HostedUser) -> Self {
        let identity = ActorIdentity::new(ActorId::from_uuid(user.id), user.email);
        match user.email_confirmed_at {
            Some(_) => identity.with_verified_email(),
            None => identity,
        }
    }
}

impl HostedAuthIdentityProvider {
    /// Creates a provider for the hosted auth project at `base_url`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: &Url, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for HostedAuthIdentityProvider {
    async fn current_user(&self, access_token: &str) -> AppResult<Option<ActorIdentity>> {
        let response = self
            .http_client
            .get(self.endpoint("user"))
            .bearer_auth(access_token)
            .header("apikey", self.api_key.as_str())
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("auth user lookup failed: {error}")))?;

        match response.status() {
            status if status.is_success() => {
                let user = response.json::<HostedUser>().await.map_err(|error| {
                    AppError::Internal(format!("auth user payload is malformed: {error}"))
                })?;
                Ok(Some(user.into()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(AppError::Internal(format!(
                "auth user lookup returned status {status}"
            ))),
        }
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint("logout"))
            .bearer_auth(access_token)
            .header("apikey", self.api_key.as_str())
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("auth sign out failed: {error}")))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("sign out called with an expired session");
                Ok(())
            }
            status => Err(AppError::Internal(format!(
                "auth sign out returned status {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;
    use wayfare_core::ActorIdentity;

    use super::{HostedAuthIdentityProvider, HostedUser};

    #[test]
    fn endpoint_joins_without_double_slash() {
        let base = Url::parse("https://auth.atlas.travel/").unwrap_or_else(|_| unreachable!());
        let provider = HostedAuthIdentityProvider::new(reqwest::Client::new(), &base, "key");

        assert_eq!(
            provider.endpoint("user"),
            "https://auth.atlas.travel/auth/v1/user"
        );
    }

    #[test]
    fn user_payload_maps_to_identity() {
        let user: HostedUser = serde_json::from_value(serde_json::json!({
            "id": "5a3f4c4e-8b1f-4f7e-9a53-2d0c1c2a7b10",
            "email": "Ana@Atlas.Travel",
            "email_confirmed_at": "2026-03-02T09:15:00Z",
            "role": "authenticated"
        }))
        .unwrap_or_else(|_| unreachable!());

        let identity = ActorIdentity::from(user);

        assert_eq!(identity.email(), Some("ana@atlas.travel"));
        assert_eq!(identity.verified_email(), Some("ana@atlas.travel"));
        assert_eq!(
            identity.actor_id().to_string(),
            "5a3f4c4e-8b1f-4f7e-9a53-2d0c1c2a7b10"
        );
    }

    #[test]
    fn unconfirmed_email_is_not_verified() {
        let user: HostedUser = serde_json::from_value(serde_json::json!({
            "id": "5a3f4c4e-8b1f-4f7e-9a53-2d0c1c2a7b10",
            "email": "ana@atlas.travel",
            "email_confirmed_at": null
        }))
        .unwrap_or_else(|_| unreachable!());

        let identity = ActorIdentity::from(user);

        assert_eq!(identity.email(), Some("ana@atlas.travel"));
        assert_eq!(identity.verified_email(), None);
    }
}
