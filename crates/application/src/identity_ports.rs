use async_trait::async_trait;
use wayfare_core::{ActorIdentity, AppResult};

/// Port over the hosted authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the account behind an access token.
    ///
    /// Returns `None` when the token is unknown or expired.
    async fn current_user(&self, access_token: &str) -> AppResult<Option<ActorIdentity>>;

    /// Revokes the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> AppResult<()>;
}
