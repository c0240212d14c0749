use serde::Serialize;
use ts_rs::TS;
use wayfare_core::ActorIdentity;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the signed-in actor.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/actor-identity-response.ts")]
pub struct ActorIdentityResponse {
    pub actor_id: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl From<ActorIdentity> for ActorIdentityResponse {
    fn from(identity: ActorIdentity) -> Self {
        Self {
            actor_id: identity.actor_id().to_string(),
            email: identity.email().map(ToOwned::to_owned),
            email_verified: identity.verified_email().is_some(),
        }
    }
}
