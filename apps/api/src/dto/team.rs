use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wayfare_domain::{EmailAddress, Membership};

/// API representation of a team member or pending invite.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/membership-response.ts")]
pub struct MembershipResponse {
    pub id: String,
    pub site_id: String,
    /// `pending` until the invited address signs in.
    pub status: String,
    pub actor_id: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub created_at: String,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id().to_string(),
            site_id: membership.site_id().to_string(),
            status: membership.status().as_str().to_owned(),
            actor_id: membership.actor_id().map(|actor_id| actor_id.to_string()),
            email: membership
                .email()
                .map(EmailAddress::as_str)
                .map(ToOwned::to_owned),
            role: membership.role().as_str().to_owned(),
            created_at: membership.created_at().to_rfc3339(),
        }
    }
}

/// Incoming payload for inviting a member.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/add-member-request.ts")]
pub struct AddMemberRequest {
    pub email: String,
    pub role: String,
}

/// Incoming payload for changing a member's role.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/update-member-role-request.ts")]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}
