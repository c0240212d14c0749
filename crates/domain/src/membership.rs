use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_core::{ActorId, AppError, AppResult, SiteId};

use crate::{EmailAddress, Role};

/// Unique identifier for a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipId(Uuid);

impl MembershipId {
    /// Creates a random membership identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a membership identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MembershipId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MembershipId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for MembershipId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
            AppError::Validation(format!("invalid membership id '{value}': {error}"))
        })
    }
}

/// Who a membership row is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum MembershipBinding {
    /// Invited by email, not yet linked to an account.
    Pending {
        /// Invited address.
        email: EmailAddress,
    },
    /// Linked to a registered account.
    Active {
        /// Linked account.
        actor_id: ActorId,
        /// Address the invite was sent to, when the row started as an invite.
        email: Option<EmailAddress>,
    },
}

/// Stable status label for a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Invite awaiting account linkage.
    Pending,
    /// Bound to an account.
    Active,
}

impl MembershipStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
        }
    }

    /// Parses a stored status value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            _ => Err(AppError::Validation(format!(
                "unknown membership status '{value}'"
            ))),
        }
    }
}

/// Binds one actor, or one pending invite, to one site with one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    id: MembershipId,
    site_id: SiteId,
    binding: MembershipBinding,
    role: Role,
    created_at: DateTime<Utc>,
}

impl Membership {
    /// Restores a membership from stored values.
    pub fn new(
        id: MembershipId,
        site_id: SiteId,
        binding: MembershipBinding,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if !role.is_assignable() {
            return Err(AppError::Validation(format!(
                "role '{role}' cannot be held through a membership"
            )));
        }

        Ok(Self {
            id,
            site_id,
            binding,
            role,
            created_at,
        })
    }

    /// Creates a pending invite for an email address.
    pub fn invite(site_id: SiteId, email: EmailAddress, role: Role) -> AppResult<Self> {
        Self::new(
            MembershipId::new(),
            site_id,
            MembershipBinding::Pending { email },
            role,
            Utc::now(),
        )
    }

    /// Creates an active membership for a known account.
    pub fn active(site_id: SiteId, actor_id: ActorId, role: Role) -> AppResult<Self> {
        Self::new(
            MembershipId::new(),
            site_id,
            MembershipBinding::Active {
                actor_id,
                email: None,
            },
            role,
            Utc::now(),
        )
    }

    /// Returns the membership identifier.
    #[must_use]
    pub fn id(&self) -> MembershipId {
        self.id
    }

    /// Returns the owning site.
    #[must_use]
    pub fn site_id(&self) -> SiteId {
        self.site_id
    }

    /// Returns the binding.
    #[must_use]
    pub fn binding(&self) -> &MembershipBinding {
        &self.binding
    }

    /// Returns the binding status.
    #[must_use]
    pub fn status(&self) -> MembershipStatus {
        match self.binding {
            MembershipBinding::Pending { .. } => MembershipStatus::Pending,
            MembershipBinding::Active { .. } => MembershipStatus::Active,
        }
    }

    /// Returns the linked account, if the membership is active.
    #[must_use]
    pub fn actor_id(&self) -> Option<ActorId> {
        match &self.binding {
            MembershipBinding::Active { actor_id, .. } => Some(*actor_id),
            MembershipBinding::Pending { .. } => None,
        }
    }

    /// Returns the invited email, if one is recorded.
    #[must_use]
    pub fn email(&self) -> Option<&EmailAddress> {
        match &self.binding {
            MembershipBinding::Pending { email } => Some(email),
            MembershipBinding::Active { email, .. } => email.as_ref(),
        }
    }

    /// Returns whether the membership is bound to the actor.
    #[must_use]
    pub fn is_bound_to(&self, actor_id: ActorId) -> bool {
        self.actor_id() == Some(actor_id)
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy with a different role.
    pub fn with_role(&self, role: Role) -> AppResult<Self> {
        Self::new(
            self.id,
            self.site_id,
            self.binding.clone(),
            role,
            self.created_at,
        )
    }

    /// Promotes a pending invite to an active membership for the account.
    pub fn accept(&self, actor_id: ActorId) -> AppResult<Self> {
        match &self.binding {
            MembershipBinding::Pending { email } => Ok(Self {
                binding: MembershipBinding::Active {
                    actor_id,
                    email: Some(email.clone()),
                },
                ..self.clone()
            }),
            MembershipBinding::Active { .. } => Err(AppError::Conflict(format!(
                "membership '{}' is already active",
                self.id
            ))),
        }
    }
}
