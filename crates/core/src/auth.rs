use serde::{Deserialize, Serialize};

use crate::ActorId;

/// Identity of the signed-in actor as reported by the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    actor_id: ActorId,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

impl ActorIdentity {
    /// Creates an actor identity from provider data. The email starts out
    /// unverified.
    #[must_use]
    pub fn new(actor_id: ActorId, email: Option<String>) -> Self {
        let email = email.and_then(|value| {
            let normalized = value.trim().to_lowercase();
            (!normalized.is_empty()).then_some(normalized)
        });

        Self {
            actor_id,
            email,
            email_verified: false,
        }
    }

    /// Marks the email as confirmed by the provider.
    #[must_use]
    pub fn with_verified_email(mut self) -> Self {
        self.email_verified = true;
        self
    }

    /// Returns the stable account identifier.
    #[must_use]
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the normalized email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the email only when the provider confirmed the mailbox.
    #[must_use]
    pub fn verified_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|_| self.email_verified)
    }
}
