use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a site is created.
    SiteCreated,
    /// Emitted when site settings change.
    SiteUpdated,
    /// Emitted when a site is deleted.
    SiteDeleted,
    /// Emitted when a member is invited by email.
    MemberInvited,
    /// Emitted when a member's role changes.
    MemberRoleChanged,
    /// Emitted when a member is removed.
    MemberRemoved,
    /// Emitted when a pending invite is linked to an account.
    MemberInviteAccepted,
    /// Emitted when a menu is created.
    MenuCreated,
    /// Emitted when a menu's items are saved.
    MenuSaved,
    /// Emitted when a menu is deleted.
    MenuDeleted,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiteCreated => "site.created",
            Self::SiteUpdated => "site.updated",
            Self::SiteDeleted => "site.deleted",
            Self::MemberInvited => "member.invited",
            Self::MemberRoleChanged => "member.role_changed",
            Self::MemberRemoved => "member.removed",
            Self::MemberInviteAccepted => "member.invite_accepted",
            Self::MenuCreated => "menu.created",
            Self::MenuSaved => "menu.saved",
            Self::MenuDeleted => "menu.deleted",
        }
    }
}
