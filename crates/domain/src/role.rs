//! Site roles and the static capability table.
//!
//! Authorization never branches on a role directly: every check goes through
//! [`has_permission`], which reads the exhaustive table in [`Role::permissions`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wayfare_core::AppError;

/// Role an actor holds within one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Site owner, identified by `Site::owner_id` rather than a membership row.
    Owner,
    /// Full administrative access except deleting the site.
    Admin,
    /// Manages content and menus, including content authored by others.
    Editor,
    /// Writes posts and uploads media.
    Author,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Author => "author",
            Self::Viewer => "viewer",
        }
    }

    /// Returns all roles from most to least privileged.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Owner,
            Role::Admin,
            Role::Editor,
            Role::Author,
            Role::Viewer,
        ];

        ALL
    }

    /// Returns roles that may be granted through a membership row.
    #[must_use]
    pub fn assignable() -> &'static [Self] {
        const ASSIGNABLE: &[Role] = &[Role::Admin, Role::Editor, Role::Author, Role::Viewer];

        ASSIGNABLE
    }

    /// Returns whether this role may be granted through a membership row.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        Self::assignable().contains(self)
    }

    /// Returns the fixed permission set for this role.
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        match self {
            Self::Owner => PermissionSet {
                can_manage_team: true,
                can_manage_settings: true,
                can_manage_menus: true,
                can_manage_database: true,
                can_export_data: true,
                can_manage_pages: true,
                can_manage_posts: true,
                can_manage_media: true,
                can_delete_site: true,
                can_edit_others_content: true,
            },
            Self::Admin => PermissionSet {
                can_manage_team: true,
                can_manage_settings: true,
                can_manage_menus: true,
                can_manage_database: true,
                can_export_data: true,
                can_manage_pages: true,
                can_manage_posts: true,
                can_manage_media: true,
                can_delete_site: false,
                can_edit_others_content: true,
            },
            Self::Editor => PermissionSet {
                can_manage_team: false,
                can_manage_settings: false,
                can_manage_menus: true,
                can_manage_database: false,
                can_export_data: false,
                can_manage_pages: true,
                can_manage_posts: true,
                can_manage_media: true,
                can_delete_site: false,
                can_edit_others_content: true,
            },
            Self::Author => PermissionSet {
                can_manage_team: false,
                can_manage_settings: false,
                can_manage_menus: false,
                can_manage_database: false,
                can_export_data: false,
                can_manage_pages: false,
                can_manage_posts: true,
                can_manage_media: true,
                can_delete_site: false,
                can_edit_others_content: false,
            },
            Self::Viewer => PermissionSet::none(),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "author" => Ok(Self::Author),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Capability checked by site-scoped operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Invite, re-role and remove team members.
    #[serde(rename = "canManageTeam")]
    ManageTeam,
    /// Edit site name, slug and theme.
    #[serde(rename = "canManageSettings")]
    ManageSettings,
    /// Create, edit and delete navigation menus.
    #[serde(rename = "canManageMenus")]
    ManageMenus,
    /// Access the database tooling.
    #[serde(rename = "canManageDatabase")]
    ManageDatabase,
    /// Export site data.
    #[serde(rename = "canExportData")]
    ExportData,
    /// Create and edit pages.
    #[serde(rename = "canManagePages")]
    ManagePages,
    /// Create and edit posts.
    #[serde(rename = "canManagePosts")]
    ManagePosts,
    /// Upload and organize media.
    #[serde(rename = "canManageMedia")]
    ManageMedia,
    /// Delete the site.
    #[serde(rename = "canDeleteSite")]
    DeleteSite,
    /// Edit content authored by other members.
    #[serde(rename = "canEditOthersContent")]
    EditOthersContent,
}

impl Capability {
    /// Returns a stable transport value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageTeam => "canManageTeam",
            Self::ManageSettings => "canManageSettings",
            Self::ManageMenus => "canManageMenus",
            Self::ManageDatabase => "canManageDatabase",
            Self::ExportData => "canExportData",
            Self::ManagePages => "canManagePages",
            Self::ManagePosts => "canManagePosts",
            Self::ManageMedia => "canManageMedia",
            Self::DeleteSite => "canDeleteSite",
            Self::EditOthersContent => "canEditOthersContent",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::ManageTeam,
            Capability::ManageSettings,
            Capability::ManageMenus,
            Capability::ManageDatabase,
            Capability::ExportData,
            Capability::ManagePages,
            Capability::ManagePosts,
            Capability::ManageMedia,
            Capability::DeleteSite,
            Capability::EditOthersContent,
        ];

        ALL
    }
}

impl Display for Capability {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown capability value '{value}'")))
    }
}

/// Ten independent capability flags attached to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    /// Team management.
    pub can_manage_team: bool,
    /// Site settings.
    pub can_manage_settings: bool,
    /// Navigation menus.
    pub can_manage_menus: bool,
    /// Database tooling.
    pub can_manage_database: bool,
    /// Data export.
    pub can_export_data: bool,
    /// Pages.
    pub can_manage_pages: bool,
    /// Posts.
    pub can_manage_posts: bool,
    /// Media library.
    pub can_manage_media: bool,
    /// Site deletion.
    pub can_delete_site: bool,
    /// Editing other members' content.
    pub can_edit_others_content: bool,
}

impl PermissionSet {
    /// Returns a set with every capability denied.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            can_manage_team: false,
            can_manage_settings: false,
            can_manage_menus: false,
            can_manage_database: false,
            can_export_data: false,
            can_manage_pages: false,
            can_manage_posts: false,
            can_manage_media: false,
            can_delete_site: false,
            can_edit_others_content: false,
        }
    }

    /// Returns whether the capability is granted.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageTeam => self.can_manage_team,
            Capability::ManageSettings => self.can_manage_settings,
            Capability::ManageMenus => self.can_manage_menus,
            Capability::ManageDatabase => self.can_manage_database,
            Capability::ExportData => self.can_export_data,
            Capability::ManagePages => self.can_manage_pages,
            Capability::ManagePosts => self.can_manage_posts,
            Capability::ManageMedia => self.can_manage_media,
            Capability::DeleteSite => self.can_delete_site,
            Capability::EditOthersContent => self.can_edit_others_content,
        }
    }

    /// Returns the granted capabilities in declaration order.
    #[must_use]
    pub fn granted(&self) -> Vec<Capability> {
        Capability::all()
            .iter()
            .copied()
            .filter(|capability| self.allows(*capability))
            .collect()
    }
}

/// Looks up one capability for a role in the permission table.
#[must_use]
pub fn has_permission(role: Role, capability: Capability) -> bool {
    role.permissions().allows(capability)
}
