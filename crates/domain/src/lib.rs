//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod email;
mod membership;
mod menu;
mod menu_item;
mod role;
mod site;

pub use audit::AuditAction;
pub use email::{EMAIL_MAX_LENGTH, EmailAddress};
pub use membership::{Membership, MembershipBinding, MembershipId, MembershipStatus};
pub use menu::{Menu, MenuId, MenuLocation, reorder};
pub use menu_item::{
    ContentKind, LinkTarget, LinkedContent, MAX_MENU_NESTING, MenuItem, MenuItemDraft,
    MenuItemId, MenuItemType,
};
pub use role::{Capability, PermissionSet, Role, has_permission};
pub use site::{DEFAULT_THEME, SLUG_MAX_LENGTH, Site, SitePatch, SiteSlug};
