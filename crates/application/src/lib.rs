//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod identity_ports;
mod membership_ports;
mod menu_ports;
mod menu_service;
mod role_resolver;
mod site_context;
mod site_ports;
mod team_service;

#[cfg(test)]
mod test_support;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::{AuthorizationService, SitePermissions};
pub use identity_ports::IdentityProvider;
pub use membership_ports::MembershipRepository;
pub use menu_ports::{ContentCatalog, DeriveMenuItemInput, MenuRepository, SaveMenuInput};
pub use menu_service::MenuService;
pub use role_resolver::{RoleResolution, RoleResolver};
pub use site_context::SiteContext;
pub use site_ports::{ActiveSiteStore, SiteRepository};
pub use team_service::TeamService;
