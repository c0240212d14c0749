//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod hosted_auth_identity_provider;
mod in_memory_store;
mod postgres_active_site_store;
mod postgres_audit_repository;
mod postgres_content_catalog;
mod postgres_membership_repository;
mod postgres_menu_repository;
mod postgres_site_repository;

#[cfg(test)]
mod postgres_test_support;

pub use hosted_auth_identity_provider::HostedAuthIdentityProvider;
pub use in_memory_store::InMemoryStore;
pub use postgres_active_site_store::PostgresActiveSiteStore;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_content_catalog::PostgresContentCatalog;
pub use postgres_membership_repository::PostgresMembershipRepository;
pub use postgres_menu_repository::PostgresMenuRepository;
pub use postgres_site_repository::PostgresSiteRepository;

fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(database_error) = error {
        return database_error.code().as_deref() == Some("23505");
    }

    false
}
