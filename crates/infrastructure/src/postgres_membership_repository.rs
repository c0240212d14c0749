use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use wayfare_application::MembershipRepository;
use wayfare_core::{ActorId, AppError, AppResult, SiteId};
use wayfare_domain::{
    EmailAddress, Membership, MembershipBinding, MembershipId, MembershipStatus, Role,
};

use crate::is_unique_violation;

/// PostgreSQL-backed membership and invite repository.
#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    id: Uuid,
    site_id: Uuid,
    actor_id: Option<Uuid>,
    email: Option<String>,
    role: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl MembershipRow {
    fn into_membership(self) -> AppResult<Membership> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        let binding = match (MembershipStatus::parse(self.status.as_str())?, self.actor_id) {
            (MembershipStatus::Active, Some(actor_id)) => MembershipBinding::Active {
                actor_id: ActorId::from_uuid(actor_id),
                email,
            },
            (MembershipStatus::Pending, _) => MembershipBinding::Pending {
                email: email.ok_or_else(|| {
                    AppError::Internal(format!("pending membership '{}' has no email", self.id))
                })?,
            },
            (MembershipStatus::Active, None) => {
                return Err(AppError::Internal(format!(
                    "active membership '{}' has no actor",
                    self.id
                )));
            }
        };

        Membership::new(
            MembershipId::from_uuid(self.id),
            SiteId::from_uuid(self.site_id),
            binding,
            Role::from_str(self.role.as_str())?,
            self.created_at,
        )
    }
}

fn rows_into_memberships(rows: Vec<MembershipRow>) -> AppResult<Vec<Membership>> {
    rows.into_iter().map(MembershipRow::into_membership).collect()
}

fn duplicate_membership(membership: &Membership) -> AppError {
    AppError::Conflict(format!(
        "site '{}' already has a membership for this actor or email",
        membership.site_id()
    ))
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn list_memberships(&self, site_id: SiteId) -> AppResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, site_id, actor_id, email, role, status, created_at
            FROM site_memberships
            WHERE site_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(site_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list memberships: {error}")))?;

        rows_into_memberships(rows)
    }

    async fn find_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<Option<Membership>> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, site_id, actor_id, email, role, status, created_at
            FROM site_memberships
            WHERE id = $1 AND site_id = $2
            "#,
        )
        .bind(membership_id.as_uuid())
        .bind(site_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find membership: {error}")))?;

        row.map(MembershipRow::into_membership).transpose()
    }

    async fn find_active_membership(
        &self,
        site_id: SiteId,
        actor_id: ActorId,
    ) -> AppResult<Option<Membership>> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, site_id, actor_id, email, role, status, created_at
            FROM site_memberships
            WHERE site_id = $1 AND actor_id = $2 AND status = 'active'
            "#,
        )
        .bind(site_id.as_uuid())
        .bind(actor_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve active membership: {error}"))
        })?;

        row.map(MembershipRow::into_membership).transpose()
    }

    async fn list_pending_invites(&self, email: &EmailAddress) -> AppResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, site_id, actor_id, email, role, status, created_at
            FROM site_memberships
            WHERE email = $1 AND status = 'pending'
            ORDER BY created_at, id
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list pending invites: {error}"))
        })?;

        rows_into_memberships(rows)
    }

    async fn create_membership(&self, membership: &Membership) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO site_memberships (
                id,
                site_id,
                actor_id,
                email,
                role,
                status,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(membership.id().as_uuid())
        .bind(membership.site_id().as_uuid())
        .bind(membership.actor_id().map(|actor_id| actor_id.as_uuid()))
        .bind(membership.email().map(EmailAddress::as_str))
        .bind(membership.role().as_str())
        .bind(membership.status().as_str())
        .bind(membership.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(duplicate_membership(membership)),
            Err(error) => Err(AppError::Internal(format!(
                "failed to create membership: {error}"
            ))),
        }
    }

    async fn update_membership(&self, membership: &Membership) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE site_memberships
            SET actor_id = $3, email = $4, role = $5, status = $6
            WHERE id = $1 AND site_id = $2
            "#,
        )
        .bind(membership.id().as_uuid())
        .bind(membership.site_id().as_uuid())
        .bind(membership.actor_id().map(|actor_id| actor_id.as_uuid()))
        .bind(membership.email().map(EmailAddress::as_str))
        .bind(membership.role().as_str())
        .bind(membership.status().as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound(format!(
                "membership '{}' not found in site '{}'",
                membership.id(),
                membership.site_id()
            ))),
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(duplicate_membership(membership)),
            Err(error) => Err(AppError::Internal(format!(
                "failed to update membership: {error}"
            ))),
        }
    }

    async fn delete_membership(
        &self,
        site_id: SiteId,
        membership_id: MembershipId,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM site_memberships WHERE id = $1 AND site_id = $2")
            .bind(membership_id.as_uuid())
            .bind(site_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete membership: {error}"))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "membership '{membership_id}' not found in site '{site_id}'"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
