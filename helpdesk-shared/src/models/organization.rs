/// Organization model and database operations
///
/// Organizations group users; a user may also exist without one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS organizations (
///     id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     name VARCHAR(255) NOT NULL,
///     plan VARCHAR(50) NOT NULL DEFAULT 'starter',
///     status VARCHAR(50) NOT NULL DEFAULT 'active',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use helpdesk_shared::models::organization::{CreateOrganization, Organization};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let org = Organization::create(&pool, CreateOrganization::named("Acme Support")).await?;
/// assert_eq!(org.plan, "starter");
/// # Ok(())
/// # }
/// ```

use crate::models::{insert_statement, ModelError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const COLUMNS: &str = "id, name, plan, status, created_at";

/// Organization row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Server-generated identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Subscription tier (defaults to "starter")
    pub plan: String,

    /// Lifecycle status (defaults to "active")
    pub status: String,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a new organization
///
/// `plan` and `status` are left to the database defaults when `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateOrganization {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub plan: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
}

impl CreateOrganization {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Organization {
    /// Creates a new organization
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] for invalid input, otherwise
    /// [`ModelError::Database`] if the insert fails.
    pub async fn create(pool: &PgPool, data: CreateOrganization) -> Result<Self, ModelError> {
        data.validate()?;

        let mut columns = vec!["name"];
        if data.plan.is_some() {
            columns.push("plan");
        }
        if data.status.is_some() {
            columns.push("status");
        }

        let query = insert_statement("organizations", &columns, COLUMNS);
        let mut q = sqlx::query_as::<_, Organization>(&query).bind(data.name);

        if let Some(plan) = data.plan {
            q = q.bind(plan);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let organization = q.fetch_one(pool).await?;

        tracing::debug!(organization_id = %organization.id, "Organization created");
        Ok(organization)
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Deletes an organization by ID
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if it didn't exist
    ///
    /// # Errors
    ///
    /// Fails with a foreign-key violation while users still reference the
    /// organization.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, ModelError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_leaves_defaults_to_database() {
        let data = CreateOrganization::named("Acme");
        assert_eq!(data.name, "Acme");
        assert!(data.plan.is_none());
        assert!(data.status.is_none());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let data = CreateOrganization::named("");
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_plan() {
        let data = CreateOrganization {
            plan: Some("p".repeat(51)),
            ..CreateOrganization::named("Acme")
        };
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("plan"));
    }
}
