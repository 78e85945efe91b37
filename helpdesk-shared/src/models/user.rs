/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS users (
///     id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     organization_id UUID REFERENCES organizations(id),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255),
///     first_name VARCHAR(100),
///     last_name VARCHAR(100),
///     role VARCHAR(50) NOT NULL DEFAULT 'admin',
///     status VARCHAR(50) NOT NULL DEFAULT 'active',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Emails are unique across all users and `organization_id`, when set, must
/// name an existing organization. Both rules are enforced by the database;
/// violations surface as [`ModelError::is_unique_violation`] and
/// [`ModelError::is_foreign_key_violation`].

use crate::models::{insert_statement, ModelError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const COLUMNS: &str =
    "id, organization_id, email, password_hash, first_name, last_name, role, status, created_at";

/// User account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Owning organization, if any
    pub organization_id: Option<Uuid>,

    /// Unique across all users
    pub email: String,

    /// Absent when no local credential is set
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Defaults to "admin"
    pub role: String,

    /// Defaults to "active"
    pub status: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// First and last name joined, when at least one is present
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

/// Input for creating a new user
///
/// `role` and `status` are left to the database defaults when `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    pub organization_id: Option<Uuid>,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(length(max = 255))]
    pub password_hash: Option<String>,

    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub role: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
}

impl CreateUser {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// - [`ModelError::Validation`] if the email is malformed or a field is too long
    /// - a unique violation if the email is already taken
    /// - a foreign-key violation if `organization_id` names no organization
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, ModelError> {
        data.validate()?;

        let mut columns = vec!["email"];
        let optional = [
            ("organization_id", data.organization_id.is_some()),
            ("password_hash", data.password_hash.is_some()),
            ("first_name", data.first_name.is_some()),
            ("last_name", data.last_name.is_some()),
            ("role", data.role.is_some()),
            ("status", data.status.is_some()),
        ];
        columns.extend(optional.iter().filter(|(_, present)| *present).map(|(c, _)| *c));

        let query = insert_statement("users", &columns, COLUMNS);
        let mut q = sqlx::query_as::<_, User>(&query).bind(data.email);

        // Bind order must follow `optional` above
        if let Some(organization_id) = data.organization_id {
            q = q.bind(organization_id);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(first_name) = data.first_name {
            q = q.bind(first_name);
        }
        if let Some(last_name) = data.last_name {
            q = q.bind(last_name);
        }
        if let Some(role) = data.role {
            q = q.bind(role);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let user = q.fetch_one(pool).await?;

        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by exact email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            COLUMNS
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists the users of an organization, oldest first
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE organization_id = $1 ORDER BY created_at, email",
            COLUMNS
        ))
        .bind(organization_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Deletes a user by ID
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
