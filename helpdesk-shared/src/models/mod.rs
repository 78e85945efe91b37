/// Database models for the helpdesk backend
///
/// Row types and CRUD operations for the tables created by the schema
/// provisioner.
///
/// # Models
///
/// - `organization`: customer organizations
/// - `user`: user accounts, optionally attached to an organization
///
/// # Example
///
/// ```no_run
/// use helpdesk_shared::models::organization::{CreateOrganization, Organization};
/// use helpdesk_shared::models::user::{CreateUser, User};
/// use helpdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::from_env()?).await?;
///
/// let org = Organization::create(&pool, CreateOrganization::named("Acme Support")).await?;
///
/// let new_user = CreateUser {
///     organization_id: Some(org.id),
///     first_name: Some("Ada".to_string()),
///     ..CreateUser::with_email("ada@acme.test")
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

use thiserror::Error;

pub mod organization;
pub mod user;

/// Errors returned by model operations
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input rejected before reaching the database
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ModelError {
    /// Whether the database rejected a duplicate value (e.g. an existing email)
    pub fn is_unique_violation(&self) -> bool {
        self.database_error()
            .map_or(false, |err| err.is_unique_violation())
    }

    /// Whether the database rejected a reference to a missing row
    pub fn is_foreign_key_violation(&self) -> bool {
        self.database_error()
            .map_or(false, |err| err.is_foreign_key_violation())
    }

    /// Name of the violated constraint, if the database reported one
    pub fn constraint(&self) -> Option<&str> {
        self.database_error().and_then(|err| err.constraint())
    }

    fn database_error(&self) -> Option<&dyn sqlx::error::DatabaseError> {
        match self {
            ModelError::Database(sqlx::Error::Database(err)) => Some(&**err),
            _ => None,
        }
    }
}

/// Builds an INSERT for the columns that carry a value
///
/// Columns left out fall back to their storage-layer defaults. Placeholders
/// are numbered in the order of `columns`.
pub(crate) fn insert_statement(table: &str, columns: &[&str], returning: &str) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        columns.join(", "),
        placeholders.join(", "),
        returning
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_statement_numbers_placeholders() {
        let sql = insert_statement("organizations", &["name", "plan"], "id, name");
        assert_eq!(
            sql,
            "INSERT INTO organizations (name, plan) VALUES ($1, $2) RETURNING id, name"
        );
    }

    #[test]
    fn test_non_database_errors_are_not_violations() {
        let err = ModelError::Database(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(err.constraint().is_none());
    }
}
