/// Schema objects and the statements that ensure them
///
/// Every statement here is create-if-absent: running it against a database
/// that already has the object is a no-op, and an existing object with a
/// different shape is left untouched.
///
/// # Schema
///
/// ```sql
/// CREATE EXTENSION IF NOT EXISTS "uuid-ossp";
///
/// CREATE TABLE IF NOT EXISTS organizations (
///     id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     name VARCHAR(255) NOT NULL,
///     plan VARCHAR(50) NOT NULL DEFAULT 'starter',
///     status VARCHAR(50) NOT NULL DEFAULT 'active',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
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

use serde::Serialize;
use std::fmt;

pub const UUID_EXTENSION: &str = "uuid-ossp";
pub const ORGANIZATIONS_TABLE: &str = "organizations";
pub const USERS_TABLE: &str = "users";

pub const DEFAULT_ORGANIZATION_PLAN: &str = "starter";
pub const DEFAULT_ORGANIZATION_STATUS: &str = "active";
// New accounts are administrators unless the caller says otherwise.
pub const DEFAULT_USER_ROLE: &str = "admin";
pub const DEFAULT_USER_STATUS: &str = "active";

const CREATE_UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

const CREATE_ORGANIZATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS organizations (
    id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
    name VARCHAR(255) NOT NULL,
    plan VARCHAR(50) NOT NULL DEFAULT 'starter',
    status VARCHAR(50) NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

// The foreign key keeps the default NO ACTION rule: an organization that
// still has users cannot be deleted.
const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
    organization_id UUID REFERENCES organizations(id),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255),
    first_name VARCHAR(100),
    last_name VARCHAR(100),
    role VARCHAR(50) NOT NULL DEFAULT 'admin',
    status VARCHAR(50) NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// A database object the provisioner is responsible for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SchemaObject {
    Extension(&'static str),
    Table(&'static str),
}

impl SchemaObject {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaObject::Extension(name) | SchemaObject::Table(name) => name,
        }
    }
}

impl fmt::Display for SchemaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaObject::Extension(name) => write!(f, "extension \"{}\"", name),
            SchemaObject::Table(name) => write!(f, "table {}", name),
        }
    }
}

/// One idempotent statement and the object it ensures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStep {
    pub object: SchemaObject,
    pub statement: &'static str,
}

impl ProvisionStep {
    pub fn extension(name: &'static str, statement: &'static str) -> Self {
        Self {
            object: SchemaObject::Extension(name),
            statement,
        }
    }

    pub fn table(name: &'static str, statement: &'static str) -> Self {
        Self {
            object: SchemaObject::Table(name),
            statement,
        }
    }
}

/// The helpdesk bootstrap plan, in dependency order
pub fn standard_steps() -> Vec<ProvisionStep> {
    vec![
        ProvisionStep::extension(UUID_EXTENSION, CREATE_UUID_EXTENSION),
        ProvisionStep::table(ORGANIZATIONS_TABLE, CREATE_ORGANIZATIONS),
        ProvisionStep::table(USERS_TABLE, CREATE_USERS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_steps_order() {
        let objects: Vec<SchemaObject> = standard_steps().iter().map(|s| s.object).collect();
        assert_eq!(
            objects,
            vec![
                SchemaObject::Extension("uuid-ossp"),
                SchemaObject::Table("organizations"),
                SchemaObject::Table("users"),
            ]
        );
    }

    #[test]
    fn test_every_statement_is_create_if_absent() {
        for step in standard_steps() {
            assert!(
                step.statement.contains("IF NOT EXISTS"),
                "{} is not idempotent",
                step.object
            );
        }
    }

    #[test]
    fn test_statements_carry_documented_defaults() {
        let steps = standard_steps();
        let organizations = steps[1].statement;
        let users = steps[2].statement;

        assert!(organizations.contains(&format!("DEFAULT '{}'", DEFAULT_ORGANIZATION_PLAN)));
        assert!(organizations.contains(&format!("DEFAULT '{}'", DEFAULT_ORGANIZATION_STATUS)));
        assert!(users.contains(&format!("DEFAULT '{}'", DEFAULT_USER_ROLE)));
        assert!(users.contains(&format!("DEFAULT '{}'", DEFAULT_USER_STATUS)));
        assert!(users.contains("REFERENCES organizations(id)"));
        assert!(users.contains("NOT NULL UNIQUE"));
    }

    #[test]
    fn test_schema_object_display() {
        assert_eq!(
            SchemaObject::Extension("uuid-ossp").to_string(),
            "extension \"uuid-ossp\""
        );
        assert_eq!(SchemaObject::Table("users").to_string(), "table users");
        assert_eq!(SchemaObject::Table("users").name(), "users");
    }

    #[test]
    fn test_schema_object_serializes_with_kind() {
        let json = serde_json::to_value(SchemaObject::Table("organizations")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "table", "name": "organizations"}));
    }
}
