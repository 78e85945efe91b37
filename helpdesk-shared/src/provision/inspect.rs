/// Read-only view of the provisioned schema
///
/// Reports which provisioned objects exist in the connection's current schema
/// and, for tables, their column shapes. Two snapshots taken before and after
/// a provisioning run compare equal when the run changed nothing.

use crate::provision::schema::SchemaObject;
use serde::Serialize;
use sqlx::postgres::PgConnection;
use std::collections::BTreeMap;
use tracing::debug;

/// One column as reported by `information_schema.columns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub column_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    /// Schema the tables were looked up in (`current_schema()`)
    pub schema: String,

    /// Extension name to whether it is installed in the database
    pub extensions: BTreeMap<&'static str, bool>,

    /// Table name to its columns in ordinal order; empty when the table is absent
    pub tables: BTreeMap<&'static str, Vec<ColumnInfo>>,
}

impl SchemaSnapshot {
    /// Objects that do not exist yet
    pub fn missing(&self) -> Vec<SchemaObject> {
        let extensions = self
            .extensions
            .iter()
            .filter(|(_, installed)| !**installed)
            .map(|(name, _)| SchemaObject::Extension(*name));
        let tables = self
            .tables
            .iter()
            .filter(|(_, columns)| columns.is_empty())
            .map(|(name, _)| SchemaObject::Table(*name));
        extensions.chain(tables).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Columns of `table`, if the table was inspected and exists
    pub fn columns(&self, table: &str) -> Option<&[ColumnInfo]> {
        self.tables
            .get(table)
            .filter(|columns| !columns.is_empty())
            .map(Vec::as_slice)
    }
}

/// Inspects `objects` on the given connection
///
/// # Errors
///
/// Returns an error if the catalog queries fail.
pub async fn inspect_schema(
    conn: &mut PgConnection,
    objects: &[SchemaObject],
) -> Result<SchemaSnapshot, sqlx::Error> {
    let schema: Option<String> = sqlx::query_scalar("SELECT current_schema()::text")
        .fetch_one(&mut *conn)
        .await?;

    let mut snapshot = SchemaSnapshot {
        schema: schema.unwrap_or_default(),
        extensions: BTreeMap::new(),
        tables: BTreeMap::new(),
    };

    for object in objects {
        match *object {
            SchemaObject::Extension(name) => {
                let installed: bool = sqlx::query_scalar(
                    "SELECT EXISTS (SELECT 1 FROM pg_extension WHERE extname = $1)",
                )
                .bind(name)
                .fetch_one(&mut *conn)
                .await?;
                snapshot.extensions.insert(name, installed);
            }
            SchemaObject::Table(name) => {
                let columns = sqlx::query_as::<_, ColumnInfo>(
                    r#"
                    SELECT column_name::text AS name,
                           data_type::text AS data_type,
                           (is_nullable = 'YES') AS is_nullable,
                           column_default::text AS column_default
                    FROM information_schema.columns
                    WHERE table_schema = current_schema()
                      AND table_name = $1
                    ORDER BY ordinal_position
                    "#,
                )
                .bind(name)
                .fetch_all(&mut *conn)
                .await?;
                snapshot.tables.insert(name, columns);
            }
        }
    }

    debug!(
        schema = %snapshot.schema,
        missing = snapshot.missing().len(),
        "Schema inspected"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            data_type: "uuid".to_string(),
            is_nullable: false,
            column_default: None,
        }
    }

    #[test]
    fn test_missing_lists_absent_objects() {
        let snapshot = SchemaSnapshot {
            schema: "public".to_string(),
            extensions: BTreeMap::from([("uuid-ossp", true)]),
            tables: BTreeMap::from([
                ("organizations", vec![column("id")]),
                ("users", Vec::new()),
            ]),
        };

        assert_eq!(snapshot.missing(), vec![SchemaObject::Table("users")]);
        assert!(!snapshot.is_complete());
        assert!(snapshot.columns("users").is_none());
        assert_eq!(snapshot.columns("organizations").map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_complete_snapshot() {
        let snapshot = SchemaSnapshot {
            schema: "public".to_string(),
            extensions: BTreeMap::from([("uuid-ossp", true)]),
            tables: BTreeMap::from([("organizations", vec![column("id")])]),
        };
        assert!(snapshot.is_complete());
    }
}
