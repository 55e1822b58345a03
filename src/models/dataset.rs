//! Dataset model

use super::field::Field;
use serde::{Deserialize, Serialize};

/// A named relational schema taking part in an ingestion run.
///
/// Two datasets participate per run: the staging dataset (source of new
/// rows) and the main dataset (managed destination). Field order is
/// load-bearing: generated column lists always follow the declared order.
///
/// # Example
///
/// ```rust
/// use ingest_sql_sdk::models::{Dataset, Field};
///
/// let staging = Dataset::new(
///     "staging",
///     vec![
///         Field::new("id", "INT64").as_primary_key(),
///         Field::new("amount", "FLOAT64"),
///     ],
/// )
/// .in_database("mydb");
/// assert_eq!(staging.primary_key_names(), vec!["id"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    /// Database (or project/schema) qualifier, rendered before the table name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Table name
    pub name: String,
    /// Alias used to qualify column references in generated statements.
    /// Defaults to "stage" for staging-side datasets and "sink" for the
    /// main dataset when not set. Aliases are never case-folded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Ordered column schema
    pub schema: Vec<Field>,
}

impl Dataset {
    /// Create a new dataset with the given name and schema.
    pub fn new(name: impl Into<String>, schema: Vec<Field>) -> Self {
        Self {
            database: None,
            name: name.into(),
            alias: None,
            schema,
        }
    }

    /// Qualify the dataset with a database name.
    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Override the alias used for column references.
    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The alias to use in generated statements, falling back to `default`.
    pub fn alias_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.alias.as_deref().unwrap_or(default)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.schema.iter().find(|f| f.name == name)
    }

    /// Primary-key fields in declared order.
    pub fn primary_key_fields(&self) -> Vec<&Field> {
        self.schema.iter().filter(|f| f.primary_key).collect()
    }

    /// Primary-key field names in declared order.
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.schema
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| f.name.as_str())
            .collect()
    }
}
