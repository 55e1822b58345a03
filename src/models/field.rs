//! Field model for dataset schemas

use serde::{Deserialize, Serialize};

/// A single column in a dataset schema.
///
/// `data_type` is the physical column type for the target database
/// (e.g. "INT64", "STRING", "DATE") and is rendered verbatim into DDL.
///
/// # Example
///
/// ```rust
/// use ingest_sql_sdk::models::Field;
///
/// let field = Field::new("id", "INT64").as_primary_key();
/// assert!(field.primary_key);
/// assert!(!field.nullable);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    /// Column name
    pub name: String,
    /// Physical column type, rendered verbatim into DDL
    pub data_type: String,
    /// Whether the column allows NULL values (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Whether this column is part of the primary key (default: false)
    #[serde(default)]
    pub primary_key: bool,
}

fn default_true() -> bool {
    true
}

impl Field {
    /// Create a new nullable, non-key field.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            primary_key: false,
        }
    }

    /// Mark the field NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the field as part of the primary key. Primary-key fields are
    /// implicitly NOT NULL.
    pub fn as_primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}
