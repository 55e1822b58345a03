//! SQL dialect capabilities
//!
//! A [`Dialect`] describes how one target relational system renders
//! identifiers, datetime literals and temp-table names. Dialects are
//! stateless: every function is a pure function of its inputs, so a
//! dialect value can be shared freely across threads. Adding a new target
//! database means extending this module only; no planner changes.

use serde::{Deserialize, Serialize};

/// Suffix appended to a staging table name to derive its managed temp
/// staging table.
pub const TEMP_STAGING_SUFFIX: &str = "_legend_persistence_temp_staging";

/// Identifier case-folding policy.
///
/// Folding applies to every quoted identifier, including temp-table names
/// and statistic aliases. Table aliases (`stage`, `sink`) are never folded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CaseConversion {
    #[default]
    Preserve,
    ToUpper,
}

impl CaseConversion {
    pub fn apply(&self, identifier: &str) -> String {
        match self {
            CaseConversion::Preserve => identifier.to_string(),
            CaseConversion::ToUpper => identifier.to_uppercase(),
        }
    }
}

/// Target relational system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Dialect {
    BigQuery,
    Snowflake,
    /// Generic ANSI rendering: double-quoted identifiers, plain datetime
    /// literals, no window functions.
    Ansi,
}

impl Dialect {
    /// Identifier quoting character.
    pub fn quote_char(&self) -> char {
        match self {
            Dialect::BigQuery => '`',
            Dialect::Snowflake | Dialect::Ansi => '"',
        }
    }

    /// Quote and case-fold an identifier. Internal quote characters are
    /// escaped by doubling, per SQL convention.
    pub fn quote(&self, identifier: &str, case: CaseConversion) -> String {
        let q = self.quote_char();
        let folded = case.apply(identifier);
        let escaped = folded.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Render a datetime literal from a `YYYY-MM-DD HH:MM:SS.ffffff` string.
    pub fn render_datetime_literal(&self, timestamp: &str) -> String {
        match self {
            Dialect::BigQuery => {
                format!("PARSE_DATETIME('%Y-%m-%d %H:%M:%S','{timestamp}')")
            }
            Dialect::Snowflake => format!("TO_TIMESTAMP('{timestamp}')"),
            Dialect::Ansi => format!("'{timestamp}'"),
        }
    }

    /// Name of the managed temp staging table derived from a staging table.
    pub fn temp_staging_name(&self, base: &str) -> String {
        format!("{base}{TEMP_STAGING_SUFFIX}")
    }

    /// Physical type used for engine-managed integer bookkeeping columns.
    pub fn integer_type(&self) -> &'static str {
        match self {
            Dialect::BigQuery => "INT64",
            Dialect::Snowflake => "INTEGER",
            Dialect::Ansi => "INT",
        }
    }

    /// Whether the target supports window functions (required by the
    /// max-version and all-versions planners).
    pub fn supports_window_functions(&self) -> bool {
        !matches!(self, Dialect::Ansi)
    }

    /// Suffix appended to generated PRIMARY KEY constraints.
    pub fn primary_key_suffix(&self) -> &'static str {
        match self {
            Dialect::BigQuery => " NOT ENFORCED",
            Dialect::Snowflake | Dialect::Ansi => "",
        }
    }
}
