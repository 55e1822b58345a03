//! Generator result

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::StatisticName;

/// The ordered statement groups produced by one compilation (one per data
/// split range when splitting is declared).
///
/// Constructed once by the generator and never mutated afterwards; the
/// strings are owned and never alias the caller's specification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorResult {
    pre_actions_sql: Vec<String>,
    deduplication_and_versioning_sql: Vec<String>,
    ingest_sql: Vec<String>,
    post_actions_sql: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deduplication_error_check_sql: Option<String>,
    post_ingest_statistics_sql: BTreeMap<StatisticName, Option<String>>,
}

impl GeneratorResult {
    pub(crate) fn new(
        pre_actions_sql: Vec<String>,
        deduplication_and_versioning_sql: Vec<String>,
        ingest_sql: Vec<String>,
        post_actions_sql: Vec<String>,
        deduplication_error_check_sql: Option<String>,
        post_ingest_statistics_sql: BTreeMap<StatisticName, Option<String>>,
    ) -> Self {
        Self {
            pre_actions_sql,
            deduplication_and_versioning_sql,
            ingest_sql,
            post_actions_sql,
            deduplication_error_check_sql,
            post_ingest_statistics_sql,
        }
    }

    /// Idempotent DDL creating the main table and the ingest source table.
    pub fn pre_actions_sql(&self) -> &[String] {
        &self.pre_actions_sql
    }

    /// Temp-staging cleanup and populate statements; empty when no
    /// deduplication or versioning strategy is active.
    pub fn deduplication_and_versioning_sql(&self) -> &[String] {
        &self.deduplication_and_versioning_sql
    }

    /// The statements moving rows into the main table.
    pub fn ingest_sql(&self) -> &[String] {
        &self.ingest_sql
    }

    /// Cleanup statements to run after ingestion.
    pub fn post_actions_sql(&self) -> &[String] {
        &self.post_actions_sql
    }

    /// Duplicate-count guard query for fail-on-duplicates; the caller is
    /// expected to assert the count before running the ingest statements.
    pub fn deduplication_error_check_sql(&self) -> Option<&str> {
        self.deduplication_error_check_sql.as_deref()
    }

    /// Metric queries keyed by statistic name. Every key is present;
    /// metrics that do not apply map to `None`, never to an empty string.
    pub fn post_ingest_statistics_sql(&self) -> &BTreeMap<StatisticName, Option<String>> {
        &self.post_ingest_statistics_sql
    }

    /// Convenience lookup of a single statistic query.
    pub fn statistic(&self, name: StatisticName) -> Option<&str> {
        self.post_ingest_statistics_sql
            .get(&name)
            .and_then(|sql| sql.as_deref())
    }
}
