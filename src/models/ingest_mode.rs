//! Ingestion mode and cross-cutting strategy configuration
//!
//! An [`IngestMode`] fully determines which planners run and what the
//! generated statement sequence looks like. The variants are immutable
//! once constructed; the generator matches on them exhaustively.

use serde::{Deserialize, Serialize};

/// Audit strategy for generated INSERT statements.
///
/// With `DateTime` auditing, every generated INSERT appends a literal batch
/// timestamp for the named column, and the rows-inserted statistic is keyed
/// off that column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Auditing {
    #[default]
    None,
    DateTime { field: String },
}

/// How duplicate staging rows are treated before ingestion.
///
/// Any strategy other than `AllowDuplicates` materializes a temp staging
/// table whose populate statement groups by the full row and records the
/// per-row occurrence count in `legend_persistence_count`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Deduplication {
    /// Ingest the staging rows as they are.
    #[default]
    AllowDuplicates,
    /// Collapse duplicates into one counted row and emit a guard query the
    /// caller runs before ingesting; the engine never evaluates it.
    FailOnDuplicates,
    /// Keep one representative row per duplicate group.
    FilterDuplicates,
}

/// How multiple versions of the same primary key are treated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Versioning {
    #[default]
    NoVersioning,
    /// Keep only the row carrying the maximum value of `field` per key.
    MaxVersion { field: String },
    /// Keep every distinct version per key; versions are ranked into the
    /// `data_split` column so oversized batches can be ingested per range.
    AllVersions { field: String },
}

impl Versioning {
    /// The version column, when any versioning is configured.
    pub fn field(&self) -> Option<&str> {
        match self {
            Versioning::NoVersioning => None,
            Versioning::MaxVersion { field } | Versioning::AllVersions { field } => Some(field),
        }
    }
}

/// Transaction milestoning scheme for temporal modes.
///
/// `BatchId` records the ingesting batch in `in_field` and closes
/// superseded rows by writing the previous batch id into `out_field`;
/// open rows carry the sentinel `999999999`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionMilestoning {
    BatchId { in_field: String, out_field: String },
}

/// Batch-ingestion mode. Each variant carries its own required
/// sub-configuration and fully determines the generated statement shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum IngestMode {
    /// Plain INSERT into main; never updates or deletes existing rows.
    AppendOnly {
        auditing: Auditing,
        deduplication: Deduplication,
        versioning: Versioning,
        /// Exclude staging rows whose (primary key, digest) already exists
        /// in main, via a NOT EXISTS correlated subquery.
        filter_existing_records: bool,
        /// Content-hash column used by `filter_existing_records`.
        digest_field: Option<String>,
    },
    /// Replace the whole main table with the staging batch.
    NontemporalSnapshot {
        auditing: Auditing,
        deduplication: Deduplication,
        versioning: Versioning,
    },
    /// Batch-id milestoned delta: close changed rows, insert new versions.
    UnitemporalDelta {
        transaction_milestoning: TransactionMilestoning,
        deduplication: Deduplication,
        versioning: Versioning,
        digest_field: String,
    },
    /// Unitemporal delta plus validity columns sourced from staging fields.
    BitemporalDelta {
        transaction_milestoning: TransactionMilestoning,
        deduplication: Deduplication,
        versioning: Versioning,
        digest_field: String,
        validity_from_field: String,
        validity_through_field: String,
    },
}

impl IngestMode {
    pub fn deduplication(&self) -> Deduplication {
        match self {
            IngestMode::AppendOnly { deduplication, .. }
            | IngestMode::NontemporalSnapshot { deduplication, .. }
            | IngestMode::UnitemporalDelta { deduplication, .. }
            | IngestMode::BitemporalDelta { deduplication, .. } => *deduplication,
        }
    }

    pub fn versioning(&self) -> &Versioning {
        match self {
            IngestMode::AppendOnly { versioning, .. }
            | IngestMode::NontemporalSnapshot { versioning, .. }
            | IngestMode::UnitemporalDelta { versioning, .. }
            | IngestMode::BitemporalDelta { versioning, .. } => versioning,
        }
    }
}
