//! Ingest SQL SDK - relational ingestion SQL-generation engine
//!
//! Compiles a declarative batch-ingestion specification (append-only,
//! nontemporal snapshot, or temporal milestoning; with optional auditing,
//! deduplication, versioning, existing-record filtering and large-batch
//! splitting) into the exact, ordered sequence of SQL statements that
//! moves data from a staging table into a managed main table, plus
//! companion statistics queries.
//!
//! The engine renders SQL text only. Executing the statements, transaction
//! management, metadata catalogs and schema introspection belong to the
//! caller. Compilation is deterministic: the same specification and
//! dialect always produce byte-identical statements.

pub mod dialect;
pub mod generator;
pub mod models;

// Re-export commonly used types
pub use dialect::{CaseConversion, Dialect};
pub use generator::{GeneratorError, GeneratorResult, RelationalGenerator};
pub use models::{
    Auditing, DataSplitRange, Dataset, Deduplication, Field, IngestMode, StatisticName,
    TransactionMilestoning, Versioning,
};
