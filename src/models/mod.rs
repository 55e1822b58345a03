//! Ingestion specification model
//!
//! Immutable value types describing dataset schemas, the ingest mode, and
//! the cross-cutting strategies (auditing, deduplication, versioning,
//! data splitting). The generator borrows these read-only; compilation
//! never mutates or aliases a caller's specification.

pub mod dataset;
pub mod field;
pub mod ingest_mode;
pub mod split;
pub mod statistics;

pub use dataset::Dataset;
pub use field::Field;
pub use ingest_mode::{Auditing, Deduplication, IngestMode, TransactionMilestoning, Versioning};
pub use split::{
    DATA_SPLIT_COLUMN, DATA_SPLIT_LOWER_BOUND_PLACEHOLDER, DATA_SPLIT_UPPER_BOUND_PLACEHOLDER,
    DataSplitRange,
};
pub use statistics::StatisticName;
