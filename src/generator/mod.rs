//! SQL generation
//!
//! The mode compiler: validates an ingestion specification, then runs the
//! planners in a fixed order (pre-actions, deduplication/versioning,
//! ingest, post-actions, statistics) and assembles one [`GeneratorResult`]
//! per declared data-split range. Compilation is pure and synchronous:
//! the same specification and dialect always produce byte-identical SQL,
//! and a validation failure surfaces before any statement is rendered.

mod append_only;
mod bitemporal;
mod builder;
mod context;
mod dedup;
mod result;
mod snapshot;
mod statistics;
mod unitemporal;

pub use result::GeneratorResult;
pub use unitemporal::OPEN_BATCH_ID;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::dialect::{CaseConversion, Dialect};
use crate::models::{
    Auditing, DataSplitRange, Dataset, IngestMode, TransactionMilestoning, Versioning,
};
use builder::SqlContext;
use context::CompileEnv;

/// Error during SQL generation.
///
/// `InvalidSpecification` means the specification itself is inconsistent;
/// `UnsupportedByDialect` means the specification is valid but the selected
/// dialect has no rendering rule for a requested construct. No partial
/// results are ever surfaced alongside either.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),
    #[error("Unsupported by dialect: {0}")]
    UnsupportedByDialect(String),
}

/// Compiles ingestion specifications into dialect-specific SQL.
///
/// The generator holds per-run options only (dialect, case folding, batch
/// identity, cleanup policy, split ranges); it keeps no state between
/// calls and never mutates the datasets or mode it is given.
///
/// # Example
///
/// ```rust
/// use ingest_sql_sdk::dialect::Dialect;
/// use ingest_sql_sdk::generator::RelationalGenerator;
/// use ingest_sql_sdk::models::{
///     Auditing, Dataset, Deduplication, Field, IngestMode, Versioning,
/// };
///
/// let schema = vec![Field::new("id", "INT64"), Field::new("digest", "STRING")];
/// let main = Dataset::new("main", schema.clone()).in_database("mydb");
/// let staging = Dataset::new("staging", schema).in_database("mydb");
/// let mode = IngestMode::AppendOnly {
///     auditing: Auditing::None,
///     deduplication: Deduplication::AllowDuplicates,
///     versioning: Versioning::NoVersioning,
///     filter_existing_records: false,
///     digest_field: None,
/// };
///
/// let generator = RelationalGenerator::new(Dialect::BigQuery);
/// let results = generator.generate_operations(&main, &staging, &mode).unwrap();
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RelationalGenerator {
    dialect: Dialect,
    case_conversion: CaseConversion,
    batch_timestamp: DateTime<Utc>,
    batch_id: u64,
    clean_staging_data: bool,
    data_split_ranges: Vec<DataSplitRange>,
}

impl RelationalGenerator {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            case_conversion: CaseConversion::Preserve,
            batch_timestamp: Utc::now(),
            batch_id: 1,
            clean_staging_data: true,
            data_split_ranges: Vec::new(),
        }
    }

    /// Fold every quoted identifier with the given policy.
    pub fn with_case_conversion(mut self, case_conversion: CaseConversion) -> Self {
        self.case_conversion = case_conversion;
        self
    }

    /// Timestamp rendered into audit columns. Defaults to the wall clock;
    /// fix it explicitly for reproducible output.
    pub fn with_batch_timestamp(mut self, batch_timestamp: DateTime<Utc>) -> Self {
        self.batch_timestamp = batch_timestamp;
        self
    }

    /// Batch identity for temporal milestoning (must be >= 1).
    pub fn with_batch_id(mut self, batch_id: u64) -> Self {
        self.batch_id = batch_id;
        self
    }

    /// Emit one result per range, with the split bounds substituted.
    pub fn with_data_split_ranges(mut self, ranges: Vec<DataSplitRange>) -> Self {
        self.data_split_ranges = ranges;
        self
    }

    /// Skip the post-action deleting ingested rows from the staging table.
    pub fn without_staging_cleanup(mut self) -> Self {
        self.clean_staging_data = false;
        self
    }

    /// Compile the specification into ordered statement groups.
    ///
    /// Returns one [`GeneratorResult`] when no split ranges are declared,
    /// otherwise one per range, all sharing identical pre-actions. When
    /// all-versions versioning is active but no ranges are supplied, the
    /// range-dependent statements keep the documented placeholder tokens
    /// for the caller to substitute.
    pub fn generate_operations(
        &self,
        main: &Dataset,
        staging: &Dataset,
        mode: &IngestMode,
    ) -> Result<Vec<GeneratorResult>, GeneratorError> {
        debug!(dialect = ?self.dialect, splits = self.data_split_ranges.len(), "generating ingestion operations");
        self.validate(main, staging, mode)?;

        let ctx = SqlContext::new(self.dialect, self.case_conversion);
        let dedup_plan = dedup::plan(&ctx, staging, mode.deduplication(), mode.versioning())?;
        let source = dedup_plan.temp_staging.as_ref().unwrap_or(staging);
        let env = CompileEnv {
            ctx,
            main,
            staging,
            source,
            uses_temp: dedup_plan.temp_staging.is_some(),
            splitting: dedup_plan.adds_data_split,
            batch_timestamp: self
                .batch_timestamp
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string(),
            batch_id: self.batch_id,
        };

        let mode_plan = match mode {
            IngestMode::AppendOnly {
                auditing,
                filter_existing_records,
                digest_field,
                ..
            } => append_only::plan(
                &env,
                auditing,
                *filter_existing_records,
                digest_field.as_deref(),
            ),
            IngestMode::NontemporalSnapshot { auditing, .. } => snapshot::plan(&env, auditing),
            IngestMode::UnitemporalDelta {
                transaction_milestoning,
                digest_field,
                ..
            } => unitemporal::plan(&env, transaction_milestoning, digest_field),
            IngestMode::BitemporalDelta {
                transaction_milestoning,
                digest_field,
                validity_from_field,
                ..
            } => bitemporal::plan(
                &env,
                transaction_milestoning,
                digest_field,
                validity_from_field,
            ),
        };

        let pre_actions = vec![ctx.create_table(main), ctx.create_table(source)];
        let post_actions = if self.clean_staging_data {
            vec![ctx.delete_all(staging, "stage")]
        } else {
            Vec::new()
        };

        let assemble = |range: Option<&DataSplitRange>| {
            let substitute = |sql: &String| match range {
                Some(r) => r.substitute(sql),
                None => sql.clone(),
            };
            GeneratorResult::new(
                pre_actions.clone(),
                dedup_plan.sql.clone(),
                mode_plan.ingest_sql.iter().map(substitute).collect(),
                post_actions.clone(),
                dedup_plan.error_check_sql.clone(),
                mode_plan
                    .statistics
                    .iter()
                    .map(|(name, sql)| (*name, sql.as_ref().map(|s| substitute(s))))
                    .collect(),
            )
        };

        let results = if self.data_split_ranges.is_empty() {
            vec![assemble(None)]
        } else {
            self.data_split_ranges
                .iter()
                .map(|r| assemble(Some(r)))
                .collect()
        };
        Ok(results)
    }

    fn validate(
        &self,
        main: &Dataset,
        staging: &Dataset,
        mode: &IngestMode,
    ) -> Result<(), GeneratorError> {
        if main.schema.is_empty() || staging.schema.is_empty() {
            return Err(invalid("datasets must declare at least one field"));
        }
        for field in &staging.schema {
            if main.field(&field.name).is_none() {
                return Err(invalid(format!(
                    "staging field '{}' is not declared on the main dataset",
                    field.name
                )));
            }
        }
        for pk in staging.primary_key_names() {
            let matches = main.field(pk).is_some_and(|f| f.primary_key);
            if !matches {
                return Err(invalid(format!(
                    "staging primary key '{pk}' is not a primary key on the main dataset"
                )));
            }
        }
        if let Some(version_field) = mode.versioning().field()
            && staging.field(version_field).is_none()
        {
            return Err(invalid(format!(
                "version field '{version_field}' is not declared on the staging dataset"
            )));
        }
        if !self.data_split_ranges.is_empty() {
            if !matches!(mode.versioning(), Versioning::AllVersions { .. }) {
                return Err(invalid(
                    "data split ranges require all-versions versioning",
                ));
            }
            for range in &self.data_split_ranges {
                if range.lower_bound > range.upper_bound {
                    return Err(invalid(format!(
                        "data split range [{}, {}] is inverted",
                        range.lower_bound, range.upper_bound
                    )));
                }
            }
        }

        match mode {
            IngestMode::AppendOnly {
                auditing,
                filter_existing_records,
                digest_field,
                ..
            } => {
                self.validate_auditing(main, staging, auditing)?;
                if *filter_existing_records {
                    if matches!(auditing, Auditing::None) {
                        return Err(invalid(
                            "filtering existing records requires datetime auditing",
                        ));
                    }
                    let digest = digest_field.as_deref().ok_or_else(|| {
                        invalid("filtering existing records requires a digest field")
                    })?;
                    self.validate_shared_field(main, staging, digest, "digest")?;
                    if staging.primary_key_names().is_empty() {
                        return Err(invalid(
                            "filtering existing records requires primary keys",
                        ));
                    }
                }
            }
            IngestMode::NontemporalSnapshot {
                auditing,
                versioning,
                ..
            } => {
                self.validate_auditing(main, staging, auditing)?;
                if matches!(versioning, Versioning::AllVersions { .. }) {
                    return Err(invalid(
                        "nontemporal snapshot does not support all-versions versioning",
                    ));
                }
            }
            IngestMode::UnitemporalDelta {
                transaction_milestoning,
                digest_field,
                ..
            } => {
                self.validate_delta(main, staging, transaction_milestoning, digest_field)?;
            }
            IngestMode::BitemporalDelta {
                transaction_milestoning,
                digest_field,
                validity_from_field,
                validity_through_field,
                ..
            } => {
                self.validate_delta(main, staging, transaction_milestoning, digest_field)?;
                self.validate_shared_field(main, staging, validity_from_field, "validity-from")?;
                self.validate_shared_field(
                    main,
                    staging,
                    validity_through_field,
                    "validity-through",
                )?;
            }
        }
        Ok(())
    }

    fn validate_auditing(
        &self,
        main: &Dataset,
        staging: &Dataset,
        auditing: &Auditing,
    ) -> Result<(), GeneratorError> {
        if let Auditing::DateTime { field } = auditing {
            if main.field(field).is_none() {
                return Err(invalid(format!(
                    "audit field '{field}' is not declared on the main dataset"
                )));
            }
            if staging.field(field).is_some() {
                return Err(invalid(format!(
                    "audit field '{field}' must not be declared on the staging dataset"
                )));
            }
        }
        Ok(())
    }

    fn validate_delta(
        &self,
        main: &Dataset,
        staging: &Dataset,
        milestoning: &TransactionMilestoning,
        digest_field: &str,
    ) -> Result<(), GeneratorError> {
        let TransactionMilestoning::BatchId {
            in_field,
            out_field,
        } = milestoning;
        for field in [in_field, out_field] {
            if main.field(field).is_none() {
                return Err(invalid(format!(
                    "milestoning field '{field}' is not declared on the main dataset"
                )));
            }
            if staging.field(field).is_some() {
                return Err(invalid(format!(
                    "milestoning field '{field}' must not be declared on the staging dataset"
                )));
            }
        }
        self.validate_shared_field(main, staging, digest_field, "digest")?;
        if staging.primary_key_names().is_empty() {
            return Err(invalid("temporal milestoning requires primary keys"));
        }
        if self.batch_id == 0 {
            return Err(invalid("batch id must be at least 1"));
        }
        Ok(())
    }

    fn validate_shared_field(
        &self,
        main: &Dataset,
        staging: &Dataset,
        field: &str,
        role: &str,
    ) -> Result<(), GeneratorError> {
        if staging.field(field).is_none() || main.field(field).is_none() {
            return Err(invalid(format!(
                "{role} field '{field}' must be declared on both datasets"
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> GeneratorError {
    GeneratorError::InvalidSpecification(message.into())
}
