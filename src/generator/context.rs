//! Shared compilation context handed to the per-mode planners

use std::collections::BTreeMap;

use super::builder::{Expr, SqlContext};
use crate::models::split::{
    DATA_SPLIT_COLUMN, DATA_SPLIT_LOWER_BOUND_PLACEHOLDER, DATA_SPLIT_UPPER_BOUND_PLACEHOLDER,
};
use crate::models::{Dataset, StatisticName};

/// Everything a mode planner needs, resolved once per compilation:
/// the rendering context, the participating datasets (with `source` being
/// the temp staging table when deduplication or versioning materialized
/// one), and the generator options already normalized to render-ready form.
pub(crate) struct CompileEnv<'a> {
    pub ctx: SqlContext,
    pub main: &'a Dataset,
    pub staging: &'a Dataset,
    /// Dataset the ingest statement reads from: staging, or the temp
    /// staging table when one is planned.
    pub source: &'a Dataset,
    pub uses_temp: bool,
    /// All-versions versioning is active, so range-dependent statements
    /// carry the split placeholder bounds.
    pub splitting: bool,
    /// Batch timestamp pre-formatted as `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub batch_timestamp: String,
    pub batch_id: u64,
}

impl CompileEnv<'_> {
    /// The two split-bound comparisons over the source's `data_split`
    /// column, with the placeholder tokens as quoted literals. Empty when
    /// the specification declares no split.
    pub fn split_predicates(&self) -> Vec<Expr> {
        if !self.splitting {
            return Vec::new();
        }
        let stage = self.source.alias_or("stage");
        vec![
            Expr::GtEq(
                Box::new(Expr::column(stage, DATA_SPLIT_COLUMN)),
                Box::new(Expr::string_literal(DATA_SPLIT_LOWER_BOUND_PLACEHOLDER)),
            ),
            Expr::LtEq(
                Box::new(Expr::column(stage, DATA_SPLIT_COLUMN)),
                Box::new(Expr::string_literal(DATA_SPLIT_UPPER_BOUND_PLACEHOLDER)),
            ),
        ]
    }
}

/// Output of a mode planner: the ingest statements and statistics queries,
/// still in template form (split placeholders unsubstituted).
pub(crate) struct ModePlan {
    pub ingest_sql: Vec<String>,
    pub statistics: BTreeMap<StatisticName, Option<String>>,
}
