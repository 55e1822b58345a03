//! Statistics compiler
//!
//! Derives the post-ingest metric queries from the specification alone;
//! none of them depend on execution results. The rows-inserted query for
//! audited ingestion is self-referential (rows carrying the maximum audit
//! timestamp) because the engine has no access to execution-time counts.

use super::builder::{Expr, SqlContext, select};
use super::context::CompileEnv;
use super::dedup::COUNT_COLUMN;
use crate::models::{Dataset, StatisticName};

/// Constant-zero metric query, e.g. `` SELECT 0 as `rowsUpdated` ``.
pub(crate) fn zero(ctx: &SqlContext, stat: StatisticName) -> String {
    ctx.select_zero(stat.alias())
}

/// Incoming-record count. Under all-versions versioning the temp staging
/// table has already collapsed identical rows, so the metric sums the
/// synthetic count column (bounded by the split range) instead of counting
/// rows in the raw staging table.
pub(crate) fn incoming_record_count(env: &CompileEnv) -> String {
    let ctx = &env.ctx;
    let alias = StatisticName::IncomingRecordCount.alias();
    if env.splitting && env.uses_temp {
        let stage = env.source.alias_or("stage");
        let projection = format!(
            "COALESCE(SUM({}),0) as {}",
            ctx.column_ref(stage, COUNT_COLUMN),
            ctx.quote(alias)
        );
        select(
            &projection,
            &ctx.table_ref(env.source, "stage"),
            Expr::and_all(env.split_predicates()).map(|e| e.render(ctx)),
            None,
        )
    } else {
        ctx.select_count(env.staging, "stage", alias, None)
    }
}

/// Audited rows-inserted: count of main rows whose audit timestamp equals
/// the maximum audit timestamp in main.
pub(crate) fn audit_rows_inserted(ctx: &SqlContext, main: &Dataset, audit_field: &str) -> String {
    let sink = main.alias_or("sink");
    let max_subquery = select(
        &format!("MAX({})", ctx.column_ref(sink, audit_field)),
        &ctx.table_ref(main, "sink"),
        None,
        None,
    );
    let where_ = Expr::Eq(
        Box::new(Expr::column(sink, audit_field)),
        Box::new(Expr::Raw(format!("({max_subquery})"))),
    );
    ctx.select_count(
        main,
        "sink",
        StatisticName::RowsInserted.alias(),
        Some(&where_),
    )
}

/// Plain row count of a dataset, e.g. `` SELECT COUNT(*) as `rowsDeleted` ``.
pub(crate) fn row_count(
    ctx: &SqlContext,
    ds: &Dataset,
    default_alias: &str,
    stat: StatisticName,
) -> String {
    ctx.select_count(ds, default_alias, stat.alias(), None)
}
