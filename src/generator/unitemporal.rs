//! Unitemporal delta mode planner
//!
//! Batch-id milestoning: rows superseded by the incoming batch are closed
//! by writing the previous batch id into the out-column, then staging rows
//! whose digest is not already open in main are inserted with the current
//! batch id. Open rows carry the sentinel batch id `999999999`.

use std::collections::BTreeMap;

use super::builder::{Expr, select};
use super::context::{CompileEnv, ModePlan};
use super::statistics;
use crate::models::{StatisticName, TransactionMilestoning};

/// Sentinel batch-id-out value marking a row as currently open.
pub const OPEN_BATCH_ID: u64 = 999_999_999;

pub(crate) fn plan(
    env: &CompileEnv,
    milestoning: &TransactionMilestoning,
    digest_field: &str,
) -> ModePlan {
    plan_delta(env, milestoning, digest_field, &[])
}

/// Shared with the bitemporal planner, which matches additional fields
/// (the validity-from column) when deciding whether a row is superseded.
pub(crate) fn plan_delta(
    env: &CompileEnv,
    milestoning: &TransactionMilestoning,
    digest_field: &str,
    extra_match_fields: &[&str],
) -> ModePlan {
    let ctx = &env.ctx;
    let TransactionMilestoning::BatchId {
        in_field,
        out_field,
    } = milestoning;
    let stage = env.source.alias_or("stage");
    let sink = env.main.alias_or("sink");
    let close_batch_id = env.batch_id - 1;

    let open = Expr::Eq(
        Box::new(Expr::column(sink, out_field)),
        Box::new(Expr::number(OPEN_BATCH_ID)),
    );

    // Close open rows whose key matches a staging row carrying new data.
    let mut superseded: Vec<Expr> = env
        .staging
        .primary_key_names()
        .iter()
        .chain(extra_match_fields)
        .map(|f| {
            Expr::Eq(
                Box::new(Expr::column(sink, f)),
                Box::new(Expr::column(stage, f)),
            )
        })
        .collect();
    superseded.push(Expr::NotEq(
        Box::new(Expr::column(sink, digest_field)),
        Box::new(Expr::column(stage, digest_field)),
    ));
    superseded.extend(env.split_predicates());
    let superseded_subquery = select(
        "*",
        &ctx.table_ref(env.source, "stage"),
        Expr::and_all(superseded).map(|e| e.render(ctx)),
        None,
    );
    let close_where = Expr::And(
        Box::new(open.clone()),
        Box::new(Expr::Exists(superseded_subquery)),
    );
    let milestone_sql = format!(
        "UPDATE {} as {} SET {} = {} WHERE {}",
        ctx.qualified_name(env.main),
        sink,
        ctx.column_ref(sink, out_field),
        close_batch_id,
        close_where.render(ctx)
    );

    // Insert staging rows whose digest is not already open in main.
    let data_columns: Vec<&str> = env.staging.schema.iter().map(|f| f.name.as_str()).collect();
    let mut insert_columns = data_columns.clone();
    insert_columns.push(in_field);
    insert_columns.push(out_field);
    let projection = format!(
        "{},{},{}",
        ctx.projection_list(stage, &data_columns),
        env.batch_id,
        OPEN_BATCH_ID
    );
    let open_digests = select(
        &ctx.column_ref(sink, digest_field),
        &ctx.table_ref(env.main, "sink"),
        Some(open.render(ctx)),
        None,
    );
    let mut insert_where = env.split_predicates();
    insert_where.push(Expr::Not(Box::new(Expr::InSubquery(
        Box::new(Expr::column(stage, digest_field)),
        open_digests,
    ))));
    let insert_select = select(
        &projection,
        &ctx.table_ref(env.source, "stage"),
        Expr::and_all(insert_where).map(|e| e.render(ctx)),
        None,
    );
    let insert_sql = ctx.insert_into_select(env.main, &insert_columns, &insert_select);

    let mut stats: BTreeMap<StatisticName, Option<String>> = BTreeMap::new();
    stats.insert(
        StatisticName::IncomingRecordCount,
        Some(statistics::incoming_record_count(env)),
    );
    let inserted_where = Expr::Eq(
        Box::new(Expr::column(sink, in_field)),
        Box::new(Expr::number(env.batch_id)),
    );
    stats.insert(
        StatisticName::RowsInserted,
        Some(ctx.select_count(
            env.main,
            "sink",
            StatisticName::RowsInserted.alias(),
            Some(&inserted_where),
        )),
    );
    let updated_where = Expr::Eq(
        Box::new(Expr::column(sink, out_field)),
        Box::new(Expr::number(close_batch_id)),
    );
    stats.insert(
        StatisticName::RowsUpdated,
        Some(ctx.select_count(
            env.main,
            "sink",
            StatisticName::RowsUpdated.alias(),
            Some(&updated_where),
        )),
    );
    stats.insert(
        StatisticName::RowsDeleted,
        Some(statistics::zero(ctx, StatisticName::RowsDeleted)),
    );
    stats.insert(
        StatisticName::RowsTerminated,
        Some(statistics::zero(ctx, StatisticName::RowsTerminated)),
    );

    ModePlan {
        ingest_sql: vec![milestone_sql, insert_sql],
        statistics: stats,
    }
}
