//! Append-only mode planner
//!
//! The ingest statement is a plain INSERT from staging (or the temp
//! staging table) into main; existing main rows are never updated or
//! deleted, so the rows-updated, rows-deleted and rows-terminated
//! statistics are always the constant-zero query.

use std::collections::BTreeMap;

use super::builder::{Expr, select};
use super::context::{CompileEnv, ModePlan};
use super::statistics;
use crate::models::{Auditing, StatisticName};

pub(crate) fn plan(
    env: &CompileEnv,
    auditing: &Auditing,
    filter_existing_records: bool,
    digest_field: Option<&str>,
) -> ModePlan {
    let ctx = &env.ctx;
    let stage = env.source.alias_or("stage");
    let data_columns: Vec<&str> = env.staging.schema.iter().map(|f| f.name.as_str()).collect();

    let mut insert_columns = data_columns.clone();
    let mut projection = ctx.projection_list(stage, &data_columns);
    if let Auditing::DateTime { field } = auditing {
        insert_columns.push(field);
        projection.push_str(&format!(
            ",{}",
            ctx.dialect.render_datetime_literal(&env.batch_timestamp)
        ));
    }

    let mut where_parts = env.split_predicates();
    if filter_existing_records
        && let Some(digest) = digest_field
    {
        where_parts.push(not_exists_in_main(env, stage, digest));
    }

    // A bare unaudited, unfiltered append straight from staging keeps the
    // wildcard projection of the original contract.
    let select_sql = if matches!(auditing, Auditing::None) && where_parts.is_empty() && !env.uses_temp
    {
        select("*", &ctx.table_ref(env.source, "stage"), None, None)
    } else {
        select(
            &projection,
            &ctx.table_ref(env.source, "stage"),
            Expr::and_all(where_parts).map(|e| e.render(ctx)),
            None,
        )
    };

    let mut stats: BTreeMap<StatisticName, Option<String>> = BTreeMap::new();
    stats.insert(
        StatisticName::IncomingRecordCount,
        Some(statistics::incoming_record_count(env)),
    );
    stats.insert(
        StatisticName::RowsInserted,
        match auditing {
            Auditing::DateTime { field } => {
                Some(statistics::audit_rows_inserted(ctx, env.main, field))
            }
            Auditing::None => None,
        },
    );
    for stat in [
        StatisticName::RowsUpdated,
        StatisticName::RowsDeleted,
        StatisticName::RowsTerminated,
    ] {
        stats.insert(stat, Some(statistics::zero(ctx, stat)));
    }

    ModePlan {
        ingest_sql: vec![ctx.insert_into_select(env.main, &insert_columns, &select_sql)],
        statistics: stats,
    }
}

/// `NOT (EXISTS (SELECT * FROM main as sink WHERE (pk matches) AND (digest match)))`
fn not_exists_in_main(env: &CompileEnv, stage: &str, digest_field: &str) -> Expr {
    let ctx = &env.ctx;
    let sink = env.main.alias_or("sink");
    let mut matches: Vec<Expr> = env
        .staging
        .primary_key_names()
        .iter()
        .map(|pk| {
            Expr::Eq(
                Box::new(Expr::column(sink, pk)),
                Box::new(Expr::column(stage, pk)),
            )
        })
        .collect();
    matches.push(Expr::Eq(
        Box::new(Expr::column(sink, digest_field)),
        Box::new(Expr::column(stage, digest_field)),
    ));
    let subquery = select(
        "*",
        &ctx.table_ref(env.main, "sink"),
        Expr::and_all(matches).map(|e| e.render(ctx)),
        None,
    );
    Expr::Not(Box::new(Expr::Exists(subquery)))
}
