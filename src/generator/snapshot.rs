//! Nontemporal snapshot mode planner
//!
//! Replaces the whole main table with the staging batch: a full-table
//! DELETE followed by the INSERT. The rows-deleted query counts the main
//! table and is meant to be executed by the caller before the ingest
//! statements run; the engine only emits the text.

use std::collections::BTreeMap;

use super::builder::select;
use super::context::{CompileEnv, ModePlan};
use super::statistics;
use crate::models::{Auditing, StatisticName};

pub(crate) fn plan(env: &CompileEnv, auditing: &Auditing) -> ModePlan {
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

    let select_sql = if matches!(auditing, Auditing::None) && !env.uses_temp {
        select("*", &ctx.table_ref(env.source, "stage"), None, None)
    } else {
        select(&projection, &ctx.table_ref(env.source, "stage"), None, None)
    };

    let mut stats: BTreeMap<StatisticName, Option<String>> = BTreeMap::new();
    stats.insert(
        StatisticName::IncomingRecordCount,
        Some(statistics::incoming_record_count(env)),
    );
    stats.insert(
        StatisticName::RowsInserted,
        Some(statistics::row_count(
            ctx,
            env.main,
            "sink",
            StatisticName::RowsInserted,
        )),
    );
    stats.insert(
        StatisticName::RowsDeleted,
        Some(statistics::row_count(
            ctx,
            env.main,
            "sink",
            StatisticName::RowsDeleted,
        )),
    );
    stats.insert(
        StatisticName::RowsUpdated,
        Some(statistics::zero(ctx, StatisticName::RowsUpdated)),
    );
    stats.insert(
        StatisticName::RowsTerminated,
        Some(statistics::zero(ctx, StatisticName::RowsTerminated)),
    );

    ModePlan {
        ingest_sql: vec![
            ctx.delete_all(env.main, "sink"),
            ctx.insert_into_select(env.main, &insert_columns, &select_sql),
        ],
        statistics: stats,
    }
}
