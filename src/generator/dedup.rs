//! Deduplication & versioning planner
//!
//! Decides whether a temp staging table is required and builds the SQL
//! that cleans and populates it. The populate statement always records the
//! per-group occurrence count in `legend_persistence_count`; versioning
//! strategies additionally rank rows per primary key with `DENSE_RANK`
//! over the version column. Ties on an equal maximum version collapse into
//! the single grouped representative row, which keeps the outcome
//! deterministic for identical rows.

use super::GeneratorError;
use super::builder::{Expr, SqlContext, select};
use crate::models::split::DATA_SPLIT_COLUMN;
use crate::models::{Dataset, Deduplication, Field, Versioning};

/// Synthetic occurrence-count column added to the temp staging table.
pub const COUNT_COLUMN: &str = "legend_persistence_count";
/// Transient rank column used by the max-version filter.
pub const RANK_COLUMN: &str = "legend_persistence_rank";
/// Alias of the duplicate-count guard query emitted for fail-on-duplicates.
pub const MAX_DUPLICATES_ALIAS: &str = "MAX_DUPLICATES";

/// Output of the planner: the temp staging dataset (when one is needed),
/// the ordered cleanup + populate statements, and the optional guard query
/// the caller is expected to evaluate before ingesting.
#[derive(Debug)]
pub(crate) struct DedupPlan {
    pub temp_staging: Option<Dataset>,
    pub sql: Vec<String>,
    pub error_check_sql: Option<String>,
    pub adds_data_split: bool,
}

impl DedupPlan {
    fn none() -> Self {
        Self {
            temp_staging: None,
            sql: Vec::new(),
            error_check_sql: None,
            adds_data_split: false,
        }
    }
}

pub(crate) fn plan(
    ctx: &SqlContext,
    staging: &Dataset,
    deduplication: Deduplication,
    versioning: &Versioning,
) -> Result<DedupPlan, GeneratorError> {
    let dedup_active = deduplication != Deduplication::AllowDuplicates;
    let versioning_active = !matches!(versioning, Versioning::NoVersioning);
    if !dedup_active && !versioning_active {
        return Ok(DedupPlan::none());
    }
    if versioning_active && !ctx.dialect.supports_window_functions() {
        return Err(GeneratorError::UnsupportedByDialect(format!(
            "versioning strategies need window functions, which the {:?} dialect does not provide",
            ctx.dialect
        )));
    }

    let stage = staging.alias_or("stage");
    let data_columns: Vec<&str> = staging.schema.iter().map(|f| f.name.as_str()).collect();
    let temp_staging = temp_staging_dataset(ctx, staging, versioning_active_all(versioning));

    let base_projection = ctx.projection_list(stage, &data_columns);
    let count_projection = if dedup_active {
        format!("COUNT(*) as {}", ctx.quote(COUNT_COLUMN))
    } else {
        format!("1 as {}", ctx.quote(COUNT_COLUMN))
    };
    let group_by = dedup_active.then(|| {
        data_columns
            .iter()
            .map(|c| ctx.column_ref(stage, c))
            .collect::<Vec<_>>()
            .join(", ")
    });
    let staging_ref = ctx.table_ref(staging, "stage");

    let populate_select = match versioning {
        Versioning::NoVersioning => select(
            &format!("{base_projection},{count_projection}"),
            &staging_ref,
            None,
            group_by,
        ),
        Versioning::MaxVersion { field } => {
            let rank = rank_projection(ctx, staging, stage, field, "DESC", RANK_COLUMN)?;
            let inner = select(
                &format!("{base_projection},{count_projection},{rank}"),
                &staging_ref,
                None,
                group_by,
            );
            let keep_max = Expr::Eq(
                Box::new(Expr::column(stage, RANK_COLUMN)),
                Box::new(Expr::number(1)),
            );
            select(
                &format!("{base_projection},{}", ctx.column_ref(stage, COUNT_COLUMN)),
                &format!("({inner}) as {stage}"),
                Some(keep_max.render(ctx)),
                None,
            )
        }
        Versioning::AllVersions { field } => {
            let split = rank_projection(ctx, staging, stage, field, "ASC", DATA_SPLIT_COLUMN)?;
            select(
                &format!("{base_projection},{count_projection},{split}"),
                &staging_ref,
                None,
                group_by,
            )
        }
    };

    let temp_columns: Vec<&str> = temp_staging.schema.iter().map(|f| f.name.as_str()).collect();
    let sql = vec![
        ctx.delete_all(&temp_staging, "stage"),
        ctx.insert_into_select(&temp_staging, &temp_columns, &populate_select),
    ];

    let error_check_sql = (deduplication == Deduplication::FailOnDuplicates).then(|| {
        select(
            &format!(
                "MAX({}) as {}",
                ctx.column_ref(stage, COUNT_COLUMN),
                ctx.quote(MAX_DUPLICATES_ALIAS)
            ),
            &ctx.table_ref(&temp_staging, "stage"),
            None,
            None,
        )
    });

    Ok(DedupPlan {
        adds_data_split: versioning_active_all(versioning),
        temp_staging: Some(temp_staging),
        sql,
        error_check_sql,
    })
}

fn versioning_active_all(versioning: &Versioning) -> bool {
    matches!(versioning, Versioning::AllVersions { .. })
}

/// `DENSE_RANK() OVER (PARTITION BY stage.`id`,stage.`name` ORDER BY stage.`v` <dir>) as `alias``
fn rank_projection(
    ctx: &SqlContext,
    staging: &Dataset,
    stage: &str,
    version_field: &str,
    direction: &str,
    alias: &str,
) -> Result<String, GeneratorError> {
    let pks = staging.primary_key_names();
    if pks.is_empty() {
        return Err(GeneratorError::InvalidSpecification(
            "versioning strategies require primary keys on the staging dataset".to_string(),
        ));
    }
    Ok(format!(
        "DENSE_RANK() OVER (PARTITION BY {} ORDER BY {} {direction}) as {}",
        ctx.projection_list(stage, &pks),
        ctx.column_ref(stage, version_field),
        ctx.quote(alias)
    ))
}

/// Staging schema plus bookkeeping columns; key flags are dropped because
/// the temp table carries no constraints.
fn temp_staging_dataset(ctx: &SqlContext, staging: &Dataset, with_data_split: bool) -> Dataset {
    let mut schema: Vec<Field> = staging
        .schema
        .iter()
        .map(|f| {
            let mut f = f.clone();
            f.nullable = f.nullable && !f.primary_key;
            f.primary_key = false;
            f
        })
        .collect();
    schema.push(Field::new(COUNT_COLUMN, ctx.dialect.integer_type()));
    if with_data_split {
        schema.push(Field::new(DATA_SPLIT_COLUMN, ctx.dialect.integer_type()).not_null());
    }
    let mut temp = Dataset::new(ctx.dialect.temp_staging_name(&staging.name), schema);
    temp.database = staging.database.clone();
    temp.alias = staging.alias.clone();
    temp
}
