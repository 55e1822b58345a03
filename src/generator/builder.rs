//! Low-level SQL text assembly
//!
//! Dialect-aware rendering of the statement fragments shared by all ingest
//! modes. Column lists are always emitted in the dataset's declared field
//! order. Boolean combinators parenthesize both operands explicitly so the
//! output is independent of operator precedence and byte-stable.

use crate::dialect::{CaseConversion, Dialect};
use crate::models::{Dataset, Field};

/// Rendering context: the dialect plus the case-folding policy in force
/// for this compilation. Pure; holds no per-statement state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SqlContext {
    pub dialect: Dialect,
    pub case: CaseConversion,
}

impl SqlContext {
    pub fn new(dialect: Dialect, case: CaseConversion) -> Self {
        Self { dialect, case }
    }

    pub fn quote(&self, identifier: &str) -> String {
        self.dialect.quote(identifier, self.case)
    }

    /// `` `mydb`.`main` `` (database qualifier optional).
    pub fn qualified_name(&self, ds: &Dataset) -> String {
        match &ds.database {
            Some(db) => format!("{}.{}", self.quote(db), self.quote(&ds.name)),
            None => self.quote(&ds.name),
        }
    }

    /// `` `mydb`.`main` as sink ``; aliases are never folded.
    pub fn table_ref(&self, ds: &Dataset, default_alias: &str) -> String {
        format!("{} as {}", self.qualified_name(ds), ds.alias_or(default_alias))
    }

    /// `` stage.`id` ``
    pub fn column_ref(&self, alias: &str, column: &str) -> String {
        format!("{}.{}", alias, self.quote(column))
    }

    /// Insert column list: `` `id`, `name`, `amount` ``.
    pub fn column_list(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|c| self.quote(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Alias-qualified projection list: `` stage.`id`,stage.`name` ``.
    pub fn projection_list(&self, alias: &str, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|c| self.column_ref(alias, c))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Idempotent table creation. Primary-key fields render NOT NULL; a
    /// PRIMARY KEY constraint is appended only when keys are declared.
    pub fn create_table(&self, ds: &Dataset) -> String {
        let mut body = ds
            .schema
            .iter()
            .map(|f| self.column_definition(f))
            .collect::<Vec<_>>()
            .join(",");
        let pks = ds.primary_key_names();
        if !pks.is_empty() {
            body.push_str(&format!(
                ",PRIMARY KEY ({}){}",
                self.column_list(&pks),
                self.dialect.primary_key_suffix()
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {}({})",
            self.qualified_name(ds),
            body
        )
    }

    fn column_definition(&self, field: &Field) -> String {
        let mut def = format!("{} {}", self.quote(&field.name), field.data_type);
        if !field.nullable || field.primary_key {
            def.push_str(" NOT NULL");
        }
        def
    }

    /// `INSERT INTO target (cols) (select)`.
    pub fn insert_into_select(&self, target: &Dataset, columns: &[&str], select: &str) -> String {
        format!(
            "INSERT INTO {} ({}) ({})",
            self.qualified_name(target),
            self.column_list(columns),
            select
        )
    }

    /// Full-table delete, used for temp-staging cleanup and post-actions.
    pub fn delete_all(&self, ds: &Dataset, default_alias: &str) -> String {
        format!("DELETE FROM {} WHERE 1 = 1", self.table_ref(ds, default_alias))
    }

    /// Constant-zero statistic query: `` SELECT 0 as `rowsUpdated` ``.
    pub fn select_zero(&self, stat_alias: &str) -> String {
        format!("SELECT 0 as {}", self.quote(stat_alias))
    }

    /// `` SELECT COUNT(*) as `alias` FROM ds as a [WHERE …] ``.
    pub fn select_count(
        &self,
        ds: &Dataset,
        default_alias: &str,
        stat_alias: &str,
        where_: Option<&Expr>,
    ) -> String {
        select(
            &format!("COUNT(*) as {}", self.quote(stat_alias)),
            &self.table_ref(ds, default_alias),
            where_.map(|e| e.render(self)),
            None,
        )
    }
}

/// Assemble a SELECT from pre-rendered parts.
pub(crate) fn select(
    projection: &str,
    from: &str,
    where_sql: Option<String>,
    group_by: Option<String>,
) -> String {
    let mut sql = format!("SELECT {projection} FROM {from}");
    if let Some(w) = where_sql {
        sql.push_str(" WHERE ");
        sql.push_str(&w);
    }
    if let Some(g) = group_by {
        sql.push_str(" GROUP BY ");
        sql.push_str(&g);
    }
    sql
}

/// Predicate expression tree.
///
/// Rendering rules: comparisons render bare; `And` renders
/// `(left) AND (right)`; `Not` renders `NOT (inner)`; subquery forms carry
/// their already-rendered SELECT text. A top-level expression is rendered
/// without extra outer parentheses.
#[derive(Debug, Clone)]
pub(crate) enum Expr {
    /// Alias-qualified column reference.
    Column { alias: String, name: String },
    /// Already-rendered scalar fragment (literal, function call, subquery).
    Raw(String),
    Eq(Box<Expr>, Box<Expr>),
    NotEq(Box<Expr>, Box<Expr>),
    GtEq(Box<Expr>, Box<Expr>),
    LtEq(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    /// `EXISTS (select)`.
    Exists(String),
    /// `expr IN (select)`.
    InSubquery(Box<Expr>, String),
}

impl Expr {
    pub fn column(alias: &str, name: &str) -> Expr {
        Expr::Column {
            alias: alias.to_string(),
            name: name.to_string(),
        }
    }

    /// Single-quoted string literal; internal quotes escaped by doubling.
    pub fn string_literal(value: &str) -> Expr {
        Expr::Raw(format!("'{}'", value.replace('\'', "''")))
    }

    pub fn number(value: u64) -> Expr {
        Expr::Raw(value.to_string())
    }

    /// Left-fold into nested ANDs, so `[a, b, c]` renders
    /// `((a) AND (b)) AND (c)`. `None` when the list is empty.
    pub fn and_all(exprs: Vec<Expr>) -> Option<Expr> {
        let mut iter = exprs.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, e| Expr::And(Box::new(acc), Box::new(e))))
    }

    pub fn render(&self, ctx: &SqlContext) -> String {
        match self {
            Expr::Column { alias, name } => ctx.column_ref(alias, name),
            Expr::Raw(sql) => sql.clone(),
            Expr::Eq(l, r) => format!("{} = {}", l.render(ctx), r.render(ctx)),
            Expr::NotEq(l, r) => format!("{} <> {}", l.render(ctx), r.render(ctx)),
            Expr::GtEq(l, r) => format!("{} >= {}", l.render(ctx), r.render(ctx)),
            Expr::LtEq(l, r) => format!("{} <= {}", l.render(ctx), r.render(ctx)),
            Expr::And(l, r) => format!("({}) AND ({})", l.render(ctx), r.render(ctx)),
            Expr::Not(e) => format!("NOT ({})", e.render(ctx)),
            Expr::Exists(sub) => format!("EXISTS ({sub})"),
            Expr::InSubquery(e, sub) => format!("{} IN ({})", e.render(ctx), sub),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    fn ctx() -> SqlContext {
        SqlContext::new(Dialect::BigQuery, CaseConversion::Preserve)
    }

    fn dataset() -> Dataset {
        Dataset::new(
            "main",
            vec![
                Field::new("id", "INT64").as_primary_key(),
                Field::new("amount", "FLOAT64"),
            ],
        )
        .in_database("mydb")
    }

    #[test]
    fn test_create_table_with_primary_key() {
        assert_eq!(
            ctx().create_table(&dataset()),
            "CREATE TABLE IF NOT EXISTS `mydb`.`main`(`id` INT64 NOT NULL,`amount` FLOAT64,PRIMARY KEY (`id`) NOT ENFORCED)"
        );
    }

    #[test]
    fn test_and_fold_parenthesization() {
        let e = Expr::and_all(vec![
            Expr::Eq(Box::new(Expr::column("s", "a")), Box::new(Expr::number(1))),
            Expr::Eq(Box::new(Expr::column("s", "b")), Box::new(Expr::number(2))),
            Expr::Eq(Box::new(Expr::column("s", "c")), Box::new(Expr::number(3))),
        ])
        .unwrap();
        assert_eq!(
            e.render(&ctx()),
            "((s.`a` = 1) AND (s.`b` = 2)) AND (s.`c` = 3)"
        );
    }

    #[test]
    fn test_not_exists_rendering() {
        let e = Expr::Not(Box::new(Expr::Exists("SELECT * FROM t".to_string())));
        assert_eq!(e.render(&ctx()), "NOT (EXISTS (SELECT * FROM t))");
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(Expr::string_literal("o'clock").render(&ctx()), "'o''clock'");
    }

    #[test]
    fn test_delete_all() {
        assert_eq!(
            ctx().delete_all(&dataset(), "sink"),
            "DELETE FROM `mydb`.`main` as sink WHERE 1 = 1"
        );
    }
}
