//! Statement compiler: assembles SQL text from table, fields, clauses,
//! ordering and limit. Compilation is pure; nothing here executes.

pub mod clause;

pub use clause::{Join, JoinKind, Operand, Operator, Where};

use crate::value::Value;

/// Field list for a SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// `SELECT *`
    All,
    /// Pass-through, e.g. a pre-formatted multi-table list with aliases.
    Raw(String),
    /// Column names joined with commas.
    Columns(Vec<String>),
}

impl Fields {
    fn render(&self) -> String {
        match self {
            Self::All => "*".to_string(),
            Self::Raw(raw) => raw.clone(),
            Self::Columns(columns) => columns.join(", "),
        }
    }
}

/// Stateless statement builders. A compiled statement is plain text; it is
/// never partially executed.
pub struct Query;

impl Query {
    /// `SELECT <fields> FROM <table> [WHERE ...] [ORDER BY ...] [LIMIT n]`
    ///
    /// Multiple WHERE clauses combine uniformly: AND by default, OR when
    /// `use_or` is set. There is no per-clause mixing within one statement.
    pub fn select(
        table: &str,
        fields: &Fields,
        where_clauses: &[Where],
        order_by: Option<&str>,
        limit: Option<u32>,
        use_or: bool,
    ) -> String {
        let mut sql = format!("SELECT {} FROM {table}", fields.render());

        if !where_clauses.is_empty() {
            let connective = if use_or { " OR " } else { " AND " };
            let rendered = where_clauses
                .iter()
                .map(Where::render)
                .collect::<Vec<_>>()
                .join(connective);
            sql.push_str(" WHERE ");
            sql.push_str(&rendered);
        }

        if let Some(order_by) = order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        sql
    }

    /// `INSERT INTO <table> (cols) VALUES (vals)`
    ///
    /// Present for statement-surface completeness; the read-only manager
    /// layer never compiles one.
    pub fn insert(table: &str, values: &[(String, Value)]) -> String {
        let columns = values
            .iter()
            .map(|(column, _)| column.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let literals = values
            .iter()
            .map(|(_, value)| value.literal())
            .collect::<Vec<_>>()
            .join(", ");
        format!("INSERT INTO {table} ({columns}) VALUES ({literals})")
    }

    /// `UPDATE <table> SET ... WHERE ...`
    pub fn update(table: &str, assignments: &[(String, Value)], where_clauses: &[Where]) -> String {
        let set_clause = assignments
            .iter()
            .map(|(column, value)| format!("{column} = {}", value.literal()))
            .collect::<Vec<_>>()
            .join(", ");
        let where_clause = where_clauses
            .iter()
            .map(Where::render)
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("UPDATE {table} SET {set_clause} WHERE {where_clause}")
    }

    /// `DELETE FROM <table> WHERE ...`
    pub fn delete(table: &str, where_clauses: &[Where]) -> String {
        let where_clause = where_clauses
            .iter()
            .map(Where::render)
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("DELETE FROM {table} WHERE {where_clause}")
    }
}
