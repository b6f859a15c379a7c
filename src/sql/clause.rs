//! Clause builders: single comparisons and join conditions.
//!
//! A clause is immutable once built and renders to SQL text without touching
//! any external state.

use crate::value::Value;

/// Comparison operators accepted by [`Where`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Like,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
    Is,
    IsNot,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

/// Right-hand side of a `Where` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(Value),
    /// Sequence form for IN, escaped item-by-item.
    List(Vec<Value>),
    /// Pre-joined literal list for IN, passed through as-is.
    Raw(String),
}

/// A single `field OP value` predicate.
///
/// For `LIKE` the value must already carry any `%` wildcards. For `IS` /
/// `IS NOT` a null value renders as the `NULL` keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    field: String,
    op: Operator,
    value: Operand,
}

impl Where {
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: Operand::Scalar(value.into()),
        }
    }

    /// IN over a sequence of values: strings quoted, numbers bare, joined
    /// with commas inside parentheses.
    pub fn in_list<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            field: field.into(),
            op: Operator::In,
            value: Operand::List(values.into_iter().map(Into::into).collect()),
        }
    }

    /// IN over a pre-joined literal list, e.g. `"1, 2, 3"`.
    pub fn in_raw(field: impl Into<String>, list: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: Operator::In,
            value: Operand::Raw(list.into()),
        }
    }

    pub fn render(&self) -> String {
        match &self.value {
            Operand::Scalar(value) => {
                format!("{} {} {}", self.field, self.op.as_str(), value.literal())
            }
            Operand::List(values) => {
                let items = values
                    .iter()
                    .map(Value::literal)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} {} ({items})", self.field, self.op.as_str())
            }
            Operand::Raw(list) => format!("{} {} ({list})", self.field, self.op.as_str()),
        }
    }
}

/// Join flavors; inner is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Cross,
}

impl JoinKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Cross => "CROSS",
        }
    }
}

/// A `JOIN table ON condition` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    table: String,
    on: String,
    kind: JoinKind,
}

impl Join {
    pub fn new(table: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            on: on.into(),
            kind: JoinKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn render(&self) -> String {
        format!("{} JOIN {} ON {}", self.kind.as_str(), self.table, self.on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_comparisons() {
        assert_eq!(
            Where::new("ZTITLE", Operator::Eq, "Dune").render(),
            "ZTITLE = 'Dune'"
        );
        assert_eq!(Where::new("ZRATING", Operator::Gt, 3i64).render(), "ZRATING > 3");
        assert_eq!(
            Where::new("ZRATING", Operator::Lte, 5i64).render(),
            "ZRATING <= 5"
        );
    }

    #[test]
    fn like_keeps_caller_wildcards() {
        assert_eq!(
            Where::new("ZTITLE", Operator::Like, "%dune%").render(),
            "ZTITLE LIKE '%dune%'"
        );
    }

    #[test]
    fn in_list_escapes_per_item() {
        assert_eq!(
            Where::in_list("Z_PK", [1i64, 2, 3]).render(),
            "Z_PK IN (1, 2, 3)"
        );
        assert_eq!(
            Where::in_list("ZASSETID", ["a'b", "c"]).render(),
            "ZASSETID IN ('a''b', 'c')"
        );
    }

    #[test]
    fn in_raw_passes_through() {
        assert_eq!(
            Where::in_raw("Z_PK", "1, 2, 3").render(),
            "Z_PK IN (1, 2, 3)"
        );
    }

    #[test]
    fn is_null_renders_keyword() {
        assert_eq!(
            Where::new("ZANNOTATIONNOTE", Operator::Is, Value::Null).render(),
            "ZANNOTATIONNOTE IS NULL"
        );
        assert_eq!(
            Where::new("ZANNOTATIONNOTE", Operator::IsNot, Value::Null).render(),
            "ZANNOTATIONNOTE IS NOT NULL"
        );
    }

    #[test]
    fn join_defaults_to_inner() {
        let join = Join::new("ZBKCOLLECTIONMEMBER", "ZBKCOLLECTIONMEMBER.ZASSET = ZBKLIBRARYASSET.ZASSETID");
        assert_eq!(
            join.render(),
            "INNER JOIN ZBKCOLLECTIONMEMBER ON ZBKCOLLECTIONMEMBER.ZASSET = ZBKLIBRARYASSET.ZASSETID"
        );
        assert_eq!(
            Join::new("t", "a = b").with_kind(JoinKind::Left).render(),
            "LEFT JOIN t ON a = b"
        );
    }
}
