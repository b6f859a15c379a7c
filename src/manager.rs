//! Per-entity-type query facade: `all`, `filter`, and the `select` builder
//! carrying projections, ordering, limits and the AND/OR combine policy.
//!
//! Filter criteria are built with the free functions at the bottom of this
//! module (`eq`, `contains`, `is_in`, `gt`, ...). Logical field names resolve
//! through the schema registry when the lazy result is built — an unknown
//! name is a programmer error and fails right there, never at execution time
//! and never silently.

use std::marker::PhantomData;

use crate::db::Db;
use crate::error::{MarginaliaError, Result};
use crate::lazy::{Depth, Lazy};
use crate::model::Model;
use crate::sql::{Fields, Operator, Query, Where};
use crate::value::Value;

/// The query surface for one entity type.
///
/// Neither [`all`](Manager::all) nor [`filter`](Manager::filter) executes
/// anything; both return a bound, not-yet-run [`Lazy`].
pub struct Manager<'a, M: Model> {
    db: &'a Db,
    table: String,
    depth: Depth,
    _model: PhantomData<M>,
}

impl<'a, M: Model> Manager<'a, M> {
    pub(crate) fn new(db: &'a Db, depth: Depth) -> Result<Self> {
        let entity = db.schema().entity(M::ENTITY)?;
        let declared: Vec<&str> = entity.logical_fields().collect();
        if declared != M::FIELDS {
            return Err(MarginaliaError::SchemaMismatch {
                entity: M::ENTITY,
                detail: format!(
                    "declared fields {:?} disagree with configured fields {declared:?}",
                    M::FIELDS
                ),
            });
        }
        let table = db.schema().table(M::ENTITY)?.to_string();
        Ok(Self {
            db,
            table,
            depth,
            _model: PhantomData,
        })
    }

    /// Select builder for the optional parts: projection, ordering, limit,
    /// OR-combination, criteria.
    pub fn select(&self) -> Select<'a, M> {
        Select {
            db: self.db,
            table: self.table.clone(),
            depth: self.depth,
            only: None,
            criteria: Vec::new(),
            order_by: None,
            limit: None,
            use_or: false,
            _model: PhantomData,
        }
    }

    /// All rows of the entity's table.
    pub fn all(&self) -> Result<Lazy<'a, M>> {
        self.select().lazy()
    }

    /// Rows matching every criterion (AND-combined; see
    /// [`Select::use_or`] for the OR policy).
    pub fn filter<I>(&self, criteria: I) -> Result<Lazy<'a, M>>
    where
        I: IntoIterator<Item = Condition>,
    {
        self.select().filter(criteria).lazy()
    }
}

/// A select under construction. Compiles to SQL on [`lazy`](Select::lazy).
pub struct Select<'a, M: Model> {
    db: &'a Db,
    table: String,
    depth: Depth,
    only: Option<Vec<String>>,
    criteria: Vec<Condition>,
    order_by: Option<String>,
    limit: Option<u32>,
    use_or: bool,
    _model: PhantomData<M>,
}

impl<'a, M: Model> Select<'a, M> {
    /// Projects a subset of logical fields. Unselected positions materialize
    /// as null.
    pub fn only<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.only = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter<I>(mut self, criteria: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        self.criteria.extend(criteria);
        self
    }

    /// Orders by a logical field; a leading `-` means descending.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Combine the criteria with OR instead of AND. Uniform across the whole
    /// statement; there is no per-clause mixing.
    pub fn use_or(mut self) -> Self {
        self.use_or = true;
        self
    }

    /// Resolves logical names, compiles the statement and binds it to a lazy
    /// result. Nothing executes here.
    pub fn lazy(self) -> Result<Lazy<'a, M>> {
        let entity = self.db.schema().entity(M::ENTITY)?;

        let (fields, projection) = match &self.only {
            None => (
                Fields::Columns(entity.columns().map(ToOwned::to_owned).collect()),
                None,
            ),
            Some(only) => {
                for name in only {
                    // fail fast on names outside the mapping
                    entity.column(name)?;
                }
                let mut columns = Vec::with_capacity(only.len());
                let mut positions = Vec::with_capacity(only.len());
                for (position, field) in M::FIELDS.iter().enumerate() {
                    if only.iter().any(|name| name == field) {
                        columns.push(entity.column(field)?.to_string());
                        positions.push(position);
                    }
                }
                (Fields::Columns(columns), Some(positions))
            }
        };

        let mut clauses = Vec::with_capacity(self.criteria.len());
        for criterion in self.criteria {
            let column = entity.column(&criterion.field)?;
            clauses.push(criterion.op.into_clause(column));
        }

        let order_by = match self.order_by.as_deref() {
            None => None,
            Some(field) => {
                let (name, direction) = match field.strip_prefix('-') {
                    Some(name) => (name, " DESC"),
                    None => (field, ""),
                };
                Some(format!("{}{direction}", entity.column(name)?))
            }
        };

        let sql = Query::select(
            &self.table,
            &fields,
            &clauses,
            order_by.as_deref(),
            self.limit,
            self.use_or,
        );
        Ok(Lazy::new(self.db, sql, self.depth, projection))
    }
}

/// One filter criterion: a logical field plus an operator payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    field: String,
    op: CondOp,
}

#[derive(Debug, Clone, PartialEq)]
enum CondOp {
    Eq(Value),
    Like(String),
    Contains(String),
    In(Vec<Value>),
    InRaw(String),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    IsNull(bool),
}

impl CondOp {
    fn into_clause(self, column: &str) -> Where {
        match self {
            Self::Eq(value) => Where::new(column, Operator::Eq, value),
            Self::Like(pattern) => Where::new(column, Operator::Like, pattern),
            Self::Contains(needle) => {
                Where::new(column, Operator::Like, format!("%{needle}%"))
            }
            Self::In(values) => Where::in_list(column, values),
            Self::InRaw(list) => Where::in_raw(column, list),
            Self::Gt(value) => Where::new(column, Operator::Gt, value),
            Self::Gte(value) => Where::new(column, Operator::Gte, value),
            Self::Lt(value) => Where::new(column, Operator::Lt, value),
            Self::Lte(value) => Where::new(column, Operator::Lte, value),
            Self::IsNull(true) => Where::new(column, Operator::Is, Value::Null),
            Self::IsNull(false) => Where::new(column, Operator::IsNot, Value::Null),
        }
    }
}

fn condition(field: impl Into<String>, op: CondOp) -> Condition {
    Condition {
        field: field.into(),
        op,
    }
}

/// Create an equality criterion (`field = value`)
pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    condition(field, CondOp::Eq(value.into()))
}

/// Create a LIKE criterion; the pattern must already carry its `%` wildcards
pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Condition {
    condition(field, CondOp::Like(pattern.into()))
}

/// Create a substring criterion (`field LIKE '%needle%'`)
pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Condition {
    condition(field, CondOp::Contains(needle.into()))
}

/// Create an IN criterion over a sequence of values
pub fn is_in<I>(field: impl Into<String>, values: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    condition(
        field,
        CondOp::In(values.into_iter().map(Into::into).collect()),
    )
}

/// Create an IN criterion over a pre-joined literal list, e.g. `"1, 2, 3"`
pub fn in_raw(field: impl Into<String>, list: impl Into<String>) -> Condition {
    condition(field, CondOp::InRaw(list.into()))
}

/// Create a greater-than criterion (`field > value`)
pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    condition(field, CondOp::Gt(value.into()))
}

/// Create a greater-than-or-equal criterion (`field >= value`)
pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    condition(field, CondOp::Gte(value.into()))
}

/// Create a less-than criterion (`field < value`)
pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    condition(field, CondOp::Lt(value.into()))
}

/// Create a less-than-or-equal criterion (`field <= value`)
pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Condition {
    condition(field, CondOp::Lte(value.into()))
}

/// Create a null check: `IS NULL` when `null` is true, `IS NOT NULL` otherwise
pub fn is_null(field: impl Into<String>, null: bool) -> Condition {
    condition(field, CondOp::IsNull(null))
}
