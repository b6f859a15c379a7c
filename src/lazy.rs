//! Lazy results: a bound-but-unexecuted statement plus materialization.
//!
//! Every access — iteration, indexing, `len` — re-executes the bound query.
//! Nothing is cached between accesses, so results track store changes;
//! callers that need stability materialize with [`Lazy::to_vec`].

use std::marker::PhantomData;

use crate::db::Db;
use crate::error::{MarginaliaError, Result};
use crate::model::Model;
use crate::value::{Row, Value};

/// How deep materialization goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Depth {
    /// Construct instances only; relation fields stay unresolved.
    Shallow,
    /// Also populate each instance's declared relations — one hop; the
    /// related instances themselves come back shallow.
    Resolved,
}

/// An iterable, indexable result bound to one compiled statement.
pub struct Lazy<'a, M: Model> {
    db: &'a Db,
    sql: String,
    depth: Depth,
    /// For projected selects: positions in `M::FIELDS` the returned columns
    /// map to. Unselected positions materialize as null.
    projection: Option<Vec<usize>>,
    _model: PhantomData<M>,
}

impl<M: Model> std::fmt::Debug for Lazy<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lazy")
            .field("sql", &self.sql)
            .field("depth", &self.depth)
            .field("projection", &self.projection)
            .finish_non_exhaustive()
    }
}

impl<'a, M: Model> Lazy<'a, M> {
    pub(crate) fn new(
        db: &'a Db,
        sql: String,
        depth: Depth,
        projection: Option<Vec<usize>>,
    ) -> Self {
        Self {
            db,
            sql,
            depth,
            projection,
            _model: PhantomData,
        }
    }

    /// The compiled statement this result is bound to.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    fn run(&self) -> Result<Vec<Row>> {
        self.db.execute(&self.sql)
    }

    fn materialize(&self, row: Row) -> Result<M> {
        let row = match &self.projection {
            None => row,
            Some(positions) => {
                let mut full = vec![Value::Null; M::FIELDS.len()];
                for (position, value) in positions.iter().zip(row) {
                    full[*position] = value;
                }
                full
            }
        };
        let mut model = M::from_row(&row)?;
        if self.depth == Depth::Resolved {
            model.resolve(self.db)?;
        }
        Ok(model)
    }

    /// Executes the query and iterates the materialized instances.
    pub fn iter(&self) -> Result<Iter<'_, 'a, M>> {
        Ok(Iter {
            lazy: self,
            rows: self.run()?.into_iter(),
        })
    }

    /// Executes the query and reports the row count.
    pub fn len(&self) -> Result<usize> {
        Ok(self.run()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Executes the query and materializes the row at `index`.
    pub fn get(&self, index: usize) -> Result<M> {
        let rows = self.run()?;
        let count = rows.len();
        let row = rows
            .into_iter()
            .nth(index)
            .ok_or_else(|| MarginaliaError::NotFound {
                entity: M::ENTITY,
                lookup: format!("index {index} (result has {count} rows)"),
            })?;
        self.materialize(row)
    }

    /// Executes the query and materializes every row into an owned vector.
    pub fn to_vec(&self) -> Result<Vec<M>> {
        self.iter()?.collect()
    }
}

/// Iterator over one execution of a [`Lazy`] result.
pub struct Iter<'l, 'a, M: Model> {
    lazy: &'l Lazy<'a, M>,
    rows: std::vec::IntoIter<Row>,
}

impl<M: Model> Iterator for Iter<'_, '_, M> {
    type Item = Result<M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| self.lazy.materialize(row))
    }
}
