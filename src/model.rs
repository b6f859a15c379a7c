//! The contract a mapped entity type fulfils.

use crate::db::Db;
use crate::error::{MarginaliaError, Result};
use crate::value::{Row, Value};

/// A materializable entity type.
///
/// `FIELDS` is the ordered logical field list rows are zipped against; the
/// engine validates it against the schema registry once, at manager
/// construction, so schema/config drift is a startup error instead of a
/// silent misalignment.
pub trait Model: Sized {
    /// Entity type name as it appears in the schema configuration.
    const ENTITY: &'static str;

    /// Ordered logical fields, one per selected column.
    const FIELDS: &'static [&'static str];

    /// Constructs one instance from a positionally aligned row. Field values
    /// are normalized here (epoch-ms timestamps, ratio scaling); relation
    /// fields start out unresolved.
    fn from_row(row: &Row) -> Result<Self>;

    /// Populates the declared relation fields. Called by the lazy result for
    /// each materialized instance, one hop deep.
    fn resolve(&mut self, _db: &Db) -> Result<()> {
        Ok(())
    }
}

/// A width-checked view over one row, aligned with `M::FIELDS`.
pub struct RowView<'r> {
    row: &'r Row,
}

impl<'r> RowView<'r> {
    pub fn new<M: Model>(row: &'r Row) -> Result<Self> {
        if row.len() < M::FIELDS.len() {
            return Err(MarginaliaError::SchemaMismatch {
                entity: M::ENTITY,
                detail: format!(
                    "row has {} values, expected {}",
                    row.len(),
                    M::FIELDS.len()
                ),
            });
        }
        Ok(Self { row })
    }

    pub fn value(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.row.get(index).unwrap_or(&NULL)
    }

    pub fn text(&self, index: usize) -> Option<String> {
        self.value(index).as_str().map(ToOwned::to_owned)
    }

    pub fn text_or_default(&self, index: usize) -> String {
        self.text(index).unwrap_or_default()
    }

    pub fn integer(&self, index: usize) -> Option<i64> {
        self.value(index).as_i64()
    }

    pub fn real(&self, index: usize) -> Option<f64> {
        self.value(index).as_f64()
    }

    pub fn flag(&self, index: usize) -> bool {
        self.value(index).as_bool().unwrap_or(false)
    }

    pub fn datetime_ms(&self, index: usize) -> Option<chrono::DateTime<chrono::Utc>> {
        self.value(index).as_datetime_ms()
    }
}
