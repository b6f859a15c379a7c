//! The engine root: one explicitly owned row source plus the schema and
//! relation registries, shared by every manager.

use tracing::trace;

use crate::error::{MarginaliaError, Result};
use crate::lazy::Depth;
use crate::manager::{self, Manager};
use crate::model::Model;
use crate::relation::{RelationKind, RelationRegistry};
use crate::schema::SchemaRegistry;
use crate::sql::{Fields, Operator, Query, Where};
use crate::store::RowSource;
use crate::value::{Row, Value};

/// Database handle the managers run against.
///
/// Construction is explicit: callers build the row source and registries and
/// inject them, so tests can substitute their own store. Single-threaded by
/// design; the store is one mutable resource with exactly one owner.
pub struct Db {
    store: Box<dyn RowSource>,
    schema: SchemaRegistry,
    relations: RelationRegistry,
}

impl Db {
    pub fn new(
        store: impl RowSource + 'static,
        schema: SchemaRegistry,
        relations: RelationRegistry,
    ) -> Self {
        Self {
            store: Box::new(store),
            schema,
            relations,
        }
    }

    /// The query facade for one entity type. Validates the entity's declared
    /// field list against the schema registry — count and order — so drift
    /// fails here, not row by row.
    pub fn manager<M: Model>(&self) -> Result<Manager<'_, M>> {
        Manager::new(self, Depth::Resolved)
    }

    /// Manager whose results skip relation resolution. Used for the far side
    /// of a traversal, keeping resolution one hop deep.
    pub(crate) fn shallow_manager<M: Model>(&self) -> Result<Manager<'_, M>> {
        Manager::new(self, Depth::Shallow)
    }

    pub(crate) fn execute(&self, sql: &str) -> Result<Vec<Row>> {
        self.store.execute(sql)
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn relations(&self) -> &RelationRegistry {
        &self.relations
    }

    /// Resolves one declared relation of `owner`, given the owning instance's
    /// key value. Related instances come back shallow.
    ///
    /// Many-to-many never compiles a three-table join: one select against the
    /// association table yields the foreign-key list, then one `IN (...)`
    /// select against the target table filters by it.
    pub fn related<C: Model>(&self, owner: &str, relation: &str, key: &Value) -> Result<Vec<C>> {
        let relation = self
            .relations
            .get(owner, relation)
            .ok_or_else(|| MarginaliaError::UnknownRelation {
                entity: owner.to_string(),
                relation: relation.to_string(),
            })?;
        if relation.target != C::ENTITY {
            return Err(MarginaliaError::SchemaMismatch {
                entity: C::ENTITY,
                detail: format!(
                    "relation `{}` on {owner} targets {}, not {}",
                    relation.name, relation.target, C::ENTITY
                ),
            });
        }
        trace!(owner, relation = %relation.name, "resolving relation");

        match &relation.kind {
            RelationKind::ToMany { on } | RelationKind::ToOne { on } => self
                .shallow_manager::<C>()?
                .filter([manager::eq(on.as_str(), key.clone())])?
                .to_vec(),
            RelationKind::ManyToMany {
                association,
                to_key,
                ..
            } => {
                let assoc = self.schema.association(association)?;
                let owner_column = assoc.column_for(owner)?;
                let target_column = assoc.column_for(&relation.target)?;

                let key_sql = Query::select(
                    &assoc.table,
                    &Fields::Columns(vec![target_column.to_string()]),
                    &[Where::new(owner_column, Operator::Eq, key.clone())],
                    None,
                    None,
                    false,
                );
                let keys: Vec<Value> = self
                    .execute(&key_sql)?
                    .into_iter()
                    .filter_map(|mut row| {
                        let value = row.drain(..).next()?;
                        (!value.is_null()).then_some(value)
                    })
                    .collect();
                if keys.is_empty() {
                    return Ok(Vec::new());
                }

                self.shallow_manager::<C>()?
                    .filter([manager::is_in(to_key.as_str(), keys)])?
                    .to_vec()
            }
        }
    }
}
