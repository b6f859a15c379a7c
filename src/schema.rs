//! Schema registry: logical field name → physical column resolution.
//!
//! Backed by a TOML document with one `[[entity.<Name>.fields]]` array per
//! entity type (order matters — it is the positional contract rows are zipped
//! against), a `[tables]` section mapping lower-cased entity names to physical
//! tables (optionally `alias.`-qualified for attached stores), and one
//! `[association.<name>]` section per join table naming its two key columns.
//!
//! The document is parsed once; resolution afterwards is pure lookups.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{MarginaliaError, Result};

#[derive(Debug, Deserialize)]
struct SchemaDoc {
    tables: BTreeMap<String, String>,
    entity: BTreeMap<String, EntityDoc>,
    #[serde(default)]
    association: BTreeMap<String, Association>,
}

#[derive(Debug, Deserialize)]
struct EntityDoc {
    fields: Vec<FieldDoc>,
}

#[derive(Debug, Deserialize)]
struct FieldDoc {
    logical: String,
    column: String,
}

/// A join table implementing a many-to-many relation: its physical name and
/// one key column per side, keyed by the lower-cased entity name.
#[derive(Debug, Clone, Deserialize)]
pub struct Association {
    pub table: String,
    pub columns: BTreeMap<String, String>,
}

impl Association {
    /// Key column for one side of the association.
    pub fn column_for(&self, entity: &str) -> Result<&str> {
        self.columns
            .get(&entity.to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| MarginaliaError::UnknownField {
                entity: entity.to_string(),
                field: format!("association key column ({})", self.table),
            })
    }
}

/// The ordered logical → physical mapping for one entity type.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    name: String,
    fields: Vec<(String, String)>,
}

impl EntitySchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical column for a logical field.
    pub fn column(&self, logical: &str) -> Result<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == logical)
            .map(|(_, column)| column.as_str())
            .ok_or_else(|| MarginaliaError::UnknownField {
                entity: self.name.clone(),
                field: logical.to_string(),
            })
    }

    /// Logical field names, in declaration order.
    pub fn logical_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Physical columns, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, column)| column.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parsed, immutable schema configuration.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tables: BTreeMap<String, String>,
    entities: BTreeMap<String, EntitySchema>,
    associations: BTreeMap<String, Association>,
}

impl SchemaRegistry {
    /// Parses a TOML mapping document and validates it once, up front.
    pub fn parse(source: &str) -> Result<Self> {
        let doc: SchemaDoc = toml::from_str(source)
            .map_err(|e| MarginaliaError::Config(format!("invalid schema mapping: {e}")))?;

        let mut entities = BTreeMap::new();
        for (name, entity) in doc.entity {
            if entity.fields.is_empty() {
                return Err(MarginaliaError::Config(format!(
                    "entity {name} declares no fields"
                )));
            }
            let mut fields = Vec::with_capacity(entity.fields.len());
            for field in entity.fields {
                if fields.iter().any(|(logical, _)| *logical == field.logical) {
                    return Err(MarginaliaError::Config(format!(
                        "entity {name} maps field {} twice",
                        field.logical
                    )));
                }
                fields.push((field.logical, field.column));
            }
            if !doc.tables.contains_key(&name.to_lowercase()) {
                return Err(MarginaliaError::Config(format!(
                    "entity {name} has no [tables] entry"
                )));
            }
            entities.insert(name.clone(), EntitySchema { name, fields });
        }

        Ok(Self {
            tables: doc.tables,
            entities,
            associations: doc.association,
        })
    }

    /// Ordered field mapping for an entity type.
    pub fn entity(&self, name: &str) -> Result<&EntitySchema> {
        self.entities
            .get(name)
            .ok_or_else(|| MarginaliaError::UnknownEntity(name.to_string()))
    }

    /// Physical table name for an entity type (may be `alias.`-qualified).
    pub fn table(&self, entity: &str) -> Result<&str> {
        self.tables
            .get(&entity.to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| MarginaliaError::UnknownEntity(entity.to_string()))
    }

    pub fn association(&self, name: &str) -> Result<&Association> {
        self.associations
            .get(name)
            .ok_or_else(|| MarginaliaError::UnknownAssociation(name.to_string()))
    }
}
