//! Relation descriptors and the process-wide relation registry.
//!
//! Relations are declared once, at startup, through [`RelationRegistry::builder`].
//! Declaring a forward relation always registers its inverse on the related
//! type, so a to-many/to-one pair can never exist one-sided. The registry is
//! immutable once built; instances materialized afterwards only read it.

use std::collections::BTreeMap;

/// How a traversal from one entity type to another is joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationKind {
    /// One row on this side owns many rows on the other, joined by equality
    /// of the named logical field present on both sides.
    ToMany { on: String },
    /// Inverse of a to-many, or a direct one-to-one equality join.
    ToOne { on: String },
    /// Joined through an association table. `from_key` is the logical field
    /// on the declaring side whose value is stored in the declaring side's
    /// association column; `to_key` is its counterpart on the target side.
    ManyToMany {
        association: String,
        from_key: String,
        to_key: String,
    },
}

/// A declared traversal from `owner` to `target`.
#[derive(Debug, Clone)]
pub struct Relation {
    pub owner: String,
    pub name: String,
    pub target: String,
    pub kind: RelationKind,
}

/// All declared relations, keyed by `(owner, name)`.
#[derive(Debug, Default)]
pub struct RelationRegistry {
    relations: BTreeMap<(String, String), Relation>,
}

impl RelationRegistry {
    pub fn builder() -> RelationRegistryBuilder {
        RelationRegistryBuilder::default()
    }

    pub fn get(&self, owner: &str, name: &str) -> Option<&Relation> {
        self.relations.get(&(owner.to_string(), name.to_string()))
    }

    /// Every relation declared on one entity type.
    pub fn of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Relation> {
        self.relations
            .values()
            .filter(move |relation| relation.owner == owner)
    }
}

#[derive(Debug, Default)]
pub struct RelationRegistryBuilder {
    relations: BTreeMap<(String, String), Relation>,
}

impl RelationRegistryBuilder {
    fn insert(&mut self, relation: Relation) {
        self.relations
            .insert((relation.owner.clone(), relation.name.clone()), relation);
    }

    /// Declares `owner.name` as a to-many over `on`, and registers the
    /// inverse to-one `target.inverse` over the same field.
    pub fn has_many(
        mut self,
        owner: &str,
        name: &str,
        target: &str,
        inverse: &str,
        on: &str,
    ) -> Self {
        self.insert(Relation {
            owner: owner.to_string(),
            name: name.to_string(),
            target: target.to_string(),
            kind: RelationKind::ToMany { on: on.to_string() },
        });
        self.insert(Relation {
            owner: target.to_string(),
            name: inverse.to_string(),
            target: owner.to_string(),
            kind: RelationKind::ToOne { on: on.to_string() },
        });
        self
    }

    /// Declares `owner.name` as a many-to-many through `association`, and
    /// registers the symmetric `target.inverse` with the keys swapped.
    pub fn many_to_many(
        mut self,
        owner: &str,
        name: &str,
        target: &str,
        inverse: &str,
        association: &str,
        from_key: &str,
        to_key: &str,
    ) -> Self {
        self.insert(Relation {
            owner: owner.to_string(),
            name: name.to_string(),
            target: target.to_string(),
            kind: RelationKind::ManyToMany {
                association: association.to_string(),
                from_key: from_key.to_string(),
                to_key: to_key.to_string(),
            },
        });
        self.insert(Relation {
            owner: target.to_string(),
            name: inverse.to_string(),
            target: owner.to_string(),
            kind: RelationKind::ManyToMany {
                association: association.to_string(),
                from_key: to_key.to_string(),
                to_key: from_key.to_string(),
            },
        });
        self
    }

    pub fn build(self) -> RelationRegistry {
        RelationRegistry {
            relations: self.relations,
        }
    }
}
