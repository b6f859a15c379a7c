//! The Apple Books entity types and their mapping configuration.
//!
//! The engine itself is schema-agnostic; everything Apple-Books-specific
//! lives here: the embedded mapping document, the three entity structs, and
//! the startup relation declarations.

mod annotation;
mod book;
mod collection;

pub use annotation::{Annotation, AnnotationColor, AnnotationKind};
pub use book::Book;
pub use collection::Collection;

use crate::error::Result;
use crate::relation::RelationRegistry;
use crate::schema::SchemaRegistry;

/// The logical-to-physical mapping for the Apple Books stores.
pub const MAPPINGS: &str = include_str!("mappings.toml");

/// Parses the embedded mapping document.
pub fn schema() -> Result<SchemaRegistry> {
    SchemaRegistry::parse(MAPPINGS)
}

/// Declares the relation graph. Called once at startup; each declaration
/// registers its inverse as well.
pub fn relations() -> RelationRegistry {
    RelationRegistry::builder()
        .has_many("Book", "annotations", "Annotation", "book", "asset_id")
        .many_to_many(
            "Collection",
            "books",
            "Book",
            "collections",
            "collection_member",
            "id",
            "asset_id",
        )
        .build()
}
