//! # Marginalia
//!
//! A schema-driven SQLite mapper for the Apple Books library.
//!
//! Declarative field and relation metadata compile into lazily-executed read
//! queries; inter-entity relationships (to-many, to-one, many-to-many)
//! resolve through sequential single-table lookups, never multi-way joins.
//! The engine is schema-agnostic — logical field names map to physical
//! columns through a TOML document — and the Apple Books entity types ship in
//! [`models`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use marginalia::{Library, manager::contains};
//! use marginalia::models::Book;
//!
//! # fn main() -> marginalia::Result<()> {
//! let library = Library::open(
//!     Path::new("BKLibrary"),
//!     Path::new("AEAnnotation"),
//! )?;
//!
//! for book in library.books_by_author("Herbert")? {
//!     println!("{} ({:?} annotations)", book.title, book.annotations.as_ref().map(Vec::len));
//! }
//!
//! // Or drop down to the managers for a lazy, re-executing result:
//! let lazy = library.db().manager::<Book>()?
//!     .select()
//!     .filter([contains("title", "Dune")])
//!     .order_by("-creation_date")
//!     .limit(10)
//!     .lazy()?;
//! let count = lazy.len()?; // runs the query; so does every later access
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod error;
pub mod lazy;
pub mod library;
pub mod manager;
pub mod model;
pub mod models;
pub mod relation;
pub mod schema;
pub mod sql;
pub mod store;
pub mod value;

pub use db::Db;
pub use error::{MarginaliaError, Result};
pub use lazy::Lazy;
pub use library::Library;
pub use manager::{Manager, Select};
pub use model::Model;
pub use relation::{Relation, RelationKind, RelationRegistry};
pub use schema::SchemaRegistry;
pub use store::{RowSource, SqliteStore, locate_store};
pub use value::{Row, Value};
