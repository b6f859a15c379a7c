//! High-level read API over the entity managers.
//!
//! This is the surface a consumer actually holds: it wires store discovery,
//! attachment, and the registries together, and exposes the common lookups by
//! id, name, text and color. Single-result lookups fail with a not-found
//! error naming the identifying field that missed.

use std::path::Path;

use tracing::debug;

use crate::db::Db;
use crate::error::{MarginaliaError, Result};
use crate::lazy::Lazy;
use crate::manager::{contains, eq, is_in, is_null};
use crate::model::Model;
use crate::models::{self, Annotation, AnnotationColor, Book, Collection};
use crate::store::{RowSource, SqliteStore};
use crate::value::Value;

/// An opened Apple Books library.
pub struct Library {
    db: Db,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library").finish_non_exhaustive()
    }
}

impl Library {
    /// Opens the library and annotation container directories: the first
    /// `*.sqlite` file in each, with the annotation store attached under the
    /// `anno_db` alias the mapping expects.
    pub fn open(book_dir: &Path, annotation_dir: &Path) -> Result<Self> {
        let store = SqliteStore::open_dirs(book_dir, &[("anno_db", annotation_dir)])?;
        debug!("opened Apple Books stores");
        Self::with_store(store)
    }

    /// Builds a library over any row source, with the embedded mapping and
    /// relation declarations.
    pub fn with_store(store: impl RowSource + 'static) -> Result<Self> {
        Ok(Self {
            db: Db::new(store, models::schema()?, models::relations()),
        })
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    fn first<M: Model>(lazy: &Lazy<'_, M>, lookup: String) -> Result<M> {
        lazy.get(0).map_err(|err| match err {
            MarginaliaError::NotFound { entity, .. } => {
                MarginaliaError::NotFound { entity, lookup }
            }
            other => other,
        })
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    pub fn collections(&self) -> Result<Vec<Collection>> {
        self.db.manager::<Collection>()?.all()?.to_vec()
    }

    pub fn collection_by_id(&self, id: i64) -> Result<Collection> {
        let lazy = self.db.manager::<Collection>()?.filter([eq("id", id)])?;
        Self::first(&lazy, format!("id {id}"))
    }

    pub fn collection_by_name(&self, name: &str) -> Result<Collection> {
        let lazy = self.db.manager::<Collection>()?.filter([eq("title", name)])?;
        Self::first(&lazy, format!("name {name}"))
    }

    // ------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------

    pub fn books(&self) -> Result<Vec<Book>> {
        self.db.manager::<Book>()?.all()?.to_vec()
    }

    pub fn book_by_id(&self, id: i64) -> Result<Book> {
        let lazy = self.db.manager::<Book>()?.filter([eq("id", id)])?;
        Self::first(&lazy, format!("id {id}"))
    }

    pub fn book_by_asset_id(&self, asset_id: &str) -> Result<Book> {
        let lazy = self
            .db
            .manager::<Book>()?
            .filter([eq("asset_id", asset_id)])?;
        Self::first(&lazy, format!("asset id {asset_id}"))
    }

    pub fn books_by_title(&self, title: &str) -> Result<Vec<Book>> {
        self.db
            .manager::<Book>()?
            .filter([contains("title", title)])?
            .to_vec()
    }

    pub fn books_by_author(&self, author: &str) -> Result<Vec<Book>> {
        self.db
            .manager::<Book>()?
            .filter([contains("author", author)])?
            .to_vec()
    }

    pub fn books_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
        self.db
            .manager::<Book>()?
            .filter([eq("genre", genre)])?
            .to_vec()
    }

    pub fn finished_books(&self) -> Result<Vec<Book>> {
        self.db
            .manager::<Book>()?
            .filter([eq("is_finished", true)])?
            .to_vec()
    }

    pub fn unfinished_books(&self) -> Result<Vec<Book>> {
        self.db
            .manager::<Book>()?
            .filter([eq("is_finished", false)])?
            .to_vec()
    }

    pub fn sample_books(&self) -> Result<Vec<Book>> {
        self.db
            .manager::<Book>()?
            .filter([eq("is_sample", true)])?
            .to_vec()
    }

    // ------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------

    pub fn annotations(&self) -> Result<Vec<Annotation>> {
        self.db.manager::<Annotation>()?.all()?.to_vec()
    }

    pub fn annotation_by_id(&self, id: i64) -> Result<Annotation> {
        let lazy = self.db.manager::<Annotation>()?.filter([eq("id", id)])?;
        Self::first(&lazy, format!("id {id}"))
    }

    /// Highlights only: colored, not underlined.
    pub fn highlights(&self) -> Result<Vec<Annotation>> {
        let styles: Vec<Value> = AnnotationColor::ALL
            .iter()
            .map(|color| Value::from(color.style()))
            .collect();
        self.db
            .manager::<Annotation>()?
            .filter([eq("is_underline", false), is_in("style", styles)])?
            .to_vec()
    }

    pub fn underlines(&self) -> Result<Vec<Annotation>> {
        self.db
            .manager::<Annotation>()?
            .filter([eq("is_underline", true)])?
            .to_vec()
    }

    /// Annotations carrying a note.
    pub fn notes(&self) -> Result<Vec<Annotation>> {
        self.db
            .manager::<Annotation>()?
            .filter([is_null("note", false)])?
            .to_vec()
    }

    pub fn annotations_by_color(&self, color: &str) -> Result<Vec<Annotation>> {
        let color = AnnotationColor::from_name(color)?;
        self.db
            .manager::<Annotation>()?
            .filter([eq("is_underline", false), eq("style", color.style())])?
            .to_vec()
    }

    pub fn annotations_by_chapter(&self, chapter: &str) -> Result<Vec<Annotation>> {
        self.db
            .manager::<Annotation>()?
            .filter([eq("chapter", chapter)])?
            .to_vec()
    }

    /// Text search across representative, selected and note text.
    pub fn search_annotations(&self, text: &str) -> Result<Vec<Annotation>> {
        self.db
            .manager::<Annotation>()?
            .select()
            .filter([
                contains("representative_text", text),
                contains("selected_text", text),
                contains("note", text),
            ])
            .use_or()
            .lazy()?
            .to_vec()
    }
}
