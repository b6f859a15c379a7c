use crate::db::Db;
use crate::error::Result;
use crate::model::{Model, RowView};
use crate::models::Book;
use crate::value::{Row, Value};

/// A collection in the Apple Books library.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub id: i64,
    pub title: String,

    // Status
    pub is_deleted: bool,
    pub is_hidden: bool,

    // Collection details
    pub details: Option<String>,

    /// Member books, through the collection-member association table;
    /// `None` until resolved.
    pub books: Option<Vec<Book>>,
}

impl Model for Collection {
    const ENTITY: &'static str = "Collection";

    const FIELDS: &'static [&'static str] = &["id", "title", "is_deleted", "is_hidden", "details"];

    fn from_row(row: &Row) -> Result<Self> {
        let row = RowView::new::<Self>(row)?;
        Ok(Self {
            id: row.integer(0).unwrap_or_default(),
            title: row.text_or_default(1),
            is_deleted: row.flag(2),
            is_hidden: row.flag(3),
            details: row.text(4),
            books: None,
        })
    }

    fn resolve(&mut self, db: &Db) -> Result<()> {
        let key = Value::from(self.id);
        self.books = Some(db.related("Collection", "books", &key)?);
        Ok(())
    }
}
