use chrono::{DateTime, Utc};

use crate::db::Db;
use crate::error::Result;
use crate::model::{Model, RowView};
use crate::models::{Annotation, Collection};
use crate::value::{Row, Value};

/// A book in the Apple Books library.
///
/// Timestamps arrive as epoch milliseconds and are normalized to calendar
/// time at construction; `reading_progress` is scaled from a 0..1 ratio to a
/// percentage and `duration` from milliseconds to seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub asset_id: String,

    // Basic book information
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub content_type: Option<String>,
    pub page_count: Option<i64>,

    // File information
    pub path: Option<String>,
    pub filesize: Option<i64>,

    // Reading progress
    pub is_finished: bool,
    pub reading_progress: Option<f64>,
    pub duration: Option<f64>,

    // Dates
    pub creation_date: Option<DateTime<Utc>>,
    pub finished_date: Option<DateTime<Utc>>,
    pub last_opened_date: Option<DateTime<Utc>>,
    pub purchased_date: Option<DateTime<Utc>>,

    // Flags
    pub is_explicit: bool,
    pub is_locked: bool,
    pub is_ephemeral: bool,
    pub is_hidden: bool,
    pub is_sample: bool,
    pub is_store_audiobook: bool,

    // User interactions
    pub rating: Option<i64>,

    // Relations; `None` until resolved
    pub annotations: Option<Vec<Annotation>>,
    pub collections: Option<Vec<Collection>>,
}

impl Model for Book {
    const ENTITY: &'static str = "Book";

    const FIELDS: &'static [&'static str] = &[
        "id",
        "asset_id",
        "title",
        "author",
        "description",
        "genre",
        "content_type",
        "page_count",
        "path",
        "filesize",
        "is_finished",
        "reading_progress",
        "duration",
        "creation_date",
        "finished_date",
        "last_opened_date",
        "purchased_date",
        "is_explicit",
        "is_locked",
        "is_ephemeral",
        "is_hidden",
        "is_sample",
        "is_store_audiobook",
        "rating",
    ];

    fn from_row(row: &Row) -> Result<Self> {
        let row = RowView::new::<Self>(row)?;
        Ok(Self {
            id: row.integer(0).unwrap_or_default(),
            asset_id: row.text_or_default(1),
            title: row.text_or_default(2),
            author: row.text_or_default(3),
            description: row.text(4),
            genre: row.text(5),
            content_type: row.text(6),
            page_count: row.integer(7),
            path: row.text(8),
            filesize: row.integer(9),
            is_finished: row.flag(10),
            reading_progress: row.real(11).map(|ratio| ratio * 100.0),
            duration: row.real(12).map(|ms| ms / 1000.0),
            creation_date: row.datetime_ms(13),
            finished_date: row.datetime_ms(14),
            last_opened_date: row.datetime_ms(15),
            purchased_date: row.datetime_ms(16),
            is_explicit: row.flag(17),
            is_locked: row.flag(18),
            is_ephemeral: row.flag(19),
            is_hidden: row.flag(20),
            is_sample: row.flag(21),
            is_store_audiobook: row.flag(22),
            rating: row.integer(23),
            annotations: None,
            collections: None,
        })
    }

    fn resolve(&mut self, db: &Db) -> Result<()> {
        let key = Value::from(self.asset_id.clone());
        self.annotations = Some(db.related("Book", "annotations", &key)?);
        self.collections = Some(db.related("Book", "collections", &key)?);
        Ok(())
    }
}
