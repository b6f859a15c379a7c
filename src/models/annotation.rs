use chrono::{DateTime, Utc};

use crate::db::Db;
use crate::error::{MarginaliaError, Result};
use crate::model::{Model, RowView};
use crate::models::Book;
use crate::value::{Row, Value};

/// Highlight colors, by the store's numeric style code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationColor {
    Green,
    Blue,
    Yellow,
    Pink,
    Purple,
}

impl AnnotationColor {
    pub const ALL: &'static [Self] = &[
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Pink,
        Self::Purple,
    ];

    pub const fn from_style(style: i64) -> Option<Self> {
        match style {
            1 => Some(Self::Green),
            2 => Some(Self::Blue),
            3 => Some(Self::Yellow),
            4 => Some(Self::Pink),
            5 => Some(Self::Purple),
            _ => None,
        }
    }

    pub const fn style(self) -> i64 {
        match self {
            Self::Green => 1,
            Self::Blue => 2,
            Self::Yellow => 3,
            Self::Pink => 4,
            Self::Purple => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Yellow => "YELLOW",
            Self::Pink => "PINK",
            Self::Purple => "PURPLE",
        }
    }

    /// Parses a color name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| MarginaliaError::UnknownColor(name.to_string()))
    }
}

impl std::fmt::Display for AnnotationColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed variant set an annotation row materializes into.
///
/// Dispatch order is fixed: the underline flag wins over everything, then a
/// style code inside the color enumeration makes a highlight, and anything
/// else is a plain note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Note,
    Highlight(AnnotationColor),
    Underline,
}

impl AnnotationKind {
    pub(crate) fn dispatch(is_underline: bool, style: i64) -> Self {
        if is_underline {
            Self::Underline
        } else if let Some(color) = AnnotationColor::from_style(style) {
            Self::Highlight(color)
        } else {
            Self::Note
        }
    }

    pub const fn color(self) -> Option<AnnotationColor> {
        match self {
            Self::Highlight(color) => Some(color),
            _ => None,
        }
    }
}

/// An annotation attached to a book: a note, highlight or underline.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: i64,
    pub asset_id: String,

    // Status
    pub is_deleted: bool,
    pub kind: AnnotationKind,

    // Dates
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,

    // Annotation details
    pub representative_text: Option<String>,
    pub selected_text: Option<String>,
    pub note: Option<String>,

    // Location
    pub chapter: Option<String>,
    pub location: Option<String>,

    /// Owning book (inverse of `Book.annotations`); `None` until resolved.
    pub book: Option<Box<Book>>,
}

impl Model for Annotation {
    const ENTITY: &'static str = "Annotation";

    const FIELDS: &'static [&'static str] = &[
        "id",
        "asset_id",
        "is_deleted",
        "is_underline",
        "style",
        "creation_date",
        "modification_date",
        "representative_text",
        "selected_text",
        "note",
        "chapter",
        "location",
    ];

    fn from_row(row: &Row) -> Result<Self> {
        let row = RowView::new::<Self>(row)?;
        Ok(Self {
            id: row.integer(0).unwrap_or_default(),
            asset_id: row.text_or_default(1),
            is_deleted: row.flag(2),
            kind: AnnotationKind::dispatch(row.flag(3), row.integer(4).unwrap_or_default()),
            creation_date: row.datetime_ms(5),
            modification_date: row.datetime_ms(6),
            representative_text: row.text(7),
            selected_text: row.text(8),
            note: row.text(9),
            chapter: row.text(10),
            location: row.text(11),
            book: None,
        })
    }

    fn resolve(&mut self, db: &Db) -> Result<()> {
        let key = Value::from(self.asset_id.clone());
        let mut books: Vec<Book> = db.related("Annotation", "book", &key)?;
        self.book = books.drain(..).next().map(Box::new);
        Ok(())
    }
}
