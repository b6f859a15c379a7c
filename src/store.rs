//! Row source: owns the SQLite connection(s) and executes compiled text.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MarginaliaError, Result};
use crate::value::{Row, Value};

/// Executes a compiled statement and returns every row as ordered scalars.
///
/// The engine talks to the store exclusively through this trait, so tests can
/// substitute their own row sources.
pub trait RowSource {
    fn execute(&self, sql: &str) -> Result<Vec<Row>>;
}

/// A SQLite-backed row source.
///
/// Owns exactly one primary connection; secondary stores are attached under a
/// logical alias so one statement can reference `alias.table` across stores.
/// The connection is opened once and reused for the lifetime of the store; it
/// closes when the store drops, on every path, including a failed secondary
/// attachment during construction.
pub struct SqliteStore {
    conn: rusqlite::Connection,
}

impl SqliteStore {
    /// Opens the primary database and attaches each secondary one under its
    /// alias. Missing or unreadable files are fatal here, not per-query.
    pub fn open(primary: &Path, attachments: &[(&str, &Path)]) -> Result<Self> {
        let conn = rusqlite::Connection::open(primary).map_err(|e| {
            MarginaliaError::Connection(format!("cannot open {}: {e}", primary.display()))
        })?;
        debug!(path = %primary.display(), "opened primary store");

        for (alias, path) in attachments {
            // The alias is a registry-controlled identifier; only the path is
            // caller data.
            let sql = format!("ATTACH DATABASE ?1 AS {alias}");
            conn.execute(&sql, [path.to_string_lossy()]).map_err(|e| {
                MarginaliaError::Connection(format!(
                    "cannot attach {} as {alias}: {e}",
                    path.display()
                ))
            })?;
            debug!(path = %path.display(), alias, "attached secondary store");
        }

        Ok(Self { conn })
    }

    /// Opens the stores found inside container directories: the first
    /// `*.sqlite` file per directory, primary first.
    pub fn open_dirs(primary_dir: &Path, attachment_dirs: &[(&str, &Path)]) -> Result<Self> {
        let primary = locate_store(primary_dir)?;
        let located = attachment_dirs
            .iter()
            .map(|(alias, dir)| Ok((*alias, locate_store(dir)?)))
            .collect::<Result<Vec<_>>>()?;
        let attachments = located
            .iter()
            .map(|(alias, path)| (*alias, path.as_path()))
            .collect::<Vec<_>>();
        Self::open(&primary, &attachments)
    }

    /// In-memory store, used by tests and fixtures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| MarginaliaError::Connection(format!("cannot open in-memory store: {e}")))?;
        Ok(Self { conn })
    }

    /// Runs a batch of semicolon-separated statements, discarding any output.
    /// Fixture setup only; the mapping engine itself never writes.
    pub fn batch(&self, sql: &str) -> Result<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| MarginaliaError::Query {
                sql: sql.to_string(),
                source: e,
            })
    }
}

impl RowSource for SqliteStore {
    fn execute(&self, sql: &str) -> Result<Vec<Row>> {
        let query_err = |source: rusqlite::Error| MarginaliaError::Query {
            sql: sql.to_string(),
            source,
        };

        let mut stmt = self.conn.prepare(sql).map_err(query_err)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query([]).map_err(query_err)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(query_err)? {
            let mut values = Vec::with_capacity(columns);
            for index in 0..columns {
                let value = match row.get_ref(index).map_err(query_err)? {
                    rusqlite::types::ValueRef::Null => Value::Null,
                    rusqlite::types::ValueRef::Integer(i) => Value::Integer(i),
                    rusqlite::types::ValueRef::Real(r) => Value::Real(r),
                    rusqlite::types::ValueRef::Text(bytes) => {
                        Value::Text(String::from_utf8_lossy(bytes).into_owned())
                    }
                    rusqlite::types::ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
                };
                values.push(value);
            }
            out.push(values);
        }

        debug!(sql, rows = out.len(), "executed statement");
        Ok(out)
    }
}

/// Finds the store file inside a container directory: the lexicographically
/// first `*.sqlite` match. No file at all means the application that owns the
/// store has never written one, which is a setup failure.
pub fn locate_store(dir: &Path) -> Result<PathBuf> {
    let pattern = format!("{}/*.sqlite", dir.display());
    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| MarginaliaError::Connection(format!("bad store pattern {pattern}: {e}")))?
        .filter_map(std::result::Result::ok)
        .collect();
    matches.sort();
    matches.into_iter().next().ok_or_else(|| {
        MarginaliaError::Connection(format!("no sqlite files found in {}", dir.display()))
    })
}
