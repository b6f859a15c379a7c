//! Fixture stores mirroring the Apple Books layout: a library database and a
//! separate annotation database, each discovered as the first `*.sqlite`
//! file in its container directory.

#![allow(dead_code)]

use std::path::PathBuf;

use marginalia::Library;
use rusqlite::{Connection, params};
use tempfile::TempDir;

const LIBRARY_DDL: &str = "
    CREATE TABLE ZBKLIBRARYASSET (
        Z_PK INTEGER PRIMARY KEY,
        ZASSETID TEXT,
        ZTITLE TEXT,
        ZAUTHOR TEXT,
        ZBOOKDESCRIPTION TEXT,
        ZGENRE TEXT,
        ZCONTENTTYPE TEXT,
        ZPAGECOUNT INTEGER,
        ZPATH TEXT,
        ZFILESIZE INTEGER,
        ZISFINISHED INTEGER,
        ZREADINGPROGRESS REAL,
        ZDURATION REAL,
        ZCREATIONDATE REAL,
        ZDATEFINISHED REAL,
        ZLASTOPENEDDATE REAL,
        ZPURCHASEDATE REAL,
        ZISEXPLICIT INTEGER,
        ZISLOCKED INTEGER,
        ZISEPHEMERAL INTEGER,
        ZISHIDDEN INTEGER,
        ZISSAMPLE INTEGER,
        ZISSTOREAUDIOBOOK INTEGER,
        ZRATING INTEGER
    );
    CREATE TABLE ZBKCOLLECTION (
        Z_PK INTEGER PRIMARY KEY,
        ZTITLE TEXT,
        ZDELETEDFLAG INTEGER,
        ZHIDDEN INTEGER,
        ZCOLLECTIONDESCRIPTION TEXT
    );
    CREATE TABLE ZBKCOLLECTIONMEMBER (
        Z_PK INTEGER PRIMARY KEY,
        ZCOLLECTION INTEGER,
        ZASSET TEXT
    );
";

const ANNOTATION_DDL: &str = "
    CREATE TABLE ZAEANNOTATION (
        Z_PK INTEGER PRIMARY KEY,
        ZANNOTATIONASSETID TEXT,
        ZANNOTATIONDELETED INTEGER,
        ZANNOTATIONISUNDERLINE INTEGER,
        ZANNOTATIONSTYLE INTEGER,
        ZANNOTATIONCREATIONDATE REAL,
        ZANNOTATIONMODIFICATIONDATE REAL,
        ZANNOTATIONREPRESENTATIVETEXT TEXT,
        ZANNOTATIONSELECTEDTEXT TEXT,
        ZANNOTATIONNOTE TEXT,
        ZFUTUREPROOFING5 TEXT,
        ZANNOTATIONLOCATION TEXT
    );
";

pub struct Fixture {
    pub book_dir: TempDir,
    pub anno_dir: TempDir,
}

impl Fixture {
    /// Empty stores with the Apple Books table layout.
    pub fn new() -> Self {
        let book_dir = TempDir::new().unwrap();
        let anno_dir = TempDir::new().unwrap();

        let library = Connection::open(book_dir.path().join("BKLibrary-1.sqlite")).unwrap();
        library.execute_batch(LIBRARY_DDL).unwrap();

        let annotations = Connection::open(anno_dir.path().join("AEAnnotation-1.sqlite")).unwrap();
        annotations.execute_batch(ANNOTATION_DDL).unwrap();

        Self { book_dir, anno_dir }
    }

    /// Stores pre-populated with the shared scenario: three books, two
    /// collections (Favorites holds Dune and Emma, Sci-Fi holds Dune and
    /// Hyperion), and three annotations on Dune.
    pub fn seeded() -> Self {
        let fixture = Self::new();
        let library = fixture.library_conn();
        seed_book(&library, 1, "asset-1", "Dune", "Frank Herbert", true, 5);
        seed_book(&library, 2, "asset-2", "Emma", "Jane Austen", false, 4);
        seed_book(&library, 3, "asset-3", "Hyperion", "Dan Simmons", false, 3);

        seed_collection(&library, 1, "Favorites", "the keepers");
        seed_collection(&library, 2, "Sci-Fi", "space operas");
        seed_member(&library, 1, 1, "asset-1");
        seed_member(&library, 2, 1, "asset-2");
        seed_member(&library, 3, 2, "asset-1");
        seed_member(&library, 4, 2, "asset-3");

        let annotations = fixture.annotation_conn();
        seed_annotation(
            &annotations,
            1,
            "asset-1",
            false,
            3,
            Some("the spice must flow"),
            Some("Fear is the mind-killer"),
            Some("ch1"),
        );
        seed_annotation(&annotations, 2, "asset-1", true, 0, None, None, Some("ch2"));
        seed_annotation(&annotations, 3, "asset-1", false, 0, None, None, None);
        fixture
    }

    pub fn open(&self) -> Library {
        Library::open(self.book_dir.path(), self.anno_dir.path()).unwrap()
    }

    pub fn library_path(&self) -> PathBuf {
        self.book_dir.path().join("BKLibrary-1.sqlite")
    }

    /// A second handle onto the library store, for mutating it underneath an
    /// open `Library`.
    pub fn library_conn(&self) -> Connection {
        Connection::open(self.library_path()).unwrap()
    }

    pub fn annotation_conn(&self) -> Connection {
        Connection::open(self.anno_dir.path().join("AEAnnotation-1.sqlite")).unwrap()
    }
}

pub fn seed_book(
    conn: &Connection,
    id: i64,
    asset_id: &str,
    title: &str,
    author: &str,
    finished: bool,
    rating: i64,
) {
    conn.execute(
        "INSERT INTO ZBKLIBRARYASSET
            (Z_PK, ZASSETID, ZTITLE, ZAUTHOR, ZISFINISHED, ZRATING,
             ZREADINGPROGRESS, ZDURATION, ZCREATIONDATE, ZISSAMPLE)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0.5, 2000.0, 1700000000000.0, 0)",
        params![id, asset_id, title, author, finished, rating],
    )
    .unwrap();
}

pub fn seed_collection(conn: &Connection, id: i64, title: &str, details: &str) {
    conn.execute(
        "INSERT INTO ZBKCOLLECTION (Z_PK, ZTITLE, ZDELETEDFLAG, ZHIDDEN, ZCOLLECTIONDESCRIPTION)
         VALUES (?1, ?2, 0, 0, ?3)",
        params![id, title, details],
    )
    .unwrap();
}

pub fn seed_member(conn: &Connection, id: i64, collection_id: i64, asset_id: &str) {
    conn.execute(
        "INSERT INTO ZBKCOLLECTIONMEMBER (Z_PK, ZCOLLECTION, ZASSET) VALUES (?1, ?2, ?3)",
        params![id, collection_id, asset_id],
    )
    .unwrap();
}

pub fn seed_annotation(
    conn: &Connection,
    id: i64,
    asset_id: &str,
    underline: bool,
    style: i64,
    note: Option<&str>,
    selected_text: Option<&str>,
    chapter: Option<&str>,
) {
    conn.execute(
        "INSERT INTO ZAEANNOTATION
            (Z_PK, ZANNOTATIONASSETID, ZANNOTATIONDELETED, ZANNOTATIONISUNDERLINE,
             ZANNOTATIONSTYLE, ZANNOTATIONCREATIONDATE, ZANNOTATIONNOTE,
             ZANNOTATIONSELECTEDTEXT, ZANNOTATIONREPRESENTATIVETEXT, ZFUTUREPROOFING5)
         VALUES (?1, ?2, 0, ?3, ?4, 1700000000000.0, ?5, ?6, ?6, ?7)",
        params![id, asset_id, underline, style, note, selected_text, chapter],
    )
    .unwrap();
}
