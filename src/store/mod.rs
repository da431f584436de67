//! SQLite snippet storage.
//!
//! Persists snippet records to a local SQLite database with one table:
//! - snippets: id, title, content, language, tags, created_at, updated_at
//!
//! Supports:
//! - Idempotent schema creation on open (table plus title/recency indexes)
//! - Create/get/list/update/delete plus distinct tag enumeration
//! - Substring filtering on title, content, and tags
//!
//! The connection sits behind a mutex so the store can be shared across the
//! web server's worker threads; every operation is a single serialized
//! statement, so a mutation either fully applies or not at all.

use std::path::Path;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection};
use serde::{Deserialize, Serialize};

/// A stored snippet record. Timestamps are RFC 3339 UTC strings; their
/// lexicographic order is their chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub language: String,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The mutable fields of a snippet, as accepted by create and update.
#[derive(Debug, Clone, Default)]
pub struct SnippetDraft {
    pub title: String,
    pub content: String,
    pub language: String,
    pub tags: String,
}

pub struct Store {
    conn: Mutex<Connection>,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Initialize database schema
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snippets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            language TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_snippets_title ON snippets(title)",
        [],
    )?;

    // recency index backs the default listing order
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_snippets_updated ON snippets(updated_at DESC)",
        [],
    )?;

    Ok(())
}

fn row_to_snippet(row: &rusqlite::Row) -> rusqlite::Result<Snippet> {
    Ok(Snippet {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        language: row.get(3)?,
        tags: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const SNIPPET_COLUMNS: &str = "id, title, content, language, tags, created_at, updated_at";

impl Store {
    /// Open the database at `path`, creating the parent directory and the
    /// schema if they do not exist yet.
    pub fn open(path: &Path) -> Result<Store, Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        init_schema(&conn)?;

        Ok(Store {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a new snippet with created_at == updated_at; returns the new id.
    pub fn create(&self, draft: &SnippetDraft) -> rusqlite::Result<i64> {
        let conn = self.conn.lock().unwrap();
        let now = now_rfc3339();

        conn.execute(
            "INSERT INTO snippets (title, content, language, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![draft.title, draft.content, draft.language, draft.tags, now],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single snippet by id, or None if it does not exist.
    pub fn get(&self, id: i64) -> rusqlite::Result<Option<Snippet>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = ?1"
        ))?;

        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_snippet(row)?)),
            None => Ok(None),
        }
    }

    /// List snippets, most recently updated first (ties broken by newest id).
    ///
    /// `search` keeps rows where the term occurs as a substring of title,
    /// content, or tags. `tag` keeps rows where the raw tags field contains
    /// the value as a substring; this matches on the whole field, so
    /// filtering by "py" also matches a "python" tag. Filters AND-compose,
    /// and empty strings are treated as absent.
    pub fn list(&self, search: Option<&str>, tag: Option<&str>) -> rusqlite::Result<Vec<Snippet>> {
        let conn = self.conn.lock().unwrap();

        let mut sql = format!("SELECT {SNIPPET_COLUMNS} FROM snippets WHERE 1=1");
        let mut patterns: Vec<String> = Vec::new();

        if let Some(term) = search.filter(|s| !s.is_empty()) {
            patterns.push(format!("%{term}%"));
            let n = patterns.len();
            sql.push_str(&format!(
                " AND (title LIKE ?{n} OR content LIKE ?{n} OR tags LIKE ?{n})"
            ));
        }

        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            patterns.push(format!("%{tag}%"));
            sql.push_str(&format!(" AND tags LIKE ?{}", patterns.len()));
        }

        sql.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let snippets = stmt
            .query_map(params_from_iter(patterns.iter()), row_to_snippet)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(snippets)
    }

    /// Replace all mutable fields and refresh updated_at.
    /// Returns false when the id does not exist.
    pub fn update(&self, id: i64, draft: &SnippetDraft) -> rusqlite::Result<bool> {
        let conn = self.conn.lock().unwrap();
        let now = now_rfc3339();

        let changed = conn.execute(
            "UPDATE snippets
             SET title = ?1, content = ?2, language = ?3, tags = ?4, updated_at = ?5
             WHERE id = ?6",
            params![draft.title, draft.content, draft.language, draft.tags, now, id],
        )?;

        Ok(changed > 0)
    }

    /// Remove a snippet permanently. Returns false when the id does not exist.
    pub fn delete(&self, id: i64) -> rusqlite::Result<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute("DELETE FROM snippets WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// All distinct tags across all records: non-blank trimmed comma-segments,
    /// deduplicated, sorted ascending, case-sensitive.
    pub fn distinct_tags(&self) -> rusqlite::Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT tags FROM snippets WHERE tags != ''")?;

        let fields = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tags = std::collections::BTreeSet::new();
        for field in fields {
            for segment in field.split(',') {
                let tag = segment.trim();
                if !tag.is_empty() {
                    tags.insert(tag.to_string());
                }
            }
        }

        Ok(tags.into_iter().collect())
    }
}
