//! SQLite storage backend

use super::traits::{Constraint, OpenStore, Pattern, Row, StorageResult, TripleStore};
use crate::graph::{Predicate, Triple};
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed triple store
///
/// One `triples` table keyed by (subject, predicate, object). Patterns are
/// compiled into parameterized SQL; literal values are never spliced into
/// the query text. Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS triples (
                subject TEXT NOT NULL,
                predicate TEXT NOT NULL,
                object TEXT NOT NULL,
                PRIMARY KEY (subject, predicate, object)
            );

            -- Facet and filter lookups go predicate-first
            CREATE INDEX IF NOT EXISTS idx_triples_predicate
                ON triples(predicate, object);

            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Compile a pattern into a SELECT yielding (subject, value) rows
    fn compile(pattern: &Pattern) -> (String, Vec<String>) {
        let mut params: Vec<String> = Vec::new();
        let mut sql = match pattern.bind {
            Some(predicate) => {
                params.push(predicate.iri().to_string());
                String::from("SELECT DISTINCT s.subject, s.object FROM triples s WHERE s.predicate = ?")
            }
            None => String::from("SELECT DISTINCT s.subject, NULL FROM triples s WHERE 1 = 1"),
        };

        for constraint in &pattern.constraints {
            match constraint {
                Constraint::Equals { predicate, object } => {
                    sql.push_str(
                        " AND EXISTS (SELECT 1 FROM triples c \
                         WHERE c.subject = s.subject AND c.predicate = ? AND c.object = ?)",
                    );
                    params.push(predicate.iri().to_string());
                    params.push(object.clone());
                }
                Constraint::Absent { predicate } => {
                    sql.push_str(
                        " AND NOT EXISTS (SELECT 1 FROM triples c \
                         WHERE c.subject = s.subject AND c.predicate = ?)",
                    );
                    params.push(predicate.iri().to_string());
                }
            }
        }

        (sql, params)
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }
}

impl TripleStore for SqliteStore {
    fn insert(&self, triple: &Triple) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO triples (subject, predicate, object) VALUES (?1, ?2, ?3)",
            params![triple.subject, triple.predicate.iri(), triple.object],
        )?;
        Ok(changed > 0)
    }

    fn insert_all(&self, triples: &[Triple]) -> StorageResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO triples (subject, predicate, object) VALUES (?1, ?2, ?3)",
            )?;
            for triple in triples {
                added += stmt.execute(params![triple.subject, triple.predicate.iri(), triple.object])?;
            }
        }
        tx.commit()?;
        Ok(added)
    }

    fn match_rows(&self, pattern: &Pattern) -> StorageResult<Vec<Row>> {
        let conn = self.conn.lock().unwrap();
        let (mut sql, params) = Self::compile(pattern);
        sql.push_str(" ORDER BY 1, 2");

        let mut stmt = conn.prepare(&sql)?;
        let rows_iter = stmt.query_map(params_from_iter(params.iter()), |row| {
            Ok(Row {
                subject: row.get::<_, String>(0)?,
                value: row.get::<_, Option<String>>(1)?,
            })
        })?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn exists(&self, pattern: &Pattern) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let (sql, params) = Self::compile(pattern);
        let found: bool = conn.query_row(
            &format!("SELECT EXISTS ({})", sql),
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        Ok(found)
    }

    fn objects(&self, subject: &str, predicate: Predicate) -> StorageResult<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT object FROM triples WHERE subject = ?1 AND predicate = ?2 ORDER BY object",
        )?;
        let objects = stmt
            .query_map(params![subject, predicate.iri()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(objects)
    }

    fn len(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM triples", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
