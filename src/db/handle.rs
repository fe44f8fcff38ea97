use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rusqlite::{Connection, Row, ToSql};

use super::error::{DbError, DbResult};

pub(crate) const SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: i64,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: r#"
        CREATE TABLE endpoint (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL
        );

        CREATE TABLE event (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            endpoint_id INTEGER NOT NULL REFERENCES endpoint(id),
            timestamp INTEGER NOT NULL,
            event_type TEXT NOT NULL,
            data TEXT NOT NULL
        );

        CREATE INDEX event_endpoint_idx ON event(endpoint_id);
        CREATE INDEX event_timestamp_idx ON event(timestamp);
    "#,
}];

/// Result of a non-query statement: rows touched plus the rowid the store
/// assigned to the most recent insert.
#[derive(Debug)]
pub(crate) struct NonQueryOutcome {
    pub affected: usize,
    pub last_insert_id: i64,
}

/// Owner of the physical database and of schema-version state.
///
/// Each operation opens its own connection and releases it on return, so
/// concurrent callers never contend on shared connection state. The schema
/// gate starts closed and opens only once `update_schema` has brought
/// `PRAGMA user_version` up to [`SCHEMA_VERSION`]; the raw execution
/// primitives refuse to run while it is closed.
pub struct DataAccess {
    path: String,
    schema_ready: AtomicBool,
}

impl DataAccess {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
            schema_ready: AtomicBool::new(false),
        }
    }

    /// Remove the backing database file to force a clean start.
    pub fn reset_all(&self) -> std::io::Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;
        Ok(conn)
    }

    /// Bring the persisted schema up to the version this binary expects and
    /// open the schema gate.
    ///
    /// Idempotent: a second call against a current schema is a no-op. Pending
    /// migrations run inside one transaction, so a failure partway leaves the
    /// schema exactly as it was.
    pub fn update_schema(&self) -> DbResult<()> {
        let mut conn = self
            .connect()
            .map_err(|err| DbError::SchemaMigration(err.to_string()))?;
        Self::migrate(&mut conn)?;
        self.schema_ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Current `PRAGMA user_version`, for diagnostics.
    pub fn schema_version(&self) -> DbResult<i64> {
        let conn = self.connect()?;
        let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    fn migrate(conn: &mut Connection) -> DbResult<()> {
        let current: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|err| DbError::SchemaMigration(err.to_string()))?;

        if current == SCHEMA_VERSION {
            return Ok(());
        }
        if current > SCHEMA_VERSION {
            return Err(DbError::SchemaMigration(format!(
                "database schema version {current} is newer than supported version {SCHEMA_VERSION}"
            )));
        }

        log::info!("schema migration: {} -> {}", current, SCHEMA_VERSION);

        let tx = conn
            .transaction()
            .map_err(|err| DbError::SchemaMigration(err.to_string()))?;
        for migration in MIGRATIONS {
            if migration.version <= current {
                continue;
            }
            tx.execute_batch(migration.sql)
                .map_err(|err| DbError::SchemaMigration(err.to_string()))?;
            tx.pragma_update(None, "user_version", migration.version)
                .map_err(|err| DbError::SchemaMigration(err.to_string()))?;
        }
        tx.commit()
            .map_err(|err| DbError::SchemaMigration(err.to_string()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        if !self.schema_ready.load(Ordering::SeqCst) {
            return Err(DbError::SchemaNotReady);
        }
        let conn = self.connect()?;
        Ok(f(&conn)?)
    }

    /// Execute a query statement and map every returned row.
    pub(crate) fn query_rows<T, F>(&self, sql: &str, map: F) -> DbResult<Vec<T>>
    where
        F: Fn(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map([], |row| map(row))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// Execute a non-query statement with named parameters.
    pub(crate) fn execute_non_query(
        &self,
        sql: &str,
        params: &[(&str, &dyn ToSql)],
    ) -> DbResult<NonQueryOutcome> {
        self.with_conn(|conn| {
            let affected = conn.execute(sql, params)?;
            Ok(NonQueryOutcome {
                affected,
                last_insert_id: conn.last_insert_rowid(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("portier.sqlite")
    }

    #[test]
    fn update_schema_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let data_access = DataAccess::new(db_path(&dir));

        data_access.update_schema().unwrap();
        assert_eq!(data_access.schema_version().unwrap(), SCHEMA_VERSION);

        data_access.update_schema().unwrap();
        assert_eq!(data_access.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn newer_database_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = db_path(&dir);

        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", 999).unwrap();
        drop(conn);

        let data_access = DataAccess::new(&path);
        let err = data_access.update_schema().unwrap_err();
        assert!(matches!(err, DbError::SchemaMigration(_)));
    }

    #[test]
    fn primitives_refuse_to_run_before_migration() {
        let dir = TempDir::new().unwrap();
        let data_access = DataAccess::new(db_path(&dir));

        let err = data_access
            .query_rows("SELECT 1", |row| row.get::<_, i64>(0))
            .unwrap_err();
        assert!(matches!(err, DbError::SchemaNotReady));

        let err = data_access
            .execute_non_query("DELETE FROM event WHERE id = :id", &[(":id", &1i64)])
            .unwrap_err();
        assert!(matches!(err, DbError::SchemaNotReady));
    }

    #[test]
    fn reset_all_ok_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = db_path(&dir);
        let data_access = DataAccess::new(&path);
        data_access.reset_all().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn reset_all_removes_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = db_path(&dir);
        std::fs::write(&path, b"dummy").unwrap();

        let data_access = DataAccess::new(&path);
        data_access.reset_all().unwrap();
        assert!(!path.exists());
    }
}
