use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("data access error: {0}")]
    DataAccess(#[from] rusqlite::Error),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("schema migration failed: {0}")]
    SchemaMigration(String),
    #[error("schema not migrated; update_schema must complete before repository use")]
    SchemaNotReady,
}
