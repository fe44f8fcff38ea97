use std::marker::PhantomData;
use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Row, ToSql};

use super::error::{DbError, DbResult};
use super::handle::DataAccess;

/// Capabilities a persisted entity supplies so the generic CRUD mechanics can
/// run against it: one statement template per operation, a row mapper, an
/// insert-parameter mapper, and identity get/assign.
///
/// The named parameters in `INSERT_SQL` must match the names produced by
/// `insert_parameters` exactly; a typo surfaces as a data access error at
/// first use.
pub trait Record: Sized {
    /// Select every column for every row of the entity's table.
    const SELECT_SQL: &'static str;
    /// Insert one row; the identity column is store-assigned and excluded.
    const INSERT_SQL: &'static str;
    /// Delete one row by identity, bound as `:id`.
    const DELETE_SQL: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn insert_parameters(&self) -> Vec<(&'static str, Value)>;
    fn id(&self) -> Option<i64>;
    fn assign_id(&mut self, id: i64);
}

/// Entity-agnostic CRUD over a [`Record`] type. Holds no state of its own
/// beyond a shared reference to the data access handle, so it is free to be
/// called from concurrent tasks.
pub struct Repository<R: Record> {
    data_access: Arc<DataAccess>,
    _record: PhantomData<R>,
}

impl<R: Record> Repository<R> {
    pub fn new(data_access: Arc<DataAccess>) -> Self {
        Self {
            data_access,
            _record: PhantomData,
        }
    }

    /// Load every stored row, eagerly mapped.
    pub fn get_all(&self) -> DbResult<Vec<R>> {
        self.data_access.query_rows(R::SELECT_SQL, R::from_row)
    }

    /// Insert a new entity and write the store-assigned identity back into it.
    ///
    /// The entity must not already carry an identity; that is rejected before
    /// anything touches the store.
    pub fn add(&self, record: &mut R) -> DbResult<()> {
        if let Some(id) = record.id() {
            return Err(DbError::InvalidState(format!(
                "entity already carries store-assigned id {id}"
            )));
        }

        let values = record.insert_parameters();
        let params: Vec<(&str, &dyn ToSql)> = values
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect();

        let outcome = self.data_access.execute_non_query(R::INSERT_SQL, &params)?;
        record.assign_id(outcome.last_insert_id);
        Ok(())
    }

    /// Delete by identity. Deleting a row that does not exist is a no-op, not
    /// an error.
    pub fn remove(&self, id: i64) -> DbResult<()> {
        let outcome = self
            .data_access
            .execute_non_query(R::DELETE_SQL, &[(":id", &id)])?;
        if outcome.affected == 0 {
            log::debug!("remove: no row with id {id}");
        }
        Ok(())
    }
}
