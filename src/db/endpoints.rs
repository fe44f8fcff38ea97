use rusqlite::types::Value;
use rusqlite::Row;

use super::repository::{Record, Repository};
use crate::model::Endpoint;

/// Repository over the `endpoint` table.
pub type EndpointRepository = Repository<Endpoint>;

impl Record for Endpoint {
    const SELECT_SQL: &'static str = "SELECT id, name, address FROM endpoint";

    const INSERT_SQL: &'static str =
        "INSERT INTO endpoint (name, address) VALUES (:name, :address)";

    const DELETE_SQL: &'static str = "DELETE FROM endpoint WHERE id = :id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Endpoint {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            address: row.get(2)?,
        })
    }

    fn insert_parameters(&self) -> Vec<(&'static str, Value)> {
        vec![
            (":name", Value::Text(self.name.clone())),
            (":address", Value::Text(self.address.clone())),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::db::DataAccess;

    #[test]
    fn endpoint_crud_reuses_generic_mechanics() {
        let dir = TempDir::new().unwrap();
        let data_access = Arc::new(DataAccess::new(dir.path().join("portier.sqlite")));
        data_access.update_schema().unwrap();
        let repo = EndpointRepository::new(data_access);

        let mut front_door = Endpoint::new("front door", "osdp://bus0/0");
        let mut loading_dock = Endpoint::new("loading dock", "osdp://bus0/1");
        repo.add(&mut front_door).unwrap();
        repo.add(&mut loading_dock).unwrap();
        assert_ne!(front_door.id, loading_dock.id);

        let all = repo.get_all().unwrap();
        assert_eq!(all, vec![front_door, loading_dock.clone()]);

        repo.remove(loading_dock.id.unwrap()).unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
