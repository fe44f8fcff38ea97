use rusqlite::types::Value;
use rusqlite::Row;

use super::repository::{Record, Repository};
use crate::model::Event;

/// Repository over the `event` table.
pub type EventRepository = Repository<Event>;

impl Record for Event {
    const SELECT_SQL: &'static str =
        "SELECT id, endpoint_id, timestamp, event_type, data FROM event";

    const INSERT_SQL: &'static str = "INSERT INTO event (endpoint_id, timestamp, event_type, data) \
         VALUES (:endpoint_id, :timestamp, :event_type, :data)";

    const DELETE_SQL: &'static str = "DELETE FROM event WHERE id = :id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Event {
            id: Some(row.get(0)?),
            endpoint_id: row.get(1)?,
            timestamp: row.get(2)?,
            event_type: row.get(3)?,
            data: row.get(4)?,
        })
    }

    fn insert_parameters(&self) -> Vec<(&'static str, Value)> {
        vec![
            (":endpoint_id", Value::Integer(self.endpoint_id)),
            (":timestamp", Value::Integer(self.timestamp)),
            (":event_type", Value::Text(self.event_type.clone())),
            (":data", Value::Text(self.data.clone())),
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
    use crate::db::{DataAccess, DbError};

    fn migrated_data_access(dir: &TempDir) -> Arc<DataAccess> {
        let data_access = Arc::new(DataAccess::new(dir.path().join("portier.sqlite")));
        data_access.update_schema().unwrap();
        data_access
    }

    fn sample_event() -> Event {
        Event::new(1, 1_700_000_000, "door_open", "{}")
    }

    #[test]
    fn add_assigns_identity_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = EventRepository::new(migrated_data_access(&dir));

        let mut event = sample_event();
        repo.add(&mut event).unwrap();
        let id = event.id.expect("identity assigned on insert");
        assert!(id > 0);

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], event);
    }

    #[test]
    fn add_rejects_entity_that_already_has_identity() {
        let dir = TempDir::new().unwrap();
        let repo = EventRepository::new(migrated_data_access(&dir));

        let mut event = sample_event();
        event.id = Some(42);
        let err = repo.add(&mut event).unwrap_err();
        assert!(matches!(err, DbError::InvalidState(_)));

        // Rejected before any store mutation.
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn remove_of_missing_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let repo = EventRepository::new(migrated_data_access(&dir));

        let mut event = sample_event();
        repo.add(&mut event).unwrap();

        repo.remove(9999).unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn remove_deletes_exactly_one_row() {
        let dir = TempDir::new().unwrap();
        let repo = EventRepository::new(migrated_data_access(&dir));

        let mut first = sample_event();
        let mut second = Event::new(2, 1_700_000_100, "door_forced", "{}");
        repo.add(&mut first).unwrap();
        repo.add(&mut second).unwrap();

        repo.remove(first.id.unwrap()).unwrap();

        let remaining = repo.get_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0], second);
    }

    #[test]
    fn event_lifecycle_end_to_end() {
        let dir = TempDir::new().unwrap();
        let repo = EventRepository::new(migrated_data_access(&dir));

        let mut event = sample_event();
        repo.add(&mut event).unwrap();
        assert_eq!(event.id, Some(1));

        let all = repo.get_all().unwrap();
        assert_eq!(
            all,
            vec![Event {
                id: Some(1),
                ..sample_event()
            }]
        );

        repo.remove(1).unwrap();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn repository_refuses_before_migration() {
        let dir = TempDir::new().unwrap();
        let data_access = Arc::new(DataAccess::new(dir.path().join("portier.sqlite")));
        let repo = EventRepository::new(data_access);

        let err = repo.get_all().unwrap_err();
        assert!(matches!(err, DbError::SchemaNotReady));
    }

    #[test]
    fn mistyped_template_parameter_fails_at_first_use() {
        // Same table and fields as Event, but the insert template names a
        // parameter the mapper never produces.
        struct MistypedEvent(Event);

        impl Record for MistypedEvent {
            const SELECT_SQL: &'static str = Event::SELECT_SQL;
            const INSERT_SQL: &'static str =
                "INSERT INTO event (endpoint_id, timestamp, event_type, data) \
                 VALUES (:endpoint_id, :timestamp, :kind, :data)";
            const DELETE_SQL: &'static str = Event::DELETE_SQL;

            fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
                Event::from_row(row).map(MistypedEvent)
            }

            fn insert_parameters(&self) -> Vec<(&'static str, Value)> {
                self.0.insert_parameters()
            }

            fn id(&self) -> Option<i64> {
                self.0.id
            }

            fn assign_id(&mut self, id: i64) {
                self.0.id = Some(id);
            }
        }

        let dir = TempDir::new().unwrap();
        let repo: Repository<MistypedEvent> = Repository::new(migrated_data_access(&dir));

        let mut event = MistypedEvent(sample_event());
        let err = repo.add(&mut event).unwrap_err();
        assert!(matches!(err, DbError::DataAccess(_)));
    }
}
