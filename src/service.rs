use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::db::{DataAccess, EndpointRepository, EventRepository};
use crate::model::{Endpoint, Event};

/// Events older than this are pruned from the log at startup.
const EVENT_RETENTION_SECS: i64 = 90 * 24 * 60 * 60;

/// Business services started by the orchestrator once the schema is current.
pub trait Service {
    fn startup(&self) -> Result<()>;
}

/// The event-logging service proper. On startup it makes sure at least one
/// endpoint is registered, prunes events past retention, and records a
/// lifecycle event in the audit log.
pub struct MainService {
    endpoints: EndpointRepository,
    events: EventRepository,
}

impl MainService {
    pub fn new(data_access: Arc<DataAccess>) -> Self {
        Self {
            endpoints: EndpointRepository::new(data_access.clone()),
            events: EventRepository::new(data_access),
        }
    }
}

impl Service for MainService {
    fn startup(&self) -> Result<()> {
        let mut endpoints = self
            .endpoints
            .get_all()
            .context("loading endpoint inventory")?;

        if endpoints.is_empty() {
            let mut controller = Endpoint::new("controller", "local");
            self.endpoints
                .add(&mut controller)
                .context("registering controller endpoint")?;
            log::info!("registered controller endpoint '{}'", controller.name);
            endpoints.push(controller);
        }

        let now = unix_now();
        let cutoff = now - EVENT_RETENTION_SECS;
        let events = self.events.get_all().context("loading event log")?;
        let mut pruned = 0usize;
        for event in &events {
            if event.timestamp < cutoff {
                if let Some(id) = event.id {
                    self.events.remove(id).context("pruning expired event")?;
                    pruned += 1;
                }
            }
        }
        if pruned > 0 {
            log::info!("pruned {pruned} events past retention");
        }

        let controller_id = endpoints[0].id.unwrap_or_default();
        let mut started = Event::new(controller_id, now, "service_started", "{}");
        self.events
            .add(&mut started)
            .context("recording startup event")?;

        log::info!(
            "main service up: {} endpoints, {} events on record",
            endpoints.len(),
            events.len() - pruned + 1
        );
        Ok(())
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
