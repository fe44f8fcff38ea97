use crate::db::DataAccess;
use crate::service::Service;

/// Progress of the one-shot startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    NotStarted,
    SchemaReady,
    ServicesRunning,
    StartupFailed,
}

impl StartupState {
    pub fn as_str(self) -> &'static str {
        match self {
            StartupState::NotStarted => "not_started",
            StartupState::SchemaReady => "schema_ready",
            StartupState::ServicesRunning => "services_running",
            StartupState::StartupFailed => "startup_failed",
        }
    }
}

/// Sequences schema migration, then service startup. A failure in either step
/// is logged and recorded as `StartupFailed`; it never escapes this boundary,
/// so the host stays up for diagnostics with business functionality degraded.
pub struct Orchestrator {
    state: StartupState,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            state: StartupState::NotStarted,
        }
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    pub fn run<S: Service>(&mut self, data_access: &DataAccess, service: &S) -> StartupState {
        if let Err(err) = data_access.update_schema() {
            log::error!("schema migration failed, services will not start: {err}");
            self.state = StartupState::StartupFailed;
            return self.state;
        }
        self.state = StartupState::SchemaReady;
        log::info!("schema is current");

        // Migration is not reversible; the schema stays current even if the
        // service fails here.
        if let Err(err) = service.startup() {
            log::error!("main service startup failed: {err:#}");
            self.state = StartupState::StartupFailed;
            return self.state;
        }
        self.state = StartupState::ServicesRunning;
        self.state
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
