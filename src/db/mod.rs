// Data access handle, generic repository mechanics, and the per-entity
// repositories built on them.
mod endpoints;
mod error;
mod events;
mod handle;
mod repository;

pub use endpoints::EndpointRepository;
pub use error::{DbError, DbResult};
pub use events::EventRepository;
pub use handle::DataAccess;
pub use repository::{Record, Repository};

pub(crate) use handle::SCHEMA_VERSION;
