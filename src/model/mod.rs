mod endpoint;
mod event;

pub use endpoint::Endpoint;
pub use event::Event;
