//! The registration conversation: a per chat state machine plus the
//! registrar that executes its side effects.

mod event;
mod gateway;
mod machine;
mod registrar;
mod state;
mod validate;

pub use event::{Command, Event, Inbound, Response};
pub use gateway::{DialogueStore, DownloadError, MediaGateway, PersistenceGateway, StorageError};
pub use registrar::Registrar;
pub use state::Session;
