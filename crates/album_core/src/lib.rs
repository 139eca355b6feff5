//! Core album storage for the album manager.
//! This crate owns the `albums` table, the caller-facing repository and the
//! change notifications published after every effective write.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod provider;
pub mod repo;
pub mod store;

pub use config::{AlbumConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::album::{Album, AlbumDraft, AlbumId, AlbumValidationError};
pub use notify::{ChangeEvent, ChangeNotifier, MutationContext, OriginToken, Subscription};
pub use provider::uri::ResourceUri;
pub use provider::{AlbumProvider, AlbumValues, ProviderError, ProviderResult, Selection};
pub use repo::album_repository::{AlbumRepository, ALBUMS_RESOURCE_URI};
pub use store::album_store::{AlbumStore, SqliteAlbumStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
