//! Core domain logic for Giftbook.
//! This crate is the single source of truth for people, gift ideas and
//! their persisted snapshot.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, GiftbookConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::birthday::{Birthday, BirthdayParseError};
pub use model::draft::{IdeaDraft, PersonDraft, ValidationError};
pub use model::idea::{Idea, IdeaDimensions, IdeaId};
pub use model::person::{Person, PersonId};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use repo::snapshot::{decode_snapshot, encode_snapshot, SnapshotError, PEOPLE_SNAPSHOT_KEY};
pub use repo::writer::BackgroundWriter;
pub use service::observer::{StoreEvent, SubscriptionId};
pub use service::people_store::{sort_by_birthday, Mutation, PeopleStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
