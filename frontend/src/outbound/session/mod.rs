//! Session store adapters.
//!
//! Provides the file-backed implementation of the `SessionRepository` port.

mod dto;
mod local_storage_repository;

pub use local_storage_repository::{LocalStorageSessionRepository, SESSION_STORAGE_KEY};
