//! Album domain model.
//!
//! # Responsibility
//! - Define the single persisted record shared by store, repository and
//!   provider layers.
//!
//! # Invariants
//! - Every album is identified by a datastore-assigned `AlbumId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod album;
