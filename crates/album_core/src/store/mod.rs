//! Album storage contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the physical `albums` table and its raw CRUD/filter queries.
//! - Keep SQL details behind the [`album_store::AlbumStore`] trait.
//!
//! # Invariants
//! - Store APIs surface typed errors; sentinel conversion happens one layer
//!   up in the repository.
//! - List results are always ordered by `id ASC`.

pub mod album_store;
