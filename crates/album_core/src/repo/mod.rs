//! Caller-facing album repository.
//!
//! # Responsibility
//! - Wrap one album store with structured logging.
//! - Convert store errors into sentinel/boolean/empty results.
//! - Publish a change notification after every effective mutation.
//!
//! # Invariants
//! - Raw storage errors never escape this layer.
//! - Zero-row mutations and failed writes publish nothing.

pub mod album_repository;
