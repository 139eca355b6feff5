//! Album record and input validation.
//!
//! # Responsibility
//! - Define the canonical `{id, artist, name}` record.
//! - Validate caller input before it reaches storage.
//!
//! # Invariants
//! - `id` is assigned by SQLite on insert and never changes afterwards.
//! - `artist` and `name` are never empty once validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row identifier assigned by the `AUTOINCREMENT` primary key.
pub type AlbumId = i64;

/// Validation failures for album input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumValidationError {
    BlankArtist,
    BlankName,
}

impl Display for AlbumValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankArtist => write!(f, "artist cannot be blank"),
            Self::BlankName => write!(f, "album name cannot be blank"),
        }
    }
}

impl Error for AlbumValidationError {}

/// Persisted album record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub artist: String,
    /// Album title.
    pub name: String,
}

impl Album {
    pub fn new(id: AlbumId, artist: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            artist: artist.into(),
            name: name.into(),
        }
    }

    /// Checks that both text fields carry non-whitespace content.
    pub fn validate(&self) -> Result<(), AlbumValidationError> {
        validate_fields(&self.artist, &self.name)
    }
}

impl Display for Album {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}", self.id, self.artist, self.name)
    }
}

/// Validated input for creating a new album.
///
/// Construction trims surrounding whitespace, so a draft never holds blank
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDraft {
    artist: String,
    name: String,
}

impl AlbumDraft {
    pub fn new(
        artist: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, AlbumValidationError> {
        let artist = artist.into().trim().to_string();
        let name = name.into().trim().to_string();
        validate_fields(&artist, &name)?;
        Ok(Self { artist, name })
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attaches a persisted id, producing the stored record shape.
    pub fn into_album(self, id: AlbumId) -> Album {
        Album {
            id,
            artist: self.artist,
            name: self.name,
        }
    }
}

fn validate_fields(artist: &str, name: &str) -> Result<(), AlbumValidationError> {
    if artist.trim().is_empty() {
        return Err(AlbumValidationError::BlankArtist);
    }
    if name.trim().is_empty() {
        return Err(AlbumValidationError::BlankName);
    }
    Ok(())
}
