//! Resource URI parsing for the album provider.
//!
//! # Invariants
//! - Only `content://<authority>/albums` and `.../albums/<id>` are accepted.
//! - A row URI always carries a positive integer id.

use crate::model::album::AlbumId;
use crate::repo::album_repository::ALBUMS_RESOURCE_URI;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Authority that owns the albums resource.
pub const PROVIDER_AUTHORITY: &str = "com.example.albummanager.provider";

static ALBUMS_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^content://com\.example\.albummanager\.provider/albums(?:/([0-9]+))?/?$")
        .expect("valid albums uri regex")
});

/// Parsed albums resource address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUri {
    /// Whole table.
    Albums,
    /// Single row.
    Album(AlbumId),
}

impl ResourceUri {
    /// Parses a URI string, returning `None` for anything outside the
    /// albums resource.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = ALBUMS_URI_RE.captures(value.trim())?;
        match caps.get(1) {
            None => Some(Self::Albums),
            Some(id) => id
                .as_str()
                .parse::<AlbumId>()
                .ok()
                .filter(|id| *id > 0)
                .map(Self::Album),
        }
    }

    /// Directory URI that change notifications are published on.
    pub fn notification_uri(&self) -> &'static str {
        ALBUMS_RESOURCE_URI
    }

    pub fn album_id(&self) -> Option<AlbumId> {
        match self {
            Self::Albums => None,
            Self::Album(id) => Some(*id),
        }
    }
}

impl Display for ResourceUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Albums => write!(f, "{ALBUMS_RESOURCE_URI}"),
            Self::Album(id) => write!(f, "{ALBUMS_RESOURCE_URI}/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResourceUri, PROVIDER_AUTHORITY};

    #[test]
    fn parses_directory_and_row_forms() {
        assert_eq!(
            ResourceUri::parse("content://com.example.albummanager.provider/albums"),
            Some(ResourceUri::Albums)
        );
        assert_eq!(
            ResourceUri::parse("content://com.example.albummanager.provider/albums/42"),
            Some(ResourceUri::Album(42))
        );
        assert_eq!(
            ResourceUri::parse(" content://com.example.albummanager.provider/albums/ "),
            Some(ResourceUri::Albums)
        );
    }

    #[test]
    fn rejects_foreign_authority_paths_and_bad_ids() {
        assert_eq!(ResourceUri::parse("content://com.demo.user.provider/users"), None);
        assert_eq!(
            ResourceUri::parse("content://com.example.albummanager.provider/songs"),
            None
        );
        assert_eq!(
            ResourceUri::parse("content://com.example.albummanager.provider/albums/abc"),
            None
        );
        assert_eq!(
            ResourceUri::parse("content://com.example.albummanager.provider/albums/0"),
            None
        );
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let row = ResourceUri::Album(7);
        let text = row.to_string();
        assert!(text.contains(PROVIDER_AUTHORITY));
        assert_eq!(ResourceUri::parse(&text), Some(row));
    }
}
