//! URI-addressed album resource for out-of-component callers.
//!
//! # Responsibility
//! - Map query/insert/update/delete verbs on resource URIs onto the album
//!   repository.
//! - Expose observer registration keyed on the resource URI.
//!
//! # Invariants
//! - Every mutation goes through [`AlbumRepository`], so logging and
//!   notification rules are identical to direct callers.
//! - Update/delete are addressed by a single id; bulk selections are
//!   rejected.

pub mod uri;

use crate::model::album::{Album, AlbumDraft, AlbumId, AlbumValidationError};
use crate::notify::{MutationContext, Subscription};
use crate::repo::album_repository::AlbumRepository;
use crate::store::album_store::AlbumStore;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uri::ResourceUri;

/// MIME type reported for the albums directory.
pub const ALBUMS_DIR_TYPE: &str = "vnd.android.cursor.dir/albums";
/// MIME type reported for one album row.
pub const ALBUMS_ITEM_TYPE: &str = "vnd.android.cursor.item/albums";

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    UnsupportedUri(String),
    UnsupportedSelection(&'static str),
    Validation(AlbumValidationError),
    InsertFailed(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedUri(uri) => write!(f, "unsupported uri: {uri}"),
            Self::UnsupportedSelection(verb) => {
                write!(f, "{verb} requires a row uri or an id selection")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::InsertFailed(uri) => write!(f, "failed to add a record into {uri}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AlbumValidationError> for ProviderError {
    fn from(value: AlbumValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Row filter accepted by provider verbs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    ById(AlbumId),
    ArtistContains(String),
    NameContains(String),
}

/// Column values for insert/update. Absent fields keep their stored value on
/// update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumValues {
    pub artist: Option<String>,
    pub name: Option<String>,
}

impl AlbumValues {
    pub fn new(artist: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artist: Some(artist.into()),
            name: Some(name.into()),
        }
    }
}

/// Provider front over one album repository.
pub struct AlbumProvider<S: AlbumStore> {
    repo: AlbumRepository<S>,
}

impl<S: AlbumStore> AlbumProvider<S> {
    pub fn new(repo: AlbumRepository<S>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &AlbumRepository<S> {
        &self.repo
    }

    /// Returns the MIME type for `uri`.
    pub fn get_type(&self, uri: &str) -> ProviderResult<&'static str> {
        match parse_uri(uri)? {
            ResourceUri::Albums => Ok(ALBUMS_DIR_TYPE),
            ResourceUri::Album(_) => Ok(ALBUMS_ITEM_TYPE),
        }
    }

    /// Reads rows addressed by `uri` and `selection`, ordered by id.
    ///
    /// A row URI overrides `selection`.
    pub fn query(&self, uri: &str, selection: Selection) -> ProviderResult<Vec<Album>> {
        let target = parse_uri(uri)?;
        debug!("event=provider_query module=provider status=start uri={target}");
        let selection = match target {
            ResourceUri::Album(id) => Selection::ById(id),
            ResourceUri::Albums => selection,
        };

        let albums = match selection {
            Selection::All => self.repo.get_all_albums(),
            Selection::ById(id) => self.repo.get_album_by_id(id).into_iter().collect(),
            Selection::ArtistContains(pattern) => self.repo.search_by_artist(&pattern),
            Selection::NameContains(pattern) => self.repo.search_by_name(&pattern),
        };
        debug!(
            "event=provider_query module=provider status=ok uri={target} count={}",
            albums.len()
        );
        Ok(albums)
    }

    /// Inserts a row and returns its row URI.
    pub fn insert(&self, uri: &str, values: AlbumValues) -> ProviderResult<ResourceUri> {
        self.insert_in(&MutationContext::default(), uri, values)
    }

    pub fn insert_in(
        &self,
        context: &MutationContext,
        uri: &str,
        values: AlbumValues,
    ) -> ProviderResult<ResourceUri> {
        let target = parse_uri(uri)?;
        let draft = AlbumDraft::new(
            values.artist.unwrap_or_default(),
            values.name.unwrap_or_default(),
        )?;

        match self
            .repo
            .add_album_in(context, draft.artist(), draft.name())
        {
            Some(id) => Ok(ResourceUri::Album(id)),
            None => {
                warn!("event=provider_insert module=provider status=error uri={target}");
                Err(ProviderError::InsertFailed(target.to_string()))
            }
        }
    }

    /// Updates one row; returns the number of rows changed.
    pub fn update(
        &self,
        uri: &str,
        selection: Selection,
        values: AlbumValues,
    ) -> ProviderResult<usize> {
        self.update_in(&MutationContext::default(), uri, selection, values)
    }

    pub fn update_in(
        &self,
        context: &MutationContext,
        uri: &str,
        selection: Selection,
        values: AlbumValues,
    ) -> ProviderResult<usize> {
        let id = single_target(parse_uri(uri)?, selection, "update")?;
        let Some(mut album) = self.repo.get_album_by_id(id) else {
            return Ok(0);
        };
        if let Some(artist) = values.artist {
            album.artist = artist.trim().to_string();
        }
        if let Some(name) = values.name {
            album.name = name.trim().to_string();
        }
        album.validate()?;

        Ok(usize::from(self.repo.update_album_in(context, &album)))
    }

    /// Deletes one row; returns the number of rows removed.
    pub fn delete(&self, uri: &str, selection: Selection) -> ProviderResult<usize> {
        self.delete_in(&MutationContext::default(), uri, selection)
    }

    pub fn delete_in(
        &self,
        context: &MutationContext,
        uri: &str,
        selection: Selection,
    ) -> ProviderResult<usize> {
        let id = single_target(parse_uri(uri)?, selection, "delete")?;
        Ok(usize::from(self.repo.delete_album_in(context, id)))
    }

    /// Registers an observer for the resource behind `uri`.
    ///
    /// Row URIs observe the whole table; notifications are resource-wide.
    pub fn register_observer(&self, uri: &str) -> ProviderResult<Subscription> {
        let target = parse_uri(uri)?;
        Ok(self.repo.notifier().subscribe(target.notification_uri()))
    }
}

fn parse_uri(uri: &str) -> ProviderResult<ResourceUri> {
    ResourceUri::parse(uri).ok_or_else(|| ProviderError::UnsupportedUri(uri.to_string()))
}

fn single_target(
    target: ResourceUri,
    selection: Selection,
    verb: &'static str,
) -> ProviderResult<AlbumId> {
    match (target, selection) {
        (ResourceUri::Album(id), _) => Ok(id),
        (ResourceUri::Albums, Selection::ById(id)) => Ok(id),
        (ResourceUri::Albums, _) => Err(ProviderError::UnsupportedSelection(verb)),
    }
}
