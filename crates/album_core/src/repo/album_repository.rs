//! Album repository façade over [`AlbumStore`].
//!
//! # Responsibility
//! - Expose the add/get/update/delete/search use-cases to UI and provider
//!   callers.
//! - Log intent before and outcome after every store call.
//! - Publish one zero-payload change event per effective mutation.
//!
//! # Invariants
//! - Every call reaches the store synchronously; nothing is cached.
//! - A notification is published only when at least one row changed.

use crate::model::album::{Album, AlbumId};
use crate::notify::{ChangeNotifier, MutationContext, Subscription};
use crate::store::album_store::{AlbumStore, StoreResult};
use log::{debug, error, info};

/// Logical resource identifier for the albums table.
pub const ALBUMS_RESOURCE_URI: &str = "content://com.example.albummanager.provider/albums";

/// Repository wrapper owning one store and a notifier handle.
pub struct AlbumRepository<S: AlbumStore> {
    store: S,
    notifier: ChangeNotifier,
}

impl<S: AlbumStore> AlbumRepository<S> {
    /// Creates a repository with its own private notifier.
    pub fn new(store: S) -> Self {
        Self::with_notifier(store, ChangeNotifier::new())
    }

    /// Creates a repository publishing on a shared notifier.
    pub fn with_notifier(store: S, notifier: ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Subscribes to changes of the albums resource.
    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe(ALBUMS_RESOURCE_URI)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds one album. Returns `None` when the insert failed.
    pub fn add_album(&self, artist: &str, name: &str) -> Option<AlbumId> {
        self.add_album_in(&MutationContext::default(), artist, name)
    }

    pub fn add_album_in(
        &self,
        context: &MutationContext,
        artist: &str,
        name: &str,
    ) -> Option<AlbumId> {
        debug!("event=album_add module=repo status=start artist={artist:?} name={name:?}");
        match self.store.insert(artist, name) {
            Ok(id) => {
                info!("event=album_add module=repo status=ok id={id}");
                self.publish(context);
                Some(id)
            }
            Err(err) => {
                error!(
                    "event=album_add module=repo status=error error_code=insert_failed error={err}"
                );
                None
            }
        }
    }

    /// Lists all albums ordered by id; empty on failure.
    pub fn get_all_albums(&self) -> Vec<Album> {
        debug!("event=album_list module=repo status=start");
        self.list_or_empty("album_list", self.store.query_all())
    }

    /// Point lookup; store failures are logged and reported as absent.
    pub fn get_album_by_id(&self, id: AlbumId) -> Option<Album> {
        debug!("event=album_get module=repo status=start id={id}");
        match self.store.query_by_id(id) {
            Ok(found) => {
                debug!(
                    "event=album_get module=repo status=ok id={id} found={}",
                    found.is_some()
                );
                found
            }
            Err(err) => {
                error!(
                    "event=album_get module=repo status=error id={id} error_code=query_failed error={err}"
                );
                None
            }
        }
    }

    /// Overwrites artist/name of `album.id`. Returns whether a row changed.
    pub fn update_album(&self, album: &Album) -> bool {
        self.update_album_in(&MutationContext::default(), album)
    }

    pub fn update_album_in(&self, context: &MutationContext, album: &Album) -> bool {
        debug!(
            "event=album_update module=repo status=start id={} artist={:?} name={:?}",
            album.id, album.artist, album.name
        );
        let result = self.store.update(album.id, &album.artist, &album.name);
        self.finish_mutation("album_update", album.id, context, result)
    }

    /// Deletes one album by id. Returns whether a row was removed.
    pub fn delete_album(&self, id: AlbumId) -> bool {
        self.delete_album_in(&MutationContext::default(), id)
    }

    pub fn delete_album_in(&self, context: &MutationContext, id: AlbumId) -> bool {
        debug!("event=album_delete module=repo status=start id={id}");
        let result = self.store.delete(id);
        self.finish_mutation("album_delete", id, context, result)
    }

    /// Albums whose artist contains `pattern`.
    pub fn search_by_artist(&self, pattern: &str) -> Vec<Album> {
        debug!("event=album_search module=repo status=start field=artist pattern={pattern:?}");
        self.list_or_empty(
            "album_search_artist",
            self.store.query_by_artist_substring(pattern),
        )
    }

    /// Albums whose name contains `pattern`.
    pub fn search_by_name(&self, pattern: &str) -> Vec<Album> {
        debug!("event=album_search module=repo status=start field=name pattern={pattern:?}");
        self.list_or_empty(
            "album_search_name",
            self.store.query_by_name_substring(pattern),
        )
    }

    fn finish_mutation(
        &self,
        event: &str,
        id: AlbumId,
        context: &MutationContext,
        result: StoreResult<usize>,
    ) -> bool {
        match result {
            Ok(0) => {
                info!("event={event} module=repo status=ok id={id} affected=0");
                false
            }
            Ok(affected) => {
                info!("event={event} module=repo status=ok id={id} affected={affected}");
                self.publish(context);
                true
            }
            Err(err) => {
                error!(
                    "event={event} module=repo status=error id={id} error_code=write_failed error={err}"
                );
                false
            }
        }
    }

    fn list_or_empty(&self, event: &str, result: StoreResult<Vec<Album>>) -> Vec<Album> {
        match result {
            Ok(albums) => {
                debug!("event={event} module=repo status=ok count={}", albums.len());
                albums
            }
            Err(err) => {
                error!("event={event} module=repo status=error error_code=query_failed error={err}");
                Vec::new()
            }
        }
    }

    fn publish(&self, context: &MutationContext) {
        self.notifier
            .notify_change(ALBUMS_RESOURCE_URI, context.origin());
    }
}
