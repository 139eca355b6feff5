use album_core::{
    Album, AlbumRepository, ChangeNotifier, MutationContext, OriginToken, SqliteAlbumStore,
    ALBUMS_RESOURCE_URI,
};

fn repository() -> AlbumRepository<SqliteAlbumStore> {
    AlbumRepository::new(SqliteAlbumStore::open_in_memory().unwrap())
}

#[test]
fn end_to_end_add_list_search_delete() {
    let repo = repository();

    assert_eq!(repo.add_album("Pink Floyd", "The Wall"), Some(1));
    assert_eq!(repo.add_album("Queen", "A Night at the Opera"), Some(2));
    assert_eq!(
        repo.get_all_albums(),
        vec![
            Album::new(1, "Pink Floyd", "The Wall"),
            Album::new(2, "Queen", "A Night at the Opera"),
        ]
    );
    assert_eq!(
        repo.search_by_name("Wall"),
        vec![Album::new(1, "Pink Floyd", "The Wall")]
    );

    assert!(repo.delete_album(1));
    assert_eq!(
        repo.get_all_albums(),
        vec![Album::new(2, "Queen", "A Night at the Opera")]
    );
}

#[test]
fn search_by_artist_returns_stored_rows() {
    let repo = repository();
    repo.add_album("The Beatles", "Abbey Road").unwrap();
    repo.add_album("Queen", "Jazz").unwrap();

    let hits = repo.search_by_artist("eat");
    assert_eq!(hits, vec![Album::new(1, "The Beatles", "Abbey Road")]);
    assert!(repo.search_by_artist("Floyd").is_empty());
}

#[test]
fn update_and_get_reflect_new_fields() {
    let repo = repository();
    let id = repo.add_album("Queen", "Jazz").unwrap();

    assert!(repo.update_album(&Album::new(id, "Queen", "The Game")));
    assert_eq!(repo.get_album_by_id(id), Some(Album::new(id, "Queen", "The Game")));

    assert!(!repo.update_album(&Album::new(id + 1, "Nobody", "Nothing")));
    assert_eq!(repo.get_all_albums().len(), 1);
    assert_eq!(repo.get_album_by_id(id + 1), None);
}

#[test]
fn each_effective_mutation_notifies_exactly_once() {
    let repo = repository();
    let subscription = repo.subscribe();

    let id = repo.add_album("Queen", "Jazz").unwrap();
    assert_eq!(subscription.drain().len(), 1);

    assert!(repo.update_album(&Album::new(id, "Queen", "Innuendo")));
    assert_eq!(subscription.drain().len(), 1);

    assert!(repo.delete_album(id));
    let events = subscription.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].uri, ALBUMS_RESOURCE_URI);
}

#[test]
fn zero_row_mutations_and_reads_do_not_notify() {
    let repo = repository();
    let subscription = repo.subscribe();

    assert!(!repo.update_album(&Album::new(42, "Nobody", "Nothing")));
    assert!(!repo.delete_album(42));
    repo.get_all_albums();
    repo.get_album_by_id(42);
    repo.search_by_name("x");

    assert!(subscription.drain().is_empty());
}

#[test]
fn subscriber_can_ignore_its_own_changes() {
    let notifier = ChangeNotifier::new();
    let repo = AlbumRepository::with_notifier(
        SqliteAlbumStore::open_in_memory().unwrap(),
        notifier.clone(),
    );
    let subscription = notifier.subscribe(ALBUMS_RESOURCE_URI);
    let me = OriginToken::new();

    repo.add_album_in(&MutationContext::with_origin(me), "Queen", "Jazz")
        .unwrap();
    repo.add_album("Pink Floyd", "Animals").unwrap();

    let external: Vec<_> = subscription
        .drain()
        .into_iter()
        .filter(|event| !event.is_from(&me))
        .collect();
    assert_eq!(external.len(), 1);
    assert_eq!(external[0].origin, None);
}
