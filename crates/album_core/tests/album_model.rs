use album_core::{Album, AlbumDraft, AlbumValidationError};

#[test]
fn album_serialization_uses_expected_wire_fields() {
    let album = Album::new(7, "Queen", "Jazz");

    let json = serde_json::to_value(&album).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["artist"], "Queen");
    assert_eq!(json["name"], "Jazz");

    let decoded: Album = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, album);
}

#[test]
fn draft_becomes_album_with_assigned_id() {
    let album = AlbumDraft::new(" Queen ", "Jazz").unwrap().into_album(3);
    assert_eq!(album, Album::new(3, "Queen", "Jazz"));
    assert_eq!(album.validate(), Ok(()));
}

#[test]
fn draft_rejects_whitespace_only_fields() {
    assert_eq!(
        AlbumDraft::new("\t", "Jazz").unwrap_err(),
        AlbumValidationError::BlankArtist
    );
}
