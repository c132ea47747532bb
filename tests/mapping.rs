mod common;

use common::{fixture, items};
use jukelify::clients::mapper;

#[test]
fn maps_every_search_track_in_order() {
    let data = fixture("tracks.json");
    let tracks = items(&data["tracks"]["items"])
        .iter()
        .map(mapper::track)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(tracks.len(), 10);
    assert_eq!(tracks[0].name, "Billie Jean");
    assert_eq!(tracks[9].name, "Scream");
    assert_eq!(tracks[9].artists, "Michael Jackson, Janet Jackson");
    assert_eq!(tracks[9].album, "HIStory -...");
    assert_eq!(tracks[2].album, "Bad (Rema...");
    assert_eq!(tracks[0].album, "Thriller");
    assert_eq!(tracks[0].duration(), "4:53");
    assert!(tracks[0].img.ends_with("b2732anvost0"));
}

#[test]
fn maps_every_artist() {
    let data = fixture("artist.json");
    let artists = items(&data["artists"]["items"])
        .iter()
        .map(mapper::artist)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(artists.len(), 10);
    assert_eq!(artists[0].name, "Michael Jackson");
    assert_eq!(artists[0].genres, "pop, r&b, soul");
    assert_eq!(artists[0].followers, 31_000_000);
    // Joe Jackson has neither genres nor images
    assert_eq!(artists[5].genres, "");
    assert_eq!(artists[5].img, "");
}

#[test]
fn maps_album_listing() {
    let data = fixture("album.json");
    let albums = items(&data["items"])
        .iter()
        .map(mapper::album)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].name, "Thriller");
    assert_eq!(albums[0].id, "2ANVost0y2y52ema1E9xAZ");
    assert_eq!(albums[0].album_type, "album");
    assert_eq!(albums[0].uri, "spotify:album:2ANVost0y2y52ema1E9xAZ");
    assert_eq!(albums[0].release_date, "1982-11-30");
}
