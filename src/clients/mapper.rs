//! Conversion of raw Web API fragments into [`Track`], [`Artist`] and
//! [`Album`] records.
//!
//! Fragments are taken as untyped JSON because the remote service is not
//! consistent about value types (ids may arrive as numbers) or about the
//! presence of optional data such as images and genres. Missing optional
//! data maps to an empty value; a missing name, uri or id is reported as
//! [`Error::Mapping`].

use serde_json::{Value, json};

use crate::clients::{
    entities::{Album, Artist, Track},
    errors::{Error, Result},
};

const TRACK: &str = "track";
const ARTIST: &str = "artist";
const ALBUM: &str = "album";

/// Map a track item from a search result or from an album listing whose
/// `album` member has been filled in with [`with_album`].
pub fn track(fragment: &Value) -> Result<Track> {
    let album = &fragment["album"];
    let duration_ms = non_negative(&fragment["duration_ms"]).ok_or(Error::Mapping {
        entity: TRACK,
        field: "duration_ms",
    })?;

    Ok(Track::new(
        required(fragment, TRACK, "name")?,
        required(fragment, TRACK, "uri")?,
        joined_names(&fragment["artists"]),
        first_image(album),
        optional(album, "release_date"),
        &optional(album, "name"),
        duration_ms,
    ))
}

pub fn artist(fragment: &Value) -> Result<Artist> {
    Ok(Artist {
        name: required(fragment, ARTIST, "name")?,
        id: required(fragment, ARTIST, "id")?,
        genres: joined_strings(&fragment["genres"]),
        followers: non_negative(&fragment["followers"]["total"]).unwrap_or_default(),
        img: first_image(fragment),
        uri: required(fragment, ARTIST, "uri")?,
    })
}

pub fn album(fragment: &Value) -> Result<Album> {
    Ok(Album {
        name: required(fragment, ALBUM, "name")?,
        id: required(fragment, ALBUM, "id")?,
        img: first_image(fragment),
        album_type: optional(fragment, "album_type"),
        uri: required(fragment, ALBUM, "uri")?,
        release_date: optional(fragment, "release_date"),
    })
}

/// Album listings return tracks without album data; copy the album's name,
/// cover and release date into the track item so [`track`] can map it.
pub fn with_album(mut fragment: Value, album: &Album) -> Value {
    if let Value::Object(map) = &mut fragment {
        map.insert(
            "album".to_string(),
            json!({
                "name": album.name,
                "images": [{ "url": album.img }],
                "release_date": album.release_date,
            }),
        );
    }
    fragment
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required(fragment: &Value, entity: &'static str, field: &'static str) -> Result<String> {
    text(&fragment[field]).ok_or(Error::Mapping { entity, field })
}

fn optional(fragment: &Value, field: &str) -> String {
    text(&fragment[field]).unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn non_negative(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn first_image(fragment: &Value) -> String {
    text(&fragment["images"][0]["url"]).unwrap_or_default()
}

fn joined_names(list: &Value) -> String {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| text(&item["name"]))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn joined_strings(list: &Value) -> String {
    list.as_array()
        .map(|items| items.iter().filter_map(text).collect::<Vec<_>>().join(", "))
        .unwrap_or_default()
}
