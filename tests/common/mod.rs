#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use jukelify::{
    Jukebox,
    clients::{
        MusicBackend,
        errors::{Error, Result},
    },
    jukebox::ConfigBuilder,
};
use serde_json::{Value, json};

pub fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    let content = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

pub fn items(value: &Value) -> Vec<Value> {
    value.as_array().cloned().unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SearchTracks(String, u32),
    SearchArtists(String, u32),
    ArtistAlbums(String, u32),
    AlbumTracks(String),
    AddToQueue(String),
}

#[derive(Debug, Clone, Copy)]
pub enum QueueFailure {
    NoActiveDevice,
    Rejected,
}

/// Scripted music backend recording every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    pub tracks: Vec<Value>,
    pub artists: Vec<Value>,
    pub albums: Vec<Value>,
    pub album_tracks: HashMap<String, Vec<Value>>,
    pub queue_failure: Option<QueueFailure>,
    pub search_delay: Option<Duration>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queued(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddToQueue(uri) => Some(uri),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MusicBackend for FakeBackend {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Value>> {
        self.record(Call::SearchTracks(query.to_string(), limit));
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.tracks.clone())
    }

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Value>> {
        self.record(Call::SearchArtists(query.to_string(), limit));
        Ok(self.artists.iter().take(limit as usize).cloned().collect())
    }

    async fn artist_albums(&self, artist_id: &str, limit: u32) -> Result<Vec<Value>> {
        self.record(Call::ArtistAlbums(artist_id.to_string(), limit));
        Ok(self.albums.clone())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Value>> {
        self.record(Call::AlbumTracks(album_id.to_string()));
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn add_to_queue(&self, track_uri: &str) -> Result<()> {
        self.record(Call::AddToQueue(track_uri.to_string()));
        match self.queue_failure {
            None => Ok(()),
            Some(QueueFailure::NoActiveDevice) => Err(Error::NoActiveDevice),
            Some(QueueFailure::Rejected) => Err(Error::QueueRejected("403 Forbidden".into())),
        }
    }
}

pub fn jukebox(backend: FakeBackend) -> Jukebox<FakeBackend> {
    jukebox_with_timeout(backend, Duration::from_secs(5))
}

pub fn jukebox_with_timeout(backend: FakeBackend, timeout: Duration) -> Jukebox<FakeBackend> {
    let config = ConfigBuilder::new()
        .backend(backend)
        .timeout(timeout)
        .build()
        .unwrap();
    Jukebox::new(config)
}

pub fn artist_item(name: &str, id: &str) -> Value {
    json!({
        "name": name,
        "id": id,
        "uri": format!("spotify:artist:{id}"),
        "genres": [],
        "followers": { "total": 1 },
        "images": []
    })
}

pub fn album_item(name: &str, id: &str) -> Value {
    json!({
        "name": name,
        "id": id,
        "uri": format!("spotify:album:{id}"),
        "album_type": "album",
        "release_date": "2001-01-01",
        "images": [{ "url": format!("https://i.scdn.co/image/{id}") }]
    })
}

pub fn album_track_item(name: &str, id: &str) -> Value {
    json!({
        "name": name,
        "uri": format!("spotify:track:{id}"),
        "duration_ms": 200_000,
        "artists": [{ "name": "伍佰" }]
    })
}
