use std::path::PathBuf;

use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::clients::{
    backend::MusicBackend,
    errors::{Error, Result},
};
use crate::config::Settings;
use rspotify::{
    AuthCodeSpotify, ClientError, Config, Credentials, OAuth,
    http::HttpError,
    model::{
        AlbumId, AlbumType, ArtistId, FullArtist, FullTrack, Id, Image, PlayableId, SearchResult,
        SearchType, SimplifiedAlbum, SimplifiedArtist, SimplifiedTrack, TrackId,
    },
    prelude::*,
    scopes,
};

const NO_ACTIVE_DEVICE: &str = "NO_ACTIVE_DEVICE";
const ALBUM_TRACK_LIMIT: u32 = 50;

// Body of a failed player request, e.g.
// {"error": {"status": 404, "message": "...", "reason": "NO_ACTIVE_DEVICE"}}
#[derive(Deserialize, Debug)]
struct PlayerErrorEnvelope {
    error: PlayerError,
}

#[derive(Deserialize, Debug)]
struct PlayerError {
    #[serde(default)]
    reason: Option<String>,
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    // Create a SpotifyClient from settings, caching tokens at the configured path
    pub fn from_settings(settings: &Settings) -> Self {
        let creds = Credentials::new(&settings.spotify_client_id, &settings.spotify_client_secret);
        let oauth = OAuth {
            redirect_uri: settings.spotify_redirect_uri.clone(),
            scopes: scopes!("user-read-playback-state", "user-modify-playback-state"),
            ..Default::default()
        };

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                token_refreshing: true,
                cache_path: settings.token_cache.clone(),
                ..Default::default()
            },
        );

        Self { spotify }
    }

    // Authorize the Spotify client via CLI prompt and OAuth flow.
    // The refresh token ends up in the token cache for the server to reuse.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        self.spotify.prompt_for_token(&url).await?;
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(())
    }

    // Load a previously authorized token without any prompt
    pub async fn load_cached_token(&self) -> Result<()> {
        let token = self.spotify.read_token_cache(true).await?.ok_or_else(|| {
            Error::Configuration(format!(
                "No Spotify token cached at {}. Run `jukelify authorize` first.",
                self.cache_path().display()
            ))
        })?;
        let expired = token.is_expired();
        *self
            .spotify
            .get_token()
            .lock()
            .await
            .map_err(|_| Error::Configuration("Spotify token is unavailable".into()))? = Some(token);

        if expired {
            debug!("Cached Spotify token expired, refreshing ...");
            self.spotify.refresh_token().await?;
        }
        Ok(())
    }

    fn cache_path(&self) -> &PathBuf {
        &self.spotify.config.cache_path
    }
}

impl MusicBackend for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Value>> {
        let result = self
            .spotify
            .search(query, SearchType::Track, None, None, Some(limit), None)
            .await
            .map_err(classify)?;
        match result {
            SearchResult::Tracks(page) => Ok(page.items.iter().map(full_track).collect()),
            other => Err(Error::Remote(format!(
                "track search returned {other:?}"
            ))),
        }
    }

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Value>> {
        let result = self
            .spotify
            .search(query, SearchType::Artist, None, None, Some(limit), None)
            .await
            .map_err(classify)?;
        match result {
            SearchResult::Artists(page) => Ok(page.items.iter().map(full_artist).collect()),
            other => Err(Error::Remote(format!(
                "artist search returned {other:?}"
            ))),
        }
    }

    async fn artist_albums(&self, artist_id: &str, limit: u32) -> Result<Vec<Value>> {
        let page = self
            .spotify
            .artist_albums_manual(
                ArtistId::from_id(artist_id)?,
                [AlbumType::Album, AlbumType::Single],
                None,
                Some(limit),
                None,
            )
            .await
            .map_err(classify)?;
        Ok(page.items.iter().map(simplified_album).collect())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Value>> {
        let page = self
            .spotify
            .album_track_manual(
                AlbumId::from_id(album_id)?,
                None,
                Some(ALBUM_TRACK_LIMIT),
                None,
            )
            .await
            .map_err(classify)?;
        Ok(page.items.iter().map(simplified_track).collect())
    }

    async fn add_to_queue(&self, track_uri: &str) -> Result<()> {
        let id = TrackId::from_uri(track_uri)
            .map_err(|e| Error::QueueRejected(format!("not a track uri {track_uri:?}: {e}")))?;
        match self
            .spotify
            .add_item_to_queue(PlayableId::Track(id), None)
            .await
        {
            Ok(()) => Ok(()),
            Err(err) => Err(queue_error(err).await),
        }
    }
}

// Timeouts are reported on their own so the user is asked to retry
fn classify(err: ClientError) -> Error {
    match err {
        ClientError::Http(http) => match *http {
            HttpError::Client(e) if e.is_timeout() => Error::Timeout,
            other => Error::Spotify(ClientError::Http(Box::new(other))),
        },
        other => Error::Spotify(other),
    }
}

async fn queue_error(err: ClientError) -> Error {
    let ClientError::Http(http) = err else {
        return Error::Spotify(err);
    };
    match *http {
        HttpError::StatusCode(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<PlayerErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error.reason);
            if reason.as_deref() == Some(NO_ACTIVE_DEVICE) {
                Error::NoActiveDevice
            } else {
                Error::QueueRejected(format!("{status} {body}"))
            }
        }
        HttpError::Client(e) if e.is_timeout() => Error::Timeout,
        HttpError::Client(e) => Error::QueueRejected(e.to_string()),
    }
}

// rspotify models drop the uri members and rename a few fields, so they are
// lowered back into the Web API item layout here.

fn images(images: &[Image]) -> Vec<Value> {
    images.iter().map(|image| json!({ "url": image.url })).collect()
}

fn artists(artists: &[SimplifiedArtist]) -> Vec<Value> {
    artists
        .iter()
        .map(|artist| json!({ "name": artist.name }))
        .collect()
}

fn simplified_album(album: &SimplifiedAlbum) -> Value {
    json!({
        "name": album.name,
        "id": album.id.as_ref().map(|id| id.id().to_string()),
        "uri": album.id.as_ref().map(|id| id.uri()),
        "album_type": album.album_type,
        "release_date": album.release_date,
        "images": images(&album.images),
    })
}

fn full_track(track: &FullTrack) -> Value {
    json!({
        "name": track.name,
        "uri": track.id.as_ref().map(|id| id.uri()),
        "artists": artists(&track.artists),
        "album": simplified_album(&track.album),
        "duration_ms": track.duration.num_milliseconds(),
    })
}

fn simplified_track(track: &SimplifiedTrack) -> Value {
    json!({
        "name": track.name,
        "uri": track.id.as_ref().map(|id| id.uri()),
        "artists": artists(&track.artists),
        "duration_ms": track.duration.num_milliseconds(),
    })
}

fn full_artist(artist: &FullArtist) -> Value {
    json!({
        "name": artist.name,
        "id": artist.id.id(),
        "uri": artist.id.uri(),
        "genres": artist.genres,
        "followers": { "total": artist.followers.total },
        "images": images(&artist.images),
    })
}
