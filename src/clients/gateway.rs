use std::{future::Future, time::Duration};

use log::{debug, warn};
use serde_json::Value;

use crate::clients::{
    backend::MusicBackend,
    entities::{Album, Artist, Track},
    errors::{Error, Result},
    mapper,
};

/// Number of results a track search asks for.
pub const SEARCH_LIMIT: u32 = 10;
/// Number of albums fetched for a random pick.
pub const ALBUM_LIMIT: u32 = 30;
/// Remote calls taking longer than this fail with [`Error::Timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Record level access to the remote music service.
///
/// Every call is bounded by the configured timeout; no call is retried.
pub struct RemoteMusicGateway<B> {
    backend: B,
    timeout: Duration,
}

impl<B: MusicBackend> RemoteMusicGateway<B> {
    pub fn with_timeout(backend: B, timeout: Duration) -> Self {
        RemoteMusicGateway { backend, timeout }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        debug!("Searching tracks for {query:?}");
        let items = self
            .bounded(self.backend.search_tracks(query, SEARCH_LIMIT))
            .await?;
        items.iter().map(mapper::track).collect()
    }

    /// Best matching artist for `query`.
    pub async fn search_artist(&self, query: &str) -> Result<Artist> {
        debug!("Searching artist for {query:?}");
        let items = self.bounded(self.backend.search_artists(query, 1)).await?;
        let first = items
            .first()
            .ok_or_else(|| Error::NoResults(query.to_string()))?;
        mapper::artist(first)
    }

    pub async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Album>> {
        debug!("Fetching albums of artist {artist_id}");
        let items = self
            .bounded(self.backend.artist_albums(artist_id, ALBUM_LIMIT))
            .await?;
        items.iter().map(mapper::album).collect()
    }

    /// Raw track items of an album, still lacking album metadata.
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<Value>> {
        debug!("Fetching tracks of album {album_id}");
        self.bounded(self.backend.album_tracks(album_id)).await
    }

    pub async fn enqueue(&self, track_uri: &str) -> Result<()> {
        debug!("Queueing {track_uri}");
        self.bounded(self.backend.add_to_queue(track_uri)).await
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                warn!("Remote call exceeded {:?}", self.timeout);
                Error::Timeout
            })?
    }
}
