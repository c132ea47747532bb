use futures::{StreamExt, TryStreamExt, stream};
use log::{debug, info};
use rand::Rng;

use crate::clients::{
    backend::MusicBackend,
    entities::{Album, Track},
    errors::{Error, Result},
    gateway::RemoteMusicGateway,
    mapper,
};

/// Picks a random track from everything an artist released and queues it.
pub struct RandomTrackSelector<'a, B> {
    gateway: &'a RemoteMusicGateway<B>,
}

impl<'a, B: MusicBackend> RandomTrackSelector<'a, B> {
    pub fn new(gateway: &'a RemoteMusicGateway<B>) -> Self {
        RandomTrackSelector { gateway }
    }

    /// Resolve `artist_name`, gather the tracks of all its albums and queue
    /// one of them drawn uniformly. Returns the queued track.
    pub async fn queue_random(&self, artist_name: &str) -> Result<Track> {
        let mut pool = self.track_pool(artist_name).await?;
        if pool.is_empty() {
            return Err(Error::NoResults(artist_name.to_string()));
        }

        let index = rand::rng().random_range(0..pool.len());
        let track = pool.swap_remove(index);
        info!("Picked {:?} ({}) for {artist_name:?}", track.name, track.uri);

        self.gateway.enqueue(&track.uri).await?;
        Ok(track)
    }

    /// Every track reachable from the best matching artist.
    ///
    /// Albums are visited last listed first. The visiting order does not
    /// affect the draw since the whole pool is collected before picking.
    pub async fn track_pool(&self, artist_name: &str) -> Result<Vec<Track>> {
        let artist = self.gateway.search_artist(artist_name).await?;
        debug!("Resolved {artist_name:?} to {} ({})", artist.name, artist.id);

        let albums = self.gateway.artist_albums(&artist.id).await?;
        debug!("{} has {} albums", artist.name, albums.len());

        let per_album: Vec<Vec<Track>> = stream::iter(albums.iter().rev())
            .then(|album| self.album_pool(album))
            .try_collect()
            .await?;

        Ok(per_album.into_iter().flatten().collect())
    }

    async fn album_pool(&self, album: &Album) -> Result<Vec<Track>> {
        self.gateway
            .album_tracks(&album.id)
            .await?
            .into_iter()
            .map(|item| mapper::track(&mapper::with_album(item, album)))
            .collect()
    }
}
