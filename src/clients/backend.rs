use std::future::Future;

use serde_json::Value;

use crate::clients::errors::Result;

/// Raw capabilities of a music streaming service.
///
/// Implementations return Web API shaped JSON items; mapping them into
/// records is left to [`crate::clients::gateway::RemoteMusicGateway`], so a
/// backend only has to speak the wire format. Tests substitute a scripted
/// implementation.
pub trait MusicBackend: Send + Sync {
    /// Track items matching `query`, best match first.
    fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;

    /// Artist items matching `query`, best match first.
    fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;

    /// Album items of an artist, restricted to full-length albums and singles.
    fn artist_albums(
        &self,
        artist_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;

    /// Track items of an album. These carry no `album` member.
    fn album_tracks(&self, album_id: &str) -> impl Future<Output = Result<Vec<Value>>> + Send;

    /// Append a track to the active playback queue. Fails with
    /// [`crate::clients::errors::Error::NoActiveDevice`] when the account has
    /// no device able to play.
    fn add_to_queue(&self, track_uri: &str) -> impl Future<Output = Result<()>> + Send;
}
