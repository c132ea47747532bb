/// Raw music service capabilities
pub mod backend;
/// Data entities for tracks, artists and albums
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Record level access with timeouts
pub mod gateway;
/// Conversion of remote fragments into entities
pub mod mapper;
/// Spotify API client
pub mod spotify;

pub use backend::MusicBackend;
pub use gateway::RemoteMusicGateway;
pub use spotify::SpotifyClient;
