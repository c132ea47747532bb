//! Jukelify - queue Spotify tracks from a group chat
//!
//! This library interprets `@Jukelify` chat commands: it searches Spotify,
//! picks random tracks of an artist, queues tracks on the active playback
//! device and renders the results as flex message documents.

/// Client modules for interacting with the music service
pub mod clients;
/// Command grammar
pub mod command;
/// Environment based settings
pub mod config;
/// Flex message rendering
pub mod flex;
/// Command dispatch and error recovery
pub mod jukebox;
/// Messaging platform webhook and reply plumbing
pub mod line;
/// Random track selection
pub mod selector;

pub use jukebox::{Jukebox, Reply};
