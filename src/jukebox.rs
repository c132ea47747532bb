use std::time::Duration;

use log::{error, info, warn};

use crate::clients::{
    backend::MusicBackend,
    entities::Track,
    errors::{Error, Result},
    gateway::{DEFAULT_TIMEOUT, RemoteMusicGateway},
    spotify::SpotifyClient,
};
use crate::command::Command;
use crate::config::Settings;
use crate::flex::{self, Bubble, QueuePayload};
use crate::selector::RandomTrackSelector;

pub const HELP: &str = r#"Welcome to Jukelify. Jukelify is a service to help you order songs for you or your friends.
You may use "@Jukelify test" to check if this works properly.

Subcommands
    search Search results from spotify and return an interactive page.
    random Randomly add a song from the artist
    test   Quick test

@Jukelify search <song or artist>
Example:
    @Jukelify search Michael Jackson
    @Jukelify search Butter-Fly

@Jukelify random <artist>
Example:
    @Jukelify random 伍佰

"#;

pub const PARSE_FAILED: &str = "Sorry. Jukelify cannot parse the instruction.";
pub const TIMEOUT: &str = "Timeout Error. Please try again.";
pub const UNEXPECTED: &str = "Unexpected Error.";
pub const NO_ACTIVE_DEVICE: &str =
    "NO_ACTIVE_DEVICE. Please open your spotify and randomly play a song.";
pub const QUEUE_FAILED: &str = "Unexpected error.";

// Reference track queued by the self check
const QUICK_TEST_QUERY: &str = "Never gonna give you up";

/// Answer to a command: plain text, or a flex document for the transport to
/// wrap into a flex message.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Flex(Bubble),
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

// Configuration for the Jukebox struct
pub struct Config<B> {
    pub backend: B,
    pub timeout: Duration,
}

pub struct ConfigBuilder<B> {
    backend: Option<B>,
    timeout: Option<Duration>,
}

impl<B: MusicBackend> ConfigBuilder<B> {
    pub fn new() -> Self {
        Self {
            backend: None,
            timeout: None, // Remote call timeout. Default is 5 seconds.
        }
    }

    #[must_use]
    pub fn backend(mut self, backend: B) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Config<B>> {
        let backend = self
            .backend
            .ok_or_else(|| Error::Configuration("No music backend configured".into()))?;
        Ok(Config {
            backend,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl<B: MusicBackend> Default for ConfigBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder<SpotifyClient> {
    /// Spotify backed builder using the given settings.
    pub fn spotify(settings: &Settings) -> Self {
        Self::new()
            .backend(SpotifyClient::from_settings(settings))
            .timeout(settings.timeout)
    }
}

/// Interprets chat commands against the music service.
///
/// [`Jukebox::exec`] never fails: every error is turned into a short text
/// reply there, and nowhere else.
pub struct Jukebox<B> {
    gateway: RemoteMusicGateway<B>,
}

impl<B: MusicBackend> Jukebox<B> {
    pub fn new(config: Config<B>) -> Self {
        Jukebox {
            gateway: RemoteMusicGateway::with_timeout(config.backend, config.timeout),
        }
    }

    pub fn gateway(&self) -> &RemoteMusicGateway<B> {
        &self.gateway
    }

    pub async fn exec(&self, text: &str) -> Reply {
        info!("Received instruction {text:?}");
        self.dispatch(text).await.unwrap_or_else(recover)
    }

    /// Handle the data of a pressed queue button.
    pub async fn queue_postback(&self, data: &str) -> Reply {
        info!("Received postback {data:?}");
        self.queue_payload(data).await.unwrap_or_else(recover)
    }

    pub async fn dispatch(&self, text: &str) -> Result<Reply> {
        match Command::parse(text)? {
            Command::Help => Ok(Reply::text(HELP)),
            Command::Test => self.quick_test().await.map(Reply::Text),
            Command::Search(query) => self.search(&query).await.map(Reply::Flex),
            Command::Random(artist) => self.random(&artist).await.map(Reply::Flex),
        }
    }

    // Queue a well known track to check both search and playback access
    async fn quick_test(&self) -> Result<String> {
        let tracks = self.gateway.search(QUICK_TEST_QUERY).await?;
        let rick_roll = tracks
            .first()
            .ok_or_else(|| Error::NoResults(QUICK_TEST_QUERY.to_string()))?;
        let message = self.add_to_queue(rick_roll).await?;
        Ok(format!("Rick roll! {message}"))
    }

    async fn search(&self, query: &str) -> Result<Bubble> {
        let tracks = self.gateway.search(query).await?;
        if tracks.is_empty() {
            return Err(Error::NoResults(query.to_string()));
        }
        Ok(flex::search_results(&tracks))
    }

    async fn random(&self, artist: &str) -> Result<Bubble> {
        let track = RandomTrackSelector::new(&self.gateway)
            .queue_random(artist)
            .await?;
        Ok(flex::random_pick(&track))
    }

    async fn queue_payload(&self, data: &str) -> Result<Reply> {
        let payload: QueuePayload = serde_json::from_str(data)
            .map_err(|e| Error::Transport(format!("malformed postback data: {e}")))?;
        self.gateway.enqueue(&payload.uri).await?;
        Ok(Reply::Text(queued_message(&payload.name)))
    }

    async fn add_to_queue(&self, track: &Track) -> Result<String> {
        self.gateway.enqueue(&track.uri).await?;
        Ok(queued_message(&track.name))
    }
}

fn queued_message(name: &str) -> String {
    format!("Add {name} to your play queue.")
}

// The one place where failures become user facing text
fn recover(err: Error) -> Reply {
    match err {
        Error::Parse(_) => {
            info!("{err}");
            Reply::text(PARSE_FAILED)
        }
        Error::NoActiveDevice => {
            info!("Queue request without an active device");
            Reply::text(NO_ACTIVE_DEVICE)
        }
        Error::QueueRejected(reason) => {
            warn!("Queue request rejected: {reason}");
            Reply::text(QUEUE_FAILED)
        }
        Error::NoResults(query) => {
            info!("Nothing found for {query:?}");
            Reply::Text(format!(
                "Sorry. Jukelify cannot find any songs for \"{query}\"."
            ))
        }
        Error::Timeout => {
            warn!("Remote service timed out");
            Reply::text(TIMEOUT)
        }
        err if err.is_contract_violation() => {
            error!("Remote response broke the expected format: {err}");
            Reply::text(UNEXPECTED)
        }
        err => {
            warn!("Instruction failed: {err}");
            Reply::text(UNEXPECTED)
        }
    }
}
