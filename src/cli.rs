use clap::{Parser, Subcommand};
use log::info;
use jukelify::{
    Jukebox, Reply,
    clients::{SpotifyClient, errors::Result},
    config::Settings,
    jukebox::ConfigBuilder,
};

#[derive(Parser)]
#[command(name = "jukelify")]
#[command(version, about = "Queue Spotify tracks with @Jukelify chat commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize Spotify access and cache the refresh token
    Authorize {},
    /// Run one chat command, e.g. `exec @Jukelify search Bad`
    Exec {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Run a queue button payload, e.g. `postback '{"name": "Bad", "uri": "spotify:track:..."}'`
    Postback { data: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Authorize {} => authorize().await,
        Commands::Exec { text } => {
            let jukebox = jukebox().await?;
            print_reply(&jukebox.exec(&text.join(" ")).await)
        }
        Commands::Postback { data } => {
            let jukebox = jukebox().await?;
            print_reply(&jukebox.queue_postback(data).await)
        }
    }
}

async fn authorize() -> Result<()> {
    let settings = Settings::from_env()?;
    info!("Authorizing Spotify client ...");
    // A browser prompt is shown unless a valid token is already cached
    SpotifyClient::from_settings(&settings)
        .authorize_client()
        .await?;
    info!("Spotify token cached at {:?}", settings.token_cache);
    Ok(())
}

async fn jukebox() -> Result<Jukebox<SpotifyClient>> {
    info!("Building config ...");
    let settings = Settings::from_env()?;
    let config = ConfigBuilder::spotify(&settings).build()?;
    config.backend.load_cached_token().await?;
    Ok(Jukebox::new(config))
}

fn print_reply(reply: &Reply) -> Result<()> {
    match reply {
        Reply::Text(text) => println!("{text}"),
        Reply::Flex(bubble) => println!("{}", serde_json::to_string_pretty(bubble)?),
    }
    Ok(())
}
