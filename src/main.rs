mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env may carry RUST_LOG, so load it before the logger
    jukelify::config::load_dotenv();
    env_logger::init();

    cli::run().await?;

    Ok(())
}
