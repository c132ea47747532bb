use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use jukelify::{
    Jukebox,
    clients::{SpotifyClient, errors::Result},
    config::{LineSettings, Settings, load_dotenv},
    jukebox::ConfigBuilder,
    line::{self, MessagingClient, WebhookBody, webhook::SIGNATURE_HEADER},
};
use log::{debug, info, warn};
use serde_json::{Value, json};

struct AppState {
    jukebox: Jukebox<SpotifyClient>,
    messaging: MessagingClient,
    channel_secret: String,
}

type Rejection = (StatusCode, &'static str);

const BAD_REQUEST: Rejection = (StatusCode::BAD_REQUEST, "Missing Parameters");

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    env_logger::init();

    let line_settings = LineSettings::from_env()?;
    let port = line_settings.port;
    let state = Arc::new(app_state(line_settings).await?);

    let app = Router::new()
        .route("/", get(root))
        .route("/webhook", get(check_webhook).post(webhook))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn app_state(line_settings: LineSettings) -> Result<AppState> {
    let settings = Settings::from_env()?;

    let config = ConfigBuilder::spotify(&settings).build()?;
    config.backend.load_cached_token().await?;

    Ok(AppState {
        jukebox: Jukebox::new(config),
        messaging: MessagingClient::new(line_settings.channel_access_token, settings.timeout)?,
        channel_secret: line_settings.channel_secret,
    })
}

async fn root() -> &'static str {
    "Welcome to jukelify"
}

async fn check_webhook() -> Json<Value> {
    Json(json!({ "webhook": "OK" }))
}

async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> std::result::Result<&'static str, Rejection> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(BAD_REQUEST)?;
    if !line::verify_signature(&state.channel_secret, &body, signature) {
        warn!("Rejected webhook call with an invalid signature");
        return Err(BAD_REQUEST);
    }

    let payload: WebhookBody = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected malformed webhook body: {e}");
        BAD_REQUEST
    })?;
    debug!("Webhook delivered {} events", payload.events.len());

    for event in payload.events {
        let Some((reply_token, reply)) = line::handle_event(&state.jukebox, event).await else {
            continue;
        };
        if let Err(e) = state.messaging.reply(&reply_token, &reply).await {
            warn!("Failed to deliver reply: {e}");
        }
    }
    Ok("OK")
}
