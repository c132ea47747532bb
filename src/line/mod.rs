/// Reply client for the messaging API
pub mod messaging;
/// Webhook payloads and signature verification
pub mod webhook;

pub use messaging::MessagingClient;
pub use webhook::{Event, WebhookBody, verify_signature};

use crate::clients::backend::MusicBackend;
use crate::command::PREFIX;
use crate::jukebox::{Jukebox, Reply};
use webhook::{Message, MessageEvent, PostbackEvent};

/// Run one webhook event through the jukebox.
///
/// Returns the reply token together with the reply, or `None` for events
/// that need no answer: non-text messages, text not addressed to the bot,
/// and event kinds the bot does not handle.
pub async fn handle_event<B: MusicBackend>(
    jukebox: &Jukebox<B>,
    event: Event,
) -> Option<(String, Reply)> {
    match event {
        Event::Message(MessageEvent {
            reply_token,
            message: Message::Text { text },
        }) if text.starts_with(PREFIX) => Some((reply_token, jukebox.exec(&text).await)),
        Event::Postback(PostbackEvent {
            reply_token,
            postback,
        }) => Some((reply_token, jukebox.queue_postback(&postback.data).await)),
        _ => None,
    }
}
