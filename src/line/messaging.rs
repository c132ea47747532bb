use std::time::Duration;

use log::debug;
use serde::Serialize;

use crate::clients::errors::{Error, Result};
use crate::flex::Bubble;
use crate::jukebox::Reply;

const REPLY_URL: &str = "https://api.line.me/v2/bot/message/reply";
const ALT_TEXT: &str = "Spotify search result";

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<OutgoingMessage<'a>>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OutgoingMessage<'a> {
    Text {
        text: &'a str,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: &'a str,
        contents: &'a Bubble,
    },
}

impl<'a> From<&'a Reply> for OutgoingMessage<'a> {
    fn from(reply: &'a Reply) -> Self {
        match reply {
            Reply::Text(text) => OutgoingMessage::Text { text },
            Reply::Flex(bubble) => OutgoingMessage::Flex {
                alt_text: ALT_TEXT,
                contents: bubble,
            },
        }
    }
}

/// Sends replies through the messaging platform's HTTP API.
pub struct MessagingClient {
    http: reqwest::Client,
    access_token: String,
}

impl MessagingClient {
    pub fn new(access_token: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(MessagingClient { http, access_token })
    }

    pub async fn reply(&self, reply_token: &str, reply: &Reply) -> Result<()> {
        let request = ReplyRequest {
            reply_token,
            messages: vec![OutgoingMessage::from(reply)],
        };
        let response = self
            .http
            .post(REPLY_URL)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!("reply failed with {status}: {body}")));
        }
        debug!("Replied to {reply_token}");
        Ok(())
    }
}
