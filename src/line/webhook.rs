use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

#[derive(Deserialize, Debug)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message(MessageEvent),
    Postback(PostbackEvent),
    // follow, join, unsend, ...
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub reply_token: String,
    pub message: Message,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostbackEvent {
    pub reply_token: String,
    pub postback: Postback,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct Postback {
    pub data: String,
}

/// Check `signature` (base64 HMAC-SHA256 of the raw body keyed with the
/// channel secret) against `body`.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_matching_signature() {
        let body = br#"{"destination":"U1","events":[]}"#;
        let signature = sign("channel-secret", body);
        assert!(verify_signature("channel-secret", body, &signature));
    }

    #[test]
    fn rejects_tampered_body_or_wrong_secret() {
        let body = br#"{"events":[]}"#;
        let signature = sign("channel-secret", body);
        assert!(!verify_signature("channel-secret", br#"{"events":[{}]}"#, &signature));
        assert!(!verify_signature("other-secret", body, &signature));
        assert!(!verify_signature("channel-secret", body, "not base64!"));
    }

    #[test]
    fn parses_message_and_postback_events() {
        let body: WebhookBody = serde_json::from_str(
            r#"{
                "destination": "Uxxxxxxxx",
                "events": [
                    {
                        "type": "message",
                        "replyToken": "r1",
                        "timestamp": 1700000000000,
                        "source": { "type": "user", "userId": "U1" },
                        "message": { "type": "text", "id": "1", "text": "@Jukelify help" }
                    },
                    {
                        "type": "message",
                        "replyToken": "r2",
                        "message": { "type": "sticker", "id": "2", "packageId": "1", "stickerId": "1" }
                    },
                    {
                        "type": "postback",
                        "replyToken": "r3",
                        "postback": { "data": "{\"name\": \"Bad\", \"uri\": \"spotify:track:1\"}" }
                    },
                    { "type": "follow", "replyToken": "r4" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.destination.as_deref(), Some("Uxxxxxxxx"));
        assert_eq!(
            body.events,
            vec![
                Event::Message(MessageEvent {
                    reply_token: "r1".into(),
                    message: Message::Text {
                        text: "@Jukelify help".into()
                    },
                }),
                Event::Message(MessageEvent {
                    reply_token: "r2".into(),
                    message: Message::Other,
                }),
                Event::Postback(PostbackEvent {
                    reply_token: "r3".into(),
                    postback: Postback {
                        data: r#"{"name": "Bad", "uri": "spotify:track:1"}"#.into()
                    },
                }),
                Event::Other,
            ]
        );
    }
}
