//! Flex message documents describing the interactive cards shown in chat.
//!
//! Both documents share one bubble layout: a green header with the Spotify
//! logo, a dark body holding the cards and a footer credit line. The types
//! serialize into the messaging platform's flex JSON schema.

use serde::{Deserialize, Serialize};

use crate::clients::entities::Track;

pub const ACCENT: &str = "#1DB954";
pub const BACKGROUND: &str = "#191414";
pub const TEXT: &str = "#FFFFFF";

const LOGO_URL: &str =
    "https://storage.googleapis.com/pr-newsroom-wp/1/2018/11/Spotify_Logo_CMYK_Black.png";
const FOOTER: &str = "Powered by Line and Spotify";
const RANDOM_HEADLINE: &str = "Randomly pick a song for you. Hope you will like it!";

/// Postback data attached to a queue button, sent back verbatim on press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuePayload {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "bubble")]
pub struct Bubble {
    pub size: &'static str,
    pub header: FlexBox,
    pub body: FlexBox,
    pub footer: FlexBox,
    pub styles: BubbleStyles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleStyles {
    pub header: BlockStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    pub background_color: &'static str,
}

/// Each variant carries its own `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Box(FlexBox),
    Text(Text),
    Image(Image),
    Button(Button),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "box", rename_all = "camelCase")]
pub struct FlexBox {
    pub layout: &'static str,
    pub contents: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_all: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct Text {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "image", rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<&'static str>,
    pub aspect_ratio: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "button")]
pub struct Button {
    pub action: PostbackAction,
    pub style: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "postback")]
pub struct PostbackAction {
    pub label: &'static str,
    pub data: String,
}

impl Text {
    fn plain(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            color: Some(TEXT),
            ..Default::default()
        }
    }

    fn title(text: impl Into<String>, size: &'static str) -> Self {
        Text {
            text: text.into(),
            size: Some(size),
            style: Some("normal"),
            weight: Some("bold"),
            color: Some(ACCENT),
            wrap: Some(true),
        }
    }

    fn detail(text: impl Into<String>) -> Self {
        Text {
            size: Some("xs"),
            wrap: Some(true),
            ..Text::plain(text)
        }
    }
}

fn vertical(contents: Vec<Component>) -> FlexBox {
    FlexBox {
        layout: "vertical",
        contents,
        ..Default::default()
    }
}

fn cover(track: &Track, width: &'static str) -> Component {
    Component::Box(FlexBox {
        flex: Some(0),
        corner_radius: Some("5px"),
        width: Some(width),
        spacing: Some("none"),
        ..vertical(vec![Component::Image(Image {
            url: track.img.clone(),
            aspect_ratio: "1:1",
            ..Default::default()
        })])
    })
}

fn card(contents: Vec<Component>, spacing: &'static str) -> Component {
    Component::Box(FlexBox {
        layout: "horizontal",
        contents,
        spacing: Some(spacing),
        corner_radius: Some("5px"),
        background_color: Some(BACKGROUND),
        ..Default::default()
    })
}

fn bubble(body: Vec<Component>) -> Bubble {
    Bubble {
        size: "giga",
        header: FlexBox {
            padding_all: Some("10px"),
            ..vertical(vec![Component::Image(Image {
                url: LOGO_URL.to_string(),
                size: Some("xs"),
                align: Some("center"),
                flex: Some(0),
                margin: Some("none"),
                aspect_ratio: "4:3",
            })])
        },
        body: FlexBox {
            flex: Some(0),
            spacing: Some("xl"),
            background_color: Some(BACKGROUND),
            ..vertical(body)
        },
        footer: vertical(vec![Component::Text(Text {
            text: FOOTER.to_string(),
            ..Default::default()
        })]),
        styles: BubbleStyles {
            header: BlockStyle {
                background_color: ACCENT,
            },
        },
    }
}

fn search_row(track: &Track) -> Component {
    let payload = QueuePayload {
        name: track.name.clone(),
        uri: track.uri.clone(),
    };
    // A struct of two strings always serializes
    let data = serde_json::to_string(&payload).unwrap_or_default();

    card(
        vec![
            cover(track, "30%"),
            Component::Box(FlexBox {
                spacing: Some("none"),
                width: Some("40%"),
                ..vertical(vec![
                    Component::Text(Text::title(track.name.as_str(), "md")),
                    Component::Text(Text::detail(track.artists.as_str())),
                    Component::Text(Text::detail(track.album.as_str())),
                    Component::Text(Text::detail(track.release_date.as_str())),
                ])
            }),
            Component::Box(FlexBox {
                width: Some("20%"),
                ..vertical(vec![Component::Button(Button {
                    action: PostbackAction {
                        label: "Push",
                        data,
                    },
                    style: "primary",
                    color: ACCENT,
                })])
            }),
        ],
        "md",
    )
}

/// One row per track, each with a button that queues it.
pub fn search_results(tracks: &[Track]) -> Bubble {
    bubble(tracks.iter().map(search_row).collect())
}

/// A single card announcing the randomly queued track.
pub fn random_pick(track: &Track) -> Bubble {
    let details = Component::Box(FlexBox {
        spacing: Some("none"),
        width: Some("40%"),
        ..vertical(vec![
            Component::Text(Text::title(track.name.as_str(), "lg")),
            Component::Text(Text {
                wrap: Some(true),
                ..Text::plain(track.duration())
            }),
            Component::Text(Text::plain(track.album.as_str())),
            Component::Text(Text::plain(track.release_date.as_str())),
        ])
    });

    bubble(vec![
        Component::Box(vertical(vec![Component::Text(Text::plain(RANDOM_HEADLINE))])),
        card(vec![cover(track, "40%"), details], "lg"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn track(name: &str) -> Track {
        Track::new(
            name.into(),
            format!("spotify:track:{name}"),
            "Michael Jackson".into(),
            "https://i.scdn.co/image/cover".into(),
            "1982-11-30".into(),
            "Thriller",
            125_000,
        )
    }

    fn to_json(bubble: &Bubble) -> Value {
        serde_json::to_value(bubble).unwrap()
    }

    #[test]
    fn bubble_frame() {
        let doc = to_json(&search_results(&[]));
        assert_eq!(doc["type"], "bubble");
        assert_eq!(doc["size"], "giga");
        assert_eq!(doc["styles"], json!({ "header": { "backgroundColor": ACCENT } }));
        assert_eq!(
            doc["header"],
            json!({
                "type": "box",
                "layout": "vertical",
                "contents": [{
                    "type": "image",
                    "url": LOGO_URL,
                    "size": "xs",
                    "align": "center",
                    "flex": 0,
                    "margin": "none",
                    "aspectRatio": "4:3"
                }],
                "paddingAll": "10px"
            })
        );
        assert_eq!(
            doc["body"],
            json!({
                "type": "box",
                "layout": "vertical",
                "contents": [],
                "flex": 0,
                "spacing": "xl",
                "backgroundColor": BACKGROUND
            })
        );
        assert_eq!(
            doc["footer"],
            json!({
                "type": "box",
                "layout": "vertical",
                "contents": [{ "type": "text", "text": "Powered by Line and Spotify" }]
            })
        );
    }

    #[test]
    fn nested_box_is_tagged_once() {
        let json = serde_json::to_string(&Component::Box(vertical(vec![]))).unwrap();
        assert_eq!(json, r#"{"type":"box","layout":"vertical","contents":[]}"#);
    }

    #[test]
    fn one_search_row_per_track() {
        let tracks = [track("Bad"), track("Thriller"), track("Beat It")];
        let doc = to_json(&search_results(&tracks));
        let rows = doc["body"]["contents"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["contents"][1]["contents"][0]["text"], "Beat It");
    }

    #[test]
    fn search_row_layout() {
        let doc = to_json(&search_results(&[track("Bad")]));
        let row = &doc["body"]["contents"][0];
        assert_eq!(row["layout"], "horizontal");
        assert_eq!(row["spacing"], "md");
        assert_eq!(row["cornerRadius"], "5px");
        assert_eq!(row["backgroundColor"], BACKGROUND);

        let columns = row["contents"].as_array().unwrap();
        assert_eq!(columns[0]["width"], "30%");
        assert_eq!(
            columns[0]["contents"][0],
            json!({ "type": "image", "url": "https://i.scdn.co/image/cover", "aspectRatio": "1:1" })
        );
        assert_eq!(columns[1]["width"], "40%");
        assert_eq!(
            columns[1]["contents"][0],
            json!({
                "type": "text",
                "text": "Bad",
                "size": "md",
                "style": "normal",
                "weight": "bold",
                "color": ACCENT,
                "wrap": true
            })
        );
        assert_eq!(
            columns[1]["contents"][1],
            json!({ "type": "text", "text": "Michael Jackson", "size": "xs", "color": TEXT, "wrap": true })
        );
        assert_eq!(columns[2]["width"], "20%");
    }

    #[test]
    fn queue_button_carries_name_and_uri() {
        let doc = to_json(&search_results(&[track("Bad")]));
        let button = &doc["body"]["contents"][0]["contents"][2]["contents"][0];
        assert_eq!(button["type"], "button");
        assert_eq!(button["style"], "primary");
        assert_eq!(button["color"], ACCENT);
        assert_eq!(button["action"]["type"], "postback");
        assert_eq!(button["action"]["label"], "Push");

        let payload: QueuePayload =
            serde_json::from_str(button["action"]["data"].as_str().unwrap()).unwrap();
        assert_eq!(
            payload,
            QueuePayload {
                name: "Bad".into(),
                uri: "spotify:track:Bad".into()
            }
        );
    }

    #[test]
    fn random_pick_card() {
        let doc = to_json(&random_pick(&track("Thriller")));
        let body = doc["body"]["contents"].as_array().unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(
            body[0],
            json!({
                "type": "box",
                "layout": "vertical",
                "contents": [{ "type": "text", "text": RANDOM_HEADLINE, "color": TEXT }]
            })
        );
        assert_eq!(body[1]["spacing"], "lg");
        assert_eq!(body[1]["contents"][0]["width"], "40%");

        let details = body[1]["contents"][1]["contents"].as_array().unwrap();
        assert_eq!(details[0]["text"], "Thriller");
        assert_eq!(details[0]["size"], "lg");
        assert_eq!(
            details[1],
            json!({ "type": "text", "text": "2:5", "color": TEXT, "wrap": true })
        );
        assert_eq!(details[2], json!({ "type": "text", "text": "Thriller", "color": TEXT }));
        assert_eq!(details[3]["text"], "1982-11-30");
    }
}
