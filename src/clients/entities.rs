const ALBUM_NAME_LIMIT: usize = 10;
const ALBUM_NAME_KEEP: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub uri: String,
    pub artists: String, // comma-joined display names
    pub img: String,
    pub release_date: String,
    pub album: String,
    pub duration_ms: u64,
}

impl Track {
    /// Builds a track, shortening long album names for display.
    pub fn new(
        name: String,
        uri: String,
        artists: String,
        img: String,
        release_date: String,
        album: &str,
        duration_ms: u64,
    ) -> Self {
        Track {
            name,
            uri,
            artists,
            img,
            release_date,
            album: shorten_album_name(album),
            duration_ms,
        }
    }

    /// Track length as `minutes:seconds`. Seconds are not zero padded, so
    /// 125 000 ms reads `2:5`.
    pub fn duration(&self) -> String {
        let seconds = self.duration_ms / 1000;
        format!("{}:{}", seconds / 60, seconds % 60)
    }
}

fn shorten_album_name(album: &str) -> String {
    if album.chars().count() > ALBUM_NAME_LIMIT {
        let mut short: String = album.chars().take(ALBUM_NAME_KEEP).collect();
        short.push_str("...");
        short
    } else {
        album.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
    pub id: String,
    pub genres: String,
    pub followers: u64,
    pub img: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub name: String,
    pub id: String,
    pub img: String,
    pub album_type: String,
    pub uri: String,
    pub release_date: String,
}
