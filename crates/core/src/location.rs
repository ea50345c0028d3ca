//! Addressable page state: a single `v` query parameter and a browser-like
//! history of locations.

use std::fmt;

use url::{Url, form_urlencoded};

pub const VIDEO_PARAM: &str = "v";

const PARSE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    video_id: Option<String>,
}

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_video(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        Self {
            video_id: (!video_id.is_empty()).then_some(video_id),
        }
    }

    /// Parse an absolute URL, a path or a bare `?query`. Only `v` is read;
    /// anything unparseable is the root location.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let parsed = Url::parse(input).or_else(|_| {
            Url::parse(PARSE_BASE).and_then(|base| base.join(input))
        });

        let Ok(url) = parsed else {
            return Self::root();
        };

        url.query_pairs()
            .find(|(key, _)| key == VIDEO_PARAM)
            .map(|(_, value)| Self::with_video(value.into_owned()))
            .unwrap_or_default()
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.video_id {
            Some(id) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(VIDEO_PARAM, id)
                    .finish();
                write!(f, "/?{query}")
            }
            None => f.write_str("/"),
        }
    }
}

/// Session history with a cursor, as a browser keeps it.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    /// Append a new entry after the cursor, dropping any forward entries.
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::root())
    }
}
