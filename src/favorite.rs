/// Data structures for favorites
use serde::{Deserialize, Deserializer, Serialize};

use crate::urls::same_page;

/// One item in the persisted favorites sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Link {
        title: String,
        url: String,
        #[serde(rename = "dateAdded")]
        date_added: String,
    },
    Divider {
        title: String,
        #[serde(rename = "dateAdded")]
        date_added: String,
    },
}

impl Entry {
    pub fn link(title: impl Into<String>, url: impl Into<String>, date_added: impl Into<String>) -> Entry {
        Entry::Link {
            title: title.into(),
            url: url.into(),
            date_added: date_added.into(),
        }
    }

    pub fn divider(title: impl Into<String>, date_added: impl Into<String>) -> Entry {
        Entry::Divider {
            title: title.into(),
            date_added: date_added.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Entry::Link { title, .. } | Entry::Divider { title, .. } => title,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Entry::Link { url, .. } => Some(url),
            Entry::Divider { .. } => None,
        }
    }

    pub fn date_added(&self) -> &str {
        match self {
            Entry::Link { date_added, .. } | Entry::Divider { date_added, .. } => date_added,
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, Entry::Divider { .. })
    }

    /// Link whose normalized URL equals `url`'s
    pub fn is_link_to(&self, url: &str) -> bool {
        self.url().map_or(false, |own| same_page(own, url))
    }
}

/// Wire shape accepted on read: tolerates records written before dividers
/// existed (no `kind`) and the oldest `timestamp` field name.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "dateAdded", alias = "timestamp")]
    date_added: String,
}

impl TryFrom<StoredEntry> for Entry {
    type Error = String;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        match stored.kind.as_deref() {
            None | Some("link") => match stored.url {
                Some(url) => Ok(Entry::Link {
                    title: stored.title,
                    url,
                    date_added: stored.date_added,
                }),
                None => Err("link entry is missing its url".to_string()),
            },
            Some("divider") => Ok(Entry::Divider {
                title: stored.title,
                date_added: stored.date_added,
            }),
            Some(other) => Err(format!("unknown entry kind {:?}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredEntry::deserialize(deserializer)?;
        Entry::try_from(stored).map_err(serde::de::Error::custom)
    }
}

/// Title and URL of the page hosting the toggle button
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl PageInfo {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> PageInfo {
        PageInfo {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Result of a toggle, so callers can update UI without another lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Added,
    Removed,
}

impl Membership {
    pub fn is_favorited(self) -> bool {
        self == Membership::Added
    }
}
