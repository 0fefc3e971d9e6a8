/// Runtime configuration: storage keys, mount ids, sidebar size
use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "quarto-favorites";
pub const DEFAULT_SIDEBAR_KEY: &str = "quarto-favorites-sidebar-collapsed";
pub const DEFAULT_SIDEBAR_LIMIT: usize = 5;

/// Id of the optional `<script type="application/json">` block holding overrides
pub const CONFIG_ELEMENT_ID: &str = "favorites-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FavoritesConfig {
    pub storage_key: String,
    pub sidebar_key: String,
    pub sidebar_limit: usize,
    pub button_id: String,
    pub list_id: String,
    pub sidebar_id: String,
    /// Where the sidebar's "view all" link points
    pub favorites_page_url: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        FavoritesConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sidebar_key: DEFAULT_SIDEBAR_KEY.to_string(),
            sidebar_limit: DEFAULT_SIDEBAR_LIMIT,
            button_id: "favorites-button".to_string(),
            list_id: "favorites-list".to_string(),
            sidebar_id: "favorites-sidebar".to_string(),
            favorites_page_url: "favorites.html".to_string(),
        }
    }
}

impl FavoritesConfig {
    /// Parse a page-supplied override block. Missing fields keep their defaults;
    /// a malformed block falls back to the defaults entirely.
    pub fn from_json(text: &str) -> FavoritesConfig {
        match serde_json::from_str::<FavoritesConfig>(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed favorites config: {}", e);
                FavoritesConfig::default()
            }
        }
    }

    /// Read overrides from the current document, if any
    pub fn from_document(document: &web_sys::Document) -> FavoritesConfig {
        document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .map(|text| FavoritesConfig::from_json(&text))
            .unwrap_or_default()
    }
}
