/// Doc Favorites - bookmark documentation pages in the browser
/// Built with Rust + WASM + Yew

pub mod config;
pub mod error;
pub mod favorite;
pub mod operations;
pub mod storage;
pub mod transfer;
pub mod urls;
pub mod ui;

use wasm_bindgen::prelude::*;

use crate::config::FavoritesConfig;
use crate::storage::{iso_now, FavoritesStore, LocalStorage};
use crate::ui::app::{read_page_info, FavoritesApp, FavoritesAppProps, Mounts, StoreHandle};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export URL normalization for JavaScript access
#[wasm_bindgen]
pub fn normalize_url(url: &str) -> String {
    urls::normalize_url(url)
}

/// Mount the favorites views into whichever mount points this page has
#[wasm_bindgen]
pub fn start_favorites() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = FavoritesConfig::from_document(&document);

    let storage = match LocalStorage::open() {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("localStorage is not available. Favorites functionality will not work. ({})", e);
            return;
        }
    };

    let mounts = Mounts::find(&document, &config);
    if mounts.is_empty() {
        log::debug!("No favorites mount points on this page");
        return;
    }

    let Some(body) = document.body() else {
        return;
    };
    let root = match document.create_element("div") {
        Ok(root) => root,
        Err(e) => {
            log::error!("Failed to create favorites root: {:?}", e);
            return;
        }
    };
    root.set_id("favorites-app");
    if let Err(e) = body.append_child(&root) {
        log::error!("Failed to attach favorites root: {:?}", e);
        return;
    }

    let mut store = FavoritesStore::open(storage, &config, iso_now);
    if let Ok(href) = window.location().href() {
        store.resolve_relative_links(&href);
    }

    let props = FavoritesAppProps {
        store: StoreHandle::new(store),
        page: read_page_info(&window, mounts.button.as_ref()),
        current_host: window.location().hostname().unwrap_or_default(),
        mounts,
        config,
    };

    yew::Renderer::<FavoritesApp>::with_root_and_props(root, props).render();
}
