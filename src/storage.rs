/// Storage backends and the favorites store persisted through them

use crate::config::FavoritesConfig;
use crate::error::FavoritesError;
use crate::favorite::{Entry, Membership, PageInfo};
use crate::operations;

/// Key-value storage holding the serialized favorites
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, FavoritesError>;
    fn write(&self, key: &str, value: &str) -> Result<(), FavoritesError>;
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Get localStorage and prove it accepts writes.
    /// Safari private mode hands out a storage object that throws on every write.
    pub fn open() -> Result<LocalStorage, FavoritesError> {
        const PROBE: &str = "__storage_test__";

        let window = web_sys::window()
            .ok_or_else(|| FavoritesError::StorageUnavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| FavoritesError::StorageUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| FavoritesError::StorageUnavailable("localStorage is null".to_string()))?;

        storage
            .set_item(PROBE, PROBE)
            .map_err(|e| FavoritesError::StorageUnavailable(format!("{:?}", e)))?;
        storage
            .remove_item(PROBE)
            .map_err(|e| FavoritesError::StorageUnavailable(format!("{:?}", e)))?;

        Ok(LocalStorage { storage })
    }
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        self.storage
            .get_item(key)
            .map_err(|e| FavoritesError::StorageRead(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), FavoritesError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| FavoritesError::StorageWrite(format!("{:?}", e)))
    }
}

/// Current time as an ISO-8601 string, e.g. 2024-10-28T10:30:00.000Z
pub fn iso_now() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Load the favorites sequence. Missing or corrupt data is an empty list.
pub fn load_entries<B: StorageBackend>(backend: &B, key: &str) -> Vec<Entry> {
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::error!("Error retrieving favorites: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Entry>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Stored favorites are corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// The ordered favorites sequence plus the backend it is persisted to.
///
/// The in-memory sequence is authoritative for this page: every mutation
/// updates it first and then writes the whole sequence back under one key.
/// A failed write leaves memory intact and is surfaced once through
/// [`FavoritesStore::take_write_error`].
pub struct FavoritesStore<B: StorageBackend> {
    backend: B,
    key: String,
    sidebar_key: String,
    clock: fn() -> String,
    entries: Vec<Entry>,
    pending_write_error: Option<FavoritesError>,
    write_error_reported: bool,
}

impl<B: StorageBackend> FavoritesStore<B> {
    pub fn open(backend: B, config: &FavoritesConfig, clock: fn() -> String) -> Self {
        let entries = load_entries(&backend, &config.storage_key);
        log::debug!("Loaded {} favorites", entries.len());

        FavoritesStore {
            backend,
            key: config.storage_key.clone(),
            sidebar_key: config.sidebar_key.clone(),
            clock,
            entries,
            pending_write_error: None,
            write_error_reported: false,
        }
    }

    /// Make links saved as bare paths absolute against `base`, persisting if any changed
    pub fn resolve_relative_links(&mut self, base: &str) -> usize {
        let resolved = operations::resolve_relative_links(&mut self.entries, base);
        if resolved > 0 {
            log::info!("Resolved {} relative favorites against {}", resolved, base);
            let _ = self.persist();
        }
        resolved
    }

    /// Fresh read of the persisted sequence
    pub fn list(&self) -> Vec<Entry> {
        load_entries(&self.backend, &self.key)
    }

    /// Re-adopt whatever is persisted, e.g. after another tab saved
    pub fn reload(&mut self) {
        self.entries = self.list();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn now(&self) -> String {
        (self.clock)()
    }

    /// Replace the in-memory sequence and persist it
    pub fn save(&mut self, entries: Vec<Entry>) -> Result<(), FavoritesError> {
        self.entries = entries;
        self.persist()
    }

    fn persist(&mut self) -> Result<(), FavoritesError> {
        let result = serde_json::to_string(&self.entries)
            .map_err(|e| FavoritesError::StorageWrite(e.to_string()))
            .and_then(|json| self.backend.write(&self.key, &json));

        if let Err(e) = &result {
            log::error!("Error saving favorites: {}", e);
            if !self.write_error_reported && self.pending_write_error.is_none() {
                self.pending_write_error = Some(e.clone());
            }
        }
        result
    }

    /// First write failure of this page, handed out once
    pub fn take_write_error(&mut self) -> Option<FavoritesError> {
        let error = self.pending_write_error.take();
        if error.is_some() {
            self.write_error_reported = true;
        }
        error
    }

    pub fn contains(&self, url: &str) -> bool {
        operations::contains(&self.entries, url)
    }

    pub fn toggle(&mut self, page: &PageInfo) -> Membership {
        let now = self.now();
        let membership = operations::toggle(&mut self.entries, page, &now);
        log::info!("{:?} favorite {}", membership, page.url);
        let _ = self.persist();
        membership
    }

    pub fn remove_url(&mut self, url: &str) -> bool {
        let removed = operations::remove_url(&mut self.entries, url);
        if removed {
            let _ = self.persist();
        }
        removed
    }

    pub fn add_divider(&mut self, title: &str) {
        let now = self.now();
        self.entries.push(Entry::divider(title, now));
        let _ = self.persist();
    }

    pub fn rename_divider(&mut self, index: usize, title: String) -> Result<(), FavoritesError> {
        operations::rename_divider(&mut self.entries, index, title)?;
        let _ = self.persist();
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Entry, FavoritesError> {
        let removed = operations::remove_at(&mut self.entries, index)?;
        let _ = self.persist();
        Ok(removed)
    }

    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), FavoritesError> {
        operations::move_to(&mut self.entries, from, to)?;
        if from != to {
            let _ = self.persist();
        }
        Ok(())
    }

    /// Append non-duplicate imported entries; returns how many were added
    pub fn merge(&mut self, imported: Vec<Entry>) -> usize {
        let added = operations::merge(&mut self.entries, imported);
        let _ = self.persist();
        added
    }

    /// Adopt the imported sequence verbatim
    pub fn replace(&mut self, imported: Vec<Entry>) {
        let _ = self.save(imported);
    }

    /// Sidebar starts collapsed until the user opens it
    pub fn sidebar_collapsed(&self) -> bool {
        match self.backend.read(&self.sidebar_key) {
            Ok(Some(value)) => value != "false",
            Ok(None) => true,
            Err(e) => {
                log::warn!("Could not read sidebar state: {}", e);
                true
            }
        }
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        let value = if collapsed { "true" } else { "false" };
        if let Err(e) = self.backend.write(&self.sidebar_key, value) {
            log::warn!("Could not save sidebar state: {}", e);
        }
    }
}
