/// Error type shared by the store, storage backends and import/export
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesError {
    /// localStorage is missing or refuses writes (private mode, disabled by policy).
    StorageUnavailable(String),
    /// Reading the stored blob failed.
    StorageRead(String),
    /// Persisting the sequence failed, usually quota.
    StorageWrite(String),
    /// Import file is not `{favorites: [...]}` or an entry is malformed.
    InvalidFormat(String),
    /// Import file parsed but holds no entries.
    EmptyImport,
    /// Export requested with an empty list.
    NothingToExport,
    IndexOutOfRange { index: usize, len: usize },
    /// Rename targeted a link instead of a divider.
    NotADivider(usize),
    /// Building or clicking the export download link failed.
    Download(String),
    /// Reading an uploaded file failed.
    FileRead(String),
}

impl fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoritesError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            FavoritesError::StorageRead(msg) => write!(f, "Failed to read favorites: {}", msg),
            FavoritesError::StorageWrite(msg) => write!(f, "Failed to save favorites: {}", msg),
            FavoritesError::InvalidFormat(msg) => write!(f, "Invalid favorites data format: {}", msg),
            FavoritesError::EmptyImport => write!(f, "No favorites found in the imported file."),
            FavoritesError::NothingToExport => write!(f, "You have no favorites to export."),
            FavoritesError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for {} favorites", index, len)
            }
            FavoritesError::NotADivider(index) => write!(f, "Entry {} is not a section divider", index),
            FavoritesError::Download(msg) => write!(f, "Export failed: {}", msg),
            FavoritesError::FileRead(msg) => write!(f, "Could not read file: {}", msg),
        }
    }
}

impl std::error::Error for FavoritesError {}

impl From<serde_json::Error> for FavoritesError {
    fn from(e: serde_json::Error) -> Self {
        FavoritesError::InvalidFormat(e.to_string())
    }
}
