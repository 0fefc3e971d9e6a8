/// Export to and import from favorites JSON files

use serde::{Deserialize, Serialize};

use crate::error::FavoritesError;
use crate::favorite::Entry;
use crate::storage::{FavoritesStore, StorageBackend};
use crate::urls::is_same_origin;

pub const EXPORT_VERSION: &str = "1.0";

/// Export file layout: `{version, exportDate, favorites}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub version: String,
    pub export_date: String,
    pub favorites: Vec<Entry>,
}

/// Pretty-printed export payload; refuses an empty list
pub fn export_all(entries: &[Entry], now: &str) -> Result<String, FavoritesError> {
    if entries.is_empty() {
        return Err(FavoritesError::NothingToExport);
    }

    let file = ExportFile {
        version: EXPORT_VERSION.to_string(),
        export_date: now.to_string(),
        favorites: entries.to_vec(),
    };
    serde_json::to_string_pretty(&file).map_err(FavoritesError::from)
}

/// `favorites-2024-10-28.json` for an ISO timestamp
pub fn export_filename(now: &str) -> String {
    let date = now.split('T').next().unwrap_or(now);
    format!("favorites-{}.json", date)
}

/// Parse an uploaded file. All-or-nothing: one bad entry rejects the file.
/// Only the `favorites` array is required; `version` and `exportDate` are informational.
pub fn parse_import(text: &str) -> Result<Vec<Entry>, FavoritesError> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let favorites = match value.get("favorites") {
        Some(favorites) if favorites.is_array() => favorites.clone(),
        _ => {
            return Err(FavoritesError::InvalidFormat(
                "expected an object with a \"favorites\" array".to_string(),
            ))
        }
    };

    let entries: Vec<Entry> = serde_json::from_value(favorites)?;
    if entries.is_empty() {
        return Err(FavoritesError::EmptyImport);
    }
    Ok(entries)
}

/// Counts shown to the user before an import is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub same_origin: usize,
    pub cross_origin: usize,
    pub dividers: usize,
}

impl ImportSummary {
    pub fn classify(entries: &[Entry], current_host: &str) -> ImportSummary {
        entries.iter().fold(ImportSummary::default(), |mut summary, entry| {
            match entry.url() {
                None => summary.dividers += 1,
                Some(url) if is_same_origin(url, current_host) => summary.same_origin += 1,
                Some(_) => summary.cross_origin += 1,
            }
            summary
        })
    }

    pub fn links(&self) -> usize {
        self.same_origin + self.cross_origin
    }

    /// Every link points at another site
    pub fn all_cross_origin(&self) -> bool {
        self.cross_origin > 0 && self.same_origin == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportChoice {
    Cancel,
    Merge,
    Replace,
}

/// What the user must be asked next for a pending import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStep {
    /// Every link is from another site: confirm before going any further
    ConfirmCrossOrigin,
    /// Existing favorites present: merge, replace or cancel
    ChooseMode,
    /// Nothing to ask; the list is empty so the import is adopted as-is
    Apply,
}

/// A parsed import file waiting on user decisions
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImport {
    pub entries: Vec<Entry>,
    pub summary: ImportSummary,
    pub cross_origin_confirmed: bool,
}

impl PendingImport {
    pub fn new(entries: Vec<Entry>, current_host: &str) -> PendingImport {
        let summary = ImportSummary::classify(&entries, current_host);
        PendingImport {
            entries,
            summary,
            cross_origin_confirmed: false,
        }
    }

    pub fn next_step(&self, current_len: usize) -> ImportStep {
        if self.summary.all_cross_origin() && !self.cross_origin_confirmed {
            ImportStep::ConfirmCrossOrigin
        } else if current_len > 0 {
            ImportStep::ChooseMode
        } else {
            ImportStep::Apply
        }
    }

    pub fn confirm_cross_origin(&mut self) {
        self.cross_origin_confirmed = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Cancelled,
    Imported { count: usize },
    Merged { imported: usize, added: usize },
    Replaced { imported: usize },
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        match self {
            ImportOutcome::Cancelled => "Import cancelled.".to_string(),
            ImportOutcome::Imported { count } => format!("Successfully imported {} favorites.", count),
            ImportOutcome::Merged { imported, added } => {
                format!("Successfully merged {} favorites ({} new added).", imported, added)
            }
            ImportOutcome::Replaced { imported } => {
                format!("Replaced all favorites with {} imported favorites.", imported)
            }
        }
    }
}

/// Apply a user's decision to the store. Cross-origin links are kept either way.
pub fn apply_import<B: StorageBackend>(
    store: &mut FavoritesStore<B>,
    pending: PendingImport,
    choice: ImportChoice,
) -> ImportOutcome {
    let imported = pending.entries.len();
    let outcome = match choice {
        ImportChoice::Cancel => ImportOutcome::Cancelled,
        _ if store.is_empty() => {
            store.replace(pending.entries);
            ImportOutcome::Imported { count: imported }
        }
        ImportChoice::Merge => {
            let added = store.merge(pending.entries);
            ImportOutcome::Merged { imported, added }
        }
        ImportChoice::Replace => {
            store.replace(pending.entries);
            ImportOutcome::Replaced { imported }
        }
    };
    log::info!("Import finished: {:?}", outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorite::PageInfo;
    use crate::storage::memory::{fixed_clock, test_store, MemoryStorage};

    const HOST: &str = "docs.example.com";
    const NOW: &str = "2024-10-28T10:30:00.000Z";

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::divider("Guides", NOW),
            Entry::link("Install", "https://docs.example.com/install", NOW),
            Entry::link("Upstream", "https://other.org/readme", NOW),
            Entry::link("Config", "https://docs.example.com/config/", NOW),
        ]
    }

    #[test]
    fn test_export_payload_shape() {
        let json = export_all(&sample_entries(), NOW).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "1.0");
        assert_eq!(value["exportDate"], NOW);
        assert_eq!(value["favorites"].as_array().unwrap().len(), 4);
        assert_eq!(value["favorites"][0]["kind"], "divider");
    }

    #[test]
    fn test_export_empty_is_refused() {
        assert_eq!(export_all(&[], NOW), Err(FavoritesError::NothingToExport));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(NOW), "favorites-2024-10-28.json");
    }

    #[test]
    fn test_parse_import_rejects_bad_shapes() {
        assert!(matches!(parse_import("not json"), Err(FavoritesError::InvalidFormat(_))));
        assert!(matches!(parse_import("[]"), Err(FavoritesError::InvalidFormat(_))));
        assert!(matches!(parse_import(r#"{"favorites": {}}"#), Err(FavoritesError::InvalidFormat(_))));
        assert!(matches!(parse_import(r#"{"version": "1.0"}"#), Err(FavoritesError::InvalidFormat(_))));
        assert_eq!(parse_import(r#"{"favorites": []}"#), Err(FavoritesError::EmptyImport));
    }

    #[test]
    fn test_parse_import_is_all_or_nothing() {
        let text = r#"{"favorites": [
            {"kind": "link", "title": "Ok", "url": "https://docs.example.com/ok", "dateAdded": ""},
            {"kind": "link", "title": "Broken"}
        ]}"#;
        assert!(matches!(parse_import(text), Err(FavoritesError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_import_accepts_legacy_export() {
        let text = r#"{"version": "1.0", "exportDate": "2023-01-01T00:00:00.000Z", "favorites": [
            {"title": "Old", "url": "https://docs.example.com/old", "dateAdded": "2023-01-01T00:00:00.000Z"}
        ]}"#;
        let entries = parse_import(text).unwrap();
        assert_eq!(entries[0].url(), Some("https://docs.example.com/old"));
    }

    #[test]
    fn test_classify() {
        let summary = ImportSummary::classify(&sample_entries(), HOST);

        assert_eq!(summary, ImportSummary { same_origin: 2, cross_origin: 1, dividers: 1 });
        assert_eq!(summary.links(), 3);
        assert!(!summary.all_cross_origin());
    }

    #[test]
    fn test_all_cross_origin_gate() {
        let entries = vec![
            Entry::divider("Elsewhere", NOW),
            Entry::link("A", "https://other.org/a", NOW),
            Entry::link("B", "not a url", NOW),
        ];
        let mut pending = PendingImport::new(entries, HOST);

        assert!(pending.summary.all_cross_origin());
        assert_eq!(pending.next_step(3), ImportStep::ConfirmCrossOrigin);
        pending.confirm_cross_origin();
        assert_eq!(pending.next_step(3), ImportStep::ChooseMode);
        assert_eq!(pending.next_step(0), ImportStep::Apply);
    }

    #[test]
    fn test_dividers_only_skip_gate() {
        let pending = PendingImport::new(vec![Entry::divider("Only", NOW)], HOST);
        assert_eq!(pending.next_step(0), ImportStep::Apply);
    }

    #[test]
    fn test_merge_import_counts() {
        let mut store = test_store(MemoryStorage::default());
        store.toggle(&PageInfo::new("Install", "https://docs.example.com/install/"));
        store.toggle(&PageInfo::new("FAQ", "https://docs.example.com/faq"));
        let existing = store.entries().to_vec();

        let pending = PendingImport::new(sample_entries(), HOST);
        let outcome = apply_import(&mut store, pending, ImportChoice::Merge);

        // 4 imported, 1 already present, 2 existing
        assert_eq!(outcome, ImportOutcome::Merged { imported: 4, added: 3 });
        assert_eq!(store.len(), 2 + (4 - 1));
        assert_eq!(&store.entries()[..2], &existing[..]);
        let new_titles: Vec<&str> = store.entries()[2..].iter().map(|e| e.title()).collect();
        assert_eq!(new_titles, vec!["Guides", "Upstream", "Config"]);
        assert_eq!(outcome.message(), "Successfully merged 4 favorites (3 new added).");
    }

    #[test]
    fn test_merge_keeps_cross_origin_entries() {
        let mut store = test_store(MemoryStorage::default());
        store.add_divider("Mine");

        let pending = PendingImport::new(vec![Entry::link("Upstream", "https://other.org/readme", NOW)], HOST);
        apply_import(&mut store, pending, ImportChoice::Merge);

        assert!(store.contains("https://other.org/readme"));
    }

    #[test]
    fn test_replace_import_is_exact() {
        let mut store = test_store(MemoryStorage::default());
        store.toggle(&PageInfo::new("FAQ", "https://docs.example.com/faq"));
        store.add_divider("Old section");

        let pending = PendingImport::new(sample_entries(), HOST);
        let outcome = apply_import(&mut store, pending, ImportChoice::Replace);

        assert_eq!(outcome, ImportOutcome::Replaced { imported: 4 });
        assert_eq!(store.entries(), &sample_entries()[..]);
        assert_eq!(store.list(), sample_entries());
    }

    #[test]
    fn test_cancel_leaves_store_untouched() {
        let mut store = test_store(MemoryStorage::default());
        store.add_divider("Keep me");
        let before = store.list();

        let pending = PendingImport::new(sample_entries(), HOST);
        assert_eq!(apply_import(&mut store, pending, ImportChoice::Cancel), ImportOutcome::Cancelled);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_import_into_empty_store() {
        let mut store = test_store(MemoryStorage::default());

        let pending = PendingImport::new(sample_entries(), HOST);
        let outcome = apply_import(&mut store, pending, ImportChoice::Merge);

        assert_eq!(outcome, ImportOutcome::Imported { count: 4 });
        assert_eq!(store.entries(), &sample_entries()[..]);
    }

    #[test]
    fn test_export_then_replace_round_trip() {
        let mut source = test_store(MemoryStorage::default());
        source.replace(sample_entries());
        source.move_to(3, 0).unwrap();
        let json = export_all(source.entries(), &fixed_clock()).unwrap();

        let mut target = test_store(MemoryStorage::default());
        target.add_divider("Something else");
        let pending = PendingImport::new(parse_import(&json).unwrap(), HOST);
        apply_import(&mut target, pending, ImportChoice::Replace);

        assert_eq!(target.entries(), source.entries());
    }
}
