/// Favorites sequence operations: toggle, reorder, merge, etc.

use crate::error::FavoritesError;
use crate::favorite::{Entry, Membership, PageInfo};
use crate::urls::resolve_relative;

/// Position of the link matching `url` by normalized URL
pub fn find_link(entries: &[Entry], url: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.is_link_to(url))
}

pub fn contains(entries: &[Entry], url: &str) -> bool {
    find_link(entries, url).is_some()
}

/// Remove the matching link if present, otherwise append one stamped `now`
pub fn toggle(entries: &mut Vec<Entry>, page: &PageInfo, now: &str) -> Membership {
    match find_link(entries, &page.url) {
        Some(index) => {
            entries.remove(index);
            Membership::Removed
        }
        None => {
            entries.push(Entry::link(page.title.clone(), page.url.clone(), now));
            Membership::Added
        }
    }
}

/// Remove the link matching `url`; false if there was none
pub fn remove_url(entries: &mut Vec<Entry>, url: &str) -> bool {
    match find_link(entries, url) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

pub fn remove_at(entries: &mut Vec<Entry>, index: usize) -> Result<Entry, FavoritesError> {
    if index >= entries.len() {
        return Err(FavoritesError::IndexOutOfRange { index, len: entries.len() });
    }
    Ok(entries.remove(index))
}

pub fn rename_divider(entries: &mut [Entry], index: usize, new_title: String) -> Result<(), FavoritesError> {
    let len = entries.len();
    match entries.get_mut(index) {
        Some(Entry::Divider { title, .. }) => {
            *title = new_title;
            Ok(())
        }
        Some(Entry::Link { .. }) => Err(FavoritesError::NotADivider(index)),
        None => Err(FavoritesError::IndexOutOfRange { index, len }),
    }
}

/// Remove the entry at `from`, then insert it at `to`.
///
/// `to` is an index into the sequence *after* removal, so moving item 0 to
/// index 2 leaves it third with the old items 1 and 2 shifted up by one.
pub fn move_to(entries: &mut Vec<Entry>, from: usize, to: usize) -> Result<(), FavoritesError> {
    let len = entries.len();
    if from >= len {
        return Err(FavoritesError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(FavoritesError::IndexOutOfRange { index: to, len });
    }
    if from != to {
        let entry = entries.remove(from);
        entries.insert(to, entry);
    }
    Ok(())
}

/// Append imported entries whose URL is not already present (dividers always
/// appended). Duplicates inside the import itself are also collapsed. Returns
/// the number of entries added.
pub fn merge(entries: &mut Vec<Entry>, imported: Vec<Entry>) -> usize {
    let before = entries.len();
    for entry in imported {
        let duplicate = match entry.url() {
            Some(url) => contains(entries, url),
            None => false,
        };
        if !duplicate {
            entries.push(entry);
        }
    }
    entries.len() - before
}

/// Rewrite relative link URLs as absolute ones against `base`; returns how many changed
pub fn resolve_relative_links(entries: &mut [Entry], base: &str) -> usize {
    let mut resolved = 0;
    for entry in entries.iter_mut() {
        if let Entry::Link { url, .. } = entry {
            if let Some(absolute) = resolve_relative(url, base) {
                *url = absolute;
                resolved += 1;
            }
        }
    }
    resolved
}

/// Link entries only, in sequence order, paired with their index
pub fn links(entries: &[Entry]) -> impl Iterator<Item = (usize, &Entry)> {
    entries.iter().enumerate().filter(|(_, entry)| !entry.is_divider())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::urls::normalize_url;

    const NOW: &str = "2024-10-28T10:30:00.000Z";

    fn create_test_link(n: usize) -> Entry {
        Entry::link(format!("Page {}", n), format!("https://docs.example.com/page-{}", n), NOW)
    }

    fn titles(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.title()).collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut entries = vec![create_test_link(1)];
        let page = PageInfo::new("Guide", "https://docs.example.com/guide/");

        assert_eq!(toggle(&mut entries, &page, NOW), Membership::Added);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].date_added(), NOW);

        let membership = toggle(&mut entries, &page, NOW);
        assert_eq!(membership, Membership::Removed);
        assert!(!membership.is_favorited());
        assert_eq!(entries, vec![create_test_link(1)]);
    }

    #[test]
    fn test_toggle_matches_normalized_url() {
        let mut entries = vec![Entry::link("Guide", "https://docs.example.com/guide", NOW)];
        let page = PageInfo::new("Guide", "http://DOCS.example.com/guide/?tab=2#top");

        assert_eq!(toggle(&mut entries, &page, NOW), Membership::Removed);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let mut entries = Vec::new();
        let urls = [
            "https://docs.example.com/a",
            "https://docs.example.com/a/",
            "https://docs.example.com/b",
            "https://Docs.Example.com/a",
            "https://docs.example.com/b#x",
            "https://docs.example.com/c",
        ];
        for url in urls {
            toggle(&mut entries, &PageInfo::new("t", url), NOW);
        }

        let keys: Vec<String> = entries.iter().filter_map(|e| e.url()).map(normalize_url).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn test_toggle_ignores_dividers() {
        let mut entries = vec![Entry::divider("https://docs.example.com/a", NOW)];
        let page = PageInfo::new("A", "https://docs.example.com/a");

        assert_eq!(toggle(&mut entries, &page, NOW), Membership::Added);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_remove_url() {
        let mut entries = vec![create_test_link(1), create_test_link(2)];

        assert!(remove_url(&mut entries, "https://docs.example.com/page-1/"));
        assert!(!remove_url(&mut entries, "https://docs.example.com/page-9"));
        assert_eq!(titles(&entries), vec!["Page 2"]);
    }

    #[test]
    fn test_remove_at() {
        let mut entries = vec![create_test_link(1), Entry::divider("Section", NOW), create_test_link(2)];

        let removed = remove_at(&mut entries, 1).unwrap();
        assert!(removed.is_divider());
        assert_eq!(titles(&entries), vec!["Page 1", "Page 2"]);
        assert_eq!(
            remove_at(&mut entries, 2),
            Err(FavoritesError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_rename_divider() {
        let mut entries = vec![create_test_link(1), Entry::divider("New section", NOW)];

        rename_divider(&mut entries, 1, "Tutorials".to_string()).unwrap();
        assert_eq!(entries[1].title(), "Tutorials");
        assert_eq!(entries[1].date_added(), NOW);

        assert_eq!(
            rename_divider(&mut entries, 0, "x".to_string()),
            Err(FavoritesError::NotADivider(0))
        );
        assert!(rename_divider(&mut entries, 5, "x".to_string()).is_err());
    }

    #[test]
    fn test_move_to_forward_is_remove_then_insert() {
        let mut entries: Vec<Entry> = (0..5).map(create_test_link).collect();

        move_to(&mut entries, 0, 2).unwrap();

        assert_eq!(titles(&entries), vec!["Page 1", "Page 2", "Page 0", "Page 3", "Page 4"]);
    }

    #[test]
    fn test_move_to_backward() {
        let mut entries: Vec<Entry> = (0..5).map(create_test_link).collect();

        move_to(&mut entries, 4, 1).unwrap();

        assert_eq!(titles(&entries), vec!["Page 0", "Page 4", "Page 1", "Page 2", "Page 3"]);
    }

    #[test]
    fn test_move_to_preserves_relative_order() {
        let original: Vec<Entry> = (0..6).map(create_test_link).collect();
        for from in 0..6 {
            for to in 0..6 {
                let mut entries = original.clone();
                move_to(&mut entries, from, to).unwrap();

                assert_eq!(entries[to], original[from]);
                let mut rest = entries.clone();
                rest.remove(to);
                let mut expected = original.clone();
                expected.remove(from);
                assert_eq!(rest, expected);
            }
        }
    }

    #[test]
    fn test_move_to_out_of_range() {
        let mut entries: Vec<Entry> = (0..3).map(create_test_link).collect();

        assert!(move_to(&mut entries, 3, 0).is_err());
        assert!(move_to(&mut entries, 0, 3).is_err());
        assert_eq!(titles(&entries), vec!["Page 0", "Page 1", "Page 2"]);
    }

    #[test]
    fn test_merge_skips_existing_and_keeps_order() {
        let mut entries = vec![create_test_link(1), create_test_link(2), create_test_link(3)];
        let existing = entries.clone();
        let imported = vec![
            create_test_link(4),
            Entry::link("Dup", "https://docs.example.com/page-2/", NOW),
            create_test_link(5),
            Entry::link("Dup", "https://DOCS.example.com/page-1", NOW),
        ];

        let added = merge(&mut entries, imported);

        assert_eq!(added, 2);
        assert_eq!(entries.len(), 3 + (4 - 2));
        assert_eq!(&entries[..3], &existing[..]);
        assert_eq!(titles(&entries[3..]), vec!["Page 4", "Page 5"]);
    }

    #[test]
    fn test_merge_always_appends_dividers() {
        let mut entries = vec![Entry::divider("Guides", NOW)];

        let added = merge(&mut entries, vec![Entry::divider("Guides", NOW), Entry::divider("API", NOW)]);

        assert_eq!(added, 2);
        assert_eq!(titles(&entries), vec!["Guides", "Guides", "API"]);
    }

    #[test]
    fn test_resolve_relative_links() {
        let mut entries = vec![
            Entry::link("Oldest", "/docs/oldest.html", NOW),
            Entry::divider("/not/a/url", NOW),
            create_test_link(1),
        ];

        let resolved = resolve_relative_links(&mut entries, "https://docs.example.com/index.html");

        assert_eq!(resolved, 1);
        assert_eq!(entries[0].url(), Some("https://docs.example.com/docs/oldest.html"));
        assert_eq!(entries[1].title(), "/not/a/url");
        assert_eq!(entries[2], create_test_link(1));
    }

    #[test]
    fn test_links_skips_dividers() {
        let entries = vec![Entry::divider("S", NOW), create_test_link(1), create_test_link(2)];
        let indices: Vec<usize> = links(&entries).map(|(i, _)| i).collect();

        assert_eq!(indices, vec![1, 2]);
    }
}
