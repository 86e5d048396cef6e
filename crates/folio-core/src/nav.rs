//! Navigation link highlighting.

use crate::prefs::{PreferenceStore, keys};

/// Class marking the current page's link.
pub const ACTIVE_CLASS: &str = "active";

/// Final path segment of a URL path or href, without query or fragment.
///
/// `"/work/about.html?x=1"` → `"about.html"`, `"/"` → `""`.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    path.rsplit('/').next().unwrap_or(path)
}

/// Tracks which nav link is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavHighlighter {
    pages: Vec<String>,
    active: Option<usize>,
}

impl NavHighlighter {
    /// Match `current_path` against each link's href.
    ///
    /// A bare directory path resolves to `index_document`. Only the first
    /// matching link is marked.
    #[must_use]
    pub fn new<'a>(
        current_path: &str,
        hrefs: impl IntoIterator<Item = &'a str>,
        index_document: &str,
    ) -> Self {
        let resolve = |segment: &str| {
            if segment.is_empty() {
                index_document.to_string()
            } else {
                segment.to_string()
            }
        };
        let current = resolve(last_segment(current_path));
        let pages: Vec<String> = hrefs
            .into_iter()
            .map(|href| resolve(last_segment(href)))
            .collect();
        let active = pages.iter().position(|page| *page == current);
        tracing::debug!(page = %current, links = pages.len(), ?active, "nav highlight");
        Self { pages, active }
    }

    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Per-link `active` class presence, in link order.
    #[must_use]
    pub fn states(&self) -> Vec<bool> {
        (0..self.pages.len())
            .map(|i| Some(i) == self.active)
            .collect()
    }

    /// Optimistically mark a clicked link and remember the internal navigation
    /// so the next page skips the splash.
    pub fn click(&mut self, index: usize, session: &dyn PreferenceStore) {
        if index >= self.pages.len() {
            return;
        }
        self.active = Some(index);
        if let Err(err) = session.set(keys::NAV_CLICK, "true") {
            tracing::warn!(store = session.name(), error = %err, "failed to set nav flag");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use pretty_assertions::assert_eq;

    const LINKS: [&str; 3] = ["index.html", "work/projects.html", "/about.html#me"];

    #[test]
    fn last_segment_cases() {
        assert_eq!(last_segment("/a/b/c.html"), "c.html");
        assert_eq!(last_segment("c.html?x=/y"), "c.html");
        assert_eq!(last_segment("/"), "");
        assert_eq!(last_segment(""), "");
        assert_eq!(last_segment("/dir/#top"), "");
    }

    #[test]
    fn marks_matching_link() {
        let nav = NavHighlighter::new("/site/projects.html", LINKS, "index.html");
        assert_eq!(nav.active(), Some(1));
        assert_eq!(nav.states(), vec![false, true, false]);
    }

    #[test]
    fn root_path_resolves_to_index() {
        let nav = NavHighlighter::new("/", LINKS, "index.html");
        assert_eq!(nav.active(), Some(0));
    }

    #[test]
    fn no_match_marks_nothing() {
        let nav = NavHighlighter::new("/contact.html", LINKS, "index.html");
        assert_eq!(nav.active(), None);
        assert_eq!(nav.states(), vec![false, false, false]);
    }

    #[test]
    fn duplicate_targets_mark_first_only() {
        let nav = NavHighlighter::new("/about.html", ["about.html", "/about.html"], "index.html");
        assert_eq!(nav.states(), vec![true, false]);
    }

    #[test]
    fn click_moves_active_and_sets_flag() {
        let session = MemoryStore::new();
        let mut nav = NavHighlighter::new("/about.html", LINKS, "index.html");
        nav.click(0, &session);
        assert_eq!(nav.states(), vec![true, false, false]);
        assert_eq!(session.get(keys::NAV_CLICK).as_deref(), Some("true"));
    }

    #[test]
    fn click_out_of_range_ignored() {
        let session = MemoryStore::new();
        let mut nav = NavHighlighter::new("/about.html", LINKS, "index.html");
        nav.click(9, &session);
        assert_eq!(nav.active(), Some(2));
        assert!(session.is_empty());
    }
}
