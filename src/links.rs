// src/links.rs
// =============================================================================
// The link set shared by page extraction and the crawl controller.
//
// A LinkSet holds unique absolute URLs. Two URLs are the same link when their
// serialized forms are byte-equal; nothing is normalized beyond what URL
// resolution already did. Iteration follows insertion order, so a set built
// from the same pages in the same order always iterates the same way.
// =============================================================================

use indexmap::IndexSet;
use url::Url;

// Url hashes and compares by its serialized form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: IndexSet<Url>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link, returning false when it was already present.
    pub fn insert(&mut self, url: Url) -> bool {
        self.links.insert(url)
    }

    /// Merges another set into this one, keeping first-seen order.
    pub fn merge(&mut self, other: &LinkSet) {
        for url in other.iter() {
            self.insert(url.clone());
        }
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.links.contains(url)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.links.iter()
    }

    pub fn into_vec(self) -> Vec<Url> {
        self.links.into_iter().collect()
    }
}

impl Extend<Url> for LinkSet {
    fn extend<I: IntoIterator<Item = Url>>(&mut self, iter: I) {
        for url in iter {
            self.insert(url);
        }
    }
}

impl FromIterator<Url> for LinkSet {
    fn from_iter<I: IntoIterator<Item = Url>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        set.extend(iter);
        set
    }
}
