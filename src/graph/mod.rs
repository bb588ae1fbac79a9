//! Page partitioning of a decoded form.

use crate::schema::{DecodedForm, FieldDescriptor, RawEntry};
use ahash::AHashMap;
use serde::Serialize;
use tracing::{debug, warn};

pub mod transition;

pub use transition::{Transition, TransitionTable};

/// A contiguous run of fields shown together before a page break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Position in traversal order, starting at 0.
    pub index: usize,
    /// Id of the page break that opens this page. `None` for the implicit first page.
    pub provider_page_id: Option<i64>,
    pub title: String,
    /// Page-level jump declared on the opening page break.
    pub jump_target: Option<i64>,
    pub fields: Vec<FieldDescriptor>,
}

impl Page {
    fn new(index: usize, provider_page_id: Option<i64>, title: String, jump_target: Option<i64>) -> Self {
        Self {
            index,
            provider_page_id,
            title,
            jump_target,
            fields: Vec::new(),
        }
    }
}

/// Pages of a form plus the map from provider page ids to page indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGraph {
    pages: Vec<Page>,
    provider_index: AHashMap<i64, usize>,
    collects_email: bool,
}

impl PageGraph {
    /// Partitions the decoded entries into pages at every page break.
    ///
    /// There is always at least one page. Empty pages keep their slot so that
    /// indices stay contiguous.
    pub fn build(form: DecodedForm) -> Self {
        let mut pages = Vec::new();
        let mut provider_index = AHashMap::new();
        let mut current = Page::new(0, None, String::new(), None);

        for entry in form.entries {
            match entry {
                RawEntry::PageBreak(marker) => {
                    let index = current.index + 1;
                    pages.push(current);
                    if provider_index.insert(marker.provider_id, index).is_some() {
                        warn!(
                            provider_id = marker.provider_id,
                            page = index,
                            "duplicate page id in schema, later page wins"
                        );
                    }
                    current = Page::new(index, Some(marker.provider_id), marker.title, marker.jump_target);
                }
                RawEntry::Question { fields, .. } => current.fields.extend(fields),
            }
        }
        pages.push(current);

        debug!(pages = pages.len(), "page graph built");
        Self {
            pages,
            provider_index,
            collects_email: form.collects_email,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Never true: a graph always holds at least the implicit first page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Looks up the page opened by the page break with this provider id.
    pub fn index_of(&self, provider_id: i64) -> Option<usize> {
        self.provider_index.get(&provider_id).copied()
    }

    pub fn collects_email(&self) -> bool {
        self.collects_email
    }

    /// Every field of the form, in page order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.pages.iter().flat_map(|page| page.fields.iter())
    }
}
