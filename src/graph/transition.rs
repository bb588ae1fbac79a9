use super::PageGraph;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Where the traversal goes after a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Transition {
    Page(usize),
    /// Terminal sentinel: submit the form now.
    Submit,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Page(index) => write!(f, "page {}", index),
            Transition::Submit => write!(f, "submit"),
        }
    }
}

/// Default transitions per page plus option-level overrides per field.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    defaults: Vec<Transition>,
    /// `branches[page][field]` maps an option label to its transition.
    branches: Vec<Vec<AHashMap<String, Transition>>>,
}

impl TransitionTable {
    /// Resolves every page's default transition and every option jump.
    ///
    /// Page-level targets that do not resolve fall back to the next page.
    /// Option-level targets that do not resolve go to page 0.
    pub fn resolve(graph: &PageGraph) -> Self {
        let page_count = graph.len();
        let positional = |index: usize| {
            if index + 1 < page_count {
                Transition::Page(index + 1)
            } else {
                Transition::Submit
            }
        };

        let defaults: Vec<Transition> = graph
            .pages()
            .iter()
            .map(|page| match page.jump_target {
                None => positional(page.index),
                Some(target) if Some(target) == page.provider_page_id => Transition::Submit,
                Some(target) => match graph.index_of(target) {
                    Some(index) => Transition::Page(index),
                    None => {
                        warn!(
                            page = page.index,
                            provider_id = target,
                            "unresolved page reference, falling back to next page"
                        );
                        positional(page.index)
                    }
                },
            })
            .collect();

        let branches: Vec<Vec<AHashMap<String, Transition>>> = graph
            .pages()
            .iter()
            .map(|page| {
                page.fields
                    .iter()
                    .map(|field| {
                        field
                            .option_next_page
                            .iter()
                            .map(|(label, &target)| {
                                let transition = if Some(target) == page.provider_page_id {
                                    Transition::Submit
                                } else if let Some(index) = graph.index_of(target) {
                                    Transition::Page(index)
                                } else {
                                    warn!(
                                        page = page.index,
                                        field = %field.id,
                                        option = %label,
                                        provider_id = target,
                                        "unresolved page reference on option, falling back to page 0"
                                    );
                                    Transition::Page(0)
                                };
                                (label.clone(), transition)
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        Self { defaults, branches }
    }

    /// The transition taken after `page` when no answer redirects it.
    pub fn default_next(&self, page: usize) -> Transition {
        self.defaults.get(page).copied().unwrap_or(Transition::Submit)
    }

    /// The override triggered by choosing `option` on the `field`-th field of `page`.
    pub fn branch(&self, page: usize, field: usize, option: &str) -> Option<Transition> {
        self.branches.get(page)?.get(field)?.get(option).copied()
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}
