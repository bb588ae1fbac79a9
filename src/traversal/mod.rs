//! Walking the page graph with a fill strategy.
//!
//! The walk starts at page 0 and fills every field of the current page in
//! order. The page's default transition is taken unless an answer matches
//! one of its field's option jumps, in which case the last matching field
//! decides. The walk ends on [`Transition::Submit`].

use crate::error::TraversalError;
use crate::fill::{FillRequest, FillStrategy};
use crate::graph::{PageGraph, Transition, TransitionTable};
use crate::schema::{EMAIL_FIELD_ID, FieldDescriptor, FieldValue, PAGE_HISTORY_FIELD_ID};
use itertools::Itertools;
use tracing::{debug, trace};

/// Default cap on page visits per traversal.
pub const DEFAULT_MAX_STEPS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Maximum number of page visits before the walk is aborted.
    pub max_steps: usize,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// The answers collected by one walk, in fill order.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalOutcome {
    /// Filled fields, in visiting order. Includes the email field when requested.
    pub fields: Vec<FieldDescriptor>,
    /// Page indices in the order they were visited.
    pub visited: Vec<usize>,
    /// Number of pages of the whole form.
    pub page_count: usize,
}

impl TraversalOutcome {
    /// The page history bookkeeping value.
    ///
    /// This is the index range `0..visited.len()` joined with commas, not the
    /// literal visited path.
    pub fn page_history(&self) -> String {
        (0..self.visited.len()).join(",")
    }

    /// The page history as a bookkeeping field, for multi-page forms only.
    pub fn page_history_field(&self) -> Option<FieldDescriptor> {
        if self.page_count <= 1 {
            return None;
        }
        let mut field = FieldDescriptor::bookkeeping(PAGE_HISTORY_FIELD_ID, "Page History", false);
        field.resolved_value = Some(FieldValue::Text(self.page_history()));
        Some(field)
    }
}

/// Walks a page graph from page 0 to the submit sentinel.
pub struct Traversal<'a> {
    graph: &'a PageGraph,
    transitions: &'a TransitionTable,
    options: TraversalOptions,
}

impl<'a> Traversal<'a> {
    pub fn new(graph: &'a PageGraph, transitions: &'a TransitionTable) -> Self {
        Self {
            graph,
            transitions,
            options: TraversalOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TraversalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run<S: FillStrategy + ?Sized>(
        &self,
        strategy: &mut S,
    ) -> Result<TraversalOutcome, TraversalError> {
        let mut fields = Vec::new();
        let mut visited = Vec::new();
        let mut current = 0;

        loop {
            if visited.len() >= self.options.max_steps {
                return Err(TraversalError::StepLimitExceeded {
                    limit: self.options.max_steps,
                    page: current,
                });
            }
            visited.push(current);

            let Some(page) = self.graph.page(current) else {
                break;
            };
            let mut next = self.transitions.default_next(current);

            for (position, field) in page.fields.iter().enumerate() {
                let value = fill_field(strategy, field)?;
                if let Some(jump) = value
                    .as_scalar()
                    .and_then(|chosen| self.transitions.branch(current, position, chosen))
                {
                    trace!(page = current, field = %field.id, %jump, "answer redirects traversal");
                    next = jump;
                }
                let mut filled = field.clone();
                filled.resolved_value = Some(value);
                fields.push(filled);
            }

            debug!(page = current, %next, "page filled");
            match next {
                Transition::Page(index) => current = index,
                Transition::Submit => break,
            }
        }

        if self.graph.collects_email() {
            let mut email = FieldDescriptor::bookkeeping(EMAIL_FIELD_ID, "Email Address", true);
            email.resolved_value = Some(fill_field(strategy, &email)?);
            fields.push(email);
        }

        Ok(TraversalOutcome {
            fields,
            visited,
            page_count: self.graph.len(),
        })
    }
}

fn fill_field<S: FillStrategy + ?Sized>(
    strategy: &mut S,
    field: &FieldDescriptor,
) -> Result<FieldValue, TraversalError> {
    let options = field.selectable_options();
    let request = FillRequest {
        kind: field.kind,
        id: &field.id,
        options: options.as_deref(),
        required: field.required,
        container_name: &field.container_name,
        sub_label: field.sub_label.as_deref(),
    };
    strategy.fill(&request).map_err(TraversalError::Strategy)
}
