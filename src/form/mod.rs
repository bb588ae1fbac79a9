//! End-to-end workflow over a single form.

use crate::error::{FormError, SchemaError, SubmissionError, TraversalError};
use crate::fill::FillStrategy;
use crate::graph::{PageGraph, TransitionTable};
use crate::render::SchemaFormatter;
use crate::schema::{
    self, DecodedForm, EMAIL_FIELD_ID, FieldDescriptor, FieldValue, PAGE_HISTORY_FIELD_ID,
};
use crate::submission::{SubmissionPayload, form_response_url};
use crate::transport::{SchemaSource, SubmissionTransport};
use crate::traversal::{Traversal, TraversalOptions, TraversalOutcome};
use itertools::Itertools;
use tracing::info;

/// A decoded form with its page graph and resolved transitions.
#[derive(Debug, Clone)]
pub struct Form {
    response_url: String,
    graph: PageGraph,
    transitions: TransitionTable,
    traversal: TraversalOptions,
}

pub struct FormBuilder<'a, S: SchemaSource + ?Sized> {
    source: &'a S,
    only_required: bool,
    traversal: TraversalOptions,
}

impl<'a, S: SchemaSource + ?Sized> FormBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            only_required: false,
            traversal: TraversalOptions::default(),
        }
    }

    /// Keep only required fields.
    pub fn only_required(mut self, only_required: bool) -> Self {
        self.only_required = only_required;
        self
    }

    pub fn traversal_options(mut self, options: TraversalOptions) -> Self {
        self.traversal = options;
        self
    }

    /// Fetches the form page behind `url` and decodes it.
    pub fn fetch(self, url: &str) -> Result<Form, SchemaError> {
        let response_url = form_response_url(url);
        let html = self.source.fetch(&response_url)?;
        let decoded = schema::decode_page(&html, self.only_required)?;
        Ok(Form::from_decoded(url, decoded).with_traversal_options(self.traversal))
    }
}

impl Form {
    pub fn builder<S: SchemaSource + ?Sized>(source: &S) -> FormBuilder<'_, S> {
        FormBuilder::new(source)
    }

    /// Builds the page graph and transition table of an already decoded form.
    pub fn from_decoded(url: &str, decoded: DecodedForm) -> Self {
        let graph = PageGraph::build(decoded);
        let transitions = TransitionTable::resolve(&graph);
        Self {
            response_url: form_response_url(url),
            graph,
            transitions,
            traversal: TraversalOptions::default(),
        }
    }

    pub fn with_traversal_options(mut self, options: TraversalOptions) -> Self {
        self.traversal = options;
        self
    }

    pub fn response_url(&self) -> &str {
        &self.response_url
    }

    pub fn graph(&self) -> &PageGraph {
        &self.graph
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Walks the form with `strategy` and returns the filled fields.
    pub fn fill<F: FillStrategy + ?Sized>(
        &self,
        strategy: &mut F,
    ) -> Result<TraversalOutcome, TraversalError> {
        Traversal::new(&self.graph, &self.transitions)
            .with_options(self.traversal)
            .run(strategy)
    }

    /// Every field of every page plus the bookkeeping fields, without answers.
    ///
    /// The page history is pre-set to the full page range.
    pub fn listing_fields(&self) -> Vec<FieldDescriptor> {
        let mut fields: Vec<FieldDescriptor> = self.graph.fields().cloned().collect();
        if self.graph.collects_email() {
            fields.push(FieldDescriptor::bookkeeping(EMAIL_FIELD_ID, "Email Address", true));
        }
        if self.graph.len() > 1 {
            let mut history = FieldDescriptor::bookkeeping(PAGE_HISTORY_FIELD_ID, "Page History", false);
            history.resolved_value = Some(FieldValue::Text((0..self.graph.len()).join(",")));
            fields.push(history);
        }
        fields
    }

    /// The commented listing of every field.
    pub fn render(&self, with_comment: bool) -> String {
        SchemaFormatter::format_fields(&self.listing_fields(), with_comment)
    }

    pub fn submit<T: SubmissionTransport + ?Sized>(
        &self,
        transport: &T,
        payload: &SubmissionPayload,
    ) -> Result<(), SubmissionError> {
        transport.submit(&self.response_url, payload)
    }

    /// Fills the form and submits the answers, returning what was sent.
    pub fn fill_and_submit<F, T>(
        &self,
        strategy: &mut F,
        transport: &T,
    ) -> Result<SubmissionPayload, FormError>
    where
        F: FillStrategy + ?Sized,
        T: SubmissionTransport + ?Sized,
    {
        let payload = self.fill(strategy)?.to_payload();
        self.submit(transport, &payload)?;
        info!(url = %self.response_url, fields = payload.len(), "form submitted");
        Ok(payload)
    }
}
