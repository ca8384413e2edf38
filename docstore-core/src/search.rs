//! Search criteria for querying stored documents.
//!
//! A [`SearchRequest`] holds independently optional criteria. Every criterion that is
//! present must match (logical AND); a request with no criteria matches every document.
//!
//! # Request Building
//!
//! ```ignore
//! use docstore::search::SearchRequest;
//!
//! let request = SearchRequest::builder()
//!     .title_prefix("Release")
//!     .author_id("a-1")
//!     .created_to(chrono::Utc::now())
//!     .build();
//! ```
//!
//! # Evaluation
//!
//! Backends evaluate a request by decomposing it into [`Criterion`] values with
//! [`SearchRequest::criteria`] and walking them with a [`CriteriaVisitor`]. Both time
//! bounds are inclusive.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::error::DocumentStoreError;

/// A filter specification for searching documents.
///
/// Empty prefix or author sets mean "no filter" for that criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Matches documents whose title starts with any of these prefixes (case-sensitive).
    pub title_prefixes: BTreeSet<String>,
    /// Matches documents whose author id is one of these.
    pub author_ids: BTreeSet<String>,
    /// Inclusive lower bound on the creation time.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the creation time.
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    /// Creates a request that matches every stored document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a new request builder for fluent construction.
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }

    /// Returns true if the request carries no criteria at all.
    pub fn is_unfiltered(&self) -> bool {
        self.criteria().is_empty()
    }

    /// Decomposes the request into the criteria that are actually present.
    pub fn criteria(&self) -> Vec<Criterion<'_>> {
        let mut criteria = Vec::with_capacity(4);

        if !self.title_prefixes.is_empty() {
            criteria.push(Criterion::TitlePrefix(&self.title_prefixes));
        }
        if !self.author_ids.is_empty() {
            criteria.push(Criterion::AuthorIn(&self.author_ids));
        }
        if let Some(from) = self.created_from {
            criteria.push(Criterion::CreatedFrom(from));
        }
        if let Some(to) = self.created_to {
            criteria.push(Criterion::CreatedTo(to));
        }

        criteria
    }
}

/// A single criterion borrowed from a [`SearchRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<'a> {
    /// Title starts with any of the prefixes.
    TitlePrefix(&'a BTreeSet<String>),
    /// Author id is a member of the set.
    AuthorIn(&'a BTreeSet<String>),
    /// Created at or after the instant.
    CreatedFrom(DateTime<Utc>),
    /// Created at or before the instant.
    CreatedTo(DateTime<Utc>),
}

#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    /// Creates a new request builder.
    pub fn new() -> Self {
        SearchRequestBuilder { request: SearchRequest::default() }
    }

    /// Replaces the set of title prefixes.
    pub fn title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.title_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single title prefix.
    pub fn title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.request.title_prefixes.insert(prefix.into());
        self
    }

    /// Replaces the set of author ids.
    pub fn author_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.author_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single author id.
    pub fn author_id(mut self, id: impl Into<String>) -> Self {
        self.request.author_ids.insert(id.into());
        self
    }

    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.request.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.request.created_to = Some(to);
        self
    }

    /// Builds and returns the final request.
    pub fn build(self) -> SearchRequest {
        self.request
    }
}

/// Walks the criteria of a request.
///
/// [`visit_all`](CriteriaVisitor::visit_all) combines the results with logical AND and
/// stops at the first criterion that does not match.
pub trait CriteriaVisitor {
    type Error: Into<DocumentStoreError>;

    fn visit_title_prefix(&mut self, prefixes: &BTreeSet<String>) -> Result<bool, Self::Error>;
    fn visit_author_in(&mut self, ids: &BTreeSet<String>) -> Result<bool, Self::Error>;
    fn visit_created_from(&mut self, from: DateTime<Utc>) -> Result<bool, Self::Error>;
    fn visit_created_to(&mut self, to: DateTime<Utc>) -> Result<bool, Self::Error>;

    fn visit_criterion(&mut self, criterion: &Criterion<'_>) -> Result<bool, Self::Error> {
        match criterion {
            Criterion::TitlePrefix(prefixes) => self.visit_title_prefix(prefixes),
            Criterion::AuthorIn(ids) => self.visit_author_in(ids),
            Criterion::CreatedFrom(from) => self.visit_created_from(*from),
            Criterion::CreatedTo(to) => self.visit_created_to(*to),
        }
    }

    fn visit_all(&mut self, request: &SearchRequest) -> Result<bool, Self::Error> {
        for criterion in request.criteria() {
            if !self.visit_criterion(&criterion)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn default_request_has_no_criteria() {
        assert!(SearchRequest::all().is_unfiltered());
        assert_eq!(SearchRequest::builder().build(), SearchRequest::default());
    }

    #[test]
    fn empty_sets_are_not_criteria() {
        let request = SearchRequest::builder()
            .title_prefixes(Vec::<String>::new())
            .author_ids(Vec::<String>::new())
            .build();

        assert!(request.is_unfiltered());
    }

    #[test]
    fn criteria_lists_present_fields_only() {
        let now = Utc::now();
        let request = SearchRequest::builder()
            .title_prefix("Title")
            .created_to(now)
            .build();

        let criteria = request.criteria();
        assert_eq!(criteria.len(), 2);
        assert!(matches!(criteria[0], Criterion::TitlePrefix(set) if set.contains("Title")));
        assert_eq!(criteria[1], Criterion::CreatedTo(now));
    }

    #[test]
    fn builder_accumulates_single_values() {
        let request = SearchRequest::builder()
            .author_id("a")
            .author_id("b")
            .author_id("a")
            .build();

        assert_eq!(request.author_ids.len(), 2);
    }

    struct Recorder {
        seen: Vec<&'static str>,
        answer: bool,
    }

    impl CriteriaVisitor for Recorder {
        type Error = DocumentStoreError;

        fn visit_title_prefix(&mut self, _: &BTreeSet<String>) -> Result<bool, Self::Error> {
            self.seen.push("title");
            Ok(self.answer)
        }

        fn visit_author_in(&mut self, _: &BTreeSet<String>) -> Result<bool, Self::Error> {
            self.seen.push("author");
            Ok(self.answer)
        }

        fn visit_created_from(&mut self, _: DateTime<Utc>) -> Result<bool, Self::Error> {
            self.seen.push("from");
            Ok(self.answer)
        }

        fn visit_created_to(&mut self, _: DateTime<Utc>) -> Result<bool, Self::Error> {
            self.seen.push("to");
            Ok(self.answer)
        }
    }

    #[test]
    fn visit_all_short_circuits_on_mismatch() {
        let now = Utc::now();
        let request = SearchRequest::builder()
            .title_prefix("x")
            .author_id("y")
            .created_from(now - Duration::hours(1))
            .created_to(now)
            .build();

        let mut rejecting = Recorder { seen: vec![], answer: false };
        assert!(!rejecting.visit_all(&request).unwrap());
        assert_eq!(rejecting.seen, vec!["title"]);

        let mut accepting = Recorder { seen: vec![], answer: true };
        assert!(accepting.visit_all(&request).unwrap());
        assert_eq!(accepting.seen, vec!["title", "author", "from", "to"]);
    }

    #[test]
    fn empty_request_matches_without_visiting() {
        let mut visitor = Recorder { seen: vec![], answer: false };

        assert!(visitor.visit_all(&SearchRequest::all()).unwrap());
        assert!(visitor.seen.is_empty());
    }
}
