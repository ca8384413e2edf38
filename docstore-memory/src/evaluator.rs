//! Search criteria evaluation for in-memory document filtering.

use chrono::{DateTime, Utc};
use std::{collections::BTreeSet, convert::Infallible};

use docstore_core::{
    document::Document,
    search::{CriteriaVisitor, SearchRequest},
};


/// Evaluates the criteria of a [`SearchRequest`] against a single document.
pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn matches(document: &'a Document, request: &SearchRequest) -> bool {
        match DocumentEvaluator::new(document).visit_all(request) {
            Ok(matched) => matched,
            Err(never) => match never {},
        }
    }
}

impl<'a> CriteriaVisitor for DocumentEvaluator<'a> {
    type Error = Infallible;

    fn visit_title_prefix(&mut self, prefixes: &BTreeSet<String>) -> Result<bool, Self::Error> {
        let title = self.document.title();

        Ok(prefixes
            .iter()
            .any(|prefix| title.starts_with(prefix.as_str())))
    }

    fn visit_author_in(&mut self, ids: &BTreeSet<String>) -> Result<bool, Self::Error> {
        Ok(ids.contains(self.document.author().id()))
    }

    fn visit_created_from(&mut self, from: DateTime<Utc>) -> Result<bool, Self::Error> {
        Ok(self.document.created() >= from)
    }

    fn visit_created_to(&mut self, to: DateTime<Utc>) -> Result<bool, Self::Error> {
        Ok(self.document.created() <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use docstore_core::document::Author;

    fn document(title: &str, author_id: &str, created: DateTime<Utc>) -> Document {
        Document::builder()
            .title(title)
            .author(Author::new(author_id, "Author"))
            .created(created)
            .build()
            .unwrap()
    }

    #[test]
    fn title_prefix_is_case_sensitive() {
        let doc = document("Title A", "a", Utc::now());

        let lower = SearchRequest::builder().title_prefix("title").build();
        let exact = SearchRequest::builder().title_prefix("Title").build();

        assert!(!DocumentEvaluator::matches(&doc, &lower));
        assert!(DocumentEvaluator::matches(&doc, &exact));
    }

    #[test]
    fn any_prefix_may_match() {
        let doc = document("Release notes", "a", Utc::now());
        let request = SearchRequest::builder()
            .title_prefixes(["Draft", "Release"])
            .build();

        assert!(DocumentEvaluator::matches(&doc, &request));
    }

    #[test]
    fn author_membership_is_exact() {
        let doc = document("Title", "author-1", Utc::now());

        let partial = SearchRequest::builder().author_id("author").build();
        let member = SearchRequest::builder().author_ids(["other", "author-1"]).build();

        assert!(!DocumentEvaluator::matches(&doc, &partial));
        assert!(DocumentEvaluator::matches(&doc, &member));
    }

    #[test]
    fn time_bounds_are_inclusive() {
        let now = Utc::now();
        let doc = document("Title", "a", now);

        let exact = SearchRequest::builder().created_from(now).created_to(now).build();
        let after = SearchRequest::builder().created_from(now + Duration::seconds(1)).build();
        let before = SearchRequest::builder().created_to(now - Duration::seconds(1)).build();

        assert!(DocumentEvaluator::matches(&doc, &exact));
        assert!(!DocumentEvaluator::matches(&doc, &after));
        assert!(!DocumentEvaluator::matches(&doc, &before));
    }

    #[test]
    fn criteria_combine_with_and() {
        let doc = document("Title A", "a", Utc::now());
        let request = SearchRequest::builder()
            .title_prefix("Title")
            .author_id("b")
            .build();

        assert!(!DocumentEvaluator::matches(&doc, &request));
        assert!(DocumentEvaluator::matches(&doc, &SearchRequest::all()));
    }
}
