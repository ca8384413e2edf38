//! The document manager: the main entry point for saving, looking up and searching documents.
//!
//! [`DocumentManager`] wraps a [`DocumentBackend`] and adds identifier assignment on save.
//! A manager bound to a concrete backend can be converted into a [`DynDocumentManager`]
//! when the backend is only known at runtime.
//!
//! # Example
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//!
//! let manager = DocumentManager::new(InMemoryStore::builder().build().await?);
//!
//! let saved = manager
//!     .save(
//!         Document::builder()
//!             .title("Draft")
//!             .author(Author::new("a-1", "Ada"))
//!             .build()?,
//!     )
//!     .await?;
//!
//! let found = manager.find_by_id(saved.id().unwrap()).await?;
//! assert_eq!(found, Some(saved));
//! ```

use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::{
    backend::{self, DocumentBackend},
    document::Document,
    error::DocumentStoreResult,
    search::SearchRequest,
};

/// A document manager with a type-erased backend.
pub type DynDocumentManager = DocumentManager<Box<dyn backend::DynDocumentBackend>>;

/// In-process document repository bound to a backend.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentManager<B: DocumentBackend> {
    backend: B,
}

impl<B: DocumentBackend> DocumentManager<B> {
    /// Creates a new document manager with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Saves a document, inserting it or fully replacing the document with the same identifier.
    ///
    /// Documents without an identifier (or with an empty one) are assigned a fresh random
    /// UUID. The returned document carries the identifier it was stored under and can be
    /// found with [`find_by_id`](Self::find_by_id) right away.
    #[instrument(skip(self, document), fields(doc_id = tracing::field::Empty))]
    pub async fn save(&self, document: Document) -> DocumentStoreResult<Document> {
        let document = if document.id().is_some() {
            document
        } else {
            let id = Uuid::new_v4().to_string();
            trace!(doc_id = %id, "Assigning generated identifier");
            document.with_id(id)
        };

        let id = document.id().unwrap_or_default();
        tracing::Span::current().record("doc_id", id);
        debug!(title = %document.title(), "Saving document");

        self.backend
            .upsert_document(document.clone())
            .await?;

        Ok(document)
    }

    /// Looks up a document by its exact identifier.
    ///
    /// Returns `Ok(None)` when nothing is stored under `id`.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        let document = self.backend.get_document(id).await?;
        debug!(found = document.is_some(), "Looked up document");

        Ok(document)
    }

    /// Returns every stored document matching all criteria of `request`.
    ///
    /// An empty request matches every document; no matches yields an empty `Vec`.
    #[instrument(skip(self, request))]
    pub async fn search(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        let documents = self.backend.search_documents(request).await?;
        debug!(
            criteria = request.criteria().len(),
            matched = documents.len(),
            "Searched documents"
        );

        Ok(documents)
    }

    /// Removes the document stored under `id` and returns it, if there was one.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        let removed = self.backend.remove_document(id).await?;
        debug!(removed = removed.is_some(), "Removed document");

        Ok(removed)
    }

    /// Returns the number of stored documents.
    pub async fn count(&self) -> DocumentStoreResult<usize> {
        self.backend.count_documents().await
    }

    /// Shuts down the manager and its backend.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}

impl<B: DocumentBackend + 'static> DocumentManager<B> {
    /// Converts this manager into one that dispatches to its backend dynamically.
    pub fn into_dyn(self) -> DynDocumentManager {
        DocumentManager::new(Box::new(self.backend) as Box<dyn backend::DynDocumentBackend>)
    }
}

impl DynDocumentManager {
    /// Returns the backend as its concrete type, if it is a `B`.
    pub fn backend_as<B: DocumentBackend + 'static>(&self) -> Option<&B> {
        (*self.backend)
            .as_any()
            .downcast_ref::<B>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::Author,
        error::DocumentStoreError,
        search::CriteriaVisitor,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::{collections::BTreeSet, sync::Mutex};

    /// Minimal backend used to exercise the manager in isolation.
    #[derive(Debug, Default)]
    struct VecBackend {
        documents: Mutex<Vec<Document>>,
    }

    struct Matcher<'a>(&'a Document);

    impl CriteriaVisitor for Matcher<'_> {
        type Error = DocumentStoreError;

        fn visit_title_prefix(&mut self, prefixes: &BTreeSet<String>) -> Result<bool, Self::Error> {
            Ok(prefixes.iter().any(|p| self.0.title().starts_with(p.as_str())))
        }

        fn visit_author_in(&mut self, ids: &BTreeSet<String>) -> Result<bool, Self::Error> {
            Ok(ids.contains(self.0.author().id()))
        }

        fn visit_created_from(&mut self, from: DateTime<Utc>) -> Result<bool, Self::Error> {
            Ok(self.0.created() >= from)
        }

        fn visit_created_to(&mut self, to: DateTime<Utc>) -> Result<bool, Self::Error> {
            Ok(self.0.created() <= to)
        }
    }

    #[async_trait]
    impl DocumentBackend for VecBackend {
        async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
            let mut documents = self.documents.lock().unwrap();
            documents.retain(|d| d.id() != document.id());
            documents.push(document);
            Ok(())
        }

        async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
            let documents = self.documents.lock().unwrap();
            Ok(documents.iter().find(|d| d.id() == Some(id)).cloned())
        }

        async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
            let mut documents = self.documents.lock().unwrap();
            let position = documents.iter().position(|d| d.id() == Some(id));
            Ok(position.map(|index| documents.remove(index)))
        }

        async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
            let documents = self.documents.lock().unwrap();
            let mut matched = Vec::new();
            for document in documents.iter() {
                if Matcher(document).visit_all(request)? {
                    matched.push(document.clone());
                }
            }
            Ok(matched)
        }

        async fn count_documents(&self) -> DocumentStoreResult<usize> {
            Ok(self.documents.lock().unwrap().len())
        }
    }

    fn draft(title: &str) -> Document {
        Document::builder()
            .title(title)
            .author(Author::new("author-1", "Author"))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn save_assigns_distinct_identifiers() {
        let manager = DocumentManager::new(VecBackend::default());

        let first = manager.save(draft("one")).await.unwrap();
        let second = manager.save(draft("two")).await.unwrap();

        let first_id = first.id().unwrap();
        assert!(!first_id.is_empty());
        assert_ne!(first.id(), second.id());
        assert!(Uuid::parse_str(first_id).is_ok());
        assert_eq!(manager.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn save_replaces_empty_identifier() {
        let manager = DocumentManager::new(VecBackend::default());
        let document = Document::builder()
            .id("")
            .author(Author::new("author-1", "Author"))
            .build()
            .unwrap();

        let saved = manager.save(document).await.unwrap();

        assert!(saved.id().is_some());
    }

    #[tokio::test]
    async fn save_keeps_given_identifier() {
        let manager = DocumentManager::new(VecBackend::default());

        let saved = manager.save(draft("kept").with_id("fixed")).await.unwrap();

        assert_eq!(saved.id(), Some("fixed"));
        assert_eq!(manager.find_by_id("fixed").await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn remove_returns_document_once() {
        let manager = DocumentManager::new(VecBackend::default());
        manager.save(draft("gone").with_id("x")).await.unwrap();

        assert!(manager.remove("x").await.unwrap().is_some());
        assert!(manager.remove("x").await.unwrap().is_none());
        assert!(manager.find_by_id("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dyn_manager_dispatches_and_downcasts() {
        let manager = DocumentManager::new(VecBackend::default()).into_dyn();

        let saved = manager.save(draft("dyn")).await.unwrap();
        let found = manager.search(&SearchRequest::all()).await.unwrap();

        assert_eq!(found, vec![saved]);
        assert!(manager.backend_as::<VecBackend>().is_some());
        manager.shutdown().await.unwrap();
    }
}
