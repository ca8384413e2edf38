//! Storage backend abstraction for the document store.
//!
//! The [`DocumentBackend`] trait is the seam between [`DocumentManager`](crate::manager::DocumentManager)
//! and a concrete storage strategy. Backends only ever see documents that already carry
//! an identifier; identifier assignment happens in the manager.
//!
//! # Traits
//!
//! - [`DocumentBackend`]: The core trait for storage backends
//! - [`DynDocumentBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`DocumentBackendBuilder`]: Factory trait for creating backend instances

use async_trait::async_trait;
use std::{any::Any, fmt::Debug};

use crate::{
    document::Document,
    error::DocumentStoreResult,
    search::SearchRequest,
};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` and tolerate concurrent calls from several
/// async tasks. How they guard their state is up to them and should be documented.
///
/// # Error Handling
///
/// Absence is not an error: lookups of unknown identifiers return `Ok(None)` and
/// searches without matches return an empty `Vec`.
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Stores a document under its identifier, replacing any existing document entirely.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`](crate::error::DocumentStoreError::InvalidDocument)
    /// if the document has no identifier.
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()>;

    /// Returns the document stored under exactly `id`, if any.
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;

    /// Removes and returns the document stored under `id`, if any.
    async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;

    /// Returns every stored document that satisfies all criteria of `request`.
    ///
    /// The order of the results must be stable across calls that see the same state.
    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>>;

    /// Returns the number of stored documents.
    async fn count_documents(&self) -> DocumentStoreResult<usize>;

    /// Shuts the backend down and releases its resources.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> DocumentBackend for &B
where
    B: DocumentBackend,
{
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
        (**self).upsert_document(document).await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        (**self).get_document(id).await
    }

    async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        (**self).remove_document(id).await
    }

    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        (**self).search_documents(request).await
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        (**self).count_documents().await
    }
}

/// Object-safe counterpart of [`DocumentBackend`].
///
/// Every `DocumentBackend` implements this trait automatically, so any backend can be
/// boxed as `Box<dyn DynDocumentBackend>` and chosen at runtime.
#[async_trait]
pub trait DynDocumentBackend: Send + Sync + Debug {
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()>;
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;
    async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;
    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>>;
    async fn count_documents(&self) -> DocumentStoreResult<usize>;
    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()>;

    fn as_any(&self) -> &dyn Any;
}

#[async_trait]
impl<B: DocumentBackend + 'static> DynDocumentBackend for B {
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
        DocumentBackend::upsert_document(self, document).await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        DocumentBackend::get_document(self, id).await
    }

    async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        DocumentBackend::remove_document(self, id).await
    }

    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        DocumentBackend::search_documents(self, request).await
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        DocumentBackend::count_documents(self).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()> {
        (*self).shutdown().await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl DocumentBackend for Box<dyn DynDocumentBackend> {
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
        (**self).upsert_document(document).await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        (**self).get_document(id).await
    }

    async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        (**self).remove_document(id).await
    }

    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        (**self).search_documents(request).await
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        (**self).count_documents().await
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.shutdown_boxed().await
    }
}

/// Factory trait for constructing backends.
///
/// Builders carry backend configuration and may perform async setup in
/// [`build`](DocumentBackendBuilder::build).
#[async_trait]
pub trait DocumentBackendBuilder {
    type Backend: DocumentBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
