//! In-memory storage implementation for the document manager.
//!
//! Documents are kept in a `HashMap` keyed by identifier behind an async-aware
//! read-write lock.

use std::{collections::HashMap, fmt, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use tracing::{debug, instrument};

use docstore_core::{
    backend::{DocumentBackend, DocumentBackendBuilder},
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
    search::SearchRequest,
};

use crate::evaluator::DocumentEvaluator;

/// A stored document together with the position its identifier was first saved at.
#[derive(Debug)]
struct Entry {
    seq: u64,
    document: Document,
}

#[derive(Debug)]
struct StoreState {
    documents: HashMap<String, Entry>,
    next_seq: u64,
}


/// Thread-safe in-memory document storage backend.
///
/// This struct implements the [`DocumentBackend`] trait using an async-aware
/// read-write lock: saves and removals take the write lock, lookups, searches
/// and counts take the read lock.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Ordering
///
/// Search results come back in the order their identifiers were first saved.
/// Overwriting a document keeps its position; removing it and saving again moves it
/// to the end.
///
/// # Performance
///
/// Searches scan every stored document (no indexing). Lookups by identifier are
/// constant time.
///
/// # Example
///
/// ```ignore
/// use docstore_memory::InMemoryStore;
/// use docstore::backend::DocumentBackend;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///     store.upsert_document(document.with_id("doc-1")).await?;
///
///     assert!(store.get_document("doc-1").await?.is_some());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty store with room for at least `capacity` documents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                documents: HashMap::with_capacity(capacity),
                next_seq: 0,
            })),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore` with custom options.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use docstore_memory::InMemoryStore;
    ///
    /// let store = InMemoryStore::builder().capacity(1024).build().await.unwrap();
    /// ```
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}


#[async_trait]
impl DocumentBackend for InMemoryStore {
    #[instrument(skip(self, document), fields(doc_id = document.id().unwrap_or_default()))]
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
        let key = match document.id() {
            Some(id) => id.to_string(),
            None => {
                return Err(DocumentStoreError::InvalidDocument(
                    "document has no identifier".to_string(),
                ))
            }
        };

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        match state.documents.get_mut(&key) {
            Some(entry) => {
                debug!("Replacing stored document");
                entry.document = document;
            }
            None => {
                let seq = state.next_seq;
                state.next_seq += 1;
                debug!(seq, "Inserting new document");
                state.documents.insert(key, Entry { seq, document });
            }
        }

        Ok(())
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        Ok(
            self.state
                .read()
                .await
                .documents
                .get(id)
                .map(|entry| entry.document.clone())
        )
    }

    #[instrument(skip(self))]
    async fn remove_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        let removed = self.state
            .write()
            .await
            .documents
            .remove(id)
            .map(|entry| entry.document);
        debug!(removed = removed.is_some(), "Removed document");

        Ok(removed)
    }

    #[instrument(skip(self, request))]
    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        let state = self.state.read().await;

        let mut matched = state.documents
            .values()
            .filter(|entry| DocumentEvaluator::matches(&entry.document, request))
            .collect::<Vec<_>>();

        matched.sort_by_key(|entry| entry.seq);
        debug!(
            scanned = state.documents.len(),
            matched = matched.len(),
            "Scanned stored documents"
        );

        Ok(
            matched
                .into_iter()
                .map(|entry| entry.document.clone())
                .collect()
        )
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        Ok(self.state.read().await.documents.len())
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use docstore_memory::InMemoryStore;
/// use docstore::backend::DocumentBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder().capacity(64).build().await.unwrap();
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryStoreBuilder {
    capacity: usize,
}

impl InMemoryStoreBuilder {
    /// Pre-allocates room for `capacity` documents.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[async_trait]
impl DocumentBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::with_capacity(self.capacity))
    }
}
