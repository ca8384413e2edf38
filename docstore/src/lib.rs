//! A small in-memory document repository with upsert, lookup and multi-criteria search.
//!
//! This crate gathers the functionality of the docstore sub-crates behind one import.
//!
//! # Features
//!
//! - **Immutable documents** - `Document` and `Author` value types built with a fluent builder
//! - **Upsert** - Saving assigns a random identifier when none is set and replaces documents
//!   stored under an existing one
//! - **Search** - Filter by title prefixes, author ids and an inclusive creation-time range
//! - **Pluggable backends** - An in-memory backend ships with the crate; others implement
//!   `DocumentBackend`
//!
//! # Quick Start
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = DocumentManager::new(InMemoryStore::builder().build().await.unwrap());
//!
//!     let author = Author::new("a-1", "Ada");
//!     let saved = manager
//!         .save(
//!             Document::builder()
//!                 .title("Title A")
//!                 .content("Content")
//!                 .author(author)
//!                 .build()
//!                 .unwrap(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     let results = manager
//!         .search(&SearchRequest::builder().title_prefix("Title").build())
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(results, vec![saved]);
//!
//!     manager.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! A manager can be converted into a [`DynDocumentManager`](prelude::DynDocumentManager)
//! with `into_dyn` when the backend is only chosen at runtime. The concrete backend can be
//! recovered with `backend_as`.

pub mod prelude;

pub use docstore_core::{document, manager, backend, search, error};

// Re-export chrono for timestamps
pub use chrono;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docstore_memory::{InMemoryStore, InMemoryStoreBuilder};
}
