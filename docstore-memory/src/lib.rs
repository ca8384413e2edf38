//! In-memory document storage backend for docstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the `DocumentBackend` trait.
//! It uses an async-aware RwLock for concurrent access.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Upsert semantics** - Saving under an existing identifier replaces the document
//! - **Stable ordering** - Search results follow the order identifiers were first saved in
//!
//! # Quick Start
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let manager = DocumentManager::new(backend);
//!
//!     let document = Document::builder()
//!         .title("Hello")
//!         .author(Author::new("a-1", "Ada"))
//!         .build()?;
//!
//!     manager.save(document).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docstore_memory;

pub mod store;
mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
