//! Core types for a small in-memory document repository.
//!
//! This crate is the core of the docstore project and provides:
//!
//! - **Documents** ([`document`]) - The `Document` and `Author` value types and the document builder
//! - **Search criteria** ([`search`]) - `SearchRequest`, its builder and the criteria visitor
//! - **Backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Document manager** ([`manager`]) - Save, lookup and search with identifier assignment
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docstore_core::{document::{Author, Document}, search::SearchRequest};
//!
//! let document = Document::builder()
//!     .title("Title A")
//!     .author(Author::new("a-1", "Author A"))
//!     .build()?;
//!
//! let request = SearchRequest::builder().title_prefix("Title").build();
//! ```

#[allow(unused_extern_crates)]
extern crate self as docstore_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod manager;
pub mod search;
