//! Convenient re-exports of commonly used types from docstore.
//!
//! ```ignore
//! use docstore::prelude::*;
//! ```

pub use docstore_core::{
    manager::{DocumentManager, DynDocumentManager},
    document::{Author, Document, DocumentBuilder},
    backend::{DocumentBackend, DocumentBackendBuilder},
    search::{SearchRequest, SearchRequestBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
};
