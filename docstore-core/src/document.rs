//! Core value types stored by the document store.
//!
//! A [`Document`] is an immutable record with a title, content, creation timestamp and
//! an [`Author`]. Authors are shared through an [`Arc`] so that many documents can point
//! at the same author without copying it. Documents are built with [`DocumentBuilder`]
//! and replaced wholesale when saved again under the same identifier.
//!
//! # Example
//!
//! ```ignore
//! use docstore::document::{Author, Document};
//!
//! let author = Author::new("a-1", "Ada");
//! let document = Document::builder()
//!     .title("Notes")
//!     .content("Hello")
//!     .author(author)
//!     .build()?;
//!
//! assert!(document.id().is_none());
//! # Ok::<(), docstore::error::DocumentStoreError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};
use std::sync::Arc;

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// The creator of a document.
///
/// Identifiers are expected to be unique per author, but nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    id: String,
    name: String,
}

impl Author {
    /// Creates a new author from an identifier and a display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An immutable document record.
///
/// The identifier is optional until the document has been saved; the store assigns one
/// when it is absent or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    title: String,
    content: String,
    author: Arc<Author>,
    created: DateTime<Utc>,
}

impl Document {
    /// Creates a new document builder.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Returns the identifier, or `None` if the document has not been assigned one.
    ///
    /// An empty identifier is reported as `None`.
    pub fn id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Returns the shared handle to this document's author.
    pub fn shared_author(&self) -> Arc<Author> {
        Arc::clone(&self.author)
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns this document with its identifier replaced by `id`.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..self }
    }

    /// Converts this document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> DocumentStoreResult<Value> {
        Ok(to_value(self)?)
    }

    /// Creates a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Serialization`] if the value does not describe a document.
    pub fn from_json(value: Value) -> DocumentStoreResult<Self> {
        Ok(from_value(value)?)
    }
}

/// Fluent builder for [`Document`].
///
/// `title` and `content` default to empty strings and `created` defaults to the instant
/// [`build`](DocumentBuilder::build) is called. The author is required.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    id: Option<String>,
    title: String,
    content: String,
    author: Option<Arc<Author>>,
    created: Option<DateTime<Utc>>,
}

impl DocumentBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the author. Accepts either an owned [`Author`] or a shared `Arc<Author>`.
    pub fn author(mut self, author: impl Into<Arc<Author>>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Builds the document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`] if no author was set.
    pub fn build(self) -> DocumentStoreResult<Document> {
        let author = self
            .author
            .ok_or_else(|| DocumentStoreError::InvalidDocument("document has no author".to_string()))?;

        Ok(Document {
            id: self.id,
            title: self.title,
            content: self.content,
            author,
            created: self.created.unwrap_or_else(Utc::now),
        })
    }
}
