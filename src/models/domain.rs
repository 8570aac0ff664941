//! Domain model
//!
//! The top-level document of the emitted configuration: a named grouping of
//! schemas rooted at a storage directory.

use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// Named logical grouping of schemas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name
    pub name: String,
    /// Root directory holding the domain's files
    pub directory: String,
    /// Schemas in insertion order
    pub schemas: Vec<Schema>,
}

impl Domain {
    pub fn new(name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            schemas: Vec::new(),
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }
}
