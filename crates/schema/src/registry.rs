//! Filename → schema registry.

use crate::schema;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fmt;
use validatehound_common::{Error, Result};

/// A single field-level schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value inside the record.
    pub instance_path: String,
    /// What was expected and what was found.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// A compiled record schema together with the filename key it serves.
pub struct SchemaDescriptor {
    key: String,
    name: String,
    compiled: JSONSchema,
}

impl SchemaDescriptor {
    /// Compile `schema` for files whose name ends with `key`.
    pub fn compile(key: &str, name: &str, schema: &Value) -> Result<Self> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| Error::Schema(format!("{} ({}): {}", name, key, e)))?;

        Ok(Self {
            key: key.to_lowercase(),
            name: name.to_string(),
            compiled,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every violation of `record`, in the order the engine reports them.
    /// Empty when the record conforms.
    pub fn check(&self, record: &Value) -> Vec<Violation> {
        match self.compiled.validate(record) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| Violation {
                    instance_path: error.instance_path.to_string(),
                    message: error.to_string(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered table of schemas. A filename resolves to the first entry whose
/// key is a case-insensitive suffix of it.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: Vec<SchemaDescriptor>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in BloodHound record schemas.
    pub fn builtin() -> Result<Self> {
        schema::BUILTIN
            .iter()
            .try_fold(Self::new(), |registry, (key, name, build)| {
                registry.with(key, name, &build())
            })
    }

    /// Append a schema. Entries added earlier take precedence.
    pub fn with(mut self, key: &str, name: &str, schema: &Value) -> Result<Self> {
        self.entries.push(SchemaDescriptor::compile(key, name, schema)?);
        Ok(self)
    }

    pub fn resolve(&self, filename: &str) -> Option<&SchemaDescriptor> {
        let filename = filename.to_lowercase();
        self.entries.iter().find(|d| filename.ends_with(&d.key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.key())
    }
}
