//! In-memory bundle representation.

use serde_json::Value;
use std::fmt;
use validatehound_common::{Error, Result};

/// One loaded file of a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleFile {
    /// Logical file name (base name, case preserved).
    pub name: String,
    /// Where the file came from inside the input (full archive entry path
    /// or directory file name).
    pub origin: String,
    /// Parsed and normalized content.
    pub content: Value,
}

impl BundleFile {
    pub fn kind(&self) -> ContentKind {
        ContentKind::of(&self.content)
    }

    /// Element count for lists, key count for objects, `None` for scalars.
    pub fn item_count(&self) -> Option<usize> {
        match &self.content {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }
}

/// The result of loading one input: logical file name to content, in
/// discovery order. File names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    files: Vec<BundleFile>,
}

impl Bundle {
    /// Build a bundle from `(name, content)` pairs. Content is stored as
    /// given; no normalization is applied.
    pub fn from_files<I, S>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut bundle = Bundle::default();
        for (name, content) in files {
            let name = name.into();
            bundle.insert(name.clone(), name, content)?;
        }
        Ok(bundle)
    }

    pub(crate) fn insert(&mut self, name: String, origin: String, content: Value) -> Result<()> {
        if let Some(existing) = self.files.iter().find(|f| f.name == name) {
            return Err(Error::DuplicateEntry {
                name,
                first: existing.origin.clone(),
                second: origin,
            });
        }
        self.files.push(BundleFile {
            name,
            origin,
            content,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.file(name).map(|f| &f.content)
    }

    pub fn file(&self, name: &str) -> Option<&BundleFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.file(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    pub fn files(&self) -> &[BundleFile] {
        &self.files
    }

    /// `(name, content)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.files.iter().map(|f| (f.name.as_str(), &f.content))
    }
}

/// Coarse shape of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    List,
    Object,
    Scalar,
}

impl ContentKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => ContentKind::List,
            Value::Object(_) => ContentKind::Object,
            _ => ContentKind::Scalar,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::List => "list",
            ContentKind::Object => "object",
            ContentKind::Scalar => "scalar",
        };
        f.pad(name)
    }
}
