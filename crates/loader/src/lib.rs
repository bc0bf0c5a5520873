//! Bundle loader for RustHound-CE / SharpHound exports.
//!
//! Accepts a directory of JSON files or a `.zip` archive and produces a
//! [`Bundle`] mapping each file's base name to its parsed content. Any
//! failure aborts the whole load; no partial bundle is returned.

pub mod bundle;
pub mod source;

pub use bundle::{Bundle, BundleFile, ContentKind};
pub use source::{DirSource, EntrySource, SourceEntry, ZipSource};

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};
use validatehound_common::{Error, Result};

/// Load a bundle from a directory or a `.zip` file.
pub fn load(path: impl AsRef<Path>) -> Result<Bundle> {
    let path = path.as_ref();

    if path.is_dir() {
        return load_from_dir(path);
    }
    if path.is_file() && source::has_extension(path, "zip") {
        return load_from_zip(path);
    }
    if !path.exists() {
        return Err(Error::loader(path, "path does not exist"));
    }
    Err(Error::UnsupportedInput(path.to_path_buf()))
}

/// Load every `.json` file directly inside `path`.
pub fn load_from_dir(path: impl AsRef<Path>) -> Result<Bundle> {
    let mut source = DirSource::open(path.as_ref())?;
    collect_bundle(&mut source)
}

/// Load every `.json` entry of the archive at `path`.
pub fn load_from_zip(path: impl AsRef<Path>) -> Result<Bundle> {
    let mut source = ZipSource::open(path.as_ref())?;
    collect_bundle(&mut source)
}

/// Parse and normalize every entry of `source` into a bundle.
pub fn collect_bundle<S: EntrySource + ?Sized>(source: &mut S) -> Result<Bundle> {
    let entries = source.read_entries()?;
    let mut bundle = Bundle::default();

    for entry in entries {
        debug!("Parsing {}", entry.name);
        let value: Value =
            serde_json::from_slice(&entry.bytes).map_err(|e| Error::ParseFailure {
                filename: entry.name.clone(),
                source: e,
            })?;
        bundle.insert(entry.base_name().to_string(), entry.name.clone(), normalize(value))?;
    }

    info!("Loaded {} JSON files from {}", bundle.len(), source.describe());
    Ok(bundle)
}

/// Unwrap a `{"data": [...]}` envelope. Anything else is returned as is.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_array) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
