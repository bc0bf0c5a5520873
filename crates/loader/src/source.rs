//! Entry sources for bundle inputs.
//!
//! A source enumerates the candidate JSON files of one input as
//! `(name, bytes)` pairs, in a deterministic order. Parsing and
//! normalization happen elsewhere and do not care which source produced
//! the bytes.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use validatehound_common::{Error, Result};
use zip::ZipArchive;

/// A candidate data file read from an input.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// Name of the entry inside the input. For archives this is the full
    /// entry path, for directories the file name.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl SourceEntry {
    /// Last path component of the entry name.
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.name)
    }
}

/// Something that can enumerate candidate entries.
pub trait EntrySource {
    /// Description of the input, used in log messages.
    fn describe(&self) -> String;

    /// Read every candidate entry in discovery order.
    fn read_entries(&mut self) -> Result<Vec<SourceEntry>>;
}

/// Immediate `.json` children of a directory, sorted by file name.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::loader(path, "not an existing directory"));
        }
        Ok(Self {
            root: path.to_path_buf(),
        })
    }
}

impl EntrySource for DirSource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn read_entries(&mut self) -> Result<Vec<SourceEntry>> {
        let listing = fs::read_dir(&self.root).map_err(|e| Error::loader(&self.root, e))?;

        let mut candidates = Vec::new();
        for entry in listing {
            let entry = entry.map_err(|e| Error::loader(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() || !has_extension(&path, "json") {
                debug!("Ignoring {:?}", path);
                continue;
            }
            candidates.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        candidates
            .into_iter()
            .map(|(name, path)| {
                let bytes = fs::read(&path).map_err(|e| Error::EntryRead {
                    entry: name.clone(),
                    reason: e.to_string(),
                })?;
                Ok(SourceEntry { name, bytes })
            })
            .collect()
    }
}

/// Every `.json` entry of a zip archive at any depth, sorted by full
/// entry name.
pub struct ZipSource {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ZipSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::loader(path, "ZIP file does not exist"));
        }
        let file = File::open(path).map_err(|e| Error::loader(path, e))?;
        let archive = ZipArchive::new(file)
            .map_err(|e| Error::loader(path, format!("invalid zip file: {}", e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }
}

impl EntrySource for ZipSource {
    fn describe(&self) -> String {
        format!("archive {}", self.path.display())
    }

    fn read_entries(&mut self) -> Result<Vec<SourceEntry>> {
        let mut names: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| name.to_lowercase().ends_with(".json"))
            .map(str::to_string)
            .collect();
        names.sort();

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let entry_error = |reason: String| Error::EntryRead {
                entry: name.clone(),
                reason,
            };

            let bytes = {
                let mut file = self
                    .archive
                    .by_name(&name)
                    .map_err(|e| entry_error(e.to_string()))?;
                if file.is_dir() {
                    continue;
                }
                // The declared size comes from the archive and is not trusted.
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)
                    .map_err(|e| entry_error(e.to_string()))?;
                bytes
            };
            entries.push(SourceEntry { name, bytes });
        }

        Ok(entries)
    }
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
