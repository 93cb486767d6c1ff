//! Input expansion: raw arguments into seed locations
//!
//! Each raw input is an existing file, an existing directory (scanned
//! recursively for `*.xsd` files), or an absolute URL. Anything else is a
//! fatal [`Error::Input`] before any traversal starts. Directory scans
//! honor exclude patterns, and a file whose name contains "uber" is never
//! taken as an input — that is the artifact a previous run produced.

use crate::error::{Error, Result};
use crate::locations::Location;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

/// Expanded inputs: seeds ready for the walker plus a derived output name
#[derive(Debug)]
pub struct Expanded {
    /// Seed locations: explicit URLs first, then discovered files, sorted
    pub seeds: Vec<Location>,
    /// Default name for output artifacts, from the first input
    pub output_name: String,
}

/// Expands raw inputs into seed locations
#[derive(Debug, Default)]
pub struct InputExpander {
    excludes: Vec<PathBuf>,
}

impl InputExpander {
    /// Create an expander with no excludes
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress any discovered file or directory whose path contains
    /// `pattern`. May be called repeatedly.
    pub fn exclude(mut self, pattern: impl Into<PathBuf>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Expand `inputs` into seeds
    pub fn expand(&self, inputs: &[String]) -> Result<Expanded> {
        let mut urls: Vec<Url> = Vec::new();
        let mut files: Vec<PathBuf> = Vec::new();
        let mut dirs: Vec<PathBuf> = Vec::new();

        for raw in inputs {
            let path = Path::new(raw);
            if path.is_file() {
                if file_name_contains_uber(path) {
                    tracing::info!(input = %raw, "skipping uber artifact");
                    continue;
                }
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                dirs.push(path.to_path_buf());
            } else {
                let url = Url::parse(raw).map_err(|_| Error::Input(raw.clone()))?;
                if !matches!(url.scheme(), "http" | "https" | "file") {
                    return Err(Error::Input(raw.clone()));
                }
                urls.push(url);
            }
        }

        for dir in &dirs {
            self.scan(dir, &mut files)?;
        }
        files.sort();
        files.dedup();

        let output_name = derive_output_name(&dirs, &files, &urls);

        let mut seeds: Vec<Location> = urls.into_iter().map(Location::from).collect();
        for file in &files {
            seeds.push(Location::from_path(file)?);
        }
        tracing::info!(count = seeds.len(), "expanded inputs");
        Ok(Expanded { seeds, output_name })
    }

    /// Recursively collect `*.xsd` files under `dir`
    fn scan(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let walk = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry.path()));
        for entry in walk {
            let entry =
                entry.map_err(|e| Error::Resource(format!("scanning {}: {}", dir.display(), e)))?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "xsd")
            {
                files.push(entry.path().to_path_buf());
            }
        }
        Ok(())
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|ex| text.contains(ex.to_string_lossy().as_ref()))
    }
}

fn file_name_contains_uber(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains("uber"))
        .unwrap_or(false)
}

/// Default output name: first directory's name, else first file's stem,
/// else the last path segment of the first URL, ".xsd" stripped.
fn derive_output_name(dirs: &[PathBuf], files: &[PathBuf], urls: &[Url]) -> String {
    if let Some(dir) = dirs.first() {
        if let Some(name) = dir.file_name() {
            return name.to_string_lossy().into_owned();
        }
    }
    if let Some(file) = files.first() {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned());
        if let Some(name) = name {
            return name.strip_suffix(".xsd").unwrap_or(&name).to_string();
        }
    }
    if let Some(url) = urls.first() {
        let segment = url
            .path_segments()
            .and_then(|segments| segments.last().map(str::to_string))
            .unwrap_or_default();
        return segment.strip_suffix(".xsd").unwrap_or(&segment).to_string();
    }
    "uber".to_string()
}
