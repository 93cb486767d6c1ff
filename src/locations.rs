//! Canonical schema locations and reference resolution
//!
//! A [`Location`] is the normalized absolute address of one schema document,
//! serialized as a `file:` or `http(s):` URL. The serialized form is the
//! node identity used as the registry key during a walk, so two references
//! addressing the same physical resource must produce equal locations.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Canonical absolute location of a schema document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Url);

impl Location {
    /// Parse an already-absolute URL string (`file:`, `http:` or `https:`)
    pub fn parse(s: &str) -> Result<Self> {
        let url = Url::parse(s)?;
        match url.scheme() {
            "file" | "http" | "https" => Ok(Location(url)),
            other => Err(Error::Resource(format!(
                "unsupported scheme '{}' in location '{}'",
                other, s
            ))),
        }
    }

    /// Canonical `file:` location for a file-system path
    ///
    /// Relative paths are made absolute against the current directory.
    /// Symlinks and `..` segments are resolved when the target exists;
    /// otherwise the path is normalized lexically so dead references still
    /// compare consistently.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let canonical = absolute
            .canonicalize()
            .unwrap_or_else(|_| normalize_lexically(&absolute));
        let url = Url::from_file_path(&canonical).map_err(|_| {
            Error::Resource(format!("not an absolute path: {}", canonical.display()))
        })?;
        Ok(Location(url))
    }

    /// The canonical string form, usable as a registry key
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The underlying URL
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Whether this location is network-addressed (http/https)
    pub fn is_remote(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// The file-system path, for `file:` locations
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.0.scheme() == "file" {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    /// Resolve an import's reference string against this (referring) location
    ///
    /// Rules, in order:
    /// 1. `http:`/`https:` references are already absolute and used as-is.
    /// 2. `file:` references with a relative embedded path are resolved
    ///    against the referrer's parent directory, then canonicalized.
    /// 3. Anything else resolves as a relative reference against this
    ///    location per RFC 3986 (scheme/host inherited, paths joined,
    ///    dot segments removed).
    ///
    /// A malformed reference yields [`Error::Resolution`]; callers skip
    /// that one edge and keep walking.
    pub fn resolve_reference(&self, reference: &str) -> Result<Location> {
        if reference.starts_with("http:") || reference.starts_with("https:") {
            let url = Url::parse(reference)
                .map_err(|e| Error::Resolution(format!("'{}': {}", reference, e)))?;
            return Ok(Location(url));
        }

        if let Some(embedded) = reference.strip_prefix("file:") {
            let embedded = embedded.trim_start_matches("//");
            let path = Path::new(embedded);
            if path.is_absolute() {
                return Location::from_path(path);
            }
            let dir = self
                .to_file_path()
                .and_then(|p| p.parent().map(Path::to_path_buf))
                .ok_or_else(|| {
                    Error::Resolution(format!(
                        "relative file reference '{}' but referrer '{}' has no parent directory",
                        reference, self
                    ))
                })?;
            return Location::from_path(dir.join(path));
        }

        let url = self
            .0
            .join(reference)
            .map_err(|e| Error::Resolution(format!("'{}' against '{}': {}", reference, self, e)))?;
        Ok(Location(url))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Location(url)
    }
}

/// Remove `.` and `..` segments without touching the file system
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
