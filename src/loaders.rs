//! Fetching schema documents
//!
//! This module loads the raw text of a schema document from its canonical
//! location: a blocking file read for `file:` locations, a blocking HTTP
//! GET for `http(s):` ones. No retries, no redirect policy beyond the
//! HTTP client's default — a slow remote stalls the caller (see the
//! single-threaded walk model in [`crate::graph`]).

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::Location;
use std::fs;
use std::io::Read;

/// Loader for schema documents
#[derive(Debug)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
    /// Whether to allow remote (http/https) locations
    allow_remote: bool,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            allow_remote: true,
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set whether to allow remote locations
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// Load the document at `location` as a string
    pub fn load(&self, location: &Location) -> Result<String> {
        if let Some(path) = location.to_file_path() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Resource(format!("failed to read '{}': {}", path.display(), e))
            })?;
            self.limits.check_document_size(content.len())?;
            return Ok(content);
        }

        if !self.allow_remote {
            return Err(Error::Resource(format!(
                "remote location '{}' not allowed",
                location
            )));
        }

        let response = ureq::get(location.as_str())
            .call()
            .map_err(|e| Error::Resource(format!("GET {} failed: {}", location, e)))?;
        let mut content = String::new();
        response
            .into_reader()
            .take(self.limits.max_document_size as u64 + 1)
            .read_to_string(&mut content)
            .map_err(|e| Error::Resource(format!("reading {} failed: {}", location, e)))?;
        self.limits.check_document_size(content.len())?;
        Ok(content)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
