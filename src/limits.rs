//! Limits consulted while fetching schema documents
//!
//! Keeps a runaway or hostile document (local or remote) from exhausting
//! memory before the XML parser ever sees it.

use crate::error::{Error, Result};

/// Resource limits for document fetching
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum schema document size in bytes
    pub max_document_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_document_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_document_size: 10 * 1024 * 1024, // 10 MB
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_document_size: 1024 * 1024 * 1024, // 1 GB
        }
    }

    /// Check if a document size is within limits
    pub fn check_document_size(&self, size: usize) -> Result<()> {
        if size > self.max_document_size {
            Err(Error::LimitExceeded(format!(
                "document size {} exceeds maximum {}",
                size, self.max_document_size
            )))
        } else {
            Ok(())
        }
    }
}
