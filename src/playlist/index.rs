use serde::Serialize;

use crate::error::{Error, Result};
use crate::slug::slug;

/// A `(title, slug)` pair mirrored in the index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    title: String,
    slug: String,
}

impl IndexEntry {
    pub fn new(title: &str) -> Result<Self> {
        if title.is_empty() {
            return Err(Error::Validation("index entry title must be a non-empty string".into()));
        }
        Ok(Self {
            title: title.to_string(),
            slug: slug(title),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        *self = Self::new(title)?;
        Ok(())
    }
}
