//! Page sources: the seam to the document-decoding front end.
//!
//! The layout core never decodes documents itself. A [`PageSource`] hands
//! it one [`PageInput`] per page; decoding failures of a single page are
//! reported per page so the rest of the document can still be processed.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::PageInput;

/// Anything that can deliver decoded pages.
///
/// `Sync` so pages can be pulled from several threads at once.
pub trait PageSource: Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Decode the page at `index` (0-indexed).
    fn page(&self, index: usize) -> Result<PageInput>;
}

impl PageSource for Vec<PageInput> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Result<PageInput> {
        self.get(index)
            .cloned()
            .ok_or(Error::PageOutOfRange(index as u32 + 1, self.len() as u32))
    }
}

#[derive(Deserialize)]
struct PageDump {
    pages: Vec<serde_json::Value>,
}

/// Pages read from a JSON dump of the form `{"pages": [...]}`.
///
/// The outer document is parsed up front; each page is decoded only when
/// requested, so one malformed page does not spoil the others.
#[derive(Debug, Clone)]
pub struct JsonPageSource {
    pages: Vec<serde_json::Value>,
}

impl JsonPageSource {
    /// Open a page dump from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::DocumentDecode(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Read a page dump from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::DocumentDecode(e.to_string()))?;
        Self::from_json(&text)
    }

    /// Parse a page dump held in memory.
    pub fn from_json(text: &str) -> Result<Self> {
        let dump: PageDump = serde_json::from_str(text)
            .map_err(|e| Error::DocumentDecode(format!("not a page dump: {}", e)))?;
        log::debug!("Loaded page dump with {} pages", dump.pages.len());
        Ok(Self { pages: dump.pages })
    }
}

impl PageSource for JsonPageSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageInput> {
        let value = self
            .pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, self.pages.len() as u32))?;
        PageInput::deserialize(value).map_err(|e| Error::PageDecode {
            page: index as u32 + 1,
            message: e.to_string(),
        })
    }
}
