//! Rendering options and configuration.

use crate::layout::PageSelection;

/// Options for rendering reconstructed documents.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix for image sources in output (e.g., "./images/")
    pub image_path_prefix: String,

    /// Wrap each page in a `<section>` carrying its number
    pub page_markers: bool,

    /// Page selection
    pub page_selection: PageSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = prefix.into();
        self
    }

    /// Enable or disable page sections.
    pub fn with_page_markers(mut self, enabled: bool) -> Self {
        self.page_markers = enabled;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }
}
