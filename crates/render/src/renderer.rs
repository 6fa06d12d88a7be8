use crate::pdf::PdfResult;

/// Something that can rasterize the pages of an open document.
///
/// Rendering is synchronous and must be deterministic for a given
/// `(document, index, scale)` triple. `Image` is whatever the caller wants
/// cached: plain pixels for tests and tools, a GPU texture for the viewer.
pub trait PageRenderer {
    type Image;

    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Render page `index` at `scale` (1.0 = one pixel per PDF point)
    fn render_page(&self, index: usize, scale: f32) -> PdfResult<Self::Image>;
}
