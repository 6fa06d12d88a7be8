//! PDF document abstraction layer
//!
//! Provides a high-level interface to PDF documents using PDFium.

use crate::raster::RenderedImage;
use crate::renderer::PageRenderer;
use pdfium_render::prelude::*;
use std::cell::OnceCell;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// Failed to initialize PDFium library
    #[error("PDFium initialization error: {0}")]
    Initialization(String),

    /// Failed to load PDF document
    #[error("PDF load error: {0}")]
    Load(String),

    /// Invalid page index
    #[error("Invalid page index: {0}")]
    InvalidPageIndex(usize),

    /// Rendering error
    #[error("PDF render error: {0}")]
    Render(String),
}

/// Result type for PDF operations
pub type PdfResult<T> = Result<T, PdfError>;

thread_local! {
    // Bound once per thread; documents borrow it for 'static.
    static PDFIUM: OnceCell<&'static Pdfium> = const { OnceCell::new() };
}

/// Initialize PDFium library
///
/// Search order:
/// 1. Executable's directory (for app bundles: .app/Contents/MacOS/)
/// 2. Current working directory
/// 3. System library paths
fn init_pdfium() -> PdfResult<Pdfium> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Some(ref dir) = exe_dir {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
        {
            log::info!("Loaded PDFium from {}", dir.display());
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| PdfError::Initialization(e.to_string()))?;
    log::info!("Loaded PDFium from working directory or system library");
    Ok(Pdfium::new(bindings))
}

fn pdfium() -> PdfResult<&'static Pdfium> {
    PDFIUM.with(|cell| {
        if let Some(pdfium) = cell.get() {
            return Ok(*pdfium);
        }
        let pdfium: &'static Pdfium = Box::leak(Box::new(init_pdfium()?));
        let _ = cell.set(pdfium);
        Ok(pdfium)
    })
}

/// Page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    /// Pixel size of this page rendered at `scale` (one pixel per point at 1.0).
    ///
    /// Never smaller than 1 x 1 so PDFium always gets a drawable target.
    pub fn scaled_pixels(&self, scale: f32) -> (u32, u32) {
        let width = (self.width * scale).round().max(1.0) as u32;
        let height = (self.height * scale).round().max(1.0) as u32;
        (width, height)
    }
}

/// PDFium takes the target size as `i32`
fn pdfium_target(index: usize, (width, height): (u32, u32)) -> PdfResult<(i32, i32)> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(PdfError::Render(format!(
            "page {} at {}x{} px is too large to render",
            index, width, height
        ))),
    }
}

/// PDF document handle
///
/// Wraps a PDFium document. Dropping it closes the document.
pub struct PdfDocument {
    document: pdfium_render::prelude::PdfDocument<'static>,
}

impl PdfDocument {
    /// Load a PDF document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> PdfResult<Self> {
        let pdfium = pdfium()?;

        let document = pdfium
            .load_pdf_from_file(path.as_ref(), None)
            .map_err(|e| PdfError::Load(e.to_string()))?;

        log::debug!(
            "Loaded {} ({} pages)",
            path.as_ref().display(),
            document.pages().len()
        );
        Ok(Self { document })
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page(&self, index: usize) -> PdfResult<PdfPage<'_>> {
        let page_index = u16::try_from(index).map_err(|_| PdfError::InvalidPageIndex(index))?;
        self.document
            .pages()
            .get(page_index)
            .map_err(|_| PdfError::InvalidPageIndex(index))
    }

    /// Size of a page in points
    pub fn page_dimensions(&self, index: usize) -> PdfResult<PageDimensions> {
        let page = self.page(index)?;
        Ok(PageDimensions {
            width: page.width().value,
            height: page.height().value,
        })
    }

    /// Render a page at `scale` (1.0 = one pixel per point) to RGB24.
    pub fn render_page(&self, index: usize, scale: f32) -> PdfResult<RenderedImage> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PdfError::Render(format!("invalid scale {}", scale)));
        }

        let page = self.page(index)?;
        let dimensions = PageDimensions {
            width: page.width().value,
            height: page.height().value,
        };
        let (target_width, target_height) = pdfium_target(index, dimensions.scaled_pixels(scale))?;

        let config = PdfRenderConfig::new()
            .set_target_width(target_width)
            .set_target_height(target_height)
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| PdfError::Render(e.to_string()))?;

        // PDFium fits the target box keeping the aspect ratio, so the bitmap
        // can be a pixel off the requested size.
        let width = bitmap.width().max(0) as u32;
        let height = bitmap.height().max(0) as u32;
        let rgba = bitmap.as_rgba_bytes();
        RenderedImage::from_rgba(width, height, &rgba).ok_or_else(|| {
            PdfError::Render(format!(
                "bitmap for page {} has {} bytes, expected {}x{} RGBA",
                index,
                rgba.len(),
                width,
                height
            ))
        })
    }
}

impl PageRenderer for PdfDocument {
    type Image = RenderedImage;

    fn page_count(&self) -> usize {
        PdfDocument::page_count(self)
    }

    fn render_page(&self, index: usize, scale: f32) -> PdfResult<RenderedImage> {
        PdfDocument::render_page(self, index, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pdf_error_display() {
        let err = PdfError::InvalidPageIndex(5);
        assert_eq!(err.to_string(), "Invalid page index: 5");

        let err = PdfError::Load("file not found".to_string());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_scaled_pixels() {
        let letter = PageDimensions { width: 612.0, height: 792.0 };
        assert_eq!(letter.scaled_pixels(1.0), (612, 792));
        assert_eq!(letter.scaled_pixels(1.2), (734, 950));
        assert_eq!(letter.scaled_pixels(0.5), (306, 396));
    }

    #[test]
    fn test_scaled_pixels_never_empty() {
        let page = PageDimensions { width: 612.0, height: 792.0 };
        assert_eq!(page.scaled_pixels(0.0001), (1, 1));
    }

    #[test]
    fn test_pdfium_target_rejects_oversized_pages() {
        assert_eq!(pdfium_target(0, (612, 792)).unwrap(), (612, 792));

        let huge = PageDimensions { width: 612.0, height: 792.0 }.scaled_pixels(1.0e7);
        assert_eq!(huge, (u32::MAX, u32::MAX));
        let err = pdfium_target(3, huge).unwrap_err();
        assert!(matches!(err, PdfError::Render(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(PdfDocument::open("/definitely/not/here.pdf").is_err());
    }

    #[test]
    fn test_open_non_pdf_fails() {
        // Fails with Load when PDFium is present, Initialization otherwise.
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is plain text, not a PDF").unwrap();
        assert!(PdfDocument::open(file.path()).is_err());
    }

    #[test]
    fn test_pdfium_library_name_generation() {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        if let Some(dir) = exe_dir {
            let lib_path = Pdfium::pdfium_platform_library_name_at_path(&dir);
            let lib_name = lib_path.to_string_lossy();

            #[cfg(target_os = "macos")]
            assert!(lib_name.ends_with(".dylib"), "got: {}", lib_name);

            #[cfg(target_os = "linux")]
            assert!(lib_name.ends_with(".so"), "got: {}", lib_name);

            #[cfg(target_os = "windows")]
            assert!(lib_name.ends_with(".dll"), "got: {}", lib_name);

            assert!(lib_name.to_lowercase().contains("pdfium"));
        }
    }
}
