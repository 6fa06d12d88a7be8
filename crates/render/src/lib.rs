//! Luna PDF Render Library
//!
//! Page rasterization through PDFium.

pub mod pdf;
pub mod raster;
pub mod renderer;

pub use pdf::{PageDimensions, PdfDocument, PdfError, PdfResult};
pub use raster::RenderedImage;
pub use renderer::PageRenderer;
