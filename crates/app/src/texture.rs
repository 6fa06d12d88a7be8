//! Texture-backed page renderer
//!
//! Wraps a `PdfDocument` so rendered pages come out as egui textures. The
//! session caches these directly, so a cache hit costs no upload.

use eframe::egui;
use luna_pdf_render::{PageRenderer, PdfDocument, PdfError, PdfResult};

/// A rendered page uploaded to the GPU
pub struct PageTexture {
    pub handle: egui::TextureHandle,
    /// Size on screen in points
    pub size: egui::Vec2,
}

/// Screen size in points of a `width` x `height` pixel image
pub fn display_size(width: u32, height: u32, pixels_per_point: f32) -> egui::Vec2 {
    egui::vec2(width as f32, height as f32) / pixels_per_point
}

/// Refuse rasters the GPU cannot hold. Zoom itself is unbounded, so deep
/// zoom levels end here and show up as a render failure.
pub fn check_texture_fits(index: usize, width: u32, height: u32, max_side: usize) -> PdfResult<()> {
    if width as usize > max_side || height as usize > max_side {
        return Err(PdfError::Render(format!(
            "page {} at {}x{} px exceeds the maximum texture size of {} px",
            index + 1,
            width,
            height,
            max_side
        )));
    }
    Ok(())
}

/// An open PDF whose pages render straight to textures
pub struct TexturedDocument {
    document: PdfDocument,
    ctx: egui::Context,
}

impl TexturedDocument {
    pub fn new(document: PdfDocument, ctx: egui::Context) -> Self {
        Self { document, ctx }
    }
}

impl PageRenderer for TexturedDocument {
    type Image = PageTexture;

    fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Rasterizes at `scale` times the display's pixels-per-point so pages
    /// stay sharp on HiDPI screens while occupying `scale` points per PDF
    /// point.
    fn render_page(&self, index: usize, scale: f32) -> PdfResult<PageTexture> {
        let pixels_per_point = self.ctx.pixels_per_point();
        let max_side = self.ctx.input(|i| i.max_texture_side);

        let (width, height) = self
            .document
            .page_dimensions(index)?
            .scaled_pixels(scale * pixels_per_point);
        check_texture_fits(index, width, height, max_side)?;

        let image = self.document.render_page(index, scale * pixels_per_point)?;
        check_texture_fits(index, image.width(), image.height(), max_side)?;

        let color_image = egui::ColorImage::from_rgb(
            [image.width() as usize, image.height() as usize],
            image.samples(),
        );
        let handle = self.ctx.load_texture(
            format!("page_{}_{}", index, scale),
            color_image,
            egui::TextureOptions::LINEAR,
        );

        Ok(PageTexture {
            handle,
            size: display_size(image.width(), image.height(), pixels_per_point),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luna_pdf_render::PageDimensions;

    #[test]
    fn test_deep_zoom_exceeds_texture_limit() {
        let ctx = egui::Context::default();
        let raw_input = egui::RawInput {
            max_texture_side: Some(8192),
            ..Default::default()
        };
        let _ = ctx.run(raw_input, |_| {});
        let max_side = ctx.input(|i| i.max_texture_side);
        assert_eq!(max_side, 8192);

        let letter = PageDimensions {
            width: 612.0,
            height: 792.0,
        };

        // Eleven zoom-in steps on a 2x display
        let (width, height) = letter.scaled_pixels(1.2_f32.powi(11) * 2.0);
        assert!(height > 8192);
        let err = check_texture_fits(0, width, height, max_side).unwrap_err();
        assert!(matches!(err, PdfError::Render(_)));
        assert!(err.to_string().contains("maximum texture size"));

        let (width, height) = letter.scaled_pixels(2.0);
        assert!(check_texture_fits(0, width, height, max_side).is_ok());
        assert!(check_texture_fits(0, 8192, 8192, max_side).is_ok());
    }

    #[test]
    fn test_display_size() {
        assert_eq!(display_size(612, 792, 1.0), egui::vec2(612.0, 792.0));
        assert_eq!(display_size(1224, 1584, 2.0), egui::vec2(612.0, 792.0));
    }
}
