//! Display surface
//!
//! Draws exactly one page image, centered on the canvas center and shifted
//! by the pan offset. Pan is purely visual: any state change that redraws
//! the page calls `invalidate`, which recenters.

use crate::texture::PageTexture;
use eframe::egui;

/// Size of the placeholder drawn when a page fails to render
const PLACEHOLDER_SIZE: egui::Vec2 = egui::vec2(420.0, 540.0);

/// Full-texture UV rectangle
const FULL_UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

/// A page that could not be rendered at the current view
#[derive(Debug, Clone, PartialEq)]
pub struct PageFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DisplaySurface {
    pan: egui::Vec2,
    page_bounds: Option<egui::Rect>,
    failure: Option<PageFailure>,
    title: Option<String>,
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the pan offset and any recorded render failure
    pub fn invalidate(&mut self) {
        self.pan = egui::Vec2::ZERO;
        self.failure = None;
    }

    /// Move the drawn page by `delta`
    pub fn pan(&mut self, delta: egui::Vec2) {
        self.pan += delta;
    }

    /// Screen rectangle of the last page drawn, if any
    pub fn page_bounds(&self) -> Option<egui::Rect> {
        self.page_bounds
    }

    /// Where an image of `size` goes inside `viewport`; remembered as the
    /// page bounds.
    pub fn place(&mut self, viewport: egui::Rect, size: egui::Vec2) -> egui::Rect {
        let rect = egui::Rect::from_center_size(viewport.center() + self.pan, size);
        self.page_bounds = Some(rect);
        rect
    }

    pub fn paint_page(&mut self, painter: &egui::Painter, viewport: egui::Rect, page: &PageTexture) {
        let rect = self.place(viewport, page.size);
        painter.image(page.handle.id(), rect, FULL_UV, egui::Color32::WHITE);
    }

    pub fn record_failure(&mut self, index: usize, message: String) {
        self.failure = Some(PageFailure { index, message });
    }

    /// Whether `index` already failed at the current view
    pub fn has_failed(&self, index: usize) -> bool {
        self.failure.as_ref().is_some_and(|f| f.index == index)
    }

    /// Inline placeholder for the recorded failure
    pub fn paint_failure(&mut self, painter: &egui::Painter, viewport: egui::Rect) {
        let Some(failure) = self.failure.clone() else {
            return;
        };

        let rect = self.place(viewport, PLACEHOLDER_SIZE);
        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(235));
        painter.rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 60, 60)),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!(
                "Page {} could not be rendered\n\n{}",
                failure.index + 1,
                failure.message
            ),
            egui::FontId::proportional(14.0),
            egui::Color32::from_rgb(140, 30, 30),
        );
    }

    /// Prompt shown while no document is open
    pub fn paint_empty(&mut self, painter: &egui::Painter, viewport: egui::Rect) {
        self.page_bounds = None;
        painter.text(
            viewport.center(),
            egui::Align2::CENTER_CENTER,
            "Open a PDF to get started (Ctrl+O)",
            egui::FontId::proportional(20.0),
            egui::Color32::from_gray(60),
        );
    }

    /// Returns `title` if it differs from the one last applied to the window
    pub fn title_update(&mut self, title: String) -> Option<String> {
        if self.title.as_deref() == Some(title.as_str()) {
            return None;
        }
        self.title = Some(title.clone());
        Some(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 30.0), egui::vec2(1000.0, 770.0))
    }

    #[test]
    fn test_page_centered_on_viewport() {
        let mut surface = DisplaySurface::new();
        let rect = surface.place(viewport(), egui::vec2(612.0, 792.0));
        assert_eq!(rect.center(), viewport().center());
        assert_eq!(rect.size(), egui::vec2(612.0, 792.0));
        assert_eq!(surface.page_bounds(), Some(rect));
    }

    #[test]
    fn test_pan_moves_page_until_invalidated() {
        let mut surface = DisplaySurface::new();
        surface.pan(egui::vec2(30.0, -10.0));
        surface.pan(egui::vec2(5.0, 5.0));

        let rect = surface.place(viewport(), egui::vec2(100.0, 100.0));
        assert_eq!(rect.center(), viewport().center() + egui::vec2(35.0, -5.0));

        surface.invalidate();
        let rect = surface.place(viewport(), egui::vec2(100.0, 100.0));
        assert_eq!(rect.center(), viewport().center());
    }

    #[test]
    fn test_failure_cleared_by_invalidate() {
        let mut surface = DisplaySurface::new();
        surface.record_failure(2, "bad page".to_string());
        assert!(surface.has_failed(2));
        assert!(!surface.has_failed(1));

        surface.invalidate();
        assert!(!surface.has_failed(2));
    }

    #[test]
    fn test_title_update_only_on_change() {
        let mut surface = DisplaySurface::new();
        assert_eq!(
            surface.title_update("Luna PDF".to_string()),
            Some("Luna PDF".to_string())
        );
        assert_eq!(surface.title_update("Luna PDF".to_string()), None);
        assert_eq!(
            surface.title_update("Luna PDF - Page 1 of 3".to_string()),
            Some("Luna PDF - Page 1 of 3".to_string())
        );
    }
}
