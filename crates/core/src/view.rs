//! Page and zoom state of a viewing session
//!
//! `ViewState` is a plain value. Transitions take the old state and return
//! the new one; the session owns the single live instance and decides what
//! to invalidate after a transition.

/// Zoom level of a freshly opened document
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Current page index and zoom factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    current_page: usize,
    zoom_level: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_page: 0,
            zoom_level: DEFAULT_ZOOM,
        }
    }
}

/// True for factors a zoom transition accepts: finite and strictly positive.
pub fn is_valid_zoom_factor(factor: f32) -> bool {
    factor.is_finite() && factor > 0.0
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the displayed page
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    /// Move `delta` pages. If the target falls outside `[0, page_count)` the
    /// state is returned unchanged; there is no wraparound.
    pub fn change_page(self, delta: isize, page_count: usize) -> Self {
        match self.current_page.checked_add_signed(delta) {
            Some(page) if page < page_count => Self {
                current_page: page,
                ..self
            },
            _ => self,
        }
    }

    /// Multiply the zoom by `factor`, or set it to `factor` when `absolute`.
    ///
    /// Returns `None` if `factor` is not a valid zoom factor or the product
    /// leaves the positive finite range. No other bounds are applied.
    pub fn with_zoom(self, factor: f32, absolute: bool) -> Option<Self> {
        if !is_valid_zoom_factor(factor) {
            return None;
        }

        let zoom_level = if absolute {
            factor
        } else {
            self.zoom_level * factor
        };

        is_valid_zoom_factor(zoom_level).then_some(Self { zoom_level, ..self })
    }

    /// Back to the default zoom, keeping the current page
    pub fn reset_zoom(self) -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM,
            ..self
        }
    }
}
