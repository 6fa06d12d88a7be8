//! Document session
//!
//! Owns the open document, its view state and the page cache. One session
//! lives for the whole run of the viewer; opening a file replaces the
//! document inside it and resets everything else.

use crate::config::ViewerConfig;
use crate::input::Command;
use crate::view::ViewState;
use luna_pdf_cache::{CacheStats, PageCache};
use luna_pdf_render::{PageRenderer, PdfError};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a file could not be opened
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not a file", .path.display())]
    NotAFile { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid PDF: {reason}", .path.display())]
    InvalidPdf { path: PathBuf, reason: String },
}

impl OpenError {
    /// The path the open was attempted on
    pub fn path(&self) -> &Path {
        match self {
            OpenError::NotFound { path }
            | OpenError::NotAFile { path }
            | OpenError::Unreadable { path, .. }
            | OpenError::InvalidPdf { path, .. } => path,
        }
    }
}

/// Errors from page lookups on a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no document is open")]
    NoDocument,

    #[error("page index {index} is out of range ({page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("rendering page index {index} failed: {source}")]
    Render {
        index: usize,
        #[source]
        source: PdfError,
    },
}

/// The open document plus its view and page cache
pub struct DocumentSession<D: PageRenderer> {
    document: Option<D>,
    path: Option<PathBuf>,
    view: ViewState,
    cache: PageCache<D::Image>,
}

impl<D: PageRenderer> Default for DocumentSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: PageRenderer> fmt::Debug for DocumentSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSession")
            .field("path", &self.path)
            .field("page_count", &self.page_count())
            .field("view", &self.view)
            .field("cache", &self.cache.stats())
            .finish()
    }
}

impl<D: PageRenderer> DocumentSession<D> {
    /// A session with no document
    pub fn new() -> Self {
        Self {
            document: None,
            path: None,
            view: ViewState::default(),
            cache: PageCache::new(),
        }
    }

    /// Open `path` with `load` and make it the current document.
    ///
    /// The path is checked first (exists, is a file, is readable) so those
    /// failures are reported precisely; anything `load` rejects is reported
    /// as an invalid PDF. On any error the session is left untouched.
    pub fn open<F, E>(&mut self, path: &Path, load: F) -> Result<(), OpenError>
    where
        F: FnOnce(&Path) -> Result<D, E>,
        E: fmt::Display,
    {
        check_readable(path)?;

        let document = load(path).map_err(|e| OpenError::InvalidPdf {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.replace_document(document);
        self.path = Some(path.to_path_buf());
        log::info!(
            "Opened {} ({} pages)",
            path.display(),
            self.page_count()
        );
        Ok(())
    }

    /// Make `document` current: page 0, default zoom, empty cache.
    ///
    /// The previous document is dropped (closed).
    pub fn replace_document(&mut self, document: D) {
        self.document = Some(document);
        self.path = None;
        self.view = ViewState::default();
        self.cache.clear();
    }

    /// Close the current document, if any
    pub fn close(&mut self) {
        self.document = None;
        self.path = None;
        self.view = ViewState::default();
        self.cache.clear();
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Path of the open document, when it was opened from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of pages, 0 without a document
    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, |d| d.page_count())
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page()
    }

    pub fn zoom_level(&self) -> f32 {
        self.view.zoom_level()
    }

    /// Move `delta` pages. Returns whether the page changed; moves that
    /// would leave the document are ignored.
    pub fn change_page(&mut self, delta: isize) -> bool {
        let next = self.view.change_page(delta, self.page_count());
        if next == self.view {
            return false;
        }
        log::debug!(
            "Page {} -> {}",
            self.view.current_page() + 1,
            next.current_page() + 1
        );
        self.view = next;
        true
    }

    /// Scale the zoom by `factor` (or set it when `absolute`) and drop every
    /// cached page. Invalid factors are ignored and return `false`.
    pub fn set_zoom(&mut self, factor: f32, absolute: bool) -> bool {
        match self.view.with_zoom(factor, absolute) {
            Some(next) => {
                self.view = next;
                self.cache.clear();
                log::debug!("Zoom set to {:.3}", self.view.zoom_level());
                true
            }
            None => {
                log::warn!(
                    "Ignoring zoom factor {} (absolute: {}) at zoom {}",
                    factor,
                    absolute,
                    self.view.zoom_level()
                );
                false
            }
        }
    }

    /// Back to the default zoom on the current page; drops every cached page.
    pub fn reset_view(&mut self) -> bool {
        self.view = self.view.reset_zoom();
        self.cache.clear();
        true
    }

    /// Run a session-level command. Returns whether the view changed.
    ///
    /// Commands that need the UI (open, quit, help) are not handled here.
    pub fn apply(&mut self, command: Command, config: &ViewerConfig) -> bool {
        match command {
            Command::ZoomIn => self.set_zoom(config.zoom_in_factor, false),
            Command::ZoomOut => self.set_zoom(config.zoom_out_factor, false),
            Command::Recenter => self.reset_view(),
            Command::NextPage => self.change_page(1),
            Command::PreviousPage => self.change_page(-1),
            Command::OpenFile | Command::Quit | Command::ShowHelp => false,
        }
    }

    /// Image of `index` at the current zoom, rendered on first request
    pub fn page_image(&mut self, index: usize) -> Result<&D::Image, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;

        let page_count = document.page_count();
        if index >= page_count {
            return Err(SessionError::PageOutOfRange { index, page_count });
        }

        let zoom = self.view.zoom_level();
        self.cache
            .get_or_render(index, || {
                log::debug!("Rendering page {} at zoom {:.3}", index + 1, zoom);
                document.render_page(index, zoom)
            })
            .map_err(|source| {
                log::error!("Failed to render page {}: {}", index + 1, source);
                SessionError::Render { index, source }
            })
    }

    /// Image of the current page
    pub fn current_image(&mut self) -> Result<&D::Image, SessionError> {
        self.page_image(self.view.current_page())
    }

    /// Window title: `"<app> - Page <n> of <count>"`, or just the app name
    /// when there is nothing to show.
    pub fn title(&self, app_name: &str) -> String {
        let page_count = self.page_count();
        if page_count == 0 {
            return app_name.to_string();
        }
        format!(
            "{} - Page {} of {}",
            app_name,
            self.view.current_page() + 1,
            page_count
        )
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.contains(index)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn check_readable(path: &Path) -> Result<(), OpenError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => OpenError::NotFound {
            path: path.to_path_buf(),
        },
        _ => OpenError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(OpenError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    fs::File::open(path)
        .map(drop)
        .map_err(|source| OpenError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}
