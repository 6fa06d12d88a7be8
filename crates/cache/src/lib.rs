//! Luna PDF Cache Library
//!
//! Zoom-scoped memoization of rendered pages.

pub mod page;

pub use page::{CacheStats, PageCache};
