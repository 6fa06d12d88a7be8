//! Luna PDF Core Library
//!
//! Viewing session state, input translation and configuration for the
//! viewer, independent of the GUI toolkit.

pub mod config;
pub mod input;
pub mod session;
pub mod view;

pub use config::{ConfigError, ViewerConfig};
pub use input::{
    Command, DragState, InputController, ScrollDirection, ScrollThrottle, HELP_TEXT,
};
pub use session::{DocumentSession, OpenError, SessionError};
pub use view::{ViewState, DEFAULT_ZOOM};
