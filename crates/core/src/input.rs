//! Input handling for page navigation and panning
//!
//! Translates raw pointer and wheel events into viewer actions:
//! - Pointer drag produces pan deltas (Idle -> Dragging -> Idle)
//! - Wheel/trackpad scrolling turns pages, throttled by a cooldown
//! - Keyboard shortcuts and menu entries map to a `Command`
//!
//! Nothing here knows about the GUI toolkit; the app feeds positions,
//! deltas and timestamps in.

use std::time::{Duration, Instant};

/// Wheel deltas smaller than this (in points) are treated as noise
const MIN_SCROLL_DELTA: f32 = 1.0;

/// Default cooldown between accepted scroll events
pub const DEFAULT_SCROLL_COOLDOWN: Duration = Duration::from_millis(100);

/// A user-level action, triggered from a shortcut, the menu or the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    OpenFile,
    Quit,
    ZoomIn,
    ZoomOut,
    Recenter,
    NextPage,
    PreviousPage,
    ShowHelp,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::OpenFile,
        Command::Quit,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::Recenter,
        Command::NextPage,
        Command::PreviousPage,
        Command::ShowHelp,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Command::OpenFile => "Open...",
            Command::Quit => "Quit",
            Command::ZoomIn => "Zoom In",
            Command::ZoomOut => "Zoom Out",
            Command::Recenter => "Center PDF",
            Command::NextPage => "Next Page",
            Command::PreviousPage => "Previous Page",
            Command::ShowHelp => "View Controls",
        }
    }

    /// Shortcut shown next to the menu label
    pub fn shortcut_hint(&self) -> Option<&'static str> {
        match self {
            Command::OpenFile => Some("Ctrl+O"),
            Command::Quit => Some("Ctrl+Q"),
            Command::ZoomIn => Some("Ctrl+= / I"),
            Command::ZoomOut => Some("Ctrl+- / O"),
            Command::Recenter => Some("C"),
            Command::NextPage => Some("Right"),
            Command::PreviousPage => Some("Left"),
            Command::ShowHelp => Some("F1"),
        }
    }

    /// Whether the command needs an open document to do anything
    pub fn needs_document(&self) -> bool {
        matches!(self, Command::NextPage | Command::PreviousPage)
    }
}

/// Body of the "View Controls" dialog
pub const HELP_TEXT: &str = "\
Luna PDF Controls:
- Open: Ctrl + O
- Zoom In: Ctrl + = or I
- Zoom Out: Ctrl + - or O
- Next Page: Right Arrow or scroll down
- Previous Page: Left Arrow or scroll up
- Center PDF: C
- Pan: drag the page
- Help: F1
- Quit: Ctrl + Q

A simple, fast PDF reader built for ease of use.";

/// Normalized scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Classify a vertical wheel delta.
    ///
    /// Positive deltas mean "scroll up" (content moves down), which is the
    /// convention egui normalizes all platforms to. Tiny deltas are ignored.
    pub fn from_delta(delta_y: f32) -> Option<Self> {
        if !delta_y.is_finite() || delta_y.abs() < MIN_SCROLL_DELTA {
            None
        } else if delta_y > 0.0 {
            Some(ScrollDirection::Up)
        } else {
            Some(ScrollDirection::Down)
        }
    }

    /// Page command for this direction
    pub fn command(self) -> Command {
        match self {
            ScrollDirection::Up => Command::PreviousPage,
            ScrollDirection::Down => Command::NextPage,
        }
    }
}

/// Drops scroll events that arrive within `cooldown` of the last accepted one.
#[derive(Debug, Clone)]
pub struct ScrollThrottle {
    cooldown: Duration,
    last_accepted: Option<Instant>,
}

impl ScrollThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    /// Decide whether an event at `now` passes. Rejected events do not
    /// extend the cooldown.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.cooldown {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }
}

/// Pointer drag state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Button held; `last` is the most recently seen pointer position
    Dragging { last: (f32, f32) },
}

/// Turns pointer and wheel events into pan deltas and page commands
#[derive(Debug, Clone)]
pub struct InputController {
    drag: DragState,
    throttle: ScrollThrottle,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_COOLDOWN)
    }
}

impl InputController {
    pub fn new(scroll_cooldown: Duration) -> Self {
        Self {
            drag: DragState::Idle,
            throttle: ScrollThrottle::new(scroll_cooldown),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Handle mouse button press
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag = DragState::Dragging { last: (x, y) };
    }

    /// Handle pointer motion. While dragging, returns the delta since the
    /// previous position and records the new one.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { last: (last_x, last_y) } => {
                self.drag = DragState::Dragging { last: (x, y) };
                Some((x - last_x, y - last_y))
            }
        }
    }

    /// Handle mouse button release
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Handle a vertical wheel delta observed at `now`.
    ///
    /// Returns the page command to run, or `None` if the delta is noise or
    /// the event falls inside the cooldown window.
    pub fn scroll(&mut self, delta_y: f32, now: Instant) -> Option<Command> {
        let direction = ScrollDirection::from_delta(delta_y)?;
        if !self.throttle.accept(now) {
            log::trace!("Scroll {:?} throttled", direction);
            return None;
        }
        Some(direction.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_state_machine() {
        let mut input = InputController::default();
        assert_eq!(input.drag_state(), DragState::Idle);

        // Motion without a press does nothing
        assert_eq!(input.pointer_move(10.0, 10.0), None);

        input.pointer_down(500.0, 400.0);
        assert!(input.is_dragging());

        assert_eq!(input.pointer_move(600.0, 450.0), Some((100.0, 50.0)));
        // Deltas are relative to the previous move, not the press
        assert_eq!(input.pointer_move(590.0, 450.0), Some((-10.0, 0.0)));
        assert_eq!(
            input.drag_state(),
            DragState::Dragging { last: (590.0, 450.0) }
        );

        input.pointer_up();
        assert!(!input.is_dragging());
        assert_eq!(input.pointer_move(0.0, 0.0), None);
    }

    #[test]
    fn test_scroll_direction_normalization() {
        assert_eq!(ScrollDirection::from_delta(50.0), Some(ScrollDirection::Up));
        assert_eq!(ScrollDirection::from_delta(-50.0), Some(ScrollDirection::Down));
        assert_eq!(ScrollDirection::from_delta(0.0), None);
        assert_eq!(ScrollDirection::from_delta(0.4), None);
        assert_eq!(ScrollDirection::from_delta(f32::NAN), None);

        assert_eq!(ScrollDirection::Up.command(), Command::PreviousPage);
        assert_eq!(ScrollDirection::Down.command(), Command::NextPage);
    }

    #[test]
    fn test_burst_of_scrolls_coalesced() {
        let mut input = InputController::new(Duration::from_millis(100));
        let start = Instant::now();

        let accepted: Vec<_> = (0..5)
            .filter_map(|i| input.scroll(-120.0, start + Duration::from_millis(i * 12)))
            .collect();

        assert_eq!(accepted, vec![Command::NextPage]);
    }

    #[test]
    fn test_scroll_accepted_after_cooldown() {
        let mut throttle = ScrollThrottle::new(Duration::from_millis(100));
        let start = Instant::now();

        assert!(throttle.accept(start));
        assert!(!throttle.accept(start + Duration::from_millis(99)));
        assert!(throttle.accept(start + Duration::from_millis(100)));
        assert!(!throttle.accept(start + Duration::from_millis(150)));
        assert!(throttle.accept(start + Duration::from_millis(201)));
    }

    #[test]
    fn test_rejected_scroll_does_not_extend_cooldown() {
        let mut throttle = ScrollThrottle::new(Duration::from_millis(100));
        let start = Instant::now();

        assert!(throttle.accept(start));
        assert!(!throttle.accept(start + Duration::from_millis(90)));
        // 100ms after the accepted event, not after the rejected one
        assert!(throttle.accept(start + Duration::from_millis(105)));
    }

    #[test]
    fn test_noise_does_not_consume_cooldown() {
        let mut input = InputController::default();
        let start = Instant::now();

        assert_eq!(input.scroll(0.1, start), None);
        assert_eq!(
            input.scroll(40.0, start + Duration::from_millis(1)),
            Some(Command::PreviousPage)
        );
    }

    #[test]
    fn test_command_metadata() {
        for command in Command::ALL {
            assert!(!command.label().is_empty());
        }
        assert_eq!(Command::Recenter.label(), "Center PDF");
        assert_eq!(Command::ZoomIn.shortcut_hint(), Some("Ctrl+= / I"));
        assert_eq!(Command::Quit.shortcut_hint(), Some("Ctrl+Q"));
        assert_eq!(Command::ShowHelp.shortcut_hint(), Some("F1"));
        assert!(Command::NextPage.needs_document());
        assert!(!Command::ZoomIn.needs_document());
    }
}
