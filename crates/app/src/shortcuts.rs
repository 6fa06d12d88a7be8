//! Keyboard shortcuts
//!
//! | Keys              | Command       |
//! |-------------------|---------------|
//! | Ctrl+O            | Open          |
//! | Ctrl+= / Ctrl++ / I | Zoom in     |
//! | Ctrl+- / O        | Zoom out      |
//! | C                 | Center PDF    |
//! | Right / Left      | Next / previous page |
//! | F1                | Help          |
//! | Ctrl+Q            | Quit          |
//!
//! `Ctrl` is `Cmd` on macOS. Modified shortcuts are consumed before the
//! plain letters so Ctrl+O never also zooms out.

use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};
use luna_pdf_core::Command;

const OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const QUIT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);
const ZOOM_IN_EQUALS: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Equals);
const ZOOM_IN_PLUS: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus);
const ZOOM_OUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus);

/// Commands triggered by this frame's key presses, in a fixed order
pub fn collect_commands(input: &mut egui::InputState) -> Vec<Command> {
    let mut commands = Vec::new();

    if input.consume_shortcut(&OPEN) {
        commands.push(Command::OpenFile);
    }
    if input.consume_shortcut(&QUIT) {
        commands.push(Command::Quit);
    }
    // Either fires at most once per frame
    let ctrl_zoom_in = input.consume_shortcut(&ZOOM_IN_EQUALS);
    if input.consume_shortcut(&ZOOM_IN_PLUS) || ctrl_zoom_in {
        commands.push(Command::ZoomIn);
    }
    if input.consume_shortcut(&ZOOM_OUT) {
        commands.push(Command::ZoomOut);
    }

    if input.consume_key(Modifiers::NONE, Key::I) {
        commands.push(Command::ZoomIn);
    }
    if input.consume_key(Modifiers::NONE, Key::O) {
        commands.push(Command::ZoomOut);
    }
    if input.consume_key(Modifiers::NONE, Key::C) {
        commands.push(Command::Recenter);
    }

    if input.key_pressed(Key::ArrowRight) {
        commands.push(Command::NextPage);
    }
    if input.key_pressed(Key::ArrowLeft) {
        commands.push(Command::PreviousPage);
    }
    if input.consume_key(Modifiers::NONE, Key::F1) {
        commands.push(Command::ShowHelp);
    }

    commands
}
