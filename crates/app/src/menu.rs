//! Menu bar
//!
//! File, View and Help menus. Each entry maps to a `Command`; the app runs
//! whatever was clicked after the frame's menus are drawn.

use eframe::egui;
use luna_pdf_core::Command;

/// Menu layout: title and entries, `None` marks a separator
pub const MENUS: [(&str, &[Option<Command>]); 3] = [
    ("File", &[Some(Command::OpenFile), None, Some(Command::Quit)]),
    (
        "View",
        &[
            Some(Command::ZoomIn),
            Some(Command::ZoomOut),
            Some(Command::Recenter),
            None,
            Some(Command::NextPage),
            Some(Command::PreviousPage),
        ],
    ),
    ("Help", &[Some(Command::ShowHelp)]),
];

/// Draw the menu bar; returns the command picked this frame, if any.
///
/// `enabled` is false while a dialog is open. Page commands also need a
/// document.
pub fn menu_bar(ui: &mut egui::Ui, has_document: bool, enabled: bool) -> Option<Command> {
    let mut picked = None;

    egui::menu::bar(ui, |ui| {
        ui.add_enabled_ui(enabled, |ui| {
            for (title, entries) in MENUS {
                ui.menu_button(title, |ui| {
                    for entry in entries {
                        match entry {
                            Some(command) => {
                                if menu_item(ui, *command, has_document) {
                                    picked = Some(*command);
                                    ui.close_menu();
                                }
                            }
                            None => {
                                ui.separator();
                            }
                        }
                    }
                });
            }
        });
    });

    picked
}

fn menu_item(ui: &mut egui::Ui, command: Command, has_document: bool) -> bool {
    let mut button = egui::Button::new(command.label());
    if let Some(hint) = command.shortcut_hint() {
        button = button.shortcut_text(hint);
    }
    ui.add_enabled(has_document || !command.needs_document(), button)
        .clicked()
}
