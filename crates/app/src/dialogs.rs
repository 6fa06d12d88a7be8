//! Modal message dialogs
//!
//! One dialog at most is shown at a time. While it is open the canvas and
//! keyboard shortcuts are ignored.

use eframe::egui;
use luna_pdf_core::HELP_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
}

impl Severity {
    fn icon(self) -> &'static str {
        match self {
            Severity::Error => "⚠",
            Severity::Info => "ℹ",
        }
    }

    fn color(self) -> egui::Color32 {
        match self {
            Severity::Error => egui::Color32::from_rgb(200, 60, 60),
            Severity::Info => egui::Color32::from_rgb(60, 120, 200),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageDialog {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl MessageDialog {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    /// The "View Controls" dialog
    pub fn help(app_name: &str) -> Self {
        Self {
            severity: Severity::Info,
            title: format!("Help - {}", app_name),
            message: HELP_TEXT.to_string(),
        }
    }

    /// Draw the dialog. Returns `true` once the user dismisses it.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;

        egui::Window::new(self.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.severity.icon())
                            .size(24.0)
                            .color(self.severity.color()),
                    );
                    ui.label(self.message.as_str());
                });
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        let key_dismiss = ctx.input_mut(|i| {
            let enter = i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
            let escape = i.consume_key(egui::Modifiers::NONE, egui::Key::Escape);
            enter || escape
        });

        dismissed || key_dismiss
    }
}
