//! Viewer application
//!
//! Per frame: menu bar, keyboard shortcuts, canvas (drag to pan, wheel to
//! turn pages, one page drawn), then any open dialog and the window title.

use crate::dialogs::MessageDialog;
use crate::display::DisplaySurface;
use crate::menu::menu_bar;
use crate::shortcuts::collect_commands;
use crate::texture::TexturedDocument;
use eframe::egui;
use luna_pdf_core::{
    Command, ConfigError, DocumentSession, DragState, InputController, SessionError,
    ViewerConfig,
};
use luna_pdf_render::PdfDocument;
use std::path::Path;
use std::time::Instant;

/// Canvas background behind the page
const CANVAS_FILL: egui::Color32 = egui::Color32::from_gray(190);

pub struct LunaPdfApp {
    config: ViewerConfig,
    session: DocumentSession<TexturedDocument>,
    input: InputController,
    surface: DisplaySurface,
    dialog: Option<MessageDialog>,
}

impl LunaPdfApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ViewerConfig,
        config_error: Option<ConfigError>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let dialog = config_error.map(|e| {
            MessageDialog::error(format!("Invalid configuration, using defaults: {}", e))
        });

        Self {
            input: InputController::new(config.scroll_cooldown),
            config,
            session: DocumentSession::new(),
            surface: DisplaySurface::new(),
            dialog,
        }
    }

    fn open_file(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .set_title("Open PDF")
            .add_filter("PDF", &["pdf"])
            .pick_file();

        match picked {
            Some(path) => self.load_pdf(ctx, &path),
            None => log::debug!("Open dialog cancelled"),
        }
    }

    fn load_pdf(&mut self, ctx: &egui::Context, path: &Path) {
        let result = self.session.open(path, |path| {
            PdfDocument::open(path).map(|document| TexturedDocument::new(document, ctx.clone()))
        });

        match result {
            Ok(()) => self.surface.invalidate(),
            Err(e) => {
                log::error!("Failed to open PDF: {}", e);
                self.dialog = Some(MessageDialog::error(format!("Failed to open PDF: {}", e)));
            }
        }
    }

    fn execute(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::OpenFile => self.open_file(ctx),
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Command::ShowHelp => self.dialog = Some(MessageDialog::help(&self.config.app_name)),
            _ => {
                if self.session.apply(command, &self.config) {
                    self.surface.invalidate();
                }
            }
        }
    }

    fn draw_canvas(&mut self, ctx: &egui::Context, blocked: bool) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(CANVAS_FILL))
            .show(ctx, |ui| {
                let viewport = ui.max_rect();
                let response = ui.allocate_rect(viewport, egui::Sense::drag());

                if !blocked {
                    self.handle_drag(ctx, &response);
                    if response.hovered() {
                        self.handle_scroll(ctx);
                    }
                    self.update_cursor(ctx, &response);
                } else if self.input.is_dragging() {
                    self.input.pointer_up();
                }

                let painter = ui.painter_at(viewport);
                self.paint_current_page(&painter, viewport);
            });
    }

    fn handle_drag(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let primary = egui::PointerButton::Primary;

        if response.drag_started_by(primary) {
            if let Some(origin) = ctx.input(|i| i.pointer.press_origin()) {
                self.input.pointer_down(origin.x, origin.y);
            }
        }
        if response.dragged_by(primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((dx, dy)) = self.input.pointer_move(pos.x, pos.y) {
                    self.surface.pan(egui::vec2(dx, dy));
                }
            }
        }
        if response.drag_stopped_by(primary) {
            self.input.pointer_up();
        }
    }

    fn update_cursor(&self, ctx: &egui::Context, response: &egui::Response) {
        if let DragState::Dragging { .. } = self.input.drag_state() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            return;
        }
        let over_page = match (self.surface.page_bounds(), response.hover_pos()) {
            (Some(bounds), Some(pos)) => bounds.contains(pos),
            _ => false,
        };
        if over_page {
            ctx.set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    fn handle_scroll(&mut self, ctx: &egui::Context) {
        let (delta_y, zoom_modifier) = ctx.input(|i| (i.raw_scroll_delta.y, i.modifiers.command));
        if zoom_modifier || delta_y == 0.0 {
            return;
        }

        if let Some(command) = self.input.scroll(delta_y, Instant::now()) {
            self.execute(ctx, command);
        }
    }

    fn paint_current_page(&mut self, painter: &egui::Painter, viewport: egui::Rect) {
        if !self.session.has_document() {
            self.surface.paint_empty(painter, viewport);
            return;
        }

        let index = self.session.current_page();
        if self.surface.has_failed(index) {
            self.surface.paint_failure(painter, viewport);
            return;
        }

        match self.session.current_image() {
            Ok(page) => self.surface.paint_page(painter, viewport, page),
            Err(SessionError::Render { index, source }) => {
                self.surface.record_failure(index, source.to_string());
                self.surface.paint_failure(painter, viewport);
            }
            Err(e) => {
                self.surface.record_failure(index, e.to_string());
                self.surface.paint_failure(painter, viewport);
            }
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        if let Some(dialog) = &self.dialog {
            if dialog.show(ctx) {
                self.dialog = None;
            }
        }
    }
}

impl eframe::App for LunaPdfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let blocked = self.dialog.is_some();

        let picked = egui::TopBottomPanel::top("menu_bar")
            .show(ctx, |ui| menu_bar(ui, self.session.has_document(), !blocked))
            .inner;

        let mut commands: Vec<Command> = picked.into_iter().collect();
        if !blocked {
            commands.extend(ctx.input_mut(collect_commands));
        }
        for command in commands {
            self.execute(ctx, command);
        }

        self.draw_canvas(ctx, blocked);
        self.show_dialog(ctx);

        let title = self.session.title(&self.config.app_name);
        if let Some(title) = self.surface.title_update(title) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
    }
}
