use crate::model::FurnitureKind;
use eframe::egui;

use super::command_palette::{CommandContext, CommandPalette};
use super::render::{draw_background, draw_scene, mode_button};
use super::scene::{HandleRef, Placement};
use super::{Mode, PlanApp, StubAction};

impl PlanApp {
    fn placing_door(&self) -> bool {
        self.scene
            .in_progress
            .as_ref()
            .is_some_and(|ip| ip.placement == Placement::Door)
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if !self.command_palette.open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                self.command_palette.open("");
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }
            if self.notice.is_some() {
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)
                    || i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
                {
                    self.notice = None;
                }
                return;
            }
            if wants_keyboard || self.command_palette.open {
                return;
            }
            if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z) {
                self.trigger_stub(StubAction::Redo);
            } else if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z) {
                self.trigger_stub(StubAction::Undo);
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::N) {
                self.trigger_stub(StubAction::New);
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.trigger_stub(StubAction::Open);
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                self.trigger_stub(StubAction::Save);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                self.scene.escape();
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
            {
                self.scene.delete_selected();
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F) {
                self.scene.toggle_door_swing();
            }
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for action in StubAction::FILE {
                if ui.button(action.name()).clicked() {
                    self.trigger_stub(action);
                }
            }
            ui.separator();
            for action in StubAction::EDIT {
                if ui.button(action.name()).clicked() {
                    self.trigger_stub(action);
                }
            }
            ui.separator();
            let swing = if self.scene.door_counter_clockwise {
                "Door swing: CCW"
            } else {
                "Door swing: CW"
            };
            if ui
                .add_enabled(self.placing_door(), egui::Button::new(swing))
                .on_hover_text("Flip the swing of the door being placed (F)")
                .clicked()
            {
                self.scene.toggle_door_swing();
            }
        });
    }

    fn palette(&mut self, ui: &mut egui::Ui) {
        ui.heading("Palette");
        ui.separator();
        let current = self.scene.mode;
        let mut picked = None;
        if mode_button(ui, "Select", Mode::Select, current) {
            picked = Some(Mode::Select);
        }
        ui.add_space(6.0);
        ui.label("— Tools —");
        for mode in Mode::TOOLS {
            if mode_button(ui, &mode.to_string(), mode, current) {
                picked = Some(mode);
            }
        }
        ui.add_space(6.0);
        ui.label("— Furniture —");
        for kind in FurnitureKind::ALL {
            let mode = Mode::Furniture(kind);
            if mode_button(ui, kind.label(), mode, current) {
                picked = Some(mode);
            }
        }
        if let Some(mode) = picked {
            self.scene.set_mode(mode);
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let origin = rect.min;

        let space_down = ctx.input(|i| i.key_down(egui::Key::Space)) && !ctx.wants_keyboard_input();

        let (raw_scroll, ctrl, hover_pos) = ctx.input(|i| {
            (
                i.raw_scroll_delta,
                i.modifiers.ctrl || i.modifiers.command,
                i.pointer.hover_pos().filter(|p| rect.contains(*p)),
            )
        });
        if let Some(hover) = hover_pos {
            if ctrl && raw_scroll.y.abs() > 0.0 {
                let factor = if raw_scroll.y > 0.0 {
                    self.zoom_step
                } else {
                    1.0 / self.zoom_step
                };
                self.view.zoom_about_screen_point(origin, hover, factor);
            } else if !ctrl && raw_scroll != egui::Vec2::ZERO {
                self.view.pan_screen += raw_scroll;
            }
        }

        let zoom = self.view.zoom;
        let pointer_world = hover_pos.map(|p| self.view.screen_to_world(origin, p));
        self.last_pointer_world = pointer_world;

        if space_down {
            if response.dragged() {
                self.view.pan_screen += response.drag_delta();
            }
            ctx.set_cursor_icon(if response.dragged() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            });
        } else {
            let multi = ctx.input(|i| i.modifiers.shift || i.modifiers.ctrl || i.modifiers.command);
            if response.drag_started_by(egui::PointerButton::Primary) {
                let start = ctx.input(|i| i.pointer.press_origin());
                if let Some(p) = start.or(hover_pos) {
                    self.scene.press_primary(self.view.screen_to_world(origin, p), multi, zoom);
                }
            } else if response.clicked() {
                if let Some(p) = response.interact_pointer_pos() {
                    self.scene.press_primary(self.view.screen_to_world(origin, p), multi, zoom);
                    self.scene.release();
                }
            }
            if response.dragged_by(egui::PointerButton::Primary) {
                if let Some(p) = response.interact_pointer_pos() {
                    self.scene.drag_to(self.view.screen_to_world(origin, p));
                }
            }
            if response.drag_stopped() {
                self.scene.release();
            }
            if response.secondary_clicked() {
                self.context_hit = response
                    .interact_pointer_pos()
                    .and_then(|p| self.scene.press_secondary(self.view.screen_to_world(origin, p), zoom));
            }

            if self.scene.active_transform.is_none() {
                match pointer_world {
                    Some(p) => self.scene.pointer_moved(p, zoom),
                    None => self.scene.pointer_left(),
                }
            }

            let icon = match self.scene.hovered_handle {
                Some(HandleRef::Corner { .. }) => egui::CursorIcon::ResizeNwSe,
                Some(HandleRef::WallEnd { .. }) => egui::CursorIcon::Move,
                None if self.scene.mode != Mode::Select => egui::CursorIcon::Crosshair,
                None => egui::CursorIcon::Default,
            };
            if hover_pos.is_some() {
                ctx.set_cursor_icon(icon);
            }
        }

        let context_hit = self.context_hit;
        response.context_menu(|ui| {
            if context_hit.is_none() {
                ui.close();
                return;
            }
            if ui.button("Delete").clicked() {
                self.scene.delete_selected();
                self.context_hit = None;
                ui.close();
            }
        });

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, &self.view, self.scene.grid_size);
        draw_scene(&painter, origin, &self.view, &self.scene);
    }

    fn notice_window(&mut self, ctx: &egui::Context) {
        let Some(action) = self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(action.name())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(action.notice());
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for PlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        egui::SidePanel::right("palette")
            .resizable(true)
            .min_width(160.0)
            .show(ctx, |ui| self.palette(ui));

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.scene.status_line(self.last_pointer_world));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", self.view.zoom * 100.0));
                    ui.separator();
                    ui.label(format!("Items: {}", self.scene.doc.items.len()));
                    if let Some(status) = &self.status {
                        ui.separator();
                        ui.label(status);
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.canvas(ui, ctx));

        self.notice_window(ctx);

        let cx = CommandContext {
            selected_len: self.scene.selected.len(),
            placing: self.scene.is_placing(),
            placing_door: self.placing_door(),
        };
        if let Some(cmd) = self.command_palette.ui(ctx, cx) {
            CommandPalette::execute(self, ctx, cmd);
        }

        super::help::draw_help_window(ctx, &mut self.show_help);
    }
}
