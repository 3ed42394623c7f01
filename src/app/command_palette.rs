use crate::model::FurnitureKind;
use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::{Mode, PlanApp, StubAction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) enum CommandId {
    ModeSelect,
    ModeWall,
    ModeDoor,
    ModeWindow,
    ModeBed,
    ModeTable,
    ModeSofa,
    ModeWardrobe,
    Delete,
    CancelPlacement,
    FlipDoorSwing,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ResetPan,
    New,
    Open,
    Save,
    Export,
    Undo,
    Redo,
    ShowHelp,
    ReloadSettings,
}

pub(super) struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub search: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { id: CommandId::ModeSelect, name: "Mode: Select", search: "select mode pointer" },
    CommandSpec { id: CommandId::ModeWall, name: "Mode: Wall", search: "wall mode tool draw" },
    CommandSpec { id: CommandId::ModeDoor, name: "Mode: Door", search: "door mode tool swing" },
    CommandSpec { id: CommandId::ModeWindow, name: "Mode: Window", search: "window mode tool" },
    CommandSpec { id: CommandId::ModeBed, name: "Furniture: Bed", search: "furniture bed" },
    CommandSpec { id: CommandId::ModeTable, name: "Furniture: Table", search: "furniture table chairs dining" },
    CommandSpec { id: CommandId::ModeSofa, name: "Furniture: Sofa", search: "furniture sofa couch" },
    CommandSpec { id: CommandId::ModeWardrobe, name: "Furniture: Wardrobe", search: "furniture wardrobe closet" },
    CommandSpec { id: CommandId::Delete, name: "Edit: Delete", search: "delete remove" },
    CommandSpec { id: CommandId::CancelPlacement, name: "Edit: Cancel placement", search: "cancel placement escape abort" },
    CommandSpec { id: CommandId::FlipDoorSwing, name: "Door: Flip swing", search: "door flip swing direction toggle" },
    CommandSpec { id: CommandId::ZoomIn, name: "View: Zoom in", search: "zoom in" },
    CommandSpec { id: CommandId::ZoomOut, name: "View: Zoom out", search: "zoom out" },
    CommandSpec { id: CommandId::ZoomReset, name: "View: Zoom 100%", search: "zoom reset 100" },
    CommandSpec { id: CommandId::ResetPan, name: "View: Reset pan", search: "pan reset origin center" },
    CommandSpec { id: CommandId::New, name: "File: New", search: "new file plan" },
    CommandSpec { id: CommandId::Open, name: "File: Open", search: "open load file" },
    CommandSpec { id: CommandId::Save, name: "File: Save", search: "save file" },
    CommandSpec { id: CommandId::Export, name: "File: Export", search: "export image file" },
    CommandSpec { id: CommandId::Undo, name: "Edit: Undo", search: "undo" },
    CommandSpec { id: CommandId::Redo, name: "Edit: Redo", search: "redo" },
    CommandSpec { id: CommandId::ShowHelp, name: "Help: Shortcuts", search: "help shortcuts keys" },
    CommandSpec { id: CommandId::ReloadSettings, name: "Settings: Reload", search: "settings reload config grid" },
];

#[derive(Default)]
pub(super) struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

#[derive(Clone, Copy)]
pub(super) struct CommandContext {
    pub selected_len: usize,
    pub placing: bool,
    pub placing_door: bool,
}

impl CommandPalette {
    pub fn open(&mut self, query: impl Into<String>) {
        self.open = true;
        self.query = query.into();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.request_focus = false;
    }

    fn is_enabled(cx: CommandContext, id: CommandId) -> bool {
        match id {
            CommandId::Delete => cx.selected_len > 0,
            CommandId::CancelPlacement => cx.placing,
            CommandId::FlipDoorSwing => cx.placing_door,
            _ => true,
        }
    }

    pub(super) fn execute(app: &mut PlanApp, ctx: &egui::Context, id: CommandId) {
        match id {
            CommandId::ModeSelect => app.scene.set_mode(Mode::Select),
            CommandId::ModeWall => app.scene.set_mode(Mode::Wall),
            CommandId::ModeDoor => app.scene.set_mode(Mode::Door),
            CommandId::ModeWindow => app.scene.set_mode(Mode::Window),
            CommandId::ModeBed => app.scene.set_mode(Mode::Furniture(FurnitureKind::Bed)),
            CommandId::ModeTable => app.scene.set_mode(Mode::Furniture(FurnitureKind::Table)),
            CommandId::ModeSofa => app.scene.set_mode(Mode::Furniture(FurnitureKind::Sofa)),
            CommandId::ModeWardrobe => app.scene.set_mode(Mode::Furniture(FurnitureKind::Wardrobe)),
            CommandId::Delete => {
                app.scene.delete_selected();
            }
            CommandId::CancelPlacement => app.scene.escape(),
            CommandId::FlipDoorSwing => {
                app.scene.toggle_door_swing();
            }
            CommandId::ZoomIn => app.zoom_by(app.zoom_step),
            CommandId::ZoomOut => app.zoom_by(1.0 / app.zoom_step),
            CommandId::ZoomReset => app.view.zoom = 1.0,
            CommandId::ResetPan => app.view.pan_screen = egui::Vec2::ZERO,
            CommandId::New => app.trigger_stub(StubAction::New),
            CommandId::Open => app.trigger_stub(StubAction::Open),
            CommandId::Save => app.trigger_stub(StubAction::Save),
            CommandId::Export => app.trigger_stub(StubAction::Export),
            CommandId::Undo => app.trigger_stub(StubAction::Undo),
            CommandId::Redo => app.trigger_stub(StubAction::Redo),
            CommandId::ShowHelp => app.show_help = true,
            CommandId::ReloadSettings => app.reload_settings(),
        }
        ctx.request_repaint();
    }

    fn filtered(&self) -> Vec<(&'static CommandSpec, i64)> {
        let matcher = SkimMatcherV2::default();
        let q = self.query.trim();
        if q.is_empty() {
            return COMMANDS.iter().map(|c| (c, 0)).collect();
        }
        let mut out = Vec::new();
        for c in COMMANDS {
            if let Some(score) = matcher.fuzzy_match(c.search, q) {
                out.push((c, score));
            }
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
        out
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<CommandId> {
        if !self.open {
            return None;
        }
        let matches = self.filtered();
        if self.selected >= matches.len() {
            self.selected = matches.len().saturating_sub(1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) && !matches.is_empty() {
            self.selected = (self.selected + 1).min(matches.len() - 1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) && !matches.is_empty() {
            self.selected = self.selected.saturating_sub(1);
        }
        let mut run_selected = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let screen = ctx.content_rect();
        let width = 480.0;
        let height = 300.0;
        let pos = egui::pos2(screen.center().x - width * 0.5, screen.top() + 48.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(250, 250, 250, 245))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 160, 255)))
                    .inner_margin(10.0)
                    .corner_radius(egui::CornerRadius::same(8));
                frame.show(ui, |ui| {
                    ui.set_min_size(egui::vec2(width, height));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Search commands"),
                    );
                    if self.request_focus {
                        resp.request_focus();
                        self.request_focus = false;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(height - 64.0).show(ui, |ui| {
                        for (idx, (spec, _score)) in matches.iter().enumerate() {
                            let enabled = CommandPalette::is_enabled(cx, spec.id);
                            let resp = ui.add_enabled(
                                enabled,
                                egui::Button::new(spec.name).selected(idx == self.selected),
                            );
                            if resp.clicked() {
                                self.selected = idx;
                                run_selected = true;
                            }
                        }
                    });
                });
            });

        if run_selected {
            if let Some((spec, _)) = matches.get(self.selected) {
                if CommandPalette::is_enabled(cx, spec.id) {
                    let cmd = spec.id;
                    self.close();
                    return Some(cmd);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_listed_once() {
        let ids: std::collections::HashSet<CommandId> = COMMANDS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), COMMANDS.len());
    }

    #[test]
    fn test_fuzzy_query_ranks_wardrobe() {
        let mut palette = CommandPalette::default();
        palette.open("wardr");
        let matches = palette.filtered();
        assert_eq!(matches.first().map(|(c, _)| c.id), Some(CommandId::ModeWardrobe));
    }

    #[test]
    fn test_empty_query_lists_all() {
        let palette = CommandPalette::default();
        assert_eq!(palette.filtered().len(), COMMANDS.len());
    }

    #[test]
    fn test_enablement_follows_context() {
        let idle = CommandContext {
            selected_len: 0,
            placing: false,
            placing_door: false,
        };
        assert!(!CommandPalette::is_enabled(idle, CommandId::Delete));
        assert!(!CommandPalette::is_enabled(idle, CommandId::FlipDoorSwing));
        assert!(CommandPalette::is_enabled(idle, CommandId::Save));
        let door = CommandContext {
            selected_len: 1,
            placing: true,
            placing_door: true,
        };
        assert!(CommandPalette::is_enabled(door, CommandId::Delete));
        assert!(CommandPalette::is_enabled(door, CommandId::FlipDoorSwing));
        assert!(CommandPalette::is_enabled(door, CommandId::CancelPlacement));
    }
}
