use crate::model::FurnitureKind;
use eframe::egui;
use std::fmt;
use std::path::PathBuf;

mod command_palette;
mod furniture;
mod geometry;
mod help;
mod interaction;
mod render;
mod scene;
mod settings;
mod update;

/// Active placement mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Select,
    Wall,
    Door,
    Window,
    Furniture(FurnitureKind),
}

impl Mode {
    const TOOLS: [Mode; 3] = [Mode::Wall, Mode::Door, Mode::Window];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Select => f.write_str("Select"),
            Mode::Wall => f.write_str("Wall"),
            Mode::Door => f.write_str("Door"),
            Mode::Window => f.write_str("Window"),
            Mode::Furniture(kind) => write!(f, "Furniture: {kind}"),
        }
    }
}

/// Toolbar actions that only announce themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StubAction {
    New,
    Open,
    Save,
    Export,
    Undo,
    Redo,
}

impl StubAction {
    const FILE: [StubAction; 4] = [StubAction::New, StubAction::Open, StubAction::Save, StubAction::Export];
    const EDIT: [StubAction; 2] = [StubAction::Undo, StubAction::Redo];

    fn name(self) -> &'static str {
        match self {
            StubAction::New => "New",
            StubAction::Open => "Open",
            StubAction::Save => "Save",
            StubAction::Export => "Export",
            StubAction::Undo => "Undo",
            StubAction::Redo => "Redo",
        }
    }

    fn notice(self) -> String {
        format!("'{}' is not implemented yet. (UI only)", self.name())
    }
}

#[derive(Clone, Copy, Debug)]
struct View {
    pan_screen: egui::Vec2,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            pan_screen: egui::Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 8.0,
        }
    }
}

impl View {
    fn world_to_screen(&self, origin: egui::Pos2, world: egui::Pos2) -> egui::Pos2 {
        origin + self.pan_screen + world.to_vec2() * self.zoom
    }

    fn screen_to_world(&self, origin: egui::Pos2, screen: egui::Pos2) -> egui::Pos2 {
        ((screen - origin - self.pan_screen) / self.zoom).to_pos2()
    }

    fn zoom_about_screen_point(
        &mut self,
        origin: egui::Pos2,
        screen_point: egui::Pos2,
        zoom_delta: f32,
    ) {
        let before = self.screen_to_world(origin, screen_point);
        self.zoom = (self.zoom * zoom_delta).clamp(self.min_zoom, self.max_zoom);
        let after_screen = self.world_to_screen(origin, before);
        self.pan_screen += screen_point - after_screen;
    }
}

pub struct PlanApp {
    scene: scene::Scene,
    view: View,
    zoom_step: f32,
    settings_path: PathBuf,
    last_pointer_world: Option<egui::Pos2>,
    context_hit: Option<u64>,
    notice: Option<StubAction>,
    status: Option<String>,
    command_palette: command_palette::CommandPalette,
    show_help: bool,
}

impl PlanApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = settings::config_path();
        let settings = settings::load_or_default(&settings_path);
        Self::with_settings(settings, settings_path)
    }

    fn with_settings(settings: settings::AppSettings, settings_path: PathBuf) -> Self {
        let view = View {
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            ..View::default()
        };
        Self {
            scene: scene::Scene::new(&settings),
            view,
            zoom_step: settings.zoom_step,
            settings_path,
            last_pointer_world: None,
            context_hit: None,
            notice: None,
            status: None,
            command_palette: command_palette::CommandPalette::default(),
            show_help: false,
        }
    }

    fn trigger_stub(&mut self, action: StubAction) {
        tracing::info!(action = action.name(), "stub action");
        self.notice = Some(action);
    }

    fn zoom_by(&mut self, factor: f32) {
        self.view.zoom = (self.view.zoom * factor).clamp(self.view.min_zoom, self.view.max_zoom);
    }

    fn reload_settings(&mut self) {
        match settings::load_settings(&self.settings_path) {
            Ok(s) => {
                self.scene.grid_size = s.grid_size;
                self.zoom_step = s.zoom_step;
                self.view.min_zoom = s.min_zoom;
                self.view.max_zoom = s.max_zoom;
                self.view.zoom = self.view.zoom.clamp(s.min_zoom, s.max_zoom);
                tracing::info!(path = %self.settings_path.display(), "settings reloaded");
                self.status = Some("Settings reloaded".to_string());
            }
            Err(e) => {
                tracing::warn!(path = %self.settings_path.display(), error = %e, "settings reload failed");
                self.status = Some(format!("Settings reload failed: {e}"));
            }
        }
    }
}
