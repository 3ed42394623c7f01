use crate::model;
use eframe::egui;

use super::furniture::{self, Primitive};
use super::geometry::{WALL_HANDLE_RADIUS, CORNER_HANDLE_SIZE, arc_sector_points_screen};
use super::scene::{HandleRef, Scene};
use super::{Mode, View};

const WALL_COLOR: egui::Color32 = egui::Color32::BLACK;
const WALL_HOVER_COLOR: egui::Color32 = egui::Color32::from_rgb(50, 100, 255);
const WALL_GLOW_RGBA: [u8; 4] = [100, 150, 255, 180];
const WALL_WIDTH: f32 = 5.0;
const MARKER_FILL: egui::Color32 = egui::Color32::GREEN;
const DOOR_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 255);
const WINDOW_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);

pub(super) fn mode_button(ui: &mut egui::Ui, label: &str, mode: Mode, current: Mode) -> bool {
    ui.selectable_label(current == mode, label).clicked()
}

/// White sheet with a light grid; every fifth line is drawn heavier.
pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, view: &View, grid: f32) {
    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    let spacing_screen = grid * view.zoom;
    if grid <= f32::EPSILON || spacing_screen < 6.0 {
        return;
    }
    let origin = rect.min;
    let grid_color = egui::Color32::from_rgba_unmultiplied(0, 0, 0, 80);
    let world_min = view.screen_to_world(origin, rect.min);
    let world_max = view.screen_to_world(origin, rect.max);
    let width_for = |step: i64| if step % 5 == 0 { 1.4 } else { 1.0 };

    let mut ix = (world_min.x / grid).floor() as i64;
    while (ix as f32) * grid <= world_max.x {
        let x = view.world_to_screen(origin, egui::pos2(ix as f32 * grid, 0.0)).x;
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(width_for(ix), grid_color),
        );
        ix += 1;
    }
    let mut iy = (world_min.y / grid).floor() as i64;
    while (iy as f32) * grid <= world_max.y {
        let y = view.world_to_screen(origin, egui::pos2(0.0, iy as f32 * grid)).y;
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(width_for(iy), grid_color),
        );
        iy += 1;
    }
}

pub(super) fn draw_scene(painter: &egui::Painter, origin: egui::Pos2, view: &View, scene: &Scene) {
    for element in scene.paint_order() {
        let hovered = scene.hovered == Some(element.id);
        draw_element(painter, origin, view, element, hovered);
        if scene.selected.contains(&element.id) {
            let r = egui::Rect::from_two_pos(
                view.world_to_screen(origin, element.bounds().min),
                view.world_to_screen(origin, element.bounds().max),
            );
            draw_selection_bounds(painter, r.expand(3.0));
        }
    }
    draw_handles(painter, origin, view, scene);
    for p in &scene.wall_markers {
        painter.circle(
            view.world_to_screen(origin, *p),
            4.0 * view.zoom,
            MARKER_FILL,
            egui::Stroke::new(1.0, egui::Color32::from_gray(128)),
        );
    }
}

fn draw_element(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    element: &model::Element,
    hovered: bool,
) {
    let to_screen = |p: &model::Point| view.world_to_screen(origin, p.to_pos2());
    match &element.kind {
        model::ElementKind::Wall { a, b, .. } => {
            let seg = [to_screen(a), to_screen(b)];
            if hovered {
                let [r, g, b, a] = WALL_GLOW_RGBA;
                let glow = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
                painter.line_segment(seg, egui::Stroke::new((WALL_WIDTH + 10.0) * view.zoom, glow));
                painter.line_segment(seg, egui::Stroke::new(WALL_WIDTH * view.zoom, WALL_HOVER_COLOR));
            } else {
                painter.line_segment(seg, egui::Stroke::new(WALL_WIDTH * view.zoom, WALL_COLOR));
            }
        }
        model::ElementKind::DoorLeaf { hinge, end } => {
            painter.line_segment(
                [to_screen(hinge), to_screen(end)],
                egui::Stroke::new(3.0 * view.zoom, DOOR_COLOR),
            );
        }
        model::ElementKind::DoorSwing { arc } => {
            let points = arc_sector_points_screen(origin, view, arc);
            painter.add(egui::Shape::convex_polygon(
                points,
                egui::Color32::from_rgba_unmultiplied(0, 0, 255, 50),
                egui::Stroke::new(1.0 * view.zoom, DOOR_COLOR),
            ));
        }
        model::ElementKind::WindowPane { a, b } => {
            draw_dashed_line(
                painter,
                to_screen(a),
                to_screen(b),
                egui::Stroke::new(3.0 * view.zoom, WINDOW_COLOR),
                10.0 * view.zoom,
                5.0 * view.zoom,
            );
        }
        model::ElementKind::WindowTick { a, b } => {
            painter.line_segment(
                [to_screen(a), to_screen(b)],
                egui::Stroke::new(2.0 * view.zoom, WINDOW_COLOR),
            );
        }
        model::ElementKind::Furniture {
            furniture: kind,
            rect,
            ..
        } => {
            let top_left = rect.min.to_pos2();
            let map = |local: egui::Pos2| view.world_to_screen(origin, top_left + local.to_vec2());
            let outline = |w: f32| egui::Stroke::new(w * view.zoom, egui::Color32::BLACK);
            for prim in furniture::recipe(*kind, rect.size()) {
                match prim {
                    Primitive::Rect {
                        rect,
                        fill,
                        stroke_width,
                    } => {
                        let r = egui::Rect::from_two_pos(map(rect.min), map(rect.max));
                        painter.rect(r, 0.0, fill, outline(stroke_width), egui::StrokeKind::Middle);
                    }
                    Primitive::RoundedRect {
                        rect,
                        radius,
                        fill,
                        stroke_width,
                    } => {
                        let r = egui::Rect::from_two_pos(map(rect.min), map(rect.max));
                        painter.rect(
                            r,
                            radius * view.zoom,
                            fill,
                            outline(stroke_width),
                            egui::StrokeKind::Middle,
                        );
                    }
                    Primitive::Line { a, b, stroke_width } => {
                        painter.line_segment([map(a), map(b)], outline(stroke_width));
                    }
                }
            }
        }
    }
}

fn draw_handles(painter: &egui::Painter, origin: egui::Pos2, view: &View, scene: &Scene) {
    let outline = egui::Stroke::new(1.0, egui::Color32::BLACK);
    for element in &scene.doc.elements {
        match &element.kind {
            model::ElementKind::Wall {
                handles: Some(handles),
                ..
            } if handles.visible => {
                for h in [&handles.a, &handles.b] {
                    painter.circle(
                        view.world_to_screen(origin, h.pos.to_pos2()),
                        WALL_HANDLE_RADIUS * view.zoom,
                        egui::Color32::WHITE,
                        outline,
                    );
                }
            }
            model::ElementKind::Furniture { rect, handle, .. } if handle.visible => {
                let hot = scene.hovered_handle
                    == Some(HandleRef::Corner {
                        furniture_id: handle.owner,
                    });
                let fill = if hot {
                    egui::Color32::from_gray(230)
                } else {
                    egui::Color32::WHITE
                };
                // Fixed on-screen size regardless of zoom.
                let r = egui::Rect::from_center_size(
                    view.world_to_screen(origin, rect.max.to_pos2()),
                    egui::Vec2::splat(CORNER_HANDLE_SIZE),
                );
                painter.rect(r, 0.0, fill, outline, egui::StrokeKind::Middle);
            }
            _ => {}
        }
    }
}

fn draw_selection_bounds(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, SELECTION_COLOR);
    painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
}

fn draw_dashed_line(
    painter: &egui::Painter,
    a: egui::Pos2,
    b: egui::Pos2,
    stroke: egui::Stroke,
    dash_len: f32,
    gap_len: f32,
) {
    let v = b - a;
    let len = v.length();
    if len <= f32::EPSILON || dash_len <= f32::EPSILON {
        return;
    }
    let dir = v / len;
    let mut pos = 0.0;
    let mut drawing = true;
    while pos < len {
        let seg_len = if drawing { dash_len } else { gap_len.max(f32::EPSILON) };
        let next_pos = (pos + seg_len).min(len);
        if drawing {
            painter.line_segment([a + dir * pos, a + dir * next_pos], stroke);
        }
        pos = next_pos;
        drawing = !drawing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_glow_and_marker_colors() {
        let [r, g, b, a] = WALL_GLOW_RGBA;
        let glow = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
        assert_eq!(glow.a(), 180);
        assert_eq!(MARKER_FILL, egui::Color32::from_rgb(0, 255, 0));
    }
}
