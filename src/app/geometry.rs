use crate::model;
use eframe::egui;

use super::View;

/// Length of the window end ticks in world units.
pub(super) const WINDOW_TICK_LEN: f32 = 10.0;
/// Radius of wall endpoint handles in world units.
pub(super) const WALL_HANDLE_RADIUS: f32 = 8.0;
/// Side of the furniture corner handle in screen pixels.
pub(super) const CORNER_HANDLE_SIZE: f32 = 14.0;
/// Half the wall pen width, used to widen wall hit tests.
const WALL_HALF_WIDTH: f32 = 2.5;

pub(super) fn snap_to_grid(pos: egui::Pos2, grid: f32) -> egui::Pos2 {
    if grid <= f32::EPSILON {
        return pos;
    }
    egui::pos2((pos.x / grid).round() * grid, (pos.y / grid).round() * grid)
}

pub(super) fn snap_vec(v: egui::Vec2, grid: f32) -> egui::Vec2 {
    snap_to_grid(v.to_pos2(), grid).to_vec2()
}

pub(super) fn door_swing_arc(
    hinge: egui::Pos2,
    end: egui::Pos2,
    counter_clockwise: bool,
) -> model::SwingArc {
    let d = end - hinge;
    let radius = d.length().max(1.0);
    // y grows downward, so the screen-space angle uses -dy.
    let start_deg = (-d.y).atan2(d.x).to_degrees();
    let sweep_deg = if counter_clockwise { 90.0 } else { -90.0 };
    model::SwingArc {
        center: model::Point::from_pos2(hinge),
        radius,
        start_deg,
        sweep_deg,
    }
}

pub(super) fn arc_point(arc: &model::SwingArc, deg: f32) -> egui::Pos2 {
    let phi = deg.to_radians();
    arc.center.to_pos2() + egui::vec2(phi.cos(), -phi.sin()) * arc.radius
}

/// Outline of the swing sector: hinge, then the arc from start to end.
pub(super) fn arc_sector_points_world(arc: &model::SwingArc) -> Vec<egui::Pos2> {
    let steps = 24;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(arc.center.to_pos2());
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        points.push(arc_point(arc, arc.start_deg + arc.sweep_deg * t));
    }
    points
}

pub(super) fn arc_sector_points_screen(
    origin: egui::Pos2,
    view: &View,
    arc: &model::SwingArc,
) -> Vec<egui::Pos2> {
    arc_sector_points_world(arc)
        .into_iter()
        .map(|w| view.world_to_screen(origin, w))
        .collect()
}

pub(super) fn point_in_sector(arc: &model::SwingArc, p: egui::Pos2) -> bool {
    let d = p - arc.center.to_pos2();
    if d.length() > arc.radius {
        return false;
    }
    if d.length() <= f32::EPSILON {
        return true;
    }
    let deg = (-d.y).atan2(d.x).to_degrees();
    let (lo, hi) = if arc.sweep_deg >= 0.0 {
        (arc.start_deg, arc.start_deg + arc.sweep_deg)
    } else {
        (arc.start_deg + arc.sweep_deg, arc.start_deg)
    };
    let rel = (deg - lo).rem_euclid(360.0);
    rel <= hi - lo
}

/// Tick segments at both ends of a window, perpendicular to it.
/// A zero-length window gets horizontal ticks.
pub(super) fn window_ticks(a: egui::Pos2, b: egui::Pos2) -> [(egui::Pos2, egui::Pos2); 2] {
    let d = b - a;
    let len = d.length();
    let perp = if len <= f32::EPSILON {
        egui::vec2(1.0, 0.0)
    } else {
        egui::vec2(-d.y, d.x) / len
    };
    let half = perp * (WINDOW_TICK_LEN * 0.5);
    [(a - half, a + half), (b - half, b + half)]
}

pub(super) fn hit_test_element(element: &model::Element, p: egui::Pos2, threshold: f32) -> bool {
    match &element.kind {
        model::ElementKind::Wall { a, b, .. } => {
            model::distance_to_segment(p, a.to_pos2(), b.to_pos2()) <= threshold + WALL_HALF_WIDTH
        }
        model::ElementKind::DoorLeaf { hinge, end } => {
            model::distance_to_segment(p, hinge.to_pos2(), end.to_pos2()) <= threshold
        }
        model::ElementKind::DoorSwing { arc } => point_in_sector(arc, p),
        model::ElementKind::WindowPane { a, b } | model::ElementKind::WindowTick { a, b } => {
            model::distance_to_segment(p, a.to_pos2(), b.to_pos2()) <= threshold
        }
        model::ElementKind::Furniture { rect, .. } => rect.to_rect().expand(threshold).contains(p),
    }
}

pub(super) fn corner_handle_rect_world(rect: &model::RectF, zoom: f32) -> egui::Rect {
    let size = CORNER_HANDLE_SIZE / zoom.max(f32::EPSILON);
    egui::Rect::from_center_size(rect.max.to_pos2(), egui::Vec2::splat(size))
}
