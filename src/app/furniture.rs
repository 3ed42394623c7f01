//! Procedural drawings for furniture pieces.
//!
//! Every recipe is a pure function of the piece size and yields primitives
//! in local coordinates, with the origin at the top-left corner of the piece.

use crate::model::FurnitureKind;
use eframe::egui;

pub(super) const FILL_BODY: egui::Color32 = egui::Color32::from_gray(240);
pub(super) const FILL_BAND: egui::Color32 = egui::Color32::from_gray(220);
pub(super) const FILL_SOFT: egui::Color32 = egui::Color32::WHITE;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum Primitive {
    Rect {
        rect: egui::Rect,
        fill: egui::Color32,
        stroke_width: f32,
    },
    RoundedRect {
        rect: egui::Rect,
        radius: f32,
        fill: egui::Color32,
        stroke_width: f32,
    },
    Line {
        a: egui::Pos2,
        b: egui::Pos2,
        stroke_width: f32,
    },
}

fn rect(x: f32, y: f32, w: f32, h: f32, fill: egui::Color32, stroke_width: f32) -> Primitive {
    Primitive::Rect {
        rect: egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h)),
        fill,
        stroke_width,
    }
}

pub(super) fn recipe(kind: FurnitureKind, size: egui::Vec2) -> Vec<Primitive> {
    match kind {
        FurnitureKind::Bed => bed(size.x, size.y),
        FurnitureKind::Sofa => sofa(size.x, size.y),
        FurnitureKind::Table => table(size.x, size.y),
        FurnitureKind::Wardrobe => wardrobe(size.x, size.y),
    }
}

fn bed(w: f32, h: f32) -> Vec<Primitive> {
    let head_h = (h * 0.2).min(20.0);
    let pw = w * 0.2;
    let ph = h * 0.18;
    vec![
        rect(0.0, 0.0, w, h, FILL_BODY, 2.0),
        rect(0.0, 0.0, w, head_h, FILL_BAND, 1.0),
        rect(10.0, 5.0, pw, ph, FILL_SOFT, 1.0),
        rect(w - 10.0 - pw, 5.0, pw, ph, FILL_SOFT, 1.0),
    ]
}

fn sofa(w: f32, h: f32) -> Vec<Primitive> {
    let cw = w * 0.2;
    let ch = h * 0.4;
    vec![
        rect(0.0, 0.0, w, h, FILL_BODY, 2.0),
        rect(0.0, 0.0, w, h * 0.2, FILL_BAND, 1.0),
        rect(12.0, h * 0.25, cw, ch, FILL_SOFT, 1.0),
        rect(w - 12.0 - cw, h * 0.25, cw, ch, FILL_SOFT, 1.0),
    ]
}

/// Table top with three chairs along each long side.
fn table(w: f32, h: f32) -> Vec<Primitive> {
    let m = (w.min(h) * 0.08).max(6.0);
    let seat_h = (h * 0.16).max(18.0);
    let back_h = (seat_h * 0.3).max(6.0);
    let top_gap = (h * 0.08).max(6.0);
    let table_w = (w - 2.0 * m).max(40.0);
    let table_h = (h - 2.0 * (m + seat_h + back_h)).max(30.0);
    let table_x = (w - table_w) / 2.0;
    let table_y = m + seat_h + back_h;

    let mut out = vec![Primitive::RoundedRect {
        rect: egui::Rect::from_min_size(egui::pos2(table_x, table_y), egui::vec2(table_w, table_h)),
        radius: 12.0,
        fill: FILL_BODY,
        stroke_width: 2.0,
    }];

    let seat_w = (table_w * 0.18).max(24.0);
    let spacing = ((table_w - 3.0 * seat_w) / 4.0).max(4.0);
    let y_top_seat = m + back_h - top_gap;
    let y_top_back = m - top_gap;
    let y_bot_seat = table_y + table_h + m;
    let y_bot_back = y_bot_seat + seat_h;

    let mut cx = table_x + spacing;
    for _ in 0..3 {
        out.push(rect(cx, y_top_seat, seat_w, seat_h, FILL_SOFT, 1.0));
        out.push(rect(cx, y_top_back, seat_w, back_h, FILL_SOFT, 1.0));
        out.push(rect(cx, y_bot_seat, seat_w, seat_h, FILL_SOFT, 1.0));
        out.push(rect(cx, y_bot_back, seat_w, back_h, FILL_SOFT, 1.0));
        cx += seat_w + spacing;
    }
    out
}

fn wardrobe(w: f32, h: f32) -> Vec<Primitive> {
    let margin = (w.min(h) * 0.05).max(4.0);
    let base_h = (h * 0.06).max(4.0);
    let handle_h = (h * 0.18).max(12.0);
    let handle_w = (w * 0.06).max(4.0);
    let gap = (w * 0.06).max(6.0);
    let y = (h - handle_h) / 2.0;
    let x_left = w * 0.5 - gap - handle_w;
    let x_right = w * 0.5 + gap;
    let handle = |x: f32| Primitive::RoundedRect {
        rect: egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(handle_w, handle_h)),
        radius: 2.0,
        fill: FILL_SOFT,
        stroke_width: 1.0,
    };
    vec![
        rect(0.0, 0.0, w, h, FILL_BODY, 2.0),
        Primitive::Line {
            a: egui::pos2(w * 0.5, margin),
            b: egui::pos2(w * 0.5, h - margin),
            stroke_width: 1.0,
        },
        rect(0.0, h - base_h, w, base_h, FILL_BAND, 1.0),
        handle(x_left),
        handle(x_right),
    ]
}
