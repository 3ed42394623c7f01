use crate::model::{self, ElementKind};
use eframe::egui;

use super::geometry::{WALL_HANDLE_RADIUS, corner_handle_rect_world, snap_vec};
use super::scene::{ActiveTransform, HandleRef, Scene};

impl Scene {
    /// Visible handle under the pointer. Corner grips sit above wall handles.
    pub(super) fn handle_at(&self, world: egui::Pos2, zoom: f32) -> Option<HandleRef> {
        for element in self.doc.elements.iter().rev() {
            if let ElementKind::Furniture { rect, handle, .. } = &element.kind {
                if handle.visible && corner_handle_rect_world(rect, zoom).contains(world) {
                    return Some(HandleRef::Corner {
                        furniture_id: handle.owner,
                    });
                }
            }
        }
        for element in self.doc.elements.iter().rev() {
            let ElementKind::Wall {
                handles: Some(handles),
                ..
            } = &element.kind
            else {
                continue;
            };
            if !handles.visible {
                continue;
            }
            for h in [&handles.a, &handles.b] {
                if (h.pos.to_pos2() - world).length() <= WALL_HANDLE_RADIUS {
                    return Some(HandleRef::WallEnd {
                        wall_id: h.wall_id,
                        end: h.end,
                    });
                }
            }
        }
        None
    }

    pub(super) fn begin_handle_drag(&mut self, world: egui::Pos2, zoom: f32) -> bool {
        let Some(handle) = self.handle_at(world, zoom) else {
            return false;
        };
        self.active_transform = match handle {
            HandleRef::WallEnd { wall_id, end } => {
                tracing::debug!(wall_id, ?end, "wall endpoint drag");
                Some(ActiveTransform::WallEndpoint { wall_id, end })
            }
            HandleRef::Corner { furniture_id } => {
                let mut was_movable = false;
                if let Some(ElementKind::Furniture { movable, .. }) =
                    self.doc.element_mut(furniture_id).map(|e| &mut e.kind)
                {
                    was_movable = *movable;
                    *movable = false;
                }
                tracing::debug!(furniture_id, "furniture resize");
                Some(ActiveTransform::FurnitureResize {
                    furniture_id,
                    was_movable,
                })
            }
        };
        true
    }

    /// Starts moving the selection if any selected element can move.
    pub(super) fn begin_move(&mut self, world: egui::Pos2) {
        let any_movable = self.selected.iter().any(|id| {
            self.doc.element(*id).is_some_and(|e| match e.kind {
                ElementKind::Wall { .. } => true,
                ElementKind::Furniture { movable, .. } => movable,
                _ => false,
            })
        });
        if any_movable {
            self.active_transform = Some(ActiveTransform::MoveSelection {
                start_pointer_world: world,
                applied_snapped: egui::Vec2::ZERO,
                applied_free: egui::Vec2::ZERO,
            });
        }
    }

    pub(super) fn drag_to(&mut self, world: egui::Pos2) {
        let Some(transform) = self.active_transform.clone() else {
            return;
        };
        match transform {
            ActiveTransform::WallEndpoint { wall_id, end } => {
                let p = model::Point::from_pos2(self.snap(world));
                if let Some(ElementKind::Wall { a, b, handles }) =
                    self.doc.element_mut(wall_id).map(|e| &mut e.kind)
                {
                    match end {
                        model::WallEnd::A => *a = p,
                        model::WallEnd::B => *b = p,
                    }
                    if let Some(h) = handles {
                        h.get_mut(end).pos = p;
                    }
                }
            }
            ActiveTransform::FurnitureResize { furniture_id, .. } => {
                if let Some(ElementKind::Furniture { furniture, rect, .. }) =
                    self.doc.element_mut(furniture_id).map(|e| &mut e.kind)
                {
                    let min = furniture.min_size();
                    let w = (world.x - rect.min.x).max(min.x);
                    let h = (world.y - rect.min.y).max(min.y);
                    rect.max = model::Point {
                        x: rect.min.x + w,
                        y: rect.min.y + h,
                    };
                }
            }
            ActiveTransform::MoveSelection {
                start_pointer_world,
                applied_snapped,
                applied_free,
            } => {
                let total = world - start_pointer_world;
                let snapped = snap_vec(total, self.grid_size);
                self.translate_selected(snapped - applied_snapped, total - applied_free);
                self.active_transform = Some(ActiveTransform::MoveSelection {
                    start_pointer_world,
                    applied_snapped: snapped,
                    applied_free: total,
                });
            }
        }
    }

    /// Walls move by a grid-snapped offset, furniture moves freely.
    fn translate_selected(&mut self, wall_delta: egui::Vec2, free_delta: egui::Vec2) {
        for element in &mut self.doc.elements {
            if !self.selected.contains(&element.id) {
                continue;
            }
            match &mut element.kind {
                ElementKind::Wall { a, b, handles } => {
                    *a = model::Point::from_pos2(a.to_pos2() + wall_delta);
                    *b = model::Point::from_pos2(b.to_pos2() + wall_delta);
                    if let Some(h) = handles {
                        h.a.pos = *a;
                        h.b.pos = *b;
                    }
                }
                ElementKind::Furniture { rect, movable, .. } if *movable => {
                    rect.translate(free_delta);
                }
                _ => {}
            }
        }
    }

    pub(super) fn release(&mut self) {
        let Some(transform) = self.active_transform.take() else {
            return;
        };
        match transform {
            ActiveTransform::FurnitureResize {
                furniture_id,
                was_movable,
            } => {
                if let Some(ElementKind::Furniture { movable, .. }) =
                    self.doc.element_mut(furniture_id).map(|e| &mut e.kind)
                {
                    *movable = was_movable;
                }
            }
            ActiveTransform::WallEndpoint { .. } | ActiveTransform::MoveSelection { .. } => {
                self.refresh_wall_markers();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Mode;
    use crate::app::settings::AppSettings;
    use crate::model::{FurnitureKind, PlanItem};

    use super::*;

    fn scene_with_wall() -> (Scene, u64) {
        let mut s = Scene::new(&AppSettings::default());
        s.set_mode(Mode::Wall);
        s.press_primary(egui::pos2(0.0, 0.0), false, 1.0);
        s.press_primary(egui::pos2(200.0, 0.0), false, 1.0);
        s.set_mode(Mode::Select);
        let PlanItem::Wall(id) = s.doc.items[0] else {
            panic!("expected wall");
        };
        (s, id)
    }

    fn furniture_rect(s: &Scene, id: u64) -> model::RectF {
        match s.doc.element(id).map(|e| &e.kind) {
            Some(ElementKind::Furniture { rect, .. }) => *rect,
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn test_wall_handles_created_on_select_and_hidden_on_deselect() {
        let (mut s, id) = scene_with_wall();
        assert!(matches!(
            s.doc.element(id).map(|e| &e.kind),
            Some(ElementKind::Wall { handles: None, .. })
        ));
        s.press_primary(egui::pos2(100.0, 2.0), false, 1.0);
        s.release();
        let Some(ElementKind::Wall { handles: Some(h), .. }) = s.doc.element(id).map(|e| &e.kind) else {
            panic!("handles missing");
        };
        assert!(h.visible);
        assert_eq!(h.b.pos.to_pos2(), egui::pos2(200.0, 0.0));

        s.press_primary(egui::pos2(900.0, 900.0), false, 1.0);
        let Some(ElementKind::Wall { handles: Some(h), .. }) = s.doc.element(id).map(|e| &e.kind) else {
            panic!("handles must be kept");
        };
        assert!(!h.visible);
    }

    #[test]
    fn test_wall_endpoint_drag_snaps_and_refreshes_markers() {
        let (mut s, id) = scene_with_wall();
        s.set_selection_single(id);
        s.press_primary(egui::pos2(203.0, 4.0), false, 1.0);
        assert!(matches!(
            s.active_transform,
            Some(ActiveTransform::WallEndpoint { end: model::WallEnd::B, .. })
        ));
        s.drag_to(egui::pos2(240.0, 130.0));
        let Some(ElementKind::Wall { a, b, handles: Some(h) }) = s.doc.element(id).map(|e| &e.kind) else {
            panic!("expected wall");
        };
        assert_eq!(a.to_pos2(), egui::pos2(0.0, 0.0));
        assert_eq!(b.to_pos2(), egui::pos2(250.0, 150.0));
        assert_eq!(h.b.pos, *b);
        // Markers follow only once the drag ends.
        assert_eq!(s.wall_markers[1], egui::pos2(200.0, 0.0));
        s.release();
        assert_eq!(s.wall_markers[1], egui::pos2(250.0, 150.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut s = Scene::new(&AppSettings::default());
        let id = s.place_furniture(FurnitureKind::Table, egui::pos2(100.0, 55.0));
        s.set_selection_single(id);
        // Table spans (0,0)-(200,110); grab the corner.
        s.press_primary(egui::pos2(199.0, 109.0), false, 1.0);
        assert!(matches!(s.active_transform, Some(ActiveTransform::FurnitureResize { .. })));
        assert!(matches!(
            s.doc.element(id).map(|e| &e.kind),
            Some(ElementKind::Furniture { movable: false, .. })
        ));
        s.drag_to(egui::pos2(10.0, -40.0));
        assert_eq!(furniture_rect(&s, id).size(), egui::vec2(100.0, 90.0));
        s.drag_to(egui::pos2(320.0, 250.0));
        assert_eq!(furniture_rect(&s, id).size(), egui::vec2(320.0, 250.0));
        s.release();
        assert!(matches!(
            s.doc.element(id).map(|e| &e.kind),
            Some(ElementKind::Furniture { movable: true, .. })
        ));
    }

    #[test]
    fn test_corner_handle_only_when_selected() {
        let mut s = Scene::new(&AppSettings::default());
        let id = s.place_furniture(FurnitureKind::Sofa, egui::pos2(130.0, 45.0));
        assert_eq!(s.handle_at(egui::pos2(260.0, 90.0), 1.0), None);
        s.set_selection_single(id);
        assert_eq!(
            s.handle_at(egui::pos2(262.0, 92.0), 1.0),
            Some(HandleRef::Corner { furniture_id: id })
        );
    }

    #[test]
    fn test_move_snaps_walls_and_frees_furniture() {
        let (mut s, wall) = scene_with_wall();
        let bed = s.place_furniture(FurnitureKind::Bed, egui::pos2(100.0, 300.0));
        s.press_primary(egui::pos2(100.0, 1.0), false, 1.0);
        s.press_primary(egui::pos2(100.0, 300.0), true, 1.0);
        assert_eq!(s.selected.len(), 2);
        s.drag_to(egui::pos2(130.0, 312.0));
        s.drag_to(egui::pos2(133.0, 320.0));
        let Some(ElementKind::Wall { a, .. }) = s.doc.element(wall).map(|e| &e.kind) else {
            panic!("expected wall");
        };
        // Drag offset (33, 20) snaps to (50, 0).
        assert_eq!(a.to_pos2(), egui::pos2(50.0, 0.0));
        let r = furniture_rect(&s, bed);
        assert_eq!(r.to_rect().center(), egui::pos2(133.0, 320.0));
        s.release();
        assert_eq!(s.wall_markers[0], egui::pos2(50.0, 0.0));
    }

    #[test]
    fn test_door_parts_do_not_move() {
        let mut s = Scene::new(&AppSettings::default());
        s.set_mode(Mode::Door);
        s.press_primary(egui::pos2(0.0, 0.0), false, 1.0);
        s.press_primary(egui::pos2(100.0, 0.0), false, 1.0);
        s.set_mode(Mode::Select);
        s.press_primary(egui::pos2(50.0, 1.0), false, 1.0);
        assert_eq!(s.selected.len(), 1);
        assert!(s.active_transform.is_none());
    }
}
