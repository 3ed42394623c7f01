use crate::model::{self, ElementKind, FurnitureKind, PlanItem, Point};
use eframe::egui;
use std::collections::HashSet;

use super::geometry::{door_swing_arc, hit_test_element, snap_to_grid, window_ticks};
use super::settings::AppSettings;
use super::Mode;

/// Shapes that are placed with two clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Placement {
    Wall,
    Door,
    Window,
}

/// The single shape currently being drawn.
///
/// `part_ids` is `[wall]`, `[leaf, swing]` or `[pane, tick, tick]`.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct InProgress {
    pub placement: Placement,
    pub anchor: egui::Pos2,
    pub group_id: Option<u64>,
    pub part_ids: Vec<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum HandleRef {
    WallEnd { wall_id: u64, end: model::WallEnd },
    Corner { furniture_id: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum ActiveTransform {
    WallEndpoint {
        wall_id: u64,
        end: model::WallEnd,
    },
    FurnitureResize {
        furniture_id: u64,
        was_movable: bool,
    },
    MoveSelection {
        start_pointer_world: egui::Pos2,
        applied_snapped: egui::Vec2,
        applied_free: egui::Vec2,
    },
}

pub(super) struct Scene {
    pub doc: model::Document,
    pub selected: HashSet<u64>,
    pub mode: Mode,
    pub in_progress: Option<InProgress>,
    pub door_counter_clockwise: bool,
    pub grid_size: f32,
    pub hovered: Option<u64>,
    pub hovered_handle: Option<HandleRef>,
    pub active_transform: Option<ActiveTransform>,
    pub wall_markers: Vec<egui::Pos2>,
    next_id: u64,
    next_group_id: u64,
}

impl Scene {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            doc: model::Document::default(),
            selected: HashSet::new(),
            mode: Mode::Select,
            in_progress: None,
            door_counter_clockwise: settings.door_counter_clockwise,
            grid_size: settings.grid_size,
            hovered: None,
            hovered_handle: None,
            active_transform: None,
            wall_markers: Vec::new(),
            next_id: 1,
            next_group_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn allocate_group_id(&mut self) -> u64 {
        let id = self.next_group_id;
        self.next_group_id += 1;
        id
    }

    pub fn snap(&self, pos: egui::Pos2) -> egui::Pos2 {
        snap_to_grid(pos, self.grid_size)
    }

    pub fn is_placing(&self) -> bool {
        self.in_progress.is_some()
    }

    fn is_in_progress_part(&self, id: u64) -> bool {
        self.in_progress
            .as_ref()
            .is_some_and(|ip| ip.part_ids.contains(&id))
    }

    /// Walls paint above doors, windows and furniture.
    pub fn paint_order(&self) -> impl Iterator<Item = &model::Element> {
        let others = self.doc.elements.iter().filter(|e| !e.is_wall());
        let walls = self.doc.elements.iter().filter(|e| e.is_wall());
        others.chain(walls)
    }

    pub fn topmost_hit(&self, world_pos: egui::Pos2, threshold_world: f32) -> Option<u64> {
        let ordered: Vec<&model::Element> = self.paint_order().collect();
        ordered
            .into_iter()
            .rev()
            .filter(|e| !self.is_in_progress_part(e.id))
            .find(|e| hit_test_element(e, world_pos, threshold_world))
            .map(|e| e.id)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.in_progress.is_some() {
            self.cancel_placement();
        }
        if self.mode != mode {
            tracing::info!(%mode, "mode changed");
        }
        self.mode = mode;
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.sync_handles();
    }

    pub fn set_selection_single(&mut self, id: u64) {
        self.selected.clear();
        self.selected.insert(id);
        self.sync_handles();
    }

    pub fn toggle_selection(&mut self, id: u64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.sync_handles();
    }

    /// Shows handles of selected walls and furniture and hides the rest.
    /// Wall handles are created on first selection and only hidden afterwards.
    pub fn sync_handles(&mut self) {
        for element in &mut self.doc.elements {
            let id = element.id;
            let is_selected = self.selected.contains(&id);
            match &mut element.kind {
                ElementKind::Wall { a, b, handles } => {
                    if is_selected {
                        let h = handles.get_or_insert_with(|| model::WallHandles::new(id, *a, *b));
                        h.a.pos = *a;
                        h.b.pos = *b;
                        h.visible = true;
                    } else if let Some(h) = handles {
                        h.visible = false;
                    }
                }
                ElementKind::Furniture { handle, .. } => handle.visible = is_selected,
                _ => {}
            }
        }
    }

    /// Left button press at a world position.
    pub fn press_primary(&mut self, world: egui::Pos2, multi: bool, zoom: f32) {
        let threshold = 6.0 / zoom.max(f32::EPSILON);
        if self.begin_handle_drag(world, zoom) {
            return;
        }

        let hit = self.topmost_hit(world, threshold);
        let hit_furniture = hit.is_some_and(|id| self.doc.element(id).is_some_and(|e| e.is_furniture()));
        if self.mode == Mode::Select || hit_furniture {
            match hit {
                Some(id) => {
                    if multi {
                        self.toggle_selection(id);
                    } else if !self.selected.contains(&id) {
                        self.set_selection_single(id);
                    }
                    if self.selected.contains(&id) {
                        self.begin_move(world);
                    }
                }
                None => {
                    if !multi {
                        self.clear_selection();
                    }
                }
            }
            return;
        }

        let p = self.snap(world);
        match self.mode {
            Mode::Select => {}
            Mode::Wall => self.place_or_commit(Placement::Wall, p),
            Mode::Door => self.place_or_commit(Placement::Door, p),
            Mode::Window => self.place_or_commit(Placement::Window, p),
            Mode::Furniture(kind) => {
                self.place_furniture(kind, p);
            }
        }
    }

    /// Right button press. Cancels a placement, otherwise returns the part under
    /// the pointer (selecting it) for the context menu.
    pub fn press_secondary(&mut self, world: egui::Pos2, zoom: f32) -> Option<u64> {
        if self.in_progress.is_some() {
            self.cancel_placement();
            return None;
        }
        let hit = self.topmost_hit(world, 6.0 / zoom.max(f32::EPSILON))?;
        if !self.selected.contains(&hit) {
            self.set_selection_single(hit);
        }
        Some(hit)
    }

    /// Pointer moved without a drag transform: hover state and live preview.
    pub fn pointer_moved(&mut self, world: egui::Pos2, zoom: f32) {
        self.hovered_handle = self.handle_at(world, zoom);
        self.hovered = self.topmost_hit(world, 6.0 / zoom.max(f32::EPSILON));
        if self.in_progress.is_some() {
            let p = self.snap(world);
            self.update_preview(p);
        }
    }

    pub fn pointer_left(&mut self) {
        self.hovered = None;
        self.hovered_handle = None;
    }

    fn place_or_commit(&mut self, placement: Placement, p: egui::Pos2) {
        match &self.in_progress {
            None => self.start_placement(placement, p),
            Some(ip) if ip.placement == placement => self.commit_placement(p),
            Some(_) => {
                self.cancel_placement();
                self.mode = match placement {
                    Placement::Wall => Mode::Wall,
                    Placement::Door => Mode::Door,
                    Placement::Window => Mode::Window,
                };
                self.start_placement(placement, p);
            }
        }
    }

    fn start_placement(&mut self, placement: Placement, p: egui::Pos2) {
        let pt = Point::from_pos2(p);
        let (group_id, part_ids) = match placement {
            Placement::Wall => {
                let id = self.allocate_id();
                self.doc.elements.push(model::Element {
                    id,
                    group_id: None,
                    kind: ElementKind::Wall {
                        a: pt,
                        b: pt,
                        handles: None,
                    },
                });
                self.wall_markers.clear();
                (None, vec![id])
            }
            Placement::Door => {
                let group = self.allocate_group_id();
                let leaf = self.allocate_id();
                let swing = self.allocate_id();
                let arc = door_swing_arc(p, p, self.door_counter_clockwise);
                self.doc.elements.push(model::Element {
                    id: leaf,
                    group_id: Some(group),
                    kind: ElementKind::DoorLeaf { hinge: pt, end: pt },
                });
                self.doc.elements.push(model::Element {
                    id: swing,
                    group_id: Some(group),
                    kind: ElementKind::DoorSwing { arc },
                });
                (Some(group), vec![leaf, swing])
            }
            Placement::Window => {
                let group = self.allocate_group_id();
                let pane = self.allocate_id();
                self.doc.elements.push(model::Element {
                    id: pane,
                    group_id: Some(group),
                    kind: ElementKind::WindowPane { a: pt, b: pt },
                });
                let mut ids = vec![pane];
                for (ta, tb) in window_ticks(p, p) {
                    let tick = self.allocate_id();
                    self.doc.elements.push(model::Element {
                        id: tick,
                        group_id: Some(group),
                        kind: ElementKind::WindowTick {
                            a: Point::from_pos2(ta),
                            b: Point::from_pos2(tb),
                        },
                    });
                    ids.push(tick);
                }
                (Some(group), ids)
            }
        };
        tracing::debug!(?placement, x = p.x, y = p.y, "placement started");
        self.in_progress = Some(InProgress {
            placement,
            anchor: p,
            group_id,
            part_ids,
        });
    }

    /// Moves the free endpoint of the in-progress shape and re-derives its parts.
    fn update_preview(&mut self, p: egui::Pos2) {
        let Some(ip) = self.in_progress.clone() else {
            return;
        };
        let anchor = ip.anchor;
        match ip.placement {
            Placement::Wall => {
                if let Some(ElementKind::Wall { b, .. }) = ip
                    .part_ids
                    .first()
                    .and_then(|id| self.doc.element_mut(*id))
                    .map(|e| &mut e.kind)
                {
                    *b = Point::from_pos2(p);
                }
            }
            Placement::Door => {
                let arc = door_swing_arc(anchor, p, self.door_counter_clockwise);
                for id in &ip.part_ids {
                    match self.doc.element_mut(*id).map(|e| &mut e.kind) {
                        Some(ElementKind::DoorLeaf { end, .. }) => *end = Point::from_pos2(p),
                        Some(ElementKind::DoorSwing { arc: a }) => *a = arc,
                        _ => {}
                    }
                }
            }
            Placement::Window => {
                let mut ticks = window_ticks(anchor, p).into_iter();
                for id in &ip.part_ids {
                    match self.doc.element_mut(*id).map(|e| &mut e.kind) {
                        Some(ElementKind::WindowPane { b, .. }) => *b = Point::from_pos2(p),
                        Some(ElementKind::WindowTick { a, b }) => {
                            if let Some((ta, tb)) = ticks.next() {
                                *a = Point::from_pos2(ta);
                                *b = Point::from_pos2(tb);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn commit_placement(&mut self, p: egui::Pos2) {
        self.update_preview(p);
        let Some(ip) = self.in_progress.take() else {
            return;
        };
        let item = match (ip.placement, ip.group_id, ip.part_ids.first()) {
            (Placement::Wall, _, Some(id)) => PlanItem::Wall(*id),
            (Placement::Door, Some(group), _) => PlanItem::Door(group),
            (Placement::Window, Some(group), _) => PlanItem::Window(group),
            _ => return,
        };
        tracing::info!(?item, from = ?ip.anchor, to = ?p, "committed");
        self.doc.items.push(item);
        self.refresh_wall_markers();
    }

    /// Places a piece centred on `p` and returns to select mode.
    pub fn place_furniture(&mut self, kind: FurnitureKind, p: egui::Pos2) -> u64 {
        let id = self.allocate_id();
        self.doc.elements.push(model::Element {
            id,
            group_id: None,
            kind: ElementKind::Furniture {
                furniture: kind,
                rect: model::RectF::from_center_size(p, kind.default_size()),
                handle: model::CornerHandle {
                    owner: id,
                    visible: false,
                },
                movable: true,
            },
        });
        self.doc.items.push(PlanItem::Furniture(id));
        tracing::info!(%kind, x = p.x, y = p.y, "furniture placed");
        self.mode = Mode::Select;
        id
    }

    /// Drops the in-progress shape and returns to select mode.
    pub fn cancel_placement(&mut self) -> bool {
        let Some(ip) = self.in_progress.take() else {
            return false;
        };
        self.doc.elements.retain(|e| !ip.part_ids.contains(&e.id));
        for id in &ip.part_ids {
            self.selected.remove(id);
        }
        if self.hovered.is_some_and(|id| ip.part_ids.contains(&id)) {
            self.hovered = None;
        }
        tracing::debug!(placement = ?ip.placement, "placement cancelled");
        self.mode = Mode::Select;
        self.refresh_wall_markers();
        true
    }

    pub fn escape(&mut self) {
        self.cancel_placement();
        self.set_mode(Mode::Select);
    }

    /// Flips the door swing. Only acts while a door is being placed.
    pub fn toggle_door_swing(&mut self) -> bool {
        let Some(ip) = self.in_progress.clone() else {
            return false;
        };
        if ip.placement != Placement::Door {
            return false;
        }
        self.door_counter_clockwise = !self.door_counter_clockwise;
        let end = ip.part_ids.iter().find_map(|id| match self.doc.element(*id).map(|e| &e.kind) {
            Some(ElementKind::DoorLeaf { end, .. }) => Some(end.to_pos2()),
            _ => None,
        });
        if let Some(end) = end {
            self.update_preview(end);
        }
        tracing::debug!(counter_clockwise = self.door_counter_clockwise, "door swing flipped");
        true
    }

    /// Deletes the selection. Doors and windows go as a whole group, once per group.
    pub fn delete_selected(&mut self) -> usize {
        if self.selected.is_empty() {
            return 0;
        }
        let mut ids: Vec<u64> = self.selected.iter().copied().collect();
        ids.sort_unstable();

        let mut removed: HashSet<u64> = HashSet::new();
        let mut removed_groups: HashSet<u64> = HashSet::new();
        for id in ids {
            let Some(element) = self.doc.element(id) else {
                continue;
            };
            match element.group_id {
                Some(group) => {
                    if removed_groups.insert(group) {
                        removed.extend(self.doc.group_members(group));
                    }
                }
                None => {
                    removed.insert(id);
                }
            }
        }

        self.doc.elements.retain(|e| !removed.contains(&e.id));
        let items_before = self.doc.items.len();
        self.doc.items.retain(|item| match item {
            PlanItem::Wall(id) | PlanItem::Furniture(id) => !removed.contains(id),
            PlanItem::Door(group) | PlanItem::Window(group) => !removed_groups.contains(group),
        });
        if self
            .in_progress
            .as_ref()
            .is_some_and(|ip| ip.part_ids.iter().any(|id| removed.contains(id)))
        {
            self.in_progress = None;
        }
        if self.hovered.is_some_and(|id| removed.contains(&id)) {
            self.hovered = None;
        }
        self.hovered_handle = None;
        self.active_transform = None;
        self.selected.clear();
        self.refresh_wall_markers();

        let items_removed = items_before - self.doc.items.len();
        tracing::info!(elements = removed.len(), items = items_removed, "deleted selection");
        removed.len()
    }

    /// Markers sit on every committed wall end, except while a wall is being drawn.
    pub fn refresh_wall_markers(&mut self) {
        let drawing_wall = self
            .in_progress
            .as_ref()
            .is_some_and(|ip| ip.placement == Placement::Wall);
        if drawing_wall {
            self.wall_markers.clear();
        } else {
            self.wall_markers = self.doc.committed_wall_endpoints();
        }
    }

    pub fn status_line(&self, pointer_world: Option<egui::Pos2>) -> String {
        let base = format!("Mode: {} | Zoom: Ctrl+Wheel | Pan: Space+Drag", self.mode);
        match pointer_world {
            Some(p) => format!("x={:.0} y={:.0} | {base}", p.x, p.y),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(&AppSettings::default())
    }

    fn click(scene: &mut Scene, x: f32, y: f32) {
        scene.press_primary(egui::pos2(x, y), false, 1.0);
    }

    fn wall_ends(scene: &Scene, id: u64) -> (egui::Pos2, egui::Pos2) {
        match scene.doc.element(id).map(|e| &e.kind) {
            Some(ElementKind::Wall { a, b, .. }) => (a.to_pos2(), b.to_pos2()),
            other => panic!("not a wall: {other:?}"),
        }
    }

    #[test]
    fn test_wall_commit_snaps_both_ends() {
        let mut s = scene();
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 0.0);
        assert!(s.is_placing());
        click(&mut s, 123.0, 77.0);
        assert!(!s.is_placing());
        assert_eq!(s.doc.items.len(), 1);
        let PlanItem::Wall(id) = s.doc.items[0] else {
            panic!("expected wall item");
        };
        assert_eq!(wall_ends(&s, id), (egui::pos2(0.0, 0.0), egui::pos2(100.0, 100.0)));
        assert_eq!(s.mode, Mode::Wall);
    }

    #[test]
    fn test_wall_preview_then_commit() {
        let mut s = scene();
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 0.0);
        s.pointer_moved(egui::pos2(203.0, 9.0), 1.0);
        let id = s.in_progress.as_ref().unwrap().part_ids[0];
        assert_eq!(wall_ends(&s, id).1, egui::pos2(200.0, 0.0));
        assert!(s.doc.items.is_empty());
        click(&mut s, 203.0, 9.0);
        assert_eq!(s.doc.items, vec![PlanItem::Wall(id)]);
        assert_eq!(wall_ends(&s, id), (egui::pos2(0.0, 0.0), egui::pos2(200.0, 0.0)));
    }

    #[test]
    fn test_markers_hidden_while_drawing_wall() {
        let mut s = scene();
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 100.0, 0.0);
        assert_eq!(s.wall_markers.len(), 2);
        click(&mut s, 100.0, 0.0);
        assert!(s.wall_markers.is_empty());
        s.press_secondary(egui::pos2(0.0, 0.0), 1.0);
        assert_eq!(s.wall_markers, vec![egui::pos2(0.0, 0.0), egui::pos2(100.0, 0.0)]);
    }

    #[test]
    fn test_cancel_removes_preview_parts() {
        let mut s = scene();
        s.set_mode(Mode::Window);
        click(&mut s, 0.0, 0.0);
        assert_eq!(s.doc.elements.len(), 3);
        s.pointer_moved(egui::pos2(150.0, 0.0), 1.0);
        s.escape();
        assert!(s.doc.elements.is_empty());
        assert!(s.doc.items.is_empty());
        assert_eq!(s.mode, Mode::Select);
    }

    #[test]
    fn test_right_click_cancels_door() {
        let mut s = scene();
        s.set_mode(Mode::Door);
        click(&mut s, 50.0, 50.0);
        assert_eq!(s.doc.elements.len(), 2);
        assert_eq!(s.press_secondary(egui::pos2(60.0, 60.0), 1.0), None);
        assert!(s.doc.elements.is_empty());
        assert_eq!(s.mode, Mode::Select);
    }

    #[test]
    fn test_escape_without_placement_returns_to_select() {
        let mut s = scene();
        s.set_mode(Mode::Furniture(FurnitureKind::Sofa));
        s.escape();
        assert_eq!(s.mode, Mode::Select);
    }

    #[test]
    fn test_mode_change_cancels_placement() {
        let mut s = scene();
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 0.0);
        s.set_mode(Mode::Door);
        assert!(s.doc.elements.is_empty());
        assert_eq!(s.mode, Mode::Door);
    }

    #[test]
    fn test_furniture_placed_centred_and_mode_reverts() {
        let mut s = scene();
        s.set_mode(Mode::Furniture(FurnitureKind::Bed));
        click(&mut s, 310.0, 190.0);
        assert_eq!(s.mode, Mode::Select);
        assert_eq!(s.doc.items.len(), 1);
        let Some(ElementKind::Furniture { rect, movable, .. }) = s.doc.elements.first().map(|e| &e.kind) else {
            panic!("expected furniture");
        };
        assert!(*movable);
        assert_eq!(rect.to_rect().center(), egui::pos2(300.0, 200.0));
        assert_eq!(rect.size(), egui::vec2(200.0, 160.0));
    }

    #[test]
    fn test_click_on_furniture_in_wall_mode_selects() {
        let mut s = scene();
        let id = s.place_furniture(FurnitureKind::Table, egui::pos2(500.0, 500.0));
        s.set_mode(Mode::Wall);
        click(&mut s, 510.0, 505.0);
        assert!(!s.is_placing());
        assert!(s.selected.contains(&id));
        assert_eq!(s.mode, Mode::Wall);
    }

    #[test]
    fn test_door_commit_builds_group() {
        let mut s = scene();
        s.set_mode(Mode::Door);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 100.0, 0.0);
        let [PlanItem::Door(group)] = s.doc.items[..] else {
            panic!("expected one door");
        };
        let members = s.doc.group_members(group);
        assert_eq!(members.len(), 2);
        let arc = s.doc.elements.iter().find_map(|e| match e.kind {
            ElementKind::DoorSwing { arc } => Some(arc),
            _ => None,
        });
        let arc = arc.unwrap();
        assert_eq!(arc.radius, 100.0);
        assert_eq!(arc.sweep_deg, 90.0);
    }

    #[test]
    fn test_context_click_selects_part_and_delete_takes_whole_door() {
        let mut s = scene();
        s.set_mode(Mode::Door);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 100.0, 0.0);
        let [PlanItem::Door(group)] = s.doc.items[..] else {
            panic!("expected one door");
        };
        let swing_id = s
            .doc
            .elements
            .iter()
            .find(|e| matches!(e.kind, ElementKind::DoorSwing { .. }))
            .map(|e| e.id)
            .unwrap();

        let hit = s.press_secondary(egui::pos2(30.0, -30.0), 1.0);
        assert_eq!(hit, Some(swing_id));
        assert_eq!(s.selected.iter().copied().collect::<Vec<_>>(), vec![swing_id]);

        assert_eq!(s.delete_selected(), 2);
        assert!(s.doc.group_members(group).is_empty());
        assert!(s.doc.elements.is_empty());
        assert!(s.doc.items.is_empty());
    }

    #[test]
    fn test_hover_tracks_wall_and_corner_handle() {
        let mut s = scene();
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 200.0, 0.0);
        let PlanItem::Wall(wall) = s.doc.items[0] else {
            panic!("expected wall item");
        };
        s.set_mode(Mode::Select);

        s.pointer_moved(egui::pos2(100.0, 2.0), 1.0);
        assert_eq!(s.hovered, Some(wall));
        assert_eq!(s.hovered_handle, None);

        let bed = s.place_furniture(FurnitureKind::Bed, egui::pos2(0.0, 300.0));
        click(&mut s, 0.0, 300.0);
        s.release();
        assert!(s.selected.contains(&bed));

        s.pointer_moved(egui::pos2(100.0, 380.0), 1.0);
        assert_eq!(s.hovered_handle, Some(HandleRef::Corner { furniture_id: bed }));

        s.pointer_left();
        assert_eq!(s.hovered, None);
        assert_eq!(s.hovered_handle, None);
    }

    #[test]
    fn test_toggle_swing_only_while_placing_door() {
        let mut s = scene();
        assert!(!s.toggle_door_swing());
        assert!(s.door_counter_clockwise);

        s.set_mode(Mode::Door);
        click(&mut s, 0.0, 0.0);
        s.pointer_moved(egui::pos2(0.0, 100.0), 1.0);
        let swing_id = s.in_progress.as_ref().unwrap().part_ids[1];
        let arc_of = |s: &Scene| match s.doc.element(swing_id).map(|e| e.kind.clone()) {
            Some(ElementKind::DoorSwing { arc }) => arc,
            other => panic!("{other:?}"),
        };
        let before = arc_of(&s);
        assert!(s.toggle_door_swing());
        let after = arc_of(&s);
        assert_eq!(before.radius, after.radius);
        assert_eq!(before.start_deg, after.start_deg);
        assert_eq!(before.sweep_deg, -after.sweep_deg);

        click(&mut s, 0.0, 100.0);
        click(&mut s, 200.0, 0.0);
        // The flipped direction carries over to the next door.
        assert!(!s.door_counter_clockwise);
        let next_swing = s.in_progress.as_ref().unwrap().part_ids[1];
        let Some(ElementKind::DoorSwing { arc }) = s.doc.element(next_swing).map(|e| &e.kind) else {
            panic!("expected swing");
        };
        assert_eq!(arc.sweep_deg, -90.0);
    }

    #[test]
    fn test_delete_window_part_removes_group_once() {
        let mut s = scene();
        s.set_mode(Mode::Window);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 100.0, 0.0);
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 100.0);
        click(&mut s, 100.0, 100.0);
        s.set_mode(Mode::Select);
        let PlanItem::Window(group) = s.doc.items[0] else {
            panic!("expected window first");
        };
        let parts = s.doc.group_members(group);
        s.selected.insert(parts[0]);
        s.selected.insert(parts[2]);
        assert_eq!(s.delete_selected(), 3);
        assert_eq!(s.doc.items.len(), 1);
        assert!(matches!(s.doc.items[0], PlanItem::Wall(_)));
        assert_eq!(s.doc.elements.len(), 1);
        assert_eq!(s.wall_markers.len(), 2);
        assert!(s.selected.is_empty());
    }

    #[test]
    fn test_delete_with_empty_selection_is_noop() {
        let mut s = scene();
        s.place_furniture(FurnitureKind::Sofa, egui::pos2(0.0, 0.0));
        assert_eq!(s.delete_selected(), 0);
        assert_eq!(s.doc.items.len(), 1);
    }

    #[test]
    fn test_delete_wall_clears_markers() {
        let mut s = scene();
        s.set_mode(Mode::Wall);
        click(&mut s, 0.0, 0.0);
        click(&mut s, 100.0, 0.0);
        s.set_mode(Mode::Select);
        click(&mut s, 50.0, 1.0);
        assert_eq!(s.selected.len(), 1);
        s.delete_selected();
        assert!(s.doc.items.is_empty());
        assert!(s.wall_markers.is_empty());
    }

    #[test]
    fn test_select_click_on_empty_clears() {
        let mut s = scene();
        let id = s.place_furniture(FurnitureKind::Wardrobe, egui::pos2(0.0, 0.0));
        click(&mut s, 0.0, 0.0);
        assert!(s.selected.contains(&id));
        click(&mut s, 900.0, 900.0);
        assert!(s.selected.is_empty());
    }

    #[test]
    fn test_multi_select_toggles() {
        let mut s = scene();
        let a = s.place_furniture(FurnitureKind::Bed, egui::pos2(0.0, 0.0));
        let b = s.place_furniture(FurnitureKind::Bed, egui::pos2(500.0, 0.0));
        click(&mut s, 0.0, 0.0);
        s.press_primary(egui::pos2(500.0, 0.0), true, 1.0);
        assert_eq!(s.selected.len(), 2);
        s.release();
        s.press_primary(egui::pos2(0.0, 0.0), true, 1.0);
        assert!(!s.selected.contains(&a));
        assert!(s.selected.contains(&b));
    }

    #[test]
    fn test_walls_paint_above_furniture() {
        let mut s = scene();
        let f = s.place_furniture(FurnitureKind::Bed, egui::pos2(0.0, 0.0));
        s.set_mode(Mode::Wall);
        click(&mut s, -200.0, 0.0);
        click(&mut s, 200.0, 0.0);
        let order: Vec<u64> = s.paint_order().map(|e| e.id).collect();
        assert_eq!(order.first(), Some(&f));
        s.set_mode(Mode::Select);
        let hit = s.topmost_hit(egui::pos2(0.0, 0.0), 6.0);
        assert_ne!(hit, Some(f));
    }

    #[test]
    fn test_status_line() {
        let mut s = scene();
        assert_eq!(s.status_line(None), "Mode: Select | Zoom: Ctrl+Wheel | Pan: Space+Drag");
        s.set_mode(Mode::Furniture(FurnitureKind::Bed));
        assert_eq!(
            s.status_line(Some(egui::pos2(12.4, -3.6))),
            "x=12 y=-4 | Mode: Furniture: Bed | Zoom: Ctrl+Wheel | Pan: Space+Drag"
        );
    }
}
