use eframe::egui;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub min: Point,
    pub max: Point,
}

impl RectF {
    pub fn from_min_max(a: egui::Pos2, b: egui::Pos2) -> Self {
        let min = egui::pos2(a.x.min(b.x), a.y.min(b.y));
        let max = egui::pos2(a.x.max(b.x), a.y.max(b.y));
        Self {
            min: Point::from_pos2(min),
            max: Point::from_pos2(max),
        }
    }

    pub fn from_center_size(center: egui::Pos2, size: egui::Vec2) -> Self {
        Self::from_min_max(center - size * 0.5, center + size * 0.5)
    }

    pub fn to_rect(self) -> egui::Rect {
        egui::Rect::from_min_max(self.min.to_pos2(), self.max.to_pos2())
    }

    pub fn size(self) -> egui::Vec2 {
        egui::vec2(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    pub fn translate(&mut self, delta: egui::Vec2) {
        self.min = Point::from_pos2(self.min.to_pos2() + delta);
        self.max = Point::from_pos2(self.max.to_pos2() + delta);
    }
}

/// Furniture pieces available in the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FurnitureKind {
    Bed,
    Table,
    Sofa,
    Wardrobe,
}

impl FurnitureKind {
    /// Palette order.
    pub const ALL: [FurnitureKind; 4] = [
        FurnitureKind::Bed,
        FurnitureKind::Table,
        FurnitureKind::Sofa,
        FurnitureKind::Wardrobe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FurnitureKind::Bed => "Bed",
            FurnitureKind::Table => "Table",
            FurnitureKind::Sofa => "Sofa",
            FurnitureKind::Wardrobe => "Wardrobe",
        }
    }

    pub fn default_size(self) -> egui::Vec2 {
        match self {
            FurnitureKind::Bed => egui::vec2(200.0, 160.0),
            FurnitureKind::Table => egui::vec2(200.0, 110.0),
            FurnitureKind::Sofa => egui::vec2(260.0, 90.0),
            FurnitureKind::Wardrobe => egui::vec2(140.0, 60.0),
        }
    }

    /// Smallest size the corner handle may shrink the piece to.
    pub fn min_size(self) -> egui::Vec2 {
        match self {
            FurnitureKind::Bed => egui::vec2(100.0, 80.0),
            FurnitureKind::Table => egui::vec2(100.0, 90.0),
            FurnitureKind::Sofa => egui::vec2(120.0, 50.0),
            FurnitureKind::Wardrobe => egui::vec2(90.0, 60.0),
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallEnd {
    A,
    B,
}

/// Draggable circle sitting on one wall endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointHandle {
    pub wall_id: u64,
    pub end: WallEnd,
    pub pos: Point,
}

/// Created the first time a wall is selected and kept (hidden) afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHandles {
    pub a: EndpointHandle,
    pub b: EndpointHandle,
    pub visible: bool,
}

impl WallHandles {
    pub fn new(wall_id: u64, a: Point, b: Point) -> Self {
        Self {
            a: EndpointHandle {
                wall_id,
                end: WallEnd::A,
                pos: a,
            },
            b: EndpointHandle {
                wall_id,
                end: WallEnd::B,
                pos: b,
            },
            visible: true,
        }
    }

    pub fn get_mut(&mut self, end: WallEnd) -> &mut EndpointHandle {
        match end {
            WallEnd::A => &mut self.a,
            WallEnd::B => &mut self.b,
        }
    }
}

/// Resize grip at the bottom-right corner of a furniture piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerHandle {
    pub owner: u64,
    pub visible: bool,
}

/// Quarter-circle sector drawn from a door hinge.
///
/// Angles are in degrees, counter-clockwise on screen (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwingArc {
    pub center: Point,
    pub radius: f32,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    Wall {
        a: Point,
        b: Point,
        handles: Option<WallHandles>,
    },
    DoorLeaf {
        hinge: Point,
        end: Point,
    },
    DoorSwing {
        arc: SwingArc,
    },
    WindowPane {
        a: Point,
        b: Point,
    },
    WindowTick {
        a: Point,
        b: Point,
    },
    Furniture {
        furniture: FurnitureKind,
        rect: RectF,
        handle: CornerHandle,
        movable: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: u64,
    pub group_id: Option<u64>,
    pub kind: ElementKind,
}

impl Element {
    pub fn bounds(&self) -> egui::Rect {
        match &self.kind {
            ElementKind::Wall { a, b, .. }
            | ElementKind::DoorLeaf { hinge: a, end: b }
            | ElementKind::WindowPane { a, b }
            | ElementKind::WindowTick { a, b } => {
                egui::Rect::from_two_pos(a.to_pos2(), b.to_pos2())
            }
            ElementKind::DoorSwing { arc } => {
                egui::Rect::from_center_size(arc.center.to_pos2(), egui::Vec2::splat(arc.radius * 2.0))
            }
            ElementKind::Furniture { rect, .. } => rect.to_rect(),
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self.kind, ElementKind::Wall { .. })
    }

    pub fn is_furniture(&self) -> bool {
        matches!(self.kind, ElementKind::Furniture { .. })
    }
}

/// Entry of the permanent list of committed shapes.
///
/// Doors and windows are referenced by group id since they span several elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanItem {
    Wall(u64),
    Door(u64),
    Window(u64),
    Furniture(u64),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Everything that gets painted, including an in-progress placement.
    pub elements: Vec<Element>,
    pub items: Vec<PlanItem>,
}

impl Document {
    pub fn element(&self, id: u64) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: u64) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn group_members(&self, group_id: u64) -> Vec<u64> {
        self.elements
            .iter()
            .filter(|e| e.group_id == Some(group_id))
            .map(|e| e.id)
            .collect()
    }

    /// Endpoints of every wall in the permanent list.
    pub fn committed_wall_endpoints(&self) -> Vec<egui::Pos2> {
        let mut out = Vec::new();
        for item in &self.items {
            let PlanItem::Wall(id) = item else {
                continue;
            };
            if let Some(Element {
                kind: ElementKind::Wall { a, b, .. },
                ..
            }) = self.element(*id)
            {
                out.push(a.to_pos2());
                out.push(b.to_pos2());
            }
        }
        out
    }
}

pub fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab_len2 = ab.x * ab.x + ab.y * ab.y;
    if ab_len2 <= f32::EPSILON {
        return (p - a).length();
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / ab_len2;
    let t = t.clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length()
}
