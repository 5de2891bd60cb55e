//! Fundamental geometric types and identifiers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::SNAP_CLEARANCE;

/// Identifier of a placed structure, allocated by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StructureId(pub u32);

/// Identifier of a spawned companion, allocated by the squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanionId(pub u32);

impl std::fmt::Display for StructureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl std::fmt::Display for CompanionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Axis-aligned rectangle in world units.
/// `(x, y)` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One side of a `Bounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero, negative or non-finite extents, or a non-finite corner.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        !(finite && self.width > 0.0 && self.height > 0.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive point test (edges count as inside).
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Circle-vs-AABB overlap: the rectangle expanded by `radius` strictly
    /// contains `center`.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.x
            && center.x - radius < self.right()
            && center.y + radius > self.y
            && center.y - radius < self.bottom()
    }

    /// The circle lies strictly outside the rectangle on at least one axis.
    pub fn clears_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius < self.x
            || center.x - radius > self.right()
            || center.y + radius < self.y
            || center.y - radius > self.bottom()
    }

    /// Edge with the smallest penetration depth for `point`, measured from the
    /// point to each side. Ties resolve Left, Right, Top, Bottom.
    pub fn nearest_edge(&self, point: Vec2) -> Edge {
        let candidates = [
            (Edge::Left, point.x - self.x),
            (Edge::Right, self.right() - point.x),
            (Edge::Top, point.y - self.y),
            (Edge::Bottom, self.bottom() - point.y),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }
        best.0
    }

    /// Move a circle centered at `point` just outside the nearest edge,
    /// leaving `SNAP_CLEARANCE` between the circle and the side.
    pub fn snap_outside(&self, point: Vec2, radius: f32) -> Vec2 {
        let offset = radius + SNAP_CLEARANCE;
        match self.nearest_edge(point) {
            Edge::Left => Vec2::new(self.x - offset, point.y),
            Edge::Right => Vec2::new(self.right() + offset, point.y),
            Edge::Top => Vec2::new(point.x, self.y - offset),
            Edge::Bottom => Vec2::new(point.x, self.bottom() + offset),
        }
    }
}
