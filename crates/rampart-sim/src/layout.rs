//! Fortress tiers: fixed structure layouts built automatically as waves advance.

use std::collections::BTreeSet;

use glam::Vec2;

use rampart_core::constants::*;
use rampart_core::enums::{FortressTier, StructureKind};
use rampart_core::types::Bounds;

use crate::registry::StructureRegistry;

/// Keep a span of `extent` starting at `origin` inside `[0, limit]`.
fn clamp_span(origin: f32, extent: f32, limit: f32) -> f32 {
    origin.min(limit - extent).max(0.0)
}

/// Top-left corner of the fence square, shared by the fence and tower tiers.
fn fence_origin(arena: Vec2) -> Vec2 {
    let center = arena * 0.5;
    let half = FENCE_PERIMETER_SIZE * 0.5;
    Vec2::new(
        clamp_span(center.x - half, FENCE_PERIMETER_SIZE, arena.x),
        clamp_span(center.y - half, FENCE_PERIMETER_SIZE, arena.y),
    )
}

/// Structures that make up `tier` in an arena of size `arena`.
pub fn plan_tier(tier: FortressTier, arena: Vec2) -> Vec<(StructureKind, Bounds)> {
    let center = arena * 0.5;
    match tier {
        FortressTier::FencePerimeter => {
            let o = fence_origin(arena);
            let size = FENCE_PERIMETER_SIZE;
            let t = FENCE_THICKNESS;
            let side = size - 2.0 * t;
            let mut plan = vec![
                (StructureKind::Fence, Bounds::new(o.x, o.y, size, t)),
                (StructureKind::Fence, Bounds::new(o.x, o.y + size - t, size, t)),
            ];
            if side > 0.0 {
                plan.push((StructureKind::Fence, Bounds::new(o.x, o.y + t, t, side)));
                plan.push((StructureKind::Fence, Bounds::new(o.x + size - t, o.y + t, t, side)));
            }
            plan
        }
        FortressTier::CornerBarricades => {
            let s = BARRICADE_SIZE;
            let near = |c: f32, limit: f32| clamp_span(c - BARRICADE_OFFSET - s * 0.5, s, limit);
            let far = |c: f32, limit: f32| clamp_span(c + BARRICADE_OFFSET - s * 0.5, s, limit);
            let (left, right) = (near(center.x, arena.x), far(center.x, arena.x));
            let (top, bottom) = (near(center.y, arena.y), far(center.y, arena.y));
            vec![
                (StructureKind::Barricade, Bounds::new(left, top, s, s)),
                (StructureKind::Barricade, Bounds::new(right, top, s, s)),
                (StructureKind::Barricade, Bounds::new(left, bottom, s, s)),
                (StructureKind::Barricade, Bounds::new(right, bottom, s, s)),
            ]
        }
        FortressTier::Gates => {
            let x = center.x - GATE_WIDTH * 0.5;
            let top = (center.y - GATE_RING_RADIUS).max(0.0);
            let bottom = (center.y + GATE_RING_RADIUS - GATE_HEIGHT).min(arena.y - GATE_HEIGHT);
            vec![
                (StructureKind::Gate, Bounds::new(x, top, GATE_WIDTH, GATE_HEIGHT)),
                (StructureKind::Gate, Bounds::new(x, bottom, GATE_WIDTH, GATE_HEIGHT)),
            ]
        }
        FortressTier::StoneWalls => {
            let t = WALL_THICKNESS;
            let top = (center.y - WALL_RING_RADIUS).max(0.0);
            let bottom = (center.y + WALL_RING_RADIUS - t).min(arena.y - t);
            let side_top = top + t;
            let side = (bottom - side_top).max(0.0);
            let mut plan = vec![
                (StructureKind::Wall, Bounds::new(0.0, top, arena.x, t)),
                (StructureKind::Wall, Bounds::new(0.0, bottom, arena.x, t)),
            ];
            if side > 0.0 {
                plan.push((StructureKind::Wall, Bounds::new(0.0, side_top, t, side)));
                plan.push((StructureKind::Wall, Bounds::new(arena.x - t, side_top, t, side)));
            }
            plan
        }
        FortressTier::GuardTowers => {
            let o = fence_origin(arena);
            let s = TOWER_SIZE;
            let corners = [
                Vec2::new(o.x, o.y),
                Vec2::new(o.x + FENCE_PERIMETER_SIZE, o.y),
                Vec2::new(o.x, o.y + FENCE_PERIMETER_SIZE),
                Vec2::new(o.x + FENCE_PERIMETER_SIZE, o.y + FENCE_PERIMETER_SIZE),
            ];
            corners
                .iter()
                .map(|c| {
                    let x = clamp_span(c.x - s * 0.5, s, arena.x);
                    let y = clamp_span(c.y - s * 0.5, s, arena.y);
                    (StructureKind::Tower, Bounds::new(x, y, s, s))
                })
                .collect()
        }
    }
}

/// Remembers which tiers have been built so each is built once per game.
#[derive(Debug, Default, Clone)]
pub struct TierTracker {
    built: BTreeSet<FortressTier>,
}

impl TierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self, tier: FortressTier) -> bool {
        self.built.contains(&tier)
    }

    pub fn built(&self) -> impl Iterator<Item = FortressTier> + '_ {
        self.built.iter().copied()
    }

    /// Build every tier unlocked by `wave` that is not built yet.
    /// Returns each new tier with the number of structures placed.
    pub fn build_unlocked(
        &mut self,
        wave: u32,
        arena: Vec2,
        registry: &mut StructureRegistry,
    ) -> Vec<(FortressTier, usize)> {
        let mut built = Vec::new();
        for tier in FortressTier::ALL {
            if wave < tier.unlock_wave() || !self.built.insert(tier) {
                continue;
            }
            let placed = plan_tier(tier, arena)
                .into_iter()
                .filter(|(kind, bounds)| registry.add_structure(*kind, *bounds).is_ok())
                .count();
            tracing::info!(?tier, wave, placed, "fortress tier built");
            built.push((tier, placed));
        }
        built
    }

    pub fn reset(&mut self) {
        self.built.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::config::{FortressConfig, UpgradeTable};

    fn arena() -> Vec2 {
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)
    }

    fn inside(bounds: &Bounds, arena: Vec2) -> bool {
        bounds.x >= 0.0
            && bounds.y >= 0.0
            && bounds.right() <= arena.x
            && bounds.bottom() <= arena.y
    }

    #[test]
    fn every_tier_fits_default_arena() {
        for tier in FortressTier::ALL {
            let plan = plan_tier(tier, arena());
            assert!(!plan.is_empty(), "{tier:?} is empty");
            for (kind, bounds) in &plan {
                assert!(!bounds.is_degenerate());
                assert!(inside(bounds, arena()), "{tier:?} {kind:?} {bounds:?}");
            }
        }
    }

    #[test]
    fn tier_shapes() {
        let fences = plan_tier(FortressTier::FencePerimeter, arena());
        assert_eq!(fences.len(), 4);
        assert!(fences.iter().all(|(k, _)| *k == StructureKind::Fence));
        assert_eq!(fences[0].1, Bounds::new(55.0, 175.0, 250.0, 10.0));

        let towers = plan_tier(FortressTier::GuardTowers, arena());
        assert_eq!(towers.len(), 4);
        assert_eq!(towers[0].1.center(), Vec2::new(55.0, 175.0));
        assert_eq!(towers[3].1.center(), Vec2::new(305.0, 425.0));

        assert_eq!(plan_tier(FortressTier::Gates, arena()).len(), 2);
        assert_eq!(plan_tier(FortressTier::CornerBarricades, arena()).len(), 4);
    }

    #[test]
    fn small_arena_keeps_inner_tiers_inside() {
        let small = Vec2::new(100.0, 100.0);
        for tier in [
            FortressTier::CornerBarricades,
            FortressTier::Gates,
            FortressTier::StoneWalls,
        ] {
            for (_, bounds) in plan_tier(tier, small) {
                assert!(inside(&bounds, small), "{tier:?} {bounds:?}");
            }
        }
    }

    #[test]
    fn tiers_build_once() {
        let mut registry = StructureRegistry::new(FortressConfig::default(), UpgradeTable::default());
        let mut tracker = TierTracker::new();

        assert!(tracker.build_unlocked(4, arena(), &mut registry).is_empty());
        let built = tracker.build_unlocked(30, arena(), &mut registry);
        assert_eq!(
            built,
            vec![
                (FortressTier::FencePerimeter, 4),
                (FortressTier::CornerBarricades, 4),
                (FortressTier::Gates, 2),
            ]
        );
        assert_eq!(registry.get_total_count(), 10);
        assert!(tracker.build_unlocked(30, arena(), &mut registry).is_empty());

        let built = tracker.build_unlocked(75, arena(), &mut registry);
        assert_eq!(built.len(), 2);
        assert!(tracker.is_built(FortressTier::GuardTowers));

        tracker.reset();
        assert_eq!(tracker.built().count(), 0);
    }
}
