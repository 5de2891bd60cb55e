//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{CompanionId, StructureId};

/// Defensive structure kind, fixed at placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Wooden fence. Units roll once per fence for a chance to slip through.
    Fence,
    /// Stone wall, heavy resistance.
    Wall,
    /// Wooden barricade.
    Barricade,
    /// Guard tower; the only kind that fires projectiles.
    Tower,
    /// Reinforced gate.
    Gate,
}

impl StructureKind {
    pub const ALL: [StructureKind; 5] = [
        StructureKind::Fence,
        StructureKind::Wall,
        StructureKind::Barricade,
        StructureKind::Tower,
        StructureKind::Gate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fence => "fence",
            Self::Wall => "wall",
            Self::Barricade => "barricade",
            Self::Tower => "tower",
            Self::Gate => "gate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fence" => Some(Self::Fence),
            "wall" => Some(Self::Wall),
            "barricade" => Some(Self::Barricade),
            "tower" => Some(Self::Tower),
            "gate" => Some(Self::Gate),
            _ => None,
        }
    }
}

/// Hostile unit class tag, used for target priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    #[default]
    Normal,
    Runner,
    Tank,
    Explosive,
    Healer,
    Boss,
}

/// Autonomous companion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompanionKind {
    /// Orbits the anchor.
    Drone,
    /// Follows the anchor at a distance.
    Robot,
    /// Stationary, short range, fast fire.
    Turret,
    /// Follows closely and heals the anchor instead of shooting.
    Medic,
    /// Follows closely, heavy health.
    Tank,
}

impl CompanionKind {
    pub const ALL: [CompanionKind; 5] = [
        CompanionKind::Drone,
        CompanionKind::Robot,
        CompanionKind::Turret,
        CompanionKind::Medic,
        CompanionKind::Tank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drone => "drone",
            Self::Robot => "robot",
            Self::Turret => "turret",
            Self::Medic => "medic",
            Self::Tank => "tank",
        }
    }
}

/// Pass-through decision for one (unit, structure) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Passage {
    /// No encounter resolved yet.
    #[default]
    Undetermined,
    /// Permanently blocked by this structure.
    Blocked,
    /// Allowed through while the overlap lasts.
    Permitted,
}

/// Who fired a projectile. Friendly sources pass through structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileSource {
    Player,
    Tower(StructureId),
    Companion(CompanionId),
    Hostile,
}

impl ProjectileSource {
    pub fn is_friendly(&self) -> bool {
        !matches!(self, Self::Hostile)
    }
}

/// Fortress build tier, unlocked by wave number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FortressTier {
    /// Square fence perimeter around the arena center.
    FencePerimeter,
    /// Four barricades near the center.
    CornerBarricades,
    /// Top and bottom gates.
    Gates,
    /// Continuous stone wall ring.
    StoneWalls,
    /// Guard towers on the fence corners.
    GuardTowers,
}

impl FortressTier {
    pub const ALL: [FortressTier; 5] = [
        FortressTier::FencePerimeter,
        FortressTier::CornerBarricades,
        FortressTier::Gates,
        FortressTier::StoneWalls,
        FortressTier::GuardTowers,
    ];

    /// First wave at which the tier is built.
    pub fn unlock_wave(&self) -> u32 {
        match self {
            Self::FencePerimeter => TIER_FENCE_WAVE,
            Self::CornerBarricades => TIER_BARRICADE_WAVE,
            Self::Gates => TIER_GATE_WAVE,
            Self::StoneWalls => TIER_WALL_WAVE,
            Self::GuardTowers => TIER_TOWER_WAVE,
        }
    }
}
