//! Events emitted by the fortress engine for UI, audio and achievement feedback.
//!
//! Mobile units are identified by `unit`, the bit pattern of their ECS handle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Bounds, CompanionId, StructureId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FortressEvent {
    /// A structure was added to the registry.
    StructurePlaced {
        id: StructureId,
        kind: StructureKind,
        bounds: Bounds,
    },
    /// A structure's health reached zero.
    StructureDestroyed { id: StructureId, kind: StructureKind },
    /// Every structure was healed to full at a wave boundary.
    StructuresRestored { count: usize },
    /// Resistance absorbed part of a unit's contact damage.
    DamageBlocked { structure: StructureId, absorbed: f32 },
    /// First fence encounter for a (unit, structure) pair was rolled.
    PassageResolved {
        unit: u64,
        structure: StructureId,
        permitted: bool,
    },
    /// A tower or companion launched a projectile.
    ProjectileFired {
        source: ProjectileSource,
        origin: Vec2,
        angle: f32,
    },
    /// A friendly projectile finished off a hostile unit.
    UnitKilled { unit: u64, source: ProjectileSource },
    /// A companion kind became available.
    CompanionUnlocked { kind: CompanionKind },
    /// A companion's health reached zero.
    CompanionDown { id: CompanionId, kind: CompanionKind },
    /// A medic restored anchor health.
    AnchorHealed { amount: f32 },
    /// A fortress tier was built.
    TierBuilt { tier: FortressTier, structures: usize },
}
