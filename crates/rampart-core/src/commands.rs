//! Host commands sent to the fortress engine.
//!
//! Commands are queued and applied at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Bounds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FortressCommand {
    // --- Structures ---
    /// Place a structure. Degenerate bounds are rejected and logged.
    PlaceStructure { kind: StructureKind, bounds: Bounds },
    /// Economy signal: a kind was upgraded (or downgraded).
    SetUpgradeLevel { kind: StructureKind, level: u32 },
    /// Heal every structure by `amount`.
    RepairAll { amount: f32 },
    /// Full heal for every structure.
    RestoreAll,
    /// Remove every structure. Upgrade levels persist.
    ClearStructures,

    // --- Companions ---
    SpawnCompanion { kind: CompanionKind, position: Vec2 },
    SetCompanionLevel { kind: CompanionKind, level: u32 },

    // --- Waves ---
    /// Wave boundary reached.
    WaveCleared { wave: u32 },
}
