//! Read-only snapshot of the fortress for the frontend.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::UpgradeTable;
use crate::enums::*;
use crate::types::{Bounds, CompanionId, StructureId};

/// Complete fortress state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FortressSnapshot {
    pub now_ms: u64,
    pub structures: Vec<StructureView>,
    pub companions: Vec<CompanionView>,
    pub active_structures: usize,
    pub active_projectiles: usize,
    pub upgrades: UpgradeTable,
    pub tiers_built: Vec<FortressTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureView {
    pub id: StructureId,
    pub kind: StructureKind,
    pub bounds: Bounds,
    pub health: f32,
    pub max_health: f32,
    pub active: bool,
    pub upgrade_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionView {
    pub id: CompanionId,
    pub kind: CompanionKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub dying: bool,
    pub upgrade_level: u32,
}
