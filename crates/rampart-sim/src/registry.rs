//! Structure registry: owns every placed structure and the per-kind upgrade
//! levels they share.

use std::collections::HashSet;

use glam::Vec2;

use rampart_core::config::{upgrade_cost, FortressConfig, UpgradeTable};
use rampart_core::constants::DETERIORATION_INTERVAL_MS;
use rampart_core::enums::{ProjectileSource, StructureKind};
use rampart_core::error::StructureError;
use rampart_core::types::{Bounds, StructureId};

use crate::pool::ProjectilePool;
use crate::structure::{DamageOutcome, Structure};
use crate::systems::dispatch::{self, Ballistics, Shot};
use crate::systems::targeting::Candidate;

pub struct StructureRegistry {
    config: FortressConfig,
    upgrades: UpgradeTable,
    structures: Vec<Structure>,
    next_id: u32,
    /// Inactive structures whose destruction was already reported.
    reported_down: HashSet<StructureId>,
}

impl StructureRegistry {
    pub fn new(config: FortressConfig, upgrades: UpgradeTable) -> Self {
        Self {
            config,
            upgrades,
            structures: Vec::new(),
            next_id: 0,
            reported_down: HashSet::new(),
        }
    }

    pub fn config(&self) -> &FortressConfig {
        &self.config
    }

    /// Current upgrade levels, for the host to persist.
    pub fn upgrades(&self) -> &UpgradeTable {
        &self.upgrades
    }

    /// Place a structure, scaled to its kind's current upgrade level.
    pub fn add_structure(
        &mut self,
        kind: StructureKind,
        bounds: Bounds,
    ) -> Result<StructureId, StructureError> {
        if bounds.is_degenerate() {
            tracing::warn!(
                kind = kind.as_str(),
                width = bounds.width,
                height = bounds.height,
                "rejected structure with degenerate bounds"
            );
            return Err(StructureError::DegenerateBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let id = StructureId(self.next_id);
        self.next_id += 1;
        let level = self.upgrades.structure_level(kind);
        self.structures
            .push(Structure::new(id, kind, bounds, &self.config, level));

        tracing::info!(%id, kind = kind.as_str(), level, "structure placed");
        Ok(id)
    }

    pub fn upgrade_level(&self, kind: StructureKind) -> u32 {
        self.upgrades.structure_level(kind)
    }

    /// Set a kind's level and rescale every structure of that kind,
    /// preserving each one's health fraction.
    pub fn set_upgrade_level(&mut self, kind: StructureKind, level: u32) {
        self.upgrades.set_structure_level(kind, level);
        let weapon = self.config.tower_weapon;
        let mut affected = 0;
        for structure in self.structures.iter_mut().filter(|s| s.kind() == kind) {
            structure.apply_upgrade_level(level, &weapon);
            affected += 1;
        }
        tracing::info!(kind = kind.as_str(), level, affected, "upgrade level set");
    }

    /// Price of the next upgrade for `kind`.
    pub fn upgrade_cost(&self, kind: StructureKind) -> u32 {
        upgrade_cost(
            self.config.profile(kind).upgrade_cost,
            self.upgrades.structure_level(kind),
        )
    }

    /// Price of the next upgrade for the kind of structure `id`.
    pub fn upgrade_cost_for(&self, id: StructureId) -> Result<u32, StructureError> {
        let structure = self.get(id).ok_or(StructureError::UnknownStructure(id))?;
        Ok(self.upgrade_cost(structure.kind()))
    }

    /// Deterioration for every active structure, then tower fire.
    pub fn tick(
        &mut self,
        now_ms: u64,
        candidates: &[Candidate],
        pool: &mut ProjectilePool,
        ballistics: Ballistics,
    ) -> Vec<Shot> {
        for structure in &mut self.structures {
            structure.deteriorate(now_ms, DETERIORATION_INTERVAL_MS);
        }

        let mut shots = Vec::new();
        for structure in self.structures.iter_mut().filter(|s| s.is_active()) {
            let id = structure.id();
            let origin = structure.bounds().center();
            if let Some(fire_control) = structure.fire_control_mut() {
                if let Some(shot) = dispatch::try_fire(
                    fire_control,
                    origin,
                    ProjectileSource::Tower(id),
                    candidates,
                    pool,
                    ballistics,
                    now_ms,
                ) {
                    shots.push(shot);
                }
            }
        }
        shots
    }

    /// Damage one structure through its resistance.
    pub fn damage_structure(
        &mut self,
        id: StructureId,
        amount: f32,
    ) -> Result<DamageOutcome, StructureError> {
        let structure = self
            .get_mut(id)
            .ok_or(StructureError::UnknownStructure(id))?;
        Ok(structure.take_damage(amount))
    }

    pub fn repair_all(&mut self, amount: f32) {
        for structure in &mut self.structures {
            structure.repair(amount);
        }
    }

    /// Full heal for every structure. Returns how many were restored.
    pub fn restore_all(&mut self) -> usize {
        for structure in &mut self.structures {
            structure.restore();
        }
        self.reported_down.clear();
        tracing::info!(count = self.structures.len(), "structures restored");
        self.structures.len()
    }

    /// Remove every structure. Upgrade levels are kept.
    pub fn clear(&mut self) {
        self.structures.clear();
        self.reported_down.clear();
    }

    /// Structures that went inactive since the last call.
    pub fn drain_destroyed(&mut self) -> Vec<(StructureId, StructureKind)> {
        let mut destroyed = Vec::new();
        for structure in &self.structures {
            let id = structure.id();
            if structure.is_active() {
                self.reported_down.remove(&id);
            } else if self.reported_down.insert(id) {
                tracing::info!(%id, kind = structure.kind().as_str(), "structure destroyed");
                destroyed.push((id, structure.kind()));
            }
        }
        destroyed
    }

    pub fn get(&self, id: StructureId) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.structures.iter_mut().find(|s| s.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    pub(crate) fn structures_mut(&mut self) -> &mut [Structure] {
        &mut self.structures
    }

    pub fn get_active_count(&self) -> usize {
        self.structures.iter().filter(|s| s.is_active()).count()
    }

    pub fn get_total_count(&self) -> usize {
        self.structures.len()
    }

    /// First structure (active or not) whose bounds contain `point`.
    pub fn get_structure_at(&self, point: Vec2) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| s.bounds().contains_point(point))
    }
}
