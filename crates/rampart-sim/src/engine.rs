//! Fortress engine: the per-tick driver for structures, collisions and
//! autonomous shooters.
//!
//! `FortressEngine` owns the structure registry, passability memory,
//! companion squad and RNG. The hostile units live in a caller-owned
//! `hecs::World` and projectiles in a caller-owned `ProjectilePool`; both are
//! passed into `tick`. Completely headless and deterministic for a given seed.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::FortressCommand;
use rampart_core::config::{FortressConfig, UpgradeTable};
use rampart_core::enums::{CompanionKind, StructureKind};
use rampart_core::error::{CompanionError, StructureError};
use rampart_core::events::FortressEvent;
use rampart_core::state::{CompanionView, FortressSnapshot, StructureView};
use rampart_core::types::{Bounds, CompanionId, StructureId};

use crate::companion::{Anchor, Squad};
use crate::layout::TierTracker;
use crate::passability::PassabilityMemory;
use crate::pool::ProjectilePool;
use crate::registry::StructureRegistry;
use crate::systems;
use crate::systems::collision::ContactRules;
use crate::systems::dispatch::{Ballistics, Shot};

/// Configuration for the engine's own state.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same pass-through rolls.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

pub struct FortressEngine {
    registry: StructureRegistry,
    passability: PassabilityMemory,
    squad: Squad,
    tiers: TierTracker,
    rng: ChaCha8Rng,
    command_queue: VecDeque<FortressCommand>,
    events: Vec<FortressEvent>,
    anchor: Anchor,
    arena: Bounds,
    rules: TickRules,
    now_ms: u64,
}

/// Config-derived inputs the per-tick systems share.
#[derive(Clone, Copy)]
struct TickRules {
    contact: ContactRules,
    ballistics: Ballistics,
}

impl FortressEngine {
    pub fn new(config: FortressConfig, upgrades: UpgradeTable, sim: SimConfig) -> Self {
        let arena = Bounds::new(0.0, 0.0, config.arena_width, config.arena_height);
        let rules = TickRules {
            contact: ContactRules {
                pass_through_chance: config.pass_through_chance,
                contact_damage_per_frame: config.contact_damage_per_frame,
            },
            ballistics: Ballistics::from_config(&config),
        };
        let squad = Squad::new(config.clone(), upgrades.companions.clone());
        Self {
            registry: StructureRegistry::new(config, upgrades),
            passability: PassabilityMemory::new(),
            squad,
            tiers: TierTracker::new(),
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            anchor: Anchor {
                position: arena.center(),
                health: 100.0,
                max_health: 100.0,
            },
            arena,
            rules,
            now_ms: 0,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: FortressCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FortressCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame at wall time `now_ms` and return the events it produced.
    ///
    /// Order: passability upkeep, registry upkeep (deterioration and tower
    /// fire), unit collisions, companions, projectile hits. A structure
    /// destroyed by deterioration this tick no longer blocks units this tick.
    pub fn tick(
        &mut self,
        now_ms: u64,
        world: &mut World,
        pool: &mut ProjectilePool,
    ) -> Vec<FortressEvent> {
        self.now_ms = now_ms;
        self.process_commands();

        let pruned = self.passability.prune(world);
        if pruned > 0 {
            tracing::debug!(pruned, "dropped passability entries for despawned units");
        }

        let candidates = systems::targeting::gather_candidates(world);
        let shots = self
            .registry
            .tick(now_ms, &candidates, pool, self.rules.ballistics);
        self.push_shots(&shots);

        self.resolve_collisions(world);

        let candidates = systems::targeting::gather_candidates(world);
        let squad_tick = self.squad.update(
            &self.anchor,
            now_ms,
            &candidates,
            pool,
            self.rules.ballistics,
        );
        self.push_shots(&squad_tick.shots);
        if squad_tick.healed > 0.0 {
            self.anchor.health =
                (self.anchor.health + squad_tick.healed).min(self.anchor.max_health);
            self.events.push(FortressEvent::AnchorHealed {
                amount: squad_tick.healed,
            });
        }
        for (id, kind) in self
            .squad
            .apply_contact_damage(&candidates, self.rules.contact.contact_damage_per_frame)
        {
            tracing::info!(%id, kind = kind.as_str(), "companion down");
            self.events.push(FortressEvent::CompanionDown { id, kind });
        }

        systems::projectiles::advance(pool, &self.arena);
        self.handle_projectile_collisions(pool);
        systems::projectiles::resolve_unit_hits(pool, world, &mut self.events);

        self.collect_destroyed();
        std::mem::take(&mut self.events)
    }

    /// Resolve every live hostile unit against every structure.
    pub fn resolve_collisions(&mut self, world: &mut World) {
        systems::collision::run(
            world,
            self.registry.structures_mut(),
            &mut self.passability,
            self.rules.contact,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// Hostile projectiles against structures.
    pub fn handle_projectile_collisions(&mut self, pool: &mut ProjectilePool) {
        let hits =
            systems::projectiles::handle_structure_hits(pool, self.registry.structures_mut());
        for (structure, outcome) in hits {
            if outcome.absorbed > 0.0 {
                self.events.push(FortressEvent::DamageBlocked {
                    structure,
                    absorbed: outcome.absorbed,
                });
            }
        }
    }

    /// Place a structure now, outside the command queue.
    pub fn add_structure(
        &mut self,
        kind: StructureKind,
        bounds: Bounds,
    ) -> Result<StructureId, StructureError> {
        let id = self.registry.add_structure(kind, bounds)?;
        self.events
            .push(FortressEvent::StructurePlaced { id, kind, bounds });
        Ok(id)
    }

    /// Spawn a companion now, outside the command queue.
    pub fn spawn_companion(
        &mut self,
        kind: CompanionKind,
        position: Vec2,
    ) -> Result<CompanionId, CompanionError> {
        self.squad.spawn(kind, position, &mut self.rng)
    }

    /// Removal hook: despawn a unit and forget its passage decisions.
    pub fn despawn_unit(&mut self, world: &mut World, unit: Entity) {
        let _ = world.despawn(unit);
        self.passability.forget(unit);
    }

    /// Wave boundary: restore structures and companions, unlock companions,
    /// build newly unlocked fortress tiers.
    pub fn on_wave_cleared(&mut self, wave: u32) {
        let count = self.registry.restore_all();
        self.events.push(FortressEvent::StructuresRestored { count });
        self.squad.restore_all();

        for kind in self.squad.check_unlocks(wave) {
            self.events.push(FortressEvent::CompanionUnlocked { kind });
        }

        let before = self.registry.get_total_count();
        let arena = Vec2::new(self.arena.width, self.arena.height);
        let built = self.tiers.build_unlocked(wave, arena, &mut self.registry);
        for structure in self.registry.iter().skip(before) {
            self.events.push(FortressEvent::StructurePlaced {
                id: structure.id(),
                kind: structure.kind(),
                bounds: *structure.bounds(),
            });
        }
        for (tier, structures) in built {
            self.events.push(FortressEvent::TierBuilt { tier, structures });
        }
    }

    /// Remove all structures and companions for a new game. Upgrade levels
    /// and unlocks persist.
    pub fn reset(&mut self, pool: &mut ProjectilePool) {
        self.registry.clear();
        self.squad.clear();
        self.tiers.reset();
        self.passability.clear();
        pool.release_all();
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn registry(&self) -> &StructureRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut StructureRegistry {
        &mut self.registry
    }

    pub fn squad(&self) -> &Squad {
        &self.squad
    }

    pub fn squad_mut(&mut self) -> &mut Squad {
        &mut self.squad
    }

    pub fn passability(&self) -> &PassabilityMemory {
        &self.passability
    }

    pub fn tiers(&self) -> &TierTracker {
        &self.tiers
    }

    /// Structure and companion levels together, for the host to persist.
    pub fn upgrades(&self) -> UpgradeTable {
        let mut table = self.registry.upgrades().clone();
        table.companions = self.squad.levels().clone();
        table
    }

    pub fn snapshot(&self, pool: &ProjectilePool) -> FortressSnapshot {
        FortressSnapshot {
            now_ms: self.now_ms,
            structures: self
                .registry
                .iter()
                .map(|s| StructureView {
                    id: s.id(),
                    kind: s.kind(),
                    bounds: *s.bounds(),
                    health: s.health(),
                    max_health: s.max_health(),
                    active: s.is_active(),
                    upgrade_level: s.upgrade_level(),
                })
                .collect(),
            companions: self
                .squad
                .iter()
                .map(|c| CompanionView {
                    id: c.id,
                    kind: c.kind,
                    position: c.position,
                    health: c.health,
                    max_health: c.max_health,
                    dying: c.dying,
                    upgrade_level: c.upgrade_level,
                })
                .collect(),
            active_structures: self.registry.get_active_count(),
            active_projectiles: pool.active_count(),
            upgrades: self.upgrades(),
            tiers_built: self.tiers.built().collect(),
        }
    }

    fn push_shots(&mut self, shots: &[Shot]) {
        for shot in shots {
            self.events.push(FortressEvent::ProjectileFired {
                source: shot.source,
                origin: shot.origin,
                angle: shot.angle,
            });
        }
    }

    fn collect_destroyed(&mut self) {
        for (id, kind) in self.registry.drain_destroyed() {
            self.events
                .push(FortressEvent::StructureDestroyed { id, kind });
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: FortressCommand) {
        match command {
            FortressCommand::PlaceStructure { kind, bounds } => {
                // Rejections are logged by the registry.
                let _ = self.add_structure(kind, bounds);
            }
            FortressCommand::SetUpgradeLevel { kind, level } => {
                self.registry.set_upgrade_level(kind, level);
            }
            FortressCommand::RepairAll { amount } => {
                self.registry.repair_all(amount);
            }
            FortressCommand::RestoreAll => {
                let count = self.registry.restore_all();
                self.events.push(FortressEvent::StructuresRestored { count });
            }
            FortressCommand::ClearStructures => {
                let ids: Vec<StructureId> = self.registry.iter().map(|s| s.id()).collect();
                self.registry.clear();
                for id in ids {
                    self.passability.forget_structure(id);
                }
            }
            FortressCommand::SpawnCompanion { kind, position } => {
                let _ = self.spawn_companion(kind, position);
            }
            FortressCommand::SetCompanionLevel { kind, level } => {
                self.squad.set_upgrade_level(kind, level);
            }
            FortressCommand::WaveCleared { wave } => {
                self.on_wave_cleared(wave);
            }
        }
    }
}
