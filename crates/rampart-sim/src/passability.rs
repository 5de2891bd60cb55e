//! Per-(unit, structure) pass-through decisions.
//!
//! A fence encounter is rolled once per pair and then remembered: `Blocked`
//! is permanent, `Permitted` lasts until the unit separates from the fence.
//! Entries are keyed by the unit's `hecs::Entity`; the engine calls
//! `forget` on despawn and `prune` each tick for units removed elsewhere.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;

use rampart_core::enums::Passage;
use rampart_core::types::StructureId;

#[derive(Debug, Default, Clone)]
pub struct PassabilityMemory {
    decisions: HashMap<Entity, HashMap<StructureId, Passage>>,
}

impl PassabilityMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, unit: Entity, structure: StructureId) -> Passage {
        self.decisions
            .get(&unit)
            .and_then(|m| m.get(&structure))
            .copied()
            .unwrap_or_default()
    }

    /// Return the stored decision, rolling it first if undetermined.
    /// The flag is `true` when this call made the roll.
    pub fn resolve<R: Rng>(
        &mut self,
        unit: Entity,
        structure: StructureId,
        pass_chance: f64,
        rng: &mut R,
    ) -> (Passage, bool) {
        let entry = self
            .decisions
            .entry(unit)
            .or_default()
            .entry(structure)
            .or_default();
        if *entry != Passage::Undetermined {
            return (*entry, false);
        }
        *entry = if rng.gen_bool(pass_chance.clamp(0.0, 1.0)) {
            Passage::Permitted
        } else {
            Passage::Blocked
        };
        (*entry, true)
    }

    /// Drop a `Permitted` decision. `Blocked` entries are left in place.
    pub fn clear_permitted(&mut self, unit: Entity, structure: StructureId) {
        if let Some(map) = self.decisions.get_mut(&unit) {
            if map.get(&structure) == Some(&Passage::Permitted) {
                map.remove(&structure);
            }
            if map.is_empty() {
                self.decisions.remove(&unit);
            }
        }
    }

    /// Removal hook for a despawned unit.
    pub fn forget(&mut self, unit: Entity) {
        self.decisions.remove(&unit);
    }

    /// Removal hook for a structure that no longer exists.
    pub fn forget_structure(&mut self, structure: StructureId) {
        self.decisions.retain(|_, map| {
            map.remove(&structure);
            !map.is_empty()
        });
    }

    /// Drop entries for units no longer in `world`. Returns how many were dropped.
    pub fn prune(&mut self, world: &World) -> usize {
        let before = self.decisions.len();
        self.decisions.retain(|unit, _| world.contains(*unit));
        before - self.decisions.len()
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }

    /// Number of units with at least one stored decision.
    pub fn tracked_units(&self) -> usize {
        self.decisions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn blocked_is_sticky_and_survives_clear_permitted() {
        let mut world = World::new();
        let unit = world.spawn((0u8,));
        let mut memory = PassabilityMemory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let (passage, rolled) = memory.resolve(unit, StructureId(0), 0.0, &mut rng);
        assert_eq!(passage, Passage::Blocked);
        assert!(rolled);

        memory.clear_permitted(unit, StructureId(0));
        let (passage, rolled) = memory.resolve(unit, StructureId(0), 1.0, &mut rng);
        assert_eq!(passage, Passage::Blocked);
        assert!(!rolled);
    }

    #[test]
    fn permitted_clears_on_separation() {
        let mut world = World::new();
        let unit = world.spawn((0u8,));
        let mut memory = PassabilityMemory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        memory.resolve(unit, StructureId(4), 1.0, &mut rng);
        assert_eq!(memory.get(unit, StructureId(4)), Passage::Permitted);
        memory.clear_permitted(unit, StructureId(4));
        assert_eq!(memory.get(unit, StructureId(4)), Passage::Undetermined);
        assert_eq!(memory.tracked_units(), 0);
    }

    #[test]
    fn prune_drops_despawned_units() {
        let mut world = World::new();
        let a = world.spawn((0u8,));
        let b = world.spawn((0u8,));
        let mut memory = PassabilityMemory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        memory.resolve(a, StructureId(0), 0.0, &mut rng);
        memory.resolve(b, StructureId(0), 0.0, &mut rng);

        world.despawn(a).unwrap();
        assert_eq!(memory.prune(&world), 1);
        assert_eq!(memory.get(a, StructureId(0)), Passage::Undetermined);
        assert_eq!(memory.get(b, StructureId(0)), Passage::Blocked);
    }

    #[test]
    fn forget_structure_removes_only_that_structure() {
        let mut world = World::new();
        let unit = world.spawn((0u8,));
        let mut memory = PassabilityMemory::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        memory.resolve(unit, StructureId(0), 0.0, &mut rng);
        memory.resolve(unit, StructureId(1), 0.0, &mut rng);

        memory.forget_structure(StructureId(0));
        assert_eq!(memory.get(unit, StructureId(0)), Passage::Undetermined);
        assert_eq!(memory.get(unit, StructureId(1)), Passage::Blocked);
    }
}
