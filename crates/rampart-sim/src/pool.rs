//! Bounded projectile pool with generational handles.
//!
//! Slots are preallocated and never grow. A `ProjectileId` carries the slot's
//! generation at acquisition time, so releasing the same id twice, or
//! releasing an id after its slot was reused, is a harmless no-op.

use glam::Vec2;

use rampart_core::constants::PROJECTILE_POOL_SIZE;
use rampart_core::enums::ProjectileSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId {
    pub index: u32,
    pub generation: u32,
}

impl std::fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}g{}", self.index, self.generation)
    }
}

/// Projectile state. Velocity is per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub source: ProjectileSource,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 0.0,
            damage: 0.0,
            source: ProjectileSource::Player,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    active: bool,
    projectile: Projectile,
}

#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                active: false,
                projectile: Projectile::default(),
            })
            .collect();
        // Reverse so the lowest index is handed out first.
        let free = (0..capacity as u32).rev().collect();
        Self { slots, free }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Take a free slot, reset to a default projectile. `None` when exhausted.
    pub fn acquire(&mut self) -> Option<ProjectileId> {
        let index = self.free.pop()?;
        let slot = &mut self.slots[index as usize];
        slot.active = true;
        slot.projectile = Projectile::default();
        Some(ProjectileId {
            index,
            generation: slot.generation,
        })
    }

    /// Return a projectile to the pool. Returns `false` for stale or
    /// already-released ids.
    pub fn release(&mut self, id: ProjectileId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.active && slot.generation == id.generation => {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                true
            }
            _ => false,
        }
    }

    pub fn release_all(&mut self) {
        let ids: Vec<ProjectileId> = self.iter_active().map(|(id, _)| id).collect();
        for id in ids {
            self.release(id);
        }
    }

    pub fn is_active(&self, id: ProjectileId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.active && s.generation == id.generation)
            .map(|s| &s.projectile)
    }

    pub fn get_mut(&mut self, id: ProjectileId) -> Option<&mut Projectile> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.active && s.generation == id.generation)
            .map(|s| &mut s.projectile)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.active).map(|(i, s)| {
            (
                ProjectileId {
                    index: i as u32,
                    generation: s.generation,
                },
                &s.projectile,
            )
        })
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new(PROJECTILE_POOL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_until_exhausted() {
        let mut pool = ProjectilePool::new(3);
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = ProjectilePool::new(2);
        let id = pool.acquire().unwrap();
        assert!(pool.release(id));
        assert!(!pool.release(id));
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn stale_id_does_not_release_reused_slot() {
        let mut pool = ProjectilePool::new(1);
        let old = pool.acquire().unwrap();
        pool.release(old);
        let new = pool.acquire().unwrap();
        assert_eq!(old.index, new.index);
        assert_ne!(old.generation, new.generation);
        assert!(!pool.release(old));
        assert!(pool.is_active(new));
        assert!(pool.get(old).is_none());
    }

    #[test]
    fn release_all_frees_every_slot() {
        let mut pool = ProjectilePool::new(4);
        for _ in 0..4 {
            pool.acquire();
        }
        pool.release_all();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.iter_active().count(), 0);
    }
}
