//! Projectile flight and hit resolution.

use glam::Vec2;
use hecs::{Entity, World};

use rampart_core::components::{Hostile, Locomotion, Position, Vitals};
use rampart_core::events::FortressEvent;
use rampart_core::types::{Bounds, StructureId};

use crate::pool::{ProjectileId, ProjectilePool};
use crate::structure::{DamageOutcome, Structure};

/// Move every active projectile one frame and release those that left the arena.
/// Returns the number released.
pub fn advance(pool: &mut ProjectilePool, arena: &Bounds) -> usize {
    let mut gone: Vec<ProjectileId> = Vec::new();
    let ids: Vec<ProjectileId> = pool.iter_active().map(|(id, _)| id).collect();
    for id in ids {
        if let Some(projectile) = pool.get_mut(id) {
            projectile.position += projectile.velocity;
            if !arena.contains_point(projectile.position) {
                gone.push(id);
            }
        }
    }
    for id in &gone {
        pool.release(*id);
    }
    gone.len()
}

/// Hostile projectiles against structures. Friendly projectiles pass through.
/// Each projectile hits at most one active structure and is released.
pub fn handle_structure_hits(
    pool: &mut ProjectilePool,
    structures: &mut [Structure],
) -> Vec<(StructureId, DamageOutcome)> {
    let incoming: Vec<(ProjectileId, Vec2, f32, f32)> = pool
        .iter_active()
        .filter(|(_, p)| !p.source.is_friendly())
        .map(|(id, p)| (id, p.position, p.radius, p.damage))
        .collect();

    let mut hits = Vec::new();
    for (id, position, radius, damage) in incoming {
        let Some(structure) = structures
            .iter_mut()
            .find(|s| s.is_active() && s.bounds().overlaps_circle(position, radius))
        else {
            continue;
        };
        // Release first: the projectile may already have been released this
        // tick, in which case it must not deal damage twice.
        if pool.release(id) {
            hits.push((structure.id(), structure.take_damage(damage)));
        }
    }
    hits
}

struct Target {
    entity: Entity,
    position: Vec2,
    radius: f32,
    dying: bool,
}

/// Friendly projectiles against live hostile units. A hit deals the
/// projectile's damage, releases it, and marks the unit dying at zero health.
pub fn resolve_unit_hits(
    pool: &mut ProjectilePool,
    world: &mut World,
    events: &mut Vec<FortressEvent>,
) {
    let mut targets: Vec<Target> = world
        .query_mut::<(&Position, &Locomotion, &Vitals, &Hostile)>()
        .into_iter()
        .filter(|(_, (_, _, vitals, _))| !vitals.dying)
        .map(|(entity, (pos, loco, _, _))| Target {
            entity,
            position: pos.0,
            radius: loco.radius,
            dying: false,
        })
        .collect();
    if targets.is_empty() {
        return;
    }

    let shots: Vec<_> = pool
        .iter_active()
        .filter(|(_, p)| p.source.is_friendly())
        .map(|(id, p)| (id, *p))
        .collect();

    for (id, projectile) in shots {
        let Some(target) = targets.iter_mut().find(|t| {
            !t.dying && t.position.distance(projectile.position) < t.radius + projectile.radius
        }) else {
            continue;
        };
        if !pool.release(id) {
            continue;
        }
        let Ok(mut vitals) = world.get::<&mut Vitals>(target.entity) else {
            continue;
        };
        vitals.health = (vitals.health - projectile.damage).max(0.0);
        if vitals.health <= 0.0 {
            vitals.dying = true;
            target.dying = true;
            tracing::debug!(unit = ?target.entity, source = ?projectile.source, "unit killed");
            events.push(FortressEvent::UnitKilled {
                unit: target.entity.to_bits().get(),
                source: projectile.source,
            });
        }
    }
}
