//! Projectile dispatch: cooldown check, target pick, lead-aim, pool acquire.

use glam::Vec2;
use hecs::Entity;

use rampart_core::config::FortressConfig;
use rampart_core::enums::ProjectileSource;

use crate::guidance;
use crate::pool::{ProjectileId, ProjectilePool};
use crate::structure::FireControl;
use crate::systems::targeting::{self, Candidate};

/// Projectile flight parameters shared by every shooter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    pub speed: f32,
    pub radius: f32,
}

impl Ballistics {
    pub fn from_config(config: &FortressConfig) -> Self {
        Self {
            speed: config.projectile_speed,
            radius: config.projectile_radius,
        }
    }
}

/// A successful launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub projectile: ProjectileId,
    pub target: Entity,
    pub origin: Vec2,
    pub angle: f32,
    pub source: ProjectileSource,
}

/// Fire at the best target in range if the cooldown has elapsed.
///
/// Pool exhaustion is a silent miss: nothing is launched and
/// `last_shot_ms` is left untouched so the next tick tries again.
pub fn try_fire(
    fire_control: &mut FireControl,
    origin: Vec2,
    source: ProjectileSource,
    candidates: &[Candidate],
    pool: &mut ProjectilePool,
    ballistics: Ballistics,
    now_ms: u64,
) -> Option<Shot> {
    if !fire_control.ready(now_ms) {
        return None;
    }

    let target = targeting::select_target(origin, candidates, fire_control.range)?;
    if target.dying || origin.distance(target.position) > fire_control.range {
        return None;
    }

    let aim = guidance::lead_aim(origin, target.position, target.velocity, ballistics.speed);
    let angle = guidance::aim_angle(origin, aim);

    let Some(id) = pool.acquire() else {
        tracing::debug!(?source, "projectile pool exhausted, shot skipped");
        return None;
    };
    if let Some(projectile) = pool.get_mut(id) {
        projectile.position = origin;
        projectile.velocity = guidance::heading_velocity(angle, ballistics.speed);
        projectile.radius = ballistics.radius;
        projectile.damage = fire_control.damage;
        projectile.source = source;
    }
    fire_control.last_shot_ms = Some(now_ms);

    tracing::debug!(?source, projectile = %id, angle, "projectile dispatched");
    Some(Shot {
        projectile: id,
        target: target.entity,
        origin,
        angle,
        source,
    })
}
