//! Autonomous companions that escort an anchor (the player) and shoot with
//! the same targeting and dispatch as towers.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use rand::Rng;

use rampart_core::config::{upgrade_cost, CompanionMotion, CompanionProfile, FortressConfig, HealProfile};
use rampart_core::constants::*;
use rampart_core::enums::{CompanionKind, ProjectileSource};
use rampart_core::error::CompanionError;
use rampart_core::types::CompanionId;

use crate::pool::ProjectilePool;
use crate::structure::FireControl;
use crate::systems::dispatch::{self, Ballistics, Shot};
use crate::systems::targeting::Candidate;

/// The entity companions escort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
}

/// Upgrade-scaled companion stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledStats {
    pub damage: f32,
    pub max_health: f32,
    pub fire_interval_ms: Option<u64>,
}

/// Damage and health grow 10% of base per level; fire interval shrinks 5%
/// of base per level, never below the minimum interval.
pub fn scaled_stats(profile: &CompanionProfile, level: u32) -> ScaledStats {
    let l = level as f32;
    ScaledStats {
        damage: profile.damage * (1.0 + COMPANION_DAMAGE_PER_LEVEL * l),
        max_health: (profile.health + profile.health * COMPANION_HEALTH_PER_LEVEL * l).floor(),
        fire_interval_ms: profile.fire_interval_ms.map(|base| {
            let scaled = (base as f32 * (1.0 - COMPANION_FIRE_RATE_PER_LEVEL * l)).floor();
            (scaled.max(0.0) as u64).max(COMPANION_MIN_FIRE_INTERVAL_MS)
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Companion {
    pub id: CompanionId,
    pub kind: CompanionKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
    pub speed: f32,
    pub motion: CompanionMotion,
    pub weapon: Option<FireControl>,
    pub heal: Option<HealProfile>,
    pub last_heal_ms: Option<u64>,
    pub orbit_angle: f32,
    pub upgrade_level: u32,
    pub dying: bool,
}

impl Companion {
    fn new(
        id: CompanionId,
        kind: CompanionKind,
        position: Vec2,
        profile: &CompanionProfile,
        level: u32,
        orbit_angle: f32,
    ) -> Self {
        let stats = scaled_stats(profile, level);
        Self {
            id,
            kind,
            position,
            health: stats.max_health,
            max_health: stats.max_health,
            radius: profile.radius,
            speed: profile.speed,
            motion: profile.motion,
            weapon: stats.fire_interval_ms.map(|interval| FireControl {
                fire_interval_ms: interval,
                damage: stats.damage,
                range: profile.range,
                last_shot_ms: None,
            }),
            heal: profile.heal,
            last_heal_ms: None,
            orbit_angle,
            upgrade_level: level,
            dying: false,
        }
    }

    fn apply_level(&mut self, profile: &CompanionProfile, level: u32) {
        let stats = scaled_stats(profile, level);
        self.upgrade_level = level;
        self.max_health = stats.max_health;
        self.health = self.health.min(self.max_health);
        if let (Some(weapon), Some(interval)) = (self.weapon.as_mut(), stats.fire_interval_ms) {
            weapon.damage = stats.damage;
            weapon.fire_interval_ms = interval;
        }
    }

    fn advance(&mut self, anchor: Vec2) {
        match self.motion {
            CompanionMotion::Orbit {
                radius,
                angular_speed,
            } => {
                self.orbit_angle += angular_speed;
                self.position = anchor + Vec2::from_angle(self.orbit_angle) * radius;
            }
            CompanionMotion::Follow { distance } => {
                let to_anchor = anchor - self.position;
                if to_anchor.length() > distance {
                    self.position += to_anchor.normalize_or_zero() * self.speed;
                }
            }
            CompanionMotion::Stationary => {}
        }
    }

    /// Heal amount owed to the anchor this tick, if the interval elapsed and
    /// the anchor is hurt.
    fn heal_due(&mut self, anchor: &Anchor, now_ms: u64) -> f32 {
        let Some(heal) = self.heal else {
            return 0.0;
        };
        let due = match self.last_heal_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > heal.interval_ms,
        };
        if !due || anchor.health >= anchor.max_health {
            return 0.0;
        }
        self.last_heal_ms = Some(now_ms);
        heal.amount.min(anchor.max_health - anchor.health)
    }

    fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.dying = true;
        }
    }
}

/// Result of one squad update.
#[derive(Debug, Default)]
pub struct SquadTick {
    pub shots: Vec<Shot>,
    /// Total anchor health restored by medics.
    pub healed: f32,
}

pub struct Squad {
    config: FortressConfig,
    levels: BTreeMap<CompanionKind, u32>,
    unlocked: BTreeSet<CompanionKind>,
    members: Vec<Companion>,
    next_id: u32,
}

impl Squad {
    pub fn new(config: FortressConfig, levels: BTreeMap<CompanionKind, u32>) -> Self {
        Self {
            config,
            levels,
            unlocked: BTreeSet::new(),
            members: Vec::new(),
            next_id: 0,
        }
    }

    pub fn is_unlocked(&self, kind: CompanionKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Returns `true` if the kind was newly unlocked.
    pub fn unlock(&mut self, kind: CompanionKind) -> bool {
        self.unlocked.insert(kind)
    }

    /// Unlock every kind whose wave threshold has been reached.
    pub fn check_unlocks(&mut self, wave: u32) -> Vec<CompanionKind> {
        let mut newly = Vec::new();
        for kind in CompanionKind::ALL {
            if wave >= self.config.companion(kind).unlock_wave && self.unlock(kind) {
                tracing::info!(kind = kind.as_str(), wave, "companion unlocked");
                newly.push(kind);
            }
        }
        newly
    }

    pub fn level(&self, kind: CompanionKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(0)
    }

    pub fn levels(&self) -> &BTreeMap<CompanionKind, u32> {
        &self.levels
    }

    pub fn upgrade_cost(&self, kind: CompanionKind) -> u32 {
        upgrade_cost(self.config.companion(kind).upgrade_cost, self.level(kind))
    }

    /// Spawn a companion of an unlocked kind at its current upgrade level.
    pub fn spawn<R: Rng>(
        &mut self,
        kind: CompanionKind,
        position: Vec2,
        rng: &mut R,
    ) -> Result<CompanionId, CompanionError> {
        if !self.is_unlocked(kind) {
            tracing::warn!(kind = kind.as_str(), "rejected spawn of locked companion");
            return Err(CompanionError::Locked(kind));
        }
        let id = CompanionId(self.next_id);
        self.next_id += 1;
        let orbit_angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let level = self.level(kind);
        self.members.push(Companion::new(
            id,
            kind,
            position,
            self.config.companion(kind),
            level,
            orbit_angle,
        ));
        tracing::info!(%id, kind = kind.as_str(), level, "companion spawned");
        Ok(id)
    }

    /// Set a kind's level and rescale existing companions of that kind.
    pub fn set_upgrade_level(&mut self, kind: CompanionKind, level: u32) {
        self.levels.insert(kind, level);
        let profile = *self.config.companion(kind);
        for companion in self.members.iter_mut().filter(|c| c.kind == kind) {
            companion.apply_level(&profile, level);
        }
        tracing::info!(kind = kind.as_str(), level, "companion level set");
    }

    /// Move, heal and shoot for every live companion.
    pub fn update(
        &mut self,
        anchor: &Anchor,
        now_ms: u64,
        candidates: &[Candidate],
        pool: &mut ProjectilePool,
        ballistics: Ballistics,
    ) -> SquadTick {
        let mut tick = SquadTick::default();
        let mut anchor = *anchor;
        for companion in self.members.iter_mut().filter(|c| !c.dying) {
            companion.advance(anchor.position);

            let healed = companion.heal_due(&anchor, now_ms);
            anchor.health += healed;
            tick.healed += healed;

            let origin = companion.position;
            let source = ProjectileSource::Companion(companion.id);
            if let Some(weapon) = companion.weapon.as_mut() {
                if let Some(shot) =
                    dispatch::try_fire(weapon, origin, source, candidates, pool, ballistics, now_ms)
                {
                    tick.shots.push(shot);
                }
            }
        }
        tick
    }

    /// Contact damage from touching hostile units. Returns companions that
    /// went down this call.
    pub fn apply_contact_damage(
        &mut self,
        candidates: &[Candidate],
        contact_damage_per_frame: f32,
    ) -> Vec<(CompanionId, CompanionKind)> {
        let amount = contact_damage_per_frame * COMPANION_CONTACT_FACTOR;
        let mut down = Vec::new();
        for companion in self.members.iter_mut().filter(|c| !c.dying) {
            for unit in candidates.iter().filter(|u| !u.dying) {
                if companion.dying {
                    break;
                }
                if companion.position.distance(unit.position) < companion.radius + unit.radius {
                    companion.take_damage(amount);
                }
            }
            if companion.dying {
                down.push((companion.id, companion.kind));
            }
        }
        down
    }

    /// Revive and fully heal every companion.
    pub fn restore_all(&mut self) {
        for companion in &mut self.members {
            companion.dying = false;
            companion.health = companion.max_health;
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn get(&self, id: CompanionId) -> Option<&Companion> {
        self.members.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Companion> {
        self.members.iter()
    }

    pub fn active_count(&self) -> usize {
        self.members.iter().filter(|c| !c.dying).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rampart_core::enums::UnitClass;

    fn squad() -> Squad {
        Squad::new(FortressConfig::default(), BTreeMap::new())
    }

    fn unit_at(world: &mut World, position: Vec2) -> Candidate {
        Candidate {
            entity: world.spawn((0u8,)),
            position,
            velocity: Vec2::ZERO,
            radius: 10.0,
            class: UnitClass::Normal,
            elite: false,
            health: 3.0,
            max_health: 3.0,
            dying: false,
        }
    }

    fn ballistics() -> Ballistics {
        Ballistics::from_config(&FortressConfig::default())
    }

    #[test]
    fn scaled_stats_follow_level() {
        let config = FortressConfig::default();
        let turret = config.companion(CompanionKind::Turret);
        assert_eq!(scaled_stats(turret, 0).fire_interval_ms, Some(300));
        assert_eq!(scaled_stats(turret, 5).max_health, 90.0);
        // 300 * (1 - 0.95) is below the floor.
        assert_eq!(scaled_stats(turret, 19).fire_interval_ms, Some(100));

        let medic = config.companion(CompanionKind::Medic);
        assert_eq!(scaled_stats(medic, 3).fire_interval_ms, None);
        assert_eq!(scaled_stats(medic, 3).max_health, 39.0);
    }

    #[test]
    fn unlocks_follow_wave_thresholds() {
        let mut squad = squad();
        assert!(squad.check_unlocks(9).is_empty());
        assert_eq!(squad.check_unlocks(10), vec![CompanionKind::Drone]);
        assert_eq!(
            squad.check_unlocks(60),
            vec![CompanionKind::Robot, CompanionKind::Turret]
        );
        assert!(squad.check_unlocks(60).is_empty());
        assert!(!squad.is_unlocked(CompanionKind::Tank));
    }

    #[test]
    fn locked_kind_cannot_spawn() {
        let mut squad = squad();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            squad.spawn(CompanionKind::Medic, Vec2::ZERO, &mut rng),
            Err(CompanionError::Locked(CompanionKind::Medic))
        );
        assert_eq!(squad.iter().count(), 0);
    }

    #[test]
    fn level_change_rescales_and_clamps_health() {
        let mut squad = squad();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        squad.unlock(CompanionKind::Robot);
        squad.set_upgrade_level(CompanionKind::Robot, 2);
        let id = squad.spawn(CompanionKind::Robot, Vec2::ZERO, &mut rng).unwrap();
        assert_eq!(squad.get(id).unwrap().health, 48.0);

        squad.set_upgrade_level(CompanionKind::Robot, 0);
        let robot = squad.get(id).unwrap();
        assert_eq!(robot.max_health, 40.0);
        assert_eq!(robot.health, 40.0);
        assert_eq!(robot.weapon.unwrap().fire_interval_ms, 400);
        assert_eq!(squad.upgrade_cost(CompanionKind::Robot), 750);
    }

    #[test]
    fn drone_orbits_and_shoots() {
        let mut world = World::new();
        let mut squad = squad();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = ProjectilePool::new(8);
        squad.unlock(CompanionKind::Drone);
        let id = squad.spawn(CompanionKind::Drone, Vec2::ZERO, &mut rng).unwrap();

        let anchor = Anchor {
            position: Vec2::new(100.0, 100.0),
            health: 100.0,
            max_health: 100.0,
        };
        let target = unit_at(&mut world, Vec2::new(150.0, 100.0));
        let tick = squad.update(&anchor, 0, &[target], &mut pool, ballistics());

        let drone = squad.get(id).unwrap();
        assert!((drone.position.distance(anchor.position) - 40.0).abs() < 1e-3);
        assert_eq!(tick.shots.len(), 1);
        assert_eq!(tick.shots[0].source, ProjectileSource::Companion(id));
        assert_eq!(tick.healed, 0.0);
    }

    #[test]
    fn follow_and_stationary_motion() {
        let mut squad = squad();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = ProjectilePool::new(8);
        squad.check_unlocks(50);
        let robot = squad.spawn(CompanionKind::Robot, Vec2::ZERO, &mut rng).unwrap();
        let turret = squad
            .spawn(CompanionKind::Turret, Vec2::new(5.0, 5.0), &mut rng)
            .unwrap();

        let anchor = Anchor {
            position: Vec2::new(100.0, 0.0),
            health: 100.0,
            max_health: 100.0,
        };
        squad.update(&anchor, 0, &[], &mut pool, ballistics());
        assert!((squad.get(robot).unwrap().position - Vec2::new(2.0, 0.0)).length() < 1e-5);
        assert_eq!(squad.get(turret).unwrap().position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn medic_heals_hurt_anchor_on_interval() {
        let mut squad = squad();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = ProjectilePool::new(8);
        squad.unlock(CompanionKind::Medic);
        squad.spawn(CompanionKind::Medic, Vec2::ZERO, &mut rng).unwrap();

        let hurt = Anchor {
            position: Vec2::ZERO,
            health: 50.0,
            max_health: 100.0,
        };
        let heal_at = |squad: &mut Squad, pool: &mut ProjectilePool, anchor: &Anchor, now| {
            squad.update(anchor, now, &[], pool, ballistics()).healed
        };
        assert_eq!(heal_at(&mut squad, &mut pool, &hurt, 0), 0.5);
        assert_eq!(heal_at(&mut squad, &mut pool, &hurt, 2000), 0.0);
        assert_eq!(heal_at(&mut squad, &mut pool, &hurt, 2001), 0.5);

        let full = Anchor {
            health: 100.0,
            ..hurt
        };
        assert_eq!(heal_at(&mut squad, &mut pool, &full, 10_000), 0.0);
    }

    #[test]
    fn contact_damage_downs_once_and_restore_revives() {
        let mut world = World::new();
        let mut squad = squad();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        squad.unlock(CompanionKind::Robot);
        let id = squad.spawn(CompanionKind::Robot, Vec2::ZERO, &mut rng).unwrap();
        let units = [
            unit_at(&mut world, Vec2::new(5.0, 0.0)),
            unit_at(&mut world, Vec2::new(0.0, 5.0)),
        ];

        assert!(squad.apply_contact_damage(&units, 0.1).is_empty());
        assert!((squad.get(id).unwrap().health - 39.6).abs() < 1e-4);

        let mut downs = Vec::new();
        for _ in 0..200 {
            downs.extend(squad.apply_contact_damage(&units, 0.1));
        }
        assert_eq!(downs, vec![(id, CompanionKind::Robot)]);
        assert_eq!(squad.active_count(), 0);

        squad.restore_all();
        assert_eq!(squad.active_count(), 1);
        assert_eq!(squad.get(id).unwrap().health, 40.0);
    }
}
