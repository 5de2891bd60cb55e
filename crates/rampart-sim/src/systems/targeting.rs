//! Priority target selection shared by towers and companions.

use glam::Vec2;
use hecs::{Entity, World};

use rampart_core::components::{Hostile, Locomotion, Position, Velocity, Vitals};
use rampart_core::constants::*;
use rampart_core::enums::UnitClass;

/// Targeting view of one hostile unit, gathered once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub class: UnitClass,
    pub elite: bool,
    pub health: f32,
    pub max_health: f32,
    pub dying: bool,
}

/// Snapshot every hostile unit in the world, in query order.
pub fn gather_candidates(world: &World) -> Vec<Candidate> {
    let mut query = world.query::<(
        &Position,
        &Vitals,
        &Hostile,
        Option<&Velocity>,
        Option<&Locomotion>,
    )>();
    query
        .iter()
        .map(|(entity, (pos, vitals, hostile, vel, loco))| Candidate {
            entity,
            position: pos.0,
            velocity: vel.map(|v| v.0).unwrap_or(Vec2::ZERO),
            radius: loco.map(|l| l.radius).unwrap_or(0.0),
            class: hostile.class,
            elite: hostile.elite,
            health: vitals.health,
            max_health: vitals.max_health,
            dying: vitals.dying,
        })
        .collect()
}

pub fn class_priority(class: UnitClass) -> f32 {
    match class {
        UnitClass::Boss => PRIORITY_BOSS,
        UnitClass::Healer => PRIORITY_HEALER,
        UnitClass::Explosive => PRIORITY_EXPLOSIVE,
        UnitClass::Tank => PRIORITY_TANK,
        UnitClass::Runner => PRIORITY_RUNNER,
        UnitClass::Normal => PRIORITY_NORMAL,
    }
}

/// Priority score of `candidate` at `distance`. Higher wins.
pub fn priority_score(candidate: &Candidate, distance: f32) -> f32 {
    let mut score = class_priority(candidate.class);
    if candidate.elite {
        score += PRIORITY_ELITE_BONUS;
    }
    score -= distance * PRIORITY_DISTANCE_PENALTY;
    if candidate.max_health > 0.0
        && candidate.health / candidate.max_health < PRIORITY_FINISHER_THRESHOLD
    {
        score += PRIORITY_FINISHER_BONUS;
    }
    score
}

/// Highest-scoring live candidate within `max_range` of `origin`.
///
/// Ties keep the first candidate in iteration order. When nothing is in
/// range, falls back to the nearest live candidate anywhere; the caller must
/// range-check before firing.
pub fn select_target<'a>(
    origin: Vec2,
    candidates: &'a [Candidate],
    max_range: f32,
) -> Option<&'a Candidate> {
    let mut best: Option<(&Candidate, f32)> = None;
    for candidate in candidates.iter().filter(|c| !c.dying) {
        let distance = origin.distance(candidate.position);
        if distance > max_range {
            continue;
        }
        let score = priority_score(candidate, distance);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((candidate, _)) => Some(candidate),
        None => nearest(origin, candidates),
    }
}

/// Nearest live candidate, first in iteration order on ties.
pub fn nearest(origin: Vec2, candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<(&Candidate, f32)> = None;
    for candidate in candidates.iter().filter(|c| !c.dying) {
        let distance = origin.distance(candidate.position);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(c, _)| c)
}
