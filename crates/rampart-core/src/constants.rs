//! Simulation constants and tuning defaults.
//!
//! Per-kind structure and companion stats live in `config`; the values here
//! are the shared mechanics that every kind uses.

// --- Arena ---

/// Default arena width in world units.
pub const ARENA_WIDTH: f32 = 360.0;

/// Default arena height in world units.
pub const ARENA_HEIGHT: f32 = 600.0;

// --- Structures ---

/// Deterioration is applied once per this many elapsed milliseconds.
pub const DETERIORATION_INTERVAL_MS: u64 = 1000;

/// Upgrade cost grows by this fraction of the base cost per level.
pub const UPGRADE_COST_STEP: f32 = 0.5;

// --- Contact ---

/// Damage a touching hostile unit deals per frame.
pub const CONTACT_DAMAGE_PER_FRAME: f32 = 0.1;

/// Fraction of the per-frame contact damage that reaches a structure.
pub const STRUCTURE_CONTACT_FACTOR: f32 = 0.5;

/// Multiplier on per-frame contact damage taken by companions.
pub const COMPANION_CONTACT_FACTOR: f32 = 2.0;

// --- Passability ---

/// Chance that a unit's first encounter with a fence lets it through.
pub const FENCE_PASS_THROUGH_CHANCE: f64 = 0.05;

// --- Push-out ---

/// Push distance per unit of blockage strength.
pub const BLOCKAGE_PUSH_FACTOR: f32 = 2.0;

/// Gap left between a snapped unit and the structure edge.
pub const SNAP_CLEARANCE: f32 = 1.0;

// --- Target priority ---

pub const PRIORITY_BOSS: f32 = 1000.0;
pub const PRIORITY_HEALER: f32 = 800.0;
pub const PRIORITY_EXPLOSIVE: f32 = 600.0;
pub const PRIORITY_TANK: f32 = 400.0;
pub const PRIORITY_RUNNER: f32 = 300.0;
pub const PRIORITY_NORMAL: f32 = 100.0;

/// Score bonus for elite units.
pub const PRIORITY_ELITE_BONUS: f32 = 500.0;

/// Score lost per world unit of distance.
pub const PRIORITY_DISTANCE_PENALTY: f32 = 0.5;

/// Score bonus for nearly dead units.
pub const PRIORITY_FINISHER_BONUS: f32 = 200.0;

/// Health fraction below which the finisher bonus applies.
pub const PRIORITY_FINISHER_THRESHOLD: f32 = 0.3;

// --- Projectiles ---

/// Projectile speed in world units per frame.
pub const PROJECTILE_SPEED: f32 = 5.0;

/// Projectile collision radius.
pub const PROJECTILE_RADIUS: f32 = 3.0;

/// Default projectile pool capacity.
pub const PROJECTILE_POOL_SIZE: usize = 50;

// --- Companions ---

/// Damage gain per companion upgrade level (fraction of base).
pub const COMPANION_DAMAGE_PER_LEVEL: f32 = 0.1;

/// Max health gain per companion upgrade level (fraction of base).
pub const COMPANION_HEALTH_PER_LEVEL: f32 = 0.1;

/// Fire interval reduction per companion upgrade level (fraction of base).
pub const COMPANION_FIRE_RATE_PER_LEVEL: f32 = 0.05;

/// Upgrades never push a companion below this fire interval.
pub const COMPANION_MIN_FIRE_INTERVAL_MS: u64 = 100;

// --- Fortress tiers ---

/// Half-extent used for barricade, gate and wall placement around the center.
pub const TIER_LAYOUT_RADIUS: f32 = 50.0;

/// Side length of the fence perimeter square.
pub const FENCE_PERIMETER_SIZE: f32 = 250.0;

/// Thickness of fence segments.
pub const FENCE_THICKNESS: f32 = 10.0;

/// Side length of a corner barricade.
pub const BARRICADE_SIZE: f32 = 25.0;

/// Distance of each barricade center from the arena center, per axis.
pub const BARRICADE_OFFSET: f32 = TIER_LAYOUT_RADIUS * 0.7;

/// Distance from the arena center to the outer side of each gate.
pub const GATE_RING_RADIUS: f32 = TIER_LAYOUT_RADIUS + 10.0;

pub const GATE_WIDTH: f32 = 30.0;
pub const GATE_HEIGHT: f32 = 15.0;

/// Thickness of stone wall segments.
pub const WALL_THICKNESS: f32 = 12.0;

/// Distance from the arena center to the outer side of the top and bottom walls.
pub const WALL_RING_RADIUS: f32 = TIER_LAYOUT_RADIUS + 15.0;

/// Side length of a guard tower.
pub const TOWER_SIZE: f32 = 20.0;

pub const TIER_FENCE_WAVE: u32 = 5;
pub const TIER_BARRICADE_WAVE: u32 = 15;
pub const TIER_GATE_WAVE: u32 = 30;
pub const TIER_WALL_WAVE: u32 = 50;
pub const TIER_TOWER_WAVE: u32 = 75;
