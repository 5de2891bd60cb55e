//! Tuning tables for structures, towers and companions.
//!
//! Every value has a default taken from the game's balance sheet, so a host
//! may load a partial JSON document and only override what it changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CompanionKind, StructureKind};
use crate::error::ConfigError;

/// Per-kind structure stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureProfile {
    pub base_health: f32,
    /// Fraction of speed removed from an overlapping unit.
    pub slow_factor: f32,
    /// Push-out strength. Units are moved `blockage_strength * 2` per frame.
    pub blockage_strength: f32,
    /// Health lost per second while active.
    pub deterioration_rate: f32,
    /// Fraction of incoming damage absorbed.
    pub damage_resistance: f32,
    /// Cost of the first upgrade level.
    pub upgrade_cost: u32,
    pub health_bonus_per_level: f32,
}

/// Weapon stats shared by every tower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerProfile {
    pub fire_interval_ms: u64,
    pub base_damage: f32,
    pub range: f32,
    pub damage_bonus_per_level: f32,
}

/// How a companion moves relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CompanionMotion {
    /// Circle the anchor at `radius`, advancing `angular_speed` radians per frame.
    Orbit { radius: f32, angular_speed: f32 },
    /// Close in on the anchor whenever farther than `distance`.
    Follow { distance: f32 },
    /// Never moves.
    Stationary,
}

/// Periodic anchor healing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealProfile {
    pub amount: f32,
    pub interval_ms: u64,
}

/// Per-kind companion stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanionProfile {
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    /// `None` for companions that never shoot.
    pub fire_interval_ms: Option<u64>,
    pub range: f32,
    pub motion: CompanionMotion,
    #[serde(default)]
    pub heal: Option<HealProfile>,
    pub unlock_wave: u32,
    pub upgrade_cost: u32,
}

/// Complete fortress tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortressConfig {
    pub fence: StructureProfile,
    pub wall: StructureProfile,
    pub barricade: StructureProfile,
    pub tower: StructureProfile,
    pub gate: StructureProfile,
    pub tower_weapon: TowerProfile,

    pub drone: CompanionProfile,
    pub robot: CompanionProfile,
    pub turret: CompanionProfile,
    pub medic: CompanionProfile,
    pub tank: CompanionProfile,

    pub contact_damage_per_frame: f32,
    /// Probability that a unit's first fence encounter lets it through.
    pub pass_through_chance: f64,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub arena_width: f32,
    pub arena_height: f32,
}

impl Default for FortressConfig {
    fn default() -> Self {
        Self {
            fence: StructureProfile {
                base_health: 150.0,
                slow_factor: 0.3,
                blockage_strength: 1.5,
                deterioration_rate: 0.1,
                damage_resistance: 0.2,
                upgrade_cost: 100,
                health_bonus_per_level: 50.0,
            },
            wall: StructureProfile {
                base_health: 300.0,
                slow_factor: 0.5,
                blockage_strength: 2.0,
                deterioration_rate: 0.05,
                damage_resistance: 0.5,
                upgrade_cost: 300,
                health_bonus_per_level: 100.0,
            },
            barricade: StructureProfile {
                base_health: 200.0,
                slow_factor: 0.4,
                blockage_strength: 1.5,
                deterioration_rate: 0.2,
                damage_resistance: 0.3,
                upgrade_cost: 200,
                health_bonus_per_level: 75.0,
            },
            tower: StructureProfile {
                base_health: 500.0,
                slow_factor: 0.0,
                blockage_strength: 3.0,
                deterioration_rate: 0.02,
                damage_resistance: 0.6,
                upgrade_cost: 500,
                health_bonus_per_level: 150.0,
            },
            gate: StructureProfile {
                base_health: 250.0,
                slow_factor: 0.2,
                blockage_strength: 1.0,
                deterioration_rate: 0.08,
                damage_resistance: 0.4,
                upgrade_cost: 250,
                health_bonus_per_level: 100.0,
            },
            tower_weapon: TowerProfile {
                fire_interval_ms: 800,
                base_damage: 1.0,
                range: 200.0,
                damage_bonus_per_level: 0.5,
            },

            drone: CompanionProfile {
                radius: 6.0,
                speed: 3.5,
                health: 20.0,
                damage: 0.5,
                fire_interval_ms: Some(500),
                range: 200.0,
                motion: CompanionMotion::Orbit {
                    radius: 40.0,
                    angular_speed: 0.05,
                },
                heal: None,
                unlock_wave: 10,
                upgrade_cost: 500,
            },
            robot: CompanionProfile {
                radius: 8.0,
                speed: 2.0,
                health: 40.0,
                damage: 1.0,
                fire_interval_ms: Some(400),
                range: 200.0,
                motion: CompanionMotion::Follow { distance: 30.0 },
                heal: None,
                unlock_wave: 25,
                upgrade_cost: 750,
            },
            turret: CompanionProfile {
                radius: 10.0,
                speed: 0.0,
                health: 60.0,
                damage: 1.5,
                fire_interval_ms: Some(300),
                range: 150.0,
                motion: CompanionMotion::Stationary,
                heal: None,
                unlock_wave: 50,
                upgrade_cost: 1000,
            },
            medic: CompanionProfile {
                radius: 7.0,
                speed: 2.5,
                health: 30.0,
                damage: 0.0,
                fire_interval_ms: None,
                range: 200.0,
                motion: CompanionMotion::Follow { distance: 25.0 },
                heal: Some(HealProfile {
                    amount: 0.5,
                    interval_ms: 2000,
                }),
                unlock_wave: 75,
                upgrade_cost: 1250,
            },
            tank: CompanionProfile {
                radius: 12.0,
                speed: 1.5,
                health: 100.0,
                damage: 0.8,
                fire_interval_ms: Some(600),
                range: 200.0,
                motion: CompanionMotion::Follow { distance: 20.0 },
                heal: None,
                unlock_wave: 100,
                upgrade_cost: 1500,
            },

            contact_damage_per_frame: CONTACT_DAMAGE_PER_FRAME,
            pass_through_chance: FENCE_PASS_THROUGH_CHANCE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
        }
    }
}

impl FortressConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn profile(&self, kind: StructureKind) -> &StructureProfile {
        match kind {
            StructureKind::Fence => &self.fence,
            StructureKind::Wall => &self.wall,
            StructureKind::Barricade => &self.barricade,
            StructureKind::Tower => &self.tower,
            StructureKind::Gate => &self.gate,
        }
    }

    pub fn companion(&self, kind: CompanionKind) -> &CompanionProfile {
        match kind {
            CompanionKind::Drone => &self.drone,
            CompanionKind::Robot => &self.robot,
            CompanionKind::Turret => &self.turret,
            CompanionKind::Medic => &self.medic,
            CompanionKind::Tank => &self.tank,
        }
    }

    /// Reject values the simulation cannot honor: slow and resistance outside
    /// `[0, 1]`, non-positive health or speed, zero fire intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in StructureKind::ALL {
            let p = self.profile(kind);
            let name = kind.as_str();
            positive(&format!("{name}.base_health"), p.base_health)?;
            ratio(&format!("{name}.slow_factor"), p.slow_factor)?;
            non_negative(&format!("{name}.blockage_strength"), p.blockage_strength)?;
            ratio(&format!("{name}.damage_resistance"), p.damage_resistance)?;
            non_negative(&format!("{name}.deterioration_rate"), p.deterioration_rate)?;
            non_negative(
                &format!("{name}.health_bonus_per_level"),
                p.health_bonus_per_level,
            )?;
        }

        if self.tower_weapon.fire_interval_ms == 0 {
            return Err(invalid("tower_weapon.fire_interval_ms", "must be non-zero"));
        }
        non_negative("tower_weapon.base_damage", self.tower_weapon.base_damage)?;
        positive("tower_weapon.range", self.tower_weapon.range)?;

        for kind in CompanionKind::ALL {
            let c = self.companion(kind);
            let name = kind.as_str();
            positive(&format!("{name}.health"), c.health)?;
            positive(&format!("{name}.radius"), c.radius)?;
            non_negative(&format!("{name}.speed"), c.speed)?;
            if c.fire_interval_ms == Some(0) {
                return Err(invalid(
                    &format!("{name}.fire_interval_ms"),
                    "must be non-zero",
                ));
            }
        }

        non_negative("contact_damage_per_frame", self.contact_damage_per_frame)?;
        if !(0.0..=1.0).contains(&self.pass_through_chance) {
            return Err(invalid("pass_through_chance", "must be within [0, 1]"));
        }
        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_radius", self.projectile_radius)?;
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn ratio(field: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be within [0, 1]"))
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

/// Per-kind upgrade levels, supplied by the host's economy layer.
///
/// Levels are shared by every instance of a kind. Missing kinds are level 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeTable {
    #[serde(default)]
    pub structures: BTreeMap<StructureKind, u32>,
    #[serde(default)]
    pub companions: BTreeMap<CompanionKind, u32>,
}

impl UpgradeTable {
    pub fn structure_level(&self, kind: StructureKind) -> u32 {
        self.structures.get(&kind).copied().unwrap_or(0)
    }

    pub fn set_structure_level(&mut self, kind: StructureKind, level: u32) {
        self.structures.insert(kind, level);
    }

    pub fn companion_level(&self, kind: CompanionKind) -> u32 {
        self.companions.get(&kind).copied().unwrap_or(0)
    }

    pub fn set_companion_level(&mut self, kind: CompanionKind, level: u32) {
        self.companions.insert(kind, level);
    }
}

/// `floor(base * (1 + 0.5 * level))`: the price of going from `level` to
/// `level + 1`.
pub fn upgrade_cost(base_cost: u32, level: u32) -> u32 {
    (base_cost as f32 * (1.0 + UPGRADE_COST_STEP * level as f32)).floor() as u32
}
