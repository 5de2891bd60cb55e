//! A single placed defensive structure.
//!
//! Health is only mutated through methods so that `active == (health > 0)`
//! and `0 <= health <= max_health` hold after every call.

use rampart_core::config::{FortressConfig, StructureProfile, TowerProfile};
use rampart_core::enums::StructureKind;
use rampart_core::types::{Bounds, StructureId};

/// Weapon state carried only by towers (and by shooting companions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireControl {
    pub fire_interval_ms: u64,
    pub damage: f32,
    pub range: f32,
    /// `None` until the first successful shot; a fresh weapon fires at once.
    pub last_shot_ms: Option<u64>,
}

impl FireControl {
    pub fn for_tower(weapon: &TowerProfile, level: u32) -> Self {
        Self {
            fire_interval_ms: weapon.fire_interval_ms,
            damage: tower_damage(weapon, level),
            range: weapon.range,
            last_shot_ms: None,
        }
    }

    /// Cooldown elapsed at `now_ms`.
    pub fn ready(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.fire_interval_ms,
        }
    }
}

fn tower_damage(weapon: &TowerProfile, level: u32) -> f32 {
    weapon.base_damage + level as f32 * weapon.damage_bonus_per_level
}

/// Kind tag with kind-specific data. Only towers carry fire control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StructureVariant {
    Fence,
    Wall,
    Barricade,
    Gate,
    Tower(FireControl),
}

impl StructureVariant {
    pub fn kind(&self) -> StructureKind {
        match self {
            Self::Fence => StructureKind::Fence,
            Self::Wall => StructureKind::Wall,
            Self::Barricade => StructureKind::Barricade,
            Self::Gate => StructureKind::Gate,
            Self::Tower(_) => StructureKind::Tower,
        }
    }
}

/// Result of `Structure::take_damage`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub dealt: f32,
    /// Portion soaked up by resistance.
    pub absorbed: f32,
}

#[derive(Debug, Clone)]
pub struct Structure {
    id: StructureId,
    bounds: Bounds,
    variant: StructureVariant,
    profile: StructureProfile,
    upgrade_level: u32,
    health: f32,
    max_health: f32,
    active: bool,
    last_deterioration_ms: Option<u64>,
}

impl Structure {
    /// Build a structure at full health, already scaled to `level`.
    /// Bounds are validated by the registry.
    pub(crate) fn new(
        id: StructureId,
        kind: StructureKind,
        bounds: Bounds,
        config: &FortressConfig,
        level: u32,
    ) -> Self {
        let variant = match kind {
            StructureKind::Fence => StructureVariant::Fence,
            StructureKind::Wall => StructureVariant::Wall,
            StructureKind::Barricade => StructureVariant::Barricade,
            StructureKind::Gate => StructureVariant::Gate,
            StructureKind::Tower => {
                StructureVariant::Tower(FireControl::for_tower(&config.tower_weapon, level))
            }
        };
        let profile = clamp_profile(*config.profile(kind));
        let max_health = max_health_at(&profile, level);
        Self {
            id,
            bounds,
            variant,
            profile,
            upgrade_level: level,
            health: max_health,
            max_health,
            active: max_health > 0.0,
            last_deterioration_ms: None,
        }
    }

    pub fn id(&self) -> StructureId {
        self.id
    }

    pub fn kind(&self) -> StructureKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &StructureVariant {
        &self.variant
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn base_health(&self) -> f32 {
        self.profile.base_health
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn upgrade_level(&self) -> u32 {
        self.upgrade_level
    }

    pub fn slow_factor(&self) -> f32 {
        self.profile.slow_factor
    }

    pub fn blockage_strength(&self) -> f32 {
        self.profile.blockage_strength
    }

    pub fn damage_resistance(&self) -> f32 {
        self.profile.damage_resistance
    }

    pub fn deterioration_rate(&self) -> f32 {
        self.profile.deterioration_rate
    }

    pub fn fire_control(&self) -> Option<&FireControl> {
        match &self.variant {
            StructureVariant::Tower(fc) => Some(fc),
            _ => None,
        }
    }

    pub fn fire_control_mut(&mut self) -> Option<&mut FireControl> {
        match &mut self.variant {
            StructureVariant::Tower(fc) => Some(fc),
            _ => None,
        }
    }

    /// Apply damage reduced by resistance. Negative amounts count as zero.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let amount = amount.max(0.0);
        let dealt = amount * (1.0 - self.profile.damage_resistance);
        let absorbed = amount - dealt;
        self.set_health(self.health - dealt);
        DamageOutcome { dealt, absorbed }
    }

    /// Additive heal, clamped to max health.
    pub fn repair(&mut self, amount: f32) {
        self.set_health(self.health + amount.max(0.0));
    }

    /// Full heal.
    pub fn restore(&mut self) {
        self.set_health(self.max_health);
    }

    /// Rescale to a new upgrade level, keeping the same health fraction.
    pub fn apply_upgrade_level(&mut self, level: u32, weapon: &TowerProfile) {
        let fraction = self.health_fraction();
        self.upgrade_level = level;
        self.max_health = max_health_at(&self.profile, level);
        self.set_health(self.max_health * fraction);
        if let StructureVariant::Tower(fc) = &mut self.variant {
            fc.damage = tower_damage(weapon, level);
        }
    }

    /// Lose `deterioration_rate` health for each whole second elapsed since the
    /// last application. The first call only starts the clock.
    /// Returns the number of seconds applied.
    pub fn deteriorate(&mut self, now_ms: u64, interval_ms: u64) -> u64 {
        let Some(last) = self.last_deterioration_ms else {
            self.last_deterioration_ms = Some(now_ms);
            return 0;
        };
        if !self.active || interval_ms == 0 {
            // Inert structures do not bank decay for when they are restored.
            self.last_deterioration_ms = Some(now_ms);
            return 0;
        }
        let steps = now_ms.saturating_sub(last) / interval_ms;
        if steps == 0 {
            return 0;
        }
        self.last_deterioration_ms = Some(last + steps * interval_ms);
        self.set_health(self.health - self.profile.deterioration_rate * steps as f32);
        steps
    }

    fn set_health(&mut self, health: f32) {
        self.health = if health.is_nan() {
            0.0
        } else {
            health.clamp(0.0, self.max_health)
        };
        self.active = self.health > 0.0;
    }
}

/// Ratios into `[0, 1]`; strengths and rates finite and non-negative.
fn clamp_profile(mut profile: StructureProfile) -> StructureProfile {
    let ratio = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    let non_negative = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    profile.slow_factor = ratio(profile.slow_factor);
    profile.damage_resistance = ratio(profile.damage_resistance);
    profile.blockage_strength = non_negative(profile.blockage_strength);
    profile.deterioration_rate = non_negative(profile.deterioration_rate);
    profile
}

fn max_health_at(profile: &StructureProfile, level: u32) -> f32 {
    profile.base_health + level as f32 * profile.health_bonus_per_level
}
