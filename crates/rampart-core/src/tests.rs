#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::FortressCommand;
    use crate::config::{upgrade_cost, CompanionMotion, FortressConfig, UpgradeTable};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::FortressEvent;
    use crate::state::FortressSnapshot;
    use crate::types::{Bounds, Edge, StructureId};

    // ---- Geometry ----

    #[test]
    fn test_degenerate_bounds() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Bounds::new(0.0, 0.0, 10.0, -1.0).is_degenerate());
        assert!(Bounds::new(0.0, 0.0, f32::NAN, 10.0).is_degenerate());
        assert!(Bounds::new(0.0, 0.0, f32::INFINITY, 10.0).is_degenerate());
        assert!(Bounds::new(0.0, 0.0, 10.0, f32::INFINITY).is_degenerate());
        assert!(Bounds::new(f32::NAN, 0.0, 10.0, 10.0).is_degenerate());
        assert!(Bounds::new(0.0, f32::NEG_INFINITY, 10.0, 10.0).is_degenerate());
        assert!(!Bounds::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_circle_overlap_uses_expanded_rect() {
        let b = Bounds::new(100.0, 100.0, 50.0, 20.0);
        // Center outside the rectangle but within radius of the left side.
        assert!(b.overlaps_circle(Vec2::new(95.0, 110.0), 6.0));
        // Exactly touching is not an overlap.
        assert!(!b.overlaps_circle(Vec2::new(94.0, 110.0), 6.0));
        assert!(b.overlaps_circle(b.center(), 1.0));
    }

    #[test]
    fn test_clears_circle() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.clears_circle(Vec2::new(20.0, 5.0), 5.0));
        assert!(!b.clears_circle(Vec2::new(14.0, 5.0), 5.0));
        assert!(!b.clears_circle(Vec2::new(5.0, 5.0), 1.0));
    }

    #[test]
    fn test_nearest_edge_prefers_left_on_ties() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(b.nearest_edge(b.center()), Edge::Left);
        assert_eq!(b.nearest_edge(Vec2::new(9.0, 5.0)), Edge::Right);
        assert_eq!(b.nearest_edge(Vec2::new(5.0, 1.0)), Edge::Top);
        assert_eq!(b.nearest_edge(Vec2::new(5.0, 9.5)), Edge::Bottom);
        // Right and Top tie: Right wins.
        assert_eq!(b.nearest_edge(Vec2::new(8.0, 2.0)), Edge::Right);
    }

    #[test]
    fn test_snap_outside_clears_rect() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let snapped = b.snap_outside(b.center(), 2.0);
        assert_eq!(snapped, Vec2::new(-3.0, 5.0));
        assert!(!b.overlaps_circle(snapped, 2.0));

        let snapped = b.snap_outside(Vec2::new(5.0, 9.0), 2.0);
        assert_eq!(snapped, Vec2::new(5.0, 13.0));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let b = Bounds::new(10.0, 10.0, 5.0, 5.0);
        assert!(b.contains_point(Vec2::new(10.0, 10.0)));
        assert!(b.contains_point(Vec2::new(15.0, 15.0)));
        assert!(!b.contains_point(Vec2::new(15.1, 12.0)));
    }

    // ---- Enums ----

    #[test]
    fn test_structure_kind_parse() {
        for kind in StructureKind::ALL {
            assert_eq!(StructureKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(StructureKind::parse("WALL"), Some(StructureKind::Wall));
        assert_eq!(StructureKind::parse("moat"), None);
    }

    #[test]
    fn test_projectile_source_friendliness() {
        assert!(ProjectileSource::Player.is_friendly());
        assert!(ProjectileSource::Tower(StructureId(3)).is_friendly());
        assert!(!ProjectileSource::Hostile.is_friendly());
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = FortressConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.profile(StructureKind::Wall).damage_resistance, 0.5);
        assert_eq!(config.profile(StructureKind::Tower).slow_factor, 0.0);
        assert_eq!(config.companion(CompanionKind::Turret).motion, CompanionMotion::Stationary);
        assert!(config.companion(CompanionKind::Medic).fire_interval_ms.is_none());
    }

    #[test]
    fn test_config_partial_json_overrides() {
        let json = r#"{
            "pass_through_chance": 0.25,
            "tower_weapon": { "fire_interval_ms": 400, "base_damage": 2.0, "range": 120.0, "damage_bonus_per_level": 1.0 }
        }"#;
        let config = FortressConfig::from_json(json).unwrap();
        assert_eq!(config.pass_through_chance, 0.25);
        assert_eq!(config.tower_weapon.fire_interval_ms, 400);
        // Untouched fields keep their defaults.
        assert_eq!(config.fence.base_health, 150.0);
    }

    #[test]
    fn test_config_rejects_out_of_range_ratio() {
        let mut config = FortressConfig::default();
        config.gate.damage_resistance = 1.5;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "gate.damage_resistance"),
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_bad_chance_and_malformed_json() {
        assert!(matches!(
            FortressConfig::from_json(r#"{ "pass_through_chance": 2.0 }"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            FortressConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_upgrade_cost_formula() {
        assert_eq!(upgrade_cost(100, 0), 100);
        assert_eq!(upgrade_cost(100, 1), 150);
        assert_eq!(upgrade_cost(250, 1), 375);
        assert_eq!(upgrade_cost(300, 3), 750);
        assert_eq!(upgrade_cost(75, 1), 112);
    }

    #[test]
    fn test_upgrade_table_defaults_and_json() {
        let mut table = UpgradeTable::default();
        assert_eq!(table.structure_level(StructureKind::Gate), 0);
        table.set_structure_level(StructureKind::Gate, 3);
        table.set_companion_level(CompanionKind::Drone, 2);

        let json = serde_json::to_string(&table).unwrap();
        let back: UpgradeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.structure_level(StructureKind::Gate), 3);
        assert_eq!(back.companion_level(CompanionKind::Drone), 2);
        assert_eq!(back.companion_level(CompanionKind::Tank), 0);
    }

    // ---- Commands / events ----

    #[test]
    fn test_command_json_is_tagged() {
        let cmd = FortressCommand::SetUpgradeLevel {
            kind: StructureKind::Fence,
            level: 2,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SetUpgradeLevel\""));

        let parsed: FortressCommand =
            serde_json::from_str(r#"{"type":"WaveCleared","wave":15}"#).unwrap();
        assert_eq!(parsed, FortressCommand::WaveCleared { wave: 15 });
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = FortressEvent::UnitKilled {
            unit: 7,
            source: ProjectileSource::Tower(StructureId(1)),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"UnitKilled\""));
        let back: FortressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snap = FortressSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"structures\":[]"));
    }
}
