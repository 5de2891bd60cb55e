use glam::Vec2;
use hecs::World;

use rampart_core::commands::FortressCommand;
use rampart_core::components::{Locomotion, Position, Velocity};
use rampart_core::config::{FortressConfig, UpgradeTable};
use rampart_core::events::FortressEvent;
use rampart_sim::pool::ProjectilePool;
use rampart_sim::world_setup::{spawn_hostile, HostileSpec};
use rampart_sim::{FortressEngine, SimConfig};

const FRAME_MS: u64 = 16;

fn setup_scenario(world: &mut World) {
    // Units converge on the arena center from every side.
    let starts = [
        (20.0, 20.0),
        (340.0, 30.0),
        (180.0, 10.0),
        (10.0, 300.0),
        (350.0, 320.0),
        (30.0, 580.0),
        (180.0, 590.0),
        (330.0, 570.0),
    ];
    let center = Vec2::new(180.0, 300.0);
    for (x, y) in starts {
        let position = Vec2::new(x, y);
        spawn_hostile(
            world,
            HostileSpec {
                position,
                velocity: (center - position).normalize() * 1.5,
                radius: 8.0,
                speed: 1.5,
                health: 4.0,
                ..Default::default()
            },
        );
    }
}

/// Stand-in for the wave collaborator: move every unit along its heading.
fn move_units(world: &mut World) {
    for (_, (pos, vel, loco)) in world.query_mut::<(&mut Position, &Velocity, &Locomotion)>() {
        pos.0 += vel.0.normalize_or_zero() * loco.speed;
    }
}

fn run(seed: u64, ticks: u64) -> (Vec<FortressEvent>, Vec<Vec2>) {
    let mut engine = FortressEngine::new(
        FortressConfig {
            pass_through_chance: 0.3,
            ..Default::default()
        },
        UpgradeTable::default(),
        SimConfig { seed },
    );
    let mut world = World::new();
    let mut pool = ProjectilePool::default();
    setup_scenario(&mut world);
    engine.queue_command(FortressCommand::WaveCleared { wave: 80 });

    let mut events = Vec::new();
    for t in 0..ticks {
        move_units(&mut world);
        events.extend(engine.tick(t * FRAME_MS, &mut world, &mut pool));
    }
    let mut positions: Vec<Vec2> = world
        .query::<&Position>()
        .iter()
        .map(|(_, p)| p.0)
        .collect();
    positions.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    (events, positions)
}

#[test]
fn same_seed_same_outcome() {
    let (events_a, positions_a) = run(12345, 400);
    let (events_b, positions_b) = run(12345, 400);
    assert_eq!(events_a, events_b);
    assert_eq!(positions_a, positions_b);
}

#[test]
fn scenario_exercises_fences_and_towers() {
    let (events, _) = run(7, 400);
    assert!(events
        .iter()
        .any(|e| matches!(e, FortressEvent::PassageResolved { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, FortressEvent::ProjectileFired { .. })));
    let tiers = events
        .iter()
        .filter(|e| matches!(e, FortressEvent::TierBuilt { .. }))
        .count();
    assert_eq!(tiers, 5);
}
