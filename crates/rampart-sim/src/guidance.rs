//! Aiming helpers shared by towers and companions.
//!
//! Lead-aim is a single linear step: the target is projected forward by the
//! time the projectile needs to cover the *current* distance. Fast or
//! accelerating targets are under- or over-led; that is accepted.

use glam::Vec2;

/// Predicted aim point for a target moving at constant velocity.
///
/// `target_vel` is per frame and `projectile_speed` is world units per frame,
/// so `distance / projectile_speed` is the flight time in frames.
pub fn lead_aim(origin: Vec2, target_pos: Vec2, target_vel: Vec2, projectile_speed: f32) -> Vec2 {
    if projectile_speed <= 0.0 {
        return target_pos;
    }
    let flight_frames = origin.distance(target_pos) / projectile_speed;
    target_pos + target_vel * flight_frames
}

/// Heading in radians from `origin` to `point`, measured from +x toward +y.
pub fn aim_angle(origin: Vec2, point: Vec2) -> f32 {
    let d = point - origin;
    d.y.atan2(d.x)
}

/// Per-frame velocity for a projectile fired at `angle`.
pub fn heading_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * speed
}
