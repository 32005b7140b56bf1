//! Kinematic контроллер персонажа
//!
//! Архитектура:
//! - Rapier для коллайдеров (RigidBody::KinematicPositionBased)
//! - Custom velocity integration (не используем Rapier forces)
//! - Gravity + ground check + input-driven горизонтальная скорость
//!
//! Детерминизм: fixed timestep (60Hz), одна и та же арифметика каждый tick.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{CharacterMotion, KinematicBody, Player, ViewRotation};
use crate::config::CharacterTuning;
use crate::SimulationSet;

/// Порог ground check: пол на y=0, capsule стоит основанием на полу.
/// Небольшой запас на numerical errors.
const GROUND_THRESHOLD: f32 = 0.05;

/// System: применение gravity к velocity
///
/// Работает в FixedUpdate для детерминизма.
pub fn apply_gravity(
    mut query: Query<(&KinematicBody, &mut CharacterMotion)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut motion) in query.iter_mut() {
        if !body.grounded {
            // Применяем гравитацию только если не на земле
            motion.velocity.y += body.gravity * delta;
        } else if motion.velocity.y < 0.0 {
            // На земле — вертикальная скорость вниз гасится
            motion.velocity.y = 0.0;
        }
    }
}

/// System: ground detection через простую Y-проверку
///
/// Пол на y=0; grounded если корень персонажа близок к полу.
/// `is_in_air` для animation bridge — это `!grounded`.
pub fn ground_detection(mut query: Query<(&Transform, &mut KinematicBody)>) {
    for (transform, mut body) in query.iter_mut() {
        body.grounded = transform.translation.y <= GROUND_THRESHOLD;
    }
}

/// System: интеграция velocity → Transform
///
/// position += velocity × dt; корень не проваливается под пол.
pub fn integrate_velocity(
    mut query: Query<(&CharacterMotion, &mut Transform), With<KinematicBody>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (motion, mut transform) in query.iter_mut() {
        transform.translation += motion.velocity * delta;
        if transform.translation.y < 0.0 {
            transform.translation.y = 0.0;
        }
    }
}

/// System: синхронизация нашей velocity в Rapier
///
/// Rapier коллайдеры двигаются той же скоростью что и Transform;
/// сами forces/integration у Rapier не используем.
pub fn sync_velocity_to_rapier(
    mut query: Query<(&CharacterMotion, &mut Velocity), With<KinematicBody>>,
) {
    for (motion, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = motion.velocity;
    }
}

/// Plugin для kinematic контроллера
///
/// Порядок внутри tick'а: ground check → gravity → интеграция → rapier sync.
pub struct KinematicsPlugin;

impl Plugin for KinematicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                ground_detection,
                apply_gravity,
                integrate_velocity,
                sync_velocity_to_rapier,
            )
                .chain()
                .in_set(SimulationSet::Physics),
        );
    }
}

/// Spawn helper для shooter-персонажа
///
/// Entity получает полный набор компонентов из CharacterTuning:
/// - Transform + наша кинематика (CharacterMotion, KinematicBody, ViewRotation)
/// - Camera rig + aim state + weapon + animation bridge (через Player require)
/// - Rapier: RigidBody + Collider (capsule) + Velocity
pub fn spawn_shooter_character(
    commands: &mut Commands,
    tuning: &CharacterTuning,
    position: Vec3,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Player,
            CharacterMotion::default(),
            KinematicBody::from_tuning(tuning),
            ViewRotation::from_tuning(tuning),
            crate::camera::CameraRig::from_tuning(tuning),
            crate::camera::AimState::default(),
            crate::combat::Weapon::from_tuning(tuning),
            crate::animation::AnimationProperties::default(),
            // Rapier physics
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.7, 0.3), // рост ~1.8m с учётом радиуса
            Velocity::default(),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accumulates_in_air() {
        let body = KinematicBody {
            grounded: false,
            ..Default::default()
        };
        let mut motion = CharacterMotion::default();
        let delta = 1.0 / 60.0;

        if !body.grounded {
            motion.velocity.y += body.gravity * delta;
        }

        // После 1/60 sec: velocity.y = -9.81/60 ≈ -0.1635
        assert!(motion.velocity.y < -0.16);
        assert!(motion.velocity.y > -0.17);
    }

    #[test]
    fn test_grounded_stops_gravity() {
        let body = KinematicBody {
            grounded: true,
            ..Default::default()
        };
        let mut motion = CharacterMotion::default();

        if !body.grounded {
            motion.velocity.y += body.gravity * (1.0 / 60.0);
        }

        assert_eq!(motion.velocity.y, 0.0);
    }

    #[test]
    fn test_integration_clamps_to_floor() {
        // Та же арифметика что в integrate_velocity
        let motion = CharacterMotion {
            velocity: Vec3::new(0.0, -10.0, 0.0),
            ..Default::default()
        };
        let mut translation = Vec3::new(0.0, 0.1, 0.0);
        let delta = 1.0 / 60.0;

        translation += motion.velocity * delta;
        if translation.y < 0.0 {
            translation.y = 0.0;
        }

        // -10 m/s за тик пробил бы пол — зажали на y=0
        assert_eq!(translation.y, 0.0);
    }
}
