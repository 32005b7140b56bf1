//! Animation bridge — movement properties для blend graph
//!
//! Пересчитывает display-facing свойства раз в tick из текущего
//! состояния персонажа. Bridge только ЧИТАЕТ character state, никогда
//! не мутирует его; blend graph (внешний) читает AnimationProperties.
//!
//! Unbound bridge (entity без компонентов персонажа) — не ошибка:
//! blend graph просто получает default-zero состояние.

use bevy::prelude::*;

use crate::components::{CharacterMotion, KinematicBody, ViewRotation};
use crate::SimulationSet;

/// Порог "персонаж стоит" (m/s) — ниже него yaw offset не пересчитывается
const SPEED_EPSILON: f32 = 1e-3;

/// Published свойства для animation blend graph
///
/// Все значения пересчитываются каждый tick, кроме
/// `last_movement_offset_yaw`: при speed ≈ 0 он удерживает последнее
/// значение на скорости — иначе idle-поза щёлкала бы по yaw, когда
/// velocity обнуляется и угол теряет смысл.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AnimationProperties {
    /// Горизонтальная скорость (m/s, вертикальная компонента исключена)
    pub speed: f32,

    /// Персонаж в воздухе (falling)
    pub is_in_air: bool,

    /// Есть ли input-driven acceleration
    pub is_accelerating: bool,

    /// Угол velocity относительно forward (градусы, (-180, 180]).
    /// Положительный — движение правее взгляда (strafe вправо).
    pub movement_offset_yaw: f32,

    /// Yaw offset в кадре когда персонаж остановился
    pub last_movement_offset_yaw: f32,
}

/// Signed угол между forward и velocity в горизонтальной плоскости
///
/// Градусы, нормализованы в (-180, 180]; -180 сворачивается в +180.
/// None если какой-то из векторов вырожден (угол не определён).
pub fn movement_offset_yaw(forward: Vec3, velocity: Vec3) -> Option<f32> {
    let f = Vec2::new(forward.x, forward.z);
    let v = Vec2::new(velocity.x, velocity.z);
    if f.length_squared() < 1e-8 || v.length_squared() < 1e-8 {
        return None;
    }

    // perp-dot: знак угла от forward к velocity в XZ-плоскости
    let perp = f.x * v.y - f.y * v.x;
    let mut degrees = perp.atan2(f.dot(v)).to_degrees();
    if degrees <= -180.0 {
        degrees += 360.0;
    }
    Some(degrees)
}

/// System: пересчёт animation properties из состояния персонажа
///
/// Порядок: после physics (SimulationSet::Animation последний) — bridge
/// видит velocity уже ЭТОГО кадра, как animation evaluation после
/// engine tick'а.
pub fn update_animation_properties(
    mut query: Query<(
        &CharacterMotion,
        &KinematicBody,
        &ViewRotation,
        &mut AnimationProperties,
    )>,
) {
    for (motion, body, view, mut props) in query.iter_mut() {
        let horizontal = Vec3::new(motion.velocity.x, 0.0, motion.velocity.z);
        props.speed = horizontal.length();
        props.is_in_air = !body.grounded;
        props.is_accelerating = motion.acceleration.length_squared() > 0.0;

        if props.speed > SPEED_EPSILON {
            if let Some(offset) = movement_offset_yaw(view.forward(), motion.velocity) {
                props.movement_offset_yaw = offset;
                props.last_movement_offset_yaw = offset;
            }
        } else {
            // Стоим: держим последний осмысленный yaw offset
            props.movement_offset_yaw = props.last_movement_offset_yaw;
        }
    }
}

/// Animation Plugin
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            update_animation_properties.in_set(SimulationSet::Animation),
        );
    }
}
