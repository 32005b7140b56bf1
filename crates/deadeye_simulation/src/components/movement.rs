//! Movement компоненты: кинематика персонажа и ориентация камеры/корпуса

use bevy::prelude::*;

/// Зажим pitch камеры (радианы): ±80°, чтобы boom не перекручивался
pub const PITCH_LIMIT: f32 = 80.0 * std::f32::consts::PI / 180.0;

/// Текущая кинематика персонажа
///
/// - `velocity` интегрируется в Transform каждый fixed tick
/// - `acceleration` зеркалит живой movement input (ноль без input) —
///   animation bridge читает отсюда `is_accelerating`
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CharacterMotion {
    /// Скорость (m/s, world space)
    pub velocity: Vec3,

    /// Input-driven acceleration (направление input × move_speed)
    pub acceleration: Vec3,
}

/// Параметры kinematic-контроллера + ground флаг
///
/// Rapier используется для коллайдеров, velocity интегрируем сами.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicBody {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Сила гравитации (m/s²)
    pub gravity: f32,
    /// На земле ли персонаж (обновляется ground_detection)
    pub grounded: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: -9.81,
            grounded: false,
        }
    }
}

impl KinematicBody {
    pub fn from_tuning(tuning: &crate::config::CharacterTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            gravity: tuning.gravity,
            grounded: false,
        }
    }
}

/// Ориентация взгляда/корпуса персонажа
///
/// Yaw вращает и movement basis, и камеру; pitch — только камеру.
/// Конвенция: yaw = 0 → персонаж смотрит в -Z, yaw растёт при повороте направо.
///
/// Rates хранятся как в оригинальном тюнинге — deg/sec; методы применяют
/// `rate × base_rate × dt` (rate — нормализованная ось [-1, 1]).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ViewRotation {
    /// Yaw (радианы)
    pub yaw: f32,
    /// Pitch (радианы, зажат в ±PITCH_LIMIT)
    pub pitch: f32,
    /// Базовая скорость поворота (deg/sec)
    pub base_turn_rate: f32,
    /// Базовая скорость look up/down (deg/sec)
    pub base_look_up_rate: f32,
}

impl Default for ViewRotation {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            base_turn_rate: 45.0,
            base_look_up_rate: 45.0,
        }
    }
}

impl ViewRotation {
    pub fn from_tuning(tuning: &crate::config::CharacterTuning) -> Self {
        Self {
            base_turn_rate: tuning.base_turn_rate,
            base_look_up_rate: tuning.base_look_up_rate,
            ..Default::default()
        }
    }

    /// Поворот по yaw: delta = rate × base_turn_rate × dt
    pub fn turn_at_rate(&mut self, rate: f32, dt: f32) {
        self.yaw += rate.clamp(-1.0, 1.0) * self.base_turn_rate.to_radians() * dt;
    }

    /// Look up/down: delta = rate × base_look_up_rate × dt, pitch зажат
    pub fn look_up_at_rate(&mut self, rate: f32, dt: f32) {
        let delta = rate.clamp(-1.0, 1.0) * self.base_look_up_rate.to_radians() * dt;
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Горизонтальный forward (без pitch) — movement basis
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Горизонтальный right — movement basis
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Полное направление взгляда (yaw + pitch), normalized
    pub fn look_dir(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Quat переводящий local space персонажа в world (для muzzle socket)
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_at_rate_scaling() {
        // rate=1.0, base 45 deg/s, dt=1s → ровно 45°
        let mut view = ViewRotation::default();
        view.turn_at_rate(1.0, 1.0);
        assert!((view.yaw - 45.0_f32.to_radians()).abs() < 1e-6);

        // rate=0.5, dt=0.1 → 2.25°
        let mut view = ViewRotation::default();
        view.turn_at_rate(0.5, 0.1);
        assert!((view.yaw - 2.25_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut view = ViewRotation::default();
        // Долго смотрим вверх — pitch упирается в лимит
        for _ in 0..1000 {
            view.look_up_at_rate(1.0, 0.1);
        }
        assert!(view.pitch <= PITCH_LIMIT + 1e-6);

        for _ in 0..2000 {
            view.look_up_at_rate(-1.0, 0.1);
        }
        assert!(view.pitch >= -PITCH_LIMIT - 1e-6);
    }

    #[test]
    fn test_movement_basis_orthogonal() {
        let view = ViewRotation {
            yaw: 1.3,
            ..Default::default()
        };
        let f = view.forward();
        let r = view.right();
        assert!(f.dot(r).abs() < 1e-6);
        assert!((f.length() - 1.0).abs() < 1e-6);
        assert!((r.length() - 1.0).abs() < 1e-6);
        // forward при yaw=0 — строго -Z
        let view = ViewRotation::default();
        assert!((view.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_positive_yaw_turns_right() {
        // Поворот направо на 90°: forward -Z → +X
        let view = ViewRotation {
            yaw: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        assert!((view.forward() - Vec3::X).length() < 1e-6);
        assert!((view.right() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_look_dir_matches_forward_without_pitch() {
        let view = ViewRotation {
            yaw: 0.7,
            pitch: 0.0,
            ..Default::default()
        };
        assert!((view.look_dir() - view.forward()).length() < 1e-6);
    }

    #[test]
    fn test_body_rotation_maps_neg_z_to_forward() {
        let view = ViewRotation {
            yaw: 2.1,
            ..Default::default()
        };
        let rotated = view.body_rotation() * Vec3::NEG_Z;
        assert!((rotated - view.forward()).length() < 1e-5);
    }
}
