//! Camera domain — boom rig и aim-driven FOV zoom
//!
//! Содержит:
//! - CameraRig (boom + FOV state, interp формула)
//! - AimState (boolean aim flag, edge-triggered input'ом)
//! - camera_interp_zoom system (работает КАЖДЫЙ tick, безусловно)
//!
//! Presentation layer читает CameraRig::current_fov и camera_eye()
//! и толкает их в настоящую камеру; симуляция камерой не владеет.

use bevy::prelude::*;

use crate::components::ViewRotation;
use crate::SimulationSet;

/// Camera rig state: boom + FOV zoom
///
/// Инвариант: `min_fov <= current_fov <= max_fov` после каждого update.
/// `current_fov` монотонно приближается к `zoomed_fov` при aiming,
/// иначе к `default_fov`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Длина boom (метры, камера позади персонажа)
    pub boom_length: f32,
    /// Высота подвеса камеры над корнем персонажа (метры)
    pub boom_height: f32,
    /// FOV без прицеливания (градусы)
    pub default_fov: f32,
    /// FOV при прицеливании (градусы)
    pub zoomed_fov: f32,
    /// Текущий FOV (градусы) — то что уходит в камеру
    pub current_fov: f32,
    /// Нижняя граница FOV
    pub min_fov: f32,
    /// Верхняя граница FOV
    pub max_fov: f32,
    /// Скорость интерполяции zoom (1/sec)
    pub zoom_interp_speed: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        let tuning = crate::config::CharacterTuning::default();
        Self::from_tuning(&tuning)
    }
}

impl CameraRig {
    pub fn from_tuning(tuning: &crate::config::CharacterTuning) -> Self {
        Self {
            boom_length: tuning.boom_length,
            boom_height: tuning.boom_height,
            default_fov: tuning.default_fov,
            zoomed_fov: tuning.zoomed_fov,
            current_fov: tuning.default_fov,
            min_fov: tuning.min_fov,
            max_fov: tuning.max_fov,
            zoom_interp_speed: tuning.zoom_interp_speed,
        }
    }

    /// Один interp-шаг к текущему target FOV
    ///
    /// `current += (target - current) × speed × dt`, затем зажим в
    /// `[min_fov, max_fov]`. Сырой шаг может перелететь target при
    /// большом `speed × dt` — зажим и держит инвариант
    /// (пример: 90 → 35 при speed=20, dt=0.1 даёт raw -20 → min_fov).
    pub fn interp_zoom(&mut self, aiming: bool, dt: f32) {
        let target = if aiming { self.zoomed_fov } else { self.default_fov };
        self.current_fov += (target - self.current_fov) * self.zoom_interp_speed * dt;
        self.current_fov = self.current_fov.clamp(self.min_fov, self.max_fov);
    }

    /// Позиция камеры: точка подвеса минус boom вдоль направления взгляда
    pub fn camera_eye(&self, character_pos: Vec3, view: &ViewRotation) -> Vec3 {
        character_pos + Vec3::Y * self.boom_height - view.look_dir() * self.boom_length
    }
}

/// Aim flag персонажа
///
/// Edge-triggered: aim-press → true, aim-release → false.
/// Промежуточных состояний нет — плавность даёт FOV интерполяция,
/// а не state machine.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AimState {
    pub is_aiming: bool,
}

/// System: интерполяция FOV к текущему aim target
///
/// Работает каждый fixed tick БЕЗУСЛОВНО — смена aim state посреди
/// интерполяции просто меняет target, current_fov продолжает движение
/// без скачка.
pub fn camera_interp_zoom(
    mut rigs: Query<(&mut CameraRig, &AimState)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (mut rig, aim) in rigs.iter_mut() {
        rig.interp_zoom(aim.is_aiming, dt);
    }
}

/// Camera Plugin — регистрирует zoom interpolation в FixedUpdate
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, camera_interp_zoom.in_set(SimulationSet::Camera));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        CameraRig {
            boom_length: 3.0,
            boom_height: 1.6,
            default_fov: 90.0,
            zoomed_fov: 35.0,
            current_fov: 90.0,
            min_fov: 5.0,
            max_fov: 170.0,
            zoom_interp_speed: 20.0,
        }
    }

    #[test]
    fn test_zoom_monotonic_towards_target() {
        // Малый dt: FOV монотонно не возрастает к zoomed_fov и не покидает границ
        let mut rig = rig();
        let mut previous = rig.current_fov;

        for _ in 0..200 {
            rig.interp_zoom(true, 1.0 / 60.0);
            assert!(rig.current_fov <= previous + 1e-6);
            assert!(rig.current_fov >= rig.min_fov && rig.current_fov <= rig.max_fov);
            previous = rig.current_fov;
        }

        // Сошлись к zoomed_fov
        assert!((rig.current_fov - rig.zoomed_fov).abs() < 0.1);
    }

    #[test]
    fn test_zoom_overshoot_is_clamped() {
        // Пример из тюнинга: speed=20, dt=0.1 → raw шаг 90 + (35-90)*2 = -20
        let mut rig = rig();
        rig.interp_zoom(true, 0.1);
        assert_eq!(rig.current_fov, rig.min_fov);
    }

    #[test]
    fn test_aim_toggle_redirects_without_snap() {
        let mut rig = rig();
        let dt = 1.0 / 60.0;

        // Половина пути к zoomed
        for _ in 0..30 {
            rig.interp_zoom(true, dt);
        }
        let mid = rig.current_fov;
        assert!(mid < rig.default_fov && mid > rig.zoomed_fov);

        // Отпустили aim: следующий тик двигает ОТ mid к default, без скачка
        rig.interp_zoom(false, dt);
        let step = (rig.default_fov - mid) * rig.zoom_interp_speed * dt;
        assert!((rig.current_fov - (mid + step)).abs() < 1e-4);
        assert!(rig.current_fov > mid);
        assert!(rig.current_fov < rig.default_fov);
    }

    #[test]
    fn test_zoom_stable_at_target() {
        let mut rig = rig();
        rig.current_fov = rig.default_fov;
        rig.interp_zoom(false, 1.0 / 60.0);
        assert_eq!(rig.current_fov, rig.default_fov);
    }

    #[test]
    fn test_camera_eye_behind_character() {
        let rig = rig();
        let view = ViewRotation::default(); // смотрим в -Z
        let eye = rig.camera_eye(Vec3::ZERO, &view);
        // Камера позади (+Z) и выше корня
        assert!(eye.z > 0.0);
        assert!((eye.y - rig.boom_height).abs() < 1e-6);
    }
}
