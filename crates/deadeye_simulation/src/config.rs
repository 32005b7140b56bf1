//! Тюнинг персонажа (authoring-time константы)
//!
//! Все настраиваемые параметры персонажа в одном serde-struct:
//! host/editor layer может загрузить и сохранить их как обычный config.
//! Runtime-компоненты (CameraRig, Weapon, ...) инициализируются отсюда
//! при spawn и дальше владеют своим состоянием сами.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Настройки shooter-персонажа
///
/// Инварианты (проверяются контент-стороной, не runtime):
/// - `min_fov <= zoomed_fov <= default_fov <= max_fov`
/// - `move_speed > 0`, `zoom_interp_speed > 0`
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct CharacterTuning {
    /// Скорость движения (m/s)
    pub move_speed: f32,

    /// Гравитация (m/s²), отрицательная — вниз
    pub gravity: f32,

    /// Базовая скорость поворота по yaw (deg/sec)
    pub base_turn_rate: f32,

    /// Базовая скорость look up/down (deg/sec)
    pub base_look_up_rate: f32,

    /// Длина camera boom (метры, камера позади персонажа)
    pub boom_length: f32,

    /// Высота подвеса камеры над корнем персонажа (метры)
    pub boom_height: f32,

    /// FOV без прицеливания (градусы)
    pub default_fov: f32,

    /// FOV при прицеливании (градусы)
    pub zoomed_fov: f32,

    /// Нижняя граница FOV (зажим после interp-шага)
    pub min_fov: f32,

    /// Верхняя граница FOV
    pub max_fov: f32,

    /// Скорость интерполяции zoom (1/sec)
    pub zoom_interp_speed: f32,

    /// Смещение muzzle socket от корня персонажа (local space, -Z = вперёд)
    ///
    /// `[f32; 3]`, а не Vec3: serde для glam-типов в bevy спрятан
    /// за feature "serialize", который мы не тащим в headless build.
    pub muzzle_offset: [f32; 3],

    /// Максимальная дальность crosshair trace (метры)
    pub trace_range: f32,

    /// Cooldown между выстрелами (секунды, длительность fire montage)
    pub fire_cooldown: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,       // средняя скорость бега
            gravity: -9.81,        // Earth gravity
            base_turn_rate: 45.0,  // deg/sec
            base_look_up_rate: 45.0,
            boom_length: 3.0,
            boom_height: 1.6,      // eye level
            default_fov: 90.0,
            zoomed_fov: 35.0,
            min_fov: 5.0,
            max_fov: 170.0,
            zoom_interp_speed: 20.0,
            muzzle_offset: [0.3, 1.4, -0.6], // правая рука, уровень груди, чуть вперёд
            trace_range: 1000.0,
            fire_cooldown: 0.45,   // ~длительность fire montage
        }
    }
}

impl CharacterTuning {
    pub fn muzzle_offset_vec(&self) -> Vec3 {
        Vec3::from_array(self.muzzle_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_fov_ordering() {
        let tuning = CharacterTuning::default();
        assert!(tuning.min_fov <= tuning.zoomed_fov);
        assert!(tuning.zoomed_fov <= tuning.default_fov);
        assert!(tuning.default_fov <= tuning.max_fov);
    }

    #[test]
    fn test_muzzle_offset_conversion() {
        let tuning = CharacterTuning {
            muzzle_offset: [1.0, 2.0, -3.0],
            ..Default::default()
        };
        assert_eq!(tuning.muzzle_offset_vec(), Vec3::new(1.0, 2.0, -3.0));
    }
}
