//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Input systems используют `With<Player>` filter — только
/// player-controlled персонаж получает движение/aim/fire от input events.
///
/// # Required Components
/// Player автоматически тянет за собой полный набор компонентов
/// персонажа (motion, view, camera rig, aim, weapon, animation bridge) —
/// spawn helper'ы перезаписывают дефолты значениями из CharacterTuning.
///
/// # Single-player
/// В этом фрагменте обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    crate::components::CharacterMotion,
    crate::components::KinematicBody,
    crate::components::ViewRotation,
    crate::camera::CameraRig,
    crate::camera::AimState,
    crate::combat::Weapon,
    crate::animation::AnimationProperties
)]
pub struct Player;
