//! Weapon component + fire events
//!
//! Architecture:
//! - ECS: Weapon (cooldown, muzzle socket, trace range) + intent/fired events
//! - Presentation: визуальные эффекты выстрела по WeaponFired (fire-and-forget)

use bevy::prelude::*;

/// Hit-scan оружие персонажа
///
/// Cooldown моделирует длительность fire montage: пока montage "играет",
/// новый выстрел не принимается.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    /// Смещение muzzle socket от корня персонажа (local space, -Z = вперёд)
    pub muzzle_offset: Vec3,

    /// Максимальная дальность crosshair trace (метры)
    pub trace_range: f32,

    /// Cooldown между выстрелами (секунды)
    pub fire_cooldown: f32,

    /// Текущий cooldown timer (уменьшается до 0)
    pub cooldown_timer: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        let tuning = crate::config::CharacterTuning::default();
        Self::from_tuning(&tuning)
    }
}

impl Weapon {
    pub fn from_tuning(tuning: &crate::config::CharacterTuning) -> Self {
        Self {
            muzzle_offset: tuning.muzzle_offset_vec(),
            trace_range: tuning.trace_range,
            fire_cooldown: tuning.fire_cooldown,
            cooldown_timer: 0.0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.fire_cooldown;
    }

    /// Muzzle socket в world space
    pub fn muzzle_world(&self, character_pos: Vec3, body_rotation: Quat) -> Vec3 {
        character_pos + body_rotation * self.muzzle_offset
    }
}

/// Event: персонаж ХОЧЕТ выстрелить (strategic intent)
///
/// Emit: apply_player_input (fire кнопка + cooldown готов).
/// Consume: process_fire_intents (beam resolution).
#[derive(Event, Debug, Clone)]
pub struct WeaponFireIntent {
    /// Кто стреляет
    pub shooter: Entity,
}

/// Event: выстрел произошёл (ECS → presentation, fire-and-forget)
///
/// Presentation спавнит muzzle flash у `muzzle`, sound cue, fire montage
/// и beam particles от `muzzle` к `beam_end`. Gameplay-логика возврат
/// не потребляет.
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    /// Кто стреляет
    pub shooter: Entity,

    /// Muzzle socket (world space) — начало beam
    pub muzzle: Vec3,

    /// Конец beam: hit point или far point crosshair trace
    pub beam_end: Vec3,

    /// Во что попали (None = beam ушёл в far point)
    pub impact: Option<Entity>,

    /// false только если crosshair trace вообще нельзя было выполнить
    /// (physics context недоступен — аналог invalid viewport).
    /// beam_end при этом всё равно валиден (fallback far point).
    pub crosshair_evaluated: bool,
}

/// System: тикаем cooldown таймеры оружия
///
/// Работает в FixedUpdate для детерминизма.
pub fn update_weapon_cooldowns(mut weapons: Query<&mut Weapon>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut weapon in weapons.iter_mut() {
        if weapon.cooldown_timer > 0.0 {
            weapon.cooldown_timer = (weapon.cooldown_timer - delta).max(0.0);
        }
    }
}
