//! Combat domain — hit-scan выстрел с beam end-point resolution
//!
//! ECS ответственность:
//! - Weapon state: cooldown, muzzle socket, trace range
//! - Strategic intent: WeaponFireIntent (input решил стрелять)
//! - Beam resolution: двухфазный trace crosshair → muzzle
//!
//! Presentation ответственность (внешняя, через WeaponFired event):
//! - muzzle flash, sound cue, fire montage, beam/impact particles
//!
//! Порядок выполнения (FixedUpdate, SimulationSet::Combat):
//! 1. update_weapon_cooldowns — тикаем cooldown таймеры
//! 2. process_fire_intents — intent → raycast → WeaponFired

use bevy::prelude::*;

pub mod beam;
pub mod weapon;


pub use beam::{beam_endpoint, process_fire_intents, BeamEnd};
pub use weapon::{update_weapon_cooldowns, Weapon, WeaponFireIntent, WeaponFired};

use crate::SimulationSet;

/// Combat Plugin
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFireIntent>()
            .add_event::<WeaponFired>();

        app.add_systems(
            FixedUpdate,
            (weapon::update_weapon_cooldowns, beam::process_fire_intents)
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
