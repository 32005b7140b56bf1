//! Input domain — per-frame input sample от host layer
//!
//! Host engine (окно/девайсы) каждый кадр собирает оси и кнопки в
//! PlayerInputEvent; системы здесь переводят его в состояние персонажа.
//! Сам input device mapping — вне симуляции.

use bevy::prelude::*;

pub mod events;
pub mod systems;

pub use events::PlayerInputEvent;
pub use systems::apply_player_input;

use crate::SimulationSet;

/// Player Input Plugin
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>();

        app.add_systems(
            FixedUpdate,
            systems::apply_player_input.in_set(SimulationSet::Input),
        );
    }
}
