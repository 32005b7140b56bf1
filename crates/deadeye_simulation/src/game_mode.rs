//! Game mode stub
//!
//! Оригинальный фрагмент содержит пустой game mode (правил матча ещё
//! нет). Plugin оставлен как точка расширения — spawn policy, win
//! conditions и т.п. появятся здесь.

use bevy::prelude::*;

/// Game Mode Plugin (пустой stub)
pub struct GameModePlugin;

impl Plugin for GameModePlugin {
    fn build(&self, _app: &mut App) {
        // Пока ничего: game mode фрагмента пуст
    }
}
