//! Player input events
//!
//! События генерируются host input layer'ом (раз в кадр) и
//! обрабатываются ECS системами.

use bevy::prelude::Event;

/// Player input event — сэмпл input'а за один кадр
///
/// # Архитектура
/// - Emit: host input layer (axis + button callbacks, раз в кадр)
/// - Consume: apply_player_input (движение, повороты, aim, fire)
///
/// # Поля
/// - Оси нормализованы в [-1, 1]; системы дополнительно зажимают.
/// - `aim_pressed`/`aim_released` — edge события кнопки aim за кадр;
///   если пришли оба, press выигрывает (release обработается следующим
///   чистым сэмплом).
/// - `fire` — just_pressed кнопки выстрела.
///
/// # Примечание
/// Кадр без движения — event с нулевыми осями, НЕ отсутствие event'а:
/// горизонтальная скорость персонажа сбрасывается только явным нулевым
/// сэмплом (как и у host callback'ов, приходящих каждый кадр).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerInputEvent {
    /// Вперёд/назад: +1.0 = вперёд (вдоль взгляда), -1.0 = назад
    pub move_forward: f32,

    /// Вправо/влево: +1.0 = вправо, -1.0 = влево
    pub move_right: f32,

    /// Yaw ось: +1.0 = поворот направо со скоростью base_turn_rate
    pub turn_axis: f32,

    /// Pitch ось: +1.0 = взгляд вверх со скоростью base_look_up_rate
    pub look_up_axis: f32,

    /// Кнопка aim нажата в этом кадре
    pub aim_pressed: bool,

    /// Кнопка aim отпущена в этом кадре
    pub aim_released: bool,

    /// Кнопка выстрела (just_pressed)
    pub fire: bool,
}
