//! Input processing: PlayerInputEvent → состояние персонажа

use bevy::prelude::*;

use crate::camera::AimState;
use crate::combat::{Weapon, WeaponFireIntent};
use crate::components::{CharacterMotion, KinematicBody, Player, ViewRotation};
use crate::input::events::PlayerInputEvent;

/// System: применяет input сэмплы к player-controlled персонажу
///
/// За один сэмпл:
/// 1. turn/look: `yaw += axis × base_turn_rate × dt` (pitch зажат)
/// 2. движение: желаемая горизонтальная скорость в yaw-базисе камеры,
///    диагональ нормализуется (не быстрее прямой)
/// 3. aim edges → AimState (press выигрывает у release в одном сэмпле)
/// 4. fire → WeaponFireIntent, только если cooldown готов
///
/// Вертикальная скорость не трогается — ей владеет gravity система.
pub fn apply_player_input(
    mut input_events: EventReader<PlayerInputEvent>,
    time: Res<Time<Fixed>>,
    mut players: Query<
        (
            Entity,
            &mut CharacterMotion,
            &mut ViewRotation,
            &mut AimState,
            &mut Weapon,
            &KinematicBody,
        ),
        With<Player>,
    >,
    mut fire_intents: EventWriter<WeaponFireIntent>,
) {
    let dt = time.delta_secs();

    for input in input_events.read() {
        for (entity, mut motion, mut view, mut aim, mut weapon, body) in players.iter_mut() {
            // Повороты — до расчёта movement basis, как в оригинальном
            // порядке input callbacks
            view.turn_at_rate(input.turn_axis, dt);
            view.look_up_at_rate(input.look_up_axis, dt);

            // Движение в yaw-базисе камеры
            let forward = input.move_forward.clamp(-1.0, 1.0);
            let right = input.move_right.clamp(-1.0, 1.0);
            let mut direction = view.forward() * forward + view.right() * right;
            if direction.length_squared() > 1.0 {
                direction = direction.normalize();
            }

            motion.velocity.x = direction.x * body.move_speed;
            motion.velocity.z = direction.z * body.move_speed;
            // acceleration зеркалит input — animation bridge читает отсюда
            motion.acceleration = direction * body.move_speed;

            // Aim edges
            if input.aim_pressed {
                aim.is_aiming = true;
            } else if input.aim_released {
                aim.is_aiming = false;
            }

            // Fire: cooldown владеет ECS, intent уходит в combat
            if input.fire && weapon.can_fire() {
                weapon.start_cooldown();
                fire_intents.write(WeaponFireIntent { shooter: entity });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_not_faster() {
        // Та же арифметика что в системе: диагональ W+D нормализуется
        let view = ViewRotation::default();
        let direction = view.forward() * 1.0 + view.right() * 1.0;
        assert!(direction.length() > 1.0);
        let normalized = direction.normalize();
        assert!((normalized.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aim_press_wins_over_release() {
        let mut aim = AimState::default();
        let input = PlayerInputEvent {
            aim_pressed: true,
            aim_released: true,
            ..Default::default()
        };

        if input.aim_pressed {
            aim.is_aiming = true;
        } else if input.aim_released {
            aim.is_aiming = false;
        }

        assert!(aim.is_aiming);
    }
}
