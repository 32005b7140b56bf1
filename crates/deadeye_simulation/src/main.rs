//! Headless симуляция DEADEYE
//!
//! Запускает Bevy App без рендера: спавнит персонажа, гонит фиксированные
//! тики со скриптованным input'ом (бег + aim + выстрел) и печатает
//! ключевое состояние. Smoke-прогон для проверки детерминизма руками.

use bevy::prelude::*;
use deadeye_simulation::{
    create_headless_app, run_fixed_tick, spawn_shooter_character, AnimationProperties, CameraRig,
    CharacterTuning, PlayerInputEvent,
};

fn main() {
    let seed = 42;
    println!("Starting DEADEYE headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.update(); // инициализация schedules/plugins

    let tuning = CharacterTuning::default();
    let player = {
        let world = app.world_mut();
        let entity = {
            let mut commands = world.commands();
            spawn_shooter_character(&mut commands, &tuning, Vec3::ZERO)
        };
        world.flush();
        entity
    };

    // 600 тиков: бежим вперёд-вправо, с 120-го тика целимся, на 180-м стреляем
    for tick in 0..600u32 {
        let input = PlayerInputEvent {
            move_forward: 1.0,
            move_right: 0.4,
            aim_pressed: tick == 120,
            aim_released: tick == 420,
            fire: tick == 180,
            ..Default::default()
        };
        app.world_mut().send_event(input);
        run_fixed_tick(&mut app);

        if tick % 100 == 0 {
            let world = app.world();
            let fov = world.get::<CameraRig>(player).map(|rig| rig.current_fov);
            let props = world.get::<AnimationProperties>(player).copied();
            println!(
                "Tick {}: fov={:?} speed={:?}",
                tick,
                fov,
                props.map(|p| p.speed)
            );
        }
    }

    println!("Simulation complete!");
}
