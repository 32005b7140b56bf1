//! DEADEYE Simulation Core
//!
//! ECS-симуляция third-person shooter персонажа на Bevy 0.16
//! (strategic layer).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay state (движение, aim/zoom, hit-scan выстрел,
//!   animation properties)
//! - Host engine = presentation layer (рендер, skeletal animation,
//!   particles, sound) — потребляет компоненты и events, ничего в
//!   симуляции не мутирует
//!
//! Поток данных за tick:
//! input events → character state → kinematic интеграция →
//! camera zoom + weapon fire → animation bridge → (внешний) blend graph

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod camera;
pub mod combat;
pub mod components;
pub mod config;
pub mod game_mode;
pub mod input;
pub mod logger;
pub mod physics;

// Re-export основных типов для удобства
pub use animation::{movement_offset_yaw, update_animation_properties, AnimationProperties};
pub use camera::{camera_interp_zoom, AimState, CameraRig};
pub use combat::{
    beam_endpoint, update_weapon_cooldowns, BeamEnd, CombatPlugin, Weapon, WeaponFireIntent,
    WeaponFired,
};
pub use components::*;
pub use config::CharacterTuning;
pub use input::{PlayerInputEvent, PlayerInputPlugin};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use physics::{spawn_shooter_character, KinematicsPlugin};

/// Порядок подсистем внутри FixedUpdate tick'а
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Input events → character state (velocity, view, aim, fire intents)
    Input,
    /// Kinematic интеграция (gravity, ground check, velocity → Transform)
    Physics,
    /// Camera FOV interpolation (каждый tick, безусловно)
    Camera,
    /// Weapon cooldowns + beam resolution
    Combat,
    /// Animation bridge — последним, видит состояние этого кадра
    Animation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Тюнинг персонажа (host/editor layer может заменить resource)
            .init_resource::<CharacterTuning>()
            // Порядок подсистем в tick'е
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Physics,
                    SimulationSet::Camera,
                    SimulationSet::Combat,
                    SimulationSet::Animation,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((
                PlayerInputPlugin,
                KinematicsPlugin,
                camera::CameraPlugin,
                CombatPlugin,
                animation::AnimationPlugin,
                game_mode::GameModePlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Прогоняет ровно один fixed tick (headless драйвер)
///
/// Обычный `app.update()` гонит FixedUpdate от wall clock — для
/// детерминированных прогонов продвигаем Time<Fixed> на один timestep
/// вручную и запускаем schedule напрямую.
pub fn run_fixed_tick(app: &mut App) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(timestep);
    app.world_mut().run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
///
/// Собирает компоненты в детерминированный байтовый формат
/// (сортировка по Entity ID, сериализация через Debug).
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
