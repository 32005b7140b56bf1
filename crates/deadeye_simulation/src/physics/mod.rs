//! Physics domain — kinematic интеграция персонажа

pub mod movement;

pub use movement::{
    apply_gravity, ground_detection, integrate_velocity, spawn_shooter_character,
    sync_velocity_to_rapier, KinematicsPlugin,
};
