//! ECS Components для shooter-персонажа
//!
//! Организация по доменам:
//! - player: player control marker (Player)
//! - movement: кинематика и ориентация (CharacterMotion, KinematicBody, ViewRotation)
//!
//! Компоненты camera/combat/animation живут в своих domain-модулях
//! (crate::camera, crate::combat, crate::animation).

pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use movement::*;
pub use player::*;
