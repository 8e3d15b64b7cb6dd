//! Hero module: kinematic персонаж игрока
//!
//! ECS ответственность:
//! - CharacterController: capsule + velocity + on_floor + facing + sit
//! - HeroAnimator: выбор клипа и crossfade
//! - Transform: визуальная поза, выводится из капсулы каждый tick
//!
//! Внешний слой (рендер/клавиатура) только пишет HeroInput и читает Transform.

use bevy::prelude::*;

pub mod animation;
pub mod config;
pub mod controller;
pub mod events;
pub mod facing;
pub mod input;
pub mod systems;


// Re-export основных типов
pub use animation::{AnimationDriver, AnimationState, HeroAnimator};
pub use config::HeroConfig;
pub use controller::{apply_damping, CharacterController, KinematicState, RespawnReason, StepReport};
pub use events::HeroRespawned;
pub use facing::{shortest_yaw_delta, Cardinal, Facing};
pub use input::{clear_edge_actions, HeroInput};
pub use systems::{step_hero, tick_hero_animation};

use crate::error::ConfigError;
use crate::physics::CollisionWorld;
use crate::SimulationSet;

/// Маркер: entity — герой (observer для trigger zones)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Hero;

/// Hero Plugin
///
/// Регистрирует системы героя в FixedUpdate.
///
/// Порядок выполнения:
/// 1. step_hero — физика + анимационный state + Transform
/// 2. tick_hero_animation — crossfade весов
pub struct HeroPlugin;

impl Plugin for HeroPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HeroRespawned>()
            .init_resource::<HeroConfig>()
            .init_resource::<HeroInput>()
            // Пустой мир по умолчанию; уровень вставляет свой CollisionWorld
            .init_resource::<CollisionWorld>();

        app.add_systems(
            FixedUpdate,
            (step_hero, tick_hero_animation)
                .chain()
                .in_set(SimulationSet::Hero),
        );
    }
}

/// Полный набор компонентов героя в точке спавна
///
/// - Hero (marker)
/// - CharacterController (валидирует config)
/// - HeroAnimator (сразу играет Idle)
/// - Transform (поза спавна)
pub fn hero_bundle(
    config: &HeroConfig,
    mut animator: HeroAnimator,
) -> Result<(Hero, CharacterController, HeroAnimator, Transform), ConfigError> {
    let controller = CharacterController::new(config.clone())?;
    animator.play(controller.animation_state());
    let transform = controller.transform();

    Ok((Hero, controller, animator, transform))
}

/// Spawn helper для героя
pub fn spawn_hero(
    commands: &mut Commands,
    config: &HeroConfig,
    animator: HeroAnimator,
) -> Result<Entity, ConfigError> {
    let bundle = hero_bundle(config, animator)?;
    Ok(commands.spawn(bundle).id())
}
