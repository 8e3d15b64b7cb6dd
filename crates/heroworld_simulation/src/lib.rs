//! Heroworld Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16: kinematic герой в статическом
//! мире из треугольников + proximity trigger zones с диалогами.
//!
//! Слои:
//! - physics: capsule, parry TriMesh уровня (чистая геометрия, без ECS)
//! - hero: CharacterController, facing, анимационный state machine
//! - interaction: TriggerRegistry, ZoneEvent, диалоги областей
//! - world: WorldLayout (JSON) + загрузка уровня
//!
//! Рендер/ввод живут снаружи: пишут HeroInput, читают Transform и события.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod error;
pub mod hero;
pub mod interaction;
pub mod logger;
pub mod physics;
pub mod world;

// Re-export основных типов для удобства
pub use error::ConfigError;
pub use hero::{
    clear_edge_actions, hero_bundle, spawn_hero, AnimationState, Cardinal, CharacterController,
    Hero, HeroAnimator, HeroConfig, HeroInput, HeroPlugin, HeroRespawned, RespawnReason,
};
pub use interaction::{ActiveDialog, AreaDialogs, InteractionPlugin, TriggerRegistry, TriggerZone, ZoneEvent};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{Capsule, CollisionWorld, LevelCollider, LevelGeometry};
pub use world::{load_world, WorldLayout, ZoneSpec};

/// Fixed tick симуляции (~60Hz)
pub const FIXED_TIMESTEP: Duration = Duration::from_micros(16_667);

/// Порядок фаз внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Физика и анимация героя
    Hero,
    /// Trigger zones (видят позицию героя этого же tick)
    Interaction,
    /// Сброс edge-действий ввода
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(FIXED_TIMESTEP))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Hero,
                    SimulationSet::Interaction,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            .add_plugins((HeroPlugin, InteractionPlugin))
            .add_systems(FixedUpdate, clear_edge_actions.in_set(SimulationSet::Cleanup));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт вручную: каждый app.update() == ровно один fixed tick
/// (кроме самого первого update, у которого delta == 0).
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FIXED_TIMESTEP))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
