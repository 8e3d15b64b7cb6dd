//! World module: статическая сцена (геометрия + layout областей)
//!
//! Всё, что задаётся один раз при загрузке уровня:
//! - CollisionWorld (TriMesh из LevelGeometry)
//! - WorldLayout (HeroConfig, зоны, диалоги)

use bevy::prelude::*;

pub mod layout;

pub use layout::{WorldLayout, ZoneSpec};

use crate::error::ConfigError;
use crate::hero::{hero_bundle, HeroAnimator};
use crate::logger;
use crate::physics::{CollisionWorld, LevelGeometry};

/// Загружает уровень и layout, спавнит героя. Возвращает entity героя.
///
/// Герой сразу садится на землю (settle), если спавн касается геометрии.
pub fn load_world(
    app: &mut App,
    level: LevelGeometry,
    layout: &WorldLayout,
) -> Result<Entity, ConfigError> {
    let collision = CollisionWorld::from_level(level)?;
    layout.install(app)?;

    let animator = HeroAnimator::with_default_clips(layout.hero.crossfade);
    let (hero, mut controller, animator, _) = hero_bundle(&layout.hero, animator)?;
    if let Some(contact) = controller.settle(collision.volume()) {
        logger::log(&format!("Hero settled on spawn (normal {:?})", contact.normal));
    }
    let transform = controller.transform();

    app.insert_resource(collision);
    let entity = app.world_mut().spawn((hero, controller, animator, transform)).id();

    logger::log_info(&format!("Hero {:?} spawned at {:?}", entity, transform.translation));
    Ok(entity)
}
