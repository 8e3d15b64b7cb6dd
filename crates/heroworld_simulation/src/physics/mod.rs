//! Physics module: статический collision volume для kinematic героя
//!
//! Содержит:
//! - Capsule (collider персонажа)
//! - LevelCollider (parry TriMesh, CollisionVolume, строится один раз из уровня)
//! - LevelGeometry (builder треугольников)
//! - CollisionWorld (ECS resource, read-only после вставки)

use bevy::prelude::*;

use crate::error::ConfigError;

pub mod capsule;
pub mod collider;
pub mod level;

// Re-export основных типов
pub use capsule::Capsule;
pub use collider::{CollisionVolume, Contact, LevelCollider, CONTACT_SKIN};
pub use level::{LevelGeometry, Triangle};

/// Collision volume мира как ECS resource.
///
/// Вставляется один раз при загрузке уровня; системы получают его через
/// `Res<CollisionWorld>` и только читают.
#[derive(Resource)]
pub struct CollisionWorld {
    volume: Box<dyn CollisionVolume>,
}

impl CollisionWorld {
    pub fn new(volume: impl CollisionVolume) -> Self {
        Self {
            volume: Box::new(volume),
        }
    }

    /// TriMesh из геометрии уровня (ошибка → мир не загружается)
    pub fn from_level(level: LevelGeometry) -> Result<Self, ConfigError> {
        Ok(Self::new(level.build()?))
    }

    pub fn volume(&self) -> &dyn CollisionVolume {
        self.volume.as_ref()
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(LevelCollider::default())
    }
}
