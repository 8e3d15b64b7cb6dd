//! Параметры героя (gravity, скорости, damping, capsule, spawn)
//!
//! Дефолты совпадают с "живой" игрой; загрузка из JSON через WorldLayout.
//! Валидация один раз при сборке мира — дальше step() не проверяет ничего.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::facing::Cardinal;
use crate::error::ConfigError;
use crate::physics::Capsule;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Ускорение свободного падения (m/s², вниз)
    pub gravity: f32,
    /// Прирост скорости на земле (m/s за секунду удержания)
    pub ground_speed: f32,
    /// То же в воздухе (слабый air control)
    pub air_speed: f32,
    /// Вертикальная скорость в момент прыжка
    pub jump_impulse: f32,
    /// Длительность поворота к новому направлению (сек)
    pub turn_duration: f32,
    /// Коэффициент экспоненциального damping при движении
    pub ground_damping: f32,
    /// Damping сидящего героя (гасит остаточную скорость быстрее)
    pub sit_damping: f32,
    /// Crossfade между анимациями (сек)
    pub crossfade: f32,
    pub capsule_radius: f32,
    /// Длина отрезка капсулы (без полусфер)
    pub capsule_height: f32,
    /// Смещение визуальной модели вниз от центра капсулы
    pub foot_offset: f32,
    /// Ниже этой высоты герой считается выпавшим из мира
    pub fall_limit: f32,
    pub spawn_position: Vec3,
    pub spawn_facing: Cardinal,
    /// Uniform scale визуальной модели
    pub scale: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            ground_speed: 25.0,
            air_speed: 8.0,
            jump_impulse: 10.0,
            turn_duration: 0.2,
            ground_damping: 4.0,
            sit_damping: 10.0,
            crossfade: 0.2,
            capsule_radius: 0.35,
            capsule_height: 0.65,
            foot_offset: 0.7,
            fall_limit: -20.0,
            spawn_position: Vec3::new(37.0, 10.0, 6.0),
            spawn_facing: Cardinal::PosX,
            scale: 2.0,
        }
    }
}

impl HeroConfig {
    /// Проверка диапазонов (precondition для CharacterController::new)
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("gravity", self.gravity)?;
        non_negative("ground_speed", self.ground_speed)?;
        non_negative("air_speed", self.air_speed)?;
        non_negative("jump_impulse", self.jump_impulse)?;
        non_negative("turn_duration", self.turn_duration)?;
        non_negative("ground_damping", self.ground_damping)?;
        non_negative("sit_damping", self.sit_damping)?;
        non_negative("crossfade", self.crossfade)?;
        positive("capsule_height", self.capsule_height)?;
        positive("scale", self.scale)?;

        if !self.foot_offset.is_finite() {
            return Err(ConfigError::InvalidHeroParam {
                name: "foot_offset",
                value: self.foot_offset,
            });
        }

        // Спавн ниже fall_limit → бесконечный respawn loop
        if !self.fall_limit.is_finite() || self.fall_limit >= self.spawn_position.y {
            return Err(ConfigError::InvalidHeroParam {
                name: "fall_limit",
                value: self.fall_limit,
            });
        }

        if !self.spawn_position.is_finite() {
            return Err(ConfigError::InvalidHeroParam {
                name: "spawn_position",
                value: self.spawn_position.y,
            });
        }

        // radius проверяет сам Capsule::new
        self.spawn_capsule().map(|_| ())
    }

    /// Капсула в точке спавна (визуальная позиция == spawn_position)
    pub fn spawn_capsule(&self) -> Result<Capsule, ConfigError> {
        Capsule::standing_at(
            self.spawn_position,
            self.capsule_height,
            self.capsule_radius,
            self.foot_offset,
        )
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidHeroParam { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidHeroParam { name, value })
    }
}
