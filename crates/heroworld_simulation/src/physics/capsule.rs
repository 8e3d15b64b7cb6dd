//! Capsule collider персонажа (swept sphere: отрезок + радиус)

use bevy::prelude::*;

use crate::error::ConfigError;

/// Вертикальная капсула: `start` — нижний центр, `end` — верхний.
///
/// Инварианты (проверяются в [`Capsule::new`]):
/// - `radius > 0`
/// - `start.y < end.y`
/// - длина отрезка не меняется: капсула только транслируется
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidCapsuleRadius(radius));
        }
        if !(start.is_finite() && end.is_finite()) || start.y >= end.y {
            return Err(ConfigError::DegenerateCapsule {
                start: start.y,
                end: end.y,
            });
        }
        Ok(Self { start, end, radius })
    }

    /// Капсула, центр которой стоит на `foot_offset` выше `feet`
    /// (обратная операция к [`Capsule::feet_position`]).
    pub fn standing_at(
        feet: Vec3,
        height: f32,
        radius: f32,
        foot_offset: f32,
    ) -> Result<Self, ConfigError> {
        let center = feet + Vec3::Y * foot_offset;
        let half = Vec3::Y * (height * 0.5);
        Self::new(center - half, center + half, radius)
    }

    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Позиция визуальной модели: центр капсулы минус foot offset
    pub fn feet_position(&self, foot_offset: f32) -> Vec3 {
        self.center() - Vec3::Y * foot_offset
    }

    pub fn segment_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.start += delta;
        self.end += delta;
    }
}
