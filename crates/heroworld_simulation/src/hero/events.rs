//! Hero events

use bevy::prelude::*;

use super::controller::RespawnReason;

/// Событие: герой возвращён в точку спавна
///
/// Генерируется step_hero (падение ниже fall_limit или reset).
/// Используется для UI/камеры (сброс follow-позиции) и логов.
#[derive(Event, Debug, Clone)]
pub struct HeroRespawned {
    pub entity: Entity,
    pub reason: RespawnReason,
}
