//! Ошибки конфигурации (precondition violations на этапе setup)
//!
//! Во время симуляции ошибок нет: всё recoverable деградирует тихо
//! (нет hero → skip, нет клипа → no-op, падение → respawn).
//! Всё, что нельзя починить посреди кадра, отсекается здесь, при сборке мира.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("capsule radius must be finite and > 0, got {0}")]
    InvalidCapsuleRadius(f32),

    /// start.y должен быть строго ниже end.y
    #[error("capsule segment must be vertical with start.y < end.y (start.y = {start}, end.y = {end})")]
    DegenerateCapsule { start: f32, end: f32 },

    #[error("hero parameter `{name}` is out of range: {value}")]
    InvalidHeroParam { name: &'static str, value: f32 },

    #[error("trigger zone `{id}` radius must be finite and > 0, got {radius}")]
    InvalidZoneRadius { id: String, radius: f32 },

    #[error("trigger zone id must not be empty")]
    EmptyZoneId,

    #[error("dialog display time must be finite and >= 0, got {0}")]
    InvalidDialogSeconds(f32),

    /// parry отказался строить TriMesh (битые индексы и т.п.)
    #[error("invalid level mesh: {0}")]
    InvalidLevelMesh(String),

    #[error("failed to parse world layout: {0}")]
    Parse(#[from] serde_json::Error),
}
