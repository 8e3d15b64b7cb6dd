//! Interaction events

use bevy::prelude::*;

/// Событие: изменение состояния trigger zone
///
/// Генерируется update_trigger_zones.
/// Обрабатывается:
/// - show_area_dialog (Activated → текст зоны в ActiveDialog)
/// - UI слой (подсказки, звуки)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    /// Герой вошёл в зону (observer — позиция героя в этот кадр)
    Entered { id: String, observer: Vec3 },
    Exited { id: String },
    /// Игрок нажал interact внутри зоны, callback уже вызван
    Activated { id: String },
}

impl ZoneEvent {
    pub fn id(&self) -> &str {
        match self {
            ZoneEvent::Entered { id, .. } | ZoneEvent::Exited { id } | ZoneEvent::Activated { id } => id,
        }
    }
}
