//! TriggerZone: сфера вокруг точки + hysteresis enter/exit
//!
//! Каждый кадр:
//! 1. distance(observer, center) < radius (строго) → occupied
//! 2. смена occupied → ZoneTransition (ровно один Entered и один Exited на проход)
//! 3. пока occupied — follow prompt висит над observer
//!
//! Активация (callback) только внутри зоны и только на фронте interact.

use std::fmt;

use bevy::prelude::*;

use crate::error::ConfigError;

/// Follow prompt висит над героем на этой высоте
pub const PROMPT_HEIGHT: f32 = 1.5;
/// Фиксированный маркер зоны над центром
pub const MARKER_HEIGHT: f32 = 2.0;

pub const DEFAULT_LABEL: &str = "Press F to interact";
pub const DEFAULT_ICON: &str = "chat.png";
pub const MARKER_ICON: &str = "marker.png";

/// Callback активации зоны
pub type ZoneCallback = Box<dyn FnMut() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTransition {
    Entered,
    Exited,
}

/// Экранная подсказка (UI слой рисует иконку в anchor, если visible)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prompt {
    pub visible: bool,
    pub anchor: Vec3,
}

pub struct TriggerZone {
    id: String,
    center: Vec3,
    radius: f32,
    label: String,
    icon: String,
    occupied: bool,
    /// interact был нажат на прошлом кадре (для фронта)
    interact_held: bool,
    prompt: Prompt,
    marker: Prompt,
    activations: u32,
    callback: ZoneCallback,
}

impl fmt::Debug for TriggerZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerZone")
            .field("id", &self.id)
            .field("center", &self.center)
            .field("radius", &self.radius)
            .field("label", &self.label)
            .field("occupied", &self.occupied)
            .field("activations", &self.activations)
            .finish_non_exhaustive()
    }
}

impl TriggerZone {
    pub fn new(
        id: impl Into<String>,
        center: Vec3,
        radius: f32,
        callback: impl FnMut() + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyZoneId);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidZoneRadius { id, radius });
        }

        Ok(Self {
            id,
            center,
            radius,
            label: DEFAULT_LABEL.to_string(),
            icon: DEFAULT_ICON.to_string(),
            occupied: false,
            interact_held: false,
            prompt: Prompt::default(),
            marker: Prompt {
                visible: true,
                anchor: center + Vec3::Y * MARKER_HEIGHT,
            },
            activations: 0,
            callback: Box::new(callback),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn marker(&self) -> Prompt {
        self.marker
    }

    /// Сколько раз callback был вызван
    pub fn activation_count(&self) -> u32 {
        self.activations
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.distance(self.center) < self.radius
    }

    /// Per-frame проверка observer. Возвращает переход, если он был.
    pub fn update(&mut self, observer: Vec3) -> Option<ZoneTransition> {
        let was_occupied = self.occupied;
        self.occupied = self.contains(observer);

        if self.occupied {
            self.prompt.anchor = observer + Vec3::Y * PROMPT_HEIGHT;
        }

        match (was_occupied, self.occupied) {
            (false, true) => {
                self.prompt.visible = true;
                Some(ZoneTransition::Entered)
            }
            (true, false) => {
                self.prompt.visible = false;
                Some(ZoneTransition::Exited)
            }
            _ => None,
        }
    }

    /// Вызвать callback, если observer внутри. true если вызван.
    pub fn activate(&mut self) -> bool {
        if !self.occupied {
            return false;
        }
        (self.callback)();
        self.activations += 1;
        true
    }

    /// Уровень interact за кадр; активирует только на фронте (released → pressed).
    /// Зажатая клавиша при входе в зону не активирует.
    pub fn press_interact(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.interact_held;
        self.interact_held = pressed;
        rising && self.activate()
    }

    /// Спрятать подсказки (перед удалением из registry)
    pub fn destroy(&mut self) {
        self.prompt.visible = false;
        self.marker.visible = false;
        self.occupied = false;
    }
}
