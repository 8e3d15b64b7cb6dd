//! Диалоги областей: активация зоны → текст на экране, автоскрытие по таймеру
//!
//! Сам UI (typewriter, i18n) снаружи; здесь только "что показывать и сколько".

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::events::ZoneEvent;
use crate::logger;

pub const DEFAULT_DIALOG_SECONDS: f32 = 8.0;

/// Тексты областей по id зоны
#[derive(Resource, Debug, Clone)]
pub struct AreaDialogs {
    texts: BTreeMap<String, String>,
    display_seconds: f32,
}

impl Default for AreaDialogs {
    fn default() -> Self {
        Self::new(DEFAULT_DIALOG_SECONDS)
    }
}

impl AreaDialogs {
    pub fn new(display_seconds: f32) -> Self {
        Self {
            texts: BTreeMap::new(),
            display_seconds,
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(id.into(), text.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn display_seconds(&self) -> f32 {
        self.display_seconds
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShownDialog {
    pub area: String,
    pub text: String,
    /// Секунд до автоскрытия
    pub remaining: f32,
}

/// Диалог, видимый сейчас (не больше одного)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActiveDialog {
    current: Option<ShownDialog>,
}

impl ActiveDialog {
    /// Показать текст; предыдущий диалог заменяется, таймер начинается заново
    pub fn show(&mut self, area: impl Into<String>, text: impl Into<String>, seconds: f32) {
        self.current = Some(ShownDialog {
            area: area.into(),
            text: text.into(),
            remaining: seconds,
        });
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ShownDialog> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn tick(&mut self, dt: f32) {
        let expired = match self.current.as_mut() {
            Some(dialog) => {
                dialog.remaining -= dt;
                dialog.remaining <= 0.0
            }
            None => false,
        };
        if expired {
            self.hide();
        }
    }
}

/// Система: Activated → текст области в ActiveDialog
pub fn show_area_dialog(
    mut zone_events: EventReader<ZoneEvent>,
    dialogs: Res<AreaDialogs>,
    mut active: ResMut<ActiveDialog>,
) {
    for event in zone_events.read() {
        let ZoneEvent::Activated { id } = event else {
            continue;
        };

        match dialogs.get(id) {
            Some(text) => {
                logger::log(&format!("Showing dialog for '{}'", id));
                active.show(id.clone(), text, dialogs.display_seconds());
            }
            None => {
                logger::log_warning(&format!("No dialog content for area '{}'", id));
            }
        }
    }
}

/// Система: таймер автоскрытия
pub fn tick_active_dialog(time: Res<Time<Fixed>>, mut active: ResMut<ActiveDialog>) {
    if active.is_visible() {
        active.tick(time.delta_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_hides_after_timeout() {
        let mut active = ActiveDialog::default();
        active.show("well_area", "Contacts", 1.0);

        active.tick(0.5);
        assert!(active.is_visible());
        assert!((active.current().unwrap().remaining - 0.5).abs() < 1e-6);

        active.tick(0.5);
        assert!(!active.is_visible());
    }

    #[test]
    fn test_show_replaces_and_restarts_timer() {
        let mut active = ActiveDialog::default();
        active.show("bed_area", "Rest", 1.0);
        active.tick(0.9);
        active.show("beer_area", "Collection", 1.0);
        active.tick(0.9);

        let shown = active.current().unwrap();
        assert_eq!(shown.area, "beer_area");
        assert_eq!(shown.text, "Collection");
    }

    #[test]
    fn test_area_dialog_lookup() {
        let mut dialogs = AreaDialogs::default();
        dialogs.insert("kitchen_area", "Skills");

        assert_eq!(dialogs.get("kitchen_area"), Some("Skills"));
        assert_eq!(dialogs.get("unknown"), None);
        assert_eq!(dialogs.display_seconds(), DEFAULT_DIALOG_SECONDS);
    }
}
