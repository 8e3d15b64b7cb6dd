//! WorldLayout: конфиг героя + интерактивные области + диалоги (JSON)
//!
//! Дефолт — семь областей лагеря (кровать, бочки, верстак, оружие, стол,
//! кухня, колодец). Текст диалога хранится как i18n ключ; перевод — забота UI.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hero::HeroConfig;
use crate::interaction::{AreaDialogs, TriggerRegistry, TriggerZone};
use crate::interaction::dialog::DEFAULT_DIALOG_SECONDS;
use crate::logger;

/// Описание одной интерактивной области
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub id: String,
    pub center: Vec3,
    pub radius: f32,
    /// Текст подсказки (None → дефолтный)
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Что показать при активации (None → зона без диалога)
    #[serde(default)]
    pub dialog: Option<String>,
}

impl ZoneSpec {
    fn area(id: &str, center: Vec3, radius: f32, label: &str) -> Self {
        Self {
            id: id.to_string(),
            center,
            radius,
            label: Some(label.to_string()),
            icon: None,
            dialog: Some(format!("areas.{}", id)),
        }
    }

    /// TriggerZone с логирующим callback (диалог идёт через ZoneEvent)
    pub fn to_zone(&self) -> Result<TriggerZone, ConfigError> {
        let id = self.id.clone();
        let mut zone = TriggerZone::new(self.id.clone(), self.center, self.radius, move || {
            logger::log(&format!("Area '{}' activated", id));
        })?;

        if let Some(label) = &self.label {
            zone = zone.with_label(label.clone());
        }
        if let Some(icon) = &self.icon {
            zone = zone.with_icon(icon.clone());
        }
        Ok(zone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub hero: HeroConfig,
    pub zones: Vec<ZoneSpec>,
    /// Сколько секунд висит диалог области
    pub dialog_seconds: f32,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            hero: HeroConfig::default(),
            zones: vec![
                ZoneSpec::area("bed_area", Vec3::new(-15.91, -0.21, -10.34), 3.0, "Press F to view the rest area"),
                ZoneSpec::area("beer_area", Vec3::new(-22.98, -0.21, -5.02), 2.0, "Press F to view the collection"),
                ZoneSpec::area("workbench_area", Vec3::new(-18.57, -0.21, -13.22), 2.0, "Press F to view skills"),
                ZoneSpec::area("weapon_area", Vec3::new(-12.68, -0.18, -7.16), 2.0, "Press F to view projects"),
                ZoneSpec::area("dining_area", Vec3::new(-10.71, 1.5, -12.0), 2.5, "Press F to view hobbies"),
                ZoneSpec::area("kitchen_area", Vec3::new(-22.69, 0.71, -1.39), 2.0, "Press F to view personal skills"),
                ZoneSpec::area("well_area", Vec3::new(-5.71, 0.76, -10.10), 3.0, "Press F to view contacts"),
            ],
            dialog_seconds: DEFAULT_DIALOG_SECONDS,
        }
    }
}

impl WorldLayout {
    /// Парсинг + валидация
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let layout: WorldLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hero.validate()?;

        if !self.dialog_seconds.is_finite() || self.dialog_seconds < 0.0 {
            return Err(ConfigError::InvalidDialogSeconds(self.dialog_seconds));
        }

        for area in &self.zones {
            area.to_zone()?;
        }
        Ok(())
    }

    pub fn dialogs(&self) -> AreaDialogs {
        let mut dialogs = AreaDialogs::new(self.dialog_seconds);
        for area in &self.zones {
            if let Some(text) = &area.dialog {
                dialogs.insert(area.id.clone(), text.clone());
            }
        }
        dialogs
    }

    /// Регистрирует зоны в registry (дубликаты id заменяются)
    pub fn register_zones(&self, registry: &mut TriggerRegistry) -> Result<(), ConfigError> {
        for area in &self.zones {
            registry.insert_zone(area.to_zone()?);
        }
        Ok(())
    }

    /// HeroConfig, зоны и диалоги → ресурсы App
    pub fn install(&self, app: &mut App) -> Result<(), ConfigError> {
        self.validate()?;

        let world = app.world_mut();
        world.insert_resource(self.hero.clone());
        world.insert_resource(self.dialogs());

        let mut registry = world.get_resource_or_insert_with(TriggerRegistry::default);
        self.register_zones(&mut registry)?;

        logger::log_info(&format!("World layout installed: {} zones", self.zones.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_has_seven_areas() {
        let layout = WorldLayout::default();

        assert!(layout.validate().is_ok());
        assert_eq!(layout.zones.len(), 7);

        let dining = layout.zones.iter().find(|zone| zone.id == "dining_area").unwrap();
        assert_eq!(dining.radius, 2.5);
        assert_eq!(dining.center, Vec3::new(-10.71, 1.5, -12.0));
    }

    #[test]
    fn test_json_round_trip_keeps_layout() {
        let layout = WorldLayout::default();
        let json = layout.to_json().unwrap();

        assert_eq!(WorldLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "hero": { "spawn_position": [0.0, 5.0, 0.0] },
            "zones": [
                { "id": "gate", "center": [1.0, 0.0, 2.0], "radius": 1.5, "dialog": "areas.gate" }
            ]
        }"#;
        let layout = WorldLayout::from_json(json).unwrap();

        assert_eq!(layout.hero.spawn_position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(layout.hero.gravity, 30.0);
        assert_eq!(layout.zones.len(), 1);
        assert_eq!(layout.dialog_seconds, DEFAULT_DIALOG_SECONDS);
        assert_eq!(layout.dialogs().get("gate"), Some("areas.gate"));
    }

    #[test]
    fn test_invalid_zone_radius_rejected() {
        let json = r#"{ "zones": [ { "id": "pit", "center": [0.0, 0.0, 0.0], "radius": 0.0 } ] }"#;

        assert!(matches!(
            WorldLayout::from_json(json),
            Err(ConfigError::InvalidZoneRadius { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            WorldLayout::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_register_zones_keeps_labels() {
        let mut registry = TriggerRegistry::new();
        WorldLayout::default().register_zones(&mut registry).unwrap();

        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.get("well_area").unwrap().label(),
            "Press F to view contacts"
        );
    }
}
