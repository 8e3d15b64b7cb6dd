//! TriggerRegistry: единственная точка создания/удаления зон
//!
//! - id уникален; повторный create_zone уничтожает старую зону и ставит новую
//! - каждая зона получает generation; ZoneHandle освобождает только "свою" зону
//! - update(None) — observer ещё не готов, кадр пропускается без побочных эффектов

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::zone::{TriggerZone, ZoneTransition};
use crate::error::ConfigError;
use crate::logger;

/// Ключ зоны, выданный при создании
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneHandle {
    id: String,
    generation: u64,
}

impl ZoneHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct ZoneSlot {
    zone: TriggerZone,
    generation: u64,
}

/// Все зоны мира (ECS resource). Порядок обхода детерминирован (по id).
#[derive(Resource, Debug, Default)]
pub struct TriggerRegistry {
    zones: BTreeMap<String, ZoneSlot>,
    next_generation: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создаёт зону с дефолтными label/icon
    pub fn create_zone(
        &mut self,
        id: impl Into<String>,
        center: Vec3,
        radius: f32,
        callback: impl FnMut() + Send + Sync + 'static,
    ) -> Result<ZoneHandle, ConfigError> {
        let zone = TriggerZone::new(id, center, radius, callback)?;
        Ok(self.insert_zone(zone))
    }

    /// Регистрирует готовую зону (с label/icon). Дубликат id заменяется.
    pub fn insert_zone(&mut self, zone: TriggerZone) -> ZoneHandle {
        let id = zone.id().to_string();

        if self.zones.contains_key(&id) {
            logger::log_warning(&format!("Trigger zone '{}' already exists, replacing", id));
            self.remove_zone(&id);
        }

        self.next_generation += 1;
        let generation = self.next_generation;

        logger::log_info(&format!(
            "Trigger zone '{}' created at {:?} (radius {})",
            id,
            zone.center(),
            zone.radius()
        ));
        self.zones.insert(id.clone(), ZoneSlot { zone, generation });

        ZoneHandle { id, generation }
    }

    /// Удаляет зону; no-op если её нет. true если удалили.
    pub fn remove_zone(&mut self, id: &str) -> bool {
        match self.zones.remove(id) {
            Some(mut slot) => {
                slot.zone.destroy();
                logger::log_info(&format!("Trigger zone '{}' removed", id));
                true
            }
            None => false,
        }
    }

    /// Удаляет зону только если handle выдан именно ей (не заменённой копии)
    pub fn release(&mut self, handle: &ZoneHandle) -> bool {
        let current = self
            .zones
            .get(&handle.id)
            .is_some_and(|slot| slot.generation == handle.generation);

        current && self.remove_zone(&handle.id)
    }

    pub fn get(&self, id: &str) -> Option<&TriggerZone> {
        self.zones.get(id).map(|slot| &slot.zone)
    }

    /// Живая ли зона, на которую указывает handle
    pub fn is_live(&self, handle: &ZoneHandle) -> bool {
        self.zones
            .get(&handle.id)
            .is_some_and(|slot| slot.generation == handle.generation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerZone> {
        self.zones.values().map(|slot| &slot.zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Per-frame обновление всех зон. None → пропуск кадра.
    pub fn update(&mut self, observer: Option<Vec3>) -> Vec<(String, ZoneTransition)> {
        let Some(observer) = observer else {
            return Vec::new();
        };

        self.zones
            .iter_mut()
            .filter_map(|(id, slot)| {
                slot.zone
                    .update(observer)
                    .map(|transition| (id.clone(), transition))
            })
            .collect()
    }

    /// Уровень interact за кадр → каждой зоне. Возвращает id активированных.
    pub fn interact(&mut self, pressed: bool) -> Vec<String> {
        self.zones
            .iter_mut()
            .filter_map(|(id, slot)| slot.zone.press_interact(pressed).then(|| id.clone()))
            .collect()
    }

    /// Уничтожает все зоны
    pub fn clear(&mut self) {
        for (id, slot) in self.zones.iter_mut() {
            slot.zone.destroy();
            logger::log(&format!("Trigger zone '{}' cleared", id));
        }
        self.zones.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_duplicate_id_replaces_zone() {
        let mut registry = TriggerRegistry::new();
        let first = registry.create_zone("bed_area", Vec3::ZERO, 3.0, || {}).unwrap();
        let second = registry
            .create_zone("bed_area", Vec3::new(10.0, 0.0, 0.0), 1.0, || {})
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("bed_area").unwrap().radius(), 1.0);
        assert_ne!(first, second);
        assert!(!registry.is_live(&first));
        assert!(registry.is_live(&second));
    }

    #[test]
    fn test_stale_handle_does_not_remove_replacement() {
        let mut registry = TriggerRegistry::new();
        let stale = registry.create_zone("beer_area", Vec3::ZERO, 2.0, || {}).unwrap();
        registry.create_zone("beer_area", Vec3::ZERO, 2.0, || {}).unwrap();

        assert!(!registry.release(&stale));
        assert!(registry.get("beer_area").is_some());
    }

    #[test]
    fn test_release_own_handle() {
        let mut registry = TriggerRegistry::new();
        let handle = registry.create_zone("weapon_area", Vec3::ZERO, 2.0, || {}).unwrap();

        assert!(registry.release(&handle));
        assert!(registry.is_empty());
        assert!(!registry.release(&handle));
    }

    #[test]
    fn test_remove_missing_zone_is_noop() {
        let mut registry = TriggerRegistry::new();
        registry.create_zone("well_area", Vec3::ZERO, 3.0, || {}).unwrap();

        assert!(!registry.remove_zone("nope"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_radius_not_registered() {
        let mut registry = TriggerRegistry::new();

        assert!(registry.create_zone("dining_area", Vec3::ZERO, -1.0, || {}).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_observer_skips_frame() {
        let mut registry = TriggerRegistry::new();
        registry.create_zone("kitchen_area", Vec3::ZERO, 2.0, || {}).unwrap();

        assert!(registry.update(None).is_empty());
        assert!(!registry.get("kitchen_area").unwrap().is_occupied());

        let transitions = registry.update(Some(Vec3::ZERO));
        assert_eq!(transitions, vec![("kitchen_area".to_string(), ZoneTransition::Entered)]);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut registry = TriggerRegistry::new();
        registry.create_zone("a", Vec3::ZERO, 1.0, || {}).unwrap();
        registry.create_zone("b", Vec3::X * 5.0, 1.0, || {}).unwrap();

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.update(Some(Vec3::ZERO)).is_empty());
    }

    #[test]
    fn test_interact_inside_zone_fires_callback_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut registry = TriggerRegistry::new();
        registry
            .create_zone("workbench_area", Vec3::new(-18.57, -0.21, -13.22), 2.0, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        registry.create_zone("bed_area", Vec3::new(-15.91, -0.21, -10.34), 3.0, || {}).unwrap();

        // Observer подходит к верстаку
        registry.update(Some(Vec3::new(-18.0, 0.0, -13.0)));

        assert_eq!(registry.interact(true), vec!["workbench_area".to_string()]);
        assert!(registry.interact(true).is_empty());
        registry.interact(false);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_walk_through_zone_activates_only_on_interact() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut registry = TriggerRegistry::new();
        registry
            .create_zone("well_area", Vec3::ZERO, 2.0, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        // Снаружи → центр → снаружи по оси X, шаг 0.5
        let path: Vec<Vec3> = (-10..=10).map(|i| Vec3::X * (i as f32 * 0.5)).collect();
        let mut transitions = Vec::new();
        for observer in path {
            transitions.extend(registry.update(Some(observer)));

            // Вход сам по себе ничего не активирует; interact только в центре
            let at_center = observer == Vec3::ZERO;
            registry.interact(at_center);

            if observer.x < 0.0 {
                assert_eq!(calls.load(Ordering::SeqCst), 0);
            }
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.get("well_area").unwrap().activation_count(), 1);
        assert_eq!(
            transitions,
            vec![
                ("well_area".to_string(), ZoneTransition::Entered),
                ("well_area".to_string(), ZoneTransition::Exited),
            ]
        );
        assert!(!registry.get("well_area").unwrap().is_occupied());
    }
}
