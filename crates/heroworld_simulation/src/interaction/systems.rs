//! Системы trigger zones (FixedUpdate, после героя)

use bevy::prelude::*;

use super::events::ZoneEvent;
use super::registry::TriggerRegistry;
use super::zone::ZoneTransition;
use crate::hero::{Hero, HeroInput};

/// Система: зоны ← позиция героя, interact ← HeroInput
///
/// Нет героя (ещё не заспавнен) → update(None), зоны не трогаются.
/// Несколько героев → observer не определён, тоже пропуск.
pub fn update_trigger_zones(
    heroes: Query<&Transform, With<Hero>>,
    input: Res<HeroInput>,
    mut registry: ResMut<TriggerRegistry>,
    mut zone_events: EventWriter<ZoneEvent>,
) {
    let observer = heroes.single().ok().map(|transform| transform.translation);

    if let Some(position) = observer {
        for (id, transition) in registry.update(observer) {
            match transition {
                ZoneTransition::Entered => {
                    zone_events.write(ZoneEvent::Entered {
                        id,
                        observer: position,
                    });
                }
                ZoneTransition::Exited => {
                    zone_events.write(ZoneEvent::Exited { id });
                }
            }
        }
    }

    for id in registry.interact(input.interact) {
        zone_events.write(ZoneEvent::Activated { id });
    }
}
