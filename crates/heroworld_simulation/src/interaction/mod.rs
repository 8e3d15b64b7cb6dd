//! Interaction module: proximity trigger zones + диалоги областей
//!
//! ECS ответственность:
//! - TriggerRegistry: зоны, enter/exit hysteresis, активация по interact
//! - ZoneEvent: Entered / Exited / Activated
//! - AreaDialogs + ActiveDialog: текст активированной области
//!
//! Observer = Transform героя после step_hero (тот же fixed tick).

use bevy::prelude::*;

pub mod dialog;
pub mod events;
pub mod registry;
pub mod systems;
pub mod zone;


// Re-export основных типов
pub use dialog::{show_area_dialog, tick_active_dialog, ActiveDialog, AreaDialogs, ShownDialog};
pub use events::ZoneEvent;
pub use registry::{TriggerRegistry, ZoneHandle};
pub use systems::update_trigger_zones;
pub use zone::{Prompt, TriggerZone, ZoneCallback, ZoneTransition};

use crate::hero::HeroInput;
use crate::SimulationSet;

/// Interaction Plugin
///
/// Регистрирует системы зон в FixedUpdate (после HeroPlugin).
///
/// Порядок выполнения:
/// 1. update_trigger_zones — enter/exit + interact → ZoneEvent
/// 2. show_area_dialog — Activated → ActiveDialog
/// 3. tick_active_dialog — автоскрытие
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ZoneEvent>()
            .init_resource::<TriggerRegistry>()
            .init_resource::<AreaDialogs>()
            .init_resource::<ActiveDialog>()
            .init_resource::<HeroInput>();

        app.add_systems(
            FixedUpdate,
            (update_trigger_zones, show_area_dialog, tick_active_dialog)
                .chain()
                .in_set(SimulationSet::Interaction),
        );
    }
}
