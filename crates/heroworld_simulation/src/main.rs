//! Headless прогон Heroworld
//!
//! Демо-остров + дефолтный layout: автопилот ведёт героя к колодцу,
//! жмёт interact и печатает показанный диалог.

use bevy::prelude::*;
use heroworld_simulation::{
    create_headless_app, load_world, log_error, log_info, ActiveDialog, CharacterController, HeroInput,
    LevelGeometry, TriggerRegistry, WorldLayout,
};

const TARGET_ZONE: &str = "well_area";
const MAX_TICKS: u32 = 3000;

/// Одна ось за кадр: сначала выравниваем X, потом Z
fn steer(from: Vec3, to: Vec3) -> HeroInput {
    let delta = to - from;
    let mut input = HeroInput::default();

    if delta.x.abs() > 0.5 {
        input.right = delta.x > 0.0;
        input.left = delta.x < 0.0;
    } else if delta.z.abs() > 0.5 {
        input.up = delta.z > 0.0;
        input.down = delta.z < 0.0;
    }
    input
}

fn main() {
    let mut app = create_headless_app();
    let layout = WorldLayout::default();

    let hero = match load_world(&mut app, LevelGeometry::demo_island(), &layout) {
        Ok(entity) => entity,
        Err(err) => {
            log_error(&format!("Failed to load world: {}", err));
            std::process::exit(1);
        }
    };

    let Some(target) = layout.zones.iter().find(|zone| zone.id == TARGET_ZONE) else {
        log_error(&format!("Zone '{}' missing from layout", TARGET_ZONE));
        std::process::exit(1);
    };
    let target = target.center;

    // Первый update: delta == 0, fixed tick не проходит
    app.update();

    for tick in 0..MAX_TICKS {
        let arrived = app
            .world()
            .resource::<TriggerRegistry>()
            .get(TARGET_ZONE)
            .is_some_and(|zone| zone.is_occupied());
        if arrived {
            log_info(&format!("Reached '{}' after {} ticks", TARGET_ZONE, tick));
            break;
        }

        let Some(position) = app
            .world()
            .get::<CharacterController>(hero)
            .map(|controller| controller.position())
        else {
            break;
        };

        *app.world_mut().resource_mut::<HeroInput>() = steer(position, target);
        app.update();

        if tick % 100 == 0 {
            log_info(&format!("Tick {}: hero at {:?}", tick, position));
        }
    }

    // Стоим и жмём interact (одно нажатие = одна активация)
    *app.world_mut().resource_mut::<HeroInput>() = HeroInput {
        interact: true,
        ..default()
    };
    app.update();
    *app.world_mut().resource_mut::<HeroInput>() = HeroInput::default();
    app.update();

    match app.world().resource::<ActiveDialog>().current() {
        Some(dialog) => log_info(&format!(
            "Dialog for '{}': {} ({:.1}s left)",
            dialog.area, dialog.text, dialog.remaining
        )),
        None => log_info("No dialog shown"),
    }

    log_info("Simulation complete!");
}
