//! Системы героя (FixedUpdate)

use bevy::prelude::*;

use super::animation::HeroAnimator;
use super::controller::CharacterController;
use super::events::HeroRespawned;
use super::input::HeroInput;
use super::Hero;
use crate::logger;
use crate::physics::CollisionWorld;

/// Система: один step контроллера на fixed tick
///
/// 1. CharacterController::step (gravity, input, коллизии, анимация)
/// 2. Transform ← controller.transform() (TransformSink)
/// 3. HeroRespawned при respawn
pub fn step_hero(
    time: Res<Time<Fixed>>,
    input: Res<HeroInput>,
    world: Res<CollisionWorld>,
    mut heroes: Query<
        (Entity, &mut CharacterController, &mut HeroAnimator, &mut Transform),
        With<Hero>,
    >,
    mut respawned_events: EventWriter<HeroRespawned>,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, mut animator, mut transform) in heroes.iter_mut() {
        let report = controller.step(dt, &input, world.volume(), &mut *animator);
        *transform = controller.transform();

        if let Some(reason) = report.respawned {
            logger::log_info(&format!(
                "Hero {:?} respawned ({:?}) at {:?}",
                entity, reason, transform.translation
            ));
            respawned_events.write(HeroRespawned { entity, reason });
        }
    }
}

/// Система: crossfade весов анимации
pub fn tick_hero_animation(time: Res<Time<Fixed>>, mut animators: Query<&mut HeroAnimator, With<Hero>>) {
    let dt = time.delta_secs();

    for mut animator in animators.iter_mut() {
        animator.tick(dt);
    }
}
