//! Kinematic контроллер героя
//!
//! Архитектура:
//! - Capsule collider + собственная интеграция velocity (gravity, input, damping)
//! - Коллизии: один запрос к CollisionVolume за step, slide по стенам
//! - Визуальный Transform выводится из капсулы (feet = центр − foot_offset)
//! - Выбор анимации по физическому состоянию (Idle/Walk/Jump/Fall/Sit)
//!
//! Детерминизм: step() — чистая функция (state, dt, input, volume) → state.
//! Никаких часов и RNG внутри.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationDriver, AnimationState};
use super::config::HeroConfig;
use super::facing::{Cardinal, Facing};
use super::input::HeroInput;
use crate::error::ConfigError;
use crate::physics::{Capsule, CollisionVolume, Contact};

/// Контакты мельче этого не выталкивают капсулу
const MIN_PUSH_DEPTH: f32 = 1e-10;

/// Физическое состояние героя (owned контроллером, меняется только через step)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub velocity: Vec3,
    /// Последний контакт смотрел вверх (normal.y > 0)
    pub on_floor: bool,
    /// Направление движения == направление взгляда
    pub direction: Cardinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RespawnReason {
    /// Визуальная позиция ушла ниже fall_limit
    FellOutOfWorld,
    /// Явный reset от игрока
    Reset,
}

/// Что произошло за один step (для систем/логов/тестов)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Суммарный контакт с миром после интеграции (до respawn)
    pub contact: Option<Contact>,
    pub jumped: bool,
    /// Новое состояние анимации, если оно сменилось
    pub animation: Option<AnimationState>,
    pub respawned: Option<RespawnReason>,
}

/// Экспоненциальный damping, не зависящий от частоты кадров:
/// `v + v·(exp(−k·dt) − 1)` == `v·exp(−k·dt)`
pub fn apply_damping(velocity: Vec3, k: f32, dt: f32) -> Vec3 {
    velocity + velocity * ((-k * dt).exp() - 1.0)
}

#[derive(Component, Debug, Clone)]
pub struct CharacterController {
    config: HeroConfig,
    capsule: Capsule,
    /// Капсула в точке спавна (считается один раз в new)
    spawn: Capsule,
    kinematics: KinematicState,
    facing: Facing,
    sitting: bool,
    animation: AnimationState,
    last_contact: Option<Contact>,
}

impl CharacterController {
    /// Герой в точке спавна. Конфиг валидируется здесь и больше нигде.
    pub fn new(config: HeroConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let spawn = config.spawn_capsule()?;

        Ok(Self {
            capsule: spawn,
            spawn,
            kinematics: KinematicState {
                velocity: Vec3::ZERO,
                on_floor: false,
                direction: config.spawn_facing,
            },
            facing: Facing::new(config.spawn_facing),
            sitting: false,
            animation: AnimationState::Idle,
            last_contact: None,
            config,
        })
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    pub fn kinematics(&self) -> &KinematicState {
        &self.kinematics
    }

    pub fn velocity(&self) -> Vec3 {
        self.kinematics.velocity
    }

    pub fn on_floor(&self) -> bool {
        self.kinematics.on_floor
    }

    pub fn direction(&self) -> Cardinal {
        self.kinematics.direction
    }

    pub fn yaw(&self) -> f32 {
        self.facing.yaw()
    }

    pub fn is_turning(&self) -> bool {
        self.facing.is_turning()
    }

    pub fn is_sitting(&self) -> bool {
        self.sitting
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation
    }

    pub fn last_contact(&self) -> Option<Contact> {
        self.last_contact
    }

    /// Позиция визуальной модели (ноги)
    pub fn position(&self) -> Vec3 {
        self.capsule.feet_position(self.config.foot_offset)
    }

    /// Transform для визуального представления
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position(),
            rotation: self.facing.rotation(),
            scale: Vec3::splat(self.config.scale),
        }
    }

    /// Один fixed tick.
    ///
    /// Порядок:
    /// 1. Локомоция (или sit damping)
    /// 2. Коллизии → on_floor, slide, push-out
    /// 3. Действия и анимация: sit toggle → jump → landing → walk/idle → fall
    /// 4. Safety net: ниже fall_limit (или reset) → respawn
    pub fn step(
        &mut self,
        dt: f32,
        input: &HeroInput,
        volume: &dyn CollisionVolume,
        animator: &mut dyn AnimationDriver,
    ) -> StepReport {
        let dt = dt.max(0.0);
        let animation_before = self.animation;
        let mut report = StepReport::default();

        self.facing.advance(dt);

        if self.sitting {
            // Сидя не ходим; остаточную скорость гасим только на земле
            if !input.any_direction() && self.kinematics.on_floor {
                self.kinematics.velocity =
                    apply_damping(self.kinematics.velocity, self.config.sit_damping, dt);
                self.capsule.translate(self.kinematics.velocity * dt);
            }
        } else {
            self.integrate(dt, input);
        }

        report.contact = self.resolve_collisions(volume);
        report.jumped = self.apply_actions(input, animator);

        let fell = self.position().y < self.config.fall_limit;
        if input.reset || fell {
            let reason = if input.reset {
                RespawnReason::Reset
            } else {
                RespawnReason::FellOutOfWorld
            };
            self.respawn(animator);
            report.respawned = Some(reason);
        }

        if self.animation != animation_before {
            report.animation = Some(self.animation);
        }
        report
    }

    /// Только коллизии, без интеграции (посадить свежий спавн на землю)
    pub fn settle(&mut self, volume: &dyn CollisionVolume) -> Option<Contact> {
        self.resolve_collisions(volume)
    }

    /// Переставить героя так, чтобы ноги оказались в `feet`. Velocity сохраняется.
    pub fn teleport(&mut self, feet: Vec3) {
        let offset = feet - self.position();
        self.capsule.translate(offset);
        self.last_contact = None;
    }

    /// Вернуть героя в точку спавна: поза, нулевая скорость, стоя, Idle
    pub fn respawn(&mut self, animator: &mut dyn AnimationDriver) {
        self.capsule = self.spawn;
        self.kinematics = KinematicState {
            velocity: Vec3::ZERO,
            on_floor: false,
            direction: self.config.spawn_facing,
        };
        self.facing.snap_to(self.config.spawn_facing);
        self.sitting = false;
        self.last_contact = None;
        self.request(AnimationState::Idle, animator);
    }

    fn integrate(&mut self, dt: f32, input: &HeroInput) {
        let kinematics = &mut self.kinematics;

        if !kinematics.on_floor {
            kinematics.velocity.y -= self.config.gravity * dt;
        }

        let speed_delta = dt
            * if kinematics.on_floor {
                self.config.ground_speed
            } else {
                self.config.air_speed
            };

        if let Some(direction) = input.direction() {
            kinematics.velocity += direction.unit_vector() * speed_delta;

            if direction != kinematics.direction {
                kinematics.direction = direction;
                self.facing.turn_to(direction, self.config.turn_duration);
            }
        }

        kinematics.velocity = apply_damping(kinematics.velocity, self.config.ground_damping, dt);
        self.capsule.translate(kinematics.velocity * dt);
    }

    fn resolve_collisions(&mut self, volume: &dyn CollisionVolume) -> Option<Contact> {
        let contact = volume.capsule_intersect(&self.capsule);
        self.kinematics.on_floor = false;

        if let Some(contact) = contact {
            self.kinematics.on_floor = contact.normal.y > 0.0;

            if !self.kinematics.on_floor {
                // Slide: убираем компоненту скорости вдоль нормали стены
                let velocity = self.kinematics.velocity;
                self.kinematics.velocity = velocity - contact.normal * contact.normal.dot(velocity);
            }

            if contact.depth >= MIN_PUSH_DEPTH {
                self.capsule.translate(contact.normal * contact.depth);
            }
        }

        self.last_contact = contact;
        contact
    }

    /// Edge actions + выбор анимации. Возвращает true если был прыжок.
    fn apply_actions(&mut self, input: &HeroInput, animator: &mut dyn AnimationDriver) -> bool {
        // Sit ↔ Idle; нельзя во время движения и поворота
        if input.sit_toggle && !input.any_direction() && !self.facing.is_turning() {
            self.sitting = !self.sitting;
            let state = if self.sitting {
                AnimationState::Sit
            } else {
                AnimationState::Idle
            };
            self.request(state, animator);
        }

        let mut jumped = false;
        if input.jump && self.kinematics.on_floor && !self.sitting {
            self.kinematics.velocity.y = self.config.jump_impulse;
            self.kinematics.on_floor = false;
            self.request(AnimationState::Jump, animator);
            jumped = true;
        }

        let locomotion = if input.any_direction() {
            AnimationState::Walk
        } else {
            AnimationState::Idle
        };

        // Приземление после прыжка
        if self.kinematics.on_floor && self.animation == AnimationState::Jump {
            self.request(locomotion, animator);
        }

        if self.kinematics.on_floor && !self.sitting && self.animation != AnimationState::Jump {
            self.request(locomotion, animator);
        }

        // Сидящий герой не локомотирует, значит и не "падает"
        if !self.kinematics.on_floor
            && !self.sitting
            && self.kinematics.velocity.y < 0.0
            && self.animation != AnimationState::Fall
        {
            self.request(AnimationState::Fall, animator);
        }

        jumped
    }

    /// Смена состояния; повторный запрос текущего — no-op
    fn request(&mut self, state: AnimationState, animator: &mut dyn AnimationDriver) {
        if self.animation == state {
            return;
        }
        self.animation = state;
        animator.play(state);
    }
}
