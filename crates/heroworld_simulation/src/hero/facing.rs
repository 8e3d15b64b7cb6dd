//! Facing героя: 4 cardinal направления + плавный поворот (yaw tween)
//!
//! Yaw convention (rotation вокруг +Y):
//! - +Z → 0
//! - −Z → π
//! - +X → π/2
//! - −X → −π/2
//!
//! Поворот всегда по кратчайшей дуге, delta в (−π, π].

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ось, вдоль которой смотрит (и движется) герой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [Cardinal::PosX, Cardinal::NegX, Cardinal::PosZ, Cardinal::NegZ];

    pub fn unit_vector(self) -> Vec3 {
        match self {
            Cardinal::PosX => Vec3::X,
            Cardinal::NegX => Vec3::NEG_X,
            Cardinal::PosZ => Vec3::Z,
            Cardinal::NegZ => Vec3::NEG_Z,
        }
    }

    pub fn yaw(self) -> f32 {
        match self {
            Cardinal::PosZ => 0.0,
            Cardinal::NegZ => PI,
            Cardinal::PosX => FRAC_PI_2,
            Cardinal::NegX => -FRAC_PI_2,
        }
    }
}

/// Кратчайшая угловая разница `from → to`, нормализованная в (−π, π]
pub fn shortest_yaw_delta(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Угол, приведённый в (−π, π]
pub fn wrap_angle(angle: f32) -> f32 {
    shortest_yaw_delta(0.0, angle)
}

/// power1.out: быстрый старт, мягкий финиш
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Анимация yaw от `from` на `delta` за `duration` секунд
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YawTween {
    from: f32,
    delta: f32,
    duration: f32,
    elapsed: f32,
}

impl YawTween {
    pub fn new(from: f32, delta: f32, duration: f32) -> Self {
        Self {
            from,
            delta,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn target(&self) -> f32 {
        self.from + self.delta
    }

    /// Продвигает tween и возвращает текущий yaw
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.from + self.delta * ease_out_quad(self.progress())
    }
}

/// Текущий yaw модели + активный поворот (если есть)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    yaw: f32,
    tween: Option<YawTween>,
}

impl Facing {
    pub fn new(direction: Cardinal) -> Self {
        Self {
            yaw: direction.yaw(),
            tween: None,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn is_turning(&self) -> bool {
        self.tween.is_some()
    }

    /// Запускает поворот к `direction`. Новый поворот прерывает старый
    /// и стартует с текущего (промежуточного) yaw.
    pub fn turn_to(&mut self, direction: Cardinal, duration: f32) {
        let delta = shortest_yaw_delta(self.yaw, direction.yaw());
        if delta.abs() <= f32::EPSILON {
            self.yaw = direction.yaw();
            self.tween = None;
            return;
        }
        self.tween = Some(YawTween::new(self.yaw, delta, duration));
    }

    pub fn advance(&mut self, dt: f32) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };

        let yaw = tween.advance(dt);
        if tween.is_finished() {
            self.yaw = wrap_angle(tween.target());
            self.tween = None;
        } else {
            self.yaw = yaw;
        }
    }

    /// Мгновенно (respawn)
    pub fn snap_to(&mut self, direction: Cardinal) {
        self.yaw = direction.yaw();
        self.tween = None;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_yaw_matches_unit_vector() {
        // Yaw 0 смотрит в +Z: rotation_y(yaw) * Z == unit_vector
        for direction in Cardinal::ALL {
            let forward = Quat::from_rotation_y(direction.yaw()) * Vec3::Z;
            assert!(
                forward.abs_diff_eq(direction.unit_vector(), 1e-6),
                "{:?}: {:?}",
                direction,
                forward
            );
        }
    }

    #[test]
    fn test_shortest_delta_wraps() {
        assert!((shortest_yaw_delta(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-6);
        // −X → −Z: через −π, а не через +3π/2
        assert!((shortest_yaw_delta(-FRAC_PI_2, PI) - (-FRAC_PI_2)).abs() < 1e-6);
        // Полуоборот всегда +π (интервал (−π, π])
        assert!((shortest_yaw_delta(0.0, PI) - PI).abs() < 1e-6);
        assert!((shortest_yaw_delta(0.0, -PI) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_quad_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_turn_completes_after_duration() {
        let mut facing = Facing::new(Cardinal::PosX);
        facing.turn_to(Cardinal::PosZ, 0.2);
        assert!(facing.is_turning());

        facing.advance(0.1);
        assert!(facing.is_turning());
        // Ease-out: к середине пройдено 3/4 пути
        assert!((facing.yaw() - FRAC_PI_2 * 0.25).abs() < 1e-4);

        facing.advance(0.1);
        assert!(!facing.is_turning());
        assert!(facing.yaw().abs() < 1e-6);
    }

    #[test]
    fn test_turn_to_current_direction_is_noop() {
        let mut facing = Facing::new(Cardinal::NegZ);
        facing.turn_to(Cardinal::NegZ, 0.2);

        assert!(!facing.is_turning());
        assert_eq!(facing.yaw(), PI);
    }
}
