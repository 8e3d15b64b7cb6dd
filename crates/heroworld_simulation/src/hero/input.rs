//! Input героя (уровни + edge actions)
//!
//! Для headless тестов — mock input через этот resource.
//! Для игры — заполняется из клавиатуры внешним слоем.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::facing::Cardinal;

/// Снимок input на текущий fixed tick.
///
/// Уровни (держатся пока нажато): `up/down/left/right/interact`.
/// Edges (одно срабатывание): `jump/sit_toggle/reset` — сбрасываются
/// в конце каждого tick системой [`clear_edge_actions`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sit_toggle: bool,
    pub reset: bool,
    pub interact: bool,
}

impl HeroInput {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Не больше одной оси за кадр; приоритет up > down > left > right
    pub fn direction(&self) -> Option<Cardinal> {
        if self.up {
            Some(Cardinal::PosZ)
        } else if self.down {
            Some(Cardinal::NegZ)
        } else if self.left {
            Some(Cardinal::NegX)
        } else if self.right {
            Some(Cardinal::PosX)
        } else {
            None
        }
    }

    pub fn clear_edges(&mut self) {
        self.jump = false;
        self.sit_toggle = false;
        self.reset = false;
    }
}

/// Последняя система fixed tick: edge actions живут ровно один tick
pub fn clear_edge_actions(mut input: ResMut<HeroInput>) {
    input.clear_edges();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_priority() {
        let all = HeroInput {
            up: true,
            down: true,
            left: true,
            right: true,
            ..default()
        };
        assert_eq!(all.direction(), Some(Cardinal::PosZ));

        let down_left = HeroInput {
            down: true,
            left: true,
            ..default()
        };
        assert_eq!(down_left.direction(), Some(Cardinal::NegZ));

        let left_right = HeroInput {
            left: true,
            right: true,
            ..default()
        };
        assert_eq!(left_right.direction(), Some(Cardinal::NegX));

        assert_eq!(HeroInput::default().direction(), None);
    }

    #[test]
    fn test_clear_edges_keeps_levels() {
        let mut input = HeroInput {
            up: true,
            interact: true,
            jump: true,
            sit_toggle: true,
            reset: true,
            ..default()
        };
        input.clear_edges();

        assert!(input.up);
        assert!(input.interact);
        assert!(!input.jump && !input.sit_toggle && !input.reset);
    }
}
