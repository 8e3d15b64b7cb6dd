//! Анимации героя: state machine решает КАКОЕ состояние, driver — КАК играть
//!
//! HeroAnimator:
//! - резолвит состояние в имя клипа через aliases (case-insensitive substring)
//! - держит веса клипов и линейный crossfade
//! - отсутствующий клип → тихий no-op

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
    Sit,
}

impl AnimationState {
    pub const ALL: [AnimationState; 5] = [
        AnimationState::Idle,
        AnimationState::Walk,
        AnimationState::Jump,
        AnimationState::Fall,
        AnimationState::Sit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walk => "walk",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
            AnimationState::Sit => "sit",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Внешний проигрыватель анимаций
pub trait AnimationDriver {
    /// Запросить состояние. Повторный запрос текущего — no-op.
    fn play(&mut self, state: AnimationState);
}

/// Активный crossfade: веса стартуют со снимка `from` и сходятся к `target`
#[derive(Debug, Clone)]
struct Crossfade {
    from: Vec<f32>,
    target: usize,
    elapsed: f32,
}

#[derive(Component, Debug, Clone)]
pub struct HeroAnimator {
    clips: Vec<String>,
    /// state → индекс клипа (None если у модели нет клипов вообще)
    bindings: [Option<usize>; 5],
    weights: Vec<f32>,
    crossfade: f32,
    fade: Option<Crossfade>,
    current: Option<AnimationState>,
}

impl HeroAnimator {
    pub fn new<I, S>(clips: I, crossfade: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let clips: Vec<String> = clips.into_iter().map(Into::into).collect();
        let bindings = resolve_aliases(&clips);
        let weights = vec![0.0; clips.len()];

        Self {
            clips,
            bindings,
            weights,
            crossfade: crossfade.max(0.0),
            fade: None,
            current: None,
        }
    }

    /// Набор клипов стандартной модели героя
    pub fn with_default_clips(crossfade: f32) -> Self {
        Self::new(["Idle", "Walk", "Jump", "Fall", "Sit"], crossfade)
    }

    pub fn clips(&self) -> &[String] {
        &self.clips
    }

    pub fn current_state(&self) -> Option<AnimationState> {
        self.current
    }

    /// Имя клипа, в который сейчас идёт (или уже пришёл) fade
    pub fn current_clip(&self) -> Option<&str> {
        let state = self.current?;
        self.clip_for(state)
    }

    pub fn clip_for(&self, state: AnimationState) -> Option<&str> {
        self.bindings[state.index()].map(|index| self.clips[index].as_str())
    }

    pub fn weight(&self, clip: &str) -> f32 {
        self.clips
            .iter()
            .position(|name| name == clip)
            .map(|index| self.weights[index])
            .unwrap_or(0.0)
    }

    pub fn is_blending(&self) -> bool {
        self.fade.is_some()
    }

    /// Продвигает crossfade
    pub fn tick(&mut self, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        fade.elapsed += dt;
        let alpha = if self.crossfade <= 0.0 {
            1.0
        } else {
            (fade.elapsed / self.crossfade).min(1.0)
        };

        for (index, weight) in self.weights.iter_mut().enumerate() {
            let target = if index == fade.target { 1.0 } else { 0.0 };
            *weight = fade.from[index] * (1.0 - alpha) + target * alpha;
        }

        if alpha >= 1.0 {
            self.fade = None;
        }
    }
}

impl AnimationDriver for HeroAnimator {
    fn play(&mut self, state: AnimationState) {
        if self.current == Some(state) {
            return;
        }
        let Some(target) = self.bindings[state.index()] else {
            return;
        };

        let first = self.current.is_none();
        self.current = Some(state);

        if first {
            // Первый клип — сразу с полным весом
            self.weights.iter_mut().for_each(|weight| *weight = 0.0);
            self.weights[target] = 1.0;
            self.fade = None;
            return;
        }

        self.fade = Some(Crossfade {
            from: self.weights.clone(),
            target,
            elapsed: 0.0,
        });
    }
}

/// Поиск первого клипа, чьё имя содержит один из кандидатов
fn pick(clips: &[String], candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        clips
            .iter()
            .position(|name| name.to_lowercase().contains(candidate))
    })
}

/// Aliases как у модели героя:
/// idle ← idle|stand (иначе первый клип), walk ← walk|locomotion → run → idle,
/// jump/fall/sit ← своё имя → idle
fn resolve_aliases(clips: &[String]) -> [Option<usize>; 5] {
    if clips.is_empty() {
        return [None; 5];
    }

    let idle = pick(clips, &["idle", "stand"]).unwrap_or(0);
    let walk = pick(clips, &["walk", "locomotion"])
        .or_else(|| pick(clips, &["run"]))
        .unwrap_or(idle);
    let jump = pick(clips, &["jump"]).unwrap_or(idle);
    let fall = pick(clips, &["fall"]).unwrap_or(idle);
    let sit = pick(clips, &["sit"]).unwrap_or(idle);

    let mut bindings = [None; 5];
    bindings[AnimationState::Idle.index()] = Some(idle);
    bindings[AnimationState::Walk.index()] = Some(walk);
    bindings[AnimationState::Jump.index()] = Some(jump);
    bindings[AnimationState::Fall.index()] = Some(fall);
    bindings[AnimationState::Sit.index()] = Some(sit);
    bindings
}
