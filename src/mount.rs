// src/mount.rs
//! The ready gate between the host and the heart scene.
//!
//! Heavy, GPU-dependent resources are only built when the host calls
//! [`Mount::resolve`], never at construction. Until then the host shows a
//! placeholder. A failed build degrades to [`Phase::Unavailable`] and is
//! never propagated, so the host keeps running. Unmounting drops the scene
//! immediately and permanently silences it.

use crate::scene::animation::{frame_transforms, AnimationConfig, FrameTransforms};
use anyhow::Result;
use std::time::Instant;

pub enum Phase<S> {
    Loading,
    Ready(S),
    Unavailable(String),
    Unmounted,
}

impl<S> Phase<S> {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Ready(_) => "ready",
            Phase::Unavailable(_) => "unavailable",
            Phase::Unmounted => "unmounted",
        }
    }
}

/// Monotonic clock that starts on the first frame after the scene is ready.
#[derive(Debug, Default, Clone, Copy)]
pub struct SceneClock {
    start: Option<Instant>,
}

impl SceneClock {
    pub fn elapsed(&mut self, now: Instant) -> f32 {
        let start = *self.start.get_or_insert(now);
        now.saturating_duration_since(start).as_secs_f32()
    }

    pub fn reset(&mut self) {
        self.start = None;
    }
}

pub struct Mount<S> {
    phase: Phase<S>,
    clock: SceneClock,
    animation: AnimationConfig,
}

impl<S> Mount<S> {
    pub fn new(animation: AnimationConfig) -> Self {
        Self { phase: Phase::Loading, clock: SceneClock::default(), animation }
    }

    pub fn phase(&self) -> &Phase<S> {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    pub fn scene(&self) -> Option<&S> {
        match &self.phase {
            Phase::Ready(scene) => Some(scene),
            _ => None,
        }
    }

    /// Builds the scene once. Only has an effect while loading.
    pub fn resolve(&mut self, build: impl FnOnce() -> Result<S>) {
        if !self.is_loading() {
            return;
        }
        self.phase = match build() {
            Ok(scene) => {
                log::info!("heart scene mounted");
                Phase::Ready(scene)
            }
            Err(e) => {
                log::warn!("heart scene unavailable: {:#}", e);
                Phase::Unavailable(format!("{:#}", e))
            }
        };
    }

    /// Marks the mount as unable to ever load (e.g. no GPU context).
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.is_loading() {
            let reason = reason.into();
            log::warn!("heart scene unavailable: {}", reason);
            self.phase = Phase::Unavailable(reason);
        }
    }

    /// Transforms for the current tick, measured on the scene clock.
    pub fn frame(&mut self, now: Instant) -> Option<(&mut S, FrameTransforms)> {
        match &mut self.phase {
            Phase::Ready(scene) => {
                let elapsed = self.clock.elapsed(now);
                Some((scene, frame_transforms(&self.animation, elapsed)))
            }
            _ => None,
        }
    }

    /// Transforms at an explicit elapsed time, bypassing the clock.
    pub fn frame_at(&mut self, elapsed: f32) -> Option<(&mut S, FrameTransforms)> {
        match &mut self.phase {
            Phase::Ready(scene) => Some((scene, frame_transforms(&self.animation, elapsed))),
            _ => None,
        }
    }

    /// Releases the scene. Later calls to `frame` and `resolve` do nothing.
    pub fn unmount(&mut self) {
        let previous = std::mem::replace(&mut self.phase, Phase::Unmounted);
        self.clock.reset();
        if let Phase::Ready(scene) = previous {
            drop(scene);
            log::info!("heart scene unmounted");
        }
    }
}

impl<S> Drop for Mount<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
