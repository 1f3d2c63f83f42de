//! Playfield - a minimal fixed-tick 2D game engine
//!
//! Core modules:
//! - `collision`: pairwise AABB and circle overlap tests with push-out resolution
//! - `scheduler`: fixed-cadence logic ticks, decoupled draw passes, compaction
//! - `stage`: named entity collections plus camera and clear color
//! - `assets`: image/sound preloading driven by the scheduler's loading phase
//! - `input`: key and mouse handler registry fed by the host event source
//! - `effects`: opacity-fade timers

pub mod assets;
pub mod camera;
pub mod collision;
pub mod config;
pub mod effects;
pub mod entity;
pub mod input;
pub mod scheduler;
pub mod stage;
pub mod surface;

mod clock;

pub use camera::Camera;
pub use config::EngineConfig;
pub use entity::{Entity, Positioned};
pub use scheduler::{Engine, Phase};
pub use stage::Stage;
pub use surface::{Color, Surface};

use glam::Vec2;

/// Engine defaults
pub mod consts {
    /// Logic tick rate when none is configured
    pub const DEFAULT_FPS: f64 = 60.0;
    /// Default fade step ratio (per interval, multiplicative)
    pub const FADE_RATIO: f32 = 0.9;
    /// Default fade step interval in milliseconds
    pub const FADE_INTERVAL_MS: f64 = 30.0;
}

/// Center of a positioned body, derived from its top-left corner and size
#[inline]
pub fn center_of(body: &(impl Positioned + ?Sized)) -> Vec2 {
    Vec2::new(
        body.x() + body.width() * 0.5,
        body.y() + body.height() * 0.5,
    )
}
