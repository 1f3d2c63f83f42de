//! Frame scheduler
//!
//! Drives the recurring two-phase tick: a fixed-cadence logic update and a
//! display-driven draw pass, with entity compaction between them. The host
//! event loop calls [`Engine::pump`] as often as it likes; the host's
//! display-refresh callback calls [`Engine::frame`]. The two cadences are
//! deliberately independent: logic tracks the configured interval, drawing
//! tracks the display.

use std::collections::HashMap;

pub use crate::clock::{SystemClock, TimeSource};

use crate::assets::{AssetFetch, AssetKind, Assets};
use crate::config::EngineConfig;
use crate::entity::Entity;
use crate::stage::Stage;
use crate::surface::Surface;

/// Scheduler lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before `start()`
    Idle,
    /// Queued asset sources are being fetched, one per pump
    LoadingAssets,
    /// Steady-state tick loop; runs until the host process ends
    Running,
}

type StateHandler<E> = Box<dyn FnMut(f64, &mut Stage<E>)>;

/// The engine instance: entity stage, state-handler registry, render order,
/// clock state, and queued assets, advanced cooperatively by the host.
pub struct Engine<E> {
    stage: Stage<E>,
    handlers: HashMap<String, StateHandler<E>>,
    state: Option<String>,
    render_order: Option<Vec<String>>,
    /// Logic interval in milliseconds
    frame_interval: f64,
    viewport: (f32, f32),
    phase: Phase,
    last_frame: f64,
    current_frame: f64,
    /// Armed deadline for the next tick
    next_tick: f64,
    time: Box<dyn TimeSource>,
    assets: Assets,
    fetch: Option<Box<dyn AssetFetch>>,
}

impl<E: Entity> Default for Engine<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Engine<E> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut stage = Stage::new();
        stage.clear_color = config.clear_color;
        Self {
            stage,
            handlers: HashMap::new(),
            state: None,
            render_order: None,
            frame_interval: 1000.0 / config.fps,
            viewport: (config.viewport_width, config.viewport_height),
            phase: Phase::Idle,
            last_frame: 0.0,
            current_frame: 0.0,
            next_tick: 0.0,
            time: Box::new(SystemClock::new()),
            assets: Assets::new(),
            fetch: None,
        }
    }

    /// Replace the clock. Hosts with their own timing source (and tests)
    /// install it here before `start()`.
    pub fn with_time_source(mut self, time: Box<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stage(&self) -> &Stage<E> {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage<E> {
        &mut self.stage
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Recompute the logic interval from a ticks-per-second rate
    pub fn set_fps(&mut self, fps: f64) {
        self.frame_interval = 1000.0 / fps;
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval
    }

    /// Register the update routine for a named state. One handler per name;
    /// registering again replaces the old one.
    pub fn on_state<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(f64, &mut Stage<E>) + 'static,
    {
        self.handlers.insert(name.to_owned(), Box::new(handler));
    }

    /// Point the scheduler at a named state. A name with no registered
    /// handler is allowed; those ticks simply perform no logic update.
    pub fn set_state(&mut self, name: &str) {
        self.state = Some(name.to_owned());
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Fix the draw/compaction order of collections for the run. Unset, the
    /// order defaults to collection creation order at `start()`.
    pub fn set_render_order(&mut self, order: Vec<String>) {
        self.render_order = Some(order);
    }

    pub fn add_image(&mut self, name: &str, path: &str) {
        self.assets.add_source(name, AssetKind::Image, path);
    }

    pub fn add_sound(&mut self, name: &str, path: &str) {
        self.assets.add_source(name, AssetKind::Sound, path);
    }

    pub fn set_asset_fetch(&mut self, fetch: Box<dyn AssetFetch>) {
        self.fetch = Some(fetch);
    }

    /// Leave `Idle`: resolve the render order, fill in camera dimensions,
    /// and either begin loading queued assets or start ticking.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            log::warn!("start() called while {:?}; ignoring", self.phase);
            return;
        }

        if self.render_order.is_none() {
            self.render_order = Some(self.stage.collection_names());
        }
        if self.stage.camera.width == 0.0 {
            self.stage.camera.width = self.viewport.0;
        }
        if self.stage.camera.height == 0.0 {
            self.stage.camera.height = self.viewport.1;
        }

        if self.assets.pending() > 0 {
            log::info!("loading {} assets", self.assets.pending());
            self.phase = Phase::LoadingAssets;
        } else {
            self.enter_running();
        }
    }

    fn enter_running(&mut self) {
        let now = self.time.now_ms();
        self.last_frame = now;
        self.current_frame = now;
        // First tick fires on the next pump
        self.next_tick = now;
        self.phase = Phase::Running;
        log::info!("running at {:.1} Hz", 1000.0 / self.frame_interval);
    }

    /// Poll the logic timer.
    ///
    /// During `LoadingAssets` this fetches one queued source per call.
    /// While `Running` it fires at most one tick once the armed deadline has
    /// passed; a tick that overruns its interval delays the next one (drift
    /// is allowed, there is no catch-up). Returns whether a tick ran.
    pub fn pump(&mut self) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::LoadingAssets => {
                self.pump_assets();
                false
            }
            Phase::Running => {
                let now = self.time.now_ms();
                if now < self.next_tick {
                    return false;
                }
                self.tick(now);
                true
            }
        }
    }

    fn pump_assets(&mut self) {
        match self.fetch.as_deref_mut() {
            Some(fetch) => self.assets.load_next(fetch),
            None => {
                log::error!("asset sources queued but no fetcher installed; skipping load");
                self.assets.abandon_pending();
            }
        }

        if self.assets.pending() == 0 {
            log::info!("assets ready ({} loaded)", self.assets.loaded());
            self.enter_running();
        }
    }

    fn tick(&mut self, now: f64) {
        // Re-arm before any work: forward progress is guaranteed even when
        // the update below overruns the interval.
        self.next_tick = now + self.frame_interval;

        self.current_frame = now;
        let delta = self.current_frame - self.last_frame;

        if let Some(state) = self.state.as_deref() {
            if let Some(handler) = self.handlers.get_mut(state) {
                handler(delta, &mut self.stage);
            }
        }

        self.last_frame = self.current_frame;

        if let Some(next) = self.stage.take_next_state() {
            self.state = Some(next);
        }

        if let Some(order) = &self.render_order {
            self.stage.sweep(order);
        }
    }

    /// Draw pass. Called from the host's display-refresh callback; its
    /// cadence is independent of the logic interval.
    ///
    /// Clears to the stage's color, applies the camera translation, then
    /// draws every non-hidden entity in render order — collection order
    /// first, entity order within each collection. `fixed` entities get the
    /// translation cancelled around their draw call.
    pub fn frame(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.clear(self.stage.clear_color);

        if self.phase == Phase::Running {
            let offset = self.stage.camera.offset();
            surface.translate(offset);

            if let Some(order) = &self.render_order {
                for name in order {
                    let entities = self.stage.collection(name).unwrap_or_else(|| {
                        panic!("unknown collection in render order: {name}")
                    });
                    for entity in entities {
                        if entity.hidden() {
                            continue;
                        }
                        if entity.fixed() {
                            surface.save();
                            surface.translate(-offset);
                            entity.draw(surface);
                            surface.restore();
                        } else {
                            entity.draw(surface);
                        }
                    }
                }
            }
        }

        surface.restore();
    }
}
