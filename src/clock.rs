//! Monotonic millisecond clock
//!
//! Platform-agnostic time for the scheduler.
//! - Native: std::time::Instant since construction
//! - WASM: performance.now()
//!
//! The trait seam lets a host hand the scheduler its own timing source, and
//! lets tests drive ticks by hand.

/// Source of monotonically increasing timestamps in milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction.
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TimeSource for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(target_arch = "wasm32")]
impl SystemClock {
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(target_arch = "wasm32")]
impl TimeSource for SystemClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .expect("no window")
            .performance()
            .expect("no performance")
            .now()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}
