//! Opacity-fade timers
//!
//! A `Fade` is a small owned timer: its ratio, interval, delay, and remove
//! flag are plain fields, and the host's generic interval mechanism advances
//! it explicitly with the current time plus the set of targets. Alpha moves
//! geometrically (multiplied by the ratio each step), which gives the
//! familiar fast-then-slow easing for free.

use crate::consts::{FADE_INTERVAL_MS, FADE_RATIO};

/// Contract for anything a fade can drive.
pub trait Fadeable {
    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);

    /// Flag the target for compaction; called on completion by fades
    /// configured with [`Fade::removing`].
    fn mark_removed(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStatus {
    /// The initial delay has not elapsed
    Waiting,
    /// At least one target is still in transit
    Active,
    /// Every target has settled; the caller's completion signal
    Complete,
}

/// A recurring opacity step toward fully visible (ratio > 1) or fully
/// invisible (ratio < 1).
pub struct Fade {
    ratio: f32,
    interval_ms: f64,
    delay_ms: f64,
    remove: bool,
    /// Armed deadline; `None` until the first advance, which starts the delay
    next_step: Option<f64>,
    stepped: bool,
}

impl Fade {
    fn new(ratio: f32) -> Self {
        Self {
            ratio,
            interval_ms: FADE_INTERVAL_MS,
            delay_ms: 0.0,
            remove: false,
            next_step: None,
            stepped: false,
        }
    }

    /// Fade toward fully visible (default ratio `1 / 0.9`)
    pub fn fade_in() -> Self {
        Self::new(1.0 / FADE_RATIO)
    }

    /// Fade toward fully invisible (default ratio `0.9`)
    pub fn fade_out() -> Self {
        Self::new(FADE_RATIO)
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_interval(mut self, ms: f64) -> Self {
        self.interval_ms = ms;
        self
    }

    /// Delay before the first step, measured from the first `advance` call
    pub fn with_delay(mut self, ms: f64) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Mark targets removed once they settle
    pub fn removing(mut self) -> Self {
        self.remove = true;
        self
    }

    /// Advance the timer. Applies one step to every target when due,
    /// re-arms, and reports whether any target is still in transit.
    pub fn advance<'a, T, I>(&mut self, now_ms: f64, targets: I) -> FadeStatus
    where
        T: Fadeable + 'a,
        I: IntoIterator<Item = &'a mut T>,
    {
        let due = match self.next_step {
            Some(due) => due,
            None => {
                let due = now_ms + self.delay_ms;
                self.next_step = Some(due);
                due
            }
        };

        if now_ms < due {
            return if self.stepped {
                FadeStatus::Active
            } else {
                FadeStatus::Waiting
            };
        }

        self.stepped = true;
        self.next_step = Some(now_ms + self.interval_ms);

        let fading_in = self.ratio > 1.0;
        let mut in_transit = 0usize;

        for target in targets {
            if fading_in {
                if target.alpha() < 0.99 {
                    let next = target.alpha() * self.ratio;
                    // Kick-start: zero alpha would otherwise never move
                    target.set_alpha(if next == 0.0 { 0.01 } else { next });
                } else {
                    target.set_alpha(1.0);
                    if self.remove {
                        target.mark_removed();
                    }
                }
                if target.alpha() < 1.0 {
                    in_transit += 1;
                }
            } else {
                if target.alpha() > 0.01 {
                    target.set_alpha(target.alpha() * self.ratio);
                } else {
                    target.set_alpha(0.0);
                    if self.remove {
                        target.mark_removed();
                    }
                }
                if target.alpha() > 0.0 {
                    in_transit += 1;
                }
            }
        }

        if in_transit == 0 {
            FadeStatus::Complete
        } else {
            FadeStatus::Active
        }
    }
}
