//! World camera
//!
//! A translating viewport over world space. The draw pass shifts everything
//! by the negated camera position; entities flagged `fixed` are drawn with
//! that shift cancelled (screen-space overlays).

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left of the viewport in world units
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    /// Translation applied to the surface before world-space drawing
    #[inline]
    pub fn offset(&self) -> Vec2 {
        -self.pos
    }
}
