//! Drawing surface contract
//!
//! The engine draws through this trait and never knows what backs it: a
//! pixel buffer, a terminal grid, a GPU canvas. The save/translate/restore
//! discipline matches an immediate-mode 2D context, which is all the draw
//! pass needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#rrggbb` hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Color::rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Capability contract for anything the engine can draw on.
///
/// `save`/`restore` bracket the draw pass and the screen-space detour for
/// `fixed` entities; implementations must treat them as a translation stack.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);

    /// Shift the current translation by `delta`
    fn translate(&mut self, delta: Vec2);

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);

    /// Fill an axis-aligned rectangle, `pos` being its top-left corner in
    /// the current translated space
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
}
