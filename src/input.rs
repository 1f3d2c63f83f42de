//! Input handler registry
//!
//! Thin wiring between the host's event source and caller-supplied
//! callbacks. The scheduler never sees this module: the host feeds raw key
//! and pointer events in, the registry fans them out. Pointer coordinates
//! are translated into surface-local space by the registered origin before
//! handlers see them.

use std::collections::HashMap;

use glam::Vec2;

/// A key callback; returns whether it consumed the event (the host should
/// suppress its default action for consumed events).
type KeyHandler = Box<dyn FnMut() -> bool>;

type PointerHandler = Box<dyn FnMut(f32, f32)>;

struct KeyControl {
    down: KeyHandler,
    up: KeyHandler,
}

#[derive(Default)]
pub struct Input {
    controls: HashMap<u32, KeyControl>,
    mouse_down: Vec<PointerHandler>,
    mouse_move: Vec<PointerHandler>,
    mouse_up: Vec<PointerHandler>,
    /// Top-left of the drawing surface in host event coordinates
    origin: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the drawing surface within the host's event coordinate
    /// space; subtracted from every pointer event.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Bind down/up callbacks to a key code. One control per code; binding
    /// again replaces the old one.
    pub fn add_key_control<D, U>(&mut self, code: u32, down: D, up: U)
    where
        D: FnMut() -> bool + 'static,
        U: FnMut() -> bool + 'static,
    {
        self.controls.insert(
            code,
            KeyControl {
                down: Box::new(down),
                up: Box::new(up),
            },
        );
    }

    pub fn remove_key_control(&mut self, code: u32) {
        self.controls.remove(&code);
    }

    /// Dispatch a key-down event. Returns whether a handler consumed it.
    pub fn key_down(&mut self, code: u32) -> bool {
        match self.controls.get_mut(&code) {
            Some(control) => (control.down)(),
            None => false,
        }
    }

    /// Dispatch a key-up event. Returns whether a handler consumed it.
    pub fn key_up(&mut self, code: u32) -> bool {
        match self.controls.get_mut(&code) {
            Some(control) => (control.up)(),
            None => false,
        }
    }

    pub fn on_mouse_down(&mut self, handler: impl FnMut(f32, f32) + 'static) {
        self.mouse_down.push(Box::new(handler));
    }

    pub fn on_mouse_move(&mut self, handler: impl FnMut(f32, f32) + 'static) {
        self.mouse_move.push(Box::new(handler));
    }

    pub fn on_mouse_up(&mut self, handler: impl FnMut(f32, f32) + 'static) {
        self.mouse_up.push(Box::new(handler));
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        let local = Vec2::new(x, y) - self.origin;
        for handler in &mut self.mouse_down {
            handler(local.x, local.y);
        }
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let local = Vec2::new(x, y) - self.origin;
        for handler in &mut self.mouse_move {
            handler(local.x, local.y);
        }
    }

    pub fn mouse_up(&mut self, x: f32, y: f32) {
        let local = Vec2::new(x, y) - self.origin;
        for handler in &mut self.mouse_up {
            handler(local.x, local.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const SPACE: u32 = 32;

    #[test]
    fn test_key_dispatch_and_consumed_flag() {
        let mut input = Input::new();
        let downs = Rc::new(Cell::new(0));
        let ups = Rc::new(Cell::new(0));

        let d = downs.clone();
        let u = ups.clone();
        input.add_key_control(SPACE, move || {
            d.set(d.get() + 1);
            true
        }, move || {
            u.set(u.get() + 1);
            false
        });

        assert!(input.key_down(SPACE));
        assert!(!input.key_up(SPACE));
        assert_eq!((downs.get(), ups.get()), (1, 1));

        // Unbound keys are never consumed
        assert!(!input.key_down(99));
    }

    #[test]
    fn test_remove_key_control() {
        let mut input = Input::new();
        input.add_key_control(SPACE, || true, || true);
        input.remove_key_control(SPACE);
        assert!(!input.key_down(SPACE));
    }

    #[test]
    fn test_mouse_events_are_surface_local() {
        let mut input = Input::new();
        input.set_origin(Vec2::new(10.0, 20.0));

        let seen = Rc::new(Cell::new((0.0f32, 0.0f32)));
        let sink = seen.clone();
        input.on_mouse_down(move |x, y| sink.set((x, y)));

        input.mouse_down(15.0, 27.0);
        assert_eq!(seen.get(), (5.0, 7.0));
    }

    #[test]
    fn test_all_mouse_handlers_fire() {
        let mut input = Input::new();
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let c = count.clone();
            input.on_mouse_move(move |_x, _y| c.set(c.get() + 1));
        }
        input.mouse_move(0.0, 0.0);
        assert_eq!(count.get(), 3);
    }
}
