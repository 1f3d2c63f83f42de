//! Playfield demo
//!
//! A terminal rendition of the engine loop: boxes bounce around a small
//! arena, push each other apart on contact, then fade out and get compacted
//! away. One snapshot of the grid is printed mid-run.

use std::time::Duration;

use glam::Vec2;

use playfield::collision;
use playfield::effects::{Fade, FadeStatus, Fadeable};
use playfield::{Color, Engine, EngineConfig, Entity, Positioned, Surface};

const ARENA_W: f32 = 64.0;
const ARENA_H: f32 = 20.0;
/// How long the boxes bounce before the fade starts
const FADE_DELAY_MS: f64 = 1500.0;

struct BoxEntity {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    vx: f32,
    vy: f32,
    alpha: f32,
    removed: bool,
    fixed: bool,
}

impl BoxEntity {
    fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            x,
            y,
            w: 4.0,
            h: 3.0,
            vx,
            vy,
            alpha: 1.0,
            removed: false,
            fixed: false,
        }
    }

    /// Screen-space corner marker, immune to the camera
    fn marker() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 1.0,
            removed: false,
            fixed: true,
        }
    }
}

impl Positioned for BoxEntity {
    fn x(&self) -> f32 {
        self.x
    }
    fn y(&self) -> f32 {
        self.y
    }
    fn width(&self) -> f32 {
        self.w
    }
    fn height(&self) -> f32 {
        self.h
    }
    fn set_x(&mut self, x: f32) {
        self.x = x;
    }
    fn set_y(&mut self, y: f32) {
        self.y = y;
    }
}

impl Entity for BoxEntity {
    fn draw(&self, surface: &mut dyn Surface) {
        let color = Color {
            a: (self.alpha * 255.0) as u8,
            ..Color::WHITE
        };
        surface.fill_rect(Vec2::new(self.x, self.y), Vec2::new(self.w, self.h), color);
    }

    fn removed(&self) -> bool {
        self.removed
    }

    fn fixed(&self) -> bool {
        self.fixed
    }
}

impl Fadeable for BoxEntity {
    fn alpha(&self) -> f32 {
        self.alpha
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
    fn mark_removed(&mut self) {
        self.removed = true;
    }
}

/// Character-grid surface with a translation stack; alpha picks the glyph.
struct TermSurface {
    width: i32,
    height: i32,
    cells: Vec<char>,
    offset: Vec2,
    stack: Vec<Vec2>,
}

impl TermSurface {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; (width * height) as usize],
            offset: Vec2::ZERO,
            stack: Vec::new(),
        }
    }

    fn present(&self) -> String {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for TermSurface {
    fn save(&mut self) {
        self.stack.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.stack.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    fn clear(&mut self, _color: Color) {
        self.cells.fill(' ');
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        let glyph = match color.a {
            200.. => '#',
            80.. => '+',
            20.. => '.',
            _ => return,
        };
        let corner = pos + self.offset;
        for gy in corner.y as i32..(corner.y + size.y) as i32 {
            if !(0..self.height).contains(&gy) {
                continue;
            }
            for gx in corner.x as i32..(corner.x + size.x) as i32 {
                if (0..self.width).contains(&gx) {
                    self.cells[(gy * self.width + gx) as usize] = glyph;
                }
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("playfield demo starting");

    let config = EngineConfig {
        fps: 60.0,
        clear_color: Color::from_hex("#101418").unwrap_or(Color::BLACK),
        viewport_width: ARENA_W,
        viewport_height: ARENA_H,
    };
    let mut engine: Engine<BoxEntity> = Engine::with_config(config);

    let stage = engine.stage_mut();
    stage.spawn("boxes", BoxEntity::moving(4.0, 3.0, 0.018, 0.007));
    stage.spawn("boxes", BoxEntity::moving(30.0, 10.0, -0.012, 0.009));
    stage.spawn("boxes", BoxEntity::moving(50.0, 5.0, -0.016, -0.006));
    stage.spawn("overlay", BoxEntity::marker());
    // A slight pan, so the screen-space marker visibly stays put
    stage.camera.pos = Vec2::new(-2.0, -1.0);

    let mut fade = Fade::fade_out().removing().with_delay(FADE_DELAY_MS);
    let mut elapsed = 0.0f64;

    engine.on_state("bounce", move |delta, stage| {
        elapsed += delta;
        let step = delta as f32;

        let boxes = stage.collection_mut("boxes");
        for b in boxes.iter_mut() {
            b.x += b.vx * step;
            b.y += b.vy * step;

            if b.x < 0.0 {
                b.x = 0.0;
                b.vx = -b.vx;
            } else if b.x + b.w > ARENA_W {
                b.x = ARENA_W - b.w;
                b.vx = -b.vx;
            }
            if b.y < 0.0 {
                b.y = 0.0;
                b.vy = -b.vy;
            } else if b.y + b.h > ARENA_H {
                b.y = ARENA_H - b.h;
                b.vy = -b.vy;
            }
        }

        // Pairwise push-out; the lower-indexed box yields
        for i in 0..boxes.len() {
            let (head, tail) = boxes.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter() {
                if let Some(contact) = collision::resolve_rectangles(a, b) {
                    log::debug!("contact on {:?} side", contact.side);
                }
            }
        }

        if fade.advance(elapsed, boxes.iter_mut()) == FadeStatus::Complete {
            stage.switch_to("done");
        }
    });

    engine.set_state("bounce");
    engine.start();

    let mut surface = TermSurface::new(ARENA_W as i32, ARENA_H as i32);
    let mut ticks = 0u32;
    let mut snapshot = None;

    while engine.state() != Some("done") {
        if engine.pump() {
            ticks += 1;
            engine.frame(&mut surface);
            if ticks == 30 {
                snapshot = Some(surface.present());
            }
        }
        std::thread::sleep(Duration::from_millis(1));
    }

    if let Some(grid) = snapshot {
        println!("{grid}");
    }
    log::info!(
        "demo finished after {ticks} ticks, {} boxes left",
        engine.stage().collection("boxes").map_or(0, |b| b.len())
    );
}
