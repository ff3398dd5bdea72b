/// Rendering layer.
///
/// The render functions rasterize game state into any `embedded-graphics`
/// target with binary colour; no game logic happens here.  A [`Canvas`] owns a
/// [`FrameBuffer`] and knows how to push it to a physical (or pretend) screen.

use std::io;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle, Triangle},
    text::{Baseline, Text},
};

use crate::entities::{Bullet, Enemy, GameState, Ship, Vec2, WaveOutcome};

mod framebuffer;
mod headless;
mod terminal;

pub use framebuffer::FrameBuffer;
pub use headless::HeadlessDisplay;
pub use terminal::{cells_needed, TerminalDisplay};

/// A display the frame driver can draw on.
pub trait Canvas {
    /// The image the next [`Canvas::present`] will show.
    fn surface(&mut self) -> &mut FrameBuffer;

    /// Push the current surface to the screen.
    fn present(&mut self) -> io::Result<()>;
}

const INK: BinaryColor = BinaryColor::On;
const PAPER: BinaryColor = BinaryColor::Off;

// Welcome screen rows; FONT_6X10 lines are ten pixels tall.
pub const TITLE_Y: i32 = 3;
pub const STATUS_Y: i32 = 14;
pub const PROMPT_Y: i32 = 25;
pub const CREDIT_Y: i32 = 37;

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(INK, 1)
}

fn point(v: Vec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Draw one frame of an active wave: ship, live enemies, bullets.
pub fn render_play<D>(target: &mut D, state: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(PAPER)?;

    draw_ship(target, &state.ship)?;
    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_enemy(target, enemy)?;
    }
    for bullet in &state.bullets {
        draw_bullet(target, bullet)?;
    }

    Ok(())
}

/// Draw the title screen shown before every wave.
pub fn render_welcome<D>(target: &mut D, state: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, INK);
    target.clear(PAPER)?;

    Text::with_baseline("-=Invaders=-", Point::new(6, TITLE_Y), style, Baseline::Top).draw(target)?;

    let status = match state.last_outcome {
        Some(WaveOutcome::Cleared) => format!("Wave {} clear", state.wave),
        Some(WaveOutcome::Invaded) => format!("Wave {} lost", state.wave),
        None => String::from("Ready"),
    };
    let x = (state.width as i32 - status.len() as i32 * 6).max(0) / 2;
    Text::with_baseline(&status, Point::new(x, STATUS_Y), style, Baseline::Top).draw(target)?;

    Text::with_baseline("B to start", Point::new(12, PROMPT_Y), style, Baseline::Top)
        .draw(target)?;
    Text::with_baseline("By Bruno G. E.", Point::new(1, CREDIT_Y), style, Baseline::Top)
        .draw(target)?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<D>(target: &mut D, ship: &Ship) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let [a, b, c] = ship.vertices;
    Triangle::new(point(a), point(b), point(c))
        .into_styled(stroke())
        .draw(target)
}

fn draw_enemy<D>(target: &mut D, enemy: &Enemy) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let b = enemy.bounds;
    Rectangle::with_corners(
        point(Vec2::new(b.left, b.top)),
        point(Vec2::new(b.right, b.bottom)),
    )
    .into_styled(stroke())
    .draw(target)
}

fn draw_bullet<D>(target: &mut D, bullet: &Bullet) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    // Two pixels tall, growing upward from the bullet position.
    let head = point(bullet.position);
    Line::new(head, head - Point::new(0, 1))
        .into_styled(stroke())
        .draw(target)
}
