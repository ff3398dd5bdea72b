/// Tunable game constants.
///
/// The defaults reproduce the PCD8544 ("Nokia") LCD build of the game: an
/// 84×48 screen, an 8-enemy wave and a 200 ms fire-button debounce.  A few
/// timing knobs can be overridden from the environment, see [`Config::from_env`].

use std::time::Duration;

// ── Screen ────────────────────────────────────────────────────────────────────

pub const LCD_WIDTH: u16 = 84;
pub const LCD_HEIGHT: u16 = 48;

// ── Wave ──────────────────────────────────────────────────────────────────────

/// Enemies spawned per wave.
pub const WAVE_SIZE: usize = 8;
/// Row every wave starts on.
pub const ENEMY_ROW_Y: f32 = 2.0;
/// Frames between two enemy steps.
pub const ENEMY_STEP_INTERVAL: u32 = 10;
/// Rows an enemy wave descends when it bounces off a wall.
pub const ENEMY_DESCENT: f32 = 2.0;

// ── Ship & bullets ────────────────────────────────────────────────────────────

/// Horizontal pixels the ship moves per frame while a direction is held.
pub const SHIP_STEP: f32 = 1.0;
pub const BULLET_VELOCITY: (f32, f32) = (0.0, -1.0);

// ── Timing ────────────────────────────────────────────────────────────────────

const FIRE_DEBOUNCE_MS: u64 = 200;
/// A level-polled button keeps reading as held this long after its last
/// press/repeat event.  Terminal key-repeat is ≥ 15 Hz so 150 ms is always
/// refreshed before it expires.
const HOLD_WINDOW_MS: u64 = 150;
const FRAME_DELAY_MS: u64 = 33; // ≈30 FPS
const PRESENT_ATTEMPTS: u32 = 3;
const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: u16,
    pub height: u16,
    pub wave_size: usize,
    pub enemy_row_y: f32,
    pub enemy_step_interval: u32,
    pub enemy_descent: f32,
    pub ship_step: f32,
    pub bullet_velocity: (f32, f32),
    pub fire_debounce: Duration,
    pub hold_window: Duration,
    /// Fixed sleep after each presented frame.
    pub frame_delay: Duration,
    /// How many times a frame is pushed to the display before giving up.
    pub present_attempts: u32,
    pub event_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: LCD_WIDTH,
            height: LCD_HEIGHT,
            wave_size: WAVE_SIZE,
            enemy_row_y: ENEMY_ROW_Y,
            enemy_step_interval: ENEMY_STEP_INTERVAL,
            enemy_descent: ENEMY_DESCENT,
            ship_step: SHIP_STEP,
            bullet_velocity: BULLET_VELOCITY,
            fire_debounce: Duration::from_millis(FIRE_DEBOUNCE_MS),
            hold_window: Duration::from_millis(HOLD_WINDOW_MS),
            frame_delay: Duration::from_millis(FRAME_DELAY_MS),
            present_attempts: PRESENT_ATTEMPTS,
            event_queue_capacity: EVENT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Defaults, overridden by `INVADERS_FRAME_MS`, `INVADERS_FIRE_DEBOUNCE_MS`
    /// and `INVADERS_PRESENT_ATTEMPTS` when they are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(ms) = parse_var::<u64, _>(&lookup, "INVADERS_FRAME_MS") {
            config.frame_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "INVADERS_FIRE_DEBOUNCE_MS") {
            config.fire_debounce = Duration::from_millis(ms);
        }
        if let Some(n) = parse_var::<u32, _>(&lookup, "INVADERS_PRESENT_ATTEMPTS") {
            config.present_attempts = n.max(1);
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
