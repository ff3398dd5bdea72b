/// Pure game-logic functions.
///
/// Public state transitions take an immutable reference to the current
/// `GameState` and return a brand-new `GameState`.  The frame driver swaps
/// the new state in only once a transition has fully completed.

use crate::config::Config;
use crate::entities::{
    Bullet, Enemy, GameState, GameStatus, Ship, Vec2, WaveOutcome, ENEMY_SIZE, HIT_RADIUS,
};

/// Horizontal distance between the left edges of neighbouring enemies.
const ENEMY_PITCH: f32 = ENEMY_SIZE + 3.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Initial state: ship parked near the bottom, welcome screen up, no wave yet.
pub fn init_state(config: &Config) -> GameState {
    let ship_position = Vec2::new(
        (config.width / 2) as f32,
        config.height.saturating_sub(8) as f32,
    );
    GameState {
        ship: Ship::new(ship_position, 0.0),
        bullets: Vec::new(),
        enemies: Vec::new(),
        enemy_dx: 1.0,
        tick: 0,
        wave: 0,
        last_outcome: None,
        status: GameStatus::Welcome,
        width: config.width,
        height: config.height,
    }
}

/// One row of `wave_size` enemies, evenly spaced from the left wall.
pub fn spawn_wave(config: &Config) -> Vec<Enemy> {
    (0..config.wave_size)
        .map(|i| {
            let x = i as f32 * ENEMY_SIZE + i as f32 * (ENEMY_PITCH - ENEMY_SIZE);
            Enemy::new(Vec2::new(x, config.enemy_row_y))
        })
        .collect()
}

/// Leave the welcome screen: fresh wave, empty bullet list, counters reset.
pub fn start_wave(state: &GameState, config: &Config) -> GameState {
    let wave = state.wave + 1;
    log::info!("wave {} starting with {} enemies", wave, config.wave_size);
    GameState {
        enemies: spawn_wave(config),
        bullets: Vec::new(),
        enemy_dx: 1.0,
        tick: 0,
        wave,
        status: GameStatus::WaveActive,
        ..state.clone()
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

/// Move the ship horizontally, never letting the silhouette leave the screen.
pub fn move_ship(state: &GameState, dx: f32) -> GameState {
    let mut ship = state.ship.clone();
    ship.move_clamped(dx, 0.0, state.width);
    GameState {
        ship,
        ..state.clone()
    }
}

/// Spawn a bullet at the ship's nose.
pub fn fire(state: &GameState, config: &Config) -> GameState {
    let (vx, vy) = config.bullet_velocity;
    let nose = state.ship.nose();
    log::debug!("fire from ({}, {})", nose.x, nose.y);
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::new(nose, Vec2::new(vx, vy)));
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Wave controller ──────────────────────────────────────────────────────────

/// Next `(dx, dy)` for the wave, given the direction it is currently marching.
///
/// Touching the right wall turns the wave left and drops it a row; touching
/// the left wall turns it right and drops it a row.  Dead enemies are ignored.
pub fn wave_step(enemies: &[Enemy], width: u16, dx: f32, descent: f32) -> (f32, f32) {
    let alive = || enemies.iter().filter(|e| e.alive);
    let right = alive().map(|e| e.bounds.right).fold(f32::NEG_INFINITY, f32::max);
    let left = alive().map(|e| e.bounds.left).fold(f32::INFINITY, f32::min);

    if right >= width as f32 - 1.0 {
        (-1.0, descent)
    } else if left <= 0.0 {
        (1.0, descent)
    } else {
        (dx, 0.0)
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Test one bullet against every live enemy, in list order.
///
/// The first enemy whose centre lies within `HIT_RADIUS` (inclusive) is
/// marked dead and the scan stops: a bullet scores at most one kill.
pub fn check_hit(bullet: &Bullet, enemies: &mut [Enemy]) -> bool {
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        if bullet.position.distance(enemy.center()) <= HIT_RADIUS {
            enemy.alive = false;
            return true;
        }
    }
    false
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance an active wave by one frame.
///
/// Order: tick counter and enemy step, then bullets move and are tested for
/// hits, then one compaction pass drops spent bullets and dead enemies.  A
/// wave with no enemies left, or one that reached the ship, returns the game
/// to the welcome screen.
pub fn tick(state: &GameState, config: &Config) -> GameState {
    if state.status != GameStatus::WaveActive {
        return state.clone();
    }

    // ── 1. March the wave on its interval ────────────────────────────────────
    let mut enemies = state.enemies.clone();
    let mut enemy_dx = state.enemy_dx;
    let mut tick = state.tick + 1;
    if tick >= config.enemy_step_interval {
        let (dx, dy) = wave_step(&enemies, state.width, enemy_dx, config.enemy_descent);
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.move_by(dx, dy);
        }
        enemy_dx = dx;
        tick = 0;
    }

    // ── 2. Move bullets and test them against the wave ───────────────────────
    let mut bullets = state.bullets.clone();
    let mut spent = vec![false; bullets.len()];
    for (bullet, spent) in bullets.iter_mut().zip(spent.iter_mut()) {
        bullet.advance();
        if bullet.is_off_screen() {
            *spent = true;
        } else if check_hit(bullet, &mut enemies) {
            log::debug!("hit at ({}, {})", bullet.position.x, bullet.position.y);
            *spent = true;
        }
    }

    // ── 3. Compact ───────────────────────────────────────────────────────────
    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .zip(spent)
        .filter(|(_, spent)| !spent)
        .map(|(b, _)| b)
        .collect();
    enemies.retain(|e| e.alive);

    // ── 4. Wave end ──────────────────────────────────────────────────────────
    let nose_y = state.ship.nose().y;
    let outcome = if enemies.is_empty() {
        Some(WaveOutcome::Cleared)
    } else if enemies.iter().any(|e| e.bounds.bottom >= nose_y) {
        Some(WaveOutcome::Invaded)
    } else {
        None
    };

    match outcome {
        Some(outcome) => {
            log::info!("wave {} ended: {:?}", state.wave, outcome);
            GameState {
                enemies,
                bullets,
                enemy_dx,
                tick,
                last_outcome: Some(outcome),
                status: GameStatus::Welcome,
                ..state.clone()
            }
        }
        None => GameState {
            enemies,
            bullets,
            enemy_dx,
            tick,
            ..state.clone()
        },
    }
}
