use lcd_invaders::compute::*;
use lcd_invaders::config::Config;
use lcd_invaders::entities::*;

fn make_state() -> GameState {
    GameState {
        ship: Ship::new(Vec2::new(42.0, 40.0), 0.0),
        bullets: Vec::new(),
        enemies: Vec::new(),
        enemy_dx: 1.0,
        tick: 0,
        wave: 1,
        last_outcome: None,
        status: GameStatus::WaveActive,
        width: 84,
        height: 48,
    }
}

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet::new(Vec2::new(x, y), Vec2::new(0.0, -1.0))
}

// ── init_state / spawn_wave / start_wave ──────────────────────────────────────

#[test]
fn init_state_parks_ship_and_waits() {
    let s = init_state(&Config::default());
    assert_eq!(s.ship.position, Vec2::new(42.0, 40.0));
    assert_eq!(s.status, GameStatus::Welcome);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.wave, 0);
}

#[test]
fn spawn_wave_is_one_spaced_row() {
    let enemies = spawn_wave(&Config::default());
    assert_eq!(enemies.len(), 8);
    for (i, e) in enemies.iter().enumerate() {
        assert!(e.alive);
        assert_eq!(e.position, Vec2::new((i * 5 + i * 3) as f32, 2.0));
    }
    // Inclusive boxes never overlap and leave a 2-pixel gap.
    for pair in enemies.windows(2) {
        assert_eq!(pair[1].bounds.left - pair[0].bounds.right, 3.0);
        assert!(pair[0].bounds.right < pair[1].bounds.left);
    }
}

#[test]
fn start_wave_resets_the_field() {
    let mut s = make_state();
    s.status = GameStatus::Welcome;
    s.bullets.push(bullet_at(10.0, 10.0));
    s.tick = 7;
    s.enemy_dx = -1.0;
    s.last_outcome = Some(WaveOutcome::Cleared);

    let s2 = start_wave(&s, &Config::default());
    assert_eq!(s2.status, GameStatus::WaveActive);
    assert_eq!(s2.enemies.len(), 8);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.tick, 0);
    assert_eq!(s2.enemy_dx, 1.0);
    assert_eq!(s2.wave, 2);
    // Original untouched.
    assert_eq!(s.bullets.len(), 1);
}

// ── move_ship / fire ──────────────────────────────────────────────────────────

#[test]
fn move_ship_clamps_at_both_walls() {
    let mut s = make_state();
    s.ship = Ship::new(Vec2::new(2.0, 40.0), 0.0);
    assert_eq!(move_ship(&s, -1.0).ship.position.x, 2.0);

    s.ship = Ship::new(Vec2::new(81.0, 40.0), 0.0);
    let s2 = move_ship(&s, 1.0);
    assert_eq!(s2.ship.position.x, 81.0);
    assert_eq!(s2.ship.vertices[2].x, 83.0);
}

#[test]
fn fire_spawns_at_the_nose() {
    let s = make_state();
    let s2 = fire(&s, &Config::default());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].position, Vec2::new(42.0, 36.0));
    assert_eq!(s2.bullets[0].velocity, Vec2::new(0.0, -1.0));
    assert!(s.bullets.is_empty());
}

// ── wave_step ─────────────────────────────────────────────────────────────────

#[test]
fn wave_bounces_off_right_wall() {
    // Right edge at width - 1.
    let enemies = vec![Enemy::new(Vec2::new(40.0, 2.0)), Enemy::new(Vec2::new(78.0, 2.0))];
    assert_eq!(wave_step(&enemies, 84, 1.0, 2.0), (-1.0, 2.0));
}

#[test]
fn wave_bounces_off_left_wall() {
    let enemies = vec![Enemy::new(Vec2::new(0.0, 6.0)), Enemy::new(Vec2::new(30.0, 6.0))];
    assert_eq!(wave_step(&enemies, 84, -1.0, 2.0), (1.0, 2.0));
}

#[test]
fn wave_keeps_marching_between_walls() {
    let enemies = vec![Enemy::new(Vec2::new(10.0, 2.0))];
    assert_eq!(wave_step(&enemies, 84, 1.0, 2.0), (1.0, 0.0));
    assert_eq!(wave_step(&enemies, 84, -1.0, 2.0), (-1.0, 0.0));
}

#[test]
fn wave_step_ignores_dead_enemies() {
    let mut enemies = vec![Enemy::new(Vec2::new(10.0, 2.0)), Enemy::new(Vec2::new(78.0, 2.0))];
    enemies[1].alive = false;
    assert_eq!(wave_step(&enemies, 84, 1.0, 2.0), (1.0, 0.0));
}

// ── check_hit ─────────────────────────────────────────────────────────────────

#[test]
fn hit_at_centre() {
    let mut enemies = vec![Enemy::new(Vec2::new(10.0, 10.0))];
    assert!(check_hit(&bullet_at(12.5, 12.5), &mut enemies));
    assert!(!enemies[0].alive);
}

#[test]
fn hit_radius_is_inclusive() {
    let mut enemies = vec![Enemy::new(Vec2::new(10.0, 10.0))];
    assert!(check_hit(&bullet_at(15.0, 12.5), &mut enemies));
}

#[test]
fn miss_outside_radius() {
    let mut enemies = vec![Enemy::new(Vec2::new(10.0, 10.0))];
    // Box corner: inside the box, outside the circle.
    assert!(!check_hit(&bullet_at(10.0, 10.0), &mut enemies));
    assert!(!check_hit(&bullet_at(15.01, 12.5), &mut enemies));
    assert!(enemies[0].alive);
}

#[test]
fn dead_enemies_cannot_be_hit() {
    let mut enemies = vec![Enemy::new(Vec2::new(10.0, 10.0))];
    enemies[0].alive = false;
    assert!(!check_hit(&bullet_at(12.5, 12.5), &mut enemies));
}

#[test]
fn one_bullet_one_kill() {
    // Two enemies whose hit circles overlap at (15, 12.5); first in list wins.
    let mut enemies = vec![
        Enemy::new(Vec2::new(10.0, 10.0)),
        Enemy::new(Vec2::new(15.0, 10.0)),
    ];
    assert!(check_hit(&bullet_at(15.0, 12.5), &mut enemies));
    assert!(!enemies[0].alive);
    assert!(enemies[1].alive);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_moves_bullets_up() {
    let config = Config::default();
    let mut s = make_state();
    s.enemies.push(Enemy::new(Vec2::new(0.0, 2.0)));
    s.bullets.push(bullet_at(40.0, 30.0));
    for _ in 0..5 {
        s = tick(&s, &config);
    }
    assert_eq!(s.bullets[0].position.y, 25.0);
}

#[test]
fn tick_prunes_bullets_leaving_the_top() {
    let config = Config::default();
    let mut s = make_state();
    s.enemies.push(Enemy::new(Vec2::new(60.0, 20.0)));
    s.bullets.push(bullet_at(40.0, 0.0));
    s.bullets.push(bullet_at(41.0, 1.0));
    let s2 = tick(&s, &config);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].position, Vec2::new(41.0, 0.0));
}

#[test]
fn tick_steps_wave_every_interval() {
    let config = Config::default();
    let mut s = make_state();
    s.enemies.push(Enemy::new(Vec2::new(10.0, 2.0)));
    for _ in 0..9 {
        s = tick(&s, &config);
    }
    assert_eq!(s.enemies[0].position, Vec2::new(10.0, 2.0));
    assert_eq!(s.tick, 9);

    s = tick(&s, &config);
    assert_eq!(s.enemies[0].position, Vec2::new(11.0, 2.0));
    assert_eq!(s.tick, 0);
}

#[test]
fn tick_applies_bounce_to_every_live_enemy() {
    let config = Config::default();
    let mut s = make_state();
    s.tick = 9;
    s.enemies.push(Enemy::new(Vec2::new(50.0, 4.0)));
    s.enemies.push(Enemy::new(Vec2::new(78.0, 4.0)));
    let s2 = tick(&s, &config);
    assert_eq!(s2.enemies[0].position, Vec2::new(49.0, 6.0));
    assert_eq!(s2.enemies[1].position, Vec2::new(77.0, 6.0));
    assert_eq!(s2.enemy_dx, -1.0);

    // Next step carries on left without descending.
    let mut s3 = s2.clone();
    s3.tick = 9;
    let s4 = tick(&s3, &config);
    assert_eq!(s4.enemies[0].position, Vec2::new(48.0, 6.0));
}

#[test]
fn tick_hit_removes_bullet_and_enemy() {
    let config = Config::default();
    let mut s = make_state();
    s.enemies.push(Enemy::new(Vec2::new(10.0, 10.0)));
    s.enemies.push(Enemy::new(Vec2::new(30.0, 10.0)));
    s.bullets.push(bullet_at(12.5, 13.5)); // moves onto the centre
    let s2 = tick(&s, &config);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].position.x, 30.0);
    assert_eq!(s2.status, GameStatus::WaveActive);
}

#[test]
fn tick_clearing_the_wave_returns_to_welcome() {
    let config = Config::default();
    let mut s = make_state();
    s.enemies.push(Enemy::new(Vec2::new(10.0, 10.0)));
    s.bullets.push(bullet_at(12.5, 13.5));
    let s2 = tick(&s, &config);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.status, GameStatus::Welcome);
    assert_eq!(s2.last_outcome, Some(WaveOutcome::Cleared));

    let s3 = start_wave(&s2, &config);
    assert_eq!(s3.enemies.len(), 8);
    assert!(s3.bullets.is_empty());
}

#[test]
fn tick_invasion_ends_the_wave() {
    let config = Config::default();
    let mut s = make_state();
    // Ship nose is at y = 36; this enemy's bottom edge reaches it.
    s.enemies.push(Enemy::new(Vec2::new(10.0, 31.0)));
    let s2 = tick(&s, &config);
    assert_eq!(s2.status, GameStatus::Welcome);
    assert_eq!(s2.last_outcome, Some(WaveOutcome::Invaded));
}

#[test]
fn tick_is_a_no_op_on_the_welcome_screen() {
    let config = Config::default();
    let mut s = make_state();
    s.status = GameStatus::Welcome;
    s.bullets.push(bullet_at(10.0, 10.0));
    let s2 = tick(&s, &config);
    assert_eq!(s2.bullets[0].position.y, 10.0);
    assert_eq!(s2.tick, 0);
}

#[test]
fn tick_does_not_mutate_original() {
    let config = Config::default();
    let mut s = make_state();
    s.enemies.push(Enemy::new(Vec2::new(10.0, 10.0)));
    s.bullets.push(bullet_at(12.5, 13.5));
    let _ = tick(&s, &config);
    assert_eq!(s.bullets.len(), 1);
    assert!(s.enemies[0].alive);
}
