/// Game entity types and their in-place movement rules.
///
/// Entities know nothing about the screen; bounds checks and wave logic live
/// in `compute`.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned box with inclusive pixel corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Half-width of the ship silhouette.
pub const SHIP_HALF_WIDTH: f32 = 2.0;
/// Half-height of the ship silhouette.
pub const SHIP_HALF_HEIGHT: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Vec2,
    /// Heading in radians.  Stored, never used for drawing.
    pub angle: f32,
    /// Left base corner, apex, right base corner.
    pub vertices: [Vec2; 3],
}

impl Ship {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Ship {
            position,
            angle,
            vertices: silhouette(position),
        }
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
        self.vertices = silhouette(self.position);
    }

    /// Like [`Ship::move_by`], but keeps every vertex inside `[0, width)`.
    pub fn move_clamped(&mut self, dx: f32, dy: f32, width: u16) {
        let min_x = SHIP_HALF_WIDTH;
        let max_x = (width as f32 - 1.0 - SHIP_HALF_WIDTH).max(min_x);
        self.position.x = (self.position.x + dx).clamp(min_x, max_x);
        self.position.y += dy;
        self.vertices = silhouette(self.position);
    }

    /// The apex of the triangle; bullets leave from here.
    pub fn nose(&self) -> Vec2 {
        self.vertices[1]
    }
}

fn silhouette(p: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(p.x - SHIP_HALF_WIDTH, p.y + SHIP_HALF_HEIGHT),
        Vec2::new(p.x, p.y - SHIP_HALF_HEIGHT),
        Vec2::new(p.x + SHIP_HALF_WIDTH, p.y + SHIP_HALF_HEIGHT),
    ]
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Added to `position` every frame.
    pub velocity: Vec2,
}

impl Bullet {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Bullet { position, velocity }
    }

    pub fn advance(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
    }

    /// True once the bullet has left the top of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.position.y < 0.0
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Span of an enemy box, corner to corner.
pub const ENEMY_SIZE: f32 = 5.0;
/// Radius around the enemy centre inside which a bullet counts as a hit.
pub const HIT_RADIUS: f32 = ENEMY_SIZE / 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Vec2,
    pub bounds: Bounds,
    pub alive: bool,
}

impl Enemy {
    pub fn new(position: Vec2) -> Self {
        Enemy {
            position,
            bounds: bounding_box(position),
            alive: true,
        }
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
        self.bounds = bounding_box(self.position);
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.x + HIT_RADIUS, self.position.y + HIT_RADIUS)
    }
}

fn bounding_box(p: Vec2) -> Bounds {
    Bounds {
        left: p.x,
        top: p.y,
        right: p.x + ENEMY_SIZE,
        bottom: p.y + ENEMY_SIZE,
    }
}

// ── Game state ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    /// Title screen, waiting for START before the next wave.
    Welcome,
    WaveActive,
}

/// How the previous wave ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaveOutcome {
    Cleared,
    /// An enemy reached the ship's row.
    Invaded,
}

/// Everything the frame driver owns.  Cloneable so the pure update functions
/// in `compute` can hand back a new copy.
#[derive(Clone, Debug)]
pub struct GameState {
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Horizontal step the wave keeps taking until it hits a wall (±1).
    pub enemy_dx: f32,
    /// Frames since the last enemy step.
    pub tick: u32,
    /// Waves started so far.
    pub wave: u32,
    pub last_outcome: Option<WaveOutcome>,
    pub status: GameStatus,
    pub width: u16,
    pub height: u16,
}
