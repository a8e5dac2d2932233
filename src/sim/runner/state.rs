//! Runner game state
//!
//! Everything one run needs lives in [`RunnerState`]; the tick functions
//! take it by `&mut` and never reach for globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::runner::{MOVING_OBSTACLE_RANGE, MOVING_OBSTACLE_STEP};
use crate::sim::Aabb;
use crate::tuning::RunnerTuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Lethal collision happened; waiting for the shell to restart
    GameOver,
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub is_jumping: bool,
    /// One extra jump per airborne period
    pub can_double_jump: bool,
    pub is_sliding: bool,
    pub slide_start_ms: f64,
    pub has_special_attack: bool,
    pub is_wall_sliding: bool,
    /// +1 or -1, horizontal direction of the next wall jump
    pub wall_jump_direction: f32,
}

impl Ball {
    pub fn new(tuning: &RunnerTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.ball_start_x, tuning.ground_y()),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            is_jumping: false,
            can_double_jump: false,
            is_sliding: false,
            slide_start_ms: 0.0,
            has_special_attack: false,
            is_wall_sliding: false,
            wall_jump_direction: 0.0,
        }
    }

    /// Collision box (circle approximated as a square)
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }
}

/// Obstacle types, each with its own collision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall block that must be jumped over
    Jump,
    /// Low block that must be slid under
    Slide,
    /// Lethal until destroyed by the special attack
    Breakable,
    /// Bobs up and down, always lethal
    Moving,
}

impl ObstacleKind {
    /// Weighted pick from a uniform roll in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.3 {
            ObstacleKind::Jump
        } else if roll < 0.6 {
            ObstacleKind::Slide
        } else if roll < 0.8 {
            ObstacleKind::Breakable
        } else {
            ObstacleKind::Moving
        }
    }

    pub fn height(self) -> f32 {
        match self {
            ObstacleKind::Jump => 50.0,
            ObstacleKind::Breakable => 40.0,
            ObstacleKind::Slide | ObstacleKind::Moving => 20.0,
        }
    }

    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Jump,
        ObstacleKind::Slide,
        ObstacleKind::Breakable,
        ObstacleKind::Moving,
    ];
}

pub const OBSTACLE_WIDTH: f32 = 30.0;
pub const RAMP_SIZE: Vec2 = Vec2::new(60.0, 30.0);
pub const WALL_SIZE: Vec2 = Vec2::new(20.0, 100.0);
pub const BOUNCE_PAD_SIZE: Vec2 = Vec2::new(40.0, 10.0);

/// Height of the tallest thing that can spawn on the ground
pub fn tallest_entity_height() -> f32 {
    ObstacleKind::ALL
        .iter()
        .map(|k| k.height())
        .chain([RAMP_SIZE.y, WALL_SIZE.y, BOUNCE_PAD_SIZE.y])
        .fold(0.0, f32::max)
}

/// Anything that scrolls in from the right and is culled off the left edge
pub trait Scrolling {
    fn pos(&self) -> Vec2;
    fn size(&self) -> Vec2;

    /// Move left by `dx` (plus any per-entity motion)
    fn scroll(&mut self, dx: f32);

    #[inline]
    fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos(), self.size())
    }

    /// Fully past the left edge of the canvas
    #[inline]
    fn is_off_screen(&self) -> bool {
        self.pos().x + self.size().x < 0.0
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub is_broken: bool,
    /// +1 = moving down, -1 = moving up (Moving obstacles only)
    pub move_direction: f32,
    pub move_distance: f32,
}

impl Obstacle {
    /// Spawn just past the right edge, resting on the ground
    pub fn new(id: u32, kind: ObstacleKind, canvas_width: f32, canvas_height: f32) -> Self {
        let size = Vec2::new(OBSTACLE_WIDTH, kind.height());
        Self {
            id,
            kind,
            pos: Vec2::new(canvas_width, canvas_height - size.y),
            size,
            is_broken: false,
            move_direction: 1.0,
            move_distance: 0.0,
        }
    }

    #[inline]
    pub fn is_breakable(&self) -> bool {
        self.kind == ObstacleKind::Breakable
    }
}

impl Scrolling for Obstacle {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
        if self.kind == ObstacleKind::Moving {
            self.pos.y += self.move_direction * MOVING_OBSTACLE_STEP;
            self.move_distance += MOVING_OBSTACLE_STEP;
            if self.move_distance >= MOVING_OBSTACLE_RANGE {
                self.move_direction = -self.move_direction;
                self.move_distance = 0.0;
            }
        }
    }
}

/// Ramp direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampKind {
    /// Launches the ball upward
    Up,
    /// Drawn tilted the other way; no gameplay effect
    Down,
}

/// A ramp entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ramp {
    pub id: u32,
    pub kind: RampKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Draw rotation in radians
    pub angle: f32,
}

impl Ramp {
    pub fn new(id: u32, kind: RampKind, canvas_width: f32, canvas_height: f32) -> Self {
        let angle = match kind {
            RampKind::Up => -std::f32::consts::FRAC_PI_4,
            RampKind::Down => std::f32::consts::FRAC_PI_4,
        };
        Self {
            id,
            kind,
            pos: Vec2::new(canvas_width, canvas_height - RAMP_SIZE.y),
            size: RAMP_SIZE,
            angle,
        }
    }
}

impl Scrolling for Ramp {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

/// A wall the ball can slide down and jump off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Wall {
    pub fn new(id: u32, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(canvas_width, canvas_height - WALL_SIZE.y),
            size: WALL_SIZE,
        }
    }
}

impl Scrolling for Wall {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

/// A springy pad on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouncePad {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl BouncePad {
    pub fn new(id: u32, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(canvas_width, canvas_height - BOUNCE_PAD_SIZE.y),
            size: BOUNCE_PAD_SIZE,
        }
    }
}

impl Scrolling for BouncePad {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

/// Things that happened during a tick, for the shell to present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunnerEvent {
    LevelUp { level: u32 },
    SpecialAttackArmed,
    SpecialAttackUsed { broken: usize },
    GameOver {
        distance: u32,
        level: u32,
        cause: ObstacleKind,
    },
}

impl RunnerEvent {
    /// End-of-run message, if this event ends the run
    pub fn summary(&self) -> Option<String> {
        match self {
            RunnerEvent::GameOver {
                distance, level, ..
            } => Some(format!(
                "Game Over! You ran {distance} meters and reached level {level}!"
            )),
            _ => None,
        }
    }
}

/// Complete runner state
#[derive(Debug, Clone)]
pub struct RunnerState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: RunnerTuning,
    pub phase: GamePhase,
    pub ball: Ball,
    pub obstacles: Vec<Obstacle>,
    pub ramps: Vec<Ramp>,
    pub walls: Vec<Wall>,
    pub bounce_pads: Vec<BouncePad>,
    /// Meters run (monotonic)
    pub distance: f32,
    pub level: u32,
    /// Scroll speed multiplier derived from level
    pub game_speed: f32,
    /// Timestamp of the last obstacle spawn; gates every spawner
    pub last_obstacle_ms: Option<f64>,
    pub last_special_attack_ms: Option<f64>,
    /// Simulation tick counter
    pub frames: u64,
    next_id: u32,
}

impl RunnerState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, RunnerTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: RunnerTuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ball: Ball::new(&tuning),
            game_speed: tuning.game_speed_for_level(1),
            tuning,
            phase: GamePhase::Running,
            obstacles: Vec::new(),
            ramps: Vec::new(),
            walls: Vec::new(),
            bounce_pads: Vec::new(),
            distance: 0.0,
            level: 1,
            last_obstacle_ms: None,
            last_special_attack_ms: None,
            frames: 0,
            next_id: 1,
        }
    }

    /// Start a fresh run, keeping the tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Push an obstacle at the spawn point
    pub fn spawn_obstacle(&mut self, kind: ObstacleKind) -> &mut Obstacle {
        let id = self.next_entity_id();
        let (w, h) = (self.tuning.canvas_width, self.tuning.canvas_height);
        self.obstacles.push(Obstacle::new(id, kind, w, h));
        let last = self.obstacles.len() - 1;
        &mut self.obstacles[last]
    }

    pub fn spawn_ramp(&mut self, kind: RampKind) -> &mut Ramp {
        let id = self.next_entity_id();
        let (w, h) = (self.tuning.canvas_width, self.tuning.canvas_height);
        self.ramps.push(Ramp::new(id, kind, w, h));
        let last = self.ramps.len() - 1;
        &mut self.ramps[last]
    }

    pub fn spawn_wall(&mut self) -> &mut Wall {
        let id = self.next_entity_id();
        let (w, h) = (self.tuning.canvas_width, self.tuning.canvas_height);
        self.walls.push(Wall::new(id, w, h));
        let last = self.walls.len() - 1;
        &mut self.walls[last]
    }

    pub fn spawn_bounce_pad(&mut self) -> &mut BouncePad {
        let id = self.next_entity_id();
        let (w, h) = (self.tuning.canvas_width, self.tuning.canvas_height);
        self.bounce_pads.push(BouncePad::new(id, w, h));
        let last = self.bounce_pads.len() - 1;
        &mut self.bounce_pads[last]
    }
}
