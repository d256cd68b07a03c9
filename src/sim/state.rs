//! Match state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::settings::MatchSettings;

/// Which end of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction a ball travels to approach this side's paddle
    pub fn incoming_sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ball in play, physics integrating
    Rallying,
    /// A point was just scored; the ball sits at centre for one tick
    PointScored,
    /// Someone reached the win score; frozen until restart
    MatchOver,
}

/// Playing field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp requested dimensions up to the smallest playable arena.
    /// Returns the arena and whether clamping was needed.
    pub fn clamped(width: f32, height: f32, settings: &MatchSettings) -> (Self, bool) {
        let sanitize = |v: f32, min: f32| if v.is_finite() { v.max(min) } else { min };
        let w = sanitize(width, settings.min_arena_width);
        let h = sanitize(height, settings.min_arena_height);
        (Self::new(w, h), w != width || h != height)
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Serve from arena centre with a random diagonal direction
    pub fn reset(&mut self, arena: &Arena, base_speed: f32, rng: &mut impl RandomSource) {
        self.pos = arena.center();
        let sx = rng.next_sign();
        let sy = rng.next_sign();
        self.vel = Vec2::new(sx, sy) * base_speed;
    }

    pub fn left_edge(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// A paddle; `y` is the top edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Gap between the paddle and its wall
    pub offset: f32,
    pub speed: f32,
    /// Vertical delta applied on the last tick (after clamping)
    pub vel: f32,
}

impl Paddle {
    /// Paddle vertically centred in the arena
    pub fn centered(side: Side, arena: &Arena, settings: &MatchSettings) -> Self {
        Self {
            side,
            y: (arena.height - settings.paddle_height) / 2.0,
            width: settings.paddle_width,
            height: settings.paddle_height,
            offset: settings.paddle_offset,
            speed: settings.paddle_speed,
            vel: 0.0,
        }
    }

    /// Left edge x of the paddle rectangle
    pub fn x(&self, arena: &Arena) -> f32 {
        match self.side {
            Side::Left => self.offset,
            Side::Right => arena.width - self.width - self.offset,
        }
    }

    /// The face the ball strikes
    pub fn front_x(&self, arena: &Arena) -> f32 {
        match self.side {
            Side::Left => self.offset + self.width,
            Side::Right => arena.width - self.width - self.offset,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn max_y(&self, arena: &Arena) -> f32 {
        (arena.height - self.height).max(0.0)
    }

    /// Move by `delta`, keep inside `[0, H - height]`, record the applied delta
    pub fn apply(&mut self, delta: f32, arena: &Arena) {
        let before = self.y;
        self.y += delta;
        self.clamp(arena);
        self.vel = self.y - before;
    }

    pub fn clamp(&mut self, arena: &Arena) {
        self.y = self.y.clamp(0.0, self.max_y(arena));
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    WallBounce,
    PaddleHit { side: Side },
    PointScored { side: Side },
    MatchWon { winner: Side },
}
