//! Bean bag flight physics
//!
//! Fixed-tick integration in canvas space (y grows downward). Wind is an
//! impulse added to velocity every tick, not a force scaled by time.

use glam::Vec2;

use super::state::ScoreOutcome;
use crate::tuning::PhysicsTuning;

/// The single bag currently in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-tick wind impulse captured at release
    pub wind: Vec2,
    /// Set by the collision resolver when the throw ends
    pub outcome: Option<ScoreOutcome>,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            wind: Vec2::ZERO,
            outcome: None,
        }
    }

    /// Release a bag from `origin` with the given aim
    ///
    /// Negative vertical velocity is upward on screen.
    pub fn launch(origin: Vec2, angle: f32, power: f32, launch_speed: f32) -> Self {
        let speed = power * launch_speed;
        Self::new(origin, Vec2::new(angle.cos() * speed, -angle.sin() * speed))
    }

    pub fn with_wind(mut self, wind: Vec2) -> Self {
        self.wind = wind;
        self
    }

    /// Advance one tick
    pub fn integrate(&mut self, physics: &PhysicsTuning, ground_y: f32) {
        self.vel += self.wind;
        self.pos += self.vel;
        self.vel.y += physics.gravity;

        if self.pos.y >= ground_y {
            self.pos.y = ground_y;
            self.vel.y *= -physics.bounce;
            self.vel.x *= physics.friction;

            // Stop micro-bouncing
            if self.vel.y.abs() < physics.rest_threshold {
                self.vel.y = 0.0;
            }
        }
    }

    /// Nudge velocity toward the pointer (mid-flight steering)
    pub fn adjust_trajectory(&mut self, target: Vec2, physics: &PhysicsTuning) {
        let Some(dir) = (target - self.pos).try_normalize() else {
            return;
        };

        self.vel += dir * physics.steer_influence;

        let speed = self.vel.length();
        if speed > physics.max_speed {
            self.vel = self.vel / speed * physics.max_speed;
        }
    }

    /// Forward-simulate to the first ground crossing
    ///
    /// Uses the same integration as [`Projectile::integrate`] but ignores
    /// steering and bounces. Returns `None` if the bag is still airborne
    /// after `prediction_ticks`.
    pub fn predict_landing(&self, physics: &PhysicsTuning, ground_y: f32) -> Option<Vec2> {
        let mut pos = self.pos;
        let mut vel = self.vel;

        for _ in 0..physics.prediction_ticks {
            vel += self.wind;
            pos += vel;
            vel.y += physics.gravity;

            if pos.y >= ground_y {
                return Some(Vec2::new(pos.x, ground_y));
            }
        }

        None
    }

    /// Whether the bag is sitting on the ground with no vertical motion
    pub fn is_resting(&self, ground_y: f32) -> bool {
        self.pos.y >= ground_y && self.vel.y == 0.0
    }
}
