//! Bag-toss board geometry
//!
//! Side view of an inclined board: the left edge of the playing surface sits
//! `left_drop` below the board's y, the right edge `right_rise` above it, and
//! the surface height in between is a straight line. The hole is a fixed
//! fraction of the width from the left edge.

use glam::Vec2;
use rand::Rng;

use super::state::LandedBag;
use crate::lerp;
use crate::tuning::BoardTuning;

/// The target board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Left edge x and reference y
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Absolute x of the hole centre (always `pos.x + hole_fraction * width`)
    pub hole_x: f32,
    pub hole_radius: f32,
    hole_fraction: f32,
    left_drop: f32,
    right_rise: f32,
    hole_depth: f32,
}

/// Outcome of a relocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relocation {
    pub from: Vec2,
    pub to: Vec2,
    /// Number of landed bags that moved with the board
    pub carried: usize,
}

impl Board {
    /// Board at its home position
    pub fn new(tuning: &BoardTuning) -> Self {
        let mut board = Self {
            pos: tuning.home,
            width: tuning.width,
            height: tuning.height,
            hole_x: 0.0,
            hole_radius: tuning.hole_radius,
            hole_fraction: tuning.hole_fraction,
            left_drop: tuning.left_drop,
            right_rise: tuning.right_rise,
            hole_depth: tuning.hole_depth,
        };
        board.move_to(tuning.home);
        board
    }

    /// Place the board, keeping the hole at its fixed fraction
    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.hole_x = pos.x + self.width * self.hole_fraction;
    }

    /// Surface y at the left edge (lower end)
    #[inline]
    pub fn left_surface_y(&self) -> f32 {
        self.pos.y + self.left_drop
    }

    /// Surface y at the right edge (raised end)
    #[inline]
    pub fn right_surface_y(&self) -> f32 {
        self.pos.y - self.right_rise
    }

    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Interpolated surface height at `x`
    ///
    /// Extrapolates past the edges; callers test [`Board::spans`] first.
    pub fn surface_y_at(&self, x: f32) -> f32 {
        let progress = (x - self.pos.x) / self.width;
        lerp(self.left_surface_y(), self.right_surface_y(), progress)
    }

    /// Hole centre (slightly above the surface line)
    pub fn hole_center(&self) -> Vec2 {
        Vec2::new(self.hole_x, self.surface_y_at(self.hole_x) - self.hole_depth)
    }

    /// Whether `x` lies within the board's horizontal extent
    pub fn spans(&self, x: f32) -> bool {
        x >= self.pos.x && x <= self.right()
    }

    /// Whether a point sits on the surface within `tolerance`
    pub fn is_resting_on(&self, point: Vec2, tolerance: f32) -> bool {
        self.spans(point.x) && (point.y - self.surface_y_at(point.x)).abs() < tolerance
    }

    /// Surface tilt angle in radians (negative: rising to the right)
    pub fn tilt(&self) -> f32 {
        (self.right_surface_y() - self.left_surface_y()).atan2(self.width)
    }

    /// Random position within the relocation bounds
    pub fn random_position<R: Rng>(rng: &mut R, tuning: &BoardTuning) -> Vec2 {
        Vec2::new(
            rng.random_range(tuning.relocate_min.x..=tuning.relocate_max.x),
            rng.random_range(tuning.relocate_min.y..=tuning.relocate_max.y),
        )
    }

    /// Move the board and carry every bag resting on it
    ///
    /// A bag rides along if it sat on the old surface within
    /// `carry_tolerance`; it is shifted by the board's delta and then
    /// settled onto the new surface.
    pub fn relocate(&mut self, to: Vec2, bags: &mut [LandedBag], carry_tolerance: f32) -> Relocation {
        let previous = self.clone();
        self.move_to(to);
        let delta = to - previous.pos;

        let mut carried = 0;
        for bag in bags.iter_mut() {
            if previous.is_resting_on(bag.pos, carry_tolerance) {
                bag.pos += delta;
                bag.pos.y = self.surface_y_at(bag.pos.x);
                carried += 1;
            }
        }

        Relocation {
            from: previous.pos,
            to,
            carried,
        }
    }
}
