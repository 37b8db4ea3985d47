//! Landing detection and scoring response
//!
//! Checked every tick while a bag is in flight, in strict priority order:
//! hole, then board, then ground. The first test that passes ends the throw
//! and leaves the projectile at its resting spot with `outcome` set.

use glam::Vec2;

use super::board::Board;
use super::projectile::Projectile;
use super::state::{LandedBag, ScoreOutcome};
use crate::tuning::{ScoringTuning, Tuning};

/// Whether the bag drops into the hole this tick
pub fn check_hole(bag: &Projectile, board: &Board, scoring: &ScoringTuning) -> bool {
    let hole = board.hole_center();
    bag.pos.distance(hole) <= board.hole_radius
        && (bag.pos.y - hole.y).abs() <= scoring.hole_band
        && bag.vel.y > scoring.hole_min_vy
}

/// Whether the bag settles on the board surface this tick
///
/// Landings too close to the hole are refused so a bag skimming the rim can
/// still fall in on a later tick.
pub fn check_board(bag: &Projectile, board: &Board, scoring: &ScoringTuning) -> bool {
    if !board.spans(bag.pos.x) {
        return false;
    }

    let surface = board.surface_y_at(bag.pos.x);
    let in_window = bag.pos.y >= surface - scoring.board_above && bag.pos.y <= surface + scoring.board_below;
    if !in_window || bag.vel.y <= scoring.board_min_vy {
        return false;
    }

    bag.pos.distance(board.hole_center()) > board.hole_radius + scoring.hole_clearance
}

/// Whether the bag has reached the ground line
#[inline]
pub fn check_ground(bag: &Projectile, ground_y: f32) -> bool {
    bag.pos.y >= ground_y
}

/// Push a landing bag away from the first resting bag it overlaps
///
/// Any bag lying on the surface counts, whatever it scored; bags carried
/// there by a board move push just like board landings. The bag is placed
/// `nudge_distance` from the one it hit, along the line between them, and
/// never below the surface at its new x. Returns whether a nudge happened.
pub fn nudge_from_neighbours(
    bag: &mut Projectile,
    board: &Board,
    landed: &[LandedBag],
    scoring: &ScoringTuning,
) -> bool {
    let neighbour = landed
        .iter()
        .filter(|other| board.is_resting_on(other.pos, scoring.carry_tolerance))
        .find(|other| bag.pos.distance(other.pos) < scoring.nudge_radius);

    let Some(other) = neighbour else {
        return false;
    };

    let away = bag.pos - other.pos;
    let angle = away.y.atan2(away.x);
    bag.pos = other.pos + Vec2::from_angle(angle) * scoring.nudge_distance;
    bag.pos.y = bag.pos.y.min(board.surface_y_at(bag.pos.x));
    true
}

/// Run the landing tests and apply the winning response
///
/// Returns the outcome if the throw ended this tick.
pub fn resolve(
    bag: &mut Projectile,
    board: &Board,
    landed: &[LandedBag],
    tuning: &Tuning,
    ground_y: f32,
) -> Option<ScoreOutcome> {
    let scoring = &tuning.scoring;

    let outcome = if check_hole(bag, board, scoring) {
        bag.pos = board.hole_center();
        bag.vel = Vec2::ZERO;
        ScoreOutcome::Hole
    } else if check_board(bag, board, scoring) {
        nudge_from_neighbours(bag, board, landed, scoring);
        bag.pos.y = board.surface_y_at(bag.pos.x);
        bag.vel.x *= scoring.board_slide_damping;
        bag.vel.y = 0.0;
        ScoreOutcome::Board
    } else if check_ground(bag, ground_y) {
        ScoreOutcome::Miss
    } else {
        return None;
    };

    bag.outcome = Some(outcome);
    Some(outcome)
}
