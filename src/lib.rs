//! Mothershucker - A cornhole bean bag toss arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bag physics, board, scoring, turns)
//! - `renderer`: Draw command generation and the canvas backend
//! - `platform`: Frame loop scheduling
//! - `tuning`: Data-driven game balance
//! - `ui`: Button layout and pointer hit-testing

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Reference drawing space (all geometry is laid out against this)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Distance of the ground line above the bottom edge
    pub const GROUND_MARGIN: f32 = 50.0;
    /// Ground line: bags resting here have missed the board
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_MARGIN;

    /// Where every throw is released from
    pub const THROW_ORIGIN: Vec2 = Vec2::new(100.0, 500.0);

    /// Throws per game; tuning may lower it but never raise it
    pub const MAX_THROWS: u8 = 7;

    /// Ticks a landed bag glows after scoring
    pub const GLOW_TICKS: u64 = 60;
    /// Ticks the "+3" / "+1" / "0" popup stays visible
    pub const POPUP_TICKS: u64 = 30;

    /// Menu button pulse clock advance per tick
    pub const BUTTON_ANIM_STEP: f32 = 0.2;
}

/// Centre of the reference drawing space
#[inline]
pub fn canvas_center() -> Vec2 {
    Vec2::new(consts::CANVAS_WIDTH / 2.0, consts::CANVAS_HEIGHT / 2.0)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert an angle to whole degrees in [0, 360)
#[inline]
pub fn degrees_wrapped(angle: f32) -> f32 {
    angle.to_degrees().rem_euclid(360.0)
}
