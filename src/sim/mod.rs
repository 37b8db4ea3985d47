//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (one integration step per frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod board;
pub mod collision;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wind;

pub use board::{Board, Relocation};
pub use projectile::Projectile;
pub use state::{AimParameters, Difficulty, GameEvent, GamePhase, GameState, LandedBag, ScoreOutcome};
pub use tick::{FlightPreview, InputEvent, apply_input, flight_preview, throw_bag, tick};
pub use wind::Wind;
