//! Game state and core simulation types
//!
//! Everything the session mutates lives in [`GameState`]; resolver and tick
//! functions take it by reference instead of reaching for globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::projectile::Projectile;
use super::wind::Wind;
use crate::consts::*;
use crate::tuning::{AimTuning, ScoringTuning, Tuning};
use crate::ui::Button;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with Play / Rules
    Menu,
    /// Choosing Easy / Medium / Hard / Extreme
    DifficultySelect,
    /// Rules screen
    Instructions,
    /// Pointer sets angle and power, click throws
    Aiming,
    /// A bag is in flight
    Throwing,
    /// Throw budget exhausted
    GameOver,
}

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    /// Aiming arc preview is an Easy-only aid
    pub fn shows_aim_arc(&self) -> bool {
        matches!(self, Difficulty::Easy)
    }

    /// Board jumps to a new spot after each throw
    pub fn moves_board(&self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Extreme)
    }

    /// Wind pushes bags in flight
    pub fn has_wind(&self) -> bool {
        matches!(self, Difficulty::Extreme)
    }
}

/// How a throw ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOutcome {
    Hole,
    Board,
    Miss,
}

impl ScoreOutcome {
    pub fn points(&self, scoring: &ScoringTuning) -> u32 {
        match self {
            ScoreOutcome::Hole => scoring.hole_points,
            ScoreOutcome::Board => scoring.board_points,
            ScoreOutcome::Miss => 0,
        }
    }
}

/// Angle/power pair derived from the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimParameters {
    /// Radians above horizontal
    pub angle: f32,
    /// Launch speed multiplier
    pub power: f32,
}

impl AimParameters {
    pub fn new(tuning: &AimTuning) -> Self {
        Self {
            angle: tuning.default_angle,
            power: tuning.default_power,
        }
    }

    /// Re-aim from a pointer position
    ///
    /// Aiming is forward-only: a pointer at or behind the origin leaves the
    /// last valid aim untouched. Returns whether the aim changed.
    pub fn update_from_pointer(&mut self, origin: Vec2, pointer: Vec2, tuning: &AimTuning) -> bool {
        let dx = pointer.x - origin.x;
        let dy = origin.y - pointer.y; // Screen y is flipped

        if dx <= 0.0 {
            return false;
        }

        self.angle = dy.atan2(dx).clamp(tuning.min_angle, tuning.max_angle);
        let distance = (dx * dx + dy * dy).sqrt();
        self.power = (distance / tuning.power_distance).clamp(tuning.min_power, tuning.max_power);
        true
    }
}

/// A bag that has finished its throw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandedBag {
    pub pos: Vec2,
    pub outcome: ScoreOutcome,
    /// Tick the throw resolved on
    pub landed_tick: u64,
}

impl LandedBag {
    pub fn new(pos: Vec2, outcome: ScoreOutcome, landed_tick: u64) -> Self {
        Self {
            pos,
            outcome,
            landed_tick,
        }
    }

    /// Ticks since landing
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.landed_tick)
    }

    /// Still glowing from its score
    pub fn is_glowing(&self, now: u64) -> bool {
        self.age(now) < GLOW_TICKS
    }
}

/// Notable things that happened, drained by the host for logging/effects
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    GameStarted { difficulty: Difficulty },
    ThrowReleased { angle: f32, power: f32, throws_remaining: u8 },
    ThrowResolved { outcome: ScoreOutcome, points: u32, at: Vec2 },
    BoardMoved { from: Vec2, to: Vec2, carried: usize },
    WindChanged { direction: f32, strength: f32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub throws_remaining: u8,
    pub aim: AimParameters,
    /// Last reported pointer position
    pub pointer: Vec2,
    /// Pointer steers the bag in flight
    pub steering: bool,
    /// At most one bag in flight
    pub projectile: Option<Projectile>,
    pub landed: Vec<LandedBag>,
    pub board: Board,
    pub wind: Wind,
    /// Menu button under the pointer
    pub hovered: Option<Button>,
    /// Menu pulse animation clock
    pub button_anim: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session on the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let wind = Wind::generate(&mut rng, &tuning.wind);

        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            difficulty: Difficulty::Easy,
            score: 0,
            throws_remaining: tuning.throws_per_game,
            aim: AimParameters::new(&tuning.aim),
            pointer: Vec2::ZERO,
            steering: false,
            projectile: None,
            landed: Vec::new(),
            board: Board::new(&tuning.board),
            wind,
            hovered: None,
            button_anim: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Move to a new phase, recording the transition
    ///
    /// Hover belongs to the screen being left, so it is cleared.
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.hovered = None;
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
            self.phase = phase;
        }
    }

    /// Reset everything a new game needs and start aiming
    pub fn start_game(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.score = 0;
        self.throws_remaining = self.tuning.throws_per_game;
        self.projectile = None;
        self.landed.clear();
        self.steering = false;
        self.aim = AimParameters::new(&self.tuning.aim);
        self.board = Board::new(&self.tuning.board);
        self.wind = Wind::calm();
        if difficulty.has_wind() {
            self.regenerate_wind();
        }

        log::info!("Starting {} game", difficulty.as_str());
        self.events.push(GameEvent::GameStarted { difficulty });
        self.set_phase(GamePhase::Aiming);
    }

    /// Roll a new wind for the next throw
    pub fn regenerate_wind(&mut self) {
        self.wind = Wind::generate(&mut self.rng, &self.tuning.wind);
        log::debug!(
            "Wind now {} at {}%",
            self.wind.compass_label(),
            self.wind.strength_percent()
        );
        self.events.push(GameEvent::WindChanged {
            direction: self.wind.direction,
            strength: self.wind.strength,
        });
    }

    /// Score for landing every throw in the hole
    pub fn perfect_score(&self) -> u32 {
        self.tuning.throws_per_game as u32 * self.tuning.scoring.hole_points
    }

    pub fn is_perfect(&self) -> bool {
        self.phase == GamePhase::GameOver && self.score == self.perfect_score()
    }

    /// Throws already taken this game
    pub fn throws_taken(&self) -> u8 {
        self.tuning.throws_per_game - self.throws_remaining
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session_on_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.throws_remaining, 7);
        assert!(state.projectile.is_none());
        assert!(state.landed.is_empty());
    }

    #[test]
    fn test_aim_scenario() {
        let tuning = AimTuning::default();
        let mut aim = AimParameters::new(&tuning);
        assert!(aim.update_from_pointer(THROW_ORIGIN, Vec2::new(400.0, 300.0), &tuning));
        assert!((aim.angle - 0.588).abs() < 0.001, "angle = {}", aim.angle);
        assert_eq!(aim.power, 1.2);
    }

    #[test]
    fn test_aim_is_forward_only() {
        let tuning = AimTuning::default();
        let mut aim = AimParameters::new(&tuning);
        aim.update_from_pointer(THROW_ORIGIN, Vec2::new(300.0, 400.0), &tuning);
        let before = aim;

        assert!(!aim.update_from_pointer(THROW_ORIGIN, Vec2::new(100.0, 200.0), &tuning));
        assert!(!aim.update_from_pointer(THROW_ORIGIN, Vec2::new(20.0, 450.0), &tuning));
        assert_eq!(aim, before);
    }

    #[test]
    fn test_start_game_resets() {
        let mut state = GameState::new(9);
        state.score = 12;
        state.throws_remaining = 2;
        state.landed.push(LandedBag::new(Vec2::new(1.0, 2.0), ScoreOutcome::Miss, 0));
        state.board.move_to(Vec2::new(420.0, 500.0));
        state.aim.angle = 1.3;

        state.start_game(Difficulty::Hard);

        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.score, 0);
        assert_eq!(state.throws_remaining, 7);
        assert!(state.landed.is_empty());
        assert_eq!(state.board.pos, Vec2::new(500.0, 480.0));
        assert_eq!(state.aim.angle, 0.8);
        assert!(state.wind.is_calm(), "no wind below Extreme");
    }

    #[test]
    fn test_extreme_rolls_wind() {
        let mut state = GameState::new(9);
        state.start_game(Difficulty::Extreme);
        assert!(!state.wind.is_calm());
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::WindChanged { .. })));
    }

    #[test]
    fn test_difficulty_rules() {
        assert!(Difficulty::Easy.shows_aim_arc());
        assert!(!Difficulty::Medium.shows_aim_arc());
        assert!(!Difficulty::Medium.moves_board());
        assert!(Difficulty::Hard.moves_board());
        assert!(!Difficulty::Hard.has_wind());
        assert!(Difficulty::Extreme.moves_board() && Difficulty::Extreme.has_wind());
    }

    #[test]
    fn test_glow_window() {
        let bag = LandedBag::new(Vec2::ZERO, ScoreOutcome::Hole, 100);
        assert!(bag.is_glowing(100));
        assert!(bag.is_glowing(159));
        assert!(!bag.is_glowing(160));
    }

    #[test]
    fn test_perfect_score() {
        let mut state = GameState::new(3);
        assert_eq!(state.perfect_score(), 21);
        state.phase = GamePhase::GameOver;
        state.score = 21;
        assert!(state.is_perfect());
    }

    proptest! {
        #[test]
        fn prop_aim_always_clamped(px in -200.0f32..1000.0, py in -200.0f32..800.0) {
            let tuning = AimTuning::default();
            let mut aim = AimParameters::new(&tuning);
            let before = aim;
            let changed = aim.update_from_pointer(THROW_ORIGIN, Vec2::new(px, py), &tuning);

            prop_assert!((0.1..=1.4).contains(&aim.angle));
            prop_assert!((0.4..=1.2).contains(&aim.power));
            if px <= THROW_ORIGIN.x {
                prop_assert!(!changed);
                prop_assert_eq!(aim, before);
            }
        }
    }
}
