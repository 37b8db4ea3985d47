//! Data-driven game balance
//!
//! Every gameplay constant lives here so it can be overridden with a JSON
//! document. Missing fields fall back to the defaults below, so an override
//! only needs to name the values it changes.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_THROWS;

/// Bag flight physics (units are pixels and ticks)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Fraction of vertical speed kept (and reversed) on ground contact
    pub bounce: f32,
    /// Horizontal velocity multiplier on ground contact
    pub friction: f32,
    /// Vertical speed below which a bouncing bag is considered at rest
    pub rest_threshold: f32,
    /// Velocity added per pointer move while steering
    pub steer_influence: f32,
    /// Speed cap applied after steering
    pub max_speed: f32,
    /// Launch speed at power 1.0
    pub launch_speed: f32,
    /// Forward-simulation cap for landing prediction
    pub prediction_ticks: u32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            bounce: 0.3,
            friction: 0.95,
            rest_threshold: 1.0,
            steer_influence: 0.1,
            max_speed: 20.0,
            launch_speed: 15.0,
            prediction_ticks: 100,
        }
    }
}

/// Pointer-to-throw mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    pub min_angle: f32,
    pub max_angle: f32,
    pub min_power: f32,
    pub max_power: f32,
    /// Pointer distance (pixels) that maps to power 1.0
    pub power_distance: f32,
    pub default_angle: f32,
    pub default_power: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            min_angle: 0.1,
            max_angle: 1.4,
            min_power: 0.4,
            max_power: 1.2,
            power_distance: 300.0,
            default_angle: 0.8,
            default_power: 0.8,
        }
    }
}

/// Hole and board landing rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub hole_points: u32,
    pub board_points: u32,
    /// Vertical band around the hole centre that counts as "in"
    pub hole_band: f32,
    /// Bags rising faster than this (vy below it) skip the hole
    pub hole_min_vy: f32,
    /// Landing window above the surface
    pub board_above: f32,
    /// Landing window below the surface
    pub board_below: f32,
    /// Bags rising faster than this (vy below it) skip the board
    pub board_min_vy: f32,
    /// Extra clearance around the hole where board landings are refused
    pub hole_clearance: f32,
    /// Prior bags closer than this push the new bag aside
    pub nudge_radius: f32,
    /// Distance a nudged bag ends up from the bag it hit
    pub nudge_distance: f32,
    /// Horizontal velocity kept when a bag lands on the board
    pub board_slide_damping: f32,
    /// Surface tolerance for bags that ride along with a moving board
    pub carry_tolerance: f32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            hole_points: 3,
            board_points: 1,
            hole_band: 20.0,
            hole_min_vy: -2.0,
            board_above: 20.0,
            board_below: 15.0,
            board_min_vy: -1.0,
            hole_clearance: 5.0,
            nudge_radius: 15.0,
            nudge_distance: 20.0,
            board_slide_damping: 0.7,
            carry_tolerance: 25.0,
        }
    }
}

/// Board geometry and relocation bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardTuning {
    /// Board position at the start of every game
    pub home: Vec2,
    pub width: f32,
    pub height: f32,
    /// Hole position as a fraction of the width from the left edge
    pub hole_fraction: f32,
    pub hole_radius: f32,
    /// Left edge of the surface sits this far below the board y
    pub left_drop: f32,
    /// Right edge of the surface sits this far above the board y
    pub right_rise: f32,
    /// The hole centre sits this far above the surface line
    pub hole_depth: f32,
    /// Relocation range (inclusive) for moving boards
    pub relocate_min: Vec2,
    pub relocate_max: Vec2,
}

impl Default for BoardTuning {
    fn default() -> Self {
        Self {
            home: Vec2::new(500.0, 480.0),
            width: 200.0,
            height: 100.0,
            hole_fraction: 0.75,
            hole_radius: 18.0,
            left_drop: 20.0,
            right_rise: 40.0,
            hole_depth: 10.0,
            relocate_min: Vec2::new(400.0, 420.0),
            relocate_max: Vec2::new(600.0, 520.0),
        }
    }
}

/// Extreme-mode wind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindTuning {
    pub min_strength: f32,
    pub max_strength: f32,
    /// Horizontal impulse per tick at full strength
    pub x_scale: f32,
    /// Vertical impulse per tick at full strength
    pub y_scale: f32,
}

impl Default for WindTuning {
    fn default() -> Self {
        Self {
            min_strength: 0.2,
            max_strength: 1.0,
            x_scale: 0.3,
            y_scale: 0.15,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub aim: AimTuning,
    pub scoring: ScoringTuning,
    pub board: BoardTuning,
    pub wind: WindTuning,
    /// Throws per game (1..=7)
    pub throws_per_game: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            aim: AimTuning::default(),
            scoring: ScoringTuning::default(),
            board: BoardTuning::default(),
            wind: WindTuning::default(),
            throws_per_game: MAX_THROWS,
        }
    }
}

/// Errors from loading a tuning override
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for this schema
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy as an override template)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges that the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn ordered(name: &str, lo: f32, hi: f32) -> Result<(), TuningError> {
            if lo <= hi {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{} range is inverted ({} > {})", name, lo, hi)))
            }
        }

        if self.throws_per_game == 0 || self.throws_per_game > MAX_THROWS {
            return Err(TuningError::Invalid(format!(
                "throws_per_game must be 1..={}, got {}",
                MAX_THROWS, self.throws_per_game
            )));
        }
        ordered("aim angle", self.aim.min_angle, self.aim.max_angle)?;
        ordered("aim power", self.aim.min_power, self.aim.max_power)?;
        ordered("wind strength", self.wind.min_strength, self.wind.max_strength)?;
        ordered("board x", self.board.relocate_min.x, self.board.relocate_max.x)?;
        ordered("board y", self.board.relocate_min.y, self.board.relocate_max.y)?;

        if self.aim.power_distance <= 0.0 {
            return Err(TuningError::Invalid("aim.power_distance must be positive".into()));
        }
        if self.board.width <= 0.0 {
            return Err(TuningError::Invalid("board.width must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.board.hole_fraction) {
            return Err(TuningError::Invalid("board.hole_fraction must be within 0..=1".into()));
        }
        if self.physics.max_speed <= 0.0 {
            return Err(TuningError::Invalid("physics.max_speed must be positive".into()));
        }
        Ok(())
    }

    /// Load the override embedded in the page (WASM only)
    ///
    /// Looks for `<script id="tuning" type="application/json">`.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override from page");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring tuning override: {}", e),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load an override file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| TuningError::Invalid(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
