//! Environmental wind (Extreme difficulty)
//!
//! A new wind is rolled after every throw. The horizontal and vertical
//! components are scaled differently so wind pushes sideways more than it
//! lifts or drops the bag.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::degrees_wrapped;
use crate::tuning::WindTuning;

/// Current wind
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wind {
    /// Direction in radians, canvas space (0 = east, π/2 = down)
    pub direction: f32,
    /// Strength in [min_strength, max_strength]
    pub strength: f32,
    /// Per-tick impulse applied to a bag in flight
    pub force: Vec2,
}

impl Wind {
    /// No wind
    pub fn calm() -> Self {
        Self::default()
    }

    /// Wind from an explicit direction and strength
    pub fn new(direction: f32, strength: f32, tuning: &WindTuning) -> Self {
        Self {
            direction,
            strength,
            force: Vec2::new(
                direction.cos() * strength * tuning.x_scale,
                direction.sin() * strength * tuning.y_scale,
            ),
        }
    }

    /// Roll a random wind
    pub fn generate<R: Rng>(rng: &mut R, tuning: &WindTuning) -> Self {
        let strength = rng.random_range(tuning.min_strength..=tuning.max_strength);
        let direction = rng.random_range(0.0..TAU);
        Self::new(direction, strength, tuning)
    }

    pub fn is_calm(&self) -> bool {
        self.strength == 0.0
    }

    /// Strength as a whole percentage
    pub fn strength_percent(&self) -> u32 {
        (self.strength * 100.0).round() as u32
    }

    /// Compass label for the direction the wind blows toward
    ///
    /// Canvas y grows downward, so 90° is south.
    pub fn compass_label(&self) -> &'static str {
        let degrees = degrees_wrapped(self.direction);
        match degrees {
            d if !(22.5..337.5).contains(&d) => "E →",
            d if d < 67.5 => "SE ↘",
            d if d < 112.5 => "S ↓",
            d if d < 157.5 => "SW ↙",
            d if d < 202.5 => "W ←",
            d if d < 247.5 => "NW ↖",
            d if d < 292.5 => "N ↑",
            _ => "NE ↗",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_components() {
        let tuning = WindTuning::default();
        let wind = Wind::new(0.0, 1.0, &tuning);
        assert!((wind.force.x - 0.3).abs() < 1e-6);
        assert!(wind.force.y.abs() < 1e-6);

        let wind = Wind::new(FRAC_PI_2, 0.5, &tuning);
        assert!(wind.force.x.abs() < 1e-6);
        assert!((wind.force.y - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_generate_in_range() {
        let tuning = WindTuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let wind = Wind::generate(&mut rng, &tuning);
            assert!((0.2..=1.0).contains(&wind.strength));
            assert!((0.0..TAU).contains(&wind.direction));
            assert!(wind.force.x.abs() <= 0.3 + 1e-6);
            assert!(wind.force.y.abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn test_calm() {
        let wind = Wind::calm();
        assert!(wind.is_calm());
        assert_eq!(wind.force, Vec2::ZERO);
    }

    #[test]
    fn test_compass_labels() {
        let tuning = WindTuning::default();
        let label = |deg: f32| Wind::new(deg.to_radians(), 0.5, &tuning).compass_label();
        assert_eq!(label(0.0), "E →");
        assert_eq!(label(350.0), "E →");
        assert_eq!(label(45.0), "SE ↘");
        assert_eq!(label(90.0), "S ↓");
        assert_eq!(label(180.0), "W ←");
        assert_eq!(label(270.0), "N ↑");
        assert_eq!(label(315.0), "NE ↗");
        assert_eq!(Wind::new(-PI / 2.0, 0.5, &tuning).compass_label(), "N ↑");
    }

    #[test]
    fn test_strength_percent() {
        let wind = Wind::new(0.0, 0.456, &WindTuning::default());
        assert_eq!(wind.strength_percent(), 46);
    }
}
