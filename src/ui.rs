//! Menu button layout and pointer hit-testing
//!
//! Layouts are fixed in the 800×600 drawing space. The scene builder draws
//! from the same rectangles the click handler tests against.

use glam::Vec2;

use crate::canvas_center;
use crate::sim::state::{Difficulty, GamePhase};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive on all four edges
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Clickable menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Rules,
    Level(Difficulty),
    Back,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Play => "PLAY",
            Button::Rules => "RULES",
            Button::Level(d) => d.as_str(),
            Button::Back => "Back",
        }
    }
}

const MENU_BUTTONS: [(Button, Rect); 2] = [
    (Button::Play, Rect::new(60.0, 440.0, 100.0, 40.0)),
    (Button::Rules, Rect::new(60.0, 490.0, 100.0, 40.0)),
];

/// Buttons on the difficulty screen
pub fn difficulty_buttons() -> Vec<(Button, Rect)> {
    let c = canvas_center();
    let offsets = [-220.0, -120.0, -20.0, 80.0];

    let mut buttons: Vec<(Button, Rect)> = Difficulty::ALL
        .iter()
        .zip(offsets)
        .map(|(&level, dx)| (Button::Level(level), Rect::new(c.x + dx, c.y + 20.0, 90.0, 40.0)))
        .collect();
    buttons.push((Button::Back, Rect::new(c.x - 50.0, c.y + 100.0, 100.0, 40.0)));
    buttons
}

/// Back button on the rules screen
pub fn instructions_back() -> Rect {
    let c = canvas_center();
    Rect::new(c.x - 50.0, c.y + 220.0, 100.0, 40.0)
}

/// Every button shown in a phase
pub fn buttons_for(phase: GamePhase) -> Vec<(Button, Rect)> {
    match phase {
        GamePhase::Menu => MENU_BUTTONS.to_vec(),
        GamePhase::DifficultySelect => difficulty_buttons(),
        GamePhase::Instructions => vec![(Button::Back, instructions_back())],
        GamePhase::Aiming | GamePhase::Throwing | GamePhase::GameOver => Vec::new(),
    }
}

/// Button under `point` in the given phase
pub fn hit_test(phase: GamePhase, point: Vec2) -> Option<Button> {
    buttons_for(phase)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(button, _)| button)
}
