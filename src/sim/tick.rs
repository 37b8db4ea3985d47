//! Turn machine and fixed tick
//!
//! Pointer events are applied synchronously through [`apply_input`]; the
//! host calls [`tick`] once per display frame.

use glam::Vec2;

use super::board::Board;
use super::collision;
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState, LandedBag};
use crate::consts::*;
use crate::ui::{self, Button};

/// Pointer input in drawing-space coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    Clicked,
}

/// Apply one input event to the session
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::PointerMoved(pos) => pointer_moved(state, pos),
        InputEvent::Clicked => clicked(state),
    }
}

fn pointer_moved(state: &mut GameState, pos: Vec2) {
    state.pointer = pos;

    match state.phase {
        GamePhase::Aiming => {
            state.aim.update_from_pointer(THROW_ORIGIN, pos, &state.tuning.aim);
        }
        GamePhase::Throwing if state.steering => {
            if let Some(bag) = state.projectile.as_mut() {
                bag.adjust_trajectory(pos, &state.tuning.physics);
            }
        }
        GamePhase::Menu => {
            state.hovered = ui::hit_test(GamePhase::Menu, pos);
        }
        _ => {}
    }
}

fn clicked(state: &mut GameState) {
    let button = ui::hit_test(state.phase, state.pointer);

    match (state.phase, button) {
        (GamePhase::Menu, Some(Button::Play)) => state.set_phase(GamePhase::DifficultySelect),
        (GamePhase::Menu, Some(Button::Rules)) => state.set_phase(GamePhase::Instructions),
        (GamePhase::DifficultySelect, Some(Button::Level(level))) => state.start_game(level),
        (GamePhase::DifficultySelect | GamePhase::Instructions, Some(Button::Back)) => {
            state.set_phase(GamePhase::Menu)
        }
        (GamePhase::Aiming, _) => {
            throw_bag(state);
        }
        (GamePhase::GameOver, _) => state.set_phase(GamePhase::Menu),
        // Clicks mid-flight and off-button clicks do nothing
        _ => {}
    }
}

/// Release a bag with the current aim
///
/// Returns `false` if no throws remain or a bag is already in flight.
pub fn throw_bag(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Aiming || state.throws_remaining == 0 || state.projectile.is_some() {
        return false;
    }

    let physics = &state.tuning.physics;
    let mut bag = Projectile::launch(THROW_ORIGIN, state.aim.angle, state.aim.power, physics.launch_speed);

    if state.difficulty.has_wind() {
        bag = bag.with_wind(state.wind.force);
        // The next throw gets a fresh wind
        state.regenerate_wind();
    }

    state.projectile = Some(bag);
    state.throws_remaining -= 1;
    state.steering = true;

    log::info!(
        "Throw {} released: angle {:.0}°, power {:.0}%",
        state.throws_taken(),
        state.aim.angle.to_degrees(),
        state.aim.power * 100.0
    );
    state.events.push(GameEvent::ThrowReleased {
        angle: state.aim.angle,
        power: state.aim.power,
        throws_remaining: state.throws_remaining,
    });
    state.set_phase(GamePhase::Throwing);
    true
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    if state.phase == GamePhase::Menu {
        state.button_anim += BUTTON_ANIM_STEP;
    }

    if state.phase != GamePhase::Throwing {
        return;
    }

    let Some(mut bag) = state.projectile.take() else {
        return;
    };

    bag.integrate(&state.tuning.physics, GROUND_Y);

    match collision::resolve(&mut bag, &state.board, &state.landed, &state.tuning, GROUND_Y) {
        Some(_) => finalize(state, bag),
        None => state.projectile = Some(bag),
    }
}

/// Score a resolved throw and move on to the next turn
fn finalize(state: &mut GameState, bag: Projectile) {
    let Some(outcome) = bag.outcome else {
        return;
    };

    let points = outcome.points(&state.tuning.scoring);
    state.score += points;
    state.landed.push(LandedBag::new(bag.pos, outcome, state.time_ticks));
    state.steering = false;

    log::info!(
        "Throw {} landed: {:?} (+{}), score {}",
        state.throws_taken(),
        outcome,
        points,
        state.score
    );
    state.events.push(GameEvent::ThrowResolved {
        outcome,
        points,
        at: bag.pos,
    });

    if state.difficulty.moves_board() {
        let to = Board::random_position(&mut state.rng, &state.tuning.board);
        let moved = state
            .board
            .relocate(to, &mut state.landed, state.tuning.scoring.carry_tolerance);
        log::info!(
            "Board moved to ({:.0}, {:.0}), {} bag(s) carried",
            moved.to.x,
            moved.to.y,
            moved.carried
        );
        state.events.push(GameEvent::BoardMoved {
            from: moved.from,
            to: moved.to,
            carried: moved.carried,
        });
    }

    if state.throws_remaining == 0 {
        log::info!("Game over: final score {}", state.score);
        state.set_phase(GamePhase::GameOver);
    } else {
        state.set_phase(GamePhase::Aiming);
    }
}

/// Where the bag in flight is headed, and whether that is the hole
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPreview {
    pub landing: Vec2,
    pub over_hole: bool,
}

/// Landing preview for the bag being steered
pub fn flight_preview(state: &GameState) -> Option<FlightPreview> {
    if !state.steering {
        return None;
    }
    let bag = state.projectile.as_ref()?;
    let landing = bag.predict_landing(&state.tuning.physics, GROUND_Y)?;
    Some(FlightPreview {
        landing,
        over_hole: (landing.x - state.board.hole_x).abs() <= state.board.hole_radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Difficulty, ScoreOutcome};
    use crate::ui::difficulty_buttons;

    fn click_at(state: &mut GameState, pos: Vec2) {
        apply_input(state, InputEvent::PointerMoved(pos));
        apply_input(state, InputEvent::Clicked);
    }

    fn level_center(level: Difficulty) -> Vec2 {
        difficulty_buttons()
            .into_iter()
            .find(|(b, _)| *b == Button::Level(level))
            .map(|(_, r)| r.center())
            .unwrap()
    }

    fn start(seed: u64, level: Difficulty) -> GameState {
        let mut state = GameState::new(seed);
        click_at(&mut state, Vec2::new(100.0, 460.0));
        click_at(&mut state, level_center(level));
        state
    }

    /// Tick until the bag in flight resolves
    fn run_throw(state: &mut GameState) {
        for _ in 0..2000 {
            if state.phase != GamePhase::Throwing {
                return;
            }
            tick(state);
        }
        panic!("throw never resolved");
    }

    #[test]
    fn test_menu_navigation() {
        let mut state = GameState::new(1);

        click_at(&mut state, Vec2::new(100.0, 460.0));
        assert_eq!(state.phase, GamePhase::DifficultySelect);

        click_at(&mut state, Vec2::new(400.0, 420.0));
        assert_eq!(state.phase, GamePhase::Menu);

        click_at(&mut state, Vec2::new(100.0, 510.0));
        assert_eq!(state.phase, GamePhase::Instructions);

        // Off-button click does nothing
        click_at(&mut state, Vec2::new(10.0, 10.0));
        assert_eq!(state.phase, GamePhase::Instructions);

        click_at(&mut state, Vec2::new(400.0, 540.0));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_hover_and_animation() {
        let mut state = GameState::new(1);
        apply_input(&mut state, InputEvent::PointerMoved(Vec2::new(100.0, 460.0)));
        assert_eq!(state.hovered, Some(Button::Play));
        apply_input(&mut state, InputEvent::PointerMoved(Vec2::new(400.0, 100.0)));
        assert_eq!(state.hovered, None);

        tick(&mut state);
        tick(&mut state);
        assert!((state.button_anim - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_hover_cleared_on_screen_change() {
        let mut state = GameState::new(1);
        click_at(&mut state, Vec2::new(100.0, 460.0));
        assert_eq!(state.phase, GamePhase::DifficultySelect);
        assert_eq!(state.hovered, None);

        // Stays clear until the pointer moves on the menu again
        click_at(&mut state, Vec2::new(400.0, 420.0));
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn test_choose_difficulty_starts_game() {
        let state = start(5, Difficulty::Medium);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert_eq!(state.throws_remaining, 7);
    }

    #[test]
    fn test_throw_release() {
        let mut state = start(5, Difficulty::Easy);
        click_at(&mut state, Vec2::new(400.0, 300.0));

        assert_eq!(state.phase, GamePhase::Throwing);
        assert_eq!(state.throws_remaining, 6);
        assert!(state.steering);
        let bag = state.projectile.as_ref().expect("bag in flight");
        assert_eq!(bag.pos, THROW_ORIGIN);
        assert!((bag.vel.x - 14.976).abs() < 0.01);
        assert!((bag.vel.y + 9.984).abs() < 0.01);
        assert_eq!(bag.wind, Vec2::ZERO);
    }

    #[test]
    fn test_clicks_ignored_in_flight() {
        let mut state = start(5, Difficulty::Easy);
        click_at(&mut state, Vec2::new(400.0, 300.0));
        let before = state.projectile.clone();

        apply_input(&mut state, InputEvent::Clicked);

        assert_eq!(state.throws_remaining, 6);
        assert_eq!(state.projectile, before);
    }

    #[test]
    fn test_steering_moves_bag() {
        let mut state = start(5, Difficulty::Easy);
        click_at(&mut state, Vec2::new(400.0, 300.0));
        let vel = state.projectile.as_ref().map(|b| b.vel).unwrap();

        apply_input(&mut state, InputEvent::PointerMoved(Vec2::new(100.0, 600.0)));

        let steered = state.projectile.as_ref().map(|b| b.vel).unwrap();
        assert_ne!(steered, vel);
        // Aim is frozen while throwing
        assert!((state.aim.angle - 0.588).abs() < 0.001);
    }

    #[test]
    fn test_seven_throws_end_game() {
        let mut state = start(77, Difficulty::Medium);

        for n in 1..=7u8 {
            assert_eq!(state.phase, GamePhase::Aiming);
            click_at(&mut state, Vec2::new(300.0, 350.0));
            run_throw(&mut state);
            assert_eq!(state.landed.len(), n as usize);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.throws_remaining, 0);
        assert!(state.projectile.is_none());
        assert!(!state.steering);

        let expected: u32 = state.landed.iter().map(|b| b.outcome.points(&state.tuning.scoring)).sum();
        assert_eq!(state.score, expected);

        apply_input(&mut state, InputEvent::Clicked);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_hole_landing_scores_three() {
        let mut state = start(8, Difficulty::Medium);
        click_at(&mut state, Vec2::new(400.0, 300.0));
        state.drain_events();
        // Dropping just above the hole
        state.projectile = Some(Projectile::new(Vec2::new(648.0, 438.0), Vec2::new(0.0, 2.0)));

        tick(&mut state);

        assert_eq!(state.score, 3);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.throws_remaining, 6);
        let bag = state.landed.last().expect("landed bag");
        assert_eq!(bag.outcome, ScoreOutcome::Hole);
        assert_eq!(bag.pos, state.board.hole_center());
        assert_eq!(bag.landed_tick, state.time_ticks);
        assert!(state.drain_events().contains(&GameEvent::ThrowResolved {
            outcome: ScoreOutcome::Hole,
            points: 3,
            at: Vec2::new(650.0, 445.0),
        }));
    }

    #[test]
    fn test_short_throw_misses() {
        let mut state = start(3, Difficulty::Easy);
        // Minimum power, lowest angle: drops well short of the board
        click_at(&mut state, Vec2::new(110.0, 500.0));
        run_throw(&mut state);

        let bag = state.landed.last().unwrap();
        assert_eq!(bag.outcome, ScoreOutcome::Miss);
        assert_eq!(bag.pos.y, GROUND_Y);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Aiming);
    }

    #[test]
    fn test_board_stays_on_medium() {
        let mut state = start(11, Difficulty::Medium);
        click_at(&mut state, Vec2::new(300.0, 350.0));
        run_throw(&mut state);
        assert_eq!(state.board.pos, Vec2::new(500.0, 480.0));
    }

    #[test]
    fn test_board_moves_on_hard() {
        let mut state = start(11, Difficulty::Hard);
        click_at(&mut state, Vec2::new(300.0, 350.0));
        run_throw(&mut state);

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::BoardMoved { .. })));
        let pos = state.board.pos;
        assert!((400.0..=600.0).contains(&pos.x) && (420.0..=520.0).contains(&pos.y));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_extreme_attaches_then_rerolls_wind() {
        let mut state = start(21, Difficulty::Extreme);
        let wind_at_release = state.wind.force;
        click_at(&mut state, Vec2::new(300.0, 350.0));

        let bag = state.projectile.as_ref().unwrap();
        assert_eq!(bag.wind, wind_at_release);
        assert_ne!(state.wind.force, wind_at_release);
    }

    #[test]
    fn test_flight_preview_while_steering() {
        let mut state = start(5, Difficulty::Easy);
        assert!(flight_preview(&state).is_none());

        click_at(&mut state, Vec2::new(400.0, 300.0));
        let preview = flight_preview(&state).expect("preview while steering");
        assert_eq!(preview.landing.y, GROUND_Y);
    }

    #[test]
    fn test_determinism() {
        let play = |seed| {
            let mut state = start(seed, Difficulty::Extreme);
            for _ in 0..7 {
                click_at(&mut state, Vec2::new(320.0, 330.0));
                run_throw(&mut state);
            }
            (state.score, state.board.pos, state.landed.clone())
        };
        assert_eq!(play(4242), play(4242));
    }
}
