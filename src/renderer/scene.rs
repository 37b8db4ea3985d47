//! Scene construction
//!
//! Turns a [`GameState`] into draw commands. Nothing here mutates the
//! session; every animation is driven by the tick counter so a frame is a
//! pure function of the state.

use std::f32::consts::TAU;

use glam::Vec2;

use super::colors::*;
use super::{AssetStatus, Color, DrawCommand, Font, Glow, Paint, Shape, Stroke, TextAlign, hexa, with_alpha};
use crate::canvas_center;
use crate::consts::*;
use crate::sim::{Board, Difficulty, GamePhase, GameState, LandedBag, ScoreOutcome, flight_preview};
use crate::ui::{self, Button, Rect};

const BAG_SIZE: f32 = 20.0;

/// Where the thrower's hand (and the aiming line) starts
const HAND_OFFSET: Vec2 = Vec2::new(-30.0, -50.0);

#[derive(Default)]
struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    fn fill(&mut self, shape: Shape, color: Color) {
        self.fill_paint(shape, Paint::Solid(color));
    }

    fn fill_paint(&mut self, shape: Shape, paint: Paint) {
        self.commands.push(DrawCommand::Fill { shape, paint, glow: None });
    }

    fn fill_glow(&mut self, shape: Shape, color: Color, glow: Glow) {
        self.commands.push(DrawCommand::Fill {
            shape,
            paint: Paint::Solid(color),
            glow: Some(glow),
        });
    }

    fn stroke(&mut self, shape: Shape, stroke: Stroke) {
        self.commands.push(DrawCommand::Stroke { shape, stroke });
    }

    fn line(&mut self, a: Vec2, b: Vec2, stroke: Stroke) {
        self.stroke(Shape::Polyline(vec![a, b]), stroke);
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, font: Font, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            font,
            color,
            align,
        });
    }

    fn centered(&mut self, text: impl Into<String>, pos: Vec2, font: Font, color: Color) {
        self.text(text, pos, font, color, TextAlign::Center);
    }

    fn push_transform(&mut self, translate: Vec2, rotate: f32, scale: f32) {
        self.commands.push(DrawCommand::PushTransform {
            translate,
            rotate,
            scale,
        });
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }
}

fn circle(center: Vec2, radius: f32) -> Shape {
    Shape::Circle { center, radius }
}

fn ellipse(center: Vec2, rx: f32, ry: f32, rotation: f32) -> Shape {
    Shape::Ellipse {
        center,
        radii: Vec2::new(rx, ry),
        rotation,
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Shape {
    Shape::Rect(Rect::new(x, y, w, h))
}

/// Sample a quadratic Bézier into points (including both ends)
fn quad_curve(p0: Vec2, control: Vec2, p1: Vec2, steps: usize) -> Vec<Vec2> {
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let a = p0.lerp(control, t);
            let b = control.lerp(p1, t);
            a.lerp(b, t)
        })
        .collect()
}

fn outcome_color(outcome: ScoreOutcome) -> Color {
    match outcome {
        ScoreOutcome::Hole => HOLE_GLOW,
        ScoreOutcome::Board => BOARD_GLOW,
        ScoreOutcome::Miss => MISS_GLOW,
    }
}

fn popup_text(outcome: ScoreOutcome) -> &'static str {
    match outcome {
        ScoreOutcome::Hole => "+3",
        ScoreOutcome::Board => "+1",
        ScoreOutcome::Miss => "0",
    }
}

/// Build the draw list for the current frame
pub fn build_scene(state: &GameState, title: AssetStatus) -> Vec<DrawCommand> {
    let mut scene = Scene::default();
    scene.commands.push(DrawCommand::Clear);

    match state.phase {
        GamePhase::Menu => draw_menu(&mut scene, state, title),
        GamePhase::DifficultySelect => draw_difficulty_select(&mut scene),
        GamePhase::Instructions => draw_instructions(&mut scene),
        GamePhase::Aiming | GamePhase::Throwing => {
            draw_background(&mut scene);
            draw_board(&mut scene, &state.board);
            draw_thrower(&mut scene, state);
            if state.difficulty.has_wind() {
                draw_wind_flag(&mut scene, state);
            }
            if state.phase == GamePhase::Aiming {
                draw_aim_preview(&mut scene, state);
            }
            draw_flight_preview(&mut scene, state);
            draw_bags(&mut scene, state);
            draw_hud(&mut scene, state);
        }
        GamePhase::GameOver => {
            draw_background(&mut scene);
            draw_board(&mut scene, &state.board);
            draw_bags(&mut scene, state);
            draw_game_over(&mut scene, state);
        }
    }

    scene.commands
}

fn draw_background(scene: &mut Scene) {
    let horizon = CANVAS_HEIGHT * 0.6;

    scene.fill_paint(
        rect(0.0, 0.0, CANVAS_WIDTH, horizon),
        Paint::Linear {
            from: Vec2::ZERO,
            to: Vec2::new(0.0, horizon),
            stops: vec![(0.0, SKY_TOP), (1.0, SKY_BOTTOM)],
        },
    );

    // Distant hills
    let h = CANVAS_HEIGHT;
    let ridge = Vec2::new(400.0, h * 0.45);
    let mut hills = quad_curve(Vec2::new(0.0, h * 0.5), Vec2::new(200.0, h * 0.4), ridge, 12);
    let far = quad_curve(ridge, Vec2::new(600.0, h * 0.5), Vec2::new(800.0, h * 0.42), 12);
    hills.extend(far.into_iter().skip(1));
    hills.push(Vec2::new(CANVAS_WIDTH, horizon));
    hills.push(Vec2::new(0.0, horizon));
    scene.fill(Shape::Polygon(hills), HILLS);

    scene.fill_paint(
        rect(0.0, horizon, CANVAS_WIDTH, CANVAS_HEIGHT - horizon),
        Paint::Linear {
            from: Vec2::new(0.0, horizon),
            to: Vec2::new(0.0, CANVAS_HEIGHT),
            stops: vec![(0.0, GRASS_TOP), (1.0, GRASS_BOTTOM)],
        },
    );

    // Sun
    let sun = Vec2::new(650.0, 80.0);
    scene.fill(circle(sun, 40.0), GOLD);
    for i in 0..8 {
        let dir = Vec2::from_angle(i as f32 * TAU / 8.0);
        scene.line(sun + dir * 50.0, sun + dir * 70.0, Stroke::solid(GOLD, 3.0));
    }

    for (x, y, size) in [(150.0, 100.0, 60.0), (450.0, 120.0, 45.0), (700.0, 90.0, 50.0)] {
        draw_cloud(scene, Vec2::new(x, y), size);
    }

    for (x, y) in [
        (120.0, 450.0),
        (280.0, 480.0),
        (380.0, 460.0),
        (520.0, 470.0),
        (680.0, 455.0),
        (750.0, 485.0),
        (50.0, 475.0),
        (420.0, 490.0),
    ] {
        draw_flower(scene, Vec2::new(x, y));
    }
}

fn draw_cloud(scene: &mut Scene, at: Vec2, size: f32) {
    let puffs = [(-0.5, 0.0, 0.6), (0.0, -0.3, 0.8), (0.5, 0.0, 0.6), (-0.2, 0.2, 0.5), (0.2, 0.2, 0.5)];
    for (dx, dy, r) in puffs {
        scene.fill(circle(at + Vec2::new(dx, dy) * size, r * size), WHITE);
    }
}

fn draw_flower(scene: &mut Scene, at: Vec2) {
    let head = at - Vec2::new(0.0, 8.0);
    scene.line(at, head, Stroke::solid(GRASS_BOTTOM, 2.0));
    for i in 0..5 {
        let petal = head + Vec2::from_angle(i as f32 * TAU / 5.0) * 4.0;
        scene.fill(circle(petal, 2.0), FLOWER);
    }
    scene.fill(circle(head, 1.5), GOLD);
}

fn draw_board(scene: &mut Scene, board: &Board) {
    let left = board.pos.x;
    let right = board.right();
    let left_y = board.left_surface_y();
    let right_y = board.right_surface_y();
    let face = |dy: f32| {
        vec![
            Vec2::new(left, left_y + dy),
            Vec2::new(right, right_y + dy),
            Vec2::new(right, right_y - 20.0 + dy),
            Vec2::new(left, left_y - 20.0 + dy),
        ]
    };

    // Drop shadow
    let shadow: Vec<Vec2> = face(8.0).into_iter().map(|p| p + Vec2::new(8.0, 0.0)).collect();
    scene.fill(Shape::Polygon(shadow), SHADOW);

    scene.fill_paint(
        Shape::Polygon(face(0.0)),
        Paint::Linear {
            from: Vec2::new(left, left_y - 10.0),
            to: Vec2::new(right, right_y - 10.0),
            stops: vec![
                (0.0, CHOCOLATE),
                (0.2, PERU),
                (0.4, BURLYWOOD),
                (0.6, SANDY_BROWN),
                (0.8, CHOCOLATE),
                (1.0, SIENNA),
            ],
        },
    );

    // Wood grain
    for i in 0..15 {
        let progress = i as f32 / 15.0;
        let ly = left_y - 20.0 + 20.0 * progress;
        let ry = right_y - 20.0 + 20.0 * progress;
        let curve = (i as f32 * 0.3).sin() * 2.0;
        let opacity = 0.2 + (i as f32 * 0.5).sin() * 0.1;
        let grain = quad_curve(
            Vec2::new(left + 5.0, ly + curve),
            Vec2::new(left + board.width * 0.5, (ly + ry) * 0.5 + curve * 0.5),
            Vec2::new(right - 5.0, ry + curve),
            8,
        );
        scene.stroke(Shape::Polyline(grain), Stroke::solid(with_alpha(SADDLE_BROWN, opacity), 1.0));
    }

    for (dx, dy, size) in [(40.0, -15.0, 3.0), (120.0, -8.0, 2.0), (160.0, -12.0, 4.0)] {
        let knot = Vec2::new(left + dx, left_y + dy);
        scene.fill(ellipse(knot, size, size * 0.7, 0.0), hexa(0x654321, 0.6));
        scene.fill(ellipse(knot, size * 0.5, size * 0.35, 0.0), hexa(0x654321, 0.8));
    }

    scene.line(
        Vec2::new(left, left_y - 20.0),
        Vec2::new(right, right_y - 20.0),
        Stroke::solid(hexa(0xFFF8DC, 0.8), 2.0),
    );
    scene.line(Vec2::new(left, left_y), Vec2::new(right, right_y), Stroke::solid(hexa(0x654321, 0.8), 2.0));

    // Legs: short at the low end, long at the raised end
    let leg_paint = |x: f32, y: f32| Paint::Linear {
        from: Vec2::new(x, y),
        to: Vec2::new(x + 12.0, y),
        stops: vec![(0.0, SADDLE_BROWN), (0.5, SIENNA), (1.0, WOOD_DARK)],
    };
    for (x, top, height) in [(left + 15.0, left_y, 45.0), (right - 27.0, right_y, 85.0)] {
        scene.fill_paint(rect(x, top, 12.0, height), leg_paint(x, top));
        scene.fill(rect(x - 5.0, top + height - 8.0, 22.0, 8.0), WOOD_DARK);
        for i in 0..3 {
            let gx = x + 2.0 + i as f32 * 3.0;
            scene.line(
                Vec2::new(gx, top + 5.0),
                Vec2::new(gx, top + height - 10.0),
                Stroke::solid(hexa(0x654321, 0.4), 1.0),
            );
        }
    }

    // Cross beam
    scene.fill_paint(
        Shape::Polygon(vec![
            Vec2::new(left + 30.0, left_y + 20.0),
            Vec2::new(right - 30.0, right_y + 20.0),
            Vec2::new(right - 30.0, right_y + 26.0),
            Vec2::new(left + 30.0, left_y + 26.0),
        ]),
        Paint::Linear {
            from: Vec2::new(left + 30.0, left_y + 20.0),
            to: Vec2::new(left + 30.0, left_y + 26.0),
            stops: vec![(0.0, SIENNA), (1.0, SADDLE_BROWN)],
        },
    );

    let hole = board.hole_center();
    let r = board.hole_radius;
    let tilt = board.tilt();
    scene.fill(ellipse(hole, r, r * 0.4, tilt), hexa(0x000000, 0.9));
    scene.stroke(ellipse(hole, r, r * 0.4, tilt), Stroke::solid(CHOCOLATE, 2.0));
    scene.stroke(ellipse(hole, r - 1.0, (r - 1.0) * 0.4, tilt), Stroke::solid(with_alpha(BURLYWOOD, 0.8), 1.0));

    let mut edge = face(0.0);
    edge.push(edge[0]);
    scene.stroke(Shape::Polyline(edge), Stroke::solid(SADDLE_BROWN, 3.0));
}

fn draw_thrower(scene: &mut Scene, state: &GameState) {
    let at = THROW_ORIGIN + Vec2::new(-30.0, -90.0);

    // Follow-through while the bag is still near the hand
    let follow_through = state.phase == GamePhase::Throwing
        && state
            .projectile
            .as_ref()
            .is_some_and(|bag| bag.pos.x < THROW_ORIGIN.x + 50.0);

    // Head and hair
    scene.fill(circle(at + Vec2::new(0.0, -60.0), 18.0), SKIN);
    scene.fill(circle(at + Vec2::new(-3.0, -68.0), 12.0), SADDLE_BROWN);
    scene.fill(ellipse(at + Vec2::new(-18.0, -63.0), 6.0, 12.0, -0.3), SADDLE_BROWN);

    scene.fill(ellipse(at + Vec2::new(0.0, -22.0), 12.0, 22.0, 0.0), SHIRT);

    let (arm_angle, reach) = if follow_through {
        (-0.8, 38.0)
    } else {
        (state.aim.angle * 0.5, 30.0)
    };
    let arm = Stroke::solid(SKIN, 6.0);
    scene.line(at + Vec2::new(-9.0, -30.0), at + Vec2::new(-22.0, -15.0), arm);
    let hand = at + Vec2::new(0.0, -30.0) + Vec2::from_angle(arm_angle) * reach;
    scene.line(at + Vec2::new(9.0, -30.0), hand, arm);
    scene.fill(circle(hand, 4.0), SKIN);

    if !follow_through {
        // Bag ready in hand
        scene.fill(rect(hand.x - 6.0, hand.y - 6.0, 12.0, 12.0), SADDLE_BROWN);
        scene.stroke(rect(hand.x - 6.0, hand.y - 6.0, 12.0, 12.0), Stroke::solid(WOOD_DARK, 1.0));
    }

    let stride = if follow_through { 12.0 } else { 6.0 };
    let legs = Stroke::solid(PANTS, 9.0);
    scene.line(at + Vec2::new(-4.0, 0.0), at + Vec2::new(-12.0, 38.0), legs);
    scene.line(at + Vec2::new(4.0, 0.0), at + Vec2::new(stride, 38.0), legs);
    scene.fill(ellipse(at + Vec2::new(-12.0, 42.0), 9.0, 4.0, 0.0), WOOD_DARK);
    scene.fill(ellipse(at + Vec2::new(stride, 42.0), 9.0, 4.0, 0.0), WOOD_DARK);
}

fn draw_wind_flag(scene: &mut Scene, state: &GameState) {
    let wind = &state.wind;
    let pole = Vec2::new(CANVAS_WIDTH - 120.0, 80.0);

    scene.line(pole, pole + Vec2::new(0.0, 80.0), Stroke::solid(SADDLE_BROWN, 4.0));

    let length = 40.0 + wind.strength * 20.0;
    let height = 25.0;
    let wave = (state.time_ticks as f32 * 0.083 + wind.strength * 3.0).sin() * wind.strength * 5.0;
    let tip = pole + Vec2::from_angle(wind.direction) * length + Vec2::new(wave, 0.0);
    let flag = vec![pole, tip, tip + Vec2::new(0.0, height), pole + Vec2::new(0.0, height)];
    scene.fill(Shape::Polygon(flag.clone()), hexa(0xFF4444, 1.0));
    scene.stroke(Shape::Polygon(flag), Stroke::solid(hexa(0xCC0000, 1.0), 2.0));

    scene.fill(rect(pole.x - 60.0, pole.y + 90.0, 120.0, 40.0), OVERLAY);
    let font = Font::regular(12.0);
    scene.centered("WIND", pole + Vec2::new(0.0, 105.0), font, WHITE);
    scene.centered(wind.compass_label(), pole + Vec2::new(0.0, 118.0), font, WHITE);
    scene.centered(format!("{}%", wind.strength_percent()), pole + Vec2::new(0.0, 130.0), font, WHITE);
}

fn draw_aim_preview(scene: &mut Scene, state: &GameState) {
    let hand = THROW_ORIGIN + HAND_OFFSET;
    let pointer = state.pointer;
    let aim = state.aim;

    scene.line(hand, pointer, Stroke::dashed(hexa(0xFFFFFF, 0.4), 2.0, 5.0, 5.0));

    if state.difficulty.shows_aim_arc() {
        let reach = aim.power * 400.0;
        let arc: Vec<Vec2> = (0..=30)
            .map(|i| {
                let t = i as f32 / 30.0;
                hand + Vec2::new(aim.angle.cos() * t * reach, -aim.angle.sin() * t * reach + t * t * 200.0)
                    + state.wind.force * t * 200.0
            })
            .collect();
        scene.stroke(Shape::Polyline(arc), Stroke::dashed(hexa(0xFFFFFF, 0.8), 3.0, 10.0, 5.0));
    }

    // Power marker and crosshair at the pointer
    let marker = circle(pointer, 8.0 + aim.power * 4.0);
    scene.fill(marker.clone(), hexa(0xFFFF00, 0.5 + aim.power * 0.5));
    scene.stroke(marker, Stroke::solid(WHITE, 2.0));
    let cross = Stroke::solid(hexa(0xFFFFFF, 0.8), 2.0);
    scene.line(pointer - Vec2::new(10.0, 0.0), pointer + Vec2::new(10.0, 0.0), cross);
    scene.line(pointer - Vec2::new(0.0, 10.0), pointer + Vec2::new(0.0, 10.0), cross);
}

fn draw_flight_preview(scene: &mut Scene, state: &GameState) {
    let (Some(bag), Some(preview)) = (state.projectile.as_ref(), flight_preview(state)) else {
        return;
    };

    // Short ballistic sketch ahead of the bag
    let sketch: Vec<Vec2> = (0..=20)
        .map(|i| {
            let t = i as f32 / 20.0;
            bag.pos + bag.vel * t * 10.0 + Vec2::new(0.0, 0.25 * t * t * 100.0)
        })
        .collect();
    scene.stroke(Shape::Polyline(sketch), Stroke::dashed(hexa(0xFFFF00, 0.6), 2.0, 5.0, 5.0));

    scene.fill(circle(preview.landing, 15.0), hexa(0xFFFF00, 0.5));

    if preview.over_hole {
        scene.stroke(
            circle(state.board.hole_center(), state.board.hole_radius + 5.0),
            Stroke::solid(GOLD, 3.0),
        );
    }
}

fn draw_bag(scene: &mut Scene, pos: Vec2, glow: Option<Glow>) {
    let half = BAG_SIZE / 2.0;
    let wobble = (pos.x * 0.1).sin() * 0.1;

    scene.push_transform(pos, wobble, 1.0);
    scene.fill(rect(-half + 2.0, -half + 2.0, BAG_SIZE, BAG_SIZE), SHADOW);
    let body = rect(-half, -half, BAG_SIZE, BAG_SIZE);
    match glow {
        Some(glow) => scene.fill_glow(body, SADDLE_BROWN, glow),
        None => scene.fill(body, SADDLE_BROWN),
    }
    scene.fill(rect(-half + 2.0, -half + 2.0, BAG_SIZE - 6.0, BAG_SIZE - 6.0), SIENNA);

    // Stitching
    let inset = half - 2.0;
    let seam = vec![
        Vec2::new(-inset, -inset),
        Vec2::new(inset, -inset),
        Vec2::new(inset, inset),
        Vec2::new(-inset, inset),
    ];
    scene.stroke(Shape::Polygon(seam), Stroke::dashed(WOOD_DARK, 1.0, 2.0, 2.0));
    scene.fill(ellipse(Vec2::ZERO, half - 3.0, half - 5.0, 0.0), hexa(0x000000, 0.1));
    scene.pop_transform();
}

fn draw_landed_bag(scene: &mut Scene, bag: &LandedBag, now: u64) {
    let age = bag.age(now);
    let color = outcome_color(bag.outcome);
    let glow = bag.is_glowing(now).then(|| Glow {
        color,
        blur: 20.0 * (GLOW_TICKS - age) as f32 / GLOW_TICKS as f32,
    });

    draw_bag(scene, bag.pos, glow);

    if age < POPUP_TICKS {
        scene.centered(
            popup_text(bag.outcome),
            bag.pos - Vec2::new(0.0, 25.0),
            Font::bold(16.0),
            color,
        );
    }
}

fn draw_bags(scene: &mut Scene, state: &GameState) {
    for bag in &state.landed {
        draw_landed_bag(scene, bag, state.time_ticks);
    }
    if let Some(bag) = &state.projectile {
        draw_bag(scene, bag.pos, None);
    }
}

fn draw_hud(scene: &mut Scene, state: &GameState) {
    let left = |scene: &mut Scene, text: String, y: f32, font: Font, color: Color| {
        scene.text(text, Vec2::new(20.0, y), font, color, TextAlign::Left);
    };

    left(scene, format!("Score: {}", state.score), 40.0, Font::bold(24.0), TEXT_DARK);
    left(scene, format!("Throws: {}", state.throws_remaining), 70.0, Font::bold(24.0), TEXT_DARK);

    let small = Font::regular(16.0);
    left(scene, format!("Difficulty: {}", state.difficulty.as_str()), 100.0, small, TEXT_MUTED);

    match state.phase {
        GamePhase::Aiming => {
            left(scene, "Move mouse to aim, click to throw!".into(), 120.0, small, TEXT_MUTED);
            left(scene, format!("Power: {:.0}%", state.aim.power * 100.0), 140.0, small, TEXT_MUTED);
            left(scene, format!("Angle: {:.0}°", state.aim.angle.to_degrees()), 160.0, small, TEXT_MUTED);
        }
        GamePhase::Throwing if state.steering => {
            left(scene, "Move mouse to control flight!".into(), 120.0, small, TEXT_MUTED);
        }
        _ => {}
    }
}

fn draw_game_over(scene: &mut Scene, state: &GameState) {
    let c = canvas_center();
    scene.fill(rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), OVERLAY);

    scene.centered("Game Over!", c + Vec2::new(0.0, -60.0), Font::bold(48.0), WHITE);
    scene.centered(format!("Final Score: {}", state.score), c + Vec2::new(0.0, -10.0), Font::bold(32.0), WHITE);
    scene.centered(
        format!("{} Mode Completed", state.difficulty.as_str()),
        c + Vec2::new(0.0, 20.0),
        Font::regular(24.0),
        WHITE,
    );

    if state.is_perfect() {
        scene.centered("🎉 PERFECT SCORE! 🎉", c + Vec2::new(0.0, 50.0), Font::bold(28.0), GOLD);
    }

    scene.centered("Click to return to menu", c + Vec2::new(0.0, 100.0), Font::regular(20.0), WHITE);
}

/// Fit an image into the canvas keeping its aspect ratio
fn letterbox(width: u32, height: u32) -> Rect {
    if width == 0 || height == 0 {
        return Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    }

    let image_aspect = width as f32 / height as f32;
    let canvas_aspect = CANVAS_WIDTH / CANVAS_HEIGHT;

    if image_aspect > canvas_aspect {
        let h = CANVAS_WIDTH / image_aspect;
        Rect::new(0.0, (CANVAS_HEIGHT - h) / 2.0, CANVAS_WIDTH, h)
    } else {
        let w = CANVAS_HEIGHT * image_aspect;
        Rect::new((CANVAS_WIDTH - w) / 2.0, 0.0, w, CANVAS_HEIGHT)
    }
}

fn draw_menu(scene: &mut Scene, state: &GameState, title: AssetStatus) {
    let c = canvas_center();

    match title {
        AssetStatus::Ready { width, height } => {
            scene.commands.push(DrawCommand::TitleImage {
                rect: letterbox(width, height),
            });
        }
        AssetStatus::Loading | AssetStatus::Failed => {
            draw_background(scene);
            scene.fill(rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), OVERLAY);
            scene.centered("MOTHERSHUCKER", c + Vec2::new(0.0, -100.0), Font::bold(72.0), GOLD);
            scene.centered(
                "The Ultimate Cornhole Challenge",
                c + Vec2::new(0.0, -50.0),
                Font::regular(24.0),
                WHITE,
            );
            scene.centered(
                format!("Get as close to {} points as possible!", state.perfect_score()),
                c + Vec2::new(0.0, -10.0),
                Font::regular(18.0),
                WHITE,
            );
        }
    }

    for (button, area) in ui::buttons_for(GamePhase::Menu) {
        draw_menu_button(scene, button, area, state.hovered == Some(button), state.button_anim);
    }
}

/// Gold menu button that wiggles and glows while hovered
fn draw_menu_button(scene: &mut Scene, button: Button, area: Rect, hovered: bool, anim: f32) {
    let (wiggle, pulse, scale) = if hovered {
        ((anim * 8.0).sin() * 2.0, 0.3 + (anim * 6.0).sin() * 0.2, 1.05)
    } else {
        (0.0, 0.0, 1.0)
    };

    let (w, h) = (area.w, area.h);
    scene.push_transform(area.center(), wiggle * 0.05, scale);

    let face = rect(-w / 2.0, -h / 2.0, w, h);
    if hovered {
        let glow = Glow {
            color: GOLD,
            blur: 20.0 + (anim * 4.0).sin() * 10.0,
        };
        scene.fill_glow(face.clone(), with_alpha(GOLD, (0.9 + pulse).min(1.0)), glow);
    } else {
        scene.fill(face.clone(), GOLD);
    }
    scene.stroke(face, Stroke::solid(CRIMSON, 4.0));
    scene.stroke(rect(-w / 2.0 - 1.0, -h / 2.0 - 1.0, w + 2.0, h + 2.0), Stroke::solid(BLACK, 2.0));

    let size = match (button, hovered) {
        (Button::Play, true) => 20.0,
        (Button::Play, false) => 18.0,
        (_, true) => 18.0,
        (_, false) => 16.0,
    };
    scene.centered(button.label(), Vec2::new(0.0, 5.0), Font::bold(size), BLACK);

    scene.pop_transform();
}

/// Flat colored button used on the difficulty and rules screens
fn draw_flat_button(scene: &mut Scene, label: &str, area: Rect, fill: Color, border: Color, font: Font) {
    scene.fill(Shape::Rect(area), fill);
    scene.stroke(Shape::Rect(area), Stroke::solid(border, 3.0));
    scene.centered(label, Vec2::new(area.center().x, area.y + 25.0), font, WHITE);
}

fn level_colors(level: Difficulty) -> (Color, Color) {
    match level {
        Difficulty::Easy => (GRASS_TOP, GRASS_BOTTOM),
        Difficulty::Medium => (hexa(0xFFA500, 1.0), hexa(0xFF8C00, 1.0)),
        Difficulty::Hard => (hexa(0xFF4444, 1.0), hexa(0xCC0000, 1.0)),
        Difficulty::Extreme => (hexa(0x8B0000, 1.0), hexa(0x660000, 1.0)),
    }
}

fn draw_difficulty_select(scene: &mut Scene) {
    let c = canvas_center();
    draw_background(scene);
    scene.fill(rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), OVERLAY_DEEP);
    scene.centered("Choose Difficulty", c + Vec2::new(0.0, -100.0), Font::bold(48.0), GOLD);

    for (button, area) in ui::difficulty_buttons() {
        match button {
            Button::Level(level) => {
                let (fill, border) = level_colors(level);
                let size = if level == Difficulty::Extreme { 14.0 } else { 16.0 };
                draw_flat_button(scene, button.label(), area, fill, border, Font::bold(size));
            }
            _ => draw_flat_button(scene, button.label(), area, TEXT_MUTED, hexa(0x444444, 1.0), Font::bold(18.0)),
        }
    }
}

const RULES: [&str; 17] = [
    "OBJECTIVE: Get as close to 21 points as possible!",
    "",
    "CONTROLS:",
    "• Move your mouse to aim your throw",
    "• Click to release the bean bag",
    "• Move mouse during flight to control trajectory",
    "",
    "SCORING:",
    "• Landing in the hole = +3 points",
    "• Landing on the board = +1 point",
    "• Missing the board = 0 points",
    "",
    "DIFFICULTY LEVELS:",
    "• Easy: Shows trajectory preview arc",
    "• Medium: No trajectory preview",
    "• Hard: Board moves after each throw",
    "• Extreme: Wind effects + moving board",
];

fn draw_instructions(scene: &mut Scene) {
    let c = canvas_center();
    draw_background(scene);
    scene.fill(rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), OVERLAY_DEEP);
    scene.centered("How to Play", c + Vec2::new(0.0, -180.0), Font::bold(48.0), GOLD);

    for (i, line) in RULES.iter().enumerate().filter(|(_, line)| !line.is_empty()) {
        let y = c.y - 150.0 + i as f32 * 20.0;
        scene.centered(*line, Vec2::new(c.x, y), Font::regular(18.0), WHITE);
    }

    draw_flat_button(
        scene,
        Button::Back.label(),
        ui::instructions_back(),
        SHIRT,
        hexa(0xFF4444, 1.0),
        Font::bold(18.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{InputEvent, apply_input, tick};

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn has_title_image(commands: &[DrawCommand]) -> bool {
        commands.iter().any(|c| matches!(c, DrawCommand::TitleImage { .. }))
    }

    /// Dashed polylines with the aiming-arc pattern
    fn aim_arcs(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::Stroke { shape: Shape::Polyline(_), stroke } if stroke.dash == Some([10.0, 5.0]))
            })
            .count()
    }

    fn aiming(level: Difficulty) -> GameState {
        let mut state = GameState::new(8);
        state.start_game(level);
        apply_input(&mut state, InputEvent::PointerMoved(Vec2::new(400.0, 300.0)));
        state
    }

    #[test]
    fn test_menu_uses_title_image_when_ready() {
        let state = GameState::new(1);
        let commands = build_scene(&state, AssetStatus::Ready { width: 1600, height: 1200 });
        assert!(has_title_image(&commands));
        assert!(!texts(&commands).contains(&"MOTHERSHUCKER"));
        assert!(texts(&commands).contains(&"PLAY"));
    }

    #[test]
    fn test_menu_falls_back_without_image() {
        let state = GameState::new(1);
        for status in [AssetStatus::Loading, AssetStatus::Failed] {
            let commands = build_scene(&state, status);
            assert!(!has_title_image(&commands));
            let texts = texts(&commands);
            assert!(texts.contains(&"MOTHERSHUCKER"));
            assert!(texts.contains(&"Get as close to 21 points as possible!"));
            assert!(texts.contains(&"RULES"));
        }
    }

    #[test]
    fn test_letterbox() {
        assert_eq!(letterbox(1600, 600), Rect::new(0.0, 150.0, 800.0, 300.0));
        assert_eq!(letterbox(300, 600), Rect::new(250.0, 0.0, 300.0, 600.0));
        assert_eq!(letterbox(0, 0), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_hovered_button_glows() {
        let mut state = GameState::new(1);
        apply_input(&mut state, InputEvent::PointerMoved(Vec2::new(100.0, 460.0)));
        let commands = build_scene(&state, AssetStatus::Failed);
        let glowing = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { glow: Some(_), .. }))
            .count();
        assert_eq!(glowing, 1);
    }

    #[test]
    fn test_transforms_balanced() {
        let mut state = aiming(Difficulty::Easy);
        apply_input(&mut state, InputEvent::Clicked);
        for _ in 0..5 {
            tick(&mut state);
        }
        let commands = build_scene(&state, AssetStatus::Failed);
        let pushes = commands.iter().filter(|c| matches!(c, DrawCommand::PushTransform { .. })).count();
        let pops = commands.iter().filter(|c| matches!(c, DrawCommand::PopTransform)).count();
        assert_eq!(pushes, pops);
        assert!(pushes >= 1, "bag in flight is drawn");
    }

    #[test]
    fn test_aim_arc_only_on_easy() {
        assert_eq!(aim_arcs(&build_scene(&aiming(Difficulty::Easy), AssetStatus::Failed)), 1);
        assert_eq!(aim_arcs(&build_scene(&aiming(Difficulty::Medium), AssetStatus::Failed)), 0);
        assert_eq!(aim_arcs(&build_scene(&aiming(Difficulty::Extreme), AssetStatus::Failed)), 0);
    }

    #[test]
    fn test_hud_text() {
        let state = aiming(Difficulty::Medium);
        let commands = build_scene(&state, AssetStatus::Failed);
        let texts = texts(&commands);
        assert!(texts.contains(&"Score: 0"));
        assert!(texts.contains(&"Throws: 7"));
        assert!(texts.contains(&"Difficulty: Medium"));
        assert!(texts.contains(&"Power: 120%"));
        assert!(texts.contains(&"Angle: 34°"));
    }

    #[test]
    fn test_wind_flag_only_on_extreme() {
        let extreme = aiming(Difficulty::Extreme);
        let commands = build_scene(&extreme, AssetStatus::Failed);
        let texts = texts(&commands);
        assert!(texts.contains(&"WIND"));
        assert!(texts.contains(&extreme.wind.compass_label()));
        let percent = format!("{}%", extreme.wind.strength_percent());
        assert!(texts.contains(&percent.as_str()));

        let hard = build_scene(&aiming(Difficulty::Hard), AssetStatus::Failed);
        assert!(!self::texts(&hard).contains(&"WIND"));
    }

    #[test]
    fn test_score_popup_window() {
        let mut state = aiming(Difficulty::Medium);
        state.landed.push(LandedBag::new(Vec2::new(600.0, 470.0), ScoreOutcome::Hole, state.time_ticks));

        assert!(texts(&build_scene(&state, AssetStatus::Failed)).contains(&"+3"));

        state.time_ticks += POPUP_TICKS;
        let commands = build_scene(&state, AssetStatus::Failed);
        assert!(!texts(&commands).contains(&"+3"));
        assert!(commands.iter().any(|c| matches!(c, DrawCommand::Fill { glow: Some(_), .. })));

        state.time_ticks += GLOW_TICKS;
        let commands = build_scene(&state, AssetStatus::Failed);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Fill { glow: Some(_), .. })));
    }

    #[test]
    fn test_game_over_perfect() {
        let mut state = GameState::new(2);
        state.start_game(Difficulty::Hard);
        state.throws_remaining = 0;
        state.score = 21;
        state.set_phase(GamePhase::GameOver);

        let commands = build_scene(&state, AssetStatus::Failed);
        let texts = texts(&commands);
        assert!(texts.contains(&"Game Over!"));
        assert!(texts.contains(&"Final Score: 21"));
        assert!(texts.contains(&"Hard Mode Completed"));
        assert!(texts.contains(&"🎉 PERFECT SCORE! 🎉"));

        state.score = 18;
        assert!(!self::texts(&build_scene(&state, AssetStatus::Failed)).contains(&"🎉 PERFECT SCORE! 🎉"));
    }

    #[test]
    fn test_screens_show_their_buttons() {
        let mut state = GameState::new(3);
        state.set_phase(GamePhase::DifficultySelect);
        let commands = build_scene(&state, AssetStatus::Failed);
        let labels = texts(&commands);
        for level in Difficulty::ALL {
            assert!(labels.contains(&level.as_str()));
        }
        assert!(labels.contains(&"Back"));

        state.set_phase(GamePhase::Instructions);
        let commands = build_scene(&state, AssetStatus::Failed);
        let labels = texts(&commands);
        assert!(labels.contains(&"How to Play"));
        assert!(labels.contains(&"• Landing in the hole = +3 points"));
    }
}
