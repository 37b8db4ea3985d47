//! Rendering module
//!
//! The scene is described as a flat list of [`DrawCommand`]s in the 800×600
//! reference space. A [`Surface`] executes them; the browser build draws to
//! a 2D canvas context, tests and the native demo just record them.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::GameState;
use crate::ui::Rect;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::build_scene;

/// Linear RGBA, each channel 0..=1
pub type Color = [f32; 4];

/// Palette
pub mod colors {
    use super::{Color, hex, hexa};

    pub const WHITE: Color = hex(0xFFFFFF);
    pub const BLACK: Color = hex(0x000000);
    pub const GOLD: Color = hex(0xFFD700);
    pub const CRIMSON: Color = hex(0xDC143C);
    pub const SKY_TOP: Color = hex(0x87CEEB);
    pub const SKY_BOTTOM: Color = hex(0xB0E0E6);
    pub const HILLS: Color = hex(0x90EE90);
    pub const GRASS_TOP: Color = hex(0x32CD32);
    pub const GRASS_BOTTOM: Color = hex(0x228B22);
    pub const FLOWER: Color = hex(0xFF69B4);

    pub const WOOD_DARK: Color = hex(0x654321);
    pub const SADDLE_BROWN: Color = hex(0x8B4513);
    pub const SIENNA: Color = hex(0xA0522D);
    pub const CHOCOLATE: Color = hex(0xD2691E);
    pub const PERU: Color = hex(0xCD853F);
    pub const BURLYWOOD: Color = hex(0xDEB887);
    pub const SANDY_BROWN: Color = hex(0xF4A460);

    pub const SKIN: Color = hex(0xFFDBAC);
    pub const SHIRT: Color = hex(0xFF6B6B);
    pub const PANTS: Color = hex(0x4169E1);

    pub const HOLE_GLOW: Color = GOLD;
    pub const BOARD_GLOW: Color = HILLS;
    pub const MISS_GLOW: Color = SHIRT;

    pub const TEXT_DARK: Color = hex(0x333333);
    pub const TEXT_MUTED: Color = hex(0x666666);

    pub const SHADOW: Color = hexa(0x000000, 0.3);
    pub const OVERLAY: Color = hexa(0x000000, 0.7);
    pub const OVERLAY_DEEP: Color = hexa(0x000000, 0.8);
}

/// Opaque color from 0xRRGGBB
pub const fn hex(rgb: u32) -> Color {
    hexa(rgb, 1.0)
}

/// Color from 0xRRGGBB with alpha
pub const fn hexa(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// CSS `rgba()` string for a color
pub fn css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Geometry to fill or stroke
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
    Ellipse { center: Vec2, radii: Vec2, rotation: f32 },
    /// Closed polygon
    Polygon(Vec<Vec2>),
    /// Open path
    Polyline(Vec<Vec2>),
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two points with (offset, color) stops
    Linear { from: Vec2, to: Vec2, stops: Vec<(f32, Color)> },
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Dash and gap lengths, `None` for a solid line
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f32, dash: f32, gap: f32) -> Self {
        Self {
            color,
            width,
            dash: Some([dash, gap]),
        }
    }
}

/// Soft shadow drawn behind a fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }

    /// CSS font shorthand
    pub fn css(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear,
    Fill {
        shape: Shape,
        paint: Paint,
        glow: Option<Glow>,
    },
    Stroke {
        shape: Shape,
        stroke: Stroke,
    },
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        color: Color,
        align: TextAlign,
    },
    /// The title bitmap, letterboxed into `rect`
    TitleImage { rect: Rect },
    /// Save state, then translate, rotate and scale
    PushTransform {
        translate: Vec2,
        rotate: f32,
        scale: f32,
    },
    /// Restore the state saved by the matching push
    PopTransform,
}

/// Load state of the optional title image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Loading,
    /// Loaded, with natural size in pixels
    Ready { width: u32, height: u32 },
    Failed,
}

/// Something draw commands can be executed on
pub trait Surface {
    fn execute(&mut self, command: &DrawCommand);
}

/// Surface that just keeps the commands (tests, headless runs)
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl Surface for CommandBuffer {
    fn execute(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}

/// Draw one frame of the session
pub fn render<S: Surface>(surface: &mut S, state: &GameState, title: AssetStatus) {
    for command in build_scene(state, title) {
        surface.execute(&command);
    }
}
