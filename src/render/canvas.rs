// ---------------------------------------------------------------------------
// Canvas – the injected drawing capability
// ---------------------------------------------------------------------------

/// A point in canvas pixel space. `y` grows downward, as pixel rows do.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        PixelPoint { x, y }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }
}

/// Line pattern for strokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinePattern {
    #[default]
    Solid,
    Dotted,
}

/// Pen state applied to subsequent line/ellipse/text calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub pattern: LinePattern,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Stroke {
            color,
            width,
            pattern: LinePattern::Solid,
        }
    }

    pub fn dotted(color: Color, width: f64) -> Self {
        Stroke {
            color,
            width,
            pattern: LinePattern::Dotted,
        }
    }
}

/// The painting surface a render pass draws through. Implementations own the
/// actual pixel output (toolkit widget, image buffer, test recorder); the
/// core only issues these calls and never touches pixels itself.
pub trait Canvas {
    fn fill_background(&mut self, color: Color);
    fn set_stroke(&mut self, stroke: Stroke);
    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint);
    fn draw_ellipse(&mut self, center: PixelPoint, rx: f64, ry: f64);
    fn draw_text(&mut self, anchor: PixelPoint, text: &str);
}
