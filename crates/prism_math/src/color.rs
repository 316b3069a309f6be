//! RGB color with floating point channels.

use std::ops::{Add, AddAssign, Mul};

/// An RGB color. Channels are nominally in [0, 1] but nothing enforces it;
/// shading may push them above 1.0 and `limit` only pulls them back down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    /// Create a color from its three channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a gray with all channels set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Clamp every channel to at most 1.0.
    ///
    /// There is no lower bound: negative channels pass through unchanged.
    pub fn limit(self) -> Self {
        Self::new(self.r.min(1.0), self.g.min(1.0), self.b.min(1.0))
    }

    /// Convert to 8 bits per channel by truncating `channel * 255`.
    ///
    /// The color is limited first. Negative channels saturate to 0.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.limit();
        [
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
        ]
    }

    /// True if every channel is exactly zero.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, factor: f64) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
