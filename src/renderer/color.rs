//! RGBA colour handed to the renderer

use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA colour, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent colours are never drawn
    pub fn is_visible(&self) -> bool {
        self.a > 0
    }

    /// Normalized floats, as shaders expect them
    pub fn to_f32(&self) -> [f32; 4] {
        let bytes: [u8; 4] = bytemuck::cast(*self);
        bytes.map(|c| c as f32 / 255.0)
    }
}

pub const BLACK: Color = Color::new(0, 0, 0, 255);
pub const DARKGRAY: Color = Color::new(80, 80, 80, 255);
pub const BLUE: Color = Color::new(0, 121, 241, 255);
pub const ORANGE: Color = Color::new(255, 161, 0, 255);
pub const PINK: Color = Color::new(255, 109, 194, 255);
pub const TRANSPARENT_PINK: Color = Color::new(255, 109, 194, 90);
pub const BLANK: Color = Color::new(0, 0, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f32() {
        let c = Color::new(255, 0, 51, 255).to_f32();
        assert_eq!(c, [1.0, 0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_blank_is_invisible() {
        assert!(!BLANK.is_visible());
        assert!(TRANSPARENT_PINK.is_visible());
    }
}
