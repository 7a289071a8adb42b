/// Straight-alpha RGBA color with 8-bit channels.
///
/// Shapes keep the color as given and derive a normalized `[f32; 4]` form
/// (`channel / 255`) for their vertex color attribute.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 0xff, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xff);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    /// Opaque gray with all color channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
        match s.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Channels scaled to `[0, 1]`.
    #[inline]
    pub fn normalized(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Clear value for render passes.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b, a] = self.normalized();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blue_normalizes_to_unit_channels() {
        assert_eq!(Color::BLUE.normalized(), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn gray_normalizes_to_two_thirds() {
        let n = Color::gray(0xaa).normalized();
        assert_eq!(Color::gray(0xaa), Color::rgba(170, 170, 170, 255));
        for c in &n[..3] {
            assert!((c - 0.666_666_7).abs() < 1e-6);
        }
        assert_eq!(n[3], 1.0);
    }

    #[test]
    fn from_hex_accepts_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#ffff00"), Some(Color::YELLOW));
        assert_eq!(Color::from_hex("00000080"), Some(Color::rgba(0, 0, 0, 0x80)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }
}
