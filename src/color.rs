//! RGB colours and the fixed palettes used around the tank.

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channel-wise `round(start + t * (end - start))`.
    ///
    /// `t` is clamped to `[0, 1]`, so both endpoints are reproduced exactly.
    pub fn lerp(self, end: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| {
            let a = a as f32;
            (a + t * (b as f32 - a)).round().clamp(0.0, 255.0) as u8
        };
        Rgb(ch(self.0, end.0), ch(self.1, end.1), ch(self.2, end.2))
    }
}

/// Water behind everything.
pub const BACKGROUND: Rgb = Rgb(0, 0, 30);

/// Day, evening, night and sunrise.
pub const SKY_PALETTE: [Rgb; 4] = [
    Rgb(70, 130, 180),
    Rgb(255, 140, 0),
    Rgb(25, 25, 112),
    Rgb(139, 0, 0),
];

pub const FISH_PALETTE: [Rgb; 8] = [
    Rgb(255, 69, 0),   // red-orange
    Rgb(255, 215, 0),  // gold
    Rgb(50, 205, 50),  // lime
    Rgb(30, 144, 255), // dodger blue
    Rgb(148, 0, 211),  // violet
    Rgb(255, 20, 147), // deep pink
    Rgb(255, 165, 0),  // orange
    Rgb(0, 255, 255),  // aqua
];

/// Bubble shades from the shallowest band to the deepest.
pub const BUBBLE_SHADES: [Rgb; 8] = [
    Rgb(200, 200, 255),
    Rgb(180, 180, 240),
    Rgb(160, 160, 230),
    Rgb(140, 140, 220),
    Rgb(120, 120, 210),
    Rgb(100, 100, 200),
    Rgb(80, 80, 190),
    Rgb(60, 60, 180),
];

pub const SEAWEED: Rgb = Rgb(0, 100, 0);

pub const WAVE: Rgb = Rgb(180, 220, 255);

/// Sand band `i`, counted upwards from the bottom of the tank.
pub fn sand_band(i: usize) -> Rgb {
    let i = i.min(7) as u8;
    let intensity = 100 - i * 10;
    Rgb(intensity, intensity - 30, 50 + i * 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        for w in SKY_PALETTE.windows(2) {
            assert_eq!(w[0].lerp(w[1], 0.0), w[0]);
            assert_eq!(w[0].lerp(w[1], 1.0), w[1]);
        }
    }

    #[test]
    fn lerp_rounds_midpoint() {
        // 70 + 0.5 * 185 = 162.5 -> 163
        assert_eq!(Rgb(70, 130, 180).lerp(Rgb(255, 140, 0), 0.5), Rgb(163, 135, 90));
    }

    #[test]
    fn sand_gets_bluer_upwards() {
        assert_eq!(sand_band(0), Rgb(100, 70, 50));
        assert_eq!(sand_band(7), Rgb(30, 0, 120));
    }
}
