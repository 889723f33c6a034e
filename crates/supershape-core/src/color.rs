use std::fmt;

/// 8-bit RGB triple, printed as lowercase `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blend control colors into `base`, each scaled by its transition weight.
///
/// Every `(color, weight)` with `weight > 0` adds `channel * weight * richness`
/// to each channel. Channels are clamped to 0..=255 and rounded once all
/// contributions are summed, so the order of `layers` does not matter.
pub fn composite<I>(base: Rgb, layers: I, richness: f64) -> Rgb
where
    I: IntoIterator<Item = (Rgb, f64)>,
{
    let mut acc = [base.r as f64, base.g as f64, base.b as f64];
    for (color, weight) in layers {
        if weight > 0.0 {
            let k = weight * richness;
            acc[0] += color.r as f64 * k;
            acc[1] += color.g as f64 * k;
            acc[2] += color.b as f64 * k;
        }
    }
    let ch = |v: f64| v.clamp(0.0, 255.0).round() as u8;
    Rgb::new(ch(acc[0]), ch(acc[1]), ch(acc[2]))
}
