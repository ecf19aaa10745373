use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Backend-neutral colour
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour shared by the window and file renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize, saturation: f32, lightness: f32) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, saturation, lightness);
            let rgb: Srgb = hsl.into_color();
            Rgb::new(
                (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
                (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: plot label → Rgb
// ---------------------------------------------------------------------------

/// Maps each plotted line's label to a distinct colour, in plotting order.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    /// Build a colour map for the given labels; earlier labels get earlier hues.
    pub fn new(labels: &[String], saturation: f32, lightness: f32) -> Self {
        let palette = generate_palette(labels.len(), saturation, lightness);
        let mapping = labels.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Rgb::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Rgb {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(6, 0.75, 0.55);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0, 0.75, 0.55).is_empty());
    }

    #[test]
    fn first_hue_is_red() {
        let p = generate_palette(3, 1.0, 0.5);
        assert_eq!(p[0], Rgb::new(255, 0, 0));
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let labels = vec!["lu".to_string(), "rolling lu".to_string()];
        let map = ColorMap::new(&labels, 0.75, 0.55);
        assert_ne!(map.color_for("lu"), map.color_for("rolling lu"));
        assert_eq!(map.color_for("ghost"), Rgb::GRAY);
    }
}
