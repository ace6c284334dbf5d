use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0))
        .collect()
}

/// Blue (t = 0) to red (t = 1) ramp; `t` is clamped.
pub fn ramp(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_color32(240.0 * (1.0 - t))
}

fn hsl_to_color32(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: sample name → Color32
// ---------------------------------------------------------------------------

/// Maps loaded sample names to distinct colours, stable for a given set.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let names: Vec<&String> = names.into_iter().collect();
        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .zip(palette)
            .map(|(n, c)| (n.clone(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a sample; grey when unknown.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping.get(name).copied().unwrap_or(Color32::GRAY)
    }
}
