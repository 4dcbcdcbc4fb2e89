use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Colour ramps
// ---------------------------------------------------------------------------

/// `n` colours sweeping the hue from blue (start) to red (end), used to show
/// the direction of time along a trajectory.
pub fn time_gradient(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![hsl_color(240.0)],
        _ => (0..n)
            .map(|i| hsl_color(240.0 * (1.0 - i as f32 / (n - 1) as f32)))
            .collect(),
    }
}

fn hsl_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Hex parsing for config values
// ---------------------------------------------------------------------------

/// Parse `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
