use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Tomato palette
// ---------------------------------------------------------------------------

/// Bar and histogram fill: rgb(220, 53, 69) at 45% alpha, premultiplied.
pub const TOMATO_FILL: Color32 = Color32::from_rgba_premultiplied(99, 24, 31, 115);

/// Bar and histogram outline: the same red at 90% alpha.
pub const TOMATO_BORDER: Color32 = Color32::from_rgba_premultiplied(198, 48, 62, 230);

/// Fitted regression line.
pub const FIT_LINE: Color32 = Color32::from_rgb(25, 135, 84);

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from tomato red.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 354.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue % 360.0, 0.70, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
