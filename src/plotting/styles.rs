use plotters::style::{RGBAColor, RGBColor};

/// Base and saturated ends of the insertion overflow ramp
pub const INSERTIONS_RAMP: (RGBColor, RGBColor) =
    (RGBColor(0xAA, 0xAA, 0xDD), RGBColor(0x02, 0x02, 0x33));
/// Base and saturated ends of the deletion overflow ramp
pub const DELETIONS_RAMP: (RGBColor, RGBColor) =
    (RGBColor(0xDD, 0xAA, 0xAA), RGBColor(0x33, 0x02, 0x02));

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub muted_text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub hover_color: RGBAColor,
    pub tooltip_background: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(30, 30, 30, 1.0),
            muted_text_color: RGBAColor(30, 30, 30, 0.45),
            grid_color: RGBAColor(0, 0, 0, 0.25),
            axis_color: RGBAColor(0, 0, 0, 0.8),
            hover_color: RGBAColor(200, 60, 20, 1.0),
            tooltip_background: RGBAColor(250, 250, 240, 0.95),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub font_size: f32,
    pub small_font_size: f32,
    pub marker_tick: f64,
    pub tooltip_size: (f64, f64),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            small_font_size: 10.0,
            marker_tick: 3.0,
            tooltip_size: (300.0, 60.0),
        }
    }
}

/// Interpolate between two colors in RGB space, rounding each channel.
pub fn interpolate_rgb(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        let (base, dark) = INSERTIONS_RAMP;
        assert_eq!(interpolate_rgb(base, dark, 0.0), base);
        assert_eq!(interpolate_rgb(base, dark, 1.0), dark);
        assert_eq!(interpolate_rgb(base, dark, 2.0), dark);
        assert_eq!(interpolate_rgb(base, dark, 0.5), RGBColor(0x56, 0x56, 0x88));
    }
}
