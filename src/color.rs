use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color names → RGBColor
// ---------------------------------------------------------------------------

/// Resolve a colour name to RGB.
///
/// Accepts the CSS/X11 names known to `palette` (`"orange"`, `"purple"`, ...)
/// and the single-letter shorthands `r g b c m y k w`.
pub fn parse_color(name: &str) -> Result<RGBColor, ReportError> {
    let key = name.trim().to_ascii_lowercase();
    let full = match key.as_str() {
        "r" => "red",
        "g" => "green",
        "b" => "blue",
        "c" => "cyan",
        "m" => "magenta",
        "y" => "yellow",
        "k" => "black",
        "w" => "white",
        other => other,
    };

    palette::named::from_str(full)
        .map(|c: Srgb<u8>| RGBColor(c.red, c.green, c.blue))
        .ok_or_else(|| ReportError::UnknownColor(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_group_colors_resolve() {
        assert_eq!(parse_color("red").unwrap(), RGBColor(255, 0, 0));
        assert_eq!(parse_color("green").unwrap(), RGBColor(0, 128, 0));
        assert_eq!(parse_color("blue").unwrap(), RGBColor(0, 0, 255));
        assert_eq!(parse_color("orange").unwrap(), RGBColor(255, 165, 0));
        assert_eq!(parse_color("black").unwrap(), RGBColor(0, 0, 0));
        assert_eq!(parse_color("purple").unwrap(), RGBColor(128, 0, 128));
    }

    #[test]
    fn shorthand_and_case_are_accepted() {
        assert_eq!(parse_color("r").unwrap(), parse_color("red").unwrap());
        assert_eq!(parse_color("k").unwrap(), parse_color("black").unwrap());
        assert_eq!(parse_color(" Orange ").unwrap(), RGBColor(255, 165, 0));
    }

    #[test]
    fn unknown_color_is_rejected() {
        let err = parse_color("not-a-colour").unwrap_err();
        assert!(matches!(err, ReportError::UnknownColor(ref n) if n == "not-a-colour"));
    }

    #[test]
    fn palette_yields_distinct_colors() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
