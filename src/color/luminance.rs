//! Display luminance for zone and histogram work.

use super::transfer::{linear_to_srgb, srgb_to_linear};
use super::Rgb;

/// Rec. 709 red weight.
pub const REC709_R: f64 = 0.2126;
/// Rec. 709 green weight.
pub const REC709_G: f64 = 0.7152;
/// Rec. 709 blue weight.
pub const REC709_B: f64 = 0.0722;

/// Gamma-correct display luminance in `0..=255`.
///
/// Decodes each channel to linear light, weights with Rec. 709, then re-encodes the
/// sum through the sRGB curve before scaling. The re-encode step is what photo
/// editors show as "luminosity"; a single-pass linear sum gives different values.
///
/// ```
/// use colorcard::color::{display_luminance, Rgb};
///
/// assert_eq!(display_luminance(Rgb::WHITE), 255);
/// assert_eq!(display_luminance(Rgb::BLACK), 0);
/// assert_eq!(display_luminance(Rgb::new(128, 128, 128)), 128);
/// ```
#[must_use]
pub fn display_luminance(rgb: Rgb) -> u8 {
    let [r, g, b] = rgb.normalized();
    let linear =
        REC709_R * srgb_to_linear(r) + REC709_G * srgb_to_linear(g) + REC709_B * srgb_to_linear(b);

    (linear_to_srgb(linear) * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((REC709_R + REC709_G + REC709_B - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_extremes_are_fixed_points() {
        assert_eq!(display_luminance(Rgb::WHITE), 255);
        assert_eq!(display_luminance(Rgb::BLACK), 0);
    }

    #[test]
    fn test_grays_preserve_value() {
        // Neutral grays decode and re-encode to themselves
        for v in 0..=255u8 {
            assert_eq!(display_luminance(Rgb::new(v, v, v)), v, "gray {v}");
        }
    }

    #[test]
    fn test_primaries() {
        // Re-encoded Rec. 709 weights of pure primaries
        assert_eq!(display_luminance(Rgb::RED), 127);
        assert_eq!(display_luminance(Rgb::GREEN), 220);
        assert_eq!(display_luminance(Rgb::BLUE), 76);
    }

    #[test]
    fn test_differs_from_single_pass_formula() {
        let naive = |rgb: Rgb| {
            (REC709_R * f64::from(rgb.r) + REC709_G * f64::from(rgb.g) + REC709_B * f64::from(rgb.b))
                .round() as u8
        };
        assert_ne!(display_luminance(Rgb::RED), naive(Rgb::RED));
    }
}
