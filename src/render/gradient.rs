#![forbid(unsafe_code)]

//! Color gradients over styled lines.
//!
//! Interpolation happens in linear RGB via `palette`'s [`Mix`], which keeps
//! midpoints from washing out the way naive sRGB byte averaging does. A
//! gradient is a list of stops; positions in `0.0..=1.0` map onto the stop
//! sequence and positions past `1.0` wrap, which is what animation phases
//! rely on.

use std::time::{SystemTime, UNIX_EPOCH};

use palette::{Hsv, IntoColor, LinSrgb, Mix, Srgb};
use unicode_width::UnicodeWidthChar;

use super::{Line, Span};

/// Degrees between consecutive hues of an automatic gradient.
const AUTO_HUE_STEP: f32 = 30.0;

/// The color options of one command, before they are resolved into
/// concrete gradients. Explicit colors win over `--rainbow`; with neither,
/// a partial hue wheel is generated from `hues` stops.
#[derive(Debug, Clone, Default)]
pub struct GradientSpec {
    pub colors: Vec<Srgb<u8>>,
    pub bg_colors: Vec<Srgb<u8>>,
    pub rainbow: bool,
    pub hues: usize,
}

impl GradientSpec {
    /// Resolves the foreground gradient.
    pub fn foreground(&self) -> Gradient {
        if !self.colors.is_empty() {
            Gradient::new(&self.colors)
        } else if self.rainbow {
            Gradient::rainbow(self.hues)
        } else {
            Gradient::auto(self.hues)
        }
    }

    /// Resolves the background gradient, if background colors were given.
    pub fn background(&self) -> Option<Gradient> {
        if self.bg_colors.is_empty() {
            None
        } else {
            Some(Gradient::new(&self.bg_colors))
        }
    }
}

/// An interpolated sequence of color stops.
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: Vec<LinSrgb>,
}

impl Gradient {
    /// Builds a gradient from explicit stops. A single stop repeats into a
    /// flat gradient; callers pass at least one color.
    pub fn new(colors: &[Srgb<u8>]) -> Self {
        debug_assert!(!colors.is_empty(), "gradient needs at least one stop");
        let mut stops: Vec<LinSrgb> = colors
            .iter()
            .map(|c| c.into_format::<f32>().into_linear())
            .collect();
        if stops.len() < 2 {
            stops.resize(2, stops.first().copied().unwrap_or_default());
        }
        Gradient { stops }
    }

    /// A full hue wheel: starts at red, runs through the spectrum, and
    /// wraps back to red.
    pub fn rainbow(hues: usize) -> Self {
        let hues = hues.max(2);
        let stops = (0..hues)
            .map(|i| hue_stop(360.0 * i as f32 / (hues - 1) as f32))
            .collect();
        Gradient { stops }
    }

    /// A partial hue arc starting at a clock-derived hue, so repeated runs
    /// drift through the wheel.
    pub fn auto(hues: usize) -> Self {
        let hues = hues.max(2);
        let start = auto_start_hue();
        let stops = (0..hues)
            .map(|i| hue_stop(start + AUTO_HUE_STEP * i as f32))
            .collect();
        Gradient { stops }
    }

    /// Number of color stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Color at position `t`. Values in `0.0..=1.0` span the stops; values
    /// above `1.0` wrap around, negatives clamp to the first stop.
    pub fn at(&self, t: f32) -> Srgb<u8> {
        let t = if t > 1.0 { t.fract() } else { t.max(0.0) };
        let last = self.stops.len() - 1;
        if last == 0 {
            return to_u8(self.stops[0]);
        }
        let scaled = t * last as f32;
        let idx = (scaled.floor() as usize).min(last - 1);
        let frac = scaled - idx as f32;
        to_u8(self.stops[idx].mix(self.stops[idx + 1], frac))
    }
}

/// Recolors a line cell by cell. Foreground and background gradients
/// replace the span colors; every other attribute of the original style
/// survives. `phase` shifts the gradient for animation frames.
pub fn colorize_line(
    line: &Line,
    fg: Option<&Gradient>,
    bg: Option<&Gradient>,
    phase: f32,
) -> Line {
    let total = line.width();
    let divisor = total.saturating_sub(1).max(1) as f32;
    let mut out = Line::default();
    let mut cell = 0usize;
    for span in &line.spans {
        for ch in span.text.chars() {
            let t = cell as f32 / divisor;
            let mut style = span.style;
            if let Some(gradient) = fg {
                style.fg = Some(gradient.at(t + phase));
            }
            if let Some(gradient) = bg {
                style.bg = Some(gradient.at(t + phase));
            }
            out.push(Span::new(ch.to_string(), style));
            cell += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    out
}

fn hue_stop(degrees: f32) -> LinSrgb {
    let rgb: Srgb = Hsv::new(degrees, 1.0, 1.0).into_color();
    rgb.into_linear()
}

fn auto_start_hue() -> f32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos % 360) as f32
}

fn to_u8(lin: LinSrgb) -> Srgb<u8> {
    let srgb: Srgb = Srgb::from_linear(lin);
    srgb.into_format()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::Style;

    const RED: Srgb<u8> = Srgb::new(255, 0, 0);
    const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);

    fn red_blue() -> Gradient {
        Gradient::new(&[RED, BLUE])
    }

    #[test]
    fn test_endpoints_hit_the_exact_stops() {
        let gradient = red_blue();
        assert_eq!(gradient.at(0.0), RED);
        assert_eq!(gradient.at(1.0), BLUE);
    }

    #[test]
    fn test_midpoint_blends_both_endpoints() {
        let mid = red_blue().at(0.5);
        assert!(mid.red > 0 && mid.blue > 0);
        assert_eq!(mid.green, 0);
    }

    #[test]
    fn test_positions_past_one_wrap_around() {
        let gradient = red_blue();
        assert_eq!(gradient.at(1.25), gradient.at(0.25));
    }

    #[test]
    fn test_negative_positions_clamp_to_first_stop() {
        assert_eq!(red_blue().at(-0.5), RED);
    }

    #[test]
    fn test_single_stop_is_flat() {
        let gradient = Gradient::new(&[RED]);
        assert_eq!(gradient.at(0.0), RED);
        assert_eq!(gradient.at(0.7), RED);
    }

    #[test]
    fn test_rainbow_starts_and_ends_red() {
        let gradient = Gradient::rainbow(7);
        assert_eq!(gradient.stop_count(), 7);
        assert_eq!(gradient.at(0.0), RED);
        assert_eq!(gradient.at(1.0), RED);
    }

    #[test]
    fn test_auto_stops_are_fully_saturated() {
        // The start hue comes from the clock, so only shape properties are
        // stable: stop count and full saturation at a stop position.
        let gradient = Gradient::auto(5);
        assert_eq!(gradient.stop_count(), 5);
        let first = gradient.at(0.0);
        assert_eq!(first.red.max(first.green).max(first.blue), 255);
    }

    #[test]
    fn test_hue_floor_is_two_stops() {
        assert_eq!(Gradient::rainbow(0).stop_count(), 2);
        assert_eq!(Gradient::auto(1).stop_count(), 2);
    }

    #[test]
    fn test_spec_explicit_colors_beat_rainbow() {
        let spec = GradientSpec {
            colors: vec![RED, BLUE],
            rainbow: true,
            hues: 7,
            ..GradientSpec::default()
        };
        assert_eq!(spec.foreground().at(0.0), RED);
    }

    #[test]
    fn test_spec_background_absent_without_bgcolors() {
        let spec = GradientSpec {
            hues: 3,
            ..GradientSpec::default()
        };
        assert!(spec.background().is_none());
        let with_bg = GradientSpec {
            bg_colors: vec![BLUE],
            hues: 3,
            ..GradientSpec::default()
        };
        assert!(with_bg.background().is_some());
    }

    #[test]
    fn test_colorize_line_sweeps_and_keeps_attributes() {
        let mut line = Line::default();
        let bold = Style {
            bold: true,
            ..Style::default()
        };
        line.push(Span::new("abcd", bold));
        let gradient = red_blue();
        let colored = colorize_line(&line, Some(&gradient), None, 0.0);
        assert_eq!(colored.spans.len(), 4);
        assert_eq!(colored.spans[0].style.fg, Some(RED));
        assert_eq!(colored.spans[3].style.fg, Some(BLUE));
        assert!(colored.spans.iter().all(|s| s.style.bold));
    }

    #[test]
    fn test_colorize_line_sets_background_when_asked() {
        let mut line = Line::default();
        line.push(Span::plain("ab"));
        let fg = red_blue();
        let bg = Gradient::new(&[BLUE, RED]);
        let colored = colorize_line(&line, Some(&fg), Some(&bg), 0.0);
        assert_eq!(colored.spans[0].style.fg, Some(RED));
        assert_eq!(colored.spans[0].style.bg, Some(BLUE));
    }
}
