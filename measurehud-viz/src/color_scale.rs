//! Color scales for treemap fills
//!
//! The scale kind is resolved once per metric: levels map onto four fixed
//! colors, ratings and everything else interpolate a five-color ramp. Only
//! the percentage ramp follows the metric's direction.

use measurehud_core::theme::colors;
use measurehud_core::{Metric, MetricType, Rgb};

/// Good-to-bad ramp shared by linear scales
pub const RAMP: [Rgb; 5] = [
    colors::GREEN,
    colors::LIGHT_GREEN,
    colors::YELLOW,
    colors::ORANGE,
    colors::RED,
];

/// Level domain in display order
pub const LEVELS: [&str; 4] = ["ERROR", "WARN", "OK", "NONE"];
pub const LEVEL_COLORS: [Rgb; 4] = [colors::RED, colors::ORANGE, colors::GREEN, colors::GRAY_71];

pub const RATING_DOMAIN: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
pub const PERCENT_DOMAIN: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Two-tone diagonal stripes used where no color value exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StripeGradient {
    pub angle: i16,
    pub light: Rgb,
    pub dark: Rgb,
}

pub const NA_GRADIENT: StripeGradient = StripeGradient {
    angle: -45,
    light: colors::GRAY_71,
    dark: colors::GRAY_60,
};

impl StripeGradient {
    /// CSS `linear-gradient` with hard stops at each quarter
    pub fn to_css(&self) -> String {
        let light = self.light.to_hex();
        let dark = self.dark.to_hex();
        format!(
            "linear-gradient({}deg, {l} 25%, {d} 25%, {d} 50%, {l} 50%, {l} 75%, {d} 75%, {d} 100%)",
            self.angle,
            l = light,
            d = dark
        )
    }

    /// Stripe color of a terminal cell; stripes are two columns wide
    pub fn color_at(&self, x: u16, y: u16) -> Rgb {
        let diagonal = if self.angle < 0 {
            u32::from(x) + u32::from(y)
        } else {
            u32::from(x) + u32::from(u16::MAX - y)
        };
        if (diagonal / 2) % 2 == 0 {
            self.light
        } else {
            self.dark
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Level,
    Rating,
    Percentage { higher_is_better: bool },
}

impl ScaleKind {
    /// Unrecognized metric types fall into the percentage branch
    pub fn for_metric(metric: &Metric) -> Self {
        match metric.metric_type {
            MetricType::Level => ScaleKind::Level,
            MetricType::Rating => ScaleKind::Rating,
            _ => ScaleKind::Percentage {
                higher_is_better: metric.higher_is_better(),
            },
        }
    }
}

/// Piecewise-linear RGB interpolation over numeric breakpoints
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: Vec<f64>,
    range: Vec<Rgb>,
}

impl LinearScale {
    /// `domain` must be ascending and as long as `range` (at least two stops)
    pub fn new(domain: &[f64], range: &[Rgb]) -> Self {
        debug_assert!(domain.len() >= 2 && domain.len() == range.len());
        Self {
            domain: domain.to_vec(),
            range: range.to_vec(),
        }
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[Rgb] {
        &self.range
    }

    /// Outside the domain the edge segment is extrapolated and channels clamp
    pub fn interpolate(&self, x: f64) -> Rgb {
        let last_segment = self.domain.len() - 2;
        let mut segment = 0;
        while segment < last_segment && x >= self.domain[segment + 1] {
            segment += 1;
        }

        let (d0, d1) = (self.domain[segment], self.domain[segment + 1]);
        let t = if (d1 - d0).abs() < f64::EPSILON {
            0.0
        } else {
            (x - d0) / (d1 - d0)
        };
        let (from, to) = (self.range[segment], self.range[segment + 1]);
        Rgb::new(
            lerp_channel(from.r, to.r, t),
            lerp_channel(from.g, to.g, t),
            lerp_channel(from.b, to.b, t),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// Discrete level colors; unknown levels take the last (NONE) color
    Ordinal {
        domain: Vec<&'static str>,
        range: Vec<Rgb>,
    },
    Linear(LinearScale),
}

impl ColorScale {
    /// Color for a raw measure value, `None` when it cannot be placed
    pub fn map(&self, value: &str) -> Option<Rgb> {
        match self {
            ColorScale::Ordinal { domain, range } => {
                let value = value.trim();
                let index = domain
                    .iter()
                    .position(|level| *level == value)
                    .unwrap_or(domain.len() - 1);
                range.get(index).copied()
            }
            ColorScale::Linear(scale) => {
                let number = value.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
                Some(scale.interpolate(number))
            }
        }
    }

    /// Breakpoints as raw values paired with their colors, in domain order
    pub fn legend_stops(&self) -> Vec<(String, Rgb)> {
        match self {
            ColorScale::Ordinal { domain, range } => domain
                .iter()
                .zip(range)
                .map(|(level, color)| ((*level).to_string(), *color))
                .collect(),
            ColorScale::Linear(scale) => scale
                .domain()
                .iter()
                .zip(scale.range())
                .map(|(value, color)| (value.to_string(), *color))
                .collect(),
        }
    }
}

pub fn level_scale() -> ColorScale {
    ColorScale::Ordinal {
        domain: LEVELS.to_vec(),
        range: LEVEL_COLORS.to_vec(),
    }
}

pub fn rating_scale() -> ColorScale {
    ColorScale::Linear(LinearScale::new(&RATING_DOMAIN, &RAMP))
}

pub fn percent_scale(higher_is_better: bool) -> ColorScale {
    let mut range = RAMP;
    if higher_is_better {
        range.reverse();
    }
    ColorScale::Linear(LinearScale::new(&PERCENT_DOMAIN, &range))
}

/// Scale for `metric`; never fails
pub fn build_scale(metric: &Metric) -> ColorScale {
    match ScaleKind::for_metric(metric) {
        ScaleKind::Level => level_scale(),
        ScaleKind::Rating => rating_scale(),
        ScaleKind::Percentage { higher_is_better } => percent_scale(higher_is_better),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(metric_type: MetricType, higher_is_better: Option<bool>) -> Metric {
        let mut metric = Metric::new("m", "M", metric_type);
        metric.higher_values_are_better = higher_is_better;
        metric
    }

    #[test]
    fn test_level_scale_fixed_colors() {
        let scale = build_scale(&metric(MetricType::Level, None));
        assert_eq!(scale.map("ERROR"), Some(colors::RED));
        assert_eq!(scale.map("WARN"), Some(colors::ORANGE));
        assert_eq!(scale.map("OK"), Some(colors::GREEN));
        assert_eq!(scale.map("NONE"), Some(colors::GRAY_71));
        assert_eq!(scale.map("SOMETHING"), Some(colors::GRAY_71));
    }

    #[test]
    fn test_rating_scale_ends_ignore_direction() {
        for direction in [None, Some(true), Some(false)] {
            let scale = build_scale(&metric(MetricType::Rating, direction));
            assert_eq!(scale.map("1"), Some(colors::GREEN));
            assert_eq!(scale.map("5"), Some(colors::RED));
            assert_eq!(scale.map("3.0"), Some(colors::YELLOW));
        }
    }

    #[test]
    fn test_percent_scale_reverses_with_direction() {
        let lower = build_scale(&metric(MetricType::Percent, Some(false)));
        let higher = build_scale(&metric(MetricType::Percent, Some(true)));

        assert_eq!(lower.map("0"), Some(colors::GREEN));
        assert_eq!(lower.map("100"), Some(colors::RED));
        assert_eq!(higher.map("0"), Some(colors::RED));
        assert_eq!(higher.map("100"), Some(colors::GREEN));
        assert_eq!(higher.map("50"), Some(colors::YELLOW));
    }

    #[test]
    fn test_other_types_use_percentage_branch() {
        let scale = build_scale(&metric(MetricType::Int, None));
        assert_eq!(ScaleKind::for_metric(&metric(MetricType::Int, None)), ScaleKind::Percentage { higher_is_better: false });
        assert_eq!(scale.map("25"), Some(colors::LIGHT_GREEN));
    }

    #[test]
    fn test_interpolation_between_stops() {
        let scale = LinearScale::new(&[0.0, 10.0], &[Rgb::new(0, 0, 0), Rgb::new(200, 100, 50)]);
        assert_eq!(scale.interpolate(5.0), Rgb::new(100, 50, 25));
        // Extrapolated past the end and clamped
        assert_eq!(scale.interpolate(20.0), Rgb::new(255, 200, 100));
        assert_eq!(scale.interpolate(-10.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_legend_stops() {
        let stops = build_scale(&metric(MetricType::Rating, None)).legend_stops();
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0], ("1".to_string(), colors::GREEN));
        assert_eq!(stops[4], ("5".to_string(), colors::RED));

        let levels = level_scale().legend_stops();
        assert_eq!(levels[1], ("WARN".to_string(), colors::ORANGE));
    }

    #[test]
    fn test_non_numeric_value_has_no_color() {
        let scale = build_scale(&metric(MetricType::Percent, None));
        assert_eq!(scale.map("abc"), None);
        assert_eq!(scale.map("NaN"), None);
    }

    #[test]
    fn test_na_gradient() {
        assert!(NA_GRADIENT.to_css().starts_with("linear-gradient(-45deg, #b4b4b4 25%, #999999 25%"));
        assert_eq!(NA_GRADIENT.color_at(0, 0), colors::GRAY_71);
        assert_eq!(NA_GRADIENT.color_at(2, 0), colors::GRAY_60);
        assert_eq!(NA_GRADIENT.color_at(1, 1), colors::GRAY_60);
    }
}
