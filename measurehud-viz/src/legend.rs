//! Treemap legends: discrete boxes for levels and ratings, a gradient for the rest

use crate::color_scale::{ColorScale, LinearScale, StripeGradient, NA_GRADIENT};
use crate::term_color;
use measurehud_core::{Localizer, MeasureFormatter, Metric, MetricType, Rgb};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

const BOX: &str = "■";
const GRADIENT_CELL: &str = "█";

#[derive(Debug, Clone, PartialEq)]
pub struct ColorBoxLegend {
    pub boxes: Vec<(String, Rgb)>,
}

impl ColorBoxLegend {
    /// Boxes in scale order, labels formatted as the metric's type
    pub fn new(scale: &ColorScale, metric_type: MetricType, formatter: &dyn MeasureFormatter) -> Self {
        let boxes = scale
            .legend_stops()
            .into_iter()
            .map(|(value, color)| (formatter.format_measure(&value, metric_type), color))
            .collect();
        Self { boxes }
    }

    pub fn to_line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.boxes.len() * 2);
        for (label, color) in &self.boxes {
            spans.push(Span::styled(BOX, Style::default().fg(term_color(*color))));
            spans.push(Span::raw(format!(" {}  ", label)));
        }
        Line::from(spans)
    }

    pub fn to_text(&self) -> String {
        self.boxes
            .iter()
            .map(|(label, color)| format!("{} {} ({})", BOX, label, color.to_hex()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradientLegend {
    pub scale: LinearScale,
    pub start_label: String,
    pub end_label: String,
    pub na_label: String,
    pub na_gradient: StripeGradient,
    /// Gradient cells drawn between the end labels
    pub width: u16,
}

impl ColorGradientLegend {
    pub fn new(scale: LinearScale, na_label: &str, width: u16) -> Self {
        let start_label = scale.domain().first().map(f64::to_string).unwrap_or_default();
        let end_label = scale.domain().last().map(f64::to_string).unwrap_or_default();
        Self {
            scale,
            start_label,
            end_label,
            na_label: na_label.to_string(),
            na_gradient: NA_GRADIENT,
            width,
        }
    }

    /// Evenly spaced colors from the first to the last domain stop
    pub fn samples(&self) -> Vec<Rgb> {
        let domain = self.scale.domain();
        let (Some(&start), Some(&end)) = (domain.first(), domain.last()) else {
            return Vec::new();
        };
        let cells = self.width.max(1);
        if cells == 1 {
            return vec![self.scale.interpolate(start)];
        }
        let step = (end - start) / f64::from(cells - 1);
        (0..cells)
            .map(|i| self.scale.interpolate(start + step * f64::from(i)))
            .collect()
    }

    pub fn to_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(format!("{} ", self.start_label))];
        spans.extend(
            self.samples()
                .into_iter()
                .map(|color| Span::styled(GRADIENT_CELL, Style::default().fg(term_color(color)))),
        );
        spans.push(Span::raw(format!(" {}   ", self.end_label)));

        let stripes = Style::default()
            .fg(term_color(self.na_gradient.dark))
            .bg(term_color(self.na_gradient.light));
        spans.push(Span::styled("▚▚", stripes));
        spans.push(Span::raw(format!(" {}", self.na_label)));
        Line::from(spans)
    }

    pub fn to_text(&self) -> String {
        let range = self.scale.range();
        let first = range.first().map(Rgb::to_hex).unwrap_or_default();
        let last = range.last().map(Rgb::to_hex).unwrap_or_default();
        format!(
            "{} {} → {} {}  ▚ {}",
            self.start_label, first, last, self.end_label, self.na_label
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    ColorBox(ColorBoxLegend),
    Gradient(ColorGradientLegend),
}

impl Legend {
    /// Legend matching `metric`'s scale
    pub fn for_metric(
        metric: &Metric,
        scale: &ColorScale,
        formatter: &dyn MeasureFormatter,
        localizer: &dyn Localizer,
        width: u16,
    ) -> Self {
        match scale {
            ColorScale::Linear(linear) if !metric.metric_type.has_discrete_legend() => {
                Legend::Gradient(ColorGradientLegend::new(
                    linear.clone(),
                    &localizer.translate(&["na"]),
                    width,
                ))
            }
            _ => Legend::ColorBox(ColorBoxLegend::new(scale, metric.metric_type, formatter)),
        }
    }

    pub fn to_line(&self) -> Line<'static> {
        match self {
            Legend::ColorBox(legend) => legend.to_line(),
            Legend::Gradient(legend) => legend.to_line(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Legend::ColorBox(legend) => legend.to_text(),
            Legend::Gradient(legend) => legend.to_text(),
        }
    }
}

impl Widget for &Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &self.to_line(), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_scale::build_scale;
    use measurehud_core::theme::colors;
    use measurehud_core::{DefaultMeasureFormatter, MessageBundle};
    use std::sync::Arc;

    fn legend(metric: &Metric) -> Legend {
        let bundle = Arc::new(MessageBundle::with_defaults());
        let formatter = DefaultMeasureFormatter::new(bundle.clone());
        Legend::for_metric(metric, &build_scale(metric), &formatter, bundle.as_ref(), 5)
    }

    #[test]
    fn test_level_legend_boxes() {
        let metric = Metric::new("alert_status", "Quality Gate", MetricType::Level);
        let Legend::ColorBox(boxes) = legend(&metric) else {
            panic!("expected box legend");
        };
        let labels: Vec<&str> = boxes.boxes.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["Failed", "Warning", "Passed", "None"]);
        assert_eq!(boxes.boxes[0].1, colors::RED);
    }

    #[test]
    fn test_rating_legend_boxes() {
        let metric = Metric::new("sqale_rating", "Maintainability", MetricType::Rating);
        let Legend::ColorBox(boxes) = legend(&metric) else {
            panic!("expected box legend");
        };
        let labels: Vec<&str> = boxes.boxes.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_gradient_legend() {
        let metric = Metric::new("coverage", "Coverage", MetricType::Percent).with_higher_values_are_better(true);
        let Legend::Gradient(gradient) = legend(&metric) else {
            panic!("expected gradient legend");
        };
        assert_eq!(gradient.start_label, "0");
        assert_eq!(gradient.end_label, "100");
        assert_eq!(gradient.na_label, "N/A");

        let samples = gradient.samples();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], colors::RED);
        assert_eq!(samples[2], colors::YELLOW);
        assert_eq!(samples[4], colors::GREEN);
        assert_eq!(gradient.to_text(), "0 #d4333f → #00aa00 100  ▚ N/A");
    }

    #[test]
    fn test_legend_widget_draws_boxes() {
        let metric = Metric::new("alert_status", "Quality Gate", MetricType::Level);
        let legend = legend(&metric);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        (&legend).render(Rect::new(0, 0, 40, 1), &mut buf);
        assert_eq!(buf.get(0, 0).fg, term_color(colors::RED));
        assert_eq!(buf.get(0, 0).symbol(), BOX);
    }
}
