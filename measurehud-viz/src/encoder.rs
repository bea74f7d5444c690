//! Metric encoder: measured components to treemap items.
//!
//! Each component carries the color metric's measure and exactly one other
//! measure, which sizes its rectangle. Components that cannot be sized are
//! dropped; components without a color value get the striped fill.

use crate::color_scale::{build_scale, ColorScale, StripeGradient, NA_GRADIENT};
use crate::tooltip::TooltipFormatter;
use measurehud_core::{
    component_measure_unique_key, Localizer, MeasureFormatter, MeasuredEntity, Metric, Qualifier,
    Rgb,
};

/// Rectangles smaller than this are not worth drawing
pub const MIN_SIZE: f64 = 1.0;

/// One treemap rectangle, rebuilt wholesale on every input change
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedItem {
    pub key: String,
    pub label: String,
    pub icon: Qualifier,
    pub size: f64,
    /// Fill color; `None` exactly when `gradient` is set
    pub color: Option<Rgb>,
    pub gradient: Option<StripeGradient>,
    /// Raw color value the fill was derived from
    pub measure_value: Option<String>,
    pub metric: Metric,
    pub tooltip: String,
    pub component: MeasuredEntity,
}

pub struct MetricEncoder<'a> {
    tooltips: TooltipFormatter<'a>,
}

impl<'a> MetricEncoder<'a> {
    pub fn new(localizer: &'a dyn Localizer, formatter: &'a dyn MeasureFormatter) -> Self {
        Self {
            tooltips: TooltipFormatter::new(localizer, formatter),
        }
    }

    /// Encode `entities` in input order against `color_metric`
    pub fn encode(&self, entities: &[MeasuredEntity], color_metric: &Metric) -> Vec<EncodedItem> {
        let scale = build_scale(color_metric);
        entities
            .iter()
            .filter_map(|entity| self.encode_entity(entity, color_metric, &scale))
            .collect()
    }

    fn encode_entity(
        &self,
        entity: &MeasuredEntity,
        color_metric: &Metric,
        scale: &ColorScale,
    ) -> Option<EncodedItem> {
        let size_measure = entity.other_measure(&color_metric.key)?;
        let color_value = entity
            .measure(&color_metric.key)
            .and_then(|measure| measure.effective_value());

        let size = parse_size(size_measure.effective_value()?)?;
        if size < MIN_SIZE {
            return None;
        }

        let color = color_value.and_then(|value| scale.map(value));
        let gradient = if color.is_none() { Some(NA_GRADIENT) } else { None };

        Some(EncodedItem {
            key: component_measure_unique_key(entity).unwrap_or_default(),
            label: entity.display_name(),
            icon: entity.qualifier,
            size,
            color,
            gradient,
            measure_value: color_value.map(str::to_string),
            metric: color_metric.clone(),
            tooltip: self.tooltips.format(
                entity,
                &size_measure.metric,
                size,
                color_metric,
                color_value,
            ),
            component: entity.clone(),
        })
    }
}

fn parse_size(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|size| size.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use measurehud_core::theme::colors;
    use measurehud_core::{DefaultMeasureFormatter, Measure, MessageBundle, MetricType};
    use std::sync::Arc;

    fn ncloc() -> Metric {
        Metric::new("ncloc", "Lines of Code", MetricType::Int)
    }

    fn coverage() -> Metric {
        Metric::new("coverage", "Coverage", MetricType::Percent).with_higher_values_are_better(true)
    }

    fn component(name: &str, size: Option<&str>, color: Option<&str>) -> MeasuredEntity {
        let mut entity = MeasuredEntity::new(&format!("p:{}", name), name, Qualifier::File);
        if let Some(color) = color {
            entity = entity.with_measure(Measure::new(coverage(), Some(color)));
        }
        entity.with_measure(Measure::new(ncloc(), size))
    }

    fn encode(entities: &[MeasuredEntity], metric: &Metric) -> Vec<EncodedItem> {
        let bundle = Arc::new(MessageBundle::with_defaults());
        let formatter = DefaultMeasureFormatter::new(bundle.clone());
        MetricEncoder::new(bundle.as_ref(), &formatter).encode(entities, metric)
    }

    #[test]
    fn test_encodes_color_size_and_tooltip() {
        let items = encode(&[component("a.rs", Some("250"), Some("100"))], &coverage());
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.key, "p:a.rs");
        assert_eq!(item.label, "a.rs");
        assert_eq!(item.size, 250.0);
        assert_eq!(item.color, Some(colors::GREEN));
        assert_eq!(item.gradient, None);
        assert_eq!(item.measure_value.as_deref(), Some("100"));
        assert_eq!(item.tooltip, "a.rs\nLines of Code: 250\nCoverage: 100.0%");
    }

    #[test]
    fn test_missing_color_gets_na_gradient() {
        let items = encode(&[component("a.rs", Some("10"), None)], &coverage());
        assert_eq!(items[0].color, None);
        assert_eq!(items[0].gradient, Some(NA_GRADIENT));
        assert!(items[0].tooltip.ends_with("Coverage: —"));
    }

    #[test]
    fn test_size_threshold_is_inclusive() {
        let items = encode(
            &[
                component("zero", Some("0"), Some("50")),
                component("fraction", Some("0.99"), Some("50")),
                component("one", Some("1"), Some("50")),
                component("absent", None, Some("50")),
                component("garbage", Some("many"), Some("50")),
            ],
            &coverage(),
        );
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["one"]);
    }

    #[test]
    fn test_entity_without_size_measure_is_dropped() {
        let only_color = MeasuredEntity::new("p:x", "x", Qualifier::File)
            .with_measure(Measure::new(coverage(), Some("40")));
        assert!(encode(&[only_color], &coverage()).is_empty());
    }

    #[test]
    fn test_diff_metrics_read_delta_values() {
        let new_coverage = Metric::new("new_coverage", "Coverage on New Code", MetricType::Percent)
            .with_higher_values_are_better(true);
        let new_lines = Metric::new("new_lines", "New Lines", MetricType::Int);
        let entity = MeasuredEntity::new("p:d", "d", Qualifier::Directory)
            .with_measure(Measure::new(new_coverage.clone(), Some("0")).with_delta("100"))
            .with_measure(Measure::new(new_lines, Some("999")).with_delta("12"));

        let items = encode(&[entity], &new_coverage);
        assert_eq!(items[0].size, 12.0);
        assert_eq!(items[0].color, Some(colors::GREEN));
        assert_eq!(items[0].measure_value.as_deref(), Some("100"));
    }

    #[test]
    fn test_level_metric_colors() {
        let alert = Metric::new("alert_status", "Quality Gate Status", MetricType::Level);
        let entity = MeasuredEntity::new("p:app", "app", Qualifier::Project)
            .with_measure(Measure::new(alert.clone(), Some("ERROR")))
            .with_measure(Measure::new(ncloc(), Some("5")));

        let items = encode(&[entity], &alert);
        assert_eq!(items[0].color, Some(colors::RED));
        assert!(items[0].tooltip.ends_with("Quality Gate Status: Failed"));
    }
}
