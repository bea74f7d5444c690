//! Treemap tooltips: name, size line, color line.

use measurehud_core::{Localizer, MeasureFormatter, MeasuredEntity, Metric};

/// Shown in place of a missing color value
pub const MISSING_VALUE: &str = "—";

pub struct TooltipFormatter<'a> {
    localizer: &'a dyn Localizer,
    formatter: &'a dyn MeasureFormatter,
}

impl<'a> TooltipFormatter<'a> {
    pub fn new(localizer: &'a dyn Localizer, formatter: &'a dyn MeasureFormatter) -> Self {
        Self {
            localizer,
            formatter,
        }
    }

    pub fn format(
        &self,
        entity: &MeasuredEntity,
        size_metric: &Metric,
        size_value: f64,
        color_metric: &Metric,
        color_value: Option<&str>,
    ) -> String {
        let formatted_size = self
            .formatter
            .format_measure(&size_value.to_string(), size_metric.metric_type);
        let formatted_color = match color_value {
            Some(value) => self.formatter.format_measure(value, color_metric.metric_type),
            None => MISSING_VALUE.to_string(),
        };

        format!(
            "{}\n{}: {}\n{}: {}",
            entity.display_name(),
            self.localizer.localized_metric_name(size_metric),
            formatted_size,
            self.localizer.localized_metric_name(color_metric),
            formatted_color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measurehud_core::{DefaultMeasureFormatter, MessageBundle, MetricType, Qualifier};
    use std::sync::Arc;

    #[test]
    fn test_three_line_tooltip() {
        let bundle = Arc::new(MessageBundle::with_defaults());
        let formatter = DefaultMeasureFormatter::new(bundle.clone());
        let tooltips = TooltipFormatter::new(bundle.as_ref(), &formatter);

        let entity = MeasuredEntity::new("p:src", "src", Qualifier::Directory).with_branch("main");
        let ncloc = Metric::new("ncloc", "ncloc", MetricType::Int);
        let coverage = Metric::new("coverage", "Coverage", MetricType::Percent);

        assert_eq!(
            tooltips.format(&entity, &ncloc, 12500.0, &coverage, Some("81.24")),
            "src / main\nLines of Code: 12,500\nCoverage: 81.2%"
        );
        assert_eq!(
            tooltips.format(&entity, &ncloc, 3.0, &coverage, None),
            "src / main\nLines of Code: 3\nCoverage: —"
        );
    }
}
