//! Measure value formatting
//!
//! Raw measure values are strings; the display type decides how they read.
//! Anything that fails to parse as a number is shown unchanged.

use crate::l10n::Localizer;
use crate::models::MetricType;
use std::sync::Arc;

pub trait MeasureFormatter: Send + Sync {
    fn format_measure(&self, value: &str, metric_type: MetricType) -> String;
}

const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 8;
const MINUTES_PER_DAY: i64 = MINUTES_PER_HOUR * HOURS_PER_DAY;
const RATING_LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Formatter with the dashboard's conventions; levels go through the localizer
pub struct DefaultMeasureFormatter {
    localizer: Arc<dyn Localizer>,
}

impl DefaultMeasureFormatter {
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self { localizer }
    }
}

impl MeasureFormatter for DefaultMeasureFormatter {
    fn format_measure(&self, value: &str, metric_type: MetricType) -> String {
        if metric_type == MetricType::Level {
            return self.localizer.translate(&["metric", "level", value]);
        }

        let Ok(number) = value.trim().parse::<f64>() else {
            return value.to_string();
        };
        if !number.is_finite() {
            return value.to_string();
        }

        match metric_type {
            MetricType::Int => format_int(number),
            MetricType::ShortInt => format_short_int(number),
            MetricType::Float => format_float(number),
            MetricType::Percent => format!("{:.1}%", number),
            MetricType::Rating => format_rating(number).unwrap_or_else(|| value.to_string()),
            MetricType::Millisec => format_millis(number),
            MetricType::WorkDur => format_work_duration(number),
            MetricType::ShortWorkDur => format_short_work_duration(number),
            _ => value.to_string(),
        }
    }
}

/// Integer with comma thousands separators
#[allow(clippy::cast_possible_truncation)]
fn format_int(number: f64) -> String {
    let rounded = number.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn format_short_int(number: f64) -> String {
    let abs = number.abs();
    if abs < 1_000.0 {
        format_int(number)
    } else if abs < 10_000.0 {
        format!("{}k", trim_fraction(format!("{:.1}", number / 1_000.0)))
    } else if abs < 1_000_000.0 {
        format!("{:.0}k", number / 1_000.0)
    } else if abs < 10_000_000.0 {
        format!("{}M", trim_fraction(format!("{:.1}", number / 1_000_000.0)))
    } else {
        format!("{:.0}M", number / 1_000_000.0)
    }
}

/// One to five fraction digits
fn format_float(number: f64) -> String {
    let text = trim_fraction(format!("{:.5}", number));
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_rating(number: f64) -> Option<String> {
    let rounded = number.round();
    if (1.0..=5.0).contains(&rounded) {
        Some(RATING_LETTERS[rounded as usize - 1].to_string())
    } else {
        None
    }
}

fn format_millis(number: f64) -> String {
    let abs = number.abs();
    if abs < 1_000.0 {
        format!("{:.0}ms", number)
    } else if abs < 60_000.0 {
        format!("{}s", trim_fraction(format!("{:.1}", number / 1_000.0)))
    } else {
        format!("{}min", trim_fraction(format!("{:.1}", number / 60_000.0)))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_work_duration(number: f64) -> String {
    let minutes = number.round() as i64;
    if minutes == 0 {
        return "0".to_string();
    }
    let sign = if minutes < 0 { "-" } else { "" };
    let total = minutes.abs();
    let days = total / MINUTES_PER_DAY;
    let hours = (total % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let remaining = total % MINUTES_PER_HOUR;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
        if hours > 0 {
            parts.push(format!("{}h", hours));
        }
    } else {
        if hours > 0 {
            parts.push(format!("{}h", hours));
        }
        if remaining > 0 {
            parts.push(format!("{}min", remaining));
        }
    }
    format!("{}{}", sign, parts.join(" "))
}

#[allow(clippy::cast_precision_loss)]
fn format_short_work_duration(number: f64) -> String {
    let abs = number.abs();
    let sign = if number < 0.0 { "-" } else { "" };
    if abs == 0.0 {
        "0".to_string()
    } else if abs >= MINUTES_PER_DAY as f64 {
        format!("{}{:.0}d", sign, abs / MINUTES_PER_DAY as f64)
    } else if abs >= MINUTES_PER_HOUR as f64 {
        format!("{}{:.0}h", sign, abs / MINUTES_PER_HOUR as f64)
    } else {
        format!("{}{:.0}min", sign, abs)
    }
}
