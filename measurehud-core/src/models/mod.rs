//! Data model shared by the dashboard views.
//!
//! Values arrive from the backend already computed; nothing here derives
//! measures. Measures and metrics are `Hash` so presenters can memoize on
//! structure instead of object identity.

mod document;
mod measure;
mod metric;
mod settings;

pub use document::{MeasuresDocument, RawComponent, RawMeasure, RawPeriod, SettingsDocument};
pub use measure::{component_measure_unique_key, Measure, MeasuredEntity, Qualifier};
pub use metric::{is_diff_metric, keys, Metric, MetricType};
pub use settings::{AlmKey, SettingDefinition, AUTHENTICATION_CATEGORY};
