//! MeasureHUD Core - measures model and dashboard collaborators
//!
//! Everything the views consume but do not own lives here: the metric,
//! measure and setting-definition model as the backend shapes it, and the
//! small collaborator interfaces (localization, measure formatting, URL
//! query handling, base URL) with their default implementations.

#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod format;
pub mod l10n;
pub mod models;
pub mod query;
pub mod system;
pub mod theme;

pub use error::{CoreError, Result};
pub use format::{DefaultMeasureFormatter, MeasureFormatter};
pub use l10n::{Localizer, MessageBundle};
pub use models::{
    component_measure_unique_key, is_diff_metric, AlmKey, MeasuredEntity, Measure,
    MeasuresDocument, Metric, MetricType, Qualifier, SettingDefinition, SettingsDocument,
    AUTHENTICATION_CATEGORY,
};
pub use query::QueryParams;
pub use system::ServerContext;
pub use theme::Rgb;
