//! MeasureHUD Visualization - treemap and settings views
//!
//! Two views share this crate. The measures treemap maps a color metric and
//! a size metric onto rectangles (color scales, encoder, tooltips, layout,
//! legend, presenter). The authentication settings view keeps its selected
//! tab in the URL query and lists the definitions of that tab.
//!
//! Both presenters produce a plain render model first and draw it with
//! `ratatui` second, so the same model backs terminal output and text
//! previews.

#![warn(clippy::all, clippy::pedantic)]

use measurehud_core::{
    DefaultMeasureFormatter, Localizer, MeasureFormatter, MessageBundle, Rgb, ServerContext,
};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod authentication;
pub mod color_scale;
pub mod encoder;
pub mod legend;
pub mod tooltip;
pub mod treemap;
pub mod treemap_view;

pub use authentication::{AuthenticationPresenter, AuthenticationRender, AuthenticationTab};
pub use color_scale::{build_scale, ColorScale, LinearScale, ScaleKind, StripeGradient, NA_GRADIENT};
pub use encoder::{EncodedItem, MetricEncoder};
pub use legend::{ColorBoxLegend, ColorGradientLegend, Legend};
pub use tooltip::TooltipFormatter;
pub use treemap::{squarify, LaidOutItem, LayoutRect, TreeMap};
pub use treemap_view::{TreemapPresenter, TreemapProps, TreemapRender};

/// External services the views read from
#[derive(Clone)]
pub struct Collaborators {
    pub localizer: Arc<dyn Localizer>,
    pub formatter: Arc<dyn MeasureFormatter>,
    pub server: ServerContext,
}

impl Collaborators {
    /// Localizer-backed default formatter
    pub fn new(localizer: Arc<dyn Localizer>, server: ServerContext) -> Self {
        let formatter = Arc::new(DefaultMeasureFormatter::new(Arc::clone(&localizer)));
        Self {
            localizer,
            formatter,
            server,
        }
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn MeasureFormatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::new(Arc::new(MessageBundle::with_defaults()), ServerContext::default())
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Treemap height in terminal rows (the area may clip it)
    pub treemap_height: u16,
    /// Number of cells used to draw a gradient legend
    pub legend_width: u16,
    pub color_scheme: ColorScheme,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            treemap_height: 24,
            legend_width: 20,
            color_scheme: ColorScheme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    Dark,
    Light,
    HighContrast,
}

impl ColorScheme {
    pub fn header_style(self) -> Style {
        match self {
            ColorScheme::Dark => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ColorScheme::Light => Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            ColorScheme::HighContrast => Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn content_style(self) -> Style {
        match self {
            ColorScheme::Dark => Style::default().fg(Color::White),
            ColorScheme::Light => Style::default().fg(Color::Black),
            ColorScheme::HighContrast => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        }
    }

    pub fn muted_style(self) -> Style {
        match self {
            ColorScheme::Dark => Style::default().fg(Color::Gray),
            ColorScheme::Light => Style::default().fg(Color::DarkGray),
            ColorScheme::HighContrast => Style::default().fg(Color::White),
        }
    }

    pub fn highlight_style(self) -> Style {
        match self {
            ColorScheme::Dark => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ColorScheme::Light => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ColorScheme::HighContrast => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }
}

/// Terminal color for a palette color
pub fn term_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Black or white, whichever reads better on `background`
pub fn contrast_color(background: Rgb) -> Color {
    let luminance =
        0.299 * f64::from(background.r) + 0.587 * f64::from(background.g) + 0.114 * f64::from(background.b);
    if luminance > 140.0 {
        Color::Black
    } else {
        Color::White
    }
}
