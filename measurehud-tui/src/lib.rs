//! MeasureHUD TUI - terminal front end for the measures treemap and the
//! authentication settings panel
//!
//! Two ways in: a text preview (rendered off-screen, printed to stdout) and
//! an interactive session on the alternate screen.

#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use measurehud_core::{MeasuresDocument, MessageBundle, QueryParams, ServerContext, SettingsDocument};
use measurehud_utils::config::ConfigBuilder;
use measurehud_utils::logging::{LogLevel, LoggerConfig};
use measurehud_viz::{
    AuthenticationPresenter, Collaborators, ColorScheme, TreemapPresenter, TreemapProps, VizConfig,
};
use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod interactive;

pub use interactive::{run_authentication, run_treemap, TerminalSession};

/// Application configuration, loaded from TOML, JSON or YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureHudConfig {
    /// Where the dashboard is mounted; prefixes icon and documentation links
    pub base_url: String,
    pub log_level: LogLevel,
    /// Extra message bundle merged over the built-in messages
    pub messages: Option<PathBuf>,
    pub treemap: TreemapSection,
    pub color_scheme: ColorScheme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapSection {
    pub height: u16,
    pub legend_width: u16,
}

impl Default for TreemapSection {
    fn default() -> Self {
        let viz = VizConfig::default();
        Self {
            height: viz.treemap_height,
            legend_width: viz.legend_width,
        }
    }
}

impl Default for MeasureHudConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            log_level: LogLevel::Info,
            messages: None,
            treemap: TreemapSection::default(),
            color_scheme: ColorScheme::Dark,
        }
    }
}

impl MeasureHudConfig {
    /// Defaults overlaid with `path` when given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = ConfigBuilder::<Self>::new()
            .load_optional(path)
            .with_context(|| match path {
                Some(path) => format!("Failed to load config from {}", path.display()),
                None => "Failed to build default config".to_string(),
            })?
            .build();
        Ok(config)
    }

    pub fn viz_config(&self) -> VizConfig {
        VizConfig {
            treemap_height: self.treemap.height,
            legend_width: self.treemap.legend_width,
            color_scheme: self.color_scheme,
        }
    }

    /// `verbose` forces debug output regardless of the configured level
    pub fn logger_config(&self, verbose: bool) -> LoggerConfig {
        LoggerConfig {
            level: if verbose { LogLevel::Debug } else { self.log_level },
            ..LoggerConfig::default()
        }
    }

    pub fn collaborators(&self) -> Result<Collaborators> {
        let mut bundle = MessageBundle::with_defaults();
        if let Some(path) = &self.messages {
            let overrides = MessageBundle::load(path)
                .with_context(|| format!("Failed to load messages from {}", path.display()))?;
            bundle.merge(overrides);
        }
        Ok(Collaborators::new(
            Arc::new(bundle),
            ServerContext::new(&self.base_url),
        ))
    }
}

pub fn treemap_presenter(
    config: &MeasureHudConfig,
    components: &Path,
    metric_key: &str,
) -> Result<TreemapPresenter> {
    let document = MeasuresDocument::load(components)
        .with_context(|| format!("Failed to read components from {}", components.display()))?;
    let props = TreemapProps::from_document(&document, metric_key)?;
    Ok(TreemapPresenter::new(props, config.collaborators()?).with_config(config.viz_config()))
}

pub fn authentication_presenter(
    config: &MeasureHudConfig,
    definitions: &Path,
) -> Result<AuthenticationPresenter> {
    let document = SettingsDocument::load(definitions)
        .with_context(|| format!("Failed to read definitions from {}", definitions.display()))?;
    Ok(
        AuthenticationPresenter::new(document.definitions, config.collaborators()?)
            .with_color_scheme(config.color_scheme),
    )
}

/// Draw once into an off-screen buffer and return its rows as text
pub fn render_snapshot<F>(width: u16, height: u16, draw: F) -> Result<String>
where
    F: FnOnce(&mut Frame),
{
    let mut terminal =
        Terminal::new(TestBackend::new(width, height)).context("Failed to create preview backend")?;
    terminal
        .draw(draw)
        .context("Failed to render preview")?;

    let buffer = terminal.backend().buffer();
    let rows: Vec<String> = (0..buffer.area.height)
        .map(|y| {
            let row: String = (0..buffer.area.width)
                .map(|x| buffer.get(x, y).symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect();
    Ok(rows.join("\n"))
}

/// Treemap preview: the text model followed by a drawn snapshot
pub fn treemap_preview(presenter: &mut TreemapPresenter, width: u16, height: u16) -> Result<String> {
    let snapshot = render_snapshot(width, height, |frame| {
        let area = frame.size();
        presenter.render(frame, area);
    })?;
    Ok(format!("{}\n\n{}\n", presenter.preview_text(), snapshot))
}

pub fn authentication_preview(
    presenter: &AuthenticationPresenter,
    query: &QueryParams,
    width: u16,
    height: u16,
) -> Result<String> {
    let snapshot = render_snapshot(width, height, |frame| {
        let area = frame.size();
        presenter.render(frame, area, query);
    })?;
    Ok(format!("{}\n{}\n", presenter.preview_text(query), snapshot))
}
