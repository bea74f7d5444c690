//! Measures treemap presenter
//!
//! Holds the encoded items for the current `(components, metric)` pair and
//! only re-encodes when a structurally different pair arrives. Layout is
//! deferred to [`TreemapPresenter::render`], where the terminal area is
//! known; the rectangles from the last draw back click hit-testing.

use crate::color_scale::build_scale;
use crate::encoder::{EncodedItem, MetricEncoder};
use crate::legend::Legend;
use crate::treemap::{cell_rects, item_at, TreeMap};
use crate::{Collaborators, VizConfig};
use anyhow::{Context, Result};
use measurehud_core::models::keys;
use measurehud_core::{MeasuredEntity, MeasuresDocument, Metric};
use measurehud_utils::logging::{get_logger, Logger};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Inputs of the treemap; equality and hashing are structural
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreemapProps {
    pub components: Vec<MeasuredEntity>,
    pub metric: Metric,
}

impl TreemapProps {
    pub fn new(components: Vec<MeasuredEntity>, metric: Metric) -> Self {
        Self { components, metric }
    }

    /// Props for `document`, colored by the metric named `metric_key`
    pub fn from_document(document: &MeasuresDocument, metric_key: &str) -> Result<Self> {
        let metric = document
            .metric(metric_key)
            .cloned()
            .with_context(|| format!("Unknown color metric '{}'", metric_key))?;
        let components = document
            .into_entities()
            .context("Failed to resolve component measures")?;
        Ok(Self::new(components, metric))
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreemapRender {
    /// Nothing survived encoding
    Empty { message: String },
    Chart {
        color_label: String,
        size_label: String,
        legend: Legend,
        items: Vec<EncodedItem>,
    },
}

type SelectHandler = Box<dyn FnMut(&MeasuredEntity)>;

pub struct TreemapPresenter {
    props: TreemapProps,
    fingerprint: u64,
    items: Vec<EncodedItem>,
    collaborators: Collaborators,
    config: VizConfig,
    on_select: Option<SelectHandler>,
    hit_map: Vec<(usize, Rect)>,
    recomputations: usize,
    logger: Logger,
}

impl TreemapPresenter {
    pub fn new(props: TreemapProps, collaborators: Collaborators) -> Self {
        let mut presenter = Self {
            fingerprint: props.fingerprint(),
            props,
            items: Vec::new(),
            collaborators,
            config: VizConfig::default(),
            on_select: None,
            hit_map: Vec::new(),
            recomputations: 0,
            logger: get_logger("measurehud.viz"),
        };
        presenter.recompute();
        presenter
    }

    pub fn with_config(mut self, config: VizConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the receiver of clicked components
    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&MeasuredEntity) + 'static,
    {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Swap in new props; re-encodes only if they differ structurally
    pub fn update(&mut self, props: TreemapProps) -> bool {
        let fingerprint = props.fingerprint();
        if fingerprint == self.fingerprint && props == self.props {
            return false;
        }
        self.props = props;
        self.fingerprint = fingerprint;
        self.recompute();
        true
    }

    pub fn props(&self) -> &TreemapProps {
        &self.props
    }

    pub fn items(&self) -> &[EncodedItem] {
        &self.items
    }

    /// Number of encodings performed so far, construction included
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    fn recompute(&mut self) {
        let encoder = MetricEncoder::new(
            self.collaborators.localizer.as_ref(),
            self.collaborators.formatter.as_ref(),
        );
        self.items = encoder.encode(&self.props.components, &self.props.metric);
        self.hit_map.clear();
        self.recomputations += 1;
        self.logger.debug(&format!(
            "Encoded {} of {} components for metric {}",
            self.items.len(),
            self.props.components.len(),
            self.props.metric.key
        ));
    }

    fn color_label(&self) -> String {
        let localizer = self.collaborators.localizer.as_ref();
        localizer.translate_with_parameters(
            "component_measures.legend.color_x",
            &[localizer.localized_metric_name(&self.props.metric).as_str()],
        )
    }

    /// Named after the first component's size metric, `ncloc` when unknown
    fn size_label(&self) -> String {
        let localizer = self.collaborators.localizer.as_ref();
        let size_key = self
            .props
            .components
            .first()
            .and_then(|component| component.other_measure(&self.props.metric.key))
            .map_or(keys::NCLOC, |measure| measure.metric.key.as_str());
        localizer.translate_with_parameters(
            "component_measures.legend.size_x",
            &[localizer.translate(&["metric", size_key, "name"]).as_str()],
        )
    }

    fn legend(&self) -> Legend {
        let metric = &self.props.metric;
        Legend::for_metric(
            metric,
            &build_scale(metric),
            self.collaborators.formatter.as_ref(),
            self.collaborators.localizer.as_ref(),
            self.config.legend_width,
        )
    }

    pub fn view(&self) -> TreemapRender {
        if self.items.is_empty() {
            return TreemapRender::Empty {
                message: self.collaborators.localizer.translate(&["no_results"]),
            };
        }
        TreemapRender::Chart {
            color_label: self.color_label(),
            size_label: self.size_label(),
            legend: self.legend(),
            items: self.items.clone(),
        }
    }

    /// Draw header, legend and treemap; remembers rectangles for `click`
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let scheme = self.config.color_scheme;

        if self.items.is_empty() {
            self.hit_map.clear();
            let message = self.collaborators.localizer.translate(&["no_results"]);
            let empty = Paragraph::new(Line::from(message))
                .style(scheme.muted_style())
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Labels
                Constraint::Length(1), // Legend
                Constraint::Min(0),    // Treemap
            ])
            .split(area);

        let header = Line::from(vec![
            Span::styled(self.color_label(), scheme.header_style()),
            Span::raw("   "),
            Span::styled(self.size_label(), scheme.content_style()),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);
        frame.render_widget(&self.legend(), chunks[1]);

        let tree_area = Rect {
            height: chunks[2].height.min(self.config.treemap_height),
            ..chunks[2]
        };
        self.hit_map = cell_rects(&self.items, tree_area);
        frame.render_widget(TreeMap::new(&self.items), tree_area);
    }

    /// Forward the component under (`column`, `row`) to the select handler
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let Some(index) = item_at(&self.hit_map, column, row) else {
            return false;
        };
        let Some(item) = self.items.get(index) else {
            return false;
        };
        self.logger.debug(&format!("Selected {}", item.key));
        if let Some(handler) = self.on_select.as_mut() {
            handler(&item.component);
        }
        true
    }

    /// Plain-text rendering for non-interactive output
    pub fn preview_text(&self) -> String {
        match self.view() {
            TreemapRender::Empty { message } => message,
            TreemapRender::Chart {
                color_label,
                size_label,
                legend,
                items,
            } => {
                let na = self.collaborators.localizer.translate(&["na"]);
                let mut out = format!("{}   {}\n{}\n", color_label, size_label, legend.to_text());
                for item in &items {
                    let fill = item.color.map_or_else(|| na.clone(), |color| color.to_hex());
                    let mut lines = item.tooltip.lines();
                    let title = lines.next().unwrap_or_default();
                    out.push_str(&format!("\n{} {}  [{}]\n", item.icon.icon(), title, fill));
                    for line in lines {
                        out.push_str(&format!("    {}\n", line));
                    }
                }
                out
            }
        }
    }
}

impl std::fmt::Debug for TreemapPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreemapPresenter")
            .field("props", &self.props)
            .field("items", &self.items.len())
            .field("recomputations", &self.recomputations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measurehud_core::{Measure, MetricType, Qualifier};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn coverage() -> Metric {
        Metric::new("coverage", "Coverage", MetricType::Percent).with_higher_values_are_better(true)
    }

    fn component(name: &str, lines: &str, coverage_value: &str) -> MeasuredEntity {
        MeasuredEntity::new(&format!("proj:{}", name), name, Qualifier::File)
            .with_measure(Measure::new(coverage(), Some(coverage_value)))
            .with_measure(Measure::new(
                Metric::new("ncloc", "Lines of Code", MetricType::Int),
                Some(lines),
            ))
    }

    fn presenter(components: Vec<MeasuredEntity>) -> TreemapPresenter {
        TreemapPresenter::new(TreemapProps::new(components, coverage()), Collaborators::default())
    }

    #[test]
    fn test_props_from_document() {
        let document = MeasuresDocument::from_json_str(
            r#"{
                "metrics": [
                    {"key": "coverage", "name": "Coverage", "type": "PERCENT", "higherValuesAreBetter": true},
                    {"key": "ncloc", "name": "Lines of Code", "type": "INT"}
                ],
                "components": [
                    {"key": "p:a", "name": "a", "qualifier": "FIL",
                     "measures": [{"metric": "coverage", "value": "50"}, {"metric": "ncloc", "value": "7"}]}
                ]
            }"#,
        )
        .unwrap();

        let props = TreemapProps::from_document(&document, "coverage").unwrap();
        assert_eq!(props.metric.key, "coverage");
        assert_eq!(props.components.len(), 1);

        let err = TreemapProps::from_document(&document, "bugs").unwrap_err();
        assert!(err.to_string().contains("bugs"));
    }

    #[test]
    fn test_view_labels() {
        let presenter = presenter(vec![component("a.rs", "10", "80")]);
        match presenter.view() {
            TreemapRender::Chart {
                color_label,
                size_label,
                items,
                ..
            } => {
                assert_eq!(color_label, "Color: Coverage");
                assert_eq!(size_label, "Size: Lines of Code");
                assert_eq!(items.len(), 1);
            }
            TreemapRender::Empty { .. } => panic!("expected a chart"),
        }
    }

    #[test]
    fn test_empty_view() {
        let presenter = presenter(vec![component("a.rs", "0", "80")]);
        assert_eq!(
            presenter.view(),
            TreemapRender::Empty {
                message: "No results".to_string()
            }
        );
        assert_eq!(presenter.preview_text(), "No results");
    }

    #[test]
    fn test_update_skips_identical_props() {
        let components = vec![component("a.rs", "10", "80")];
        let mut presenter = presenter(components.clone());
        assert_eq!(presenter.recomputations(), 1);

        assert!(!presenter.update(TreemapProps::new(components.clone(), coverage())));
        assert_eq!(presenter.recomputations(), 1);

        let mut changed = components;
        changed.push(component("b.rs", "20", "10"));
        assert!(presenter.update(TreemapProps::new(changed, coverage())));
        assert_eq!(presenter.recomputations(), 2);
        assert_eq!(presenter.items().len(), 2);
    }

    #[test]
    fn test_click_forwards_component() {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut presenter = presenter(vec![component("a.rs", "10", "80")])
            .on_select(move |entity| sink.borrow_mut().push(entity.key.clone()));

        // No layout before the first draw
        assert!(!presenter.click(1, 3));

        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                presenter.render(frame, area);
            })
            .unwrap();

        assert!(!presenter.click(1, 0));
        assert!(presenter.click(1, 3));
        assert_eq!(*selected.borrow(), vec!["proj:a.rs".to_string()]);
    }

    #[test]
    fn test_preview_text_lists_items() {
        let presenter = presenter(vec![component("a.rs", "10", "100")]);
        let text = presenter.preview_text();
        assert!(text.starts_with("Color: Coverage   Size: Lines of Code\n"));
        assert!(text.contains("a.rs  [#00aa00]"));
        assert!(text.contains("    Coverage: 100.0%"));
    }
}
