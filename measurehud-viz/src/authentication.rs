//! Authentication settings: tab strip bound to the `tab` query parameter
//!
//! The selected tab lives only in the query. Reading it never fails (absent
//! or unknown values select SAML) and selecting a tab rewrites `tab` while
//! leaving every other parameter untouched.

use crate::{Collaborators, ColorScheme};
use measurehud_core::{AlmKey, QueryParams, SettingDefinition, AUTHENTICATION_CATEGORY};
use measurehud_utils::logging::{get_logger, Logger};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use std::fmt;

/// Query parameter holding the selected tab
pub const TAB_PARAM: &str = "tab";

const LINK_PLACEHOLDER: &str = "{link}";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthenticationTab {
    #[default]
    Saml,
    GitHub,
    BitbucketServer,
    GitLab,
}

impl AuthenticationTab {
    /// Tab strip order
    pub const ALL: [AuthenticationTab; 4] = [
        AuthenticationTab::Saml,
        AuthenticationTab::GitHub,
        AuthenticationTab::BitbucketServer,
        AuthenticationTab::GitLab,
    ];

    /// Query value and settings sub-category
    pub fn key(self) -> &'static str {
        match self {
            AuthenticationTab::Saml => "saml",
            AuthenticationTab::GitHub => AlmKey::GitHub.as_str(),
            AuthenticationTab::BitbucketServer => AlmKey::BitbucketServer.as_str(),
            AuthenticationTab::GitLab => AlmKey::GitLab.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthenticationTab::Saml => "SAML",
            AuthenticationTab::GitHub => "GitHub",
            AuthenticationTab::BitbucketServer => "Bitbucket",
            AuthenticationTab::GitLab => "GitLab",
        }
    }

    /// DevOps platform behind the tab; SAML has none
    pub fn alm_key(self) -> Option<AlmKey> {
        match self {
            AuthenticationTab::Saml => None,
            AuthenticationTab::GitHub => Some(AlmKey::GitHub),
            AuthenticationTab::BitbucketServer => Some(AlmKey::BitbucketServer),
            AuthenticationTab::GitLab => Some(AlmKey::GitLab),
        }
    }

    /// Application path of the tab's documentation section
    pub fn documentation_path(self) -> &'static str {
        match self {
            AuthenticationTab::Saml => {
                "/documentation/instance-administration/delegated-auth/#saml-authentication"
            }
            AuthenticationTab::GitHub => {
                "/documentation/analysis/github-integration/#authenticating-with-github"
            }
            AuthenticationTab::GitLab => {
                "/documentation/analysis/gitlab-integration/#authenticating-with-gitlab"
            }
            AuthenticationTab::BitbucketServer => {
                "/documentation/analysis/bitbucket-cloud-integration/#authenticating-with-bitbucket-cloud"
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.key() == value)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    /// Next tab in strip order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AuthenticationTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub tab: AuthenticationTab,
    pub label: &'static str,
    pub icon_url: Option<String>,
    pub selected: bool,
}

/// Help message split around its documentation link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpNotice {
    pub before: String,
    pub link_text: String,
    pub link_url: String,
    pub after: String,
}

impl HelpNotice {
    pub fn to_text(&self) -> String {
        format!(
            "{}{} <{}>{}",
            self.before, self.link_text, self.link_url, self.after
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRender {
    pub title: String,
    pub description: String,
    pub tabs: Vec<TabEntry>,
    pub selected: AuthenticationTab,
    pub help: HelpNotice,
    pub definitions: Vec<SettingDefinition>,
    /// Shown instead of the list when the tab has no definitions
    pub empty_message: String,
}

pub struct AuthenticationPresenter {
    definitions: Vec<SettingDefinition>,
    collaborators: Collaborators,
    scheme: ColorScheme,
    logger: Logger,
}

impl AuthenticationPresenter {
    pub fn new(definitions: Vec<SettingDefinition>, collaborators: Collaborators) -> Self {
        Self {
            definitions,
            collaborators,
            scheme: ColorScheme::Dark,
            logger: get_logger("measurehud.viz"),
        }
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Tab named by the query; SAML when absent, empty or unknown
    pub fn current_tab(&self, query: &QueryParams) -> AuthenticationTab {
        match query.get(TAB_PARAM) {
            None => AuthenticationTab::Saml,
            Some(value) if value.is_empty() => AuthenticationTab::Saml,
            Some(value) => AuthenticationTab::parse(&value).unwrap_or_else(|| {
                self.logger
                    .warning(&format!("Unknown authentication tab '{}', showing SAML", value));
                AuthenticationTab::Saml
            }),
        }
    }

    /// Query with `tab` rewritten; other parameters are kept as they are
    pub fn select(&self, query: &QueryParams, tab: AuthenticationTab) -> QueryParams {
        self.logger.debug(&format!("Selecting authentication tab {}", tab));
        query.with(TAB_PARAM, tab.key())
    }

    pub fn documentation_link(&self, tab: AuthenticationTab) -> String {
        self.collaborators.server.url(tab.documentation_path())
    }

    /// Authentication definitions of `tab`, in input order
    pub fn definitions_for(&self, tab: AuthenticationTab) -> Vec<&SettingDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.belongs_to(AUTHENTICATION_CATEGORY, tab.key()))
            .collect()
    }

    pub fn view(&self, query: &QueryParams) -> AuthenticationRender {
        let localizer = self.collaborators.localizer.as_ref();
        let selected = self.current_tab(query);

        let tabs = AuthenticationTab::ALL
            .into_iter()
            .map(|tab| TabEntry {
                tab,
                label: tab.label(),
                icon_url: tab
                    .alm_key()
                    .map(|alm| self.collaborators.server.alm_icon_url(alm.as_str())),
                selected: tab == selected,
            })
            .collect();

        let help_message = localizer.translate(&["settings.authentication.help"]);
        let (before, after) = help_message
            .split_once(LINK_PLACEHOLDER)
            .unwrap_or((help_message.as_str(), ""));
        let help = HelpNotice {
            before: before.to_string(),
            link_text: localizer.translate(&["settings.authentication.help.link"]),
            link_url: self.documentation_link(selected),
            after: after.to_string(),
        };

        AuthenticationRender {
            title: localizer.translate(&["settings.authentication.title"]),
            description: localizer.translate(&["settings.authentication.description"]),
            tabs,
            selected,
            help,
            definitions: self.definitions_for(selected).into_iter().cloned().collect(),
            empty_message: localizer.translate(&["settings.definitions.empty"]),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, query: &QueryParams) {
        let view = self.view(query);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Definitions panel
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            view.title.clone(),
            self.scheme.header_style(),
        )));
        frame.render_widget(title, chunks[0]);

        let description = Paragraph::new(view.description.clone()).wrap(Wrap { trim: true });
        frame.render_widget(description, chunks[1]);

        let titles: Vec<Line> = view.tabs.iter().map(|entry| Line::from(entry.label)).collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(self.scheme.highlight_style())
            .select(view.selected.position());
        frame.render_widget(tabs, chunks[2]);

        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("ℹ {}", view.help.before)),
                Span::styled(
                    view.help.link_text.clone(),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ),
                Span::raw(view.help.after.clone()),
            ]),
            Line::from(Span::styled(
                view.help.link_url.clone(),
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(""),
        ];
        if view.definitions.is_empty() {
            lines.push(Line::from(view.empty_message.clone()));
        }
        for definition in &view.definitions {
            lines.push(Line::from(vec![
                Span::styled(
                    definition.display_name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", definition.key)),
            ]));
            if let Some(description) = definition.description.as_deref() {
                lines.push(Line::from(format!("  {}", description)));
            }
        }

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        frame.render_widget(panel, chunks[3]);
    }

    pub fn preview_text(&self, query: &QueryParams) -> String {
        let view = self.view(query);
        let strip = view
            .tabs
            .iter()
            .map(|entry| {
                if entry.selected {
                    format!("[{}]", entry.label)
                } else {
                    entry.label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        let mut out = format!(
            "{}\n{}\n\n{}\n\n{}\n",
            view.title,
            view.description,
            strip,
            view.help.to_text()
        );
        if view.definitions.is_empty() {
            out.push_str(&format!("\n{}\n", view.empty_message));
        }
        for definition in &view.definitions {
            out.push_str(&format!("\n- {} ({})\n", definition.display_name(), definition.key));
            if let Some(description) = definition.description.as_deref() {
                out.push_str(&format!("    {}\n", description));
            }
        }
        out
    }
}
