//! MeasureHUD CLI entry point
//!
//! `measurehud treemap` draws the measures treemap of a components file,
//! `measurehud auth` the authentication settings panel of a definitions file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use measurehud_core::QueryParams;
use measurehud_tui::{
    authentication_presenter, authentication_preview, run_authentication, run_treemap,
    treemap_presenter, treemap_preview, MeasureHudConfig,
};
use measurehud_utils::logging::init_logging;
use measurehud_viz::AuthenticationTab;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "measurehud")]
#[command(about = "Terminal views for code-quality measures and authentication settings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Measures treemap of a components file
    Treemap {
        /// JSON file with `metrics` and `components`
        #[arg(value_name = "COMPONENTS_JSON")]
        components: PathBuf,

        /// Key of the metric that colors the rectangles
        #[arg(short, long)]
        metric: String,

        /// Print a text preview instead of opening the terminal UI
        #[arg(long)]
        preview: bool,

        /// Preview width in columns
        #[arg(long, default_value = "80")]
        width: u16,

        /// Preview height in rows
        #[arg(long, default_value = "24")]
        height: u16,
    },
    /// Authentication settings panel of a definitions file
    Auth {
        /// JSON file with setting definitions (list or `definitions` object)
        #[arg(value_name = "DEFINITIONS_JSON")]
        definitions: PathBuf,

        /// Current URL query, e.g. "tab=github&category=authentication"
        #[arg(short, long, default_value = "")]
        query: String,

        /// Select a tab and print the rewritten query
        #[arg(long, value_parser = parse_tab)]
        select: Option<AuthenticationTab>,

        /// Print a text preview instead of opening the terminal UI
        #[arg(long)]
        preview: bool,

        #[arg(long, default_value = "80")]
        width: u16,

        #[arg(long, default_value = "24")]
        height: u16,
    },
}

fn parse_tab(value: &str) -> std::result::Result<AuthenticationTab, String> {
    AuthenticationTab::parse(value).ok_or_else(|| {
        let known: Vec<&str> = AuthenticationTab::ALL.iter().map(|tab| tab.key()).collect();
        format!("unknown tab '{}' (expected one of: {})", value, known.join(", "))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MeasureHudConfig::load(cli.config.as_deref())?;
    init_logging(config.logger_config(cli.verbose))?;

    match &cli.command {
        Commands::Treemap {
            components,
            metric,
            preview,
            width,
            height,
        } => {
            let mut presenter = treemap_presenter(&config, components, metric)?;
            if *preview {
                print!("{}", treemap_preview(&mut presenter, *width, *height)?);
            } else {
                for key in run_treemap(presenter)? {
                    println!("{}", key);
                }
            }
        }
        Commands::Auth {
            definitions,
            query,
            select,
            preview,
            width,
            height,
        } => {
            let presenter = authentication_presenter(&config, definitions)?;
            let mut query = QueryParams::parse(query);

            if let Some(tab) = select {
                query = presenter.select(&query, *tab);
                println!("{}", query);
            }

            if *preview {
                print!("{}", authentication_preview(&presenter, &query, *width, *height)?);
            } else if select.is_none() {
                let query = run_authentication(&presenter, query)?;
                println!("{}", query);
            }
        }
    }

    Ok(())
}
