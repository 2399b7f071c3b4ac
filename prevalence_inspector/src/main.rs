use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use prevalence_core::log_stream::log_channel;
use prevalence_core::{Dashboard, DashboardConfig, Dataset, Disorder, FilterState};

mod app;
mod ui;

use app::InspectorApp;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mental health prevalence dashboard", long_about = None)]
struct Cli {
    /// CSV dataset to load. Overrides `data_path` from the config.
    #[arg(long)]
    data: Option<PathBuf>,
    /// JSON dashboard config. The builtin config is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every view for one filter selection as JSON.
    Export {
        /// Year to select; defaults to the latest year in the dataset.
        #[arg(long)]
        year: Option<i32>,
        /// Disorder id, label or column name; defaults to the configured disorder.
        #[arg(long)]
        disorder: Option<Disorder>,
        /// Country to select; repeat for several. Defaults to the configured countries.
        #[arg(long = "country")]
        countries: Vec<String>,
        /// Select no countries, ignoring the configured defaults.
        #[arg(long, conflicts_with = "countries")]
        no_countries: bool,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Export {
            year,
            disorder,
            ref countries,
            no_countries,
        }) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .compact()
                .init();
            let (dataset, config) = load(&cli)?;
            let mut filter = FilterState::initial(&dataset, &config);
            if let Some(year) = year {
                let (first, last) = dataset.year_range();
                if !(first..=last).contains(&year) {
                    warn!(year, first, last, "Requested year is outside the dataset range");
                }
                filter = filter.with_year(year);
            }
            if let Some(disorder) = disorder {
                filter = filter.with_disorder(disorder);
            }
            if no_countries {
                filter = filter.with_countries(std::iter::empty::<String>());
            } else if !countries.is_empty() {
                filter = filter.with_countries(countries.iter().cloned());
            }
            export(dataset, config, filter)
        }
        None => {
            let (layer, log_rx) = log_channel();
            tracing_subscriber::registry()
                .with(env_filter())
                .with(layer)
                .init();
            let (dataset, config) = load(&cli)?;
            let dashboard = Dashboard::new(dataset, config);
            info!("Dashboard ready. Press q to exit.");
            InspectorApp::new(dashboard, log_rx)?.run()
        }
    }
}

fn load(cli: &Cli) -> Result<(Arc<Dataset>, Arc<DashboardConfig>)> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::builtin().as_ref().clone(),
    };
    if let Some(path) = &cli.data {
        config = config.with_data_path(path);
    }
    let dataset = Dataset::load(config.data_path())
        .wrap_err("the dashboard cannot start without its dataset")?;
    Ok((Arc::new(dataset), Arc::new(config)))
}

fn export(dataset: Arc<Dataset>, config: Arc<DashboardConfig>, filter: FilterState) -> Result<()> {
    let dashboard = Dashboard::with_filter(dataset, config, filter);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, dashboard.views())?;
    writeln!(handle)?;
    info!(
        views = prevalence_core::ViewKind::COUNT,
        elapsed_us = dashboard.metrics().last_elapsed_us,
        "views.exported"
    );
    Ok(())
}
