use anyhow::{Context, Result};
use clap::{ArgGroup, CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use podview::config::{Config, OutputFormat};
use podview::podcast::{filter_podcasts, sort_by_title, StatusFilter};
use podview::{feed, podcast, render};

#[derive(Parser, Debug)]
#[command(
    name = "podview",
    version,
    about = "Resolve an OPML podcast export into podcasts and episodes",
    group(ArgGroup::new("input").required(true).args(["opml", "dataset"]))
)]
struct Args {
    /// OPML file to resolve
    #[arg(value_name = "FILE")]
    opml: Option<PathBuf>,

    /// Load an already-resolved JSON dataset instead of an OPML file
    #[arg(long, value_name = "FILE")]
    dataset: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only keep episodes with these statuses; podcasts left empty are dropped
    #[arg(long, value_enum, value_delimiter = ',')]
    status: Vec<StatusArg>,

    /// Sort podcasts by title
    #[arg(long)]
    sort: bool,

    /// Config file [default: ~/.config/podview/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StatusArg {
    Unplayed,
    Played,
    InProgress,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("no input given: pass an OPML file or --dataset <FILE>")]
    MissingArgument,
}

fn status_filter(statuses: &[StatusArg]) -> StatusFilter {
    statuses
        .iter()
        .fold(StatusFilter::none(), |mut filter, status| {
            match status {
                StatusArg::Unplayed => filter.unplayed = true,
                StatusArg::Played => filter.played = true,
                StatusArg::InProgress => filter.in_progress = true,
            }
            filter
        })
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path.map(Path::to_path_buf).or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in path: {}", path.display()))
}

/// The full error chain on one line, for the single stderr diagnostic.
fn diagnostic(err: &anyhow::Error) -> String {
    format!("{:#}", err)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

enum Input<'a> {
    Opml(&'a Path),
    Dataset(&'a Path),
}

async fn run(args: Args) -> Result<String> {
    // Missing input is a usage error whatever state the config is in
    let input = match (args.opml.as_deref(), args.dataset.as_deref()) {
        (Some(opml), _) => Input::Opml(opml),
        (None, Some(dataset)) => Input::Dataset(dataset),
        (None, None) => return Err(CliError::MissingArgument.into()),
    };
    let config = load_config(args.config.as_deref())?;

    let mut podcasts = match input {
        Input::Opml(opml) => feed::parse(path_str(opml)?, config.max_outline_depth)
            .await
            .context("Failed to parse OPML")?,
        Input::Dataset(dataset) => podcast::load_dataset(path_str(dataset)?)
            .await
            .context("Failed to load dataset")?,
    };

    if !args.status.is_empty() {
        podcasts = filter_podcasts(podcasts, &status_filter(&args.status));
    }
    if args.sort || config.sort_by_title {
        sort_by_title(&mut podcasts);
    }
    tracing::info!(podcasts = podcasts.len(), "Rendering podcasts");

    let output = match args.format.unwrap_or(config.format) {
        OutputFormat::Json => {
            let mut json = render::render_json(&podcasts).context("Failed to serialize podcasts")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render::render_text(&podcasts, config.title_width),
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the podcast output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1 like every other failure; --help and --version exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) if e.downcast_ref::<CliError>().is_some() => {
            eprintln!("Error: {}", e);
            eprintln!("{}", Args::command().render_usage());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", diagnostic(&e));
            ExitCode::FAILURE
        }
    }
}
