use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mycomap_core::RenderConfig;
use mycomap_core::boundary::MapOutline;
use mycomap_core::model::{Geometry, MonthlySeries};
use mycomap_core::parsers::{parse_boundary_auto, parse_histogram, parse_observations};
use mycomap_core::svg::render_svg;
use mycomap_core::views::{distribution, seasonality};
use tracing_subscriber::EnvFilter;

/// Render observation distribution maps and seasonality charts as SVG.
#[derive(Parser)]
#[command(name = "mycomap", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON render config; omitted fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output SVG file (stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Use the light palette
    #[arg(long, global = true)]
    light: bool,

    /// Verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Distribution map: region outline plus observation heatmap
    Map(MapArgs),
    /// Monthly seasonality curve
    Seasonality(SeasonalityArgs),
}

#[derive(Args)]
struct MapArgs {
    /// Boundary of the main region (place response, Feature or geometry)
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Boundary whose parts are kept only inside the configured filter
    #[arg(long)]
    secondary: Option<PathBuf>,

    /// Observation search response
    #[arg(long)]
    observations: PathBuf,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SeasonalityArgs {
    /// Month-of-year histogram response
    #[arg(long)]
    histogram: Option<PathBuf>,

    /// Observation search response, tallied by month
    #[arg(long)]
    observations: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => RenderConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let svg = match &cli.command {
        Command::Map(args) => render_map(args, &config, !cli.light)?,
        Command::Seasonality(args) => render_chart(args, &config, !cli.light)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote SVG");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "mycomap=info,mycomap_core=warn",
        1 => "mycomap=debug,mycomap_core=debug",
        _ => "mycomap=trace,mycomap_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn load_boundary(path: Option<&PathBuf>) -> Result<Option<Geometry>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let geometry = parse_boundary_auto(&read(path)?)
        .with_context(|| format!("parsing boundary {}", path.display()))?;
    if geometry.is_none() {
        tracing::warn!(path = %path.display(), "no polygonal geometry in boundary file");
    }
    Ok(geometry)
}

fn render_map(args: &MapArgs, config: &RenderConfig, dark: bool) -> Result<String> {
    let primary = load_boundary(args.boundary.as_ref())?;
    let secondary = load_boundary(args.secondary.as_ref())?;
    let observations = parse_observations(&read(&args.observations)?)
        .with_context(|| format!("parsing observations {}", args.observations.display()))?;

    let outline = MapOutline::build(primary.as_ref(), secondary.as_ref(), &config.map);
    if outline.land.is_none() && outline.disputed.is_none() {
        tracing::warn!("no drawable boundary, using default bounds");
    }

    let (commands, summary) =
        distribution::render_distribution_map(&outline, &observations, &config.map);
    tracing::info!(
        observations = observations.len(),
        located = summary.located,
        cells = summary.cells,
        "rendered distribution map"
    );

    let (width, height) = config.map.surface_size();
    Ok(render_svg(&commands, width, height, dark))
}

fn render_chart(args: &SeasonalityArgs, config: &RenderConfig, dark: bool) -> Result<String> {
    let counts = match (&args.histogram, &args.observations) {
        (Some(path), _) => parse_histogram(&read(path)?)
            .with_context(|| format!("parsing histogram {}", path.display()))?,
        (None, Some(path)) => {
            let observations = parse_observations(&read(path)?)
                .with_context(|| format!("parsing observations {}", path.display()))?;
            MonthlySeries::from_observations(&observations)
        }
        (None, None) => anyhow::bail!("either --histogram or --observations is required"),
    };
    tracing::info!(total = counts.total(), peak = counts.max(), "rendering seasonality");

    let commands = seasonality::render_seasonality(&counts, &config.chart);
    Ok(render_svg(&commands, config.chart.width, config.chart.height, dark))
}
