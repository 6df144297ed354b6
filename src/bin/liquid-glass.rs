use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "liquid-glass", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the displacement map for a surface.
    Map(MapArgs),
    /// Generate the composite displacement filter for a surface.
    Filter(FilterArgs),
    /// Resolve the styles a glass element would apply.
    Style(StyleArgs),
}

#[derive(Args, Debug)]
struct GeometryArgs {
    /// Surface width in px.
    #[arg(long, default_value_t = liquid_glass::DEFAULT_WIDTH)]
    width: u32,

    /// Surface height in px.
    #[arg(long, default_value_t = liquid_glass::DEFAULT_HEIGHT)]
    height: u32,

    /// Corner radius in px.
    #[arg(long, default_value_t = liquid_glass::DEFAULT_RADIUS)]
    radius: u32,

    /// Edge refraction depth in px.
    #[arg(long, default_value_t = liquid_glass::DEFAULT_DEPTH)]
    depth: u32,
}

impl GeometryArgs {
    fn geometry(&self) -> liquid_glass::GeometrySpec {
        liquid_glass::GeometrySpec::floored(self.width, self.height, self.radius, self.depth)
    }
}

#[derive(Args, Debug)]
struct MapArgs {
    #[command(flatten)]
    geometry: GeometryArgs,

    /// Print the raw SVG instead of the data URI.
    #[arg(long, conflicts_with = "png")]
    svg: bool,

    /// Write a PNG preview to this path instead of printing.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Preview scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[command(flatten)]
    geometry: GeometryArgs,

    /// Displacement scale.
    #[arg(long, default_value_t = 100)]
    strength: u32,

    /// Per-channel scale offset.
    #[arg(long, default_value_t = 0)]
    chromatic_aberration: u32,

    /// Print the raw SVG instead of the data URI.
    #[arg(long)]
    svg: bool,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Glass config JSON (kebab-case attribute names). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decide capability from this user agent.
    #[arg(long, conflicts_with = "capability")]
    user_agent: Option<String>,

    /// Force the capability answer.
    #[arg(long, value_enum)]
    capability: Option<CapabilityChoice>,

    /// Measured surface width (px); uses the configured size when omitted.
    #[arg(long, requires = "measured_height")]
    measured_width: Option<f64>,

    /// Measured surface height (px).
    #[arg(long, requires = "measured_width")]
    measured_height: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CapabilityChoice {
    Supported,
    Unsupported,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Map(args) => cmd_map(args),
        Command::Filter(args) => cmd_filter(args),
        Command::Style(args) => cmd_style(args),
    }
}

fn cmd_map(args: MapArgs) -> anyhow::Result<()> {
    let geometry = args.geometry.geometry();

    if let Some(path) = &args.png {
        let svg = liquid_glass::displacement_map_svg(&geometry);
        let image = liquid_glass::preview::rasterize_svg(&svg, args.scale)?;
        ensure_parent_dir(path)?;
        liquid_glass::preview::write_png(&image, path)?;
        eprintln!("wrote {}", path.display());
        return Ok(());
    }

    let out = if args.svg {
        liquid_glass::displacement_map_svg(&geometry)
    } else {
        liquid_glass::build_displacement_map(&geometry).into_uri()
    };
    print_line(&out)
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let geometry = args.geometry.geometry();
    let params = liquid_glass::EffectParams {
        strength: args.strength,
        chromatic_aberration: args.chromatic_aberration,
    };

    let out = if args.svg {
        liquid_glass::composite_filter_svg(&geometry, &params)
    } else {
        liquid_glass::build_composite_filter(&geometry, &params).into_uri()
    };
    print_line(&out)
}

fn cmd_style(args: StyleArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => liquid_glass::GlassConfig::default(),
    };

    let capability = match (args.capability, &args.user_agent) {
        (Some(CapabilityChoice::Supported), _) => true,
        (Some(CapabilityChoice::Unsupported), _) => false,
        (None, Some(ua)) => {
            let provider = liquid_glass::HeuristicByEnvironmentTag::new(
                liquid_glass::StaticEnvironment::with_user_agent(ua.clone()),
            );
            liquid_glass::CapabilityCache::global().get_or_detect(&provider)
        }
        (None, None) => liquid_glass::CapabilityCache::global()
            .get_or_detect(&liquid_glass::ProbedFalse),
    };

    let geometry = match (args.measured_width, args.measured_height) {
        (Some(w), Some(h)) => {
            let mode = config.sizing_mode();
            let floor = liquid_glass::measurement_floor(&config, mode);
            match liquid_glass::measured_geometry(&config, liquid_glass::Size::new(w, h), floor) {
                liquid_glass::Measurement::Ready(g) => g,
                liquid_glass::Measurement::Deferred => {
                    anyhow::bail!("measured size {w}x{h} has a zero side")
                }
            }
        }
        _ => liquid_glass::fixed_geometry(&config),
    };

    let state = liquid_glass::render(&config, &geometry, capability);
    let json = serde_json::to_string_pretty(&state).context("serialize visual state")?;
    print_line(&json)
}

fn read_config(path: &Path) -> anyhow::Result<liquid_glass::GlassConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let config = liquid_glass::GlassConfig::from_json_str(&json)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(config)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn print_line(s: &str) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{s}").context("write stdout")?;
    Ok(())
}
