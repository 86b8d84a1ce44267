use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "detwall", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a wallpaper as a PNG or as a render spec.
    Generate(GenerateArgs),
    /// Draw a render spec through the incremental client and write a PNG.
    RenderSpec(RenderSpecArgs),
    /// Render one request through both paths and report how far they differ.
    Compare(CompareArgs),
    /// Print the request parameter catalogue as JSON.
    Info,
}

/// Request fields; flags override values loaded from `--request`.
#[derive(Args, Debug)]
struct RequestArgs {
    /// Request JSON; missing fields take service defaults.
    #[arg(long)]
    request: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    cell_size: Option<u32>,
    #[arg(long)]
    gap_cells: Option<u32>,

    #[arg(long)]
    hue: Option<detwall::Hue>,
    #[arg(long)]
    normalizer: Option<f64>,
    #[arg(long)]
    low: Option<f64>,
    #[arg(long)]
    high: Option<f64>,
    #[arg(long)]
    blur_sigma: Option<f64>,
    #[arg(long)]
    vignette: Option<f64>,
    #[arg(long)]
    feather: Option<f64>,

    /// Brightness from the secondary metric instead of the determinant.
    #[arg(long)]
    no_determinant: bool,
    /// Keep a single sample per block instead of maximizing |det|.
    #[arg(long)]
    single_sample: bool,

    #[arg(long)]
    pattern: Option<detwall::Pattern>,
    #[arg(long)]
    max_n: Option<usize>,
    #[arg(long)]
    budget: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    request: RequestArgs,

    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    #[arg(long, value_enum)]
    alpha: Option<AlphaChoice>,

    /// Output path (PNG for raster, JSON for spec).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderSpecArgs {
    /// Input render spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Blocks drawn per step.
    #[arg(long, default_value_t = 64)]
    blocks_per_turn: usize,

    /// Use the manual box-blur fallback instead of the native filter.
    #[arg(long)]
    manual_blur: bool,
}

#[derive(Parser, Debug)]
struct CompareArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Largest accepted per-channel difference after effects.
    #[arg(long, default_value_t = 2)]
    max_delta: u8,

    /// Largest accepted mean per-channel difference after effects.
    #[arg(long, default_value_t = 0.5)]
    mean_delta: f64,

    #[arg(long)]
    manual_blur: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Raster,
    Spec,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlphaChoice {
    Opaque,
    Chroma,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::RenderSpec(args) => cmd_render_spec(args),
        Command::Compare(args) => cmd_compare(args),
        Command::Info => cmd_info(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn build_request(args: &RequestArgs) -> anyhow::Result<detwall::GenerationRequest> {
    let mut req = match &args.request {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read request '{}'", path.display()))?;
            detwall::GenerationRequest::from_json(&text)
                .with_context(|| format!("parse request '{}'", path.display()))?
        }
        None => detwall::GenerationRequest::default(),
    };

    let canvas = &mut req.canvas;
    canvas.width = args.width.unwrap_or(canvas.width);
    canvas.height = args.height.unwrap_or(canvas.height);
    canvas.cell_size = args.cell_size.unwrap_or(canvas.cell_size);
    canvas.gap_cells = args.gap_cells.unwrap_or(canvas.gap_cells);

    let v = &mut req.visual;
    v.hue = args.hue.unwrap_or(v.hue);
    v.normalizer = args.normalizer.unwrap_or(v.normalizer);
    v.low = args.low.unwrap_or(v.low);
    v.high = args.high.unwrap_or(v.high);
    v.blur_sigma = args.blur_sigma.unwrap_or(v.blur_sigma);
    v.vignette_strength = args.vignette.unwrap_or(v.vignette_strength);
    v.feather_strength = args.feather.unwrap_or(v.feather_strength);
    if args.no_determinant {
        v.use_determinant = false;
    }
    if args.single_sample {
        v.use_max = false;
    }

    req.pattern = args.pattern.unwrap_or(req.pattern);
    req.max_n = args.max_n.unwrap_or(req.max_n);
    req.budget = args.budget.unwrap_or(req.budget);
    if args.seed.is_some() {
        req.seed = args.seed;
    }
    Ok(req)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut req = build_request(&args.request)?;
    if let Some(format) = args.format {
        req.output = match format {
            FormatChoice::Raster => detwall::OutputFormat::Raster,
            FormatChoice::Spec => detwall::OutputFormat::Spec,
        };
    }
    if let Some(alpha) = args.alpha {
        req.alpha = match alpha {
            AlphaChoice::Opaque => detwall::AlphaMode::Opaque,
            AlphaChoice::Chroma => detwall::AlphaMode::Chroma,
        };
    }

    tracing::info!(
        width = req.canvas.width,
        height = req.canvas.height,
        seed = req.effective_seed(),
        output = req.output.as_str(),
        "generating"
    );
    let bytes = match detwall::generate(&req)? {
        detwall::GenerationOutput::Raster(img) => {
            write_png(&args.out, &img)?;
            img.data
        }
        detwall::GenerationOutput::Spec(spec) => {
            let json = spec.to_json_pretty()?;
            write_file(&args.out, json.as_bytes())?;
            json.into_bytes()
        }
    };

    eprintln!("wrote {}", args.out.display());
    println!("sha256 {}", sha256_hex(&bytes));
    Ok(())
}

fn software_factory(manual_blur: bool) -> Arc<dyn detwall::SurfaceFactory> {
    Arc::new(detwall::SoftwareSurfaceFactory {
        native_blur: !manual_blur,
    })
}

fn cmd_render_spec(args: RenderSpecArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read spec '{}'", args.in_path.display()))?;

    let mut host = detwall::RenderHost::new(
        software_factory(args.manual_blur),
        detwall::ClientOptions {
            blocks_per_turn: args.blocks_per_turn,
        },
    );
    match host.render_json(text)? {
        detwall::PresentOutcome::Presented => {}
        other => anyhow::bail!("client render was not presented: {other:?}"),
    }
    let surface = host
        .displayed()
        .context("host has no displayed surface after presenting")?;
    let img = surface.snapshot()?;
    write_png(&args.out, &img)?;

    eprintln!("wrote {}", args.out.display());
    println!("sha256 {}", sha256_hex(&img.data));
    Ok(())
}

fn cmd_compare(args: CompareArgs) -> anyhow::Result<()> {
    let req = build_request(&args.request)?;
    let pass = detwall::generate_request_pass(&req, &detwall::GenerationLimits::default())?;
    let raster = detwall::render_raster(&pass)?;
    let spec = detwall::RenderSpec::from_pass(&pass)?;

    let mut render = detwall::ClientRender::from_json(
        spec.to_json()?,
        software_factory(args.manual_blur),
        detwall::ClientOptions::default(),
        detwall::RenderTicket::detached(),
    );
    render.run_to_completion()?;
    let client = render
        .surface()
        .context("client render finished without a surface")?
        .snapshot()?;

    let colors_match = render.drawn_colors() == pass.block_colors().as_slice();
    let report = detwall::compare_rgba(&raster, &client)?;
    let tol = detwall::ParityTolerance {
        max_channel_delta: args.max_delta,
        mean_channel_delta: args.mean_delta,
    };
    let ok = colors_match && report.within(&tol);

    let out = serde_json::json!({
        "base_colors_match": colors_match,
        "report": report,
        "tolerance": tol,
        "within_tolerance": ok,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    if !ok {
        anyhow::bail!("render paths differ beyond tolerance");
    }
    Ok(())
}

fn cmd_info() -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&detwall::describe_parameters())?
    );
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn write_png(path: &Path, img: &detwall::RasterImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &img.data,
        img.width,
        img.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(out, "{b:02x}");
    }
    out
}
