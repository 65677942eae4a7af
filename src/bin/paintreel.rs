use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "paintreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export numbered PNG snapshots for a job.
    Export(ExportArgs),
    /// Composite every layer at once into a single PNG.
    Preview(PreviewArgs),
    /// Turn an image into a point-list text file.
    Extract(ExtractArgs),
    /// Dump an image as a JSON grid of hex colors.
    Grid(GridArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Job JSON.
    #[arg(long)]
    job: PathBuf,

    /// Override the snapshot directory from the job.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the number of effective pixel changes per snapshot.
    #[arg(long)]
    batch_size: Option<usize>,

    /// Override the shuffle seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Job JSON.
    #[arg(long)]
    job: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Shuffle seed for by-color layers.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input image (png, jpg, bmp, gif, ...).
    #[arg(long)]
    image: PathBuf,

    /// Output point-list text file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct GridArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Output JSON file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit `#RRGGBBAA` instead of `#RRGGBB`.
    #[arg(long)]
    keep_alpha: bool,

    /// Emit `null` for fully transparent pixels.
    #[arg(long)]
    transparent_as_null: bool,

    /// Pretty-print with this many spaces (0 = compact).
    #[arg(long, default_value_t = 0)]
    indent: usize,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Extract(args) => cmd_extract(args),
        Command::Grid(args) => cmd_grid(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_job(path: &Path) -> anyhow::Result<paintreel::ExportJob> {
    paintreel::ExportJob::load(path).with_context(|| format!("load job '{}'", path.display()))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut job = load_job(&args.job)?;
    if let Some(out) = args.out {
        job.config.out_dir = std::path::absolute(&out)
            .with_context(|| format!("resolve output dir '{}'", out.display()))?;
    }
    if let Some(batch_size) = args.batch_size {
        job.config.batch_size = batch_size;
    }
    if args.seed.is_some() {
        job.config.seed = args.seed;
    }

    let out_dir = job.out_dir();
    let report = job
        .export()
        .with_context(|| format!("export snapshots into '{}'", out_dir.display()))?;

    eprintln!(
        "wrote {} snapshot(s) to {}",
        report.stats.snapshots,
        out_dir.display()
    );
    eprintln!("pixels changed: {}", report.stats.pixels_changed);
    eprintln!("seed: {}", report.seed);
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut job = load_job(&args.job)?;
    if args.seed.is_some() {
        job.config.seed = args.seed;
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let drawn = job
        .preview_to(&args.out)
        .with_context(|| format!("write preview '{}'", args.out.display()))?;

    eprintln!("wrote {} ({drawn} pixel(s) drawn)", args.out.display());
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let src = paintreel::extract_point_source_from_path(&args.image)
        .with_context(|| format!("extract points from '{}'", args.image.display()))?;
    src.write_to(&args.out)
        .with_context(|| format!("write point list '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} color(s), {} point(s))",
        args.out.display(),
        src.groups.len(),
        src.points.len()
    );
    Ok(())
}

fn cmd_grid(args: GridArgs) -> anyhow::Result<()> {
    let img = image::open(&args.image)
        .with_context(|| format!("open image '{}'", args.image.display()))?
        .to_rgba8();
    let opts = paintreel::HexGridOpts {
        keep_alpha: args.keep_alpha,
        transparent_as_null: args.transparent_as_null,
    };
    let json = paintreel::hex_grid_json(&img, opts, args.indent)?;

    match args.out {
        Some(out) => {
            std::fs::write(&out, json)
                .with_context(|| format!("write grid '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
