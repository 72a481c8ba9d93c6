use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kurbo::PathEl;

use scrawl::{
    CompletionCounts, PixelRect, PointerEvent, Rgb8, Snapshot, TraceEngine, analyze,
    decode_material_image,
};

#[derive(Parser, Debug)]
#[command(name = "scrawl", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count trace/background pixels of a rendered material image.
    Analyze(AnalyzeArgs),
    /// Replay a pointer-event script against a material image.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Rendered material image (PNG etc.).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Region of interest as `left,top,right,bottom`; defaults to the whole
    /// image.
    #[arg(long)]
    region: Option<String>,

    /// Guide-line color as RRGGBB.
    #[arg(long)]
    trace: String,

    /// Fillable background color as RRGGBB.
    #[arg(long)]
    material: String,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Rendered material image the strokes are validated against.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pointer-event script JSON: an array of `{kind, x, y}` records.
    #[arg(long)]
    script: PathBuf,

    /// Material identifier; start-mark offsets are parsed from it.
    #[arg(long, default_value = "")]
    material_id: String,

    /// Guide-line color as RRGGBB.
    #[arg(long)]
    trace: String,

    /// Fillable background color as RRGGBB.
    #[arg(long)]
    material: String,

    /// Probe half-width in pixels.
    #[arg(long, default_value_t = 12.0)]
    tolerance: f32,
}

#[derive(serde::Serialize)]
struct SegmentOut {
    op: &'static str,
    x: f64,
    y: f64,
}

#[derive(serde::Serialize)]
struct ReplayReport {
    consumed_events: usize,
    ignored_events: usize,
    has_drawn: bool,
    segments: Vec<SegmentOut>,
    baseline_background: u64,
    completion: CompletionCounts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let bytes =
        fs::read(path).with_context(|| format!("read material image '{}'", path.display()))?;
    Ok(decode_material_image(&bytes)?)
}

fn parse_region(spec: &str) -> anyhow::Result<PixelRect> {
    let parts: Vec<i32> = spec
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("parse region '{spec}'"))?;
    let [left, top, right, bottom] = parts[..] else {
        anyhow::bail!("region must be 'left,top,right,bottom', got '{spec}'");
    };
    Ok(PixelRect::new(left, top, right, bottom))
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let snap = load_snapshot(&args.in_path)?;
    let trace = Rgb8::from_hex(&args.trace)?;
    let material = Rgb8::from_hex(&args.material)?;
    let region = match &args.region {
        Some(spec) => parse_region(spec)?,
        None => PixelRect::of_canvas(snap.canvas()),
    };

    let counts = analyze(&snap, region, trace, material);
    println!("{}", serde_json::to_string_pretty(&counts)?);
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let mut surface = load_snapshot(&args.in_path)?;
    let trace = Rgb8::from_hex(&args.trace)?;
    let material = Rgb8::from_hex(&args.material)?;

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let events: Vec<PointerEvent> =
        serde_json::from_str(&script).context("parse pointer-event script JSON")?;

    let mut engine = TraceEngine::new(trace, material, args.tolerance)?;
    let bounds = PixelRect::of_canvas(surface.canvas());
    let ticket = engine.load_material(&args.material_id, bounds, Instant::now());
    // The replay surface is already fully rendered; skip the settle wait.
    engine.settle_complete(ticket);

    let baseline = engine.capture_background_baseline(&mut surface)?;

    let mut consumed = 0usize;
    for event in &events {
        let response = engine.pointer_event(&mut surface, *event, Instant::now());
        if response.consumed {
            consumed += 1;
        }
    }

    let segments = engine
        .path()
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) => Some(SegmentOut {
                op: "moveTo",
                x: p.x,
                y: p.y,
            }),
            PathEl::LineTo(p) => Some(SegmentOut {
                op: "lineTo",
                x: p.x,
                y: p.y,
            }),
            _ => None,
        })
        .collect();

    let report = ReplayReport {
        consumed_events: consumed,
        ignored_events: events.len() - consumed,
        has_drawn: engine.has_drawn(),
        segments,
        baseline_background: baseline,
        completion: engine.analyze_completion(&mut surface)?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
