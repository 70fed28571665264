//! Headless driver for the bstviz engine.
//!
//! Plays command scripts, the canonical demo scenario or random fills
//! through the tick loop, logs every status message and reports the final
//! tree, optionally as a JSON snapshot.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bstviz::engine::Visualizer;
use bstviz::options::Options;
use bstviz::script::{parse_script, ScriptReport, ScriptRunner};
use bstviz::util::frame_timing::FrameTiming;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Insert 50, 30, 70, 20, 40, then delete the two-child root and search.
const DEMO_SCRIPT: &str = "\
insert 50
insert 30
insert 70
insert 20
insert 40
delete 50
search 40
search 99
";

/// Animated binary-search-tree engine, driven headlessly
#[derive(Parser)]
#[command(name = "bstviz", version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    drive: DriveArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that runs the engine
#[derive(Args)]
struct DriveArgs {
    /// Options TOML file (missing fields use defaults)
    #[arg(short, long, global = true)]
    options: Option<PathBuf>,

    /// Canvas width override
    #[arg(short, long, global = true)]
    width: Option<f32>,

    /// Print the final snapshot as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Pace ticks in real time at this rate (0 = as fast as possible)
    #[arg(long, global = true, default_value_t = 0)]
    fps: u32,

    /// Submit commands back to back and let the admission matrix decide
    #[arg(long, global = true)]
    overlap: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script ("-" reads stdin)
    Run {
        /// Script path
        script: PathBuf,
    },
    /// Build the five-node demo tree, delete its root, then search
    Demo,
    /// Insert random values
    Fill {
        /// Number of inserts
        #[arg(short, long, default_value_t = 15)]
        count: usize,
        /// Largest value drawn (values fall in 0..=max)
        #[arg(short, long, default_value_t = 99)]
        max: i64,
        /// RNG seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print the options JSON schema
    Schema,
    /// Print the default options as TOML
    Defaults,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Run { script } => {
            let text = read_script(&script)?;
            drive(&cli.drive, &text, &mut out)
        }
        Commands::Demo => drive(&cli.drive, DEMO_SCRIPT, &mut out),
        Commands::Fill { count, max, seed } => {
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            log::info!("fill: {count} values in 0..={max}, seed {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            let text = (0..count)
                .map(|_| format!("insert {}", rng.random_range(0..=max.max(0))))
                .collect::<Vec<_>>()
                .join("\n");
            drive(&cli.drive, &text, &mut out)
        }
        Commands::Schema => {
            let schema =
                serde_json::to_string_pretty(&Options::json_schema())?;
            writeln!(out, "{schema}")?;
            Ok(())
        }
        Commands::Defaults => {
            write!(out, "{}", Options::default().to_toml()?)?;
            Ok(())
        }
    }
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        let _ = std::io::stdin()
            .read_to_string(&mut text)
            .context("reading script from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))
}

fn load_options(args: &DriveArgs) -> Result<Options> {
    let mut options = match &args.options {
        Some(path) => Options::load(path)
            .with_context(|| format!("loading options {}", path.display()))?,
        None => Options::default(),
    };
    if let Some(width) = args.width {
        anyhow::ensure!(
            width.is_finite() && width > 0.0,
            "canvas width must be positive, got {width}"
        );
        options.layout.canvas_width = width;
    }
    Ok(options)
}

fn drive(args: &DriveArgs, script: &str, out: &mut impl Write) -> Result<()> {
    let steps = parse_script(script)?;
    let mut viz = Visualizer::new(load_options(args)?);
    let runner = ScriptRunner {
        overlap: args.overlap,
        ..ScriptRunner::default()
    };

    let report = if args.fps > 0 {
        let mut timing = FrameTiming::new(args.fps);
        let report = runner.run(&mut viz, &steps, |_| {
            timing.wait();
            timing.end_frame();
        });
        log::debug!("paced at {:.1} ticks/s", timing.fps());
        report
    } else {
        runner.run(&mut viz, &steps, |_| {})
    };

    if args.json {
        let snapshot = serde_json::to_string_pretty(&viz.snapshot())?;
        writeln!(out, "{snapshot}")?;
    } else {
        write_summary(out, &viz, &report)?;
    }
    Ok(())
}

fn write_summary(
    out: &mut impl Write,
    viz: &Visualizer,
    report: &ScriptReport,
) -> Result<()> {
    let tree = viz.tree();
    writeln!(
        out,
        "{} accepted, {} blocked, {} ticks",
        report.accepted, report.blocked, report.ticks
    )?;
    writeln!(out, "nodes:  {}", tree.len())?;
    writeln!(out, "height: {}", tree.height())?;
    writeln!(out, "valid:  {}", tree.is_valid())?;
    writeln!(out, "values: {:?}", tree.inorder_values())?;
    for node in &viz.snapshot().nodes {
        writeln!(
            out,
            "  {:>6} at ({:7.1}, {:6.1})",
            node.value, node.x, node.y
        )?;
    }
    Ok(())
}
