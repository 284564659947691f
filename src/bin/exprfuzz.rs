use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "exprfuzz", version)]
#[command(about = "Generate differential test cases for 64-bit integer arithmetic")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate test cases (expected value + target-syntax expression).
    Gen(GenArgs),
    /// Evaluate a reference-dialect expression.
    Eval(EvalArgs),
}

#[derive(Parser, Debug)]
struct GenArgs {
    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum tree depth, at most 32. Expected tree size grows like 1.4^depth.
    #[arg(long)]
    depth: Option<u32>,

    /// Draw literals from the whole i64 domain.
    #[arg(long, conflicts_with = "small_range")]
    full_range: bool,

    /// Draw literals from [-1000, 1000].
    #[arg(long)]
    small_range: bool,

    /// Random seed for reproducibility.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of cases to generate.
    #[arg(long)]
    count: Option<u32>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// What to do when an expression divides by zero.
    #[arg(long, value_enum)]
    policy: Option<PolicyChoice>,

    /// Trees drawn per case before giving up.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Reference-dialect expression, e.g. `mulhi(i64(3), i64(5))`.
    #[arg(allow_hyphen_values = true)]
    expr: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Template,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    Regenerate,
    Fail,
}

/// On-disk driver configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GenConfig {
    seed: Option<u64>,
    count: Option<u32>,
    format: Option<exprfuzz::EmitFormat>,
    case: exprfuzz::CaseOptions,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Gen(args) => cmd_gen(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env("EXPRFUZZ_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_config(path: &Path) -> anyhow::Result<GenConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: GenConfig = serde_json::from_reader(r)
        .with_context(|| format!("parse config JSON '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_gen(args: GenArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => read_config(path)?,
        None => GenConfig::default(),
    };

    if let Some(depth) = args.depth {
        cfg.case.max_depth = depth;
    }
    if args.full_range {
        cfg.case.range = exprfuzz::LiteralRange::Full;
    } else if args.small_range {
        cfg.case.range = exprfuzz::LiteralRange::Small;
    }
    if let Some(policy) = args.policy {
        cfg.case.fault_policy = match policy {
            PolicyChoice::Regenerate => exprfuzz::FaultPolicy::Regenerate,
            PolicyChoice::Fail => exprfuzz::FaultPolicy::Fail,
        };
    }
    if let Some(n) = args.max_attempts {
        cfg.case.max_attempts = n;
    }
    cfg.case.validate()?;

    let format = match args.format {
        Some(FormatChoice::Template) => exprfuzz::EmitFormat::Template,
        Some(FormatChoice::Json) => exprfuzz::EmitFormat::Json,
        None => cfg.format.unwrap_or_default(),
    };
    let count = args.count.or(cfg.count).unwrap_or(1);

    let seed = args.seed.or(cfg.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    eprintln!("seed: {seed}");

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    for i in 0..count {
        let case = exprfuzz::generate_case(&mut rng, &cfg.case)
            .with_context(|| format!("generate case {i} (seed {seed})"))?;
        exprfuzz::emit_case(out.as_mut(), &case, format)?;
    }
    out.flush().context("flush output")?;

    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let value = exprfuzz::evaluate_reference(&args.expr)
        .with_context(|| format!("evaluate '{}'", args.expr))?;
    println!("{value}");
    Ok(())
}
