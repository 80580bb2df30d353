use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pathmorph", version)]
struct Cli {
    /// Log each edit and interpolation to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an op-script against a path and print the result.
    Apply(ApplyArgs),
    /// Interpolate between two structurally identical paths.
    Morph(MorphArgs),
    /// Report whether two paths can be interpolated.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// SVG path data of the baseline path.
    #[arg(long)]
    path: String,

    /// Op-script, for example "SIH 0 1 RV 0".
    #[arg(long)]
    ops: String,

    /// Print the path model as JSON instead of SVG path data.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct MorphArgs {
    /// SVG path data at fraction 0.
    #[arg(long)]
    from: String,

    /// SVG path data at fraction 1.
    #[arg(long)]
    to: String,

    /// Blend fraction; values outside [0, 1] extrapolate.
    #[arg(long, allow_negative_numbers = true)]
    fraction: f64,

    /// Print the path model as JSON instead of SVG path data.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// First path's SVG path data.
    #[arg(long)]
    from: String,

    /// Second path's SVG path data.
    #[arg(long)]
    to: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Morph(args) => cmd_morph(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn parse_path(text: &str, what: &str) -> anyhow::Result<pathmorph::Path> {
    pathmorph::Path::parse(text).with_context(|| format!("parse {what} path '{text}'"))
}

fn print_path(path: &pathmorph::Path, json: bool) -> anyhow::Result<()> {
    if json {
        let s = serde_json::to_string_pretty(path).context("serialize path JSON")?;
        println!("{s}");
    } else {
        println!("{path}");
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<ExitCode> {
    let baseline = parse_path(&args.path, "baseline")?;
    let instructions = pathmorph::parse_op_script(&args.ops).context("parse op-script")?;

    let mut mutator = baseline.mutate();
    pathmorph::apply_instructions(&mut mutator, &instructions).context("apply op-script")?;
    print_path(&mutator.build(), args.json)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_morph(args: MorphArgs) -> anyhow::Result<ExitCode> {
    let from = parse_path(&args.from, "start")?;
    let to = parse_path(&args.to, "end")?;
    let blended = pathmorph::interpolate(&from, &to, args.fraction)
        .with_context(|| format!("interpolate at fraction {}", args.fraction))?;
    print_path(&blended, args.json)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let from = parse_path(&args.from, "first")?;
    let to = parse_path(&args.to, "second")?;
    match from.morph_mismatch(&to) {
        None => {
            println!("morphable");
            Ok(ExitCode::SUCCESS)
        }
        Some(mismatch) => {
            eprintln!("not morphable: {mismatch}");
            Ok(ExitCode::from(1))
        }
    }
}
