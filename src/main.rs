//! dipcore -- compiles Diplomacy map descriptions and walks the phase cycle.
//!
//! Subcommands:
//! - `compile` turns JSON or Judge map descriptions into adjacency graph JSON,
//! - `standard` dumps the bundled classic map,
//! - `phase` steps through the seasonal automaton,
//! - `lookup` resolves a province name against the classic map.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;

use dipcore::map::{self, CompiledMap, FleetLoc, SourceFormat};
use dipcore::phase::GamePhase;

#[derive(Parser)]
#[command(name = "dipcore")]
#[command(about = "Diplomacy map compiler and phase engine")]
struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile map descriptions into adjacency graph JSON
    Compile {
        /// Description files; `-` reads stdin
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum, default_value_t = Format::Auto)]
        format: Format,

        /// Write `<name>.json` per input here instead of printing to stdout
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Skip checking for dangling provinces and undeclared coasts
        #[arg(long)]
        skip_validation: bool,
    },

    /// Print the bundled classic map as JSON
    Standard {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Step through the phase cycle from PHASE (e.g. `fall-1901`)
    Phase {
        #[arg(value_name = "PHASE")]
        phase: GamePhase,

        /// Number of phases to print after PHASE
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: usize,

        /// Step backwards instead of forwards
        #[arg(short, long)]
        reverse: bool,
    },

    /// Resolve a province key or alias against the classic map
    Lookup {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Json,
    Judge,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Compile {
            inputs,
            format,
            out_dir,
            pretty,
            skip_validation,
        } => compile_inputs(&inputs, format, out_dir.as_deref(), pretty, skip_validation),
        Commands::Standard { pretty } => {
            let map = CompiledMap::standard().context("bundled classic map is invalid")?;
            print_json(&map, pretty)
        }
        Commands::Phase {
            phase,
            steps,
            reverse,
        } => walk_phases(phase, steps, reverse),
        Commands::Lookup { name } => lookup(&name),
    }
}

/// A compiled input, ready to be written out.
struct Compiled {
    input: PathBuf,
    map: CompiledMap,
}

fn compile_inputs(
    inputs: &[PathBuf],
    format: Format,
    out_dir: Option<&Path>,
    pretty: bool,
    skip_validation: bool,
) -> Result<()> {
    let stdin_count = inputs.iter().filter(|p| is_stdin(p)).count();
    if stdin_count > 1 {
        bail!("stdin (`-`) can only be given once");
    }

    // Read sequentially so stdin is consumed once, then compile in parallel.
    let sources = inputs
        .iter()
        .map(|input| read_input(input).map(|src| (input.clone(), src)))
        .collect::<Result<Vec<_>>>()?;

    let compiled = sources
        .into_par_iter()
        .map(|(input, src)| {
            let format = match format {
                Format::Auto => SourceFormat::detect(&src),
                Format::Json => SourceFormat::Json,
                Format::Judge => SourceFormat::Judge,
            };
            let desc = map::read_description(&src, format)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let map = if skip_validation {
                map::compile(&desc)
            } else {
                map::compile_validated(&desc)
            }
            .with_context(|| format!("failed to compile {}", input.display()))?;
            log::info!(
                "{}: {} provinces, {} army edges, {} fleet edges",
                input.display(),
                map.provinces.len(),
                map.army_adj.len(),
                map.fleet_adj.len()
            );
            Ok(Compiled { input, map })
        })
        .collect::<Result<Vec<_>>>()?;

    match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for c in &compiled {
                let path = dir.join(output_name(&c.input));
                fs::write(&path, to_json(&c.map, pretty)? + "\n")
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("wrote {}", path.display());
            }
        }
        None => {
            for c in &compiled {
                print_json(&c.map, pretty)?;
            }
        }
    }
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut src = String::new();
        io::stdin()
            .read_to_string(&mut src)
            .context("failed to read stdin")?;
        return Ok(src);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn output_name(input: &Path) -> String {
    if is_stdin(input) {
        return "stdin.json".to_string();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    format!("{}.json", stem)
}

fn to_json(map: &CompiledMap, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(map)
    } else {
        serde_json::to_string(map)
    };
    json.context("failed to serialize compiled map")
}

fn print_json(map: &CompiledMap, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    writeln!(out, "{}", to_json(map, pretty)?)?;
    out.flush()?;
    Ok(())
}

fn walk_phases(start: GamePhase, steps: usize, reverse: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut phase = start;
    writeln!(out, "{}", phase)?;
    for _ in 0..steps {
        phase = if reverse { phase.prev() } else { phase.next() };
        writeln!(out, "{}", phase)?;
    }
    out.flush()?;
    Ok(())
}

fn lookup(name: &str) -> Result<()> {
    let map = CompiledMap::standard().context("bundled classic map is invalid")?;
    let Some(key) = map.resolve_name(name) else {
        bail!("unknown province '{}'", name);
    };
    let Some(province) = map.province(key) else {
        bail!("alias '{}' points at missing province '{}'", name, key);
    };

    let kind = if province.is_sea {
        "sea"
    } else if map.is_coastal(key) {
        "coastal"
    } else {
        "land"
    };
    let fleet: Vec<String> = map
        .fleet_destinations(&FleetLoc::new(key))
        .iter()
        .map(ToString::to_string)
        .collect();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    writeln!(out, "{}\t{}\t{}", key, province.name, kind)?;
    if !province.coasts.is_empty() {
        let coasts: Vec<&str> = province.coasts.iter().map(String::as_str).collect();
        writeln!(out, "coasts\t{}", coasts.join(" "))?;
    }
    writeln!(out, "army\t{}", map.army_neighbors(key).join(" "))?;
    writeln!(out, "fleet\t{}", fleet.join(" "))?;
    out.flush()?;
    Ok(())
}
