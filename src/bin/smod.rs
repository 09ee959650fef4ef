//! `smod`: the command-line front-end over [`spectral_modularity::engine`]
//! (C9, §4.9).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

use spectral_modularity::eigen::EigenMethod;
use spectral_modularity::engine::config::RunConfig;
use spectral_modularity::engine::{Engine, EngineSettings};
use spectral_modularity::export::{communities, dendrogram, modularity};
use spectral_modularity::graph::formats::{self, Format};

/// Recursive spectral modularity maximization over undirected graphs.
#[derive(Debug, Parser)]
#[command(name = "smod", version, about)]
struct Cli {
    /// Input graph file paths (shell-expanded globs are accepted as-is).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Input format; inferred from the file extension if omitted.
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// Directory export writers place their output files in.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable local Moving-Vertex refinement within each bisection.
    #[arg(long)]
    mvm: bool,

    /// Enable the whole-tree global Moving-Vertex post-pass.
    #[arg(long)]
    gmvm: bool,

    /// Eigen backend: power iteration (default) or full EVD (validation
    /// only, small graphs).
    #[arg(long, value_enum, default_value_t = CliEigenMethod::Power)]
    eigen: CliEigenMethod,

    /// Write the dendrogram export file.
    #[arg(long)]
    export_dendrogram: bool,

    /// Write the per-node community-index export (`B_community.dat`).
    #[arg(long)]
    export_indivisible_communities: bool,

    /// Write a per-community subnetwork export (hook point only; see
    /// design notes on export collaborators).
    #[arg(long)]
    export_subnetworks: bool,

    /// Annotate exports with a color index per community.
    #[arg(long)]
    color: bool,

    /// TOML configuration file, layered under built-in defaults and above
    /// which these CLI flags win.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a loader's random-edge sampling (out of core scope for the
    /// engine; accepted for CLI-surface completeness only).
    #[arg(long)]
    seed: Option<u64>,

    /// Raise the log level (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Lower the log level (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliFormat {
    Tsv,
    Gml,
    Dot,
    Net,
}

impl From<CliFormat> for Format {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Tsv => Format::Tsv,
            CliFormat::Gml => Format::Gml,
            CliFormat::Dot => Format::Dot,
            CliFormat::Net => Format::Net,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliEigenMethod {
    Power,
    Full,
}

impl From<CliEigenMethod> for EigenMethod {
    fn from(method: CliEigenMethod) -> Self {
        match method {
            CliEigenMethod::Power => EigenMethod::Power,
            CliEigenMethod::Full => EigenMethod::FullEvd,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    install_logging(cli.verbose, cli.quiet);

    let base_config = match &cli.config {
        Some(path) => match RunConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "failed to load configuration");
                return ExitCode::from(1);
            }
        },
        None => RunConfig::default(),
    };
    let overrides = cli_overrides(&cli);
    let settings = base_config.merged_with(&overrides).to_engine_settings();

    let codes: Vec<u8> = if cli.inputs.len() > 1 {
        cli.inputs.par_iter().map(|input| run_one(input, cli.format, settings, &cli.output_dir)).collect()
    } else {
        cli.inputs.iter().map(|input| run_one(input, cli.format, settings, &cli.output_dir)).collect()
    };

    ExitCode::from(codes.into_iter().max().unwrap_or(1))
}

fn cli_overrides(cli: &Cli) -> RunConfig {
    RunConfig {
        input: cli.inputs.first().cloned(),
        format: cli.format.map(|f| match f {
            CliFormat::Tsv => spectral_modularity::engine::config::ConfigFormat::Tsv,
            CliFormat::Gml => spectral_modularity::engine::config::ConfigFormat::Gml,
            CliFormat::Dot => spectral_modularity::engine::config::ConfigFormat::Dot,
            CliFormat::Net => spectral_modularity::engine::config::ConfigFormat::Net,
        }),
        output_dir: Some(cli.output_dir.clone()),
        mvm: cli.mvm.then_some(true),
        gmvm: cli.gmvm.then_some(true),
        eigen: Some(match cli.eigen {
            CliEigenMethod::Power => spectral_modularity::engine::config::ConfigEigenMethod::Power,
            CliEigenMethod::Full => spectral_modularity::engine::config::ConfigEigenMethod::Full,
        }),
        export_dendrogram: cli.export_dendrogram.then_some(true),
        export_indivisible_communities: cli.export_indivisible_communities.then_some(true),
        export_subnetworks: cli.export_subnetworks.then_some(true),
        color: cli.color.then_some(true),
        log_level: None,
    }
}

/// Runs the full pipeline for a single input file, returning the exit
/// code it contributes (0 ok, 1 input error, 2 compute error — §4.9).
fn run_one(input: &Path, format: Option<CliFormat>, settings: EngineSettings, output_dir: &Path) -> u8 {
    let graph = match format {
        Some(format) => formats::load_file(input, format.into()),
        None => formats::load_file_inferred(input),
    };
    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            error!(error = %e, input = %input.display(), "failed to load graph");
            return 1;
        }
    };

    let engine = Engine::new(settings);
    let outcome = match engine.run_to_completion(&graph) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, input = %input.display(), "engine run failed");
            return 2;
        }
    };
    if outcome.canceled {
        error!(input = %input.display(), q = outcome.modularity, "PARTIAL: run canceled before completion");
    }

    let base = input.file_stem().and_then(|s| s.to_str()).unwrap_or("graph");
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        error!(error = %e, "failed to create output directory");
        return 1;
    }

    let communities_path = output_dir.join(format!("{base}_communities.dat"));
    if let Err(e) = std::fs::write(&communities_path, communities::render_communities(&outcome.tree, &graph)) {
        error!(error = %e, path = %communities_path.display(), "failed to write communities export");
        return 1;
    }

    let modularity_path = output_dir.join(format!("{base}_modularity.dat"));
    if let Err(e) = std::fs::write(&modularity_path, modularity::render_modularity(outcome.modularity)) {
        error!(error = %e, path = %modularity_path.display(), "failed to write modularity export");
        return 1;
    }

    if settings.export_dendrogram {
        let dendrogram_path = output_dir.join(format!("{base}_dendrogram.dat"));
        if let Err(e) = std::fs::write(&dendrogram_path, dendrogram::render_dendrogram(&outcome.tree)) {
            error!(error = %e, path = %dendrogram_path.display(), "failed to write dendrogram export");
            return 1;
        }
    }

    if settings.export_indivisible_communities {
        let community_path = output_dir.join(format!("{base}_community.dat"));
        let rendered = communities::render_node_community_index(&outcome.tree, &graph);
        if let Err(e) = std::fs::write(&community_path, rendered) {
            error!(error = %e, path = %community_path.display(), "failed to write community-index export");
            return 1;
        }
    }

    0
}

fn install_logging(verbose: u8, quiet: u8) {
    let level = match i16::from(verbose) - i16::from(quiet) {
        ..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
