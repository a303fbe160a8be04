use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use pkgraph::config::{AnalysisConfig, InclusionPolicy, RootConfig};
use pkgraph::core::{source_roots, CodebaseAnalyzer, GraphBuilder};
use pkgraph::formatters::OutputFormat;
use pkgraph::parsers::cache::ImportCache;
use pkgraph::parsers::{ExtractorKind, ParserFactory};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pkgraph",
    version,
    about = "Graph the package dependencies of a Go source tree"
)]
struct Cli {
    /// Source directories to analyze
    #[arg(value_name = "SRC", default_value = "./")]
    src: Vec<PathBuf>,

    /// Output file, `-` for stdout
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    out: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Include test files
    #[arg(short = 't', long = "tests")]
    include_tests: bool,

    /// Summarize on file level
    #[arg(short = 'f', long = "fl")]
    file_level: bool,

    /// Include packages found under $GOROOT/src
    #[arg(long = "goroot-deps", alias = "include-goroot")]
    include_goroot: bool,

    /// Include the vendor directory
    #[arg(long = "vendor")]
    include_vendor: bool,

    /// Import extraction front end
    #[arg(long, value_name = "KIND", value_enum, default_value_t = ExtractorKind::TreeSitter)]
    parser: ExtractorKind,

    /// Cache extracted imports in this directory between runs
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Overrides $GOPATH
    #[arg(long, env = "GOPATH", value_name = "DIR")]
    gopath: Option<PathBuf>,

    /// Overrides $GOROOT
    #[arg(long, env = "GOROOT", value_name = "DIR")]
    goroot: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        src,
        out,
        format,
        include_tests,
        file_level,
        include_goroot,
        include_vendor,
        parser,
        cache_dir,
        gopath,
        goroot,
        log_level: _,
    } = cli;

    let start_time = Instant::now();

    let working_dir = std::env::current_dir().context("Unable to get current directory")?;
    let roots = RootConfig::from_go_env(gopath.as_deref(), goroot.as_deref(), working_dir)?;
    let policy = InclusionPolicy {
        include_tests,
        include_system_root: include_goroot,
        include_vendor,
        file_level,
    };
    let config = AnalysisConfig::new(roots, policy);

    // Roots must exist before the output file is created or truncated.
    let src = source_roots(&config, &src)?;
    let mut writer: Box<dyn Write> = if out.is_empty() || out == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        let file =
            File::create(&out).with_context(|| format!("unable to create file `{}'", out))?;
        Box::new(BufWriter::new(file))
    };

    let extractor = ParserFactory::new().get_extractor(parser)?;
    info!(language = extractor.language_name(), parser = ?parser, "front end ready");
    let mut analyzer = match cache_dir {
        Some(dir) => CodebaseAnalyzer::with_cache(&config, extractor, ImportCache::new(dir)),
        None => CodebaseAnalyzer::new(&config, extractor),
    };

    let report = analyzer.analyze(&src)?;
    info!(
        edges = report.edges.len(),
        files = report.stats.files_scanned,
        skipped = report.stats.files_skipped,
        errors = report.stats.errors,
        visited = report.visited,
        expanded = report.expanded,
        "analysis complete"
    );

    let graph = GraphBuilder::from_edges(&report.edges);
    format.formatter().write_graph(&graph, &mut writer)?;

    info!(
        format = format.as_str(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "graph written"
    );
    Ok(())
}
