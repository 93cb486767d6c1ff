//! Command-line interface for xsdwalker

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
use xsdwalker::inputs::InputExpander;
#[cfg(feature = "cli")]
use xsdwalker::report::{render_graph, render_report};
#[cfg(feature = "cli")]
use xsdwalker::uber::synthesize_uber_schema;
#[cfg(feature = "cli")]
use xsdwalker::{NodeSet, Result, Walker, DEFAULT_XSD_PREFIX};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdwalker")]
#[command(author, version, about = "Walk a graph of .xsd documents and emit an uber schema", long_about = None)]
struct Cli {
    /// Exclude any file/directory whose path matches the pattern (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    excludes: Vec<PathBuf>,

    /// Produce an edges file ($NAME.graph) for graph visualization
    #[arg(short = 'g', long = "graph")]
    graph: bool,

    /// Dry run: show the expanded .xsd set but do not visit any
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Name of the uber .xsd output (defaults to the first input's name)
    #[arg(short = 'u', long = "uber", value_name = "NAME")]
    uber: Option<String>,

    /// Verbose logging and node listing
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Fail if any recorded edge has a namespace linkage mismatch
    #[arg(long)]
    strict: bool,

    /// Input .xsd files, directories, or URLs
    #[arg(required = true, value_name = "FILE|DIR|URL")]
    inputs: Vec<String>,
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xsdwalker: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "xsdwalker=debug" } else { "xsdwalker=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<()> {
    let mut expander = InputExpander::new();
    for pattern in &cli.excludes {
        expander = expander.exclude(pattern);
    }
    let expanded = expander.expand(&cli.inputs)?;
    println!("Inputs: {}", expanded.seeds.len());
    if cli.verbose || cli.dry_run {
        for seed in &expanded.seeds {
            println!("{}", seed);
        }
    }
    if cli.dry_run {
        return Ok(());
    }

    let name = cli.uber.clone().unwrap_or(expanded.output_name);

    let mut walker = Walker::new();
    let set = walker.resolve(&expanded.seeds);
    let stats = walker.stats();
    println!("Nodes: {}", set.len());
    if stats.parse_failures > 0 {
        println!("Parse failures: {}", stats.parse_failures);
    }
    if set.is_empty() {
        return Ok(());
    }
    if cli.verbose {
        for node in set.sorted() {
            println!("{}", node.location());
        }
    }

    if cli.strict {
        set.verify_linkage()?;
    }

    let leaves = set.leaf_nodes();
    let remotes = set.remote_nodes();
    println!("Leaf Nodes: {}", leaves.len());
    println!("Remote Nodes: {}", remotes.len());
    let pruned = NodeSet::prune_leaf_nodes(&leaves, &remotes);

    let report_file = PathBuf::from(format!("{}.txt", name));
    fs::write(&report_file, render_report(&set, DEFAULT_XSD_PREFIX)?)?;
    println!("Report: {}", report_file.display());

    let uber_file = PathBuf::from(format!("{}.uber.xsd", name));
    let uber_name = uber_file.to_string_lossy().into_owned();
    fs::write(
        &uber_file,
        synthesize_uber_schema(&pruned, &uber_name, DEFAULT_XSD_PREFIX)?,
    )?;
    println!("Uber schema: {}", uber_file.display());

    if cli.graph {
        let graph_file = PathBuf::from(format!("{}.graph", name));
        fs::write(&graph_file, render_graph(&set))?;
        println!("Graph file: {}", graph_file.display());
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
