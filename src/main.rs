//! CLI entry point for `taxonomy2sql`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use taxonomy2sql::classifier::builder::CapitalExpressions;
use taxonomy2sql::classifier::taxonomy::{default_capital_taxonomy, CategoryTaxonomy};
use taxonomy2sql::config::capital::CapitalConfig;
use taxonomy2sql::config::vars::ProjectVars;
use taxonomy2sql::output::formatter;
use taxonomy2sql::registry::alias_table::{default_manufacturer_aliases, AliasTable};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "taxonomy2sql",
    about = "Compile spend taxonomy configuration into SQL classification expressions"
)]
struct Cli {
    /// Project settings JSON with a `vars` object (e.g. dataform.json)
    #[arg(long)]
    vars: Option<PathBuf>,

    /// Manufacturer alias table JSON (defaults to the built-in imaging brands)
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Category taxonomy JSON (defaults to the built-in capital tiers)
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Ignore TAXONOMY2SQL_VAR_* environment overrides
    #[arg(long)]
    no_env: bool,

    /// Output directory
    #[arg(long, default_value = "taxonomy2sql-output")]
    output_dir: PathBuf,

    /// Prefix for generated file names
    #[arg(long, default_value = "capital")]
    name: String,

    /// Print expressions as JSON to stdout instead of writing files
    #[arg(long)]
    json: bool,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Stage 1: Resolve project vars (file, then environment overrides)
    let mut vars = match &cli.vars {
        Some(path) => match ProjectVars::from_path(path) {
            Ok(vars) => vars,
            Err(e) => fail(&format!("Error loading vars: {e}")),
        },
        None => ProjectVars::new(),
    };
    if !cli.no_env {
        vars.merge(ProjectVars::from_env());
    }
    for (key, value) in vars.iter() {
        debug!(key, value, "project var");
    }
    let config = CapitalConfig::from_vars(&vars);

    // Stage 2: Load alias table and taxonomy
    let aliases = match &cli.aliases {
        Some(path) => match AliasTable::from_path(path) {
            Ok(table) => table,
            Err(e) => fail(&format!("Error loading alias table: {e}")),
        },
        None => default_manufacturer_aliases(),
    };
    let taxonomy = match &cli.taxonomy {
        Some(path) => match CategoryTaxonomy::from_path(path) {
            Ok(taxonomy) => taxonomy,
            Err(e) => fail(&format!("Error loading taxonomy: {e}")),
        },
        None => default_capital_taxonomy(),
    };

    // Stage 3: Compile expressions
    let expressions = CapitalExpressions::build(&config, &taxonomy, &aliases);

    // Stage 4: Emit
    if cli.json {
        match serde_json::to_string_pretty(&expressions) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&format!("Error serializing expressions: {e}")),
        }
        return;
    }

    if let Err(e) = formatter::write_output(
        &cli.output_dir,
        &cli.name,
        &config,
        &taxonomy,
        &aliases,
        &expressions,
    ) {
        fail(&format!("Error writing output: {e}"));
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(2);
}
