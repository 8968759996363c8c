use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use bang_router::bangs::load_catalogs;
use bang_router::compiler::{compile, CompiledTable};
use bang_router::config::validation::{normalize_search, validate_config};
use bang_router::config::schema::CatalogSource;
use bang_router::config::{load_config, RouterConfig};
use bang_router::observability::init_logging;
use bang_router::resolver::resolve_detailed;
use bang_router::store::file::{read_table, write_table};

#[derive(Parser)]
#[command(name = "bang-cli")]
#[command(about = "Compile, inspect and test bang tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a config into a lookup table
    Compile {
        #[arg(short, long)]
        config: PathBuf,

        /// Vendor catalog as `NAME=PATH`, repeatable, replacing the
        /// configured `[[catalog.sources]]`
        #[arg(long, value_parser = parse_catalog_source)]
        catalog: Vec<CatalogSource>,

        /// Write the table here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the destination for a query
    Resolve {
        query: String,

        #[command(flatten)]
        source: TableSource,
    },
    /// Report config problems
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TableSource {
    /// Compiled table (JSON)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Config to compile on the fly
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging("warn");

    match cli.command {
        Commands::Compile { config, catalog, out } => {
            let config = load_config(&config)?;
            let table = compile_config(&config, &catalog);
            match out {
                Some(path) => {
                    write_table(&path, &table)?;
                    eprintln!("Wrote {} entries to {}", table.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&table)?),
            }
        }
        Commands::Resolve { query, source } => {
            let table = match (source.table, source.config) {
                (Some(path), _) => read_table(&path)?,
                (None, Some(path)) => compile_config(&load_config(&path)?, &[]),
                (None, None) => return Err("either --table or --config is required".into()),
            };
            let resolution = resolve_detailed(&query, &table);
            eprintln!("({})", resolution.outcome.as_str());
            println!("{}", resolution.url);
        }
        Commands::Check { config } => check(&config)?,
    }

    Ok(())
}

fn compile_config(config: &RouterConfig, catalogs: &[CatalogSource]) -> CompiledTable {
    let mut catalog = config.catalog.clone();
    if !catalogs.is_empty() {
        catalog.sources = catalogs.to_vec();
    }
    compile(&config.search, &load_catalogs(&catalog))
}

fn parse_catalog_source(arg: &str) -> Result<CatalogSource, String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(CatalogSource {
            name: name.to_string(),
            path: Some(path.to_string()),
        }),
        _ => Err(format!("expected NAME=PATH, got {arg:?}")),
    }
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let mut config: RouterConfig = toml::from_str(&content)?;

    let errors = validate_config(&config).err().unwrap_or_default();
    let warnings = normalize_search(&mut config.search);

    for warning in &warnings {
        println!("warning: {}", warning);
    }
    for error in &errors {
        println!("error: {}", error);
    }

    if errors.is_empty() {
        println!(
            "{}: ok ({} overrides, {} warnings)",
            path.display(),
            config.search.bang_overrides.len(),
            warnings.len()
        );
        Ok(())
    } else {
        Err(format!("{} error(s) in {}", errors.len(), path.display()).into())
    }
}
