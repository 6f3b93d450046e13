mod commands;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use commands::{
    compare::CompareArgs, convert::ConvertArgs, decode::DecodeArgs, encode::EncodeArgs,
    types::TypesArgs,
};
use fieldtype::FieldTypeRegistry;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fieldtool",
    about = "Encode, decode, compare and convert values of order-preserving field types"
)]
struct Cli {
    /// Log registry activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Register an enum type, e.g. --enum Color=RED,GREEN,BLUE
    #[arg(long = "enum", value_name = "NAME=ID,ID,...", global = true)]
    enums: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered types with their shapes
    Types(TypesArgs),
    /// Encode a value given in text form; prints hex
    Encode(EncodeArgs),
    /// Decode hex bytes; prints the text form
    Decode(DecodeArgs),
    /// Compare two values; prints -1, 0 or 1
    Compare(CompareArgs),
    /// Convert a value from one type to another
    Convert(ConvertArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_enum(spec: &str) -> Result<(&str, Vec<&str>)> {
    let (name, identifiers) = spec
        .split_once('=')
        .with_context(|| format!("invalid --enum '{spec}': expected NAME=ID,ID,..."))?;
    if identifiers.is_empty() {
        bail!("invalid --enum '{spec}': no identifiers");
    }
    Ok((name.trim(), identifiers.split(',').map(str::trim).collect()))
}

fn build_registry(enums: &[String]) -> Result<FieldTypeRegistry> {
    let mut builder = FieldTypeRegistry::builder().with_default_types();
    for spec in enums {
        let (name, identifiers) = parse_enum(spec)?;
        builder = builder.with_enum(name, identifiers);
    }
    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let registry = build_registry(&cli.enums)?;
    tracing::debug!(types = registry.len(), "registry ready");

    match cli.command {
        Commands::Types(args) => args.run(&registry),
        Commands::Encode(args) => args.run(&registry),
        Commands::Decode(args) => args.run(&registry),
        Commands::Compare(args) => args.run(&registry),
        Commands::Convert(args) => args.run(&registry),
    }
}
