use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use querywire::*;
use tracing::debug;
use tracing_subscriber::prelude::*;

/// Querywire compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log compiler and resolver decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a JSON query into a request
    Compile(CompileArgs),
    /// Attach referenced entities to the records of a JSON response
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
struct CompileArgs {
    /// The query as JSON. If empty, stdin will be used.
    query: Option<String>,
    /// Print the full URL relative to this base instead of the request itself
    #[arg(short, long)]
    base_url: Option<String>,
    #[arg(short, long, value_enum, default_value = "line")]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    /// `METHOD path?params body`
    #[default]
    Line,
    Json,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Path to the response JSON file. If empty, stdin will be used.
    #[arg(short, long)]
    response: Option<String>,
    /// Kind of the records in the response
    #[arg(short, long, default_value = "record")]
    kind: String,
    /// Relation to resolve, as `name`, `name:foreignKey` or `name:foreignKey:bucket`
    #[arg(long = "relation", required = true)]
    relations: Vec<String>,
    /// Override the bucket of a foreign key, as `foreignKey=bucket`
    #[arg(long = "bucket")]
    buckets: Vec<String>,
    /// Only match bucket names exactly
    #[arg(long)]
    strict: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "querywire=debug" } else { "querywire=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn get_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn compile(args: CompileArgs) -> Result<()> {
    let query_json = match args.query {
        Some(query) => query,
        None => get_stdin()?,
    };
    let compiler = Compiler::new(Options::default());
    let request = compiler.compile_json(&query_json)?;
    match (args.base_url, args.format) {
        (Some(base_url), _) => println!("{} {}", request.method, request.url(&base_url)),
        (None, Format::Line) => println!("{request}"),
        (None, Format::Json) => println!("{}", serde_json::to_string_pretty(&request)?),
    }
    Ok(())
}

fn parse_relation(s: &str) -> Result<RelationSpec> {
    let mut parts = s.split(':');
    let Some(name) = parts.next().filter(|n| !n.is_empty()) else {
        bail!("Relation `{s}` has no name");
    };
    let mut spec = RelationSpec::new(name);
    if let Some(foreign_key) = parts.next().filter(|k| !k.is_empty()) {
        spec = spec.with_foreign_key(foreign_key);
    }
    if let Some(bucket) = parts.next().filter(|b| !b.is_empty()) {
        spec = spec.from_bucket(bucket);
    }
    if parts.next().is_some() {
        bail!("Relation `{s}` has too many parts");
    }
    Ok(spec)
}

fn parse_policy(buckets: &[String]) -> Result<BucketPolicy> {
    buckets.iter().try_fold(BucketPolicy::new(), |policy, entry| {
        let (foreign_key, bucket) = entry
            .split_once('=')
            .with_context(|| format!("Bucket override `{entry}` is not `foreignKey=bucket`"))?;
        Ok(policy.with_override(foreign_key, bucket))
    })
}

fn resolve(args: ResolveArgs) -> Result<()> {
    let response_json = match &args.response {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response file `{path}`"))?,
        None => get_stdin()?,
    };
    let envelope: ResponseEnvelope =
        serde_json::from_str(&response_json).context("Response is not valid JSON")?;
    let specs = args
        .relations
        .iter()
        .map(|r| parse_relation(r))
        .collect::<Result<Vec<_>>>()?;
    let identifier_resolution = if args.strict {
        IdentifierResolution::Strict
    } else {
        IdentifierResolution::Flexible
    };
    let resolver = RelationResolver::new(parse_policy(&args.buckets)?)
        .with_identifier_resolution(identifier_resolution);

    let (mut records, referenced) = envelope.into_parts(&args.kind);
    debug!(records = records.len(), buckets = referenced.len(), "read response");
    resolver.resolve(&mut records, &referenced, &specs);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);
    match args.command {
        Command::Compile(args) => compile(args),
        Command::Resolve(args) => resolve(args),
    }
}
