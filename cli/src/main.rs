//! hsmeta: command-line interface for HydroShare metadata documents
//!
//! Reads RDF/XML or Turtle metadata files and prints the typed model, the
//! graph in another syntax, or its triples.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use hydroshare_models::models::schemas::RESOURCE;
use hydroshare_models::models::{AggregationMetadata, MetadataDocument, ResourceMetadata};
use hydroshare_models::rdf::{
    Graph, NamespaceManager, RdfFormat, RdfObject, RdfParser, RdfSerializer, RdfSubject,
};
use hydroshare_models::{MappingConfig, ResourceMap, SchemaRegistry};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hsmeta", version, about = "HydroShare metadata inspector")]
struct Cli {
    /// Mapping configuration (YAML)
    #[arg(long, global = true, env = "HSMETA_CONFIG")]
    config: Option<PathBuf>,

    /// Input syntax; guessed from the file extension when omitted
    #[arg(long, global = true)]
    from: Option<RdfFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resource, aggregation or resource map held by a file as JSON
    Inspect {
        file: PathBuf,
    },
    /// Re-emit a document in another RDF syntax
    Convert {
        file: PathBuf,

        /// Target syntax: rdf-xml, turtle or n-triples
        #[arg(long)]
        to: RdfFormat,
    },
    /// List the triples of a document with prefixed names
    Triples {
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,

        /// Extra prefix as NAME=IRI; may be repeated
        #[arg(long = "prefix", value_parser = parse_prefix)]
        prefixes: Vec<(String, String)>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => MappingConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MappingConfig::default(),
    };

    match &cli.command {
        Commands::Inspect { file } => {
            let graph = load(file, cli.from, &config)?;
            run_inspect(&graph)
        }
        Commands::Convert { file, to } => {
            let graph = load(file, cli.from, &config)?;
            print!("{}", RdfSerializer::serialize(&graph, *to)?);
            Ok(())
        }
        Commands::Triples {
            file,
            format,
            prefixes,
        } => {
            let graph = load(file, cli.from, &config)?;
            let namespaces = prefixes
                .iter()
                .fold(NamespaceManager::new(), |namespaces, (name, iri)| {
                    namespaces.with_prefix(name.as_str(), iri.as_str())
                });
            run_triples(&graph, &namespaces, format)
        }
    }
}

fn load(path: &Path, format: Option<RdfFormat>, config: &MappingConfig) -> Result<Graph> {
    let format = format
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(RdfFormat::from_extension)
        })
        .unwrap_or(config.default_format);
    let input =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let graph = RdfParser::parse_with_base(&input, format, config.base_iri.as_deref())
        .with_context(|| format!("parsing {} as {}", path.display(), format))?;
    info!(file = %path.display(), triples = graph.len(), "loaded document");
    Ok(graph)
}

fn run_inspect(graph: &Graph) -> Result<()> {
    let document = if SchemaRegistry::new([&RESOURCE]).resolve(graph)?.is_some() {
        debug!("document is a composite resource");
        let resource = ResourceMetadata::from_graph(graph)?
            .context("resource document holds no metadata")?;
        serde_json::json!({ "document": "resource", "metadata": resource })
    } else if let Some(aggregation) = AggregationMetadata::parse(graph)? {
        serde_json::json!({
            "document": "aggregation",
            "type": aggregation.aggregation_type().as_str(),
            "metadata": aggregation,
        })
    } else {
        let map = ResourceMap::parse(graph)
            .context("not a resource, aggregation or resource map document")?;
        serde_json::json!({ "document": "resource_map", "metadata": map })
    };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn run_triples(
    graph: &Graph,
    namespaces: &NamespaceManager,
    format: &OutputFormat,
) -> Result<()> {
    let rows: Vec<[String; 3]> = graph
        .iter()
        .map(|triple| {
            [
                subject_name(namespaces, &triple.subject),
                compact(namespaces, triple.predicate.as_str()),
                object_name(namespaces, &triple.object),
            ]
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json: Vec<_> = rows
                .iter()
                .map(|[s, p, o]| serde_json::json!({ "subject": s, "predicate": p, "object": o }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            println!("subject,predicate,object");
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|cell| format_csv_value(cell)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no triples)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(["subject", "predicate", "object"]);
            for row in &rows {
                table.add_row(row.iter());
            }

            println!("{}", table);
            println!("{} triple(s)", rows.len());
        }
    }

    Ok(())
}

fn parse_prefix(text: &str) -> std::result::Result<(String, String), String> {
    match text.split_once('=') {
        Some((name, iri)) if !name.is_empty() && !iri.is_empty() => {
            Ok((name.to_string(), iri.to_string()))
        }
        _ => Err(format!("expected NAME=IRI, got '{}'", text)),
    }
}

fn compact(namespaces: &NamespaceManager, iri: &str) -> String {
    namespaces
        .compact(iri)
        .unwrap_or_else(|| format!("<{}>", iri))
}

fn subject_name(namespaces: &NamespaceManager, subject: &RdfSubject) -> String {
    match subject.as_iri() {
        Some(iri) => compact(namespaces, iri),
        None => subject.to_string(),
    }
}

fn object_name(namespaces: &NamespaceManager, object: &RdfObject) -> String {
    match object {
        RdfObject::NamedNode(node) => compact(namespaces, node.as_str()),
        other => other.to_string(),
    }
}

fn format_csv_value(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
