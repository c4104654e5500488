use clap::{Parser, ValueEnum};
use ddlgraph::config::InferenceRules;
use ddlgraph::details::render_table;
use ddlgraph::summary::schema_summary;
use ddlgraph::view::{DetailLevel, GraphView};
use ddlgraph::{ExtractError, SchemaData};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ddlgraph")]
#[command(about = "Extract tables, columns and inferred relationships from SQL DDL")]
struct Cli {
    /// DDL file to read, or `-` for stdin
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "json", env = "DDLGRAPH_FORMAT")]
    format: Format,

    /// Columns kept in `graph` output: tables, pk, pk_fk, all
    #[arg(short, long, default_value = "all", value_parser = parse_detail)]
    detail: DetailLevel,

    /// Table to show in `details` output (default: every table)
    #[arg(short, long)]
    table: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Full schema graph as JSON
    Json,
    /// Node/edge view for diagram renderers, as JSON
    Graph,
    /// Condensed text for language-model prompts
    Summary,
    /// Aligned per-table column listing
    Details,
}

fn parse_detail(s: &str) -> Result<DetailLevel, String> {
    DetailLevel::from_str(s).ok_or_else(|| format!("invalid detail level: {}", s))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ddlgraph=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ExtractError> {
    let input = read_input(&cli.input)?;
    let rules = InferenceRules::from_env();
    tracing::debug!(?rules, "using inference rules");

    let schema = ddlgraph::extract_with(&input, &rules)?;
    tracing::info!(
        tables = schema.tables.len(),
        relationships = schema.relationships.len(),
        "schema extracted"
    );

    let rendered = render(cli, &schema)?;
    match &cli.output {
        Some(path) => fs::write(path, rendered).map_err(|source| ExtractError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<String, ExtractError> {
    let read_err = |source: io::Error| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        fs::read_to_string(path).map_err(read_err)
    }
}

fn render(cli: &Cli, schema: &SchemaData) -> Result<String, ExtractError> {
    let text = match cli.format {
        Format::Json => serde_json::to_string_pretty(schema)? + "\n",
        Format::Graph => {
            serde_json::to_string_pretty(&GraphView::from_schema(schema, cli.detail))? + "\n"
        }
        Format::Summary => schema_summary(&schema.tables) + "\n",
        Format::Details => match &cli.table {
            Some(name) => {
                let table = schema
                    .tables
                    .iter()
                    .find(|t| &t.name == name || &t.id == name)
                    .ok_or_else(|| ExtractError::UnknownTable(name.clone()))?;
                render_table(schema, table)
            }
            None => schema
                .tables
                .iter()
                .map(|table| render_table(schema, table))
                .collect::<Vec<_>>()
                .join("\n"),
        },
    };
    Ok(text)
}
