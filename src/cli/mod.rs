pub mod commands;
pub mod errors;
pub mod tracing_init;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    Text,
    /// Output as JSON
    Json,
    /// Output as YAML
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Strata: inspect OpenAPI 3.0 documents with source positions",
    long_about = "Strata builds OpenAPI 3.0 documents into a model that remembers where\n\
                  every value was written, resolves $refs lazily, and reports every\n\
                  problem it finds with its line and column.\n\n\
                  Examples:\n  \
                  strata inspect openapi.yaml\n  \
                  strata inspect openapi.yaml --allow-files --format json\n  \
                  strata locate openapi.yaml /components/schemas/Pet\n  \
                  strata refs openapi.yaml"
)]
pub struct Cli {
    /// Output all errors as structured JSON to stderr
    #[arg(long, global = true, help = "Output errors in JSON format")]
    pub json_errors: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v for debug, -vv for trace)"
    )]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where a document comes from and which external documents it may reach
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to the `OpenAPI` document (YAML or JSON)
    pub file: PathBuf,

    /// Build configuration file
    #[arg(long, value_name = "TOML", help = "Load build settings from a TOML file")]
    pub config: Option<PathBuf>,

    /// Resolve references into other local files
    #[arg(long, help = "Follow $refs into other files, relative to the document")]
    pub allow_files: bool,

    /// Resolve references to http(s) URLs
    #[arg(long, help = "Follow $refs to remote documents")]
    pub allow_remote: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a document and summarize it
    #[command(
        long_about = "Build an OpenAPI document and print a summary.\n\n\
                      The summary lists the document version and title, counts of paths,\n\
                      operations and schemas, circular references, and every error with\n\
                      its position. Exits with status 1 when the build reported errors.\n\n\
                      Examples:\n  \
                      strata inspect openapi.yaml\n  \
                      strata inspect openapi.yaml --max-depth 10 --truncate"
    )]
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,

        /// Deepest schema level built in full
        #[arg(long, value_name = "N", help = "Schema depth ceiling")]
        max_depth: Option<usize>,

        /// Truncate schemas past the depth ceiling instead of failing them
        #[arg(long, help = "Truncate schemas nested past --max-depth")]
        truncate: bool,

        /// Resolve every schema instead of stopping at the proxies
        #[arg(long, help = "Resolve all component schemas and report their errors")]
        resolve_schemas: bool,
    },
    /// Print the position of the node at a JSON pointer
    #[command(long_about = "Print the line and column of the node at a JSON pointer.\n\n\
                      Examples:\n  \
                      strata locate openapi.yaml /paths/~1pets/get\n  \
                      strata locate openapi.yaml '#/components/schemas/Pet'")]
    Locate {
        /// Path to the `OpenAPI` document
        file: PathBuf,
        /// JSON pointer, with or without a leading `#`
        pointer: String,
    },
    /// List every reference in a document with the position of its target
    Refs {
        #[command(flatten)]
        source: SourceArgs,
    },
}
