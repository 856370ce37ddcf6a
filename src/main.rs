//! Pivot Frame CLI
//!
//! Runs the frame HTTP service, loads row batches into it,
//! and queries aggregates from it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use pivot_frame::commands::{
    execute_load, execute_query, execute_serve, validate_args, LoadArgs, QueryArgs, QueryKind,
};
use pivot_frame::service::DataFrameHeader;
use pivot_frame::utils::config::{
    ServerConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SERVER_URL, PIVOT_KEY_DELIMITER,
};

/// Pivot Frame - in-memory pivot aggregation service
#[derive(Parser, Debug)]
#[command(name = "pivot-frame")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long, env = "PIVOT_FRAME_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PIVOT_FRAME_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Deadline in seconds for the combined SUM + COUNT endpoint
        #[arg(long, default_value = "10")]
        agg_timeout_secs: u64,
    },

    /// Load a JSON batch of rows into a running server
    Load {
        /// Server base URL
        #[arg(short, long, env = "PIVOT_FRAME_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,

        /// Batch file to load
        #[arg(short, long)]
        file: PathBuf,

        /// Pivot column names, comma separated (overrides the file's schema)
        #[arg(long, value_delimiter = ',')]
        pivots: Option<Vec<String>>,

        /// Value column names, comma separated (overrides the file's schema)
        #[arg(long, value_delimiter = ',')]
        vals: Option<Vec<String>>,

        /// Discard the current frame first
        #[arg(long)]
        clean: bool,
    },

    /// Query an aggregate from a running server
    Query {
        /// Server base URL
        #[arg(short, long, env = "PIVOT_FRAME_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,

        /// Aggregate to compute
        #[arg(short, long, value_enum, default_value = "sum")]
        kind: QueryKind,

        /// Pivot columns to group by, comma separated
        #[arg(short, long, value_delimiter = ',')]
        pivots: Vec<String>,

        /// Value column index
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        column: i64,

        /// Write results to this JSON file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a batch JSON file
    Validate {
        /// Path to batch JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Serve {
            host,
            port,
            agg_timeout_secs,
        } => {
            let config = ServerConfig {
                host,
                port,
                agg_timeout: Duration::from_secs(agg_timeout_secs),
            };
            execute_serve(config)?;
        }

        Commands::Load {
            url,
            file,
            pivots,
            vals,
            clean,
        } => {
            let schema = match (pivots, vals) {
                (None, None) => None,
                (pivots, vals) => Some(DataFrameHeader {
                    pivots: pivots.unwrap_or_default(),
                    vals: vals.unwrap_or_default(),
                }),
            };

            let args = LoadArgs {
                server_url: url,
                input: file,
                schema,
                clean_first: clean,
            };

            // Validate args first
            validate_args(&args)?;

            let loaded = execute_load(args)?;
            println!("✓ Loaded {} rows", loaded);
        }

        Commands::Query {
            url,
            kind,
            pivots,
            column,
            output,
        } => {
            execute_query(QueryArgs {
                server_url: url,
                kind,
                pivots,
                column,
                output,
            })?;
        }

        Commands::Validate { file } => {
            validate_batch_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a batch JSON file
///
/// **Private** - internal command implementation
fn validate_batch_file(file_path: PathBuf) -> Result<()> {
    use pivot_frame::frame::{DataFrame, Frame};
    use pivot_frame::output::read_batch;

    println!("Validating batch: {}", file_path.display());

    let batch = read_batch(&file_path)?;
    println!("✓ Valid batch JSON");
    println!("  Rows: {}", batch.rows.len());

    if let Some(schema) = batch.schema {
        println!("  Pivots: {}", schema.pivots.join(PIVOT_KEY_DELIMITER));
        println!("  Vals: {}", schema.vals.join(PIVOT_KEY_DELIMITER));

        let mut frame = DataFrame::new(schema.pivots, schema.vals);
        frame.add_records(batch.rows)?;
        println!("✓ All rows fit the schema");
    } else {
        println!("  No schema; rows will be checked by the server");
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Pivot Frame v{}", env!("CARGO_PKG_VERSION"));
    println!("Aggregates: SUM, COUNT, AVG, MAX, MIN");
}
