//! Load command implementation.
//!
//! The load command:
//! 1. Reads a JSON batch file
//! 2. Optionally discards the server's current frame
//! 3. Creates the frame if a schema is known
//! 4. Posts every row as one all-or-nothing batch

use super::models::LoadArgs;
use crate::output::read_batch;
use crate::remote::FrameClient;
use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Check load arguments before touching the network
pub fn validate_args(args: &LoadArgs) -> Result<()> {
    if args.server_url.trim().is_empty() {
        bail!("Server URL cannot be empty");
    }

    if !args.input.exists() {
        bail!("Input file not found: {}", args.input.display());
    }

    if let Some(schema) = &args.schema {
        if schema.pivots.is_empty() && schema.vals.is_empty() {
            bail!("Schema must name at least one pivot or value column");
        }
    }

    Ok(())
}

/// Execute the load command, returning the number of rows sent
pub fn execute_load(args: LoadArgs) -> Result<usize> {
    let start_time = Instant::now();

    info!("Step 1/3: Reading batch from {}...", args.input.display());
    let batch = read_batch(&args.input)
        .with_context(|| format!("Failed to read batch file {}", args.input.display()))?;

    let client = FrameClient::new(&args.server_url)
        .context("Failed to create frame client")?;

    if args.clean_first {
        info!("Discarding current frame on {}", client.base_url());
        client.clean().context("Failed to clean frame")?;
    }

    info!("Step 2/3: Creating frame...");
    match args.schema.or(batch.schema) {
        Some(schema) => client
            .create_frame(&schema)
            .context("Failed to create frame")?,
        None => warn!("No schema given; rows go to the server's existing frame"),
    }

    info!("Step 3/3: Sending {} rows...", batch.rows.len());
    client
        .add_records(&batch.rows)
        .context("Server rejected the batch")?;

    info!("Load completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(batch.rows.len())
}
