//! Query command implementation.

use super::models::{QueryArgs, QueryKind};
use crate::frame::AggregationKind;
use crate::output::write_results;
use crate::remote::FrameClient;
use crate::service::AggRequest;
use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

/// Run one query against the server and print or write the result
pub fn execute_query(args: QueryArgs) -> Result<()> {
    let client = FrameClient::new(&args.server_url)
        .context("Failed to create frame client")?;

    let request = AggRequest {
        pivots: args.pivots.clone(),
        agg_column: args.column,
    };

    info!("Querying {:?} over {:?}", args.kind, request.pivots);
    let result = run_query(&client, args.kind, &request)
        .with_context(|| format!("{:?} query failed", args.kind))?;

    match &args.output {
        Some(path) => {
            write_results(&result, path).context("Failed to write results")?;
            info!("✓ Results written to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

fn run_query(client: &FrameClient, kind: QueryKind, request: &AggRequest) -> Result<Value> {
    let value = match kind {
        QueryKind::Sum => serde_json::to_value(client.aggregate(AggregationKind::Sum, request)?)?,
        QueryKind::Count => serde_json::to_value(client.aggregate(AggregationKind::Count, request)?)?,
        QueryKind::Avg => serde_json::to_value(client.aggregate(AggregationKind::Avg, request)?)?,
        QueryKind::Max => serde_json::to_value(client.aggregate(AggregationKind::Max, request)?)?,
        QueryKind::Min => serde_json::to_value(client.aggregate(AggregationKind::Min, request)?)?,
        QueryKind::Distinct => serde_json::to_value(client.distinct(request)?)?,
        QueryKind::All => serde_json::to_value(client.aggregate_all(request)?)?,
    };
    Ok(value)
}
