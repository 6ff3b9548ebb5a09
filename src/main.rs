use anyhow::Result;
use bloomwatch::cli::Args;
use bloomwatch::{Orchestrator, logging};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.into_config()?;
    logging::init(&config);

    let orchestrator = Orchestrator::from_config(&config)?;
    let response = orchestrator.handle(&args.into_query()).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);
    Ok(())
}
