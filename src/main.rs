use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use biomass_flows::allocation;
use biomass_flows::config::{
    DatasetConfig, MapConfig, SankeyConfig, DEFAULT_DATA_DIR, DEFAULT_MAP_OUTPUT,
    DEFAULT_SANKEY_OUTPUT,
};
use biomass_flows::logging::init_logging;
use biomass_flows::pipeline;

#[derive(Parser, Debug)]
#[command(
    name = "biomass-flows",
    version,
    about = "California forest biomass resource map and end-use flow diagram"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_DATA_DIR,
        help = "Directory holding the Billion Ton Report point CSVs"
    )]
    data_dir: PathBuf,
    #[arg(long, global = true, default_value = "info", help = "trace, debug, info, warn or error")]
    log_level: String,
    #[arg(long, global = true, help = "Print the run summary as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive map of resource points, one layer per category
    Map {
        #[arg(long, default_value = DEFAULT_MAP_OUTPUT)]
        output: PathBuf,
        #[arg(long, help = "Markers shown per category (largest first)")]
        max_points: Option<usize>,
    },
    /// Flow diagram from resource categories to end uses
    Sankey {
        #[arg(long, default_value = DEFAULT_SANKEY_OUTPUT)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(&cli.log_level)?;

    let datasets = DatasetConfig::california_default(&cli.data_dir);

    match cli.command {
        Commands::Map { output, max_points } => {
            let mut config = MapConfig::default();
            if let Some(k) = max_points {
                config.max_points_per_category = k;
            }
            let run = pipeline::run_map(&datasets, &config, &output)
                .context("failed to build the resource map")?;
            print_out(cli.json, &run, || {
                format!(
                    "{}\nMap saved as: {}",
                    run.report(),
                    run.output.display()
                )
            })?;
        }
        Commands::Sankey { output } => {
            let matrix = allocation::default_matrix()?;
            let run = pipeline::run_sankey(&datasets, &matrix, &SankeyConfig::default(), &output)
                .context("failed to build the flow diagram")?;
            print_out(cli.json, &run, || {
                format!(
                    "{}\nSankey diagram saved as: {}",
                    run.report(),
                    run.output.display()
                )
            })?;
        }
    }

    Ok(())
}

fn print_out<T: Serialize>(
    json: bool,
    value: &T,
    human: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", human());
    }
    Ok(())
}
