use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use sylva::{CollectionBuilder, Command, Config};

/// Load a tree census and answer the queries in a command file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Census CSV export
    census: PathBuf,

    /// File with one command per line
    commands: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("sylva=warn"))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Unable to read config file: {}", path.display()))?;
            Config::from_json(&text)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => Config::default(),
    };

    let commands = File::open(&args.commands)
        .with_context(|| format!("Unable to open commands file: {}", args.commands.display()))?;

    let (trees, summary) = CollectionBuilder::new()
        .config(config)
        .census_path(&args.census)
        .build_with_summary()
        .with_context(|| format!("Unable to load tree census file: {}", args.census.display()))?;
    info!(
        "Loaded {} trees of {} species",
        summary.inserted,
        trees.number_of_species()
    );

    for line in BufReader::new(commands).lines() {
        let line = line.context("Could not read next command")?;
        match Command::parse(&line) {
            Ok(Some(command)) => println!("{}", command.execute(&trees)),
            Ok(None) => {}
            Err(e) => {
                warn!("{}", e);
                println!("Invalid command.\n");
            }
        }
    }

    Ok(())
}
