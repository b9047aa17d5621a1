//! Basket Pricer CLI
//!
//! Loads a catalogue, offers and a basket from fixture files, prices the
//! basket and prints an itemised receipt.

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use basket_pricer::fixtures::Fixture;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "basket-pricer", about = "Price a shopping basket", long_about = None)]
struct Cli {
    /// Directory holding `catalogues/`, `offers/` and `baskets/`
    #[arg(short, long, env = "BASKET_PRICER_FIXTURES", default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Fixture set to load the catalogue and offers from
    #[arg(short, long, default_value = "groceries")]
    set: String,

    /// Basket to price (defaults to the fixture set name)
    #[arg(short, long)]
    basket: Option<String>,

    /// Log level or filter directives; overrides `RUST_LOG` when given
    #[arg(short, long)]
    log_level: Option<String>,
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(cli.log_level.as_deref()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");

            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over `warn`.
fn env_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let basket = cli.basket.as_deref().unwrap_or(&cli.set);

    let mut fixture = Fixture::with_base_path(&cli.fixtures);

    fixture
        .load_catalogue(&cli.set)?
        .load_offers_if_present(&cli.set)?
        .load_basket(basket)?;

    let receipt = fixture.pricer()?.receipt();

    info!(
        set = %cli.set,
        basket,
        sub_total = %receipt.sub_total(),
        discount = %receipt.discount(),
        total = %receipt.total(),
        "priced basket"
    );

    receipt.write_to(io::stdout().lock())?;

    Ok(())
}
