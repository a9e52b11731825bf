//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_catalog_adapter::CsvCatalogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_stock_source::MemoryStockSource;
use crate::adapters::memory_trade_store::MemoryTradeStore;
use crate::domain::error::TickmillError;
use crate::domain::stock_management::StockManagementService;
use crate::domain::trade_service::TradeService;
use crate::ports::config_port::ConfigPort;
use crate::ports::stock_port::StockSource;

#[derive(Parser, Debug)]
#[command(name = "tickmill", about = "In-memory stock catalog and trade calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the canned reference scenario
    Demo {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load a CSV catalog and print it
    Catalog {
        #[arg(short, long)]
        file: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Demo { config } => run_demo(config.as_ref()),
        Command::Catalog { file } => run_catalog(&file),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TickmillError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_demo(config_path: Option<&PathBuf>) -> ExitCode {
    let mut vwap_window_minutes: i64 = 15;

    let source: Box<dyn StockSource> = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let config = match load_config(path) {
                Ok(c) => c,
                Err(code) => return code,
            };
            vwap_window_minutes = config.get_int("demo", "vwap_window_minutes", 15);
            match config.get_string("demo", "catalog") {
                Some(catalog) => Box::new(CsvCatalogAdapter::new(PathBuf::from(catalog))),
                None => Box::new(MemoryStockSource::reference_catalog()),
            }
        }
        None => Box::new(MemoryStockSource::reference_catalog()),
    };

    let trades = TradeService::new(Box::new(MemoryTradeStore::new()));
    let mut service = match StockManagementService::new(source.as_ref(), trades) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match run_scenario(&mut service, vwap_window_minutes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(cause) = std::error::Error::source(&e) {
                eprintln!("  caused by: {cause}");
            }
            (&e).into()
        }
    }
}

fn run_scenario(
    service: &mut StockManagementService,
    vwap_window_minutes: i64,
) -> Result<(), TickmillError> {
    println!("== Dividend yields ==");
    service.update_market_price("POP", 100.0)?;
    println!("POP yield at 100: {}", service.dividend_yield("POP")?);
    service.update_market_price("GIN", 102.0)?;
    println!("GIN yield at 102: {}", service.dividend_yield("GIN")?);

    println!("\n== P/E ratio ==");
    service.update_market_price("ALE", 175.0)?;
    println!("ALE P/E at 175: {}", service.pe_ratio("ALE")?);

    println!("\n== Recording trades ==");
    service.buy_at_current_price("POP", 5)?;
    service.buy_at_current_price("ALE", 6)?;
    service.buy_at_current_price("GIN", 1)?;

    service.update_market_price("POP", 101.0)?;
    service.update_market_price("ALE", 101.0)?;
    service.update_market_price("GIN", 87.0)?;
    service.update_market_price("TEA", 104.0)?;

    service.buy_at_current_price("TEA", 1)?;
    service.buy_at_current_price("POP", 5)?;
    service.buy_at_current_price("ALE", 5)?;
    service.buy_at_current_price("ALE", 2)?;
    service.sell_at_current_price("GIN", 1)?;

    for stock in service.stocks() {
        println!("{stock}");
    }

    println!("\n== Volume weighted prices ({vwap_window_minutes} minute window) ==");
    for symbol in ["POP", "ALE", "GIN"] {
        let vwap = service
            .trade_service()
            .volume_weighted_price(symbol, vwap_window_minutes)?;
        println!("{symbol} VWAP: {vwap}");
    }

    println!("\n== Index ==");
    println!("All-share index: {}", service.index_price()?);

    Ok(())
}

fn run_catalog(file: &PathBuf) -> ExitCode {
    let adapter = CsvCatalogAdapter::new(file.clone());
    match adapter.all_stocks() {
        Ok(stocks) => {
            for stock in &stocks {
                println!("{stock}");
            }
            eprintln!("{} stocks loaded", stocks.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
