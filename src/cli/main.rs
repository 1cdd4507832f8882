#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use csv::Writer;
use log::LevelFilter;
use serde::Deserialize;
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use splitflow::{Config, Decimal, RawTransaction, Settlement};

/// Compute a minimal settlement plan for a group from a CSV of transfers
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSV file with `payer,payee,amount` rows
    #[arg(short, long)]
    transactions: PathBuf,

    /// CSV file with a `participant` column; defaults to participants in order of appearance
    #[arg(short, long)]
    participants: Option<PathBuf>,

    /// Where to write the settlement plan as `from,to,amount` rows
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fractional digits carried by amounts
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Verify the resulting settlement before printing it
    #[arg(long)]
    check: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransactionRecord {
    payer: String,
    payee: String,
    amount: String,
}

#[derive(Debug, Deserialize)]
struct ParticipantRecord {
    participant: String,
}

// Function to read the transfers from CSV file
fn read_transactions_csv(
    filepath: &Path,
) -> Result<Vec<RawTransaction<String, Decimal>>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(File::open(filepath)?);
    rdr.deserialize::<TransactionRecord>()
        .map(|row| -> Result<_, Box<dyn Error>> {
            let row = row?;
            let amount = Decimal::from_str(row.amount.trim())
                .map_err(|e| format!("invalid amount {:?}: {e}", row.amount))?;
            Ok(RawTransaction::new(row.payer, row.payee, amount))
        })
        .collect()
}

fn read_participants_csv(filepath: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(File::open(filepath)?);
    let rows: Result<Vec<ParticipantRecord>, _> = rdr.deserialize().collect();
    Ok(rows?.into_iter().map(|r| r.participant).collect())
}

fn participants_in_order(transactions: &[RawTransaction<String, Decimal>]) -> Vec<String> {
    transactions.iter().fold(vec![], |mut firms, t| {
        for id in [&t.payer, &t.payee] {
            if !firms.contains(id) {
                firms.push(id.clone());
            }
        }
        firms
    })
}

// Function to write the settlement plan
fn write_csv(
    settlement: &Settlement<String, Decimal>,
    filepath: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filepath)?;
    wtr.write_record(["from", "to", "amount"])?;
    for payment in &settlement.plan {
        wtr.write_record([
            payment.from(),
            payment.to(),
            &payment.amount().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    TermLogger::init(
        cli.log_level.into(),
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| e.to_string())?;

    let config = Config::with_scale(cli.scale);
    let transactions = read_transactions_csv(&cli.transactions)?;
    let participants = match &cli.participants {
        Some(path) => read_participants_csv(path)?,
        None => participants_in_order(&transactions),
    };

    let settlement =
        splitflow::settle(participants, transactions, &config).map_err(|e| e.to_string())?;
    if cli.check {
        splitflow::check(&settlement, &config).map_err(|e| e.to_string())?;
    }

    println!("Balances:");
    for (participant, balance) in settlement.balances.iter() {
        println!("  {participant:<20} {balance:>12}");
    }
    println!("Payments:");
    for payment in &settlement.plan {
        println!(
            "  {} pays {} {}",
            payment.from(),
            payment.to(),
            payment.amount()
        );
    }
    println!("Total flow: {}", settlement.total_flow);

    if let Some(path) = &cli.output {
        write_csv(&settlement, path)?;
    }

    Ok(())
}
